pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "tabaudit")]
#[command(about = "Audit a pasted table against a screenshot of it via a vision model")]
pub struct CliConfig {
    /// File holding the pasted table text; read from stdin when omitted
    #[arg(long)]
    pub table_file: Option<String>,

    /// Path to the table screenshot (png, jpg or jpeg)
    #[arg(long)]
    pub image: String,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// API key; falls back to the OPENAI_API_KEY environment variable
    #[arg(long)]
    pub api_key: Option<String>,

    /// TOML config file overriding endpoint, model and key
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Fills the credential from the environment when no flag was given.
    pub fn resolve_api_key(&mut self) {
        if self.api_key.is_none() {
            self.api_key = std::env::var("OPENAI_API_KEY").ok();
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_image_extension(&self.image)?;
        Ok(())
    }
}
