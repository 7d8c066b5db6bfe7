use crate::config::{DEFAULT_API_ENDPOINT, DEFAULT_MODEL};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AuditError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Deployment-time configuration file. The credential is typically supplied
/// as `key = "${OPENAI_API_KEY}"` and substituted from the environment at
/// load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub audit: AuditConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    pub model: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: Option<String>,
    pub key: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AuditError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AuditError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unresolved
    /// placeholders are kept literally and caught by validation.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("api.endpoint", self.api_endpoint())?;
        validation::validate_non_empty_string("audit.model", self.model())?;

        let key = validation::validate_required_field("api.key", &self.api.key)?;
        if key.starts_with("${") {
            return Err(AuditError::MissingConfigError {
                field: format!("api.key (unresolved placeholder {})", key),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.api.endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn model(&self) -> &str {
        self.audit.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn api_key(&self) -> Option<&str> {
        self.api.key.as_deref()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
