pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::openai::OpenAiVisionClient;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::orchestrator::{AuditSession, AuditState};
pub use crate::domain::model::{AuditOutcome, ImageUpload, MediaType, TableMode, TableText};
pub use crate::utils::error::{AuditError, Result};
