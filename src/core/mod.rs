pub mod encoder;
pub mod normalizer;
pub mod orchestrator;
pub mod prompts;
pub mod request;

pub use crate::domain::model::{AuditOutcome, ImageUpload, MediaType, TableMode, TableText};
pub use crate::domain::ports::{ConfigProvider, Storage, VisionModel};
pub use crate::utils::error::Result;
