use crate::core::Storage;
use crate::utils::error::Result;

/// Read-only file access for the interactive surface: the pasted-table file
/// and the uploaded screenshot.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(path).await?;
        Ok(data)
    }
}
