use serde::{Deserialize, Serialize};

/// A successfully parsed tab-delimited table. All rows share the header's
/// column count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }
}

/// Normalized form of the pasted text: structured when it parsed as a
/// tab-delimited table, otherwise the original text untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum TableText {
    Structured(Table),
    Raw(String),
}

/// What the normalizer made of the pasted text. Degraded is advisory only,
/// the audit proceeds in raw-text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    Structured,
    Degraded,
    Empty,
}

/// Declared media type of the uploaded screenshot; enforced at the upload
/// boundary from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    Png,
    Jpeg,
}

impl MediaType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(MediaType::Png),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }
}

/// The uploaded screenshot; immutable once received.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub media_type: MediaType,
}

impl ImageUpload {
    pub fn new(bytes: Vec<u8>, media_type: MediaType) -> Self {
        Self { bytes, media_type }
    }
}

/// Terminal outcome of one audit attempt. Exactly one of report or failure,
/// never both.
#[derive(Debug, Clone, PartialEq)]
pub enum AuditOutcome {
    /// The model's discrepancy report, displayed verbatim.
    Report(String),
    /// Description of the remote-call failure; the session stays retriable.
    Failed(String),
}
