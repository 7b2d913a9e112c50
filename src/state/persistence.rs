use std::fs;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::error::CodecError;
use crate::serialization::SerializedDocument;

/// Errors that can occur while reading or writing document files
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to access document file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document: {0}")]
    Codec(#[from] CodecError),
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(CodecError::Malformed(err))
    }
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Writes `doc` as pretty-printed JSON, creating parent directories as needed.
pub fn save_document(path: &Path, doc: &SerializedDocument) -> PersistenceResult<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(doc)?;
    fs::write(path, json)?;
    info!("Saved {} figure(s) to {}", doc.figures.len(), path.display());
    Ok(())
}

/// Reads and validates a document file.
///
/// The whole file is checked before it is returned, so a document that loads
/// can always be applied with `Canvas::replace_document`.
pub fn load_document(path: &Path) -> PersistenceResult<SerializedDocument> {
    let json = fs::read_to_string(path)?;
    let doc: SerializedDocument = serde_json::from_str(&json)?;
    doc.decode()?;
    info!("Loaded {} figure(s) from {}", doc.figures.len(), path.display());
    Ok(doc)
}
