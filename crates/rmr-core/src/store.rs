//! Whole-document persistence
use crate::error::{Result, RmrError};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Blocking whole-document load/save. No partial updates, no retries.
pub trait DocumentStore {
    fn load(&self, path: &Path) -> Result<Value>;
    fn save(&self, path: &Path, document: &Value) -> Result<()>;
}

/// JSON files on the local filesystem, written with two-space indentation
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileStore;

impl DocumentStore for JsonFileStore {
    fn load(&self, path: &Path) -> Result<Value> {
        let text = fs::read_to_string(path).map_err(|e| RmrError::io(path, e))?;
        serde_json::from_str(&text).map_err(|e| RmrError::json(path, e))
    }

    fn save(&self, path: &Path, document: &Value) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| RmrError::io(parent, e))?;
        }
        let text = serde_json::to_string_pretty(document).map_err(|e| RmrError::json(path, e))?;
        fs::write(path, text).map_err(|e| RmrError::io(path, e))?;
        tracing::debug!(path = %path.display(), "document saved");
        Ok(())
    }
}
