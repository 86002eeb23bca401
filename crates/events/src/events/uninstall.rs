use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Uninstallation domain events consumed by CLI/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UninstallEvent {
    /// Uninstallation operation started
    Started { recipe: String, target: PathBuf },

    /// Uninstallation completed; `removed` is false when the target was
    /// already absent and the operation was a no-op
    Completed {
        recipe: String,
        target: PathBuf,
        removed: bool,
    },

    /// Uninstallation failed
    Failed { recipe: String, error: String },
}
