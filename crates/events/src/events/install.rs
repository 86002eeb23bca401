use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Installation domain events - maps to the install crate and `jdkup install`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InstallEvent {
    /// Installation operation started for a recipe
    Started {
        recipe: String,
        version: String,
        staged_root: PathBuf,
        target: PathBuf,
    },

    /// The single staged bundle was located and validated
    BundleResolved { recipe: String, bundle: PathBuf },

    /// A previous installation is being cleared from the target
    RemovingPrevious { recipe: String, target: PathBuf },

    /// The validated bundle is being copied to the target
    Copying {
        recipe: String,
        bundle: PathBuf,
        target: PathBuf,
    },

    /// Installation completed successfully
    Completed {
        recipe: String,
        version: String,
        target: PathBuf,
    },

    /// Installation failed
    Failed {
        recipe: String,
        error: String,
    },
}
