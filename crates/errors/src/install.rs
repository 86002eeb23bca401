//! Installer error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum InstallError {
    #[error("expected exactly one bundle under {staged_root}, found {count}")]
    AmbiguousOrMissingBundle { staged_root: String, count: usize },

    #[error("invalid bundle {path}: {message}")]
    InvalidBundle { path: String, message: String },

    #[error("removal of {path} failed: {message}")]
    RemovalFailed { path: String, message: String },

    #[error("install to {target} failed: {message}")]
    InstallFailed { target: String, message: String },
}

impl UserFacingError for InstallError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::AmbiguousOrMissingBundle { .. } => {
                Some("Re-stage the archive; the staged root must contain exactly one bundle.")
            }
            Self::InvalidBundle { .. } => {
                Some("The staged archive looks corrupted or malicious; do not retry it.")
            }
            Self::RemovalFailed { .. } | Self::InstallFailed { .. } => {
                Some("Check that elevated privileges are available and retry the operation.")
            }
        }
    }

    fn is_retryable(&self) -> bool {
        // Privileged subprocess failures may be transient (e.g. sudo timeout);
        // bundle ambiguity and escape violations never are.
        matches!(self, Self::RemovalFailed { .. } | Self::InstallFailed { .. })
    }
}
