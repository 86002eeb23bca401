//! Recipe loading and validation error types

use std::borrow::Cow;

use crate::UserFacingError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RecipeError {
    #[error("recipe not found: {token}")]
    NotFound { token: String },

    #[error("failed to read recipe {path}: {message}")]
    ReadError { path: String, message: String },

    #[error("failed to parse recipe {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("invalid recipe {token}: {message}")]
    Invalid { token: String, message: String },

    #[error("no artifact for architecture {arch} in recipe {token}")]
    MissingArtifact { token: String, arch: String },

    #[error("duplicate recipe token {token} in {path}")]
    DuplicateToken { token: String, path: String },
}

impl UserFacingError for RecipeError {
    fn user_message(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }

    fn user_hint(&self) -> Option<&'static str> {
        match self {
            Self::NotFound { .. } => Some("List the recipes directory for available tokens."),
            Self::ParseError { .. } | Self::Invalid { .. } => {
                Some("Fix the recipe TOML and retry the command.")
            }
            Self::MissingArtifact { .. } => {
                Some("The recipe does not ship a build for this host architecture.")
            }
            _ => None,
        }
    }
}
