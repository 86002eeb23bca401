//! Centralized, non-configurable filesystem paths for jdkup
//!
//! These paths are deliberately not exposed via TOML configuration. Install
//! targets come from the recipes themselves, never from here.

pub const PREFIX: &str = "/opt/jdkup";

pub const LOGS_DIR: &str = "/opt/jdkup/logs";

/// Recipes directory looked up when neither the config file nor the CLI
/// provides one, relative to the working directory of the invoking runtime.
pub const DEFAULT_RECIPES_DIR: &str = "recipes";
