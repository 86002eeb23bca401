#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Install/uninstall lifecycle hook for staged runtime bundles
//!
//! The external package-manager runtime downloads, checksum-verifies, and
//! extracts an archive into a staging directory before calling in here.
//! This crate locates the single bundle inside that staging directory,
//! validates it against path-escape and ambiguity hazards, and replaces
//! any previous installation at the recipe's fixed target path using
//! privilege-elevated filesystem operations.

mod discovery;
mod installer;

pub use discovery::{find_bundle, resolve_bundle, BundleLookup};
pub use installer::{
    InstallOutcome, InstallRequest, Installer, UninstallOutcome, UninstallRequest,
};
