#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Platform layer for privileged filesystem mutation.
//!
//! The installer never touches the protected target path itself; every
//! mutation goes through a system utility run with elevated privileges.
//! This crate provides the command builder, the subprocess runner with
//! event emission, and the `PrivilegedOps` trait the installer is written
//! against so tests can substitute an unprivileged implementation.

pub mod privileged;
pub mod process;

pub use privileged::{Elevation, PrivilegedOps, SystemOps};
pub use process::{CommandOutput, PlatformCommand};
