//! Privileged filesystem operations via system utilities
//!
//! Every mutation of the protected install target runs through here:
//! recursive removal with `rm -rf` and attribute-preserving copy with
//! `ditto --noqtn`, which also strips the quarantine extended attribute
//! so the installed runtime is not blocked from execution. All commands
//! are prefixed with sudo under `Elevation::Sudo`.

use async_trait::async_trait;
use jdkup_errors::PlatformError;
use jdkup_events::{AppEvent, EventEmitter, EventSender, PlatformEvent};
use std::path::Path;
use std::time::Instant;
use tokio::process::Command;

use crate::process::{CommandOutput, PlatformCommand};

const SUDO: &str = "/usr/bin/sudo";
const RM: &str = "/bin/rm";
const MKDIR: &str = "/bin/mkdir";
const DITTO: &str = "/usr/bin/ditto";

/// How commands acquire elevated privileges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    /// Prefix every invocation with sudo (production default)
    Sudo,
    /// Run directly; for tests and already-elevated callers
    None,
}

/// Privileged filesystem mutations the installer depends on
///
/// Implementations must treat every invocation as fallible and surface a
/// structured result; callers check it explicitly rather than assuming the
/// ambient process has the required privileges.
#[async_trait]
pub trait PrivilegedOps: Send + Sync {
    /// Recursively remove `path`, succeeding if it is already absent
    async fn remove_tree(&self, path: &Path) -> Result<(), PlatformError>;

    /// Copy the directory tree at `src` to `dst`, preserving attributes
    /// and stripping quarantine metadata; creates `dst`'s parent
    async fn copy_tree(&self, src: &Path, dst: &Path) -> Result<(), PlatformError>;
}

/// Production implementation shelling out to macOS system utilities
pub struct SystemOps {
    elevation: Elevation,
    tx: Option<EventSender>,
}

impl SystemOps {
    /// Create a new instance with the given elevation mode
    #[must_use]
    pub fn new(elevation: Elevation) -> Self {
        Self {
            elevation,
            tx: None,
        }
    }

    /// Attach an event sender for subprocess progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Build a command, applying the sudo prefix when elevation is requested
    fn elevated(&self, program: &str, args: &[&str]) -> PlatformCommand {
        match self.elevation {
            Elevation::Sudo => PlatformCommand::new(SUDO).arg(program).args(args),
            Elevation::None => PlatformCommand::new(program).args(args),
        }
    }

    /// Run a command to completion, blocking the operation until it exits
    async fn run(&self, cmd: PlatformCommand) -> Result<CommandOutput, PlatformError> {
        let start = Instant::now();
        self.emit(AppEvent::Platform(PlatformEvent::CommandStarted {
            program: cmd.program().to_string(),
            args: cmd.get_args().to_vec(),
        }));

        let output = Command::new(cmd.program())
            .args(cmd.get_args())
            .output()
            .await
            .map_err(|e| {
                let err = match e.kind() {
                    std::io::ErrorKind::NotFound => PlatformError::CommandNotFound {
                        command: cmd.program().to_string(),
                    },
                    std::io::ErrorKind::PermissionDenied => PlatformError::PermissionDenied {
                        operation: cmd.program().to_string(),
                        message: e.to_string(),
                    },
                    _ => PlatformError::ProcessExecutionFailed {
                        command: cmd.program().to_string(),
                        message: e.to_string(),
                    },
                };
                self.emit(AppEvent::Platform(PlatformEvent::CommandFailed {
                    program: cmd.program().to_string(),
                    exit_code: None,
                    stderr: e.to_string(),
                }));
                err
            })?;

        let output = CommandOutput {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        };

        if output.success() {
            self.emit(AppEvent::Platform(PlatformEvent::CommandCompleted {
                program: cmd.program().to_string(),
                exit_code: output.code().unwrap_or(0),
                duration_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            }));
            Ok(output)
        } else {
            let stderr = output.stderr_lossy();
            self.emit(AppEvent::Platform(PlatformEvent::CommandFailed {
                program: cmd.program().to_string(),
                exit_code: output.code(),
                stderr: stderr.clone(),
            }));
            Err(PlatformError::CommandFailed {
                command: format!("{} {}", cmd.program(), cmd.get_args().join(" ")),
                code: output.code().unwrap_or(-1),
                stderr,
            })
        }
    }
}

impl EventEmitter for SystemOps {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

#[async_trait]
impl PrivilegedOps for SystemOps {
    async fn remove_tree(&self, path: &Path) -> Result<(), PlatformError> {
        let path = path.to_string_lossy();
        self.run(self.elevated(RM, &["-rf", path.as_ref()]))
            .await?;
        Ok(())
    }

    async fn copy_tree(&self, src: &Path, dst: &Path) -> Result<(), PlatformError> {
        if let Some(parent) = dst.parent() {
            let parent = parent.to_string_lossy();
            self.run(self.elevated(MKDIR, &["-p", parent.as_ref()]))
                .await?;
        }

        let src = src.to_string_lossy();
        let dst = dst.to_string_lossy();
        self.run(self.elevated(DITTO, &["--noqtn", src.as_ref(), dst.as_ref()]))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sudo_prefix_applied() {
        let ops = SystemOps::new(Elevation::Sudo);
        let cmd = ops.elevated(RM, &["-rf", "/tmp/x"]);
        assert_eq!(cmd.program(), SUDO);
        assert_eq!(cmd.get_args(), ["/bin/rm", "-rf", "/tmp/x"]);
    }

    #[test]
    fn no_prefix_without_elevation() {
        let ops = SystemOps::new(Elevation::None);
        let cmd = ops.elevated(DITTO, &["--noqtn", "/a", "/b"]);
        assert_eq!(cmd.program(), DITTO);
        assert_eq!(cmd.get_args(), ["--noqtn", "/a", "/b"]);
    }

    #[tokio::test]
    async fn run_reports_nonzero_exit() {
        let ops = SystemOps::new(Elevation::None);
        // rm without -f on a missing path exits non-zero on every platform
        let missing = "/nonexistent/jdkup-test-path";
        let result = ops.run(PlatformCommand::new(RM).arg(missing)).await;
        assert!(matches!(
            result,
            Err(PlatformError::CommandFailed { .. })
        ));
    }

    #[tokio::test]
    async fn run_missing_binary_is_structured() {
        let ops = SystemOps::new(Elevation::None);
        let result = ops
            .run(PlatformCommand::new("/nonexistent/jdkup-no-such-binary"))
            .await;
        assert!(matches!(result, Err(PlatformError::CommandNotFound { .. })));
    }
}
