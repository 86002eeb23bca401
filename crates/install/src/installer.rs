//! The install/uninstall lifecycle hook
//!
//! Control flow is strictly sequential: locate bundle, validate, clear the
//! old install, copy the new one. Each privileged subprocess is awaited to
//! completion before the next step. The installer is stateless; all state
//! is confined to one call.

use jdkup_errors::{Error, InstallError};
use jdkup_events::{AppEvent, EventEmitter, EventSender, InstallEvent, UninstallEvent};
use jdkup_platform::PrivilegedOps;
use std::path::PathBuf;
use tokio::fs;

use crate::discovery::{find_bundle, resolve_bundle, BundleLookup};

/// Everything an install call needs, taken from the recipe and the runtime
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Recipe token, for reporting only
    pub recipe: String,
    /// Recipe version, for reporting only
    pub version: String,
    /// Staging directory populated by the external runtime
    pub staged_root: PathBuf,
    /// Fixed install target from the recipe
    pub target: PathBuf,
    /// Bundle name prefix from the recipe
    pub bundle_prefix: String,
}

/// Successful install result
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    pub recipe: String,
    pub bundle: PathBuf,
    pub target: PathBuf,
}

/// Everything an uninstall call needs
#[derive(Debug, Clone)]
pub struct UninstallRequest {
    /// Recipe token, for reporting only
    pub recipe: String,
    /// Fixed install target from the recipe
    pub target: PathBuf,
}

/// Successful uninstall result
#[derive(Debug, Clone)]
pub struct UninstallOutcome {
    pub target: PathBuf,
    /// False when the target was already absent and nothing was removed
    pub removed: bool,
}

/// Stateless installer over a privileged-operations implementation
pub struct Installer<O: PrivilegedOps> {
    ops: O,
    tx: Option<EventSender>,
}

impl<O: PrivilegedOps> Installer<O> {
    /// Create a new installer
    pub fn new(ops: O) -> Self {
        Self { ops, tx: None }
    }

    /// Attach an event sender for progress reporting
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Install the staged bundle at the request's target
    ///
    /// Calling this twice with equivalent staged input succeeds both times
    /// and leaves the same end state: any prior install is unconditionally
    /// cleared first. There is no rollback - if removal succeeds but the
    /// copy fails, the target may be absent or partially populated.
    ///
    /// # Errors
    ///
    /// - `AmbiguousOrMissingBundle` when the staged root does not contain
    ///   exactly one candidate; no mutation has happened
    /// - `InvalidBundle` when the candidate fails validation; no mutation
    /// - `RemovalFailed` / `InstallFailed` when a privileged subprocess
    ///   exits non-zero; the filesystem is left as the subprocess left it
    pub async fn install(&self, request: &InstallRequest) -> Result<InstallOutcome, Error> {
        let result = self.install_inner(request).await;
        if let Err(e) = &result {
            self.emit(AppEvent::Install(InstallEvent::Failed {
                recipe: request.recipe.clone(),
                error: e.to_string(),
            }));
        }
        result
    }

    async fn install_inner(&self, request: &InstallRequest) -> Result<InstallOutcome, Error> {
        self.emit(AppEvent::Install(InstallEvent::Started {
            recipe: request.recipe.clone(),
            version: request.version.clone(),
            staged_root: request.staged_root.clone(),
            target: request.target.clone(),
        }));

        let candidate =
            match find_bundle(&request.staged_root, &request.bundle_prefix).await? {
                BundleLookup::One(path) => path,
                lookup => {
                    return Err(InstallError::AmbiguousOrMissingBundle {
                        staged_root: request.staged_root.display().to_string(),
                        count: lookup.count(),
                    }
                    .into())
                }
            };

        let bundle = resolve_bundle(&request.staged_root, &candidate).await?;
        self.emit(AppEvent::Install(InstallEvent::BundleResolved {
            recipe: request.recipe.clone(),
            bundle: bundle.clone(),
        }));

        if fs::symlink_metadata(&request.target).await.is_ok() {
            self.emit(AppEvent::Install(InstallEvent::RemovingPrevious {
                recipe: request.recipe.clone(),
                target: request.target.clone(),
            }));
            self.ops.remove_tree(&request.target).await.map_err(|e| {
                InstallError::RemovalFailed {
                    path: request.target.display().to_string(),
                    message: e.to_string(),
                }
            })?;
        }

        self.emit(AppEvent::Install(InstallEvent::Copying {
            recipe: request.recipe.clone(),
            bundle: bundle.clone(),
            target: request.target.clone(),
        }));
        self.ops
            .copy_tree(&bundle, &request.target)
            .await
            .map_err(|e| InstallError::InstallFailed {
                target: request.target.display().to_string(),
                message: e.to_string(),
            })?;

        self.emit(AppEvent::Install(InstallEvent::Completed {
            recipe: request.recipe.clone(),
            version: request.version.clone(),
            target: request.target.clone(),
        }));

        Ok(InstallOutcome {
            recipe: request.recipe.clone(),
            bundle,
            target: request.target.clone(),
        })
    }

    /// Remove the installation at the request's target
    ///
    /// A missing target is a successful no-op.
    ///
    /// # Errors
    ///
    /// Returns `RemovalFailed` when the privileged removal exits non-zero.
    pub async fn uninstall(&self, request: &UninstallRequest) -> Result<UninstallOutcome, Error> {
        self.emit(AppEvent::Uninstall(UninstallEvent::Started {
            recipe: request.recipe.clone(),
            target: request.target.clone(),
        }));

        if fs::symlink_metadata(&request.target).await.is_err() {
            self.emit(AppEvent::Uninstall(UninstallEvent::Completed {
                recipe: request.recipe.clone(),
                target: request.target.clone(),
                removed: false,
            }));
            return Ok(UninstallOutcome {
                target: request.target.clone(),
                removed: false,
            });
        }

        self.ops
            .remove_tree(&request.target)
            .await
            .map_err(|e| {
                let err = InstallError::RemovalFailed {
                    path: request.target.display().to_string(),
                    message: e.to_string(),
                };
                self.emit(AppEvent::Uninstall(UninstallEvent::Failed {
                    recipe: request.recipe.clone(),
                    error: err.to_string(),
                }));
                err
            })?;

        self.emit(AppEvent::Uninstall(UninstallEvent::Completed {
            recipe: request.recipe.clone(),
            target: request.target.clone(),
            removed: true,
        }));

        Ok(UninstallOutcome {
            target: request.target.clone(),
            removed: true,
        })
    }
}

impl<O: PrivilegedOps> EventEmitter for Installer<O> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}
