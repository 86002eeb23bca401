use serde::{Deserialize, Serialize};

// Declare all domain modules
pub mod general;
pub mod install;
pub mod platform;
pub mod uninstall;

pub use general::GeneralEvent;
pub use install::InstallEvent;
pub use platform::PlatformEvent;
pub use uninstall::UninstallEvent;

/// Top-level application event, tagged by functional domain
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum AppEvent {
    General(GeneralEvent),
    Install(InstallEvent),
    Uninstall(UninstallEvent),
    Platform(PlatformEvent),
}
