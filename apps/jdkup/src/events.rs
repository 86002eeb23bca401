//! Event handling and user feedback

use console::style;
use jdkup_events::{AppEvent, GeneralEvent, InstallEvent, PlatformEvent, UninstallEvent};

/// Renders progress events to stderr as they arrive
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
}

impl EventHandler {
    /// Create new event handler
    pub fn new(colors_enabled: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Install(event) => self.handle_install(event),
            AppEvent::Uninstall(event) => self.handle_uninstall(event),
            AppEvent::Platform(event) => self.handle_platform(event),
            AppEvent::General(event) => self.handle_general(event),
        }
    }

    fn handle_install(&self, event: InstallEvent) {
        match event {
            InstallEvent::Started {
                recipe, version, ..
            } => {
                self.show_status(&format!("Installing {recipe} {version}"));
            }
            InstallEvent::BundleResolved { bundle, .. } => {
                self.show_status(&format!("Found bundle {}", bundle.display()));
            }
            InstallEvent::RemovingPrevious { target, .. } => {
                self.show_status(&format!(
                    "Removing previous installation at {}",
                    target.display()
                ));
            }
            InstallEvent::Copying { target, .. } => {
                self.show_status(&format!("Copying bundle to {}", target.display()));
            }
            InstallEvent::Completed {
                recipe,
                version,
                target,
            } => {
                self.show_success(&format!(
                    "Installed {recipe} {version} at {}",
                    target.display()
                ));
            }
            InstallEvent::Failed { recipe, error } => {
                self.show_error(&format!("Install of {recipe} failed: {error}"));
            }
        }
    }

    fn handle_uninstall(&self, event: UninstallEvent) {
        match event {
            UninstallEvent::Started { recipe, target } => {
                self.show_status(&format!("Uninstalling {recipe} from {}", target.display()));
            }
            UninstallEvent::Completed {
                recipe, removed, ..
            } => {
                if removed {
                    self.show_success(&format!("Uninstalled {recipe}"));
                } else {
                    self.show_status(&format!("{recipe} was not installed; nothing to do"));
                }
            }
            UninstallEvent::Failed { recipe, error } => {
                self.show_error(&format!("Uninstall of {recipe} failed: {error}"));
            }
        }
    }

    fn handle_platform(&self, event: PlatformEvent) {
        if !self.debug_enabled {
            return;
        }
        match event {
            PlatformEvent::CommandStarted { program, args } => {
                self.show_status(&format!("> {program} {}", args.join(" ")));
            }
            PlatformEvent::CommandCompleted {
                program,
                exit_code,
                duration_ms,
            } => {
                self.show_status(&format!("< {program} exited {exit_code} ({duration_ms}ms)"));
            }
            PlatformEvent::CommandFailed {
                program,
                exit_code,
                stderr,
            } => {
                let code = exit_code.map_or_else(|| "?".to_string(), |c| c.to_string());
                self.show_error(&format!("{program} failed (exit {code}): {stderr}"));
            }
        }
    }

    fn handle_general(&self, event: GeneralEvent) {
        match event {
            GeneralEvent::Warning { message, context } => {
                let text = match context {
                    Some(context) => format!("{message} ({context})"),
                    None => message,
                };
                self.show_warning(&text);
            }
            GeneralEvent::Error { message, details } => {
                let text = match details {
                    Some(details) => format!("{message}: {details}"),
                    None => message,
                };
                self.show_error(&text);
            }
            GeneralEvent::DebugLog { message } => {
                if self.debug_enabled {
                    eprintln!("[debug] {message}");
                }
            }
            GeneralEvent::OperationStarted { operation } => self.show_status(&operation),
            GeneralEvent::OperationCompleted { operation, .. } => self.show_status(&operation),
            GeneralEvent::OperationFailed { operation, error } => {
                self.show_error(&format!("{operation}: {error}"));
            }
        }
    }

    fn show_status(&self, message: &str) {
        eprintln!("{message}");
    }

    fn show_success(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{}", style(message).green());
        } else {
            eprintln!("{message}");
        }
    }

    fn show_warning(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{}", style(message).yellow());
        } else {
            eprintln!("Warning: {message}");
        }
    }

    fn show_error(&self, message: &str) {
        if self.colors_enabled {
            eprintln!("{}", style(message).red());
        } else {
            eprintln!("Error: {message}");
        }
    }
}
