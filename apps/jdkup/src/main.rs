//! jdkup - early-access JDK recipe installer
//!
//! This CLI exposes the two lifecycle entry points the package-manager
//! runtime invokes after it has downloaded, checksum-verified, and
//! extracted an archive into a staging directory: install and uninstall.

mod cli;
mod error;
mod events;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use jdkup_config::{fixed_paths, ColorChoice, Config, ElevationMode};
use jdkup_events::{EventReceiver, EventSender};
use jdkup_install::{InstallRequest, Installer, UninstallRequest};
use jdkup_platform::{Elevation, SystemOps};
use jdkup_recipes::RecipeSet;
use std::process;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    // Initialize tracing with JSON awareness
    init_tracing(json_mode, cli.global.debug);

    // Run the application and handle errors. A non-zero exit status is the
    // failure signal the external runtime acts on.
    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        if !json_mode {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Final result of one lifecycle invocation, for `--json` consumers
#[derive(Clone, Debug, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum OperationResult {
    Installed {
        recipe: String,
        version: String,
        bundle: std::path::PathBuf,
        target: std::path::PathBuf,
    },
    Uninstalled {
        recipe: String,
        target: std::path::PathBuf,
        removed: bool,
    },
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting jdkup v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration with proper precedence:
    // 1. Start with file config (or defaults)
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;

    // 2. Merge environment variables
    config.merge_env()?;

    // 3. Apply CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli.global);

    // Load the recipe collection
    let recipes = RecipeSet::load(&config.recipes_dir()).await?;

    // Create event channel and handler
    let (event_sender, event_receiver) = jdkup_events::channel();
    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };
    let mut event_handler = EventHandler::new(colors_enabled && !cli.global.json, cli.global.debug);

    // Execute command with event handling
    let result = execute_command_with_events(
        cli.command,
        &config,
        &recipes,
        event_sender,
        event_receiver,
        &mut event_handler,
    )
    .await?;

    if cli.global.json {
        let rendered = serde_json::to_string_pretty(&result)
            .map_err(|e| jdkup_errors::Error::internal(format!("result serialization: {e}")))?;
        println!("{rendered}");
    }

    info!("Command completed successfully");
    Ok(())
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    config: &Config,
    recipes: &RecipeSet,
    event_sender: EventSender,
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, config, recipes, event_sender));

    // Handle events concurrently with command execution
    loop {
        select! {
            // Command completed
            result = &mut command_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }

            // Event received
            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => { /* Channel closed: keep waiting for command to finish */ }
                }
            }
        }
    }
}

/// Execute the specified lifecycle operation
async fn execute_command(
    command: Commands,
    config: &Config,
    recipes: &RecipeSet,
    event_sender: EventSender,
) -> Result<OperationResult, CliError> {
    let elevation = match config.platform.elevation {
        ElevationMode::Sudo => Elevation::Sudo,
        ElevationMode::None => Elevation::None,
    };
    let ops = SystemOps::new(elevation).with_event_sender(event_sender.clone());
    let installer = Installer::new(ops).with_event_sender(event_sender);

    match command {
        Commands::Install {
            recipe,
            staged_root,
        } => {
            if !staged_root.is_absolute() {
                return Err(CliError::InvalidArguments(format!(
                    "--staged-root must be an absolute path, got {}",
                    staged_root.display()
                )));
            }

            let recipe = recipes.get(&recipe)?;
            let outcome = installer
                .install(&InstallRequest {
                    recipe: recipe.token.clone(),
                    version: recipe.version.clone(),
                    staged_root,
                    target: recipe.install.target.clone(),
                    bundle_prefix: recipe.install.bundle_prefix.clone(),
                })
                .await?;

            Ok(OperationResult::Installed {
                recipe: outcome.recipe,
                version: recipe.version.clone(),
                bundle: outcome.bundle,
                target: outcome.target,
            })
        }

        Commands::Uninstall { recipe } => {
            let recipe = recipes.get(&recipe)?;
            let outcome = installer
                .uninstall(&UninstallRequest {
                    recipe: recipe.token.clone(),
                    target: recipe.install.target.clone(),
                })
                .await?;

            Ok(OperationResult::Uninstalled {
                recipe: recipe.token.clone(),
                target: outcome.target,
                removed: outcome.removed,
            })
        }
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &cli::GlobalArgs) {
    if let Some(color) = &global.color {
        config.general.color = *color;
    }
    if let Some(dir) = &global.recipes_dir {
        config.paths.recipes_dir = Some(dir.clone());
    }
}

/// Initialize tracing/logging
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    // Check if debug logging is enabled
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    if json_mode {
        // JSON mode: suppress console output to avoid contaminating JSON
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else if debug_enabled {
        // Debug mode: structured JSON logs to file
        let log_dir = std::path::Path::new(fixed_paths::LOGS_DIR);
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "jdkup-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,jdkup=debug")),
                    )
                    .init();

                eprintln!("Debug logging enabled: {}", log_file.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to create log file: {e}");
                // Fallback to stderr
                tracing_subscriber::fmt()
                    .with_env_filter(
                        tracing_subscriber::EnvFilter::try_from_default_env()
                            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,jdkup=info")),
                    )
                    .init();
            }
        }
    } else {
        // Normal mode: minimal logging to stderr
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,jdkup=warn")),
            )
            .init();
    }
}
