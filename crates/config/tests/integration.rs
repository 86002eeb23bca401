//! Integration tests for config

use jdkup_config::*;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to ensure env var tests don't run concurrently
static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

#[tokio::test]
async fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"
[general]
color = "never"

[paths]
recipes_dir = "/usr/local/share/jdkup/recipes"

[platform]
elevation = "none"
        "#
    )
    .unwrap();

    let config = Config::load_from_file(temp_file.path()).await.unwrap();
    assert_eq!(config.general.color, ColorChoice::Never);
    assert_eq!(
        config.recipes_dir(),
        std::path::PathBuf::from("/usr/local/share/jdkup/recipes")
    );
    assert_eq!(config.platform.elevation, ElevationMode::None);
}

#[tokio::test]
async fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.general.color, ColorChoice::Auto);
    assert_eq!(config.platform.elevation, ElevationMode::Sudo);
    assert_eq!(
        config.recipes_dir(),
        std::path::PathBuf::from(fixed_paths::DEFAULT_RECIPES_DIR)
    );
}

#[test]
fn test_merge_env() {
    let _guard = ENV_TEST_MUTEX.lock().unwrap();

    std::env::set_var("JDKUP_COLOR", "always");
    std::env::set_var("JDKUP_ELEVATION", "none");

    let mut config = Config::default();
    config.merge_env().unwrap();
    assert_eq!(config.general.color, ColorChoice::Always);
    assert_eq!(config.platform.elevation, ElevationMode::None);

    std::env::remove_var("JDKUP_COLOR");
    std::env::remove_var("JDKUP_ELEVATION");
}

#[test]
fn test_merge_env_invalid_value() {
    let _guard = ENV_TEST_MUTEX.lock().unwrap();

    std::env::set_var("JDKUP_ELEVATION", "setuid");
    let mut config = Config::default();
    assert!(config.merge_env().is_err());
    std::env::remove_var("JDKUP_ELEVATION");
}
