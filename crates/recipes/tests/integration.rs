//! Integration tests for recipe loading

use jdkup_recipes::{Arch, RecipeSet};
use std::path::{Path, PathBuf};

fn repo_recipes_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../recipes")
}

#[tokio::test]
async fn test_load_shipped_recipes() {
    let set = RecipeSet::load(&repo_recipes_dir()).await.unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.tokens(), vec!["jdk26ea", "jdk26valhalla"]);

    let jdk26 = set.get("jdk26ea").unwrap();
    assert_eq!(jdk26.version, "26-ea+20");
    assert_eq!(
        jdk26.install.target,
        PathBuf::from("/Library/Java/JavaVirtualMachines/jdk-26-ea.jdk")
    );
    assert_eq!(jdk26.install.bundle_prefix, "jdk-");
    assert!(jdk26.artifact_for(Arch::Arm64).is_ok());
    assert!(jdk26.artifact_for(Arch::X86_64).is_ok());
}

#[tokio::test]
async fn test_valhalla_shares_target() {
    let set = RecipeSet::load(&repo_recipes_dir()).await.unwrap();
    let ea = set.get("jdk26ea").unwrap();
    let valhalla = set.get("jdk26valhalla").unwrap();
    // Both early-access recipes replace the same installation.
    assert_eq!(ea.install.target, valhalla.install.target);
}

#[tokio::test]
async fn test_unknown_token() {
    let set = RecipeSet::load(&repo_recipes_dir()).await.unwrap();
    assert!(set.get("jdk99").is_err());
}

#[tokio::test]
async fn test_duplicate_token_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let recipe = tokio::fs::read_to_string(repo_recipes_dir().join("jdk26ea.toml"))
        .await
        .unwrap();
    tokio::fs::write(dir.path().join("a.toml"), &recipe)
        .await
        .unwrap();
    tokio::fs::write(dir.path().join("b.toml"), &recipe)
        .await
        .unwrap();

    let result = RecipeSet::load(dir.path()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_non_toml_files_ignored() {
    let dir = tempfile::tempdir().unwrap();
    tokio::fs::write(dir.path().join("README.md"), "not a recipe")
        .await
        .unwrap();

    let set = RecipeSet::load(dir.path()).await.unwrap();
    assert!(set.is_empty());
}
