//! TOML recipe format for jdkup
//!
//! A recipe is declarative metadata interpreted by the package-manager
//! runtime: where to download an early-access bundle per architecture, its
//! digest, and where the lifecycle hook places it on the machine. Only the
//! `[install]` table is consumed by our own installer.

use jdkup_errors::RecipeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Host CPU architecture a recipe artifact is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Arch {
    #[serde(rename = "arm64")]
    Arm64,
    #[serde(rename = "x86_64")]
    X86_64,
}

impl Arch {
    /// Detect the architecture of the running host
    #[must_use]
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "aarch64" => Some(Self::Arm64),
            "x86_64" => Some(Self::X86_64),
            _ => None,
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arm64 => write!(f, "arm64"),
            Self::X86_64 => write!(f, "x86_64"),
        }
    }
}

/// One downloadable variant of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Archive download URL
    pub url: String,
    /// SHA-256 digest of the archive, verified by the external runtime
    pub sha256: String,
}

/// Installation behavior consumed by the lifecycle hook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallSpec {
    /// Fixed absolute path the bundle is installed to
    pub target: PathBuf,
    /// Name prefix identifying the bundle directory inside the staged root
    #[serde(default = "default_bundle_prefix")]
    pub bundle_prefix: String,
}

fn default_bundle_prefix() -> String {
    "jdk-".to_string()
}

/// Complete recipe structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique recipe token, e.g. `jdk26ea`
    pub token: String,

    /// Human-readable name
    pub name: String,

    /// Upstream version identifier, e.g. `26-ea+20`
    pub version: String,

    /// Short description
    pub description: String,

    /// Upstream homepage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// Installation behavior
    pub install: InstallSpec,

    /// Per-architecture download variants
    pub artifacts: BTreeMap<Arch, Artifact>,
}

impl Recipe {
    /// Parse a recipe from TOML content
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid recipe TOML.
    pub fn from_toml(content: &str, origin: &Path) -> Result<Self, RecipeError> {
        toml::from_str(content).map_err(|e| RecipeError::ParseError {
            path: origin.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Select the artifact for a host architecture
    ///
    /// Architecture selection happens upstream of the installer; this is
    /// recipe API for the runtime that fetches and stages archives.
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe ships no artifact for `arch`.
    pub fn artifact_for(&self, arch: Arch) -> Result<&Artifact, RecipeError> {
        self.artifacts
            .get(&arch)
            .ok_or_else(|| RecipeError::MissingArtifact {
                token: self.token.clone(),
                arch: arch.to_string(),
            })
    }

    /// Validate the recipe structure
    ///
    /// # Errors
    ///
    /// Returns an error naming the first structural violation found.
    pub fn validate(&self) -> Result<(), RecipeError> {
        if self.token.is_empty() {
            return self.invalid("token must not be empty");
        }
        if self.version.is_empty() {
            return self.invalid("version must not be empty");
        }
        if !self.install.target.is_absolute() {
            return self.invalid("install target must be an absolute path");
        }
        if self.install.bundle_prefix.is_empty() {
            return self.invalid("bundle prefix must not be empty");
        }
        if self.artifacts.is_empty() {
            return self.invalid("recipe must declare at least one artifact");
        }
        for (arch, artifact) in &self.artifacts {
            if !artifact.url.starts_with("https://") {
                return self.invalid(&format!("artifact url for {arch} must use https"));
            }
            if artifact.sha256.len() != 64
                || !artifact.sha256.bytes().all(|b| b.is_ascii_hexdigit())
            {
                return self.invalid(&format!(
                    "artifact sha256 for {arch} must be a 64-character hex digest"
                ));
            }
        }
        Ok(())
    }

    fn invalid(&self, message: &str) -> Result<(), RecipeError> {
        Err(RecipeError::Invalid {
            token: self.token.clone(),
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
token = "jdk26ea"
name = "JDK 26 EA"
version = "26-ea+20"
description = "Early-Access JDK 26"
homepage = "https://jdk.java.net/26/"

[install]
target = "/Library/Java/JavaVirtualMachines/jdk-26-ea.jdk"

[artifacts.arm64]
url = "https://download.java.net/java/early_access/jdk26/20/GPL/openjdk-26-ea+20_macos-aarch64_bin.tar.gz"
sha256 = "dc75cdb507e47a66b0edc73d1cfc4a1c011078d5d0785c7660320d2e9c3e04d4"
"#;

    #[test]
    fn parse_and_validate_minimal() {
        let recipe = Recipe::from_toml(MINIMAL, Path::new("jdk26ea.toml")).unwrap();
        recipe.validate().unwrap();
        assert_eq!(recipe.token, "jdk26ea");
        assert_eq!(recipe.install.bundle_prefix, "jdk-");
        assert_eq!(
            recipe.install.target,
            PathBuf::from("/Library/Java/JavaVirtualMachines/jdk-26-ea.jdk")
        );
    }

    #[test]
    fn artifact_selection() {
        let recipe = Recipe::from_toml(MINIMAL, Path::new("jdk26ea.toml")).unwrap();
        assert!(recipe.artifact_for(Arch::Arm64).is_ok());
        let err = recipe.artifact_for(Arch::X86_64).unwrap_err();
        assert!(matches!(err, RecipeError::MissingArtifact { .. }));
    }

    #[test]
    fn rejects_relative_target() {
        let content = MINIMAL.replace(
            "/Library/Java/JavaVirtualMachines/jdk-26-ea.jdk",
            "JavaVirtualMachines/jdk-26-ea.jdk",
        );
        let recipe = Recipe::from_toml(&content, Path::new("bad.toml")).unwrap();
        assert!(matches!(
            recipe.validate(),
            Err(RecipeError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_short_digest() {
        let content = MINIMAL.replace(
            "dc75cdb507e47a66b0edc73d1cfc4a1c011078d5d0785c7660320d2e9c3e04d4",
            "dc75cdb5",
        );
        let recipe = Recipe::from_toml(&content, Path::new("bad.toml")).unwrap();
        assert!(matches!(
            recipe.validate(),
            Err(RecipeError::Invalid { .. })
        ));
    }

    #[test]
    fn host_arch_maps_known_values() {
        // The mapping itself is what matters; the host running the tests
        // must be one of the two supported values or unknown.
        match std::env::consts::ARCH {
            "aarch64" => assert_eq!(Arch::host(), Some(Arch::Arm64)),
            "x86_64" => assert_eq!(Arch::host(), Some(Arch::X86_64)),
            _ => assert_eq!(Arch::host(), None),
        }
    }
}
