//! Bundle discovery and validation inside a staged root
//!
//! A candidate bundle is a direct child of the staged root whose file name
//! starts with the recipe's bundle prefix. Discovery classifies the staged
//! root into exactly three cases so callers must handle all of them, and
//! resolution rejects any candidate whose real path escapes the staged
//! root - extracted archives can carry symlinks pointing anywhere.

use jdkup_errors::{Error, InstallError};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Result of enumerating candidate bundles under a staged root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleLookup {
    /// No child matched the bundle prefix
    Missing,
    /// Exactly one candidate
    One(PathBuf),
    /// More than one candidate; carries the count found
    Many(usize),
}

impl BundleLookup {
    /// Number of candidates this classification represents
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Missing => 0,
            Self::One(_) => 1,
            Self::Many(count) => *count,
        }
    }
}

/// Enumerate direct children of `staged_root` matching `prefix`
///
/// Matching is by file name only; whether the single match is actually a
/// usable directory is decided later by [`resolve_bundle`].
///
/// # Errors
///
/// Returns an error if the staged root cannot be read.
pub async fn find_bundle(staged_root: &Path, prefix: &str) -> Result<BundleLookup, Error> {
    let mut matches = Vec::new();

    let mut entries = fs::read_dir(staged_root)
        .await
        .map_err(|e| Error::io_with_path(&e, staged_root))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(&e, staged_root))?
    {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with(prefix) {
            matches.push(entry.path());
        }
    }

    match matches.len() {
        0 => Ok(BundleLookup::Missing),
        1 => Ok(BundleLookup::One(matches.remove(0))),
        count => Ok(BundleLookup::Many(count)),
    }
}

/// Resolve a candidate to its real path and validate it
///
/// The resolved path must be a directory and a strict descendant of the
/// resolved staged root. A candidate that fails to resolve, resolves to a
/// non-directory, or escapes the staging area via a symlink is treated as
/// a security violation.
///
/// # Errors
///
/// Returns `InstallError::InvalidBundle` for every rejected candidate.
pub async fn resolve_bundle(staged_root: &Path, candidate: &Path) -> Result<PathBuf, Error> {
    let invalid = |message: &str| -> Error {
        InstallError::InvalidBundle {
            path: candidate.display().to_string(),
            message: message.to_string(),
        }
        .into()
    };

    let root_real = fs::canonicalize(staged_root)
        .await
        .map_err(|_| invalid("staged root cannot be resolved"))?;

    let real = fs::canonicalize(candidate)
        .await
        .map_err(|_| invalid("candidate cannot be resolved"))?;

    let metadata = fs::metadata(&real)
        .await
        .map_err(|_| invalid("candidate cannot be inspected"))?;
    if !metadata.is_dir() {
        return Err(invalid("candidate is not a directory"));
    }

    if !real.starts_with(&root_real) || real == root_real {
        return Err(invalid("resolves outside the staged root"));
    }

    Ok(real)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn classifies_missing() {
        let stage = tempdir().unwrap();
        let lookup = find_bundle(stage.path(), "jdk-").await.unwrap();
        assert_eq!(lookup, BundleLookup::Missing);
    }

    #[tokio::test]
    async fn classifies_one() {
        let stage = tempdir().unwrap();
        std::fs::create_dir(stage.path().join("jdk-26-ea.jdk")).unwrap();
        std::fs::create_dir(stage.path().join("docs")).unwrap();

        let lookup = find_bundle(stage.path(), "jdk-").await.unwrap();
        assert_eq!(lookup, BundleLookup::One(stage.path().join("jdk-26-ea.jdk")));
    }

    #[tokio::test]
    async fn classifies_many_with_count() {
        let stage = tempdir().unwrap();
        std::fs::create_dir(stage.path().join("jdk-a.jdk")).unwrap();
        std::fs::create_dir(stage.path().join("jdk-b.jdk")).unwrap();

        let lookup = find_bundle(stage.path(), "jdk-").await.unwrap();
        assert_eq!(lookup, BundleLookup::Many(2));
        assert_eq!(lookup.count(), 2);
    }

    #[tokio::test]
    async fn resolve_accepts_plain_directory() {
        let stage = tempdir().unwrap();
        let bundle = stage.path().join("jdk-26-ea.jdk");
        std::fs::create_dir(&bundle).unwrap();

        let real = resolve_bundle(stage.path(), &bundle).await.unwrap();
        assert!(real.ends_with("jdk-26-ea.jdk"));
    }

    #[tokio::test]
    async fn resolve_rejects_file_candidate() {
        let stage = tempdir().unwrap();
        let bundle = stage.path().join("jdk-notes.txt");
        std::fs::write(&bundle, "not a bundle").unwrap();

        let err = resolve_bundle(stage.path(), &bundle).await.unwrap_err();
        assert!(matches!(
            err,
            jdkup_errors::Error::Install(InstallError::InvalidBundle { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn resolve_rejects_symlink_escape() {
        let outside = tempdir().unwrap();
        let stage = tempdir().unwrap();
        let link = stage.path().join("jdk-escape");
        std::os::unix::fs::symlink(outside.path(), &link).unwrap();

        let err = resolve_bundle(stage.path(), &link).await.unwrap_err();
        assert!(matches!(
            err,
            jdkup_errors::Error::Install(InstallError::InvalidBundle { .. })
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn resolve_rejects_symlink_to_staged_root() {
        let stage = tempdir().unwrap();
        let link = stage.path().join("jdk-self");
        std::os::unix::fs::symlink(stage.path(), &link).unwrap();

        let err = resolve_bundle(stage.path(), &link).await.unwrap_err();
        assert!(matches!(
            err,
            jdkup_errors::Error::Install(InstallError::InvalidBundle { .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn lookup_count_matches_prefixed_children(matching in 0usize..4, other in 0usize..4) {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let stage = tempdir().unwrap();
                for i in 0..matching {
                    std::fs::create_dir(stage.path().join(format!("jdk-{i}"))).unwrap();
                }
                for i in 0..other {
                    std::fs::create_dir(stage.path().join(format!("misc-{i}"))).unwrap();
                }

                let lookup = find_bundle(stage.path(), "jdk-").await.unwrap();
                prop_assert_eq!(lookup.count(), matching);
                match (matching, lookup) {
                    (0, BundleLookup::Missing) | (1, BundleLookup::One(_)) => {}
                    (n, BundleLookup::Many(count)) if n >= 2 => prop_assert_eq!(count, n),
                    (n, l) => prop_assert!(false, "count {} classified as {:?}", n, l),
                }
                Ok(())
            })?;
        }
    }
}
