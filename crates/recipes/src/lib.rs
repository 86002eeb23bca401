#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Declarative package recipes for jdkup
//!
//! This crate handles the recipe collection: one TOML file per recipe,
//! loaded from a recipes directory, validated for structure, and looked
//! up by token. The recipes are inert metadata; the only parts our own
//! installer reads are the install target and the bundle name prefix.

mod model;

pub use model::{Arch, Artifact, InstallSpec, Recipe};

use jdkup_errors::{Error, RecipeError};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;

/// A loaded, validated collection of recipes keyed by token
#[derive(Debug, Clone, Default)]
pub struct RecipeSet {
    recipes: BTreeMap<String, Recipe>,
}

impl RecipeSet {
    /// Load a single recipe file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub async fn load_file(path: &Path) -> Result<Recipe, Error> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| RecipeError::ReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        let recipe = Recipe::from_toml(&content, path)?;
        recipe.validate()?;
        Ok(recipe)
    }

    /// Load every `*.toml` recipe in a directory
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read, any recipe fails
    /// to parse or validate, or two recipes share a token.
    pub async fn load(dir: &Path) -> Result<Self, Error> {
        let mut recipes = BTreeMap::new();

        let mut entries = fs::read_dir(dir)
            .await
            .map_err(|e| Error::io_with_path(&e, dir))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| Error::io_with_path(&e, dir))?
        {
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "toml") {
                continue;
            }

            let recipe = Self::load_file(&path).await?;
            if recipes.contains_key(&recipe.token) {
                return Err(RecipeError::DuplicateToken {
                    token: recipe.token,
                    path: path.display().to_string(),
                }
                .into());
            }
            recipes.insert(recipe.token.clone(), recipe);
        }

        Ok(Self { recipes })
    }

    /// Look up a recipe by token
    ///
    /// # Errors
    ///
    /// Returns an error if no recipe carries the token.
    pub fn get(&self, token: &str) -> Result<&Recipe, Error> {
        self.recipes.get(token).ok_or_else(|| {
            RecipeError::NotFound {
                token: token.to_string(),
            }
            .into()
        })
    }

    /// All known tokens, sorted
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        self.recipes.keys().map(String::as_str).collect()
    }

    /// Number of loaded recipes
    #[must_use]
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
