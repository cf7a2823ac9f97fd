//! Favorite municipalities
//!
//! Favorites are a list of record ids kept in the order they were added.
//! Filtering and sorting never look at them.

use std::path::{Path, PathBuf};

use crate::error::util::write_string;
use crate::error::{KommunError, Result};

/// Storage for the user's favorite municipality ids
pub trait FavoritesRepository {
    /// Whether `id` is a favorite
    fn get(&self, id: &str) -> bool;

    /// Add `id` if absent, remove it if present; returns whether it is now a favorite
    fn toggle(&mut self, id: &str) -> Result<bool>;

    /// All favorite ids, oldest first
    fn list(&self) -> Vec<String>;
}

fn toggle_in(ids: &mut Vec<String>, id: &str) -> bool {
    if let Some(pos) = ids.iter().position(|existing| existing == id) {
        ids.remove(pos);
        false
    } else {
        ids.push(id.to_string());
        true
    }
}

/// Favorites kept for the lifetime of the process
#[derive(Debug, Clone, Default)]
pub struct MemoryFavorites {
    ids: Vec<String>,
}

impl MemoryFavorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesRepository for MemoryFavorites {
    fn get(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    fn toggle(&mut self, id: &str) -> Result<bool> {
        Ok(toggle_in(&mut self.ids, id))
    }

    fn list(&self) -> Vec<String> {
        self.ids.clone()
    }
}

/// Favorites persisted as a JSON array of ids, rewritten on every toggle
#[derive(Debug, Clone)]
pub struct JsonFileFavorites {
    path: PathBuf,
    ids: Vec<String>,
}

impl JsonFileFavorites {
    /// Open the favorites file at `path`; a missing file is an empty list
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let ids = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|e| {
                KommunError::io_error_with_source("Failed to read favorites", e).with_path(&path)
            })?;
            if contents.trim().is_empty() {
                Vec::new()
            } else {
                let mut ids: Vec<String> = serde_json::from_str(&contents)?;
                let mut seen = rustc_hash::FxHashSet::default();
                ids.retain(|id| seen.insert(id.clone()));
                ids
            }
        } else {
            Vec::new()
        };

        log::debug!("Loaded {} favorites from {}", ids.len(), path.display());
        Ok(Self { path, ids })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let contents = serde_json::to_string_pretty(&self.ids)?;
        write_string(&self.path, &contents, "saving favorites")
    }
}

impl FavoritesRepository for JsonFileFavorites {
    fn get(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    fn toggle(&mut self, id: &str) -> Result<bool> {
        let added = toggle_in(&mut self.ids, id);
        if let Err(e) = self.save() {
            // undo so memory matches disk
            toggle_in(&mut self.ids, id);
            return Err(e);
        }
        Ok(added)
    }

    fn list(&self) -> Vec<String> {
        self.ids.clone()
    }
}
