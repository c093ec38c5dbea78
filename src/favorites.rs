//! Favorite actors and movies
//!
//! One id set per category, stored as a list in the [`ListStore`].

use crate::error::Result;
use crate::store::ListStore;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Favorites category; the storage key is the category's `key()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Actors,
    Movies,
}

impl Category {
    pub fn key(self) -> &'static str {
        match self {
            Category::Actors => "favoriteActors",
            Category::Movies => "favoriteMovies",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Actors => write!(f, "actors"),
            Category::Movies => write!(f, "movies"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "actors" | "actor" => Ok(Category::Actors),
            "movies" | "movie" => Ok(Category::Movies),
            other => Err(format!("unknown favorites category: {}", other)),
        }
    }
}

/// Favorites sets on top of a borrowed list store
#[derive(Debug, Clone, Copy)]
pub struct FavoritesStore<'a> {
    store: &'a ListStore,
}

impl<'a> FavoritesStore<'a> {
    pub fn new(store: &'a ListStore) -> Self {
        Self { store }
    }

    /// Flip membership of `id` and return the new state.
    pub fn toggle(&self, id: &str, category: Category) -> Result<bool> {
        let now_favorite = self.store.update_list(category.key(), |ids| {
            if ids.iter().any(|existing| existing == id) {
                ids.retain(|existing| existing != id);
                false
            } else {
                ids.push(id.to_string());
                true
            }
        })?;

        log::info!(
            "{} {} favorite {}",
            if now_favorite { "Added" } else { "Removed" },
            category,
            id
        );
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, id: &str, category: Category) -> Result<bool> {
        Ok(self
            .store
            .get_list(category.key())?
            .iter()
            .any(|existing| existing == id))
    }

    pub fn list(&self, category: Category) -> Result<BTreeSet<String>> {
        Ok(self.store.get_list(category.key())?.into_iter().collect())
    }
}
