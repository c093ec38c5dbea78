//! Cached title lists (popular, coming soon)
//!
//! A successful fetch replaces the stored list. A failed fetch falls back to
//! the last stored list when there is one, so a screen can still render
//! after the API key runs out. The refresh error travels with the fallback.

use crate::api::MovieApi;
use crate::error::{Error, Result};
use crate::store::{ListStore, COMING_SOON_TITLES_KEY, POPULAR_TITLES_KEY};

/// Where a refreshed list came from
#[derive(Debug)]
pub enum ListSource {
    Remote,
    /// Fetch failed with `cause`; served the last stored list
    Stored { cause: Error },
}

/// Result of a list refresh
#[derive(Debug)]
pub struct TitleList {
    pub ids: Vec<String>,
    pub source: ListSource,
}

impl TitleList {
    pub fn is_stored(&self) -> bool {
        matches!(self.source, ListSource::Stored { .. })
    }

    /// The error that forced a fallback to the stored list, if any
    pub fn refresh_error(&self) -> Option<&Error> {
        match &self.source {
            ListSource::Remote => None,
            ListSource::Stored { cause } => Some(cause),
        }
    }
}

/// Refresh the popular-title ids for `region`.
pub async fn refresh_popular(api: &MovieApi, store: &ListStore, region: &str) -> Result<TitleList> {
    let fetched = api.popular_titles(region).await;
    settle(store, POPULAR_TITLES_KEY, fetched)
}

/// Refresh the coming-soon title ids.
pub async fn refresh_coming_soon(api: &MovieApi, store: &ListStore) -> Result<TitleList> {
    let fetched = api.coming_soon().await;
    settle(store, COMING_SOON_TITLES_KEY, fetched)
}

fn settle(store: &ListStore, key: &str, fetched: Result<Vec<String>>) -> Result<TitleList> {
    match fetched {
        Ok(ids) => {
            match store.set_list(key, &ids) {
                Ok(()) => log::info!("Refreshed {:?}: {} titles", key, ids.len()),
                Err(e) => log::warn!("Failed to save {:?}: {}", key, e),
            }
            Ok(TitleList {
                ids,
                source: ListSource::Remote,
            })
        }
        Err(err) => fall_back(store, key, err),
    }
}

fn fall_back(store: &ListStore, key: &str, err: Error) -> Result<TitleList> {
    let stored = match store.get_list(key) {
        Ok(ids) => ids,
        Err(store_err) => {
            log::warn!("Could not read stored {:?}: {}", key, store_err);
            return Err(err);
        }
    };

    if stored.is_empty() {
        return Err(err);
    }

    log::warn!(
        "Refreshing {:?} failed ({}), serving {} stored titles",
        key,
        err,
        stored.len()
    );
    Ok(TitleList {
        ids: stored,
        source: ListSource::Stored { cause: err },
    })
}
