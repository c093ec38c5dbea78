//! moviedex - movie and actor metadata client
//!
//! Wraps the RapidAPI IMDb service with typed requests and responses, keeps
//! a compressed on-disk copy of poster images, and persists favorite actors
//! and movies between runs.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod favorites;
pub mod image_cache;
pub mod models;
pub mod store;

// Re-export commonly used items
pub use api::{build_request, Endpoint, MovieApi};
pub use catalog::{refresh_coming_soon, refresh_popular, ListSource, TitleList};
pub use config::ApiConfig;
pub use error::{Error, ErrorKind, Result};
pub use favorites::{Category, FavoritesStore};
pub use image_cache::ImageCache;
pub use models::{ActorFilmography, ActorSummary, FilmographyEntry, Poster, TitleDetail, TitleSummary};
pub use store::ListStore;
