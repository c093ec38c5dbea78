//! Response decoding
//!
//! Turns status codes and raw bodies into typed records. Failures are split
//! into the three kinds callers care about: the server refused
//! ([`Error::RateLimited`], [`Error::HttpStatus`]), or the body did not match
//! the expected schema ([`Error::Decoding`]). Transport failures never reach
//! this module.

use super::wire::{ActorFilms, SearchHit, TitleMetaData};
use crate::error::{Error, Result};
use crate::models::{
    ActorFilmography, ActorSummary, FilmographyEntry, Poster, Rating, TitleDetail, TitleSummary,
};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Position of the id in path-like identifiers such as `/title/tt0944947/`
pub const ID_SEGMENT: usize = 2;

/// Map a response status onto the error taxonomy.
pub fn check_status(status: StatusCode) -> Result<()> {
    if status == StatusCode::TOO_MANY_REQUESTS {
        log::warn!("API quota exhausted (HTTP 429)");
        return Err(Error::RateLimited);
    }
    if !status.is_success() {
        return Err(Error::HttpStatus(status));
    }
    Ok(())
}

/// Decode a JSON body into `T`, logging the schema mismatch on failure.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| {
        log::warn!(
            "Failed to decode {} response: {}",
            std::any::type_name::<T>(),
            e
        );
        Error::Decoding(e.to_string())
    })
}

#[derive(Deserialize)]
struct Envelope<T> {
    d: Vec<T>,
}

/// Decode a `{"d": [...]}` payload into its inner list.
pub fn unwrap_envelope<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let envelope: Envelope<T> = decode(bytes)?;
    Ok(envelope.d)
}

/// Take segment `index` of a `/`-delimited path.
///
/// `extract_id("/name/nm1234567/", 2)` is `nm1234567`. Missing or empty
/// segments are a decoding error.
pub fn extract_id(path: &str, index: usize) -> Result<String> {
    match path.split('/').nth(index) {
        Some(segment) if !segment.is_empty() => Ok(segment.to_string()),
        _ => Err(Error::Decoding(format!(
            "id path {:?} has no segment at index {}",
            path, index
        ))),
    }
}

/// Decode a JSON array of path-like ids into bare ids, preserving order.
pub fn decode_id_paths(bytes: &[u8]) -> Result<Vec<String>> {
    let paths: Vec<String> = decode(bytes)?;
    paths
        .iter()
        .map(|path| extract_id(path, ID_SEGMENT))
        .collect()
}

/// Auto-complete hits, in the order the API ranked them.
pub fn decode_search(bytes: &[u8]) -> Result<Vec<TitleSummary>> {
    let hits: Vec<SearchHit> = unwrap_envelope(bytes)?;
    Ok(hits
        .into_iter()
        .map(|hit| TitleSummary {
            id: hit.id,
            title: hit.label,
            title_type: hit.kind.unwrap_or_default(),
            year: hit.year,
            poster: hit.image.map(|image| Poster {
                url: image.image_url,
                width: image.width,
                height: image.height,
            }),
        })
        .collect())
}

/// Batch meta-data keyed by title id.
///
/// Records come back in the order of `ids`; ids the API did not return are
/// skipped.
pub fn decode_meta_data(bytes: &[u8], ids: &[String]) -> Result<Vec<TitleDetail>> {
    let mut by_id: HashMap<String, TitleMetaData> = decode(bytes)?;
    if by_id.len() < ids.len() {
        log::debug!(
            "Meta-data returned {} of {} requested titles",
            by_id.len(),
            ids.len()
        );
    }
    Ok(ids
        .iter()
        .filter_map(|id| by_id.remove(id).map(|meta| title_detail(id.clone(), meta)))
        .collect())
}

/// Overview body for a single title.
pub fn decode_overview(bytes: &[u8], title_id: &str) -> Result<TitleDetail> {
    let meta: TitleMetaData = decode(bytes)?;
    Ok(title_detail(title_id.to_string(), meta))
}

/// Actor header plus credits. A missing `base` yields the empty actor.
pub fn decode_filmography(bytes: &[u8]) -> Result<ActorFilmography> {
    let films: ActorFilms = decode(bytes)?;

    let actor = match films.base {
        Some(base) => ActorSummary {
            id: extract_id(&base.id, ID_SEGMENT)?,
            name: base.name,
            poster: base.image.map(Poster::from),
        },
        None => ActorSummary::default(),
    };

    let entries = films
        .filmography
        .into_iter()
        .map(|credit| FilmographyEntry {
            title_id: credit
                .id
                .and_then(|path| extract_id(&path, ID_SEGMENT).ok()),
            category: credit.category,
            title: credit.title,
            title_type: credit.title_type,
            characters: credit.characters.unwrap_or_default(),
            year: credit.year,
            status: credit.status,
            poster: credit.image.map(Poster::from),
        })
        .collect();

    Ok(ActorFilmography { actor, entries })
}

fn title_detail(id: String, meta: TitleMetaData) -> TitleDetail {
    TitleDetail {
        summary: TitleSummary {
            id,
            title: meta.title.title,
            title_type: meta.title.title_type,
            year: meta.title.year,
            poster: meta.title.image.map(Poster::from),
        },
        runtime_minutes: meta.title.running_time_in_minutes,
        rating: Rating {
            rating: meta.ratings.rating,
            rating_count: meta.ratings.rating_count,
        },
        release_date: meta.release_date.unwrap_or_default(),
        genres: meta.genres,
    }
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
