//! Typed records for titles and actors
//!
//! Every record has an empty `Default` that stands in for a missing upstream
//! response, and the display helpers below are total over that empty value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Layout of `TitleDetail::release_date` as parsed for display.
///
/// Day and month are in transposed positions; dates that only parse with the
/// usual `%Y-%m-%d` layout render as `N/A`.
pub const RELEASE_DATE_FORMAT: &str = "%Y-%d-%m";

/// Placeholder shown for values the API did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Remote poster image reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poster {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Title as it appears in lists and search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleSummary {
    pub id: String,
    pub title: String,
    /// `movie`, `tvSeries`, `feature`, ...
    pub title_type: String,
    pub year: Option<i32>,
    pub poster: Option<Poster>,
}

/// Aggregate rating for a title
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rating: Option<f64>,
    pub rating_count: Option<u64>,
}

/// Full title record used by detail screens
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TitleDetail {
    pub summary: TitleSummary,
    pub runtime_minutes: Option<u32>,
    pub rating: Rating,
    /// Raw release date string, kept exactly as received
    pub release_date: String,
    pub genres: Vec<String>,
}

impl TitleDetail {
    /// Substitute the empty record for a missing one.
    pub fn or_empty(source: Option<TitleDetail>) -> TitleDetail {
        source.unwrap_or_default()
    }

    pub fn id(&self) -> &str {
        &self.summary.id
    }

    pub fn title(&self) -> &str {
        &self.summary.title
    }

    /// First two genres joined with ", "
    pub fn genre_line(&self) -> String {
        self.genres
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn runtime_label(&self) -> String {
        format_runtime(self.runtime_minutes)
    }

    pub fn rating_label(&self) -> String {
        match self.rating.rating {
            Some(rating) => format!("{:.1}", rating),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    pub fn rating_count_label(&self) -> String {
        match self.rating.rating_count {
            Some(count) => count.to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// Release year, or `N/A` when the date does not parse.
    pub fn release_year(&self) -> String {
        NaiveDate::parse_from_str(&self.release_date, RELEASE_DATE_FORMAT)
            .map(|date| date.format("%Y").to_string())
            .unwrap_or_else(|_| NOT_AVAILABLE.to_string())
    }
}

/// `"2h 5m"` for two hours or more, `"45m"` below an hour
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(total) => {
            let hours = total / 60;
            let minutes = total % 60;
            if hours > 0 {
                format!("{}h {}m", hours, minutes)
            } else {
                format!("{}m", minutes)
            }
        }
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Actor header for filmography screens
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSummary {
    pub id: String,
    pub name: String,
    pub poster: Option<Poster>,
}

impl ActorSummary {
    pub fn or_empty(source: Option<ActorSummary>) -> ActorSummary {
        source.unwrap_or_default()
    }
}

/// One credit in an actor's filmography
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilmographyEntry {
    /// Title id, when the API provided a well-formed one
    pub title_id: Option<String>,
    /// `actor`, `actress`, `self`, ...
    pub category: String,
    pub title: String,
    pub title_type: String,
    pub characters: Vec<String>,
    pub year: Option<i32>,
    /// `released`, `pre production`, ...
    pub status: Option<String>,
    pub poster: Option<Poster>,
}

/// An actor together with their credits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorFilmography {
    pub actor: ActorSummary,
    pub entries: Vec<FilmographyEntry>,
}

impl ActorFilmography {
    pub fn or_empty(source: Option<ActorFilmography>) -> ActorFilmography {
        source.unwrap_or_default()
    }

    pub fn film_count_label(&self) -> String {
        format!("{} movies", self.entries.len())
    }
}
