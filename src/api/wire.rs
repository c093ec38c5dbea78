//! Response payloads as the API sends them
//!
//! Converted into [`crate::models`] records by the decoder; nothing outside
//! `api` sees these shapes.

use crate::models::Poster;
use serde::Deserialize;

/// Image block shared by titles, actors and credits
#[derive(Debug, Deserialize)]
pub(crate) struct WireImage {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl From<WireImage> for Poster {
    fn from(image: WireImage) -> Self {
        Poster {
            url: image.url,
            width: image.width,
            height: image.height,
        }
    }
}

/// One hit inside the auto-complete `"d"` envelope
#[derive(Debug, Deserialize)]
pub(crate) struct SearchHit {
    pub id: String,
    /// Display label
    #[serde(rename = "l", default)]
    pub label: String,
    /// Kind (`feature`, `TV series`, ...); absent for people
    #[serde(rename = "q", default)]
    pub kind: Option<String>,
    #[serde(rename = "y", default)]
    pub year: Option<i32>,
    #[serde(rename = "i", default)]
    pub image: Option<SearchImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchImage {
    pub image_url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// `title` block of meta-data and overview responses
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TitleInfo {
    pub title: String,
    #[serde(default)]
    pub title_type: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub running_time_in_minutes: Option<u32>,
    #[serde(default)]
    pub image: Option<WireImage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TitleRatings {
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub rating_count: Option<u64>,
}

/// Per-title value of `get-meta-data` and body of `get-overview-details`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TitleMetaData {
    pub title: TitleInfo,
    #[serde(default)]
    pub ratings: TitleRatings,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActorFilms {
    #[serde(default)]
    pub base: Option<ActorBase>,
    #[serde(default)]
    pub filmography: Vec<FilmCredit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ActorBase {
    /// Path-like id, e.g. `/name/nm0001667/`
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<WireImage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FilmCredit {
    #[serde(default)]
    pub id: Option<String>,
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub title_type: String,
    #[serde(default)]
    pub characters: Option<Vec<String>>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub image: Option<WireImage>,
}
