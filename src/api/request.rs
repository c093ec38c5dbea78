//! Request construction for the metadata API
//!
//! Pure: maps an [`Endpoint`] onto a GET request against the configured host.
//! Array parameters are sent as repeated keys (`ids=a&ids=b`), never with
//! bracket notation.

use crate::config::ApiConfig;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, Url};

/// Logical operations offered by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Title search (`q`)
    AutoComplete { query: String },
    /// Most popular movies for a region (`currentCountry`)
    PopularTitles { region: String },
    ComingSoon,
    /// Batch metadata lookup (`ids`, repeated)
    MetaData { ids: Vec<String> },
    /// Single title detail (`tconst`)
    OverviewDetails { title_id: String },
    /// Top-billed cast ids (`tconst`)
    TopCast { title_id: String },
    /// All credits for an actor (`nconst`)
    ActorFilmography { actor_id: String },
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::AutoComplete { .. } => "/title/auto-complete",
            Endpoint::PopularTitles { .. } => "/title/get-most-popular-movies",
            Endpoint::ComingSoon => "/title/get-coming-soon-movies",
            Endpoint::MetaData { .. } => "/title/get-meta-data",
            Endpoint::OverviewDetails { .. } => "/title/get-overview-details",
            Endpoint::TopCast { .. } => "/title/get-top-cast",
            Endpoint::ActorFilmography { .. } => "/actors/get-all-filmography",
        }
    }

    /// Query parameters in the order they are appended
    pub fn query(&self) -> Vec<(&'static str, &str)> {
        match self {
            Endpoint::AutoComplete { query } => vec![("q", query.as_str())],
            Endpoint::PopularTitles { region } => vec![("currentCountry", region.as_str())],
            Endpoint::ComingSoon => Vec::new(),
            Endpoint::MetaData { ids } => ids.iter().map(|id| ("ids", id.as_str())).collect(),
            Endpoint::OverviewDetails { title_id } | Endpoint::TopCast { title_id } => {
                vec![("tconst", title_id.as_str())]
            }
            Endpoint::ActorFilmography { actor_id } => vec![("nconst", actor_id.as_str())],
        }
    }
}

/// Fully formed HTTP request, ready to hand to a client
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl ApiRequest {
    pub fn into_builder(self, client: &Client) -> RequestBuilder {
        client.request(self.method, self.url).headers(self.headers)
    }
}

/// Build the request for `endpoint`.
///
/// Empty inputs (e.g. an empty id list) are passed through as-is.
pub fn build_request(config: &ApiConfig, endpoint: &Endpoint) -> ApiRequest {
    let mut url = config.base_url().clone();
    url.set_path(endpoint.path());

    let query = endpoint.query();
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    ApiRequest {
        method: Method::GET,
        url,
        headers: config.headers().clone(),
    }
}
