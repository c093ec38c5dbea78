//! Async client for the metadata API
//!
//! Each call builds its request, sends it once and decodes the body. There is
//! no retry: a failure is returned to the caller, who decides whether to ask
//! again.

use super::decode::{
    check_status, decode_filmography, decode_id_paths, decode_meta_data, decode_overview,
    decode_search,
};
use super::request::{build_request, Endpoint};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::models::{ActorFilmography, TitleDetail, TitleSummary};
use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use std::sync::Arc;

/// Metadata API client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct MovieApi {
    client: Client,
    config: Arc<ApiConfig>,
}

impl MovieApi {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Use a preconfigured `reqwest::Client` (timeouts, proxies).
    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        log::info!("Creating metadata API client for {}", config.host());
        Self {
            client,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Send the request for `endpoint` and return the body of a 2xx response.
    async fn send(&self, endpoint: &Endpoint) -> Result<Vec<u8>> {
        let request = build_request(&self.config, endpoint);
        log::debug!("GET {}", request.url);

        let response = request.into_builder(&self.client).send().await?;
        check_status(response.status())?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Search titles and people by free text.
    pub async fn search(&self, query: &str) -> Result<Vec<TitleSummary>> {
        let body = self
            .send(&Endpoint::AutoComplete {
                query: query.to_string(),
            })
            .await?;
        decode_search(&body)
    }

    /// Ids of the search hits, in ranked order.
    pub async fn search_title_ids(&self, query: &str) -> Result<Vec<String>> {
        Ok(self
            .search(query)
            .await?
            .into_iter()
            .map(|hit| hit.id)
            .collect())
    }

    /// Ids of the most popular movies in `region` (ISO country code).
    pub async fn popular_titles(&self, region: &str) -> Result<Vec<String>> {
        let body = self
            .send(&Endpoint::PopularTitles {
                region: region.to_string(),
            })
            .await?;
        decode_id_paths(&body)
    }

    /// Ids of upcoming releases.
    pub async fn coming_soon(&self) -> Result<Vec<String>> {
        let body = self.send(&Endpoint::ComingSoon).await?;
        decode_id_paths(&body)
    }

    /// Detail records for `ids`, in the same order; unknown ids are skipped.
    pub async fn title_meta_data(&self, ids: &[String]) -> Result<Vec<TitleDetail>> {
        let body = self
            .send(&Endpoint::MetaData { ids: ids.to_vec() })
            .await?;
        decode_meta_data(&body, ids)
    }

    pub async fn title_overview(&self, title_id: &str) -> Result<TitleDetail> {
        let body = self
            .send(&Endpoint::OverviewDetails {
                title_id: title_id.to_string(),
            })
            .await?;
        decode_overview(&body, title_id)
    }

    /// Actor ids of the top-billed cast.
    pub async fn top_cast(&self, title_id: &str) -> Result<Vec<String>> {
        let body = self
            .send(&Endpoint::TopCast {
                title_id: title_id.to_string(),
            })
            .await?;
        decode_id_paths(&body)
    }

    pub async fn actor_filmography(&self, actor_id: &str) -> Result<ActorFilmography> {
        let body = self
            .send(&Endpoint::ActorFilmography {
                actor_id: actor_id.to_string(),
            })
            .await?;
        decode_filmography(&body)
    }

    /// Download raw bytes from an arbitrary URL (poster CDN).
    ///
    /// Only the user agent is sent; API credentials stay with the API host.
    /// An unparsable URL came from a bad payload and is a decoding error.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let url = Url::parse(url)
            .map_err(|e| Error::Decoding(format!("invalid image URL {:?}: {}", url, e)))?;
        log::debug!("Fetching image from URL: {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.config.user_agent())
            .send()
            .await?;

        check_status(response.status())?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
