//! Minimal client for the YouTube Data API v3.
//!
//! Only the three list endpoints needed to summarise a channel are covered,
//! and only their first page is ever read.

pub mod resources;

use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{Error, Result};
use resources::{Channel, ErrorEnvelope, PlaylistItem, Video};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Client {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let api_key = api_key.into();
        anyhow::ensure!(!api_key.trim().is_empty(), "YouTube API key was empty");

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Looks a channel up by its handle (given without the `@`).
    pub async fn channel_by_handle(&self, handle: &str) -> Result<Option<Channel>> {
        #[derive(Serialize)]
        struct Query<'a> {
            part: &'a str,
            #[serde(rename = "forHandle")]
            for_handle: String,
        }

        let query = Query {
            part: "snippet,statistics,contentDetails",
            for_handle: format!("@{handle}"),
        };

        let channels: Vec<Channel> = self.list("channels", query).await?;
        Ok(channels.into_iter().next())
    }

    pub async fn playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
    ) -> Result<Vec<PlaylistItem>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Query<'a> {
            part: &'a str,
            playlist_id: &'a str,
            max_results: u32,
        }

        self.list(
            "playlistItems",
            Query {
                part: "snippet",
                playlist_id,
                max_results,
            },
        )
        .await
    }

    pub async fn videos(&self, ids: &[String]) -> Result<Vec<Video>> {
        #[derive(Serialize)]
        struct Query<'a> {
            part: &'a str,
            id: String,
        }

        self.list(
            "videos",
            Query {
                part: "statistics",
                id: ids.join(","),
            },
        )
        .await
    }

    async fn list<T>(&self, endpoint: &'static str, query: impl Serialize) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        #[derive(Deserialize)]
        struct Resp<T> {
            #[serde(default = "Vec::new")]
            items: Vec<T>,
        }

        // reqwest puts the full url, api key included, into its errors
        let transport = |source: reqwest::Error| Error::Transport {
            endpoint,
            source: source.without_url(),
        };

        tracing::debug!(endpoint, "sending request");

        let response = self
            .client
            .get(format!("{}/{endpoint}", self.base_url))
            .query(&query)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });

            return Err(Error::Api {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        let resp: Resp<T> =
            serde_json::from_str(&body).map_err(|source| Error::Malformed { endpoint, source })?;

        tracing::debug!(endpoint, items = resp.items.len(), "received response");

        Ok(resp.items)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
