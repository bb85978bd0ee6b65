//! Client for the external audio metadata service.
//!
//! Creating an audio only requires a group and a song; release date, lyrics
//! text and link are looked up with
//! `GET {info_service_url}?group=<group>&song=<song>`, which answers with
//!
//! ```json
//! { "releaseDate": "23.09.2023", "text": "verse\n\nchorus", "link": "https://..." }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Date format used by the metadata service.
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Metadata for one audio, as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioInfo {
    /// Release date.
    pub release_date: NaiveDate,
    /// Full lyrics text, segments separated by blank lines.
    pub text: String,
    /// External link.
    pub link: String,
}

/// Errors raised while looking up audio metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The request could not be sent or the body could not be read.
    #[error("metadata request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with something other than 200.
    #[error("got non 200 status: {0}")]
    Status(StatusCode),

    /// The payload did not contain usable metadata.
    #[error("invalid metadata: {0}")]
    InvalidPayload(String),
}

/// Looks up metadata for a group and song.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Returns the metadata for `song` by `group`.
    async fn lookup(&self, group: &str, song: &str) -> Result<AudioInfo, MetadataError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AudioInfoPayload {
    #[serde(default)]
    release_date: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    link: String,
}

impl AudioInfoPayload {
    fn into_info(self) -> Result<AudioInfo, MetadataError> {
        let release_date = NaiveDate::parse_from_str(&self.release_date, RELEASE_DATE_FORMAT)
            .map_err(|_| {
                MetadataError::InvalidPayload(format!(
                    "releaseDate '{}' is not in DD.MM.YYYY format",
                    self.release_date
                ))
            })?;
        if self.text.is_empty() {
            return Err(MetadataError::InvalidPayload("text is empty".to_string()));
        }
        if self.link.is_empty() {
            return Err(MetadataError::InvalidPayload("link is empty".to_string()));
        }

        Ok(AudioInfo {
            release_date,
            text: self.text,
            link: self.link,
        })
    }
}

/// [`MetadataClient`] backed by an HTTP service.
#[derive(Debug, Clone)]
pub struct HttpMetadataClient {
    client: Client,
    base_url: String,
}

impl HttpMetadataClient {
    /// Creates a client for the lookup endpoint at `base_url`.
    ///
    /// `timeout` bounds each lookup; the create path applies its own overall
    /// budget on top.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, MetadataError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Returns the lookup endpoint.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl MetadataClient for HttpMetadataClient {
    async fn lookup(&self, group: &str, song: &str) -> Result<AudioInfo, MetadataError> {
        debug!(group = %group, song = %song, "Looking up audio metadata");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(MetadataError::Status(response.status()));
        }

        let payload: AudioInfoPayload = response.json().await?;
        payload.into_info()
    }
}
