use anyhow::Context;
use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::config::YoutubeConfig;

pub const YOUTUBE_ID_LEN: usize = 11;

/// Pull the 11-character video id out of a YouTube URL.
///
/// Understands short links (`youtu.be/<id>`), watch pages (`watch?v=<id>`),
/// embeds (`embed/<id>`), `v/<id>` and the legacy `/u/<n>/<id>` form. Anything
/// else, or an id of the wrong length, gives `None`.
pub fn parse_video_id(url: &str) -> Option<&str> {
    lazy_static! {
        static ref YOUTUBE_URL_RE: Regex = Regex::new(
            r"^.*((youtu.be/)|(v/)|(/u/\w/)|(embed/)|(watch\?))\??v?=?([^#&?]*).*"
        )
        .unwrap();
    }
    let id = YOUTUBE_URL_RE.captures(url)?.get(7)?.as_str();
    (id.chars().count() == YOUTUBE_ID_LEN).then_some(id)
}

/// Title and description of a video as reported by the metadata API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideoListResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    #[serde(default)]
    snippet: Option<VideoSnippet>,
}

impl VideoListResponse {
    fn into_snippet(self) -> Option<VideoSnippet> {
        self.items.into_iter().next().and_then(|item| item.snippet)
    }
}

#[async_trait]
pub trait VideoMetadataClient: Send + Sync {
    /// `Ok(None)` when the API knows no snippet for `youtube_id`; `Err` on
    /// transport failures and non-2xx answers.
    async fn fetch_snippet(&self, youtube_id: &str) -> anyhow::Result<Option<VideoSnippet>>;
}

/// YouTube Data API v3 client.
#[derive(Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(cfg: &YoutubeConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .context("build http client")?;
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }
}

#[async_trait]
impl VideoMetadataClient for YoutubeClient {
    async fn fetch_snippet(&self, youtube_id: &str) -> anyhow::Result<Option<VideoSnippet>> {
        let res = self
            .http
            .get(format!("{}/videos", self.base_url))
            .query(&[
                ("id", youtube_id),
                ("key", self.api_key.as_str()),
                ("part", "snippet"),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .context("youtube api request")?;

        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("youtube api responded with {status}");
        }

        let body: VideoListResponse = res.json().await.context("decode youtube api response")?;
        debug!(%youtube_id, items = body.items.len(), "youtube api responded");
        Ok(body.into_snippet())
    }
}
