mod error;
mod result;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use std::path::PathBuf;
use std::time::Duration;

pub use crate::error::Error;
use crate::error::Result;
pub use crate::result::*;

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0/";

#[derive(Debug, Clone)]
pub struct HackerNewsClient {
    client: reqwest::Client,
    base_url: Url,
    /// Raw response bodies are dumped here when set.
    log_dir: Option<PathBuf>,
}

impl HackerNewsClient {
    /// Create a client for the API rooted at `base_url`, e.g. `https://hacker-news.firebaseio.com/v0/`.
    /// Every request is bounded by `timeout`. Responses are dumped to `$CLIENT_LOG_DIR` if it is set.
    pub fn new(base_url: &str, timeout: Duration) -> Result<HackerNewsClient> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder().timeout(timeout).build()?;
        let log_dir = std::env::var_os("CLIENT_LOG_DIR").map(PathBuf::from);
        Ok(HackerNewsClient {
            client,
            base_url,
            log_dir,
        })
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Ids of the current top stories, in ranking order.
    pub async fn top_stories(&self) -> Result<TopStoriesResult> {
        self.get("topstories.json", "topstories").await
    }

    pub async fn item(&self, id: u64) -> Result<ItemResult> {
        let item: Option<ItemResult> = self.get(&format!("item/{}.json", id), &format!("item_{}", id)).await?;
        item.ok_or(Error::MissingItem(id))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, name: &str) -> Result<T> {
        let url = self.base_url.join(path)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let content = response.text().await?;

        self.dump(name, &content).await;
        decode(&content)
    }

    /// Write a response body to `<log_dir>/hackernews_<name>_<time>.json`.
    /// Item dumps carry the item id in `name`, so concurrent item fetches never share a file.
    /// A failed dump is logged and otherwise ignored.
    async fn dump(&self, name: &str, content: &str) {
        let Some(dir) = &self.log_dir else {
            return;
        };
        let time = chrono::Local::now().format("%Y%m%d_%H%M%S_%3f");
        let filepath = dir.join(format!("hackernews_{}_{}.json", name, time));
        if let Err(e) = tokio::fs::write(&filepath, content).await {
            tracing::warn!("Cannot dump response to {}: {}", filepath.display(), e);
        }
    }
}

/// `Url::join` drops the last path segment unless the base ends with a slash.
fn parse_base_url(base_url: &str) -> Result<Url> {
    if base_url.ends_with('/') {
        Ok(Url::parse(base_url)?)
    } else {
        Ok(Url::parse(&format!("{}/", base_url))?)
    }
}

fn decode<T: DeserializeOwned>(content: &str) -> Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(content);
    let result = serde_path_to_error::deserialize(deserializer)?;
    Ok(result)
}
