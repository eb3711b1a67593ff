use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hackernews_client::ItemResult;

use crate::error::{Error, Result};
use crate::source::{StoryFetcher, TopIdSource};
use crate::story::Story;

type DelayFn = Box<dyn Fn(u64) -> Duration + Send + Sync>;

/// In-memory stand-in for the Hacker News API.
#[derive(Default)]
pub(crate) struct StubSource {
    pub top_ids: Vec<u64>,
    pub stories: HashMap<u64, Story>,
    pub failing: HashSet<u64>,
    pub panicking: HashSet<u64>,
    pub top_ids_unavailable: bool,
    pub delay: Option<DelayFn>,
    /// Ids in the order their fetch finished.
    pub completed: Arc<Mutex<Vec<u64>>>,
}

impl StubSource {
    pub fn with_stories(ids: impl IntoIterator<Item = u64>) -> Self {
        let items = ids.into_iter().map(|id| ItemResult {
            id,
            title: format!("Story {}", id),
            url: format!("https://example.com/{}", id),
            time: None,
        });
        Self::with_items(items)
    }

    pub fn with_items(items: impl IntoIterator<Item = ItemResult>) -> Self {
        let mut source = StubSource::default();
        for item in items {
            source.top_ids.push(item.id);
            source.stories.insert(item.id, Story::from(item));
        }
        source
    }

    pub fn failing(mut self, id: u64) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn panicking(mut self, id: u64) -> Self {
        self.panicking.insert(id);
        self
    }

    pub fn with_delay(mut self, delay: impl Fn(u64) -> Duration + Send + Sync + 'static) -> Self {
        self.delay = Some(Box::new(delay));
        self
    }
}

#[async_trait]
impl TopIdSource for StubSource {
    async fn fetch_top_ids(&self) -> Result<Vec<u64>> {
        if self.top_ids_unavailable {
            return Err(anyhow::anyhow!("top stories are unavailable").into());
        }
        Ok(self.top_ids.clone())
    }
}

#[async_trait]
impl StoryFetcher for StubSource {
    async fn fetch_story(&self, id: u64) -> Result<Story> {
        if let Some(delay) = &self.delay {
            tokio::time::sleep(delay(id)).await;
        }
        if self.panicking.contains(&id) {
            panic!("fetcher crashed on story {}", id);
        }
        self.completed.lock().unwrap().push(id);

        if self.failing.contains(&id) {
            return Err(Error::Other(anyhow::anyhow!("story {} is unavailable", id)));
        }
        self.stories
            .get(&id)
            .cloned()
            .ok_or_else(|| hackernews_client::Error::MissingItem(id).into())
    }
}

/// Minimal HTTP server answering each path with a canned `(status, body)`; anything else is a 404.
/// Returns the API base URL, without a trailing slash.
pub(crate) async fn serve_api(routes: HashMap<&'static str, (u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while !buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut buf[read..]).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => read += n,
                    }
                }
                let request = String::from_utf8_lossy(&buf[..read]).to_string();
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes.get(path).copied().unwrap_or((404, "Not Found"));
                let response = format!(
                    "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
    format!("http://{}/v0", addr)
}
