// Upstream interfaces of the pipeline.
// The real implementation talks to the Hacker News API; tests plug in stubs.

use async_trait::async_trait;

use hackernews_client::HackerNewsClient;

use crate::error::Result;
use crate::story::Story;

/// Provides the ordered list of top story ids.
#[async_trait]
pub trait TopIdSource: Send + Sync {
    /// Fetch all top story ids. Limiting is left to the caller.
    async fn fetch_top_ids(&self) -> Result<Vec<u64>>;
}

/// Provides the detail of a single story.
#[async_trait]
pub trait StoryFetcher: Send + Sync {
    /// Fetch one story by id, in a single attempt.
    /// The returned story has `index` 0, the caller assigns the real position.
    async fn fetch_story(&self, id: u64) -> Result<Story>;
}

#[async_trait]
impl TopIdSource for HackerNewsClient {
    async fn fetch_top_ids(&self) -> Result<Vec<u64>> {
        let ids = self.top_stories().await?;
        tracing::debug!("Fetched {} top story ids", ids.len());
        Ok(ids)
    }
}

#[async_trait]
impl StoryFetcher for HackerNewsClient {
    async fn fetch_story(&self, id: u64) -> Result<Story> {
        let item = self.item(id).await?;
        Ok(Story::from(item))
    }
}
