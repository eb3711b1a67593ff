pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod source;
pub mod story;
#[cfg(test)]
mod test_util;
pub mod util;

pub use aggregate::ParallelAggregator;
pub use cache::CacheStore;
pub use config::Config;
pub use error::*;
pub use source::{StoryFetcher, TopIdSource};
pub use story::{Story, StoryList};

use hackernews_client::HackerNewsClient;

use std::sync::Arc;

/// Entry points of the app: fetch and cache the top stories, and look up a cached story.
pub struct HackerNews<S> {
    source: Arc<S>,
    aggregator: ParallelAggregator<S>,
    cache: CacheStore,
    items_limit: usize,
}

impl HackerNews<HackerNewsClient> {
    pub fn new(config: &Config) -> Result<Self> {
        let client = HackerNewsClient::new(&config.api_base_url, config.request_timeout())?;
        Ok(Self::with_source(client, config))
    }
}

impl<S> HackerNews<S>
where
    S: TopIdSource + StoryFetcher + 'static,
{
    pub fn with_source(source: S, config: &Config) -> Self {
        let source = Arc::new(source);
        Self {
            aggregator: ParallelAggregator::new(source.clone(), config.request_timeout()),
            source,
            cache: CacheStore::new(&config.cache_file_path),
            items_limit: config.items_limit,
        }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Fetch the top stories, up to the configured limit, and replace the cache with them.
    /// Stories that fail to load are kept as placeholders; only a failure to get the id list
    /// or to write the cache fails the whole operation.
    pub async fn fetch_top_stories_and_cache(&self) -> Result<StoryList> {
        // 1. Fetch ids, clamped to the limit
        let mut ids = self.source.fetch_top_ids().await?;
        if ids.len() < self.items_limit {
            tracing::debug!("Only {} top stories available, limit is {}", ids.len(), self.items_limit);
        }
        ids.truncate(self.items_limit);

        // 2. Fetch details
        tracing::info!("Fetching {} top stories", ids.len());
        let stories = self.aggregator.fetch_all(&ids).await;

        // 3. Persist
        self.cache.save(&stories).await?;
        Ok(stories)
    }

    /// Story at `index` of the last cached list. Never fetches.
    pub async fn get_cached_story_by_index(&self, index: i64) -> Result<Story> {
        self.cache.get_by_index(index).await
    }
}
