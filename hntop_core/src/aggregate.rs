use futures::future::join_all;
use tokio::task;

use std::sync::Arc;
use std::time::Duration;

use crate::source::StoryFetcher;
use crate::story::{Story, StoryList};
use crate::util;

/// Fetches the details of many stories at once.
/// Failures of single stories never fail the batch, they show up as placeholder entries.
pub struct ParallelAggregator<F: ?Sized> {
    fetcher: Arc<F>,
    timeout: Duration,
}

impl<F: StoryFetcher + ?Sized + 'static> ParallelAggregator<F> {
    pub fn new(fetcher: Arc<F>, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    /// Fetch every story in `ids` concurrently.
    /// The result has one entry per id, in the order of `ids`, with `index` set to the position.
    pub async fn fetch_all(&self, ids: &[u64]) -> StoryList {
        // 1. Spawn one task per id. `handles[i]` is the only writer of slot `i`.
        let handles = ids
            .iter()
            .map(|&id| {
                let fetcher = self.fetcher.clone();
                let duration = self.timeout;
                task::spawn(async move { util::timeout(duration, fetcher.fetch_story(id)).await })
            })
            .collect::<Vec<_>>();

        // 2. Wait for all of them. A panicked task still resolves its handle.
        let results = join_all(handles).await;

        // 3. Fill the slots in input order
        let mut stories = Vec::with_capacity(ids.len());
        for (index, (&id, result)) in ids.iter().zip(results).enumerate() {
            let story = match result {
                Ok(Ok(mut story)) => {
                    story.index = index;
                    story
                }
                Ok(Err(e)) => {
                    tracing::warn!("Failed to fetch story {} at {}: {}", id, index, e);
                    Story::placeholder(index, id, e)
                }
                Err(e) => {
                    tracing::error!("Fetch task for story {} at {} did not finish: {}", id, index, e);
                    Story::placeholder(index, id, e)
                }
            };
            stories.push(story);
        }

        let failures = stories.iter().filter(|story| story.is_placeholder()).count();
        if failures == 0 {
            tracing::info!("Fetched all {} stories", stories.len());
        } else {
            tracing::warn!(
                "Fetched {} stories, failed to fetch {} stories",
                stories.len() - failures,
                failures
            );
        }
        stories
    }
}
