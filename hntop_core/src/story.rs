use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use hackernews_client::ItemResult;

pub const PLACEHOLDER_TITLE: &str = "ERROR";
pub const PLACEHOLDER_URL: &str = "no url";

/// One entry of the top stories list, as shown to the user and stored in the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    /// Position in the top stories list, starting at 0.
    pub index: usize,
    pub id: u64,
    pub title: String,
    /// Local time of submission, empty when the item carries no timestamp.
    pub date: String,
    /// Only set on placeholders, where it holds the failure reason.
    pub content: String,
    pub url: String,
}

/// A list of stories ordered by `index`. Cached and loaded as a whole.
pub type StoryList = Vec<Story>;

impl Story {
    /// Entry standing in for a story whose detail could not be fetched.
    pub fn placeholder(index: usize, id: u64, error: impl ToString) -> Story {
        Story {
            index,
            id,
            title: PLACEHOLDER_TITLE.to_string(),
            date: String::new(),
            content: error.to_string(),
            url: PLACEHOLDER_URL.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.title == PLACEHOLDER_TITLE && self.url == PLACEHOLDER_URL
    }
}

/// The index is not known to the fetcher, it is assigned by the aggregator.
impl From<ItemResult> for Story {
    fn from(item: ItemResult) -> Self {
        Story {
            index: 0,
            id: item.id,
            title: item.title,
            date: item.time.as_ref().map(format_date).unwrap_or_default(),
            content: String::new(),
            url: item.url,
        }
    }
}

pub fn format_date(time: &DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S %z").to_string()
}
