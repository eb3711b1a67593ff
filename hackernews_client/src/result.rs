use chrono::{serde::ts_seconds_option, DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The subset of an item that we care about. Other fields sent by the API are ignored.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ItemResult {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    /// Absent for Ask HN posts and some job postings.
    #[serde(default)]
    pub url: String,
    #[serde(default, with = "ts_seconds_option")]
    pub time: Option<DateTime<Utc>>,
}

pub type TopStoriesResult = Vec<u64>;
