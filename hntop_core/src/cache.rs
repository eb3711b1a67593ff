use tokio::fs;

use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::story::{Story, StoryList};

/// Snapshot of the last fetched story list, kept as a JSON file.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Replace the cached list with `stories`.
    /// The file is written next to the target first and then renamed over it,
    /// so readers see either the old or the new list.
    pub async fn save(&self, stories: &[Story]) -> Result<()> {
        let content = serde_json::to_vec(stories).map_err(Error::SerializeError)?;

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await.map_err(Error::cache_io(dir))?;
        }
        let temp_path = self.temp_path();
        fs::write(&temp_path, &content).await.map_err(Error::cache_io(&temp_path))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(Error::cache_io(&self.path))?;

        tracing::info!("Saved {} stories to cache {}", stories.len(), self.path.display());
        Ok(())
    }

    pub async fn load(&self) -> Result<StoryList> {
        let content = fs::read(&self.path).await.map_err(Error::cache_io(&self.path))?;
        let stories: StoryList = serde_json::from_slice(&content).map_err(Error::DeserializeError)?;
        tracing::debug!("Loaded {} stories from cache {}", stories.len(), self.path.display());
        Ok(stories)
    }

    /// Get the story at `index` of the cached list.
    pub async fn get_by_index(&self, index: i64) -> Result<Story> {
        let mut stories = self.load().await?;
        let len = stories.len();
        match usize::try_from(index) {
            Ok(i) if i < len => Ok(stories.swap_remove(i)),
            _ => Err(Error::IndexOutOfRange { index, len }),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn stories() -> StoryList {
        vec![
            Story {
                index: 0,
                id: 100,
                title: "A".to_string(),
                date: "2024-02-26 10:00:00 +0000".to_string(),
                content: String::new(),
                url: "u1".to_string(),
            },
            Story::placeholder(1, 200, "Network Error: connection reset"),
            Story {
                index: 2,
                id: 300,
                title: "C".to_string(),
                date: String::new(),
                content: String::new(),
                url: String::new(),
            },
        ]
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));

        cache.save(&stories()).await.unwrap();
        let loaded = cache.load().await.unwrap();

        assert_eq!(loaded, stories());
        assert!(!dir.path().join("cache.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_replaces_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));

        cache.save(&stories()).await.unwrap();
        cache.save(&stories()[..1]).await.unwrap();

        assert_eq!(cache.load().await.unwrap(), stories()[..1].to_vec());
    }

    #[tokio::test]
    async fn test_save_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("nested").join("cache.json"));

        cache.save(&stories()).await.unwrap();
        assert_eq!(cache.load().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_cache_file_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        CacheStore::new(&path).save(&stories()[..1]).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        let entry = value.as_array().unwrap()[0].as_object().unwrap();
        let mut keys = entry.keys().cloned().collect::<Vec<_>>();
        keys.sort();
        assert_eq!(keys, ["content", "date", "id", "index", "title", "url"]);
    }

    #[tokio::test]
    async fn test_get_by_index_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));
        cache.save(&stories()).await.unwrap();

        assert_eq!(cache.get_by_index(0).await.unwrap().id, 100);
        assert_eq!(cache.get_by_index(2).await.unwrap().id, 300);
        assert!(matches!(
            cache.get_by_index(-1).await,
            Err(Error::IndexOutOfRange { index: -1, len: 3 })
        ));
        assert!(matches!(
            cache.get_by_index(3).await,
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[tokio::test]
    async fn test_get_by_index_on_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("cache.json"));
        cache.save(&[]).await.unwrap();

        assert!(matches!(cache.get_by_index(0).await, Err(Error::IndexOutOfRange { .. })));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheStore::new(dir.path().join("missing.json"));

        assert!(matches!(cache.load().await, Err(Error::CacheIO { .. })));
        assert!(matches!(cache.get_by_index(0).await, Err(Error::CacheIO { .. })));
    }

    #[tokio::test]
    async fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache.json");
        std::fs::write(&path, b"{\"not\": \"a list\"}").unwrap();

        let cache = CacheStore::new(&path);
        assert!(matches!(cache.load().await, Err(Error::DeserializeError(_))));
    }
}
