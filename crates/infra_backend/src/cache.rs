//! Local Quote Cache
//!
//! Best-effort offline snapshot of the working quote and the last fetched
//! quote list, stored as pretty-printed JSON files in a configurable
//! directory. Every cache failure is logged and swallowed: a cold cache
//! only costs a refetch, and a failed write must never interrupt editing.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use domain_quote::Quote;

const CURRENT_QUOTE_FILE: &str = "current_quote.json";
const ALL_QUOTES_FILE: &str = "all_quotes.json";

/// File-backed cache of quote snapshots
#[derive(Debug)]
pub struct LocalQuoteCache {
    dir: PathBuf,
}

impl LocalQuoteCache {
    /// Creates a cache rooted at `dir`; the directory is created lazily
    /// on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The last stored working quote, if a readable snapshot exists
    pub fn load_current(&self) -> Option<Quote> {
        self.load(CURRENT_QUOTE_FILE)
    }

    /// Stores the working quote, or clears the snapshot when `None`
    pub fn store_current(&self, quote: Option<&Quote>) {
        match quote {
            Some(quote) => self.store(CURRENT_QUOTE_FILE, quote),
            None => self.remove(CURRENT_QUOTE_FILE),
        }
    }

    /// The last stored quote list, if a readable snapshot exists
    pub fn load_all(&self) -> Option<Vec<Quote>> {
        self.load(ALL_QUOTES_FILE)
    }

    /// Stores the most recently fetched quote list
    pub fn store_all(&self, quotes: &[Quote]) {
        self.store(ALL_QUOTES_FILE, quotes);
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let path = self.dir.join(name);
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) => {
                warn!("Failed to read cache file {}: {}", path.display(), error);
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!("Cache file {} is not valid JSON: {}", path.display(), error);
                None
            }
        }
    }

    fn store<T: Serialize + ?Sized>(&self, name: &str, value: &T) {
        if let Err(error) = fs::create_dir_all(&self.dir) {
            warn!(
                "Failed to create cache directory {}: {}",
                self.dir.display(),
                error
            );
            return;
        }

        let path = self.dir.join(name);
        let json = match serde_json::to_string_pretty(value) {
            Ok(json) => json,
            Err(error) => {
                warn!("Failed to serialize cache entry {name}: {error}");
                return;
            }
        };
        if let Err(error) = fs::write(&path, json) {
            warn!("Failed to write cache file {}: {}", path.display(), error);
        }
    }

    fn remove(&self, name: &str) {
        let path = self.dir.join(name);
        if path.exists() {
            if let Err(error) = fs::remove_file(&path) {
                warn!("Failed to remove cache file {}: {}", path.display(), error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_quote::QuoteStatus;

    fn cache_in_temp() -> (tempfile::TempDir, LocalQuoteCache) {
        let dir = tempfile::tempdir().unwrap();
        let cache = LocalQuoteCache::new(dir.path());
        (dir, cache)
    }

    #[test]
    fn test_current_quote_round_trip() {
        let (_dir, cache) = cache_in_temp();
        assert!(cache.load_current().is_none());

        let mut quote = Quote::draft();
        quote.business_information.name = "Cached Business".to_string();
        cache.store_current(Some(&quote));

        let loaded = cache.load_current().unwrap();
        assert_eq!(loaded.business_information.name, "Cached Business");
        assert_eq!(loaded.status, QuoteStatus::Draft);
        assert_eq!(loaded.coverage_options.len(), 3);
    }

    #[test]
    fn test_store_none_clears_snapshot() {
        let (_dir, cache) = cache_in_temp();
        cache.store_current(Some(&Quote::draft()));
        assert!(cache.load_current().is_some());

        cache.store_current(None);
        assert!(cache.load_current().is_none());

        // Clearing an already-clear cache is a no-op
        cache.store_current(None);
    }

    #[test]
    fn test_quote_list_round_trip() {
        let (_dir, cache) = cache_in_temp();
        assert!(cache.load_all().is_none());

        let mut first = Quote::draft();
        first.business_information.name = "First".to_string();
        let mut second = Quote::draft();
        second.business_information.name = "Second".to_string();
        cache.store_all(&[first, second]);

        let loaded = cache.load_all().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].business_information.name, "First");
        assert_eq!(loaded[1].business_information.name, "Second");
    }

    #[test]
    fn test_corrupt_snapshot_reads_as_empty() {
        let (dir, cache) = cache_in_temp();
        fs::write(dir.path().join(CURRENT_QUOTE_FILE), "not json").unwrap();
        assert!(cache.load_current().is_none());
    }

    #[test]
    fn test_unwritable_directory_is_tolerated() {
        // A cache whose directory path is an existing file can never
        // persist anything, but it must not panic either.
        let file = tempfile::NamedTempFile::new().unwrap();
        let cache = LocalQuoteCache::new(file.path());

        cache.store_current(Some(&Quote::draft()));
        assert!(cache.load_current().is_none());
        cache.store_all(&[Quote::draft()]);
        assert!(cache.load_all().is_none());
    }
}
