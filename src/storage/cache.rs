//! Expiring key/value cache on the local filesystem.
//!
//! Every key maps to one JSON file holding the value and the time it was
//! stored. Expired or unreadable entries are removed when they are read;
//! nothing sweeps the directory in the background.
//!
//! ## Storage Layout
//!
//! ```text
//! {dir}/
//! ├── review_https___pitchfork_com_reviews_albums_kid_a_.json
//! └── latest_10.json
//! ```

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};
use crate::models::CacheConfig;

/// Filler used for every non-alphanumeric key character.
const FILLER: char = '_';

/// What is written to disk for each key.
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    stored_at: DateTime<Utc>,
    value: T,
}

/// Disk-backed cache with time-based expiry.
///
/// Failures never reach the caller: reads degrade to a miss and writes
/// report `false`.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
    enabled: bool,
    expiry: Duration,
}

impl DiskCache {
    /// Create a cache rooted at `dir`. The directory is created when enabled.
    pub fn new(dir: impl Into<PathBuf>, enabled: bool, expiry: Duration) -> Self {
        let cache = Self {
            dir: dir.into(),
            enabled,
            expiry,
        };

        if cache.enabled {
            match fs::create_dir_all(&cache.dir) {
                Ok(()) => log::info!("Cache initialized at {}", cache.dir.display()),
                Err(e) => log::warn!(
                    "Could not create cache directory {}: {}",
                    cache.dir.display(),
                    e
                ),
            }
        }
        cache
    }

    /// Create a cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(
            config.resolved_dir(),
            config.enabled,
            Duration::from_secs(config.expiry_secs),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Look up a live value.
    ///
    /// Returns `None` when disabled, missing, undecodable or expired. The
    /// last two cases delete the file.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }

        let path = self.path(key);
        let entry = match self.read_entry::<T>(&path) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                log::debug!("Cache miss for key: {key}");
                return None;
            }
            Err(e) => {
                log::warn!("Error reading cache for key {key}: {e}");
                self.remove_file(&path);
                return None;
            }
        };

        if self.is_expired(entry.stored_at) {
            log::debug!("Cache expired for key: {key}");
            self.remove_file(&path);
            return None;
        }

        log::debug!("Cache hit for key: {key}");
        Some(entry.value)
    }

    /// Store a value stamped with the current time.
    ///
    /// Returns `false` when disabled or when the write failed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> bool {
        if !self.enabled {
            return false;
        }

        let entry = CacheEntry {
            stored_at: Utc::now(),
            value,
        };
        match self.write_entry(key, &entry) {
            Ok(()) => {
                log::debug!("Cached value for key: {key}");
                true
            }
            Err(e) => {
                log::warn!("Error writing to cache for key {key}: {e}");
                false
            }
        }
    }

    /// Whether a file exists for the key.
    ///
    /// Expiry is not checked; an expired entry exists until `get` evicts it.
    pub fn exists(&self, key: &str) -> bool {
        self.enabled && self.path(key).is_file()
    }

    /// Remove every file in the cache directory.
    pub fn clear(&self) -> bool {
        if !self.enabled {
            return false;
        }

        match self.remove_all() {
            Ok(removed) => {
                log::info!("Cache cleared ({removed} entries)");
                true
            }
            Err(e) => {
                log::error!("Error clearing cache: {e}");
                false
            }
        }
    }

    /// File path for a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }

    fn is_expired(&self, stored_at: DateTime<Utc>) -> bool {
        // A timestamp in the future (clock skew) counts as fresh.
        (Utc::now() - stored_at)
            .to_std()
            .is_ok_and(|age| age > self.expiry)
    }

    /// Write an entry atomically (write to temp, then rename).
    fn write_entry<T: Serialize>(&self, key: &str, entry: &CacheEntry<T>) -> Result<()> {
        let path = self.path(key);
        fs::create_dir_all(&self.dir)?;

        let bytes = serde_json::to_vec(entry)?;
        let tmp = path.with_extension("tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(&bytes)?;
        file.flush()?;
        drop(file);

        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Read an entry, returning None if the file doesn't exist.
    fn read_entry<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<CacheEntry<T>>> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn remove_all(&self) -> Result<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() {
                fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn remove_file(&self, path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != ErrorKind::NotFound {
                log::warn!("Error removing file {}: {}", path.display(), e);
            }
        }
    }
}

/// Map a key to a filename stem.
///
/// Keys that differ only in punctuation share a stem.
fn file_stem(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_alphanumeric() { c } else { FILLER })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use tempfile::TempDir;

    const HOUR: Duration = Duration::from_secs(3600);

    fn cache_in(tmp: &TempDir) -> DiskCache {
        DiskCache::new(tmp.path().join("cache"), true, HOUR)
    }

    #[test]
    fn test_set_then_get() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        let value = vec!["Kid A".to_string(), "Amnesiac".to_string()];
        assert!(cache.set("search:radiohead", &value));
        assert_eq!(cache.get::<Vec<String>>("search:radiohead"), Some(value));
        assert!(cache.exists("search:radiohead"));
    }

    #[test]
    fn test_floats_survive_bit_exact() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        // Parses one ULP off without exact float parsing.
        let value = 0.47960756426982587_f64;
        assert!(cache.set("k", &value));
        let stored = cache.get::<f64>("k").unwrap();
        assert_eq!(stored.to_bits(), value.to_bits());

        let polarities = vec![value, -0.1, 1.0 / 3.0, f64::MIN_POSITIVE];
        assert!(cache.set("polarities", &polarities));
        let stored = cache.get::<Vec<f64>>("polarities").unwrap();
        let bits: Vec<u64> = stored.iter().map(|v| v.to_bits()).collect();
        let expected: Vec<u64> = polarities.iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits, expected);
    }

    #[test]
    fn test_get_missing() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);
        assert_eq!(cache.get::<String>("nope"), None);
        assert!(!cache.exists("nope"));
    }

    #[test]
    fn test_set_overwrites() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);
        assert!(cache.set("k", &1u32));
        assert!(cache.set("k", &2u32));
        assert_eq!(cache.get::<u32>("k"), Some(2));
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        let entry = CacheEntry {
            stored_at: Utc::now() - TimeDelta::hours(2),
            value: "stale".to_string(),
        };
        cache.write_entry("latest:10", &entry).unwrap();
        assert!(cache.exists("latest:10"));

        assert_eq!(cache.get::<String>("latest:10"), None);
        assert!(!cache.exists("latest:10"));
    }

    #[test]
    fn test_entry_within_expiry_is_served() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        let entry = CacheEntry {
            stored_at: Utc::now() - TimeDelta::minutes(30),
            value: 42u32,
        };
        cache.write_entry("k", &entry).unwrap();
        assert_eq!(cache.get::<u32>("k"), Some(42));
        assert!(cache.exists("k"));
    }

    #[test]
    fn test_corrupt_entry_is_evicted() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        fs::write(cache.path("review:x"), b"{not json").unwrap();
        assert_eq!(cache.get::<String>("review:x"), None);
        assert!(!cache.exists("review:x"));
    }

    #[test]
    fn test_wrong_type_is_a_miss() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        assert!(cache.set("k", &"text"));
        assert_eq!(cache.get::<u32>("k"), None);
        assert!(!cache.exists("k"));
    }

    #[test]
    fn test_disabled_cache() {
        let tmp = TempDir::new().unwrap();
        let cache = DiskCache::new(tmp.path().join("off"), false, HOUR);

        assert!(!cache.set("k", &1u32));
        assert_eq!(cache.get::<u32>("k"), None);
        assert!(!cache.exists("k"));
        assert!(!cache.clear());
        assert!(!tmp.path().join("off").exists());
    }

    #[test]
    fn test_clear_removes_everything() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        assert!(cache.set("a", &1u32));
        assert!(cache.set("b", &2u32));
        assert!(cache.clear());
        assert!(!cache.exists("a"));
        assert!(!cache.exists("b"));
        assert_eq!(fs::read_dir(cache.dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let tmp = TempDir::new().unwrap();
        let cache = cache_in(&tmp);

        assert!(cache.set("review:a", &"body"));
        let names: Vec<_> = fs::read_dir(cache.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["review_a.json".to_string()]);
    }

    #[test]
    fn test_file_stem_replaces_punctuation() {
        assert_eq!(
            file_stem("review:https://pitchfork.com/x"),
            "review_https___pitchfork_com_x"
        );
        // Known collision: only punctuation differs.
        assert_eq!(file_stem("review:a/b"), file_stem("review:a_b"));
    }
}
