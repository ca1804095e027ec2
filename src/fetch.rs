use crate::error::ExonMapError;
use log::{debug, info, warn};
use serde_json::Value;
use sha1::{Digest, Sha1};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CACHE_DIR: &str = ".exonmap_cache";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Retrieval of an already-JSON-decoded response body. The pipeline only ever
/// talks to this trait, so tests can swap in canned payloads.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Value, ExonMapError>;
}

/// Blocking HTTP fetcher. Non-success statuses become `Fetch` errors carrying
/// the status code.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Value, ExonMapError> {
        info!("Fetching {url}");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExonMapError::Fetch {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }
}

/// One JSON file per URL, keyed by the SHA-1 of the URL. Entries older than
/// the time-to-live count as misses; unreadable entries are refetched.
pub struct FileCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        let mut hasher = Sha1::new();
        hasher.update(url.as_bytes());
        let key: String = hasher
            .finalize()
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect();
        self.dir.join(format!("{key}.json"))
    }

    pub fn get(&self, url: &str) -> Option<Value> {
        let path = self.entry_path(url);
        if !Self::is_fresh(&path, self.ttl) {
            return None;
        }
        let text = fs::read_to_string(&path).ok()?;
        serde_json::from_str(&text).ok()
    }

    pub fn put(&self, url: &str, value: &Value) -> Result<(), ExonMapError> {
        fs::create_dir_all(&self.dir)?;
        let text = serde_json::to_string(value)?;
        fs::write(self.entry_path(url), text)?;
        Ok(())
    }

    fn is_fresh(path: &Path, ttl: Duration) -> bool {
        let Ok(metadata) = fs::metadata(path) else {
            return false;
        };
        let Ok(modified) = metadata.modified() else {
            return false;
        };
        match modified.elapsed() {
            Ok(age) => age <= ttl,
            // Clock skew put the mtime in the future; treat as fresh.
            Err(_) => true,
        }
    }
}

/// Cache-through wrapper around any fetcher.
pub struct CachedFetcher<F: Fetcher> {
    inner: F,
    cache: FileCache,
}

impl<F: Fetcher> CachedFetcher<F> {
    pub fn new(inner: F, cache: FileCache) -> Self {
        Self { inner, cache }
    }
}

impl<F: Fetcher> Fetcher for CachedFetcher<F> {
    fn fetch(&self, url: &str) -> Result<Value, ExonMapError> {
        if let Some(value) = self.cache.get(url) {
            debug!("Cache hit for {url}");
            return Ok(value);
        }
        let value = self.inner.fetch(url)?;
        if let Err(e) = self.cache.put(url, &value) {
            warn!("Could not cache response for {url}: {e}");
        }
        Ok(value)
    }
}
