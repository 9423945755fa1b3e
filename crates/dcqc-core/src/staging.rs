//! Staging of remote files to local storage.
//!
//! Remote URLs are fetched through a scheme-keyed [`Fetcher`] registry. The
//! `mem` scheme is backed by an in-process store and is always available;
//! other schemes must be registered by the embedding application.

use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use uuid::Uuid;

/// Downloads the content behind a remote URL.
pub trait Fetcher: Send + Sync {
    /// Write the resource identified by `url` to `destination`.
    fn fetch(&self, url: &str, destination: &Path) -> CoreResult<()>;
}

type FetcherMap = HashMap<String, Arc<dyn Fetcher>>;

fn fetchers() -> &'static RwLock<FetcherMap> {
    static FETCHERS: OnceLock<RwLock<FetcherMap>> = OnceLock::new();
    FETCHERS.get_or_init(|| {
        let mut map: FetcherMap = HashMap::new();
        map.insert("mem".to_string(), Arc::new(MemoryFetcher));
        RwLock::new(map)
    })
}

/// Register a fetcher for a URL scheme. Schemes can only be registered once.
pub fn register_fetcher(scheme: &str, fetcher: Arc<dyn Fetcher>) -> CoreResult<()> {
    let key = scheme.to_lowercase();
    let mut map = fetchers().write().unwrap_or_else(PoisonError::into_inner);
    if map.contains_key(&key) {
        return Err(CoreError::DuplicateFetcher { scheme: key });
    }
    map.insert(key, fetcher);
    Ok(())
}

/// Fetch a remote URL into `destination` using the fetcher for its scheme.
pub fn fetch(url: &str, destination: &Path) -> CoreResult<()> {
    let (scheme, _) = crate::url::split_scheme(url);
    let scheme = scheme.unwrap_or_default().to_lowercase();
    let fetcher = {
        let map = fetchers().read().unwrap_or_else(PoisonError::into_inner);
        map.get(&scheme).cloned()
    };
    let fetcher = fetcher.ok_or_else(|| CoreError::UnsupportedScheme {
        scheme,
        url: url.to_string(),
    })?;
    log::debug!("Fetching {} to {}", url, destination.display());
    fetcher.fetch(url, destination)
}

/// In-process file store behind `mem://` URLs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// The process-wide store used by the `mem` fetcher.
    pub fn global() -> &'static MemoryStore {
        static STORE: OnceLock<MemoryStore> = OnceLock::new();
        STORE.get_or_init(MemoryStore::default)
    }

    /// Store content under a `mem://` URL or bare key.
    pub fn write(&self, url: &str, content: impl Into<Vec<u8>>) {
        let key = crate::url::split_scheme(url).1.to_string();
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.insert(key, content.into());
    }

    /// Read content stored under a `mem://` URL or bare key.
    pub fn read(&self, url: &str) -> Option<Vec<u8>> {
        let key = crate::url::split_scheme(url).1;
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.get(key).cloned()
    }
}

struct MemoryFetcher;

impl Fetcher for MemoryFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> CoreResult<()> {
        let content = MemoryStore::global()
            .read(url)
            .ok_or_else(|| CoreError::FetchFailed {
                url: url.to_string(),
                message: "resource not found in memory store".to_string(),
            })?;
        fs::write(destination, content).map_err(|e| CoreError::io_at(destination, e))
    }
}

fn default_root() -> &'static RwLock<Option<PathBuf>> {
    static ROOT: OnceLock<RwLock<Option<PathBuf>>> = OnceLock::new();
    ROOT.get_or_init(|| RwLock::new(None))
}

/// Set the directory under which remote files are staged by default.
pub fn set_default_staging_dir(dir: impl Into<PathBuf>) {
    let mut root = default_root().write().unwrap_or_else(PoisonError::into_inner);
    *root = Some(dir.into());
}

/// Create a fresh, uniquely named directory for a default staging operation.
pub(crate) fn new_staging_dir() -> CoreResult<PathBuf> {
    let base = default_root()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    let dir = base.join(format!("dcqc-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).map_err(|e| CoreError::io_at(&dir, e))?;
    Ok(dir)
}

/// Point `destination` at an existing local file.
///
/// Symlinks on Unix; copies elsewhere.
pub(crate) fn link_local(source: &Path, destination: &Path) -> CoreResult<()> {
    let source = fs::canonicalize(source).map_err(|e| CoreError::io_at(source, e))?;
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(&source, destination)
            .map_err(|e| CoreError::io_at(destination, e))
    }
    #[cfg(not(unix))]
    {
        fs::copy(&source, destination)
            .map(|_| ())
            .map_err(|e| CoreError::io_at(destination, e))
    }
}
