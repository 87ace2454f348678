//! Content fetch collaborators.
//!
//! The loaders only see two small traits: [`ContentFetch`] to read one
//! content-relative path as text, and [`DirectoryListing`] to enumerate the
//! files of a topic directory. [`HttpFetcher`] serves a static-exported site,
//! [`FsFetcher`] serves a content tree on disk and [`MemoryFetcher`] serves
//! content compiled into the binary.

use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Resolves a content-relative path to raw text.
#[async_trait]
pub trait ContentFetch: Send + Sync {
    /// Fetch the resource at `path`.
    ///
    /// Implementations return [`Error::ResourceNotFound`] for a missing
    /// resource or non-OK status, and transport errors as-is.
    async fn fetch_text(&self, path: &str) -> Result<String>;
}

/// Lists the file names (not full paths) present under a content directory.
#[async_trait]
pub trait DirectoryListing: Send + Sync {
    /// File names directly under `path`, in no particular order.
    async fn list_directory(&self, path: &str) -> Result<Vec<String>>;
}

/// HTTP client for fetching content from a static-exported origin
pub struct HttpFetcher {
    client: Client,
    base: Url,
}

impl HttpFetcher {
    /// Creates a fetcher for `base_url` with the default 30 second timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Creates a fetcher with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("'{base_url}': {e}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("deck/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self { client, base })
    }

    /// Base URL that relative paths are joined to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::InvalidUrl(format!("'{path}': {e}")))
    }
}

#[async_trait]
impl ContentFetch for HttpFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.url_for(path)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            let reason = if status == StatusCode::NOT_FOUND {
                "HTTP 404 Not Found".to_string()
            } else {
                format!("HTTP {status}")
            };
            return Err(Error::ResourceNotFound {
                path: path.to_string(),
                reason,
            });
        }

        let content = response.text().await?;
        debug!("Fetched {} bytes from {}", content.len(), url);
        Ok(content)
    }
}

/// Reads content from a directory tree on the local filesystem
#[derive(Debug, Clone)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Serve content from files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Content root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Join a content-relative path onto the root, refusing to leave it.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(Error::ResourceNotFound {
                path: path.to_string(),
                reason: "path escapes the content root".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

fn not_found_or_io(path: &str, err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::ResourceNotFound {
            path: path.to_string(),
            reason: err.to_string(),
        }
    } else {
        Error::Io(err)
    }
}

#[async_trait]
impl ContentFetch for FsFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let full = self.resolve(path)?;
        let content = tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| not_found_or_io(path, e))?;
        debug!("Read {} bytes from {}", content.len(), full.display());
        Ok(content)
    }
}

#[async_trait]
impl DirectoryListing for FsFetcher {
    async fn list_directory(&self, path: &str) -> Result<Vec<String>> {
        let dir = self.resolve(path)?;
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| not_found_or_io(path, e))?;

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    names.push(name.to_string());
                }
            }
        }
        Ok(names)
    }
}

/// Serves content from an in-memory map of path to text.
#[derive(Debug, Clone, Default)]
pub struct MemoryFetcher {
    files: BTreeMap<String, String>,
}

impl MemoryFetcher {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MemoryFetcher::insert`].
    #[must_use]
    pub fn with_file(mut self, path: &str, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    /// Store `content` at `path`, replacing any previous entry.
    pub fn insert(&mut self, path: &str, content: impl Into<String>) {
        self.files
            .insert(path.trim_matches('/').to_string(), content.into());
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when no files are stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl ContentFetch for MemoryFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        self.files
            .get(path.trim_matches('/'))
            .cloned()
            .ok_or_else(|| Error::ResourceNotFound {
                path: path.to_string(),
                reason: "no such in-memory resource".to_string(),
            })
    }
}

#[async_trait]
impl DirectoryListing for MemoryFetcher {
    async fn list_directory(&self, path: &str) -> Result<Vec<String>> {
        let prefix = format!("{}/", path.trim_matches('/'));
        let names: Vec<String> = self
            .files
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|rest| !rest.contains('/'))
            .map(ToString::to_string)
            .collect();

        if names.is_empty() {
            return Err(Error::ResourceNotFound {
                path: path.to_string(),
                reason: "no such in-memory directory".to_string(),
            });
        }
        Ok(names)
    }
}
