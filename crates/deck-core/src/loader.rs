//! Slide loading: single slides, numbered slide sets and directory discovery.
//!
//! A broken slide never fails its topic. The set loaders log one warning per
//! failed slide, drop it, and keep the surviving slides in order.

use crate::{ContentFetch, DirectoryListing, Error, Result, Slide, parse_slide};
use futures::stream::{self, StreamExt};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Placeholder replaced by the 1-based slide index in filename patterns.
pub const INDEX_PLACEHOLDER: &str = "{n}";

/// Default number of slide fetches in flight per topic.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Substitute `index` into a filename pattern such as `slide-{n}.md`.
pub fn slide_file_name(pattern: &str, index: usize) -> String {
    pattern.replace(INDEX_PLACEHOLDER, &index.to_string())
}

/// Join two content-relative path segments with exactly one `/`.
pub fn join_path(base: &str, name: &str) -> String {
    let base = base.trim_end_matches('/');
    let name = name.trim_start_matches('/');
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}

/// Content-relative directory of a topic: `<course_id>/<topic_id>`.
pub fn topic_path(course_id: &str, topic_id: &str) -> String {
    join_path(course_id, topic_id)
}

/// Loads slides through a [`ContentFetch`] collaborator.
#[derive(Clone)]
pub struct SlideLoader {
    fetcher: Arc<dyn ContentFetch>,
    listing: Option<Arc<dyn DirectoryListing>>,
    extension: String,
    concurrency: usize,
}

impl SlideLoader {
    /// Loader without directory discovery.
    pub fn new(fetcher: Arc<dyn ContentFetch>) -> Self {
        Self {
            fetcher,
            listing: None,
            extension: "md".to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Enable directory discovery through `listing`.
    #[must_use]
    pub fn with_listing(mut self, listing: Arc<dyn DirectoryListing>) -> Self {
        self.listing = Some(listing);
        self
    }

    /// Content file extension used by directory discovery (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Maximum slide fetches in flight for one topic. Zero is treated as one.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Whether a [`DirectoryListing`] is attached.
    pub fn supports_discovery(&self) -> bool {
        self.listing.is_some()
    }

    /// The underlying content fetcher.
    pub fn fetcher(&self) -> &Arc<dyn ContentFetch> {
        &self.fetcher
    }

    /// Fetch and parse one slide document.
    ///
    /// Any fetch failure becomes [`Error::ResourceNotFound`]; parse failures
    /// are tagged with `path`. No retries.
    pub async fn load_slide(&self, path: &str) -> Result<Slide> {
        let raw = self.fetcher.fetch_text(path).await.map_err(|e| match e {
            not_found @ Error::ResourceNotFound { .. } => not_found,
            other => Error::ResourceNotFound {
                path: path.to_string(),
                reason: other.to_string(),
            },
        })?;

        parse_slide(&raw).map_err(|e| e.at_path(path))
    }

    /// Load slides `1..=count` of a topic from numbered files.
    ///
    /// Fetches run concurrently but the result keeps ascending index order.
    /// Failed slides are logged and omitted. A pattern without `{n}` names a
    /// single file, which is loaded once.
    pub async fn load_topic_slides(
        &self,
        topic_path: &str,
        pattern: &str,
        count: usize,
    ) -> Vec<Slide> {
        let count = if count > 1 && !pattern.contains(INDEX_PLACEHOLDER) {
            warn!(
                topic_path,
                pattern,
                requested = count,
                "slide pattern has no {{n}} placeholder; loading the single file once"
            );
            1
        } else {
            count
        };

        let paths = (1..=count)
            .map(|index| join_path(topic_path, &slide_file_name(pattern, index)));
        let slides = self.load_in_order(paths).await;
        debug!(topic_path, loaded = slides.len(), expected = count, "topic slides loaded");
        slides
    }

    /// Load every content file found in a topic directory, in sorted filename order.
    ///
    /// Returns an empty list when discovery is unavailable or the directory
    /// cannot be listed.
    pub async fn load_topic_slides_from_directory(&self, topic_path: &str) -> Vec<Slide> {
        let Some(listing) = &self.listing else {
            warn!(topic_path, "directory discovery is not available for this content origin");
            return Vec::new();
        };

        let names = match listing.list_directory(topic_path).await {
            Ok(names) => names,
            Err(e) => {
                warn!(topic_path, error = %e, "failed to list topic directory");
                return Vec::new();
            },
        };

        let mut files: Vec<String> = names
            .into_iter()
            .filter(|name| self.has_content_extension(name))
            .collect();
        files.sort();

        let paths: Vec<String> = files.iter().map(|name| join_path(topic_path, name)).collect();
        let slides = self.load_in_order(paths).await;
        debug!(topic_path, loaded = slides.len(), "topic slides discovered");
        slides
    }

    fn has_content_extension(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    async fn load_in_order<I>(&self, paths: I) -> Vec<Slide>
    where
        I: IntoIterator<Item = String>,
    {
        let results: Vec<(String, Result<Slide>)> = stream::iter(paths)
            .map(|path| async move {
                let result = self.load_slide(&path).await;
                (path, result)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        results
            .into_iter()
            .filter_map(|(path, result)| match result {
                Ok(slide) => Some(slide),
                Err(e) => {
                    warn!(path = %path, category = e.category(), "skipping slide: {e}");
                    None
                },
            })
            .collect()
    }
}

impl std::fmt::Debug for SlideLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideLoader")
            .field("discovery", &self.listing.is_some())
            .field("extension", &self.extension)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}
