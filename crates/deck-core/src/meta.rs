//! Course metadata loading.
//!
//! Each course has one `course.json` document listing its topics. It is
//! fetched once per [`CourseMetaLoader`] and shared afterwards; concurrent
//! first callers wait on the same fetch. A failed fetch is not remembered.

use crate::{ContentFetch, CourseMeta, Error, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// Default metadata filename inside a course directory.
pub const DEFAULT_METADATA_FILE: &str = "course.json";

/// Single-flight, memoized loader for one course metadata document.
pub struct CourseMetaLoader {
    fetcher: Arc<dyn ContentFetch>,
    path: String,
    cell: OnceCell<Arc<CourseMeta>>,
}

impl CourseMetaLoader {
    /// Loader for the metadata document at `path`.
    pub fn new(fetcher: Arc<dyn ContentFetch>, path: impl Into<String>) -> Self {
        Self {
            fetcher,
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Content-relative path of the metadata document.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Return the metadata, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MetadataLoad`] if the document cannot be fetched or is
    /// not valid course metadata. The failure is not cached.
    pub async fn load(&self) -> Result<Arc<CourseMeta>> {
        self.cell
            .get_or_try_init(|| self.fetch())
            .await
            .map(Arc::clone)
    }

    /// The memoized metadata, if a load has already succeeded.
    pub fn cached(&self) -> Option<Arc<CourseMeta>> {
        self.cell.get().cloned()
    }

    async fn fetch(&self) -> Result<Arc<CourseMeta>> {
        debug!(path = %self.path, "fetching course metadata");
        let raw = self
            .fetcher
            .fetch_text(&self.path)
            .await
            .map_err(|e| self.failure(&e))?;

        let meta: CourseMeta = serde_json::from_str(&raw).map_err(|e| self.failure(&e))?;
        info!(
            path = %self.path,
            course = %meta.id,
            topics = meta.topics.len(),
            "course metadata loaded"
        );
        Ok(Arc::new(meta))
    }

    fn failure(&self, err: &dyn std::fmt::Display) -> Error {
        Error::MetadataLoad {
            path: self.path.clone(),
            reason: err.to_string(),
        }
    }
}

impl std::fmt::Debug for CourseMetaLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseMetaLoader")
            .field("path", &self.path)
            .field("loaded", &self.cell.initialized())
            .finish_non_exhaustive()
    }
}
