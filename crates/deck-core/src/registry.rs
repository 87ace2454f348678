//! Course registry and in-memory course cache.
//!
//! The registry maps a course id to a [`CourseSource`]. Lookups go through a
//! [`CourseCache`] first; on a miss the source is loaded once and the result
//! is shared as an `Arc<Course>` until the cache is cleared.
//!
//! Unknown ids and failed loads are expected outcomes for the UI (a bad URL,
//! missing content), so [`CourseRegistry::get_course_content`] reports them as
//! `None` after logging once. [`CourseRegistry::try_get_course`] keeps the
//! error for callers that want it.

use crate::{Course, CourseSource, Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

/// Shared map of course id to assembled course.
///
/// Cloning is cheap and clones share the same entries, so one cache can be
/// created at application start and handed to every component that needs it.
#[derive(Debug, Clone, Default)]
pub struct CourseCache {
    entries: Arc<RwLock<HashMap<String, Arc<Course>>>>,
}

impl CourseCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached course, if present.
    pub async fn get(&self, course_id: &str) -> Option<Arc<Course>> {
        self.entries.read().await.get(course_id).map(Arc::clone)
    }

    /// Insert `course` unless another task stored one first.
    ///
    /// Returns whichever course ends up cached.
    pub async fn insert(&self, course_id: &str, course: Arc<Course>) -> Arc<Course> {
        let mut entries = self.entries.write().await;
        // Double-check in case another task loaded it while we were waiting
        if let Some(existing) = entries.get(course_id) {
            debug!(course = course_id, "course cached by another task");
            return Arc::clone(existing);
        }
        entries.insert(course_id.to_string(), Arc::clone(&course));
        course
    }

    /// Evict one course, returning it if it was cached.
    pub async fn remove(&self, course_id: &str) -> Option<Arc<Course>> {
        self.entries.write().await.remove(course_id)
    }

    /// Whether `course_id` is cached.
    pub async fn contains(&self, course_id: &str) -> bool {
        self.entries.read().await.contains_key(course_id)
    }

    /// Evict every cached course.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of cached courses.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Course id to content source mapping, backed by a [`CourseCache`].
pub struct CourseRegistry {
    sources: HashMap<String, Arc<dyn CourseSource>>,
    cache: CourseCache,
}

impl CourseRegistry {
    /// Create an empty registry with its own cache.
    pub fn new() -> Self {
        Self::with_cache(CourseCache::new())
    }

    /// Create an empty registry that stores courses in `cache`.
    pub fn with_cache(cache: CourseCache) -> Self {
        Self {
            sources: HashMap::new(),
            cache,
        }
    }

    /// Register (or replace) the source for `course_id`.
    ///
    /// Replacing a source does not evict an already cached course.
    pub fn register(&mut self, course_id: impl Into<String>, source: Arc<dyn CourseSource>) {
        let course_id = course_id.into();
        if self.sources.insert(course_id.clone(), source).is_some() {
            debug!(course = %course_id, "replaced course source");
        }
    }

    /// Whether a source is registered for `course_id`.
    pub fn contains(&self, course_id: &str) -> bool {
        self.sources.contains_key(course_id)
    }

    /// Registered source for `course_id`.
    pub fn source(&self, course_id: &str) -> Option<&Arc<dyn CourseSource>> {
        self.sources.get(course_id)
    }

    /// Registered course ids in sorted order.
    pub fn course_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// The cache backing this registry.
    pub const fn cache(&self) -> &CourseCache {
        &self.cache
    }

    /// Resolve a course, loading and caching it on first use.
    ///
    /// Concurrent first lookups may each load the source; the first result
    /// stored is the one every caller receives.
    ///
    /// # Errors
    ///
    /// [`Error::CourseNotFound`] for an unregistered id, or whatever the
    /// source's `load` returned.
    #[tracing::instrument(skip(self))]
    pub async fn try_get_course(&self, course_id: &str) -> Result<Arc<Course>> {
        if let Some(course) = self.cache.get(course_id).await {
            debug!("course cache hit");
            return Ok(course);
        }

        let source = self
            .sources
            .get(course_id)
            .ok_or_else(|| Error::CourseNotFound(course_id.to_string()))?;

        debug!("course cache miss, loading");
        let course = Arc::new(source.load().await?);
        Ok(self.cache.insert(course_id, course).await)
    }

    /// Resolve a course for the UI: `None` when it is unknown or fails to load.
    pub async fn get_course_content(&self, course_id: &str) -> Option<Arc<Course>> {
        match self.try_get_course(course_id).await {
            Ok(course) => Some(course),
            Err(Error::CourseNotFound(_)) => {
                warn!(course = course_id, "no content registered for course");
                None
            },
            Err(e) => {
                error!(course = course_id, category = e.category(), "failed to load course: {e}");
                None
            },
        }
    }

    /// Warm the cache for `course_id`, discarding the result.
    pub async fn preload_course(&self, course_id: &str) {
        let _ = self.get_course_content(course_id).await;
    }

    /// Drop every cached course. Sources and metadata memos are kept.
    #[tracing::instrument(skip(self))]
    pub async fn clear_course_cache(&self) {
        self.cache.clear().await;
        debug!("course cache cleared");
    }
}

impl Default for CourseRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CourseRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CourseRegistry")
            .field("courses", &self.course_ids())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::source::DynamicCourse;
    use crate::test_support::{CountingSource, cs101_content};
    use crate::{SlideLoader, Topic};

    fn course(id: &str, topics: usize) -> Course {
        Course {
            id: id.to_string(),
            topics: (0..topics)
                .map(|i| Topic {
                    id: format!("t{i}"),
                    title: format!("Topic {i}"),
                    description: String::new(),
                    duration: String::new(),
                    slides: Vec::new(),
                    completed: false,
                })
                .collect(),
        }
    }

    fn registry_with(id: &str, source: Arc<CountingSource>) -> CourseRegistry {
        let mut registry = CourseRegistry::new();
        registry.register(id, source);
        registry
    }

    #[tokio::test]
    async fn test_repeat_lookups_hit_cache() {
        let source = Arc::new(CountingSource::new(course("cs101", 2)));
        let registry = registry_with("cs101", Arc::clone(&source));

        let first = registry.get_course_content("cs101").await.unwrap();
        let second = registry.get_course_content("cs101").await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(source.loads(), 1);
    }

    #[tokio::test]
    async fn test_unknown_course_is_none() {
        let registry = CourseRegistry::new();
        assert!(registry.get_course_content("nonexistent").await.is_none());
        assert!(matches!(
            registry.try_get_course("nonexistent").await,
            Err(Error::CourseNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_load_is_none_and_not_cached() {
        let source = Arc::new(CountingSource::failing());
        let registry = registry_with("broken", Arc::clone(&source));

        assert!(registry.get_course_content("broken").await.is_none());
        assert!(registry.get_course_content("broken").await.is_none());
        assert_eq!(source.loads(), 2);
        assert!(registry.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_forces_reload() {
        let source = Arc::new(CountingSource::new(course("cs101", 1)));
        let registry = registry_with("cs101", Arc::clone(&source));

        registry.preload_course("cs101").await;
        assert!(registry.cache().contains("cs101").await);

        registry.clear_course_cache().await;
        assert!(registry.cache().is_empty().await);

        registry.get_course_content("cs101").await.unwrap();
        assert_eq!(source.loads(), 2);
    }

    #[tokio::test]
    async fn test_shared_cache_between_registries() {
        let cache = CourseCache::new();
        let source = Arc::new(CountingSource::new(course("shared", 1)));

        let mut a = CourseRegistry::with_cache(cache.clone());
        a.register("shared", source.clone());
        let mut b = CourseRegistry::with_cache(cache.clone());
        b.register("shared", source.clone());

        let from_a = a.get_course_content("shared").await.unwrap();
        let from_b = b.get_course_content("shared").await.unwrap();
        assert!(Arc::ptr_eq(&from_a, &from_b));
        assert_eq!(source.loads(), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_insert_keeps_first_writer() {
        let cache = CourseCache::new();
        let first = cache.insert("x", Arc::new(course("x", 1))).await;
        let second = cache.insert("x", Arc::new(course("x", 2))).await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.topics.len(), 1);
        assert!(cache.remove("x").await.is_some());
        assert!(!cache.contains("x").await);
    }

    #[tokio::test]
    async fn test_concurrent_first_lookups_agree() {
        let source = Arc::new(CountingSource::new(course("race", 1)));
        let registry = Arc::new(registry_with("race", Arc::clone(&source)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move { registry.get_course_content("race").await })
            })
            .collect();

        let mut courses = Vec::new();
        for handle in handles {
            courses.push(handle.await.unwrap().unwrap());
        }
        assert!(courses.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
        assert!(source.loads() >= 1);
    }

    #[tokio::test]
    async fn test_cs101_scenario() {
        let fetcher = Arc::new(cs101_content());
        let mut registry = CourseRegistry::new();
        registry.register(
            "cs101",
            Arc::new(DynamicCourse::new(
                "cs101",
                SlideLoader::new(fetcher),
                "course.json",
                "slide-{n}.md",
            )),
        );

        let course = registry.get_course_content("cs101").await.unwrap();
        assert_eq!(course.topics.len(), 2);
        assert_eq!(course.topics[0].slides.len(), 3);

        let again = registry.get_course_content("cs101").await.unwrap();
        assert!(Arc::ptr_eq(&course, &again));
        assert_eq!(registry.course_ids(), vec!["cs101"]);
    }
}
