//! Application-level entry point.
//!
//! [`ContentService`] wires a fetcher, a [`SlideLoader`] and a
//! [`CourseRegistry`] together from a [`Config`], and exposes the operations
//! the UI layer calls.

use crate::config::{Config, CourseEntry, SourceKind};
use crate::prefetch;
use crate::source::{DynamicCourse, StaticCourse};
use crate::{
    ContentFetch, Course, CourseCache, CourseMeta, CourseRegistry, CourseSource, DirectoryListing,
    Error, FsFetcher, HttpFetcher, Result, Slide, SlideLoader, TopicMetaMap,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Course content resolution for one content origin.
#[derive(Debug)]
pub struct ContentService {
    loader: SlideLoader,
    registry: CourseRegistry,
    dynamic: HashMap<String, Arc<DynamicCourse>>,
    config: Config,
}

impl ContentService {
    /// Build a service from configuration with a fresh course cache.
    pub fn from_config(config: Config) -> Result<Self> {
        Self::with_cache(config, CourseCache::new())
    }

    /// Build a service that stores assembled courses in `cache`.
    pub fn with_cache(config: Config, cache: CourseCache) -> Result<Self> {
        config.validate()?;
        let loader = Self::build_loader(&config)?;
        let mut service = Self::with_loader(config, loader, cache);
        for entry in service.config.courses.clone() {
            service.register_entry(&entry)?;
        }
        Ok(service)
    }

    /// Build a service around an existing loader. No courses are registered.
    pub fn with_loader(config: Config, loader: SlideLoader, cache: CourseCache) -> Self {
        Self {
            loader,
            registry: CourseRegistry::with_cache(cache),
            dynamic: HashMap::new(),
            config,
        }
    }

    fn build_loader(config: &Config) -> Result<SlideLoader> {
        let content = &config.content;
        let loader = if content.is_remote() {
            let timeout = Duration::from_secs(content.request_timeout_secs);
            let fetcher: Arc<dyn ContentFetch> =
                Arc::new(HttpFetcher::with_timeout(content.origin.trim(), timeout)?);
            SlideLoader::new(fetcher)
        } else {
            let fs = Arc::new(FsFetcher::new(content.origin.trim()));
            let listing: Arc<dyn DirectoryListing> = fs.clone();
            SlideLoader::new(fs).with_listing(listing)
        };
        debug!(origin = %content.origin, remote = content.is_remote(), "content loader ready");

        Ok(loader
            .with_extension(&content.slide_extension)
            .with_concurrency(content.max_concurrent_fetches))
    }

    fn register_entry(&mut self, entry: &CourseEntry) -> Result<()> {
        match entry.source {
            SourceKind::Dynamic => {
                self.register_dynamic(&entry.id);
            },
            SourceKind::Static => {
                let file = entry.file.as_ref().ok_or_else(|| {
                    Error::Config(format!("static course '{}' needs a `file`", entry.id))
                })?;
                self.register(&entry.id, Arc::new(StaticCourse::from_path(file)?));
            },
        }
        Ok(())
    }

    /// Register a metadata-driven course served from the content origin.
    pub fn register_dynamic(&mut self, course_id: &str) -> Arc<DynamicCourse> {
        let source = Arc::new(DynamicCourse::new(
            course_id,
            self.loader.clone(),
            &self.config.content.metadata_file,
            self.config.content.slide_pattern.clone(),
        ));
        self.dynamic.insert(course_id.to_string(), Arc::clone(&source));
        self.registry.register(course_id, source.clone());
        info!(course = course_id, "registered dynamic course");
        source
    }

    /// Register any course source under `course_id`.
    pub fn register(&mut self, course_id: &str, source: Arc<dyn CourseSource>) {
        self.dynamic.remove(course_id);
        self.registry.register(course_id, source);
        info!(course = course_id, "registered course");
    }

    /// Configuration the service was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Shared slide loader.
    pub const fn loader(&self) -> &SlideLoader {
        &self.loader
    }

    /// Course registry and its cache.
    pub const fn registry(&self) -> &CourseRegistry {
        &self.registry
    }

    /// Registered course ids, sorted.
    pub fn course_ids(&self) -> Vec<String> {
        self.registry.course_ids()
    }

    /// See [`CourseRegistry::get_course_content`].
    pub async fn get_course_content(&self, course_id: &str) -> Option<Arc<Course>> {
        self.registry.get_course_content(course_id).await
    }

    /// See [`CourseRegistry::preload_course`].
    pub async fn preload_course(&self, course_id: &str) {
        self.registry.preload_course(course_id).await;
    }

    /// See [`CourseRegistry::clear_course_cache`].
    pub async fn clear_course_cache(&self) {
        self.registry.clear_course_cache().await;
    }

    /// Load one topic's slides as described by its course metadata.
    ///
    /// Empty when the course is not a registered dynamic course.
    pub async fn load_topic_slides_dynamic(&self, course_id: &str, topic_id: &str) -> Vec<Slide> {
        let Some(course) = self.dynamic.get(course_id) else {
            warn!(course = course_id, topic = topic_id, "no dynamic course registered");
            return Vec::new();
        };
        course.load_topic_slides(topic_id).await
    }

    /// Metadata of a dynamic course.
    pub async fn course_meta(&self, course_id: &str) -> Result<Arc<CourseMeta>> {
        let course = self
            .dynamic
            .get(course_id)
            .ok_or_else(|| Error::CourseNotFound(course_id.to_string()))?;
        course.meta().await
    }

    /// Fetch and parse a single slide by content-relative path.
    pub async fn load_slide(&self, path: &str) -> Result<Slide> {
        self.loader.load_slide(path).await
    }

    /// See [`prefetch::preload_next_topic`].
    pub fn preload_next_topic(
        &self,
        course: &Course,
        current_topic_id: &str,
        topic_meta_map: &TopicMetaMap,
    ) -> Option<JoinHandle<()>> {
        prefetch::preload_next_topic(&self.loader, course, current_topic_id, topic_meta_map)
    }
}
