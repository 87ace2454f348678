//! Course sources: the things a registry entry knows how to load.
//!
//! - [`StaticCourse`] holds a fully assembled course in memory (built in code or
//!   read from a JSON file).
//! - [`DynamicCourse`] assembles a course from its metadata document and one
//!   markdown file per slide.

use crate::loader::{SlideLoader, topic_path};
use crate::meta::CourseMetaLoader;
use crate::{Course, CourseMeta, Error, Result, Slide, SlideStrategy, Topic, TopicMeta};
use async_trait::async_trait;
use futures::future::join_all;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Something that can produce a fully assembled [`Course`].
#[async_trait]
pub trait CourseSource: Send + Sync {
    /// Produce the assembled course.
    async fn load(&self) -> Result<Course>;
}

/// A course whose content is already in memory.
#[derive(Debug, Clone)]
pub struct StaticCourse {
    course: Course,
}

impl StaticCourse {
    /// Serve `course` as-is.
    pub const fn new(course: Course) -> Self {
        Self { course }
    }

    /// Read a course from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    /// Read a course from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read static course '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json(&json)
    }

    /// The wrapped course.
    pub const fn course(&self) -> &Course {
        &self.course
    }
}

#[async_trait]
impl CourseSource for StaticCourse {
    async fn load(&self) -> Result<Course> {
        Ok(self.course.clone())
    }
}

/// A course assembled from `<course_id>/course.json` plus per-slide markdown files.
#[derive(Debug)]
pub struct DynamicCourse {
    course_id: String,
    loader: SlideLoader,
    meta: CourseMetaLoader,
    default_pattern: String,
}

impl DynamicCourse {
    /// Create a dynamic course reading its metadata from
    /// `<course_id>/<metadata_file>`.
    pub fn new(
        course_id: impl Into<String>,
        loader: SlideLoader,
        metadata_file: &str,
        default_pattern: impl Into<String>,
    ) -> Self {
        let course_id = course_id.into();
        let meta_path = crate::loader::join_path(&course_id, metadata_file);
        let meta = CourseMetaLoader::new(Arc::clone(loader.fetcher()), meta_path);
        Self {
            course_id,
            loader,
            meta,
            default_pattern: default_pattern.into(),
        }
    }

    /// Course id this source assembles.
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Pattern used by topics without their own `slidePattern`.
    pub fn default_pattern(&self) -> &str {
        &self.default_pattern
    }

    /// The course metadata, fetched once and memoized.
    pub async fn meta(&self) -> Result<Arc<CourseMeta>> {
        self.meta.load().await
    }

    /// Load the slides of one topic as described by the course metadata.
    ///
    /// Returns an empty list if the metadata cannot be loaded or does not
    /// mention `topic_id`.
    pub async fn load_topic_slides(&self, topic_id: &str) -> Vec<Slide> {
        let meta = match self.meta.load().await {
            Ok(meta) => meta,
            Err(e) => {
                error!(course = %self.course_id, topic = topic_id, "cannot load topic: {e}");
                return Vec::new();
            },
        };

        let Some(topic) = meta.topic(topic_id) else {
            warn!(course = %self.course_id, topic = topic_id, "topic not found in course metadata");
            return Vec::new();
        };

        self.slides_for(topic).await
    }

    async fn slides_for(&self, topic: &TopicMeta) -> Vec<Slide> {
        let path = topic_path(&self.course_id, &topic.id);
        match topic.strategy {
            SlideStrategy::Pattern => {
                self.loader
                    .load_topic_slides(
                        &path,
                        topic.pattern_or(&self.default_pattern),
                        topic.slide_count,
                    )
                    .await
            },
            SlideStrategy::Directory => self.loader.load_topic_slides_from_directory(&path).await,
        }
    }
}

#[async_trait]
impl CourseSource for DynamicCourse {
    async fn load(&self) -> Result<Course> {
        let meta = self.meta.load().await?;
        if meta.id != self.course_id {
            warn!(
                course = %self.course_id,
                metadata_id = %meta.id,
                "course metadata id differs from the registered course id"
            );
        }

        let slide_sets = join_all(meta.topics.iter().map(|topic| self.slides_for(topic))).await;
        let topics: Vec<Topic> = meta
            .topics
            .iter()
            .zip(slide_sets)
            .map(|(topic, slides)| Topic::from_meta(topic, slides))
            .collect();

        let course = Course {
            id: self.course_id.clone(),
            topics,
        };
        info!(
            course = %course.id,
            topics = course.topics.len(),
            slides = course.slide_count(),
            "course assembled"
        );
        Ok(course)
    }
}
