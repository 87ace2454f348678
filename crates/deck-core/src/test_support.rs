//! Shared helpers for unit tests.

use crate::{ContentFetch, Course, CourseSource, Error, MemoryFetcher, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;

/// Wraps a fetcher, counting calls and optionally holding them until released.
pub struct CountingFetcher<F> {
    inner: F,
    calls: AtomicUsize,
    gate: Option<Arc<Semaphore>>,
}

impl<F: ContentFetch> CountingFetcher<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Every fetch waits for one permit from `gate` before completing.
    pub fn gated(inner: F, gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(inner)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<F: ContentFetch> ContentFetch for CountingFetcher<F> {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| Error::Io(std::io::Error::other(e)))?;
            permit.forget();
        }
        self.inner.fetch_text(path).await
    }
}

/// Course source that counts how often it is asked to load.
pub struct CountingSource {
    course: Option<Course>,
    loads: AtomicUsize,
}

impl CountingSource {
    pub fn new(course: Course) -> Self {
        Self {
            course: Some(course),
            loads: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            course: None,
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CourseSource for CountingSource {
    async fn load(&self) -> Result<Course> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.course.clone().ok_or_else(|| Error::MetadataLoad {
            path: "stub/course.json".to_string(),
            reason: "stub failure".to_string(),
        })
    }
}

pub fn slide_doc(id: &str, title: &str) -> String {
    format!("---\nid: {id}\ntitle: {title}\n---\nBody of {title}\n")
}

/// A two-topic course tree: `cs101/intro` (3 slides) and `cs101/loops` (3 slides).
pub fn cs101_content() -> MemoryFetcher {
    let meta = r#"{
        "id": "cs101",
        "title": "Intro to CS",
        "description": "Basics",
        "difficulty": "beginner",
        "estimatedDuration": "1h",
        "topics": [
            {"id": "intro", "title": "Intro", "duration": "10 min", "slideCount": 3},
            {"id": "loops", "title": "Loops", "duration": "20 min", "slideCount": 3}
        ]
    }"#;

    let mut fetcher = MemoryFetcher::new().with_file("cs101/course.json", meta);
    for topic in ["intro", "loops"] {
        for n in 1..=3 {
            fetcher.insert(
                &format!("cs101/{topic}/slide-{n}.md"),
                slide_doc(&format!("{topic}-{n}"), &format!("{topic} {n}")),
            );
        }
    }
    fetcher
}
