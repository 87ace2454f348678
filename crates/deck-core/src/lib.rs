//! # deck-core
//!
//! Course content resolution and caching for the deck learning application.
//!
//! A course is an ordered list of topics, each an ordered list of slides. This
//! crate turns a course id into that tree: it fetches course metadata, loads
//! one markdown document per slide, and caches the assembled course so the UI
//! can navigate without refetching.
//!
//! ## Architecture
//!
//! - **Parsing**: YAML front-matter slide documents ([`parse_slide`])
//! - **Fetching**: HTTP, filesystem and in-memory content origins ([`fetcher`])
//! - **Loading**: single slides, numbered slide sets and directory discovery ([`SlideLoader`])
//! - **Metadata**: single-flight `course.json` memo ([`CourseMetaLoader`])
//! - **Registry**: course id to source mapping with a shared cache ([`CourseRegistry`])
//! - **Prefetch**: background warming of the next topic ([`preload_next_topic`])
//!
//! ## Quick Start
//!
//! ```rust
//! use deck_core::{CourseRegistry, DynamicCourse, MemoryFetcher, SlideLoader};
//! use std::sync::Arc;
//!
//! # tokio_test_block(async {
//! let content = MemoryFetcher::new()
//!     .with_file(
//!         "cs101/course.json",
//!         r#"{"id": "cs101", "title": "CS", "topics": [{"id": "intro", "title": "Intro", "slideCount": 1}]}"#,
//!     )
//!     .with_file("cs101/intro/slide-1.md", "---\nid: s1\ntitle: Welcome\n---\nHello!");
//!
//! let loader = SlideLoader::new(Arc::new(content));
//! let mut registry = CourseRegistry::new();
//! registry.register(
//!     "cs101",
//!     Arc::new(DynamicCourse::new("cs101", loader, "course.json", "slide-{n}.md")),
//! );
//!
//! let course = registry.get_course_content("cs101").await.expect("course");
//! assert_eq!(course.topics[0].slides[0].title, "Welcome");
//! assert!(registry.get_course_content("unknown").await.is_none());
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Runtime::new().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Slide-level failures are logged and skipped; course-level failures become
//! `None` at the registry. See [`error`] for the full taxonomy.

/// Configuration loading and validation
pub mod config;
/// Error types and result aliases
pub mod error;
/// Content origins: HTTP, filesystem and in-memory
pub mod fetcher;
/// Slide, slide-set and directory loaders
pub mod loader;
/// Course metadata memo
pub mod meta;
/// Slide front-matter parser
pub mod parser;
/// Next-topic prefetching
pub mod prefetch;
/// Course registry and cache
pub mod registry;
/// Application-level service composed from configuration
pub mod service;
/// Static and dynamic course sources
pub mod source;
/// Core data model
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, ContentConfig, CourseEntry, SourceKind};
pub use error::{Error, Result};
pub use fetcher::{ContentFetch, DirectoryListing, FsFetcher, HttpFetcher, MemoryFetcher};
pub use loader::SlideLoader;
pub use meta::CourseMetaLoader;
pub use parser::parse_slide;
pub use prefetch::preload_next_topic;
pub use registry::{CourseCache, CourseRegistry};
pub use service::ContentService;
pub use source::{CourseSource, DynamicCourse, StaticCourse};
pub use types::*;
