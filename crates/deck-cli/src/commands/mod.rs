//! Command implementations for the deck CLI

mod courses;
mod meta;
mod show;
mod slide;
mod topic;

pub use courses::execute as list_courses;
pub use meta::execute as show_meta;
pub use show::execute as show_course;
pub use slide::execute as show_slide;
pub use topic::execute as show_topic;

use anyhow::{Context, Result};
use deck_core::{Config, ContentService};
use tracing::debug;

use crate::cli::Cli;

/// Load configuration, apply `--origin`, and build the content service.
pub fn build_service(cli: &Cli) -> Result<ContentService> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    if let Some(origin) = &cli.origin {
        config.content.origin.clone_from(origin);
    }
    debug!(origin = %config.content.origin, courses = config.courses.len(), "configuration loaded");

    ContentService::from_config(config).context("Failed to set up content service")
}

/// Treat an unconfigured course id as a dynamic course under the origin.
fn ensure_registered(service: &mut ContentService, course_id: &str) {
    if !service.registry().contains(course_id) {
        service.register_dynamic(course_id);
    }
}
