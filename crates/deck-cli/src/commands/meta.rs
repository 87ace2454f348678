use anyhow::{Context, Result};
use colored::Colorize;
use deck_core::{ContentService, CourseMeta, SlideStrategy};

use super::ensure_registered;
use crate::output::{OutputFormat, print_json};

/// Execute the meta command
pub async fn execute(
    service: &mut ContentService,
    course_id: &str,
    format: OutputFormat,
) -> Result<()> {
    ensure_registered(service, course_id);
    let meta = service
        .course_meta(course_id)
        .await
        .with_context(|| format!("No metadata for course '{course_id}'"))?;

    match format {
        OutputFormat::Json => print_json(&*meta)?,
        OutputFormat::Text => print_text(&meta, &service.config().content.slide_pattern),
    }
    Ok(())
}

fn print_text(meta: &CourseMeta, default_pattern: &str) {
    println!("{} {}", meta.title.bold(), format!("({})", meta.id).dimmed());
    for (label, value) in [
        ("description", &meta.description),
        ("difficulty", &meta.difficulty),
        ("duration", &meta.estimated_duration),
    ] {
        if !value.is_empty() {
            println!("{label}: {value}");
        }
    }

    println!();
    for topic in &meta.topics {
        let source = match topic.strategy {
            SlideStrategy::Pattern => {
                format!("{} x {}", topic.slide_count, topic.pattern_or(default_pattern))
            },
            SlideStrategy::Directory => "directory".to_string(),
        };
        println!("  {} {} {}", topic.id, topic.title, format!("[{source}]").dimmed());
    }
}
