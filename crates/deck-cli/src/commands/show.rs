use anyhow::{Result, bail};
use colored::Colorize;
use deck_core::{ContentService, Course};

use super::ensure_registered;
use crate::output::{OutputFormat, print_json};

/// Execute the show command
pub async fn execute(
    service: &mut ContentService,
    course_id: &str,
    format: OutputFormat,
) -> Result<()> {
    ensure_registered(service, course_id);
    let Some(course) = service.get_course_content(course_id).await else {
        bail!("Course '{course_id}' is unavailable");
    };

    match format {
        OutputFormat::Json => print_json(&*course)?,
        OutputFormat::Text => print_text(&course),
    }
    Ok(())
}

fn print_text(course: &Course) {
    println!(
        "{} ({} topics, {} slides)",
        course.id.bold(),
        course.topics.len(),
        course.slide_count()
    );
    for (idx, topic) in course.topics.iter().enumerate() {
        let duration = if topic.duration.is_empty() {
            String::new()
        } else {
            format!(" [{}]", topic.duration)
        };
        println!(
            "{:>3}. {} {}{}",
            idx + 1,
            topic.title,
            format!("({} slides)", topic.slides.len()).dimmed(),
            duration
        );
    }
}
