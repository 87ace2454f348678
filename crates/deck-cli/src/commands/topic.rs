use anyhow::Result;
use colored::Colorize;
use deck_core::ContentService;

use super::ensure_registered;
use crate::output::{OutputFormat, print_json, slide_line};

/// Execute the topic command
pub async fn execute(
    service: &mut ContentService,
    course_id: &str,
    topic_id: &str,
    format: OutputFormat,
) -> Result<()> {
    ensure_registered(service, course_id);
    let slides = service.load_topic_slides_dynamic(course_id, topic_id).await;

    match format {
        OutputFormat::Json => print_json(&slides)?,
        OutputFormat::Text if slides.is_empty() => {
            println!("No slides loaded for {course_id}/{topic_id}.");
        },
        OutputFormat::Text => {
            println!("{}", format!("{course_id}/{topic_id}").bold());
            for (idx, slide) in slides.iter().enumerate() {
                println!("{}", slide_line(idx + 1, slide));
            }
        },
    }
    Ok(())
}
