use anyhow::{Context, Result};
use colored::Colorize;
use deck_core::{ContentService, Slide};

use crate::output::{OutputFormat, content_text, print_json};

/// Execute the slide command
pub async fn execute(service: &ContentService, path: &str, format: OutputFormat) -> Result<()> {
    let slide = service
        .load_slide(path)
        .await
        .with_context(|| format!("Failed to load slide '{path}'"))?;

    match format {
        OutputFormat::Json => print_json(&slide)?,
        OutputFormat::Text => print_text(&slide),
    }
    Ok(())
}

fn print_text(slide: &Slide) {
    println!("{} {}", slide.title.bold(), format!("({}, {})", slide.id, slide.kind).dimmed());
    if let Some(image) = &slide.image_ref {
        println!("image: {image}");
    }
    if let Some(video) = &slide.video_ref {
        println!("video: {video}");
    }
    let body = content_text(&slide.content);
    if !body.is_empty() {
        println!();
        println!("{body}");
    }
}
