//! Output formats and shared rendering helpers.

use anyhow::Result;
use deck_core::{ContentField, Slide, SlideContent};
use serde::Serialize;
use std::fmt::Write as _;

/// Output format for command results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Flatten a slide body into plain text lines.
pub fn content_text(content: &SlideContent) -> String {
    match content {
        SlideContent::Text(text) => text.clone(),
        SlideContent::Markdown(body) => body.markdown.clone(),
        SlideContent::List(items) => bullet_list(items),
        SlideContent::Map(entries) => {
            let mut out = String::new();
            for (key, field) in entries {
                match field {
                    ContentField::Text(text) => {
                        let _ = writeln!(out, "{key}: {text}");
                    },
                    ContentField::List(items) => {
                        let _ = writeln!(out, "{key}:");
                        out.push_str(&bullet_list(items));
                        out.push('\n');
                    },
                }
            }
            out.trim_end().to_string()
        },
    }
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One-line summary used in slide listings.
pub fn slide_line(position: usize, slide: &Slide) -> String {
    format!("{position:>3}. [{}] {} ({})", slide.kind, slide.title, slide.id)
}
