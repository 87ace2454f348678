use anyhow::Result;
use deck_core::ContentService;

use crate::output::{OutputFormat, print_json};

/// Execute the courses command
pub fn execute(service: &ContentService, format: OutputFormat) -> Result<()> {
    let ids = service.course_ids();
    match format {
        OutputFormat::Json => print_json(&ids)?,
        OutputFormat::Text if ids.is_empty() => {
            println!("No courses configured. Add a [[courses]] entry to the config file.");
        },
        OutputFormat::Text => {
            for id in ids {
                println!("{id}");
            }
        },
    }
    Ok(())
}
