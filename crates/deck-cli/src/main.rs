//! deck CLI - resolve and inspect course content
//!
//! Entry point for the `deck` command-line interface. Command
//! implementations live in [`commands`].

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod logging;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::initialize_logging(&cli)?;

    execute_command(&cli).await
}

async fn execute_command(cli: &Cli) -> Result<()> {
    let mut service = commands::build_service(cli)?;
    let format = cli.format;

    match &cli.command {
        Commands::Courses => commands::list_courses(&service, format),
        Commands::Show { course } => commands::show_course(&mut service, course, format).await,
        Commands::Topic { course, topic } => {
            commands::show_topic(&mut service, course, topic, format).await
        },
        Commands::Slide { path } => commands::show_slide(&service, path, format).await,
        Commands::Meta { course } => commands::show_meta(&mut service, course, format).await,
    }
}
