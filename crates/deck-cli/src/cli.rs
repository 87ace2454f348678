//! # CLI Structure and Argument Parsing
//!
//! `deck` resolves course content the same way the learning app does and
//! prints it, which makes it handy for checking a content tree before
//! publishing it.
//!
//! ```bash
//! # Courses named in the config file
//! deck courses
//!
//! # Whole course, assembled and cached
//! deck show cs101 --origin ./content
//!
//! # One topic, straight from course.json
//! deck topic cs101 loops --format json
//!
//! # A single slide document
//! deck slide cs101/intro/slide-1.md
//! ```
//!
//! Courses that are not in the config file are treated as dynamic courses
//! under the content origin.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Command-line arguments for `deck`.
#[derive(Parser, Clone, Debug)]
#[command(name = "deck")]
#[command(version)]
#[command(about = "Resolve, inspect and warm course content", long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Show debug logs
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides autodiscovery). Also via `DECK_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "DECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Content origin: base URL or local directory. Also via `DECK_CONTENT_ORIGIN`.
    #[arg(long, global = true, value_name = "URL|DIR")]
    pub origin: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Available subcommands for the `deck` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// List configured courses
    Courses,

    /// Load a whole course and print its topics
    Show {
        /// Course id
        course: String,
    },

    /// Load one topic's slides from the course metadata
    Topic {
        /// Course id
        course: String,
        /// Topic id
        topic: String,
    },

    /// Load and parse a single slide document
    Slide {
        /// Path relative to the content origin
        path: String,
    },

    /// Print a course metadata document
    Meta {
        /// Course id
        course: String,
    },
}
