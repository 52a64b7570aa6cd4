//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for generation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Formatted output with run statistics
    Full,
    /// Only the generated text
    Plain,
    /// JSON output
    Json,
}

/// CLI arguments for agent-saloon
#[derive(Parser, Debug)]
#[command(name = "agent-saloon")]
#[command(author, version, about = "Literary salon - LLM personas co-write a book by consensus")]
#[command(long_about = r#"
Agent Saloon runs a small salon of LLM personas that take turns on a shared
conversation until one of them declares consensus.

Each task is one collaboration:
  title     Agree on a book title for a topic
  toc       Agree on a table of contents for a title
  section   Write one chapter, section or subsection
  book      Title, outline and every section in one run

Configuration files are loaded from (in priority order):
1. SALOON_<SECTION>__<KEY> environment variables
2. --config <path>     Explicit config file
3. ./saloon.toml       Project-level config
4. ~/.config/agent-saloon/config.toml   Global config

Example:
  agent-saloon title "the history of lighthouses"
  agent-saloon toc "Keepers of the Light" "the history of lighthouses"
  agent-saloon book "the history of lighthouses" -o json > book.json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print one line per turn instead of progress bars
    #[arg(long, global = true)]
    pub plain_progress: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Write a JSONL transcript of every turn to this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub transcript_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Agree on a book title
    Title {
        /// What the book is about
        topic: String,
    },

    /// Agree on a table of contents
    Toc {
        /// Book title
        title: String,
        /// What the book is about
        topic: String,
    },

    /// Write a single part of the book
    Section {
        /// Book title
        #[arg(long)]
        book_title: String,
        /// Dot path of the part ("2", "2.1", "2.1.3")
        #[arg(long)]
        id: String,
        /// Title of the part
        #[arg(long)]
        title: String,
        /// Title of the enclosing chapter or section
        #[arg(long)]
        parent: Option<String>,
        /// Titles already written under the same parent (repeatable)
        #[arg(long = "previous", value_name = "TITLE")]
        previous: Vec<String>,
    },

    /// Title, outline and every section
    Book {
        /// What the book is about
        topic: String,
        /// Skip title generation and use this title
        #[arg(long)]
        title: Option<String>,
        /// Skip outline generation and read this JSON outline
        #[arg(long, value_name = "PATH")]
        outline: Option<PathBuf>,
        /// Only write these section ids (repeatable)
        #[arg(long = "section", value_name = "ID")]
        sections: Vec<String>,
    },

    /// Show configuration file locations and the resolved configuration
    ShowConfig,
}
