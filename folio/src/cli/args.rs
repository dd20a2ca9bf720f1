// src/cli/args.rs
use crate::infrastructure::TableStyle;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional, defaults to the user config dir)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (fetch, show, or render)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export the Notion database to the JSON artifact
    Fetch {
        /// Artifact path (overrides config)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Table rendering (overrides config)
        #[arg(long, value_enum, value_name = "STYLE")]
        table_style: Option<TableStyle>,
    },

    /// Print the content lines of a single page
    Show {
        /// Notion page ID
        #[arg(value_name = "PAGE_ID")]
        page_id: String,

        /// Table rendering (overrides config)
        #[arg(long, value_enum, value_name = "STYLE")]
        table_style: Option<TableStyle>,
    },

    /// Render the artifact as a static HTML page
    Render {
        /// Artifact to read (overrides config)
        #[arg(short, long, value_name = "PATH")]
        input: Option<PathBuf>,

        /// HTML page to write (overrides config)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Open the page in the default browser afterwards
        #[arg(long)]
        open: bool,
    },
}
