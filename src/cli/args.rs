// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the note store (overrides config)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub store_dir: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a note, as if typed into the form and clicked away
    Add {
        /// Note title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Note body
        #[arg(short = 'm', long, default_value = "")]
        content: String,
    },

    /// List notes, optionally filtered by a search string
    List {
        /// Case-insensitive substring matched against title and content
        #[arg(value_name = "SEARCH")]
        search: Option<String>,

        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note by id
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: i64,
    },

    /// Render the board as HTML
    Show {
        /// Filter applied before rendering
        #[arg(short = 'q', long, value_name = "SEARCH")]
        search: Option<String>,

        /// Write the page here instead of opening a browser
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
