//! Template Dashboard - command-line front end
//!
//! Works on a catalog file (JSON or CSV, chosen by extension): list, search,
//! preview, edit and export templates, and print the analytics figures.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "template-dashboard")]
#[command(about = "Manage a catalog of reusable code templates", long_about = None)]
pub struct Cli {
    /// Catalog file (.json or .csv)
    #[arg(short, long, default_value = "templates.json")]
    pub file: PathBuf,

    /// Directory holding settings.json
    #[arg(long, default_value = ".")]
    pub settings_dir: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print overview and per-category statistics
    Stats,

    /// List templates, optionally filtered and sorted
    List {
        /// Case-insensitive text to search for in any field
        #[arg(short, long)]
        search: Option<String>,
        /// Exact category, or "All"
        #[arg(short, long, default_value = catalog::ALL_CATEGORIES)]
        category: String,
        /// number, title or category
        #[arg(long, default_value = "number")]
        sort_by: catalog::SortKey,
    },

    /// Show one template with a code preview and code metrics
    Show {
        /// Template number
        number: i64,
    },

    /// Add a template
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        code: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Delete templates by number
    Delete {
        #[arg(required = true)]
        numbers: Vec<i64>,
    },

    /// Set the category of templates by number
    SetCategory {
        category: String,
        #[arg(required = true)]
        numbers: Vec<i64>,
    },

    /// Reset numbers to 1..N in current order
    Renumber,

    /// Remove templates with no data in any field
    Clean,

    /// Write a timestamped JSON or CSV export
    Export {
        /// json or csv
        #[arg(long, default_value = "json")]
        format: String,
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
        /// Export only these template numbers
        #[arg(long, num_args = 1..)]
        numbers: Vec<i64>,
    },

    /// Replace the catalog file with the sample templates
    Sample,

    /// Show the dashboard settings, updating any field given
    Settings {
        #[arg(long)]
        spreadsheet_id: Option<String>,
        #[arg(long)]
        worksheet: Option<String>,
        /// Template generator endpoint ("" to disconnect)
        #[arg(long)]
        webhook_url: Option<String>,
        /// Lines of code shown in previews
        #[arg(long)]
        preview_lines: Option<usize>,
    },
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = commands::run(cli) {
        tracing::error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}
