#![forbid(unsafe_code)]
//! # Sentiment Tables CLI
//!
//! Command-line front end for the `sentiment_tables` crate. Reads a headerless
//! `TweetID,Entity,Sentiment,TweetContent` CSV, writes the seven result tables
//! and prints a preview of each.
//!
//! ## Example
//! ```bash
//! cargo run --release -- data/tweets.csv --out-dir data/outputs --export-format csv
//! ```
//!
//! See `--help` for all available options.

use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process;
use sentiment_tables::{AnalysisOptions, ExportFormat, analyze_path, render_preview};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Headerless CSV with columns TweetID, Entity, Sentiment, TweetContent
    input: PathBuf,

    /// Directory the result tables are written to
    #[arg(long, default_value = "data/outputs")]
    out_dir: PathBuf,

    /// Output format for export (csv, tsv, json)
    #[arg(long, default_value = "csv")]
    export_format: ExportFormat,

    /// Optional path to additional stopword file (.txt, one word per line)
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Number of entities in the top-entities table
    #[arg(long, default_value_t = 10)]
    top_entities: usize,

    /// Number of words in each top-words table
    #[arg(long, default_value_t = 20)]
    top_words: usize,

    /// Rows shown per table on stdout
    #[arg(long, default_value_t = 20)]
    preview_rows: usize,

    /// Append a timestamp to output file names
    #[arg(long, default_value_t = false)]
    stamp: bool,

    /// Guard CSV/TSV cells against spreadsheet formula injection (prefixes `=`, `+`, `-`, `@` with `'`)
    #[arg(long, default_value_t = false)]
    sanitize_cells: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let opts = AnalysisOptions {
        top_entities: cli.top_entities,
        top_words: cli.top_words,
        preview_rows: cli.preview_rows,
        export_format: cli.export_format,
        stamp_outputs: cli.stamp,
        sanitize_cells: cli.sanitize_cells,
    };

    match analyze_path(&cli.input, &cli.out_dir, cli.stopwords.as_deref(), &opts) {
        Ok(summary) => {
            for table in summary.report.tables() {
                println!("{}", render_preview(&table, opts.preview_rows));
            }
        }
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    }
}
