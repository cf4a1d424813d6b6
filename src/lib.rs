//! # sentiment_tables
//!
//! Batch aggregation over a labelled table of social-media posts
//! `(TweetID, Entity, Sentiment, TweetContent)`.
//!
//! One run deduplicates the posts by content and derives seven tables:
//! sentiment shares, top entities, average post length per sentiment,
//! top words of positive and of negative posts, and the entity × sentiment
//! cross-tab for all entities and for the top entities only.
//!
//! ## Example
//! ```
//! use sentiment_tables::{AnalysisOptions, Row, RowSet, StopWords, run};
//! let rows = RowSet::from(vec![
//!     Row::new(1, "A", "Positive", "a b c"),
//!     Row::new(2, "A", "Positive", "a b c"),
//!     Row::new(3, "B", "Negative", "d e f"),
//! ]);
//! let report = run(&rows, &StopWords::default(), &AnalysisOptions::default()).unwrap();
//! assert_eq!(report.unique_rows, 2);
//! assert_eq!(report.top_entities[0].entity, "A");
//! ```

use std::path::{Path, PathBuf};

use log::info;

pub mod aggregate;
pub mod config;
pub mod dedup;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod rank;
pub mod row;
pub mod table;
pub mod tokenize;

pub use config::AnalysisOptions;
pub use dedup::dedup;
pub use error::AnalysisError;
pub use export::{ExportFormat, csv_safe_cell, render_preview, write_tables};
pub use pipeline::{Report, run};
pub use row::{Row, RowSet, read_rows};
pub use table::{Cell, Table};
pub use tokenize::{StopWords, Tokenizer};

/// Outcome of [`analyze_path`]: the computed tables and the files written.
#[derive(Debug)]
pub struct RunSummary {
    pub report: Report,
    pub written: Vec<PathBuf>,
}

/// Decode `input`, run the pipeline and write every table into `out_dir`.
///
/// `stopwords` optionally names a file whose words (one per line) are added
/// to the built-in list.
pub fn analyze_path(
    input: &Path,
    out_dir: &Path,
    stopwords: Option<&Path>,
    opts: &AnalysisOptions,
) -> Result<RunSummary, AnalysisError> {
    let stop = match stopwords {
        Some(p) => StopWords::with_file(p)?,
        None => StopWords::default(),
    };

    let rows = read_rows(input)?;
    info!("Posts data loaded: {} rows from {}", rows.len(), input.display());

    let report = run(&rows, &stop, opts)?;
    let written = write_tables(&report.tables(), out_dir, opts)?;
    info!("Results saved to {} files in {}", written.len(), out_dir.display());

    Ok(RunSummary { report, written })
}
