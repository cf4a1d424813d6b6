use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Every way a pipeline run can fail. All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("schema violation at line {line}: {reason}")]
    SchemaViolation { line: u64, reason: String },
    #[error("dataset is empty, nothing to aggregate")]
    EmptyDataset,
    #[error("could not write table '{table}' to {}: {source}", .path.display())]
    SinkWrite {
        table: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not read stopword file {}: {source}", .path.display())]
    StopWords {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}
