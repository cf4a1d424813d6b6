use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use crate::error::AnalysisError;

/// Number of columns in a source record: TweetID, Entity, Sentiment, TweetContent.
pub const COLUMNS: usize = 4;

/// One decoded post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: i32,
    pub entity: String,
    pub sentiment: String,
    pub content: String,
}

impl Row {
    pub fn new(id: i32, entity: &str, sentiment: &str, content: &str) -> Self {
        Row {
            id,
            entity: entity.to_string(),
            sentiment: sentiment.to_string(),
            content: content.to_string(),
        }
    }
}

/// Decoded table in decode order. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    rows: Vec<Row>,
}

impl RowSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

}

impl From<Vec<Row>> for RowSet {
    fn from(rows: Vec<Row>) -> Self {
        RowSet { rows }
    }
}

impl FromIterator<Row> for RowSet {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        RowSet {
            rows: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RowSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Decode a headerless four-column CSV file.
pub fn read_rows(path: &Path) -> Result<RowSet, AnalysisError> {
    let file = File::open(path)?;
    read_rows_from(file)
}

/// Decode headerless four-column CSV from any reader. Stops at the first invalid record.
pub fn read_rows_from<R: Read>(reader: R) -> Result<RowSet, AnalysisError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    loop {
        let more = rdr.read_record(&mut record).map_err(|e| {
            let line = e.position().map(|p| p.line()).unwrap_or(0);
            AnalysisError::SchemaViolation {
                line,
                reason: e.to_string(),
            }
        })?;
        if !more {
            break;
        }
        rows.push(decode_record(&record)?);
    }
    Ok(RowSet::from(rows))
}

fn decode_record(record: &StringRecord) -> Result<Row, AnalysisError> {
    let line = record.position().map(|p| p.line()).unwrap_or(0);
    let violation = |reason: String| AnalysisError::SchemaViolation { line, reason };

    if record.len() != COLUMNS {
        return Err(violation(format!(
            "expected {} columns, found {}",
            COLUMNS,
            record.len()
        )));
    }

    let id = record[0]
        .parse::<i32>()
        .map_err(|_| violation(format!("TweetID {:?} is not an integer", &record[0])))?;

    for (idx, name) in [(1, "Entity"), (2, "Sentiment"), (3, "TweetContent")] {
        if record[idx].is_empty() {
            return Err(violation(format!("{name} is empty")));
        }
    }

    Ok(Row::new(id, &record[1], &record[2], &record[3]))
}
