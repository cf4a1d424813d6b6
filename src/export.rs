use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use csv::WriterBuilder;
use log::info;

use crate::config::AnalysisOptions;
use crate::error::AnalysisError;
use crate::table::Table;

/// Sink format for result tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

/// Neutralize spreadsheet formula injection: cells starting with `=`, `+`, `-`, `@`,
/// tab or carriage return get a leading `'`. A cell that already starts with `'`
/// is left alone.
pub fn csv_safe_cell(cell: String) -> String {
    match cell.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{}", cell),
        _ => cell,
    }
}

/// File name for a table, optionally stamped with the local time.
pub fn output_file_name(table: &str, format: ExportFormat, stamp: Option<&str>) -> String {
    match stamp {
        Some(s) => format!("{}_{}.{}", table, s, format.extension()),
        None => format!("{}.{}", table, format.extension()),
    }
}

/// Write every table into `out_dir`, one file each. Stops at the first failure.
///
/// Cell values are written as computed unless `opts.sanitize_cells` asks for
/// the [`csv_safe_cell`] guard on CSV/TSV output.
pub fn write_tables(
    tables: &[Table],
    out_dir: &Path,
    opts: &AnalysisOptions,
) -> Result<Vec<PathBuf>, AnalysisError> {
    fs::create_dir_all(out_dir).map_err(|source| AnalysisError::SinkWrite {
        table: tables.first().map(|t| t.name).unwrap_or_default().to_string(),
        path: out_dir.to_path_buf(),
        source,
    })?;
    let stamp = opts
        .stamp_outputs
        .then(|| Local::now().format("%Y%m%d_%H%M%S").to_string());
    let format = opts.export_format;

    let mut written = Vec::with_capacity(tables.len());
    for table in tables {
        let path = out_dir.join(output_file_name(table.name, format, stamp.as_deref()));
        write_table(table, &path, format, opts.sanitize_cells).map_err(|source| AnalysisError::SinkWrite {
            table: table.name.to_string(),
            path: path.clone(),
            source,
        })?;
        info!("Wrote {} rows to {}", table.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

fn write_table(table: &Table, path: &Path, format: ExportFormat, sanitize: bool) -> io::Result<()> {
    let file = File::create(path)?;
    match format {
        ExportFormat::Csv => write_delimited(table, file, b',', sanitize),
        ExportFormat::Tsv => write_delimited(table, file, b'\t', sanitize),
        ExportFormat::Json => {
            let mut w = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut w, &table.to_json())?;
            w.write_all(b"\n")?;
            w.flush()
        }
    }
}

/// Header row, then one record per table row.
pub fn write_delimited<W: Write>(
    table: &Table,
    writer: W,
    delimiter: u8,
    sanitize: bool,
) -> io::Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(delimiter).from_writer(writer);
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| {
            let cell = c.to_string();
            if sanitize { csv_safe_cell(cell) } else { cell }
        }))?;
    }
    wtr.flush()
}

/// Console grid of the first `n` rows of a table.
pub fn render_preview(table: &Table, n: usize) -> String {
    let shown: Vec<Vec<String>> = table
        .rows
        .iter()
        .take(n)
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = table.headers.iter().map(|h| h.chars().count()).collect();
    for row in &shown {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule: String = widths
        .iter()
        .map(|w| format!("+{}", "-".repeat(w + 2)))
        .collect::<String>()
        + "+\n";
    let headers: Vec<String> = table.headers.iter().map(|h| h.to_string()).collect();

    let mut out = format!("{}\n", table.name);
    out.push_str(&rule);
    out.push_str(&grid_line(&headers, &widths));
    out.push_str(&rule);
    for row in &shown {
        out.push_str(&grid_line(row, &widths));
    }
    out.push_str(&rule);
    if table.len() > n {
        out.push_str(&format!("only showing top {} rows\n", n));
    }
    out
}

fn grid_line(cells: &[String], widths: &[usize]) -> String {
    let mut s = String::new();
    for (cell, w) in cells.iter().zip(widths) {
        let pad = w.saturating_sub(cell.chars().count());
        s.push_str(&format!("| {}{} ", " ".repeat(pad), cell));
    }
    s.push_str("|\n");
    s
}
