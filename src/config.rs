use crate::export::ExportFormat;

/// Knobs for one pipeline run.
#[derive(Debug, Clone)]
pub struct AnalysisOptions {
    /// Entities kept in `top_entities` (and used to filter the top-entity cross-tab).
    pub top_entities: usize,
    /// Words kept per sentiment in the word tables.
    pub top_words: usize,
    /// Rows shown per table on the console.
    pub preview_rows: usize,
    pub export_format: ExportFormat,
    /// Append a `_YYYYMMDD_HHMMSS` stamp to output file names.
    pub stamp_outputs: bool,
    /// Prefix spreadsheet-formula lookalikes (`=`, `+`, `-`, `@`, ...) with `'` in CSV/TSV.
    pub sanitize_cells: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        AnalysisOptions {
            top_entities: 10,
            top_words: 20,
            preview_rows: 20,
            export_format: ExportFormat::Csv,
            stamp_outputs: false,
            sanitize_cells: false,
        }
    }
}
