use std::collections::HashSet;

use crate::row::RowSet;

/// Keep one row per distinct `content`, the first one encountered.
///
/// Survivors keep their relative order. The scan is sequential over the
/// ordered input, so the chosen representative never depends on how later
/// stages partition the data.
pub fn dedup(rows: &RowSet) -> RowSet {
    let mut seen: HashSet<&str> = HashSet::with_capacity(rows.len());
    rows.iter()
        .filter(|row| seen.insert(row.content.as_str()))
        .cloned()
        .collect()
}
