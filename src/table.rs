use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// A single output value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(u64),
    Float(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Int(n) => write!(f, "{}", n),
            // Debug keeps the trailing ".0" on whole numbers
            Cell::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<u64> for Cell {
    fn from(n: u64) -> Self {
        Cell::Int(n)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Float(x)
    }
}

/// A named result table with a header row, ready for a sink or the console.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: &'static str, headers: &[&'static str]) -> Self {
        Table {
            name,
            headers: headers.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as JSON objects keyed by header.
    pub fn to_json(&self) -> Value {
        let records = self
            .rows
            .iter()
            .map(|row| {
                let obj: Map<String, Value> = self
                    .headers
                    .iter()
                    .zip(row)
                    .map(|(h, c)| (h.to_string(), serde_json::to_value(c).unwrap_or(Value::Null)))
                    .collect();
                Value::Object(obj)
            })
            .collect();
        Value::Array(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_cells_keep_decimal_point() {
        assert_eq!(Cell::Float(50.0).to_string(), "50.0");
        assert_eq!(Cell::Float(33.33).to_string(), "33.33");
        assert_eq!(Cell::Int(7).to_string(), "7");
    }

    #[test]
    fn json_records_keyed_by_header() {
        let mut t = Table::new("top_entities", &["Entity", "count"]);
        t.push(vec!["A".into(), 3_u64.into()]);
        let v = t.to_json();
        assert_eq!(v[0]["Entity"], "A");
        assert_eq!(v[0]["count"], 3);
    }
}
