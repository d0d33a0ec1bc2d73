// File: crates/silplot-core/src/table.rs
// Summary: Delimited-file table with named columns and per-column typed cells.

use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// One table value. Columns are typed as a whole on load: all-integer,
/// all-float, or text. Blank fields become `Empty` in any column.
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    Empty,
}

impl Cell {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            Cell::Text(_) | Cell::Empty => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Cell::Int(_) | Cell::Float(_) => 0,
            Cell::Text(_) => 1,
            Cell::Empty => 2,
        }
    }

    /// Total order used for grouping: numbers < text < empty.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cell::Int(a), Cell::Int(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(v) => f.write_str(&repr_float(*v)),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => f.write_str("nan"),
        }
    }
}

/// Shortest round-trip text of a float: exponent form (`1e+16`, `1.5e-05`)
/// outside `[1e-4, 1e16)`, otherwise decimal with at least one fraction digit.
fn repr_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let sci = format!("{v:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp = exp.parse::<i32>().unwrap_or_default();
    if v != 0.0 && !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exp.abs());
    }
    let plain = v.to_string();
    if plain.contains('.') { plain } else { format!("{plain}.0") }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self { Cell::Int(v) }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self { Cell::Float(v) }
}

impl From<&str> for Cell {
    fn from(v: &str) -> Self { Cell::Text(v.to_string()) }
}

/// Named columns over row-major cells. Shared read-only once loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Load a CSV file with a header row.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        let table = Self::from_csv(rdr)?;
        debug!(path = %path.display(), rows = table.len(), columns = ?table.columns, "loaded table");
        Ok(table)
    }

    /// Load CSV text from any reader (header row required).
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv(rdr)
    }

    fn from_csv<R: io::Read>(mut rdr: csv::Reader<R>) -> Result<Self> {
        let columns = rdr.headers()?.iter().map(str::to_string).collect::<Vec<_>>();

        let mut raw: Vec<Vec<String>> = vec![Vec::new(); columns.len()];
        for rec in rdr.records() {
            let rec = rec?;
            for (col, field) in raw.iter_mut().zip(rec.iter()) {
                col.push(field.to_string());
            }
        }

        let typed = raw.iter().map(|col| infer_column(col)).collect::<Vec<_>>();
        let n_rows = typed.first().map_or(0, Vec::len);
        let mut rows = Vec::with_capacity(n_rows);
        for r in 0..n_rows {
            rows.push(typed.iter().map(|col| col[r].clone()).collect());
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] { &self.columns }

    /// Position of `name`, or `UnknownColumn` listing the available set.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| Error::UnknownColumn {
                name: name.to_string(),
                available: self.columns.clone(),
            })
    }

    pub fn rows(&self) -> &[Vec<Cell>] { &self.rows }

    pub fn len(&self) -> usize { self.rows.len() }

    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Distinct values of `column`, sorted ascending.
    pub fn distinct(&self, column: &str) -> Result<Vec<Cell>> {
        let c = self.column_index(column)?;
        let mut values = self.rows.iter().map(|r| r[c].clone()).collect::<Vec<_>>();
        values.sort_by(Cell::total_cmp);
        values.dedup_by(|a, b| a.total_cmp(b) == Ordering::Equal);
        Ok(values)
    }

    /// Select `(x, y)` pairs, optionally restricted to rows where
    /// `filter.0 == filter.1`, sorted by x ascending (stable). A blank
    /// filter value equals nothing, so it selects no rows.
    pub fn select_xy(&self, x: &str, y: &str, filter: Option<(&str, &Cell)>) -> Result<Vec<(f64, f64)>> {
        let xi = self.column_index(x)?;
        let yi = self.column_index(y)?;
        let fi = match filter {
            Some((col, value)) => Some((self.column_index(col)?, value)),
            None => None,
        };

        let mut out = Vec::new();
        for (row, cells) in self.rows.iter().enumerate() {
            if let Some((fi, want)) = fi {
                if *want == Cell::Empty || cells[fi].total_cmp(want) != Ordering::Equal {
                    continue;
                }
            }
            let xv = numeric(&cells[xi], x, row)?;
            let yv = numeric(&cells[yi], y, row)?;
            out.push((xv, yv));
        }
        out.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(out)
    }
}

fn numeric(cell: &Cell, column: &str, row: usize) -> Result<f64> {
    match cell {
        Cell::Empty => Ok(f64::NAN),
        other => other.as_f64().ok_or_else(|| Error::NonNumeric {
            column: column.to_string(),
            row,
            value: other.to_string(),
        }),
    }
}

fn infer_column(raw: &[String]) -> Vec<Cell> {
    let filled = || raw.iter().filter(|s| !s.is_empty());
    let has_blank = raw.iter().any(|s| s.is_empty());

    if !has_blank && raw.iter().all(|s| s.parse::<i64>().is_ok()) {
        return raw.iter().map(|s| Cell::Int(s.parse().unwrap_or_default())).collect();
    }
    if filled().all(|s| s.parse::<f64>().is_ok()) {
        return raw
            .iter()
            .map(|s| s.parse::<f64>().map(Cell::Float).unwrap_or(Cell::Empty))
            .collect();
    }
    raw.iter()
        .map(|s| if s.is_empty() { Cell::Empty } else { Cell::Text(s.clone()) })
        .collect()
}
