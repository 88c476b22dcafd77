//! Delimited-text parsing
//!
//! Both external tools emit comma-separated rows. The header either comes
//! from the first line of the text or, for tools invoked with a
//! header-suppressing flag, is supplied by the caller. Parsing is
//! all-or-nothing per input: a row whose column count does not match the
//! header means the tool's output format changed, and partial data would
//! silently mislabel columns.

use crate::{CollectError, Result};
use std::sync::Arc;

/// Where the column names of an input come from
#[derive(Debug, Clone, Copy)]
pub enum Header<'a> {
    /// The first non-empty line of the input is the header
    FirstLine,
    /// The caller supplies the column names; every line is data
    Supplied(&'a [&'a str]),
}

/// One parsed cell.
///
/// Keeps the verbatim trimmed text alongside the inferred numeric value,
/// so a numeric-looking cell like a job id can still be read back as the
/// exact string the tool printed.
#[derive(Debug, Clone, PartialEq)]
struct Cell {
    text: String,
    number: Option<f64>,
}

impl Cell {
    fn infer(raw: &str) -> Self {
        let text = raw.trim().to_string();
        let number = text.parse::<f64>().ok().filter(|n| n.is_finite());
        Self { text, number }
    }
}

/// One parsed data row with typed access by column name
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<[String]>,
    cells: Vec<Cell>,
}

impl Row {
    fn index_of(&self, column: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| CollectError::parse(format!("missing column `{column}`")))
    }

    /// Get a cell as text (available for every cell)
    pub fn text(&self, column: &str) -> Result<&str> {
        Ok(&self.cells[self.index_of(column)?].text)
    }

    /// Get a numeric cell's value
    pub fn number(&self, column: &str) -> Result<f64> {
        let cell = &self.cells[self.index_of(column)?];
        cell.number.ok_or_else(|| {
            CollectError::value(format!(
                "column `{}` is not numeric: `{}`",
                column, cell.text
            ))
        })
    }

    /// Get a numeric cell's value as a non-negative integer count
    pub fn integer(&self, column: &str) -> Result<u32> {
        let value = self.number(column)?;
        if value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
            return Err(CollectError::value(format!(
                "column `{column}` is not an integer count: `{value}`"
            )));
        }
        Ok(value as u32)
    }

    /// Column names of this row, in input order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Parse comma-delimited text into typed rows.
///
/// Header names are trimmed of surrounding whitespace (the accelerator
/// tool pads some of its header names). Cells are trimmed the same way.
/// Zero data rows is not an error and yields an empty Vec.
pub fn parse(text: &str, header: Header<'_>) -> Result<Vec<Row>> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let columns: Arc<[String]> = match header {
        Header::Supplied(names) => names.iter().map(|name| name.trim().to_string()).collect(),
        Header::FirstLine => match lines.next() {
            Some(line) => line.split(',').map(|name| name.trim().to_string()).collect(),
            None => return Ok(Vec::new()),
        },
    };

    let mut rows = Vec::new();
    for (index, line) in lines.enumerate() {
        let cells: Vec<Cell> = line.split(',').map(Cell::infer).collect();
        if cells.len() != columns.len() {
            return Err(CollectError::parse(format!(
                "row {} has {} columns, expected {}",
                index + 1,
                cells.len(),
                columns.len()
            )));
        }
        rows.push(Row {
            columns: columns.clone(),
            cells,
        });
    }

    Ok(rows)
}
