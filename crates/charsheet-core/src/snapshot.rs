use crate::cellref::{CellRange, CellRef};
use crate::error::{CoreError, Result};

/// A fully-fetched worksheet held in memory.
///
/// `formatted` carries the values as rendered in the UI (currency symbols,
/// thousands separators), `raw` the underlying unformatted values. Both grids
/// are row-major; the raw grid is gap-filled to rectangular shape by the
/// client before the snapshot is built. Construction is the load, so every
/// lookup on a constructed snapshot is well-defined.
#[derive(Debug, Clone)]
pub struct SheetSnapshot {
    formatted: Vec<Vec<String>>,
    raw: Vec<Vec<String>>,
}

impl SheetSnapshot {
    pub fn new(formatted: Vec<Vec<String>>, raw: Vec<Vec<String>>) -> Self {
        Self { formatted, raw }
    }

    /// Formatted value at an A1-style position.
    pub fn value(&self, cell: &str) -> Result<&str> {
        Self::lookup(&self.formatted, cell)
    }

    /// Unformatted value at an A1-style position.
    pub fn raw_value(&self, cell: &str) -> Result<&str> {
        Self::lookup(&self.raw, cell)
    }

    fn lookup<'a>(grid: &'a [Vec<String>], cell: &str) -> Result<&'a str> {
        let r = CellRef::parse(cell)?;
        grid.get(r.row)
            .and_then(|row| row.get(r.col))
            .map(String::as_str)
            .ok_or_else(|| CoreError::CellOutOfBounds {
                cell: cell.to_string(),
            })
    }

    /// Formatted values of an inclusive range, flattened row-major and
    /// clamped to the grid extent.
    pub fn value_range(&self, range: &str) -> Result<Vec<String>> {
        let rng = CellRange::parse(range)?;
        let mut out = Vec::new();
        for row in rng.start.row..=rng.end.row {
            let Some(cells) = self.formatted.get(row) else {
                break;
            };
            for col in rng.start.col..=rng.end.col {
                if let Some(v) = cells.get(col) {
                    out.push(v.clone());
                }
            }
        }
        Ok(out)
    }

    pub fn rows(&self) -> usize {
        self.formatted.len()
    }
}
