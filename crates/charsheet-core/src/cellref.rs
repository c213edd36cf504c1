use crate::error::{CoreError, Result};
use regex::Regex;
use std::sync::OnceLock;

static CELL_RE: OnceLock<Regex> = OnceLock::new();

fn cell_re() -> &'static Regex {
    CELL_RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").unwrap())
}

/// A = 1, Z = 26, AA = 27. Convert spreadsheet-style column letters to their
/// 1-based base-26 positional value.
pub fn col_letters_to_num(letters: &str) -> u32 {
    let mut res: u32 = 0;
    for ch in letters.chars() {
        let v = (ch.to_ascii_uppercase() as u32).saturating_sub('A' as u32) + 1;
        res = res.saturating_mul(26).saturating_add(v);
    }
    res
}

/// Zero-based form of [`col_letters_to_num`] (A = 0).
pub fn col_letters_to_index(letters: &str) -> u32 {
    col_letters_to_num(letters).saturating_sub(1)
}

/// Inverse of [`col_letters_to_num`]: 1 = A, 27 = AA.
pub fn num_to_col_letters(mut n: u32) -> String {
    let mut out = String::new();
    while n > 0 {
        n -= 1;
        out.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    out.chars().rev().collect()
}

/// A resolved A1-style cell position, both coordinates zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    /// Parse an A1-style reference like `F9` or `bc8`.
    pub fn parse(s: &str) -> Result<Self> {
        let caps = cell_re()
            .captures(s)
            .ok_or_else(|| CoreError::InvalidCellRef(s.to_string()))?;
        let col = col_letters_to_index(&caps[1]) as usize;
        let row: usize = caps[2]
            .parse()
            .map_err(|_| CoreError::InvalidCellRef(s.to_string()))?;
        if row == 0 {
            return Err(CoreError::InvalidCellRef(s.to_string()));
        }
        Ok(Self { row: row - 1, col })
    }
}

/// An inclusive A1-style range like `A2:A322`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellRef,
    pub end: CellRef,
}

impl CellRange {
    pub fn parse(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| CoreError::InvalidCellRef(s.to_string()))?;
        Ok(Self {
            start: CellRef::parse(start)?,
            end: CellRef::parse(end)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters() {
        assert_eq!(col_letters_to_num("A"), 1);
        assert_eq!(col_letters_to_num("Z"), 26);
        assert_eq!(col_letters_to_num("a"), 1);
    }

    #[test]
    fn multi_letters() {
        assert_eq!(col_letters_to_num("AA"), 27);
        assert_eq!(col_letters_to_num("AZ"), 52);
        assert_eq!(col_letters_to_num("BC"), 55);
    }

    #[test]
    fn zero_based_index() {
        assert_eq!(col_letters_to_index("A"), 0);
        assert_eq!(col_letters_to_index("AA"), 26);
    }

    #[test]
    fn letters_roundtrip() {
        for n in 1..=18_278 {
            // covers all 1-3 letter columns
            assert_eq!(col_letters_to_num(&num_to_col_letters(n)), n);
        }
    }

    #[test]
    fn parse_simple_cell() {
        let r = CellRef::parse("F9").unwrap();
        assert_eq!(r, CellRef { row: 8, col: 5 });
    }

    #[test]
    fn parse_wide_cell() {
        let r = CellRef::parse("BC8").unwrap();
        assert_eq!(r, CellRef { row: 7, col: 54 });
    }

    #[test]
    fn parse_lowercase() {
        assert_eq!(CellRef::parse("aa3").unwrap(), CellRef { row: 2, col: 26 });
    }

    #[test]
    fn parse_rejects_garbage() {
        for s in ["", "9F", "F", "9", "F9X", "F 9", "A0"] {
            assert!(
                matches!(CellRef::parse(s), Err(CoreError::InvalidCellRef(_))),
                "expected failure for {s:?}"
            );
        }
    }

    #[test]
    fn parse_range() {
        let r = CellRange::parse("A2:A322").unwrap();
        assert_eq!(r.start, CellRef { row: 1, col: 0 });
        assert_eq!(r.end, CellRef { row: 321, col: 0 });
    }

    #[test]
    fn parse_range_rejects_missing_colon() {
        assert!(matches!(
            CellRange::parse("A2A322"),
            Err(CoreError::InvalidCellRef(_))
        ));
    }
}
