//! Declarative map of every cell the character importer reads.
//!
//! The character template is a fixed spreadsheet layout; each field below
//! names its tab, A1 address, and expected type. Validating the whole schema
//! up front turns a misaligned sheet into one aggregated diagnostic instead
//! of a failure on whichever cell happened to be read first.

use crate::error::{CoreError, Result};
use crate::snapshot::SheetSnapshot;

/// The three tabs of the character template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Front,
    Back,
    Data,
}

impl Tab {
    pub fn title(self) -> &'static str {
        match self {
            Tab::Front => "Front",
            Tab::Back => "Back",
            Tab::Data => "Data",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TitleText,
    LowerText,
    Int,
    Bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub tab: Tab,
    pub cell: &'static str,
    pub kind: FieldKind,
    /// Read from the unformatted grid instead of the formatted one.
    pub raw: bool,
}

const fn f(name: &'static str, tab: Tab, cell: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        tab,
        cell,
        kind,
        raw: false,
    }
}

const fn r(name: &'static str, tab: Tab, cell: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        name,
        tab,
        cell,
        kind,
        raw: true,
    }
}

pub const CHARACTER_SCHEMA: &[FieldSpec] = &[
    f("name", Tab::Front, "B1", FieldKind::TitleText),
    f("size", Tab::Front, "B3", FieldKind::LowerText),
    f("hair", Tab::Front, "H3", FieldKind::LowerText),
    f("eyes", Tab::Front, "O3", FieldKind::LowerText),
    f("race", Tab::Front, "T1", FieldKind::TitleText),
    f("age", Tab::Front, "AF3", FieldKind::Int),
    f("height", Tab::Front, "U3", FieldKind::Text),
    f("weight", Tab::Front, "AA3", FieldKind::Text),
    f("level", Tab::Front, "P1", FieldKind::Int),
    f("gender", Tab::Front, "AB1", FieldKind::LowerText),
    f("image", Tab::Front, "BC8", FieldKind::Text),
    f("feet_per_move", Tab::Front, "AV12", FieldKind::Int),
    f("strength", Tab::Front, "F9", FieldKind::Int),
    f("dexterity", Tab::Front, "F10", FieldKind::Int),
    f("constitution", Tab::Front, "F11", FieldKind::Int),
    f("intelligence", Tab::Front, "F12", FieldKind::Int),
    f("wisdom", Tab::Front, "F13", FieldKind::Int),
    f("charisma", Tab::Front, "F14", FieldKind::Int),
    r("total_currency", Tab::Back, "AR6", FieldKind::Int),
    r("total_wealth", Tab::Back, "AR23", FieldKind::Int),
    f("encumbrance", Tab::Back, "AE34", FieldKind::Text),
    f("strength_mod", Tab::Data, "F2", FieldKind::Int),
    f("dexterity_mod", Tab::Data, "F3", FieldKind::Int),
    f("constitution_mod", Tab::Data, "F4", FieldKind::Int),
    f("intelligence_mod", Tab::Data, "F5", FieldKind::Int),
    f("wisdom_mod", Tab::Data, "F6", FieldKind::Int),
    f("charisma_mod", Tab::Data, "F7", FieldKind::Int),
    f("coin_encumbered", Tab::Data, "B16", FieldKind::Bool),
];

pub fn by_name(name: &str) -> Option<&'static FieldSpec> {
    CHARACTER_SCHEMA.iter().find(|s| s.name == name)
}

/// Resolve a field spec against the right snapshot and grid.
pub fn field<'a>(
    spec: &FieldSpec,
    front: &'a SheetSnapshot,
    back: &'a SheetSnapshot,
    data: &'a SheetSnapshot,
) -> Result<&'a str> {
    let snap = match spec.tab {
        Tab::Front => front,
        Tab::Back => back,
        Tab::Data => data,
    };
    if spec.raw {
        snap.raw_value(spec.cell)
    } else {
        snap.value(spec.cell)
    }
}

/// Parse a spreadsheet number: plain integer, or a formatted value with
/// thousands separators, or a float (truncated).
pub fn parse_int(v: &str) -> Option<i64> {
    let t = v.trim().replace(',', "");
    if let Ok(n) = t.parse::<i64>() {
        return Some(n);
    }
    t.parse::<f64>().ok().map(|x| x as i64)
}

pub fn parse_bool(v: &str) -> bool {
    v.trim().eq_ignore_ascii_case("true")
}

/// Title-case a value: uppercase every letter that follows a non-letter,
/// lowercase the rest. Any non-letter starts a new word, so hyphenated names
/// come out as `Half-Elf`, not `Half-elf`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.trim().chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Resolve and type-check every schema field, collecting all failures into a
/// single [`CoreError::SchemaMismatch`] diagnostic.
pub fn validate(front: &SheetSnapshot, back: &SheetSnapshot, data: &SheetSnapshot) -> Result<()> {
    let mut problems = Vec::new();
    for spec in CHARACTER_SCHEMA {
        match field(spec, front, back, data) {
            Ok(v) => {
                if spec.kind == FieldKind::Int && parse_int(v).is_none() {
                    problems.push(format!(
                        "{}!{} ({}): expected a number, got {v:?}",
                        spec.tab.title(),
                        spec.cell,
                        spec.name
                    ));
                }
            }
            Err(e) => problems.push(format!(
                "{}!{} ({}): {e}",
                spec.tab.title(),
                spec.cell,
                spec.name
            )),
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(CoreError::SchemaMismatch {
            details: problems.join("\n"),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::cellref::CellRef;

    /// Build a grid just big enough to hold the given cells.
    pub(crate) fn grid(cells: &[(&str, &str)]) -> Vec<Vec<String>> {
        let mut rows = 0;
        let mut cols = 0;
        for (cell, _) in cells {
            let r = CellRef::parse(cell).unwrap();
            rows = rows.max(r.row + 1);
            cols = cols.max(r.col + 1);
        }
        let mut out = vec![vec![String::new(); cols]; rows];
        for (cell, value) in cells {
            let r = CellRef::parse(cell).unwrap();
            out[r.row][r.col] = value.to_string();
        }
        out
    }

    pub(crate) fn front_fixture() -> SheetSnapshot {
        let g = grid(&[
            ("B1", "keth brightblade"),
            ("B3", "Medium"),
            ("H3", "Silver"),
            ("O3", "Green"),
            ("T1", "half-elf"),
            ("AF3", "27"),
            ("U3", "5'9\""),
            ("AA3", "152 lbs"),
            ("P1", "4"),
            ("AB1", "Female"),
            ("BC8", " https://example.com/keth.png "),
            ("AV12", "30"),
            ("F9", "14"),
            ("F10", "16"),
            ("F11", "12"),
            ("F12", "10"),
            ("F13", "13"),
            ("F14", "11"),
        ]);
        SheetSnapshot::new(g.clone(), g)
    }

    pub(crate) fn back_fixture() -> SheetSnapshot {
        let formatted = grid(&[
            ("AR6", "¥12,500"),
            ("AR23", "¥14,000"),
            ("AE34", "Light"),
        ]);
        let raw = grid(&[("AR6", "12500"), ("AR23", "14000"), ("AE34", "Light")]);
        SheetSnapshot::new(formatted, raw)
    }

    pub(crate) fn data_fixture() -> SheetSnapshot {
        let g = grid(&[
            ("F2", "2"),
            ("F3", "3"),
            ("F4", "1"),
            ("F5", "0"),
            ("F6", "1"),
            ("F7", "0"),
            ("B16", "TRUE"),
        ]);
        SheetSnapshot::new(g.clone(), g)
    }

    #[test]
    fn validate_accepts_fixture() {
        validate(&front_fixture(), &back_fixture(), &data_fixture()).unwrap();
    }

    #[test]
    fn validate_aggregates_failures() {
        // empty Data tab: every Data field is out of bounds, but the Front and
        // Back fields still pass — one error, one line per failing field
        let empty = SheetSnapshot::new(Vec::new(), Vec::new());
        let err = validate(&front_fixture(), &back_fixture(), &empty).unwrap_err();
        let CoreError::SchemaMismatch { details } = err else {
            panic!("expected SchemaMismatch, got {err}");
        };
        assert_eq!(details.lines().count(), 7);
        assert!(details.contains("Data!B16"));
    }

    #[test]
    fn validate_flags_non_numeric() {
        let mut cells = vec![("AF3", "twenty-seven")];
        let front = front_fixture();
        for spec in CHARACTER_SCHEMA.iter().filter(|s| s.tab == Tab::Front) {
            if spec.cell != "AF3" {
                cells.push((spec.cell, front.value(spec.cell).unwrap()));
            }
        }
        let g = grid(&cells);
        let bad_front = SheetSnapshot::new(g.clone(), g);
        let err = validate(&bad_front, &back_fixture(), &data_fixture()).unwrap_err();
        let CoreError::SchemaMismatch { details } = err else {
            panic!("expected SchemaMismatch");
        };
        assert!(details.contains("Front!AF3"));
        assert!(details.contains("expected a number"));
    }

    #[test]
    fn parse_int_accepts_separators_and_floats() {
        assert_eq!(parse_int("12,500"), Some(12_500));
        assert_eq!(parse_int(" 42 "), Some(42));
        assert_eq!(parse_int("3.7"), Some(3));
        assert_eq!(parse_int("n/a"), None);
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("keth brightblade"), "Keth Brightblade");
        assert_eq!(title_case("GOBLIN king"), "Goblin King");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_starts_words_at_non_letters() {
        assert_eq!(title_case("half-elf"), "Half-Elf");
        assert_eq!(title_case("HALF-ELF"), "Half-Elf");
        assert_eq!(title_case("will-o'-the-wisp"), "Will-O'-The-Wisp");
        assert_eq!(title_case("owlbear (young)"), "Owlbear (Young)");
    }
}
