//! Turns three validated tab snapshots into a [`Character`] record.

use crate::character::{defaults_for_gender, Character, PronounSet, VerbSet};
use crate::error::{CoreError, Result};
use crate::inventory::Inventory;
use crate::schema::{self, FieldKind};
use crate::snapshot::SheetSnapshot;
use crate::stats::StatBlock;
use chrono::Utc;

/// Extract a character from its three tab snapshots.
///
/// The schema is validated first, so a misaligned sheet fails with one
/// aggregated [`CoreError::SchemaMismatch`] before any field is read; no
/// partial record is ever produced.
pub fn extract_character(
    url: &str,
    front: &SheetSnapshot,
    back: &SheetSnapshot,
    data: &SheetSnapshot,
    pronoun_override: Option<PronounSet>,
    verb_override: Option<VerbSet>,
) -> Result<Character> {
    schema::validate(front, back, data)?;

    let text = |name: &str| -> Result<String> {
        let spec = schema::by_name(name)
            .ok_or_else(|| CoreError::InvalidCellRef(name.to_string()))?;
        let v = schema::field(spec, front, back, data)?;
        Ok(match spec.kind {
            FieldKind::TitleText => schema::title_case(v),
            FieldKind::LowerText => v.to_lowercase(),
            _ => v.trim().to_string(),
        })
    };
    let int = |name: &str| -> Result<i64> {
        let spec = schema::by_name(name)
            .ok_or_else(|| CoreError::InvalidCellRef(name.to_string()))?;
        let v = schema::field(spec, front, back, data)?;
        schema::parse_int(v).ok_or_else(|| CoreError::SchemaMismatch {
            details: format!("{}!{} ({name}): expected a number", spec.tab.title(), spec.cell),
        })
    };
    // age/level/movement are unsigned in the record; a negative sheet value
    // must fail rather than wrap
    let uint = |name: &str| -> Result<u32> {
        let n = int(name)?;
        u32::try_from(n).map_err(|_| {
            let (tab, cell) = schema::by_name(name)
                .map(|s| (s.tab.title(), s.cell))
                .unwrap_or(("?", "?"));
            CoreError::SchemaMismatch {
                details: format!("{tab}!{cell} ({name}): expected a non-negative number, got {n}"),
            }
        })
    };

    let stats = StatBlock {
        strength: int("strength")?,
        dexterity: int("dexterity")?,
        constitution: int("constitution")?,
        intelligence: int("intelligence")?,
        wisdom: int("wisdom")?,
        charisma: int("charisma")?,
        strength_mod: int("strength_mod")?,
        dexterity_mod: int("dexterity_mod")?,
        constitution_mod: int("constitution_mod")?,
        intelligence_mod: int("intelligence_mod")?,
        wisdom_mod: int("wisdom_mod")?,
        charisma_mod: int("charisma_mod")?,
        total_currency: int("total_currency")?,
        total_wealth: int("total_wealth")?,
        coin_encumbered: schema::parse_bool(text("coin_encumbered")?.as_str()),
        encumbrance: text("encumbrance")?,
    };

    let gender = text("gender")?;
    let (mut pronouns, mut verbs) = defaults_for_gender(&gender);
    if let Some(p) = &pronoun_override {
        pronouns = p.clone();
    }
    if let Some(v) = &verb_override {
        verbs = v.clone();
    }

    let character = Character {
        sheet_url: url.to_string(),
        name: text("name")?,
        race: text("race")?,
        size: text("size")?,
        hair: text("hair")?,
        eyes: text("eyes")?,
        height: text("height")?,
        weight: text("weight")?,
        age: uint("age")?,
        level: uint("level")?,
        gender,
        image: text("image")?,
        feet_per_move: uint("feet_per_move")?,
        pronouns,
        verbs,
        pronoun_override,
        verb_override,
        stats,
        inventory: Inventory::default(),
        linked_at: Utc::now(),
    };
    tracing::debug!(name = %character.name, level = character.level, "extracted character");
    Ok(character)
}

/// Translate sheet-backend failures during a load into the single
/// user-facing invalid-sheet error naming the URL. Schema diagnostics and
/// programmer errors pass through untouched.
pub fn collapse_load_error(url: &str, err: CoreError) -> CoreError {
    match err {
        CoreError::Sheets(e) => {
            tracing::warn!(%url, error = %e, "sheet load failed");
            CoreError::InvalidSheet {
                url: url.to_string(),
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tests::{back_fixture, data_fixture, front_fixture, grid};
    use crate::schema::{Tab, CHARACTER_SCHEMA};

    #[test]
    fn extracts_fixture_character() {
        let c = extract_character(
            "https://docs.google.com/spreadsheets/d/abc123",
            &front_fixture(),
            &back_fixture(),
            &data_fixture(),
            None,
            None,
        )
        .unwrap();
        assert_eq!(c.name, "Keth Brightblade");
        assert_eq!(c.race, "Half-Elf");
        assert_eq!(c.size, "medium");
        assert_eq!(c.age, 27);
        assert_eq!(c.level, 4);
        assert_eq!(c.gender, "female");
        assert_eq!(c.image, "https://example.com/keth.png");
        assert_eq!(c.feet_per_move, 30);
        assert_eq!(c.pronouns, PronounSet::feminine());
        assert_eq!(c.stats.strength, 14);
        assert_eq!(c.stats.dexterity_mod, 3);
        assert_eq!(c.stats.total_currency, 12_500);
        assert!(c.stats.coin_encumbered);
        assert_eq!(c.stats.encumbrance, "Light");
    }

    #[test]
    fn overrides_beat_gender_defaults() {
        let c = extract_character(
            "https://docs.google.com/spreadsheets/d/abc123",
            &front_fixture(),
            &back_fixture(),
            &data_fixture(),
            PronounSet::parse("ze/zir/zirself"),
            VerbSet::parse("are/have"),
        )
        .unwrap();
        assert_eq!(c.pronouns.subject, "ze");
        assert_eq!(c.verbs.be, "are");
        assert!(c.pronoun_override.is_some());
    }

    #[test]
    fn negative_age_is_rejected_not_wrapped() {
        let front = front_fixture();
        let mut cells = vec![("AF3", "-5")];
        for spec in CHARACTER_SCHEMA.iter().filter(|s| s.tab == Tab::Front) {
            if spec.cell != "AF3" {
                cells.push((spec.cell, front.value(spec.cell).unwrap()));
            }
        }
        let g = grid(&cells);
        let bad_front = SheetSnapshot::new(g.clone(), g);
        let err = extract_character(
            "https://docs.google.com/spreadsheets/d/abc123",
            &bad_front,
            &back_fixture(),
            &data_fixture(),
            None,
            None,
        )
        .unwrap_err();
        let CoreError::SchemaMismatch { details } = err else {
            panic!("expected SchemaMismatch, got {err}");
        };
        assert!(details.contains("Front!AF3"));
        assert!(details.contains("non-negative"));
    }

    #[test]
    fn misaligned_sheet_is_one_diagnostic() {
        let empty = SheetSnapshot::new(Vec::new(), Vec::new());
        let err = extract_character(
            "https://docs.google.com/spreadsheets/d/abc123",
            &empty,
            &back_fixture(),
            &data_fixture(),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::SchemaMismatch { .. }));
    }

    #[test]
    fn backend_errors_collapse_to_invalid_sheet() {
        let url = "https://docs.google.com/spreadsheets/d/abc123";
        let err = collapse_load_error(
            url,
            CoreError::Sheets(gsheets_client::SheetsClientError::SpreadsheetNotFound(
                "abc123".to_string(),
            )),
        );
        let CoreError::InvalidSheet { url: reported } = err else {
            panic!("expected InvalidSheet");
        };
        assert_eq!(reported, url);
    }

    #[test]
    fn schema_errors_pass_through_collapse() {
        let err = collapse_load_error(
            "https://docs.google.com/spreadsheets/d/abc123",
            CoreError::SchemaMismatch {
                details: "Front!B1 (name): cell out of bounds".to_string(),
            },
        );
        assert!(matches!(err, CoreError::SchemaMismatch { .. }));
    }
}
