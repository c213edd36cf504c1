use crate::error::{CoreError, Result};
use crate::schema::title_case;
use crate::snapshot::SheetSnapshot;
use std::collections::BTreeMap;

/// Worksheet tab holding the campaign's monster entries.
pub const DM_TAB: &str = "MonsterDex";

const NAME_RANGE: &str = "A2:A322";
const DESC_RANGE: &str = "B2:B322";

/// The campaign monster directory, rebuilt wholesale on every reload.
#[derive(Debug, Clone, Default)]
pub struct MonsterDex {
    monsters: BTreeMap<String, String>,
}

impl MonsterDex {
    /// Build the directory from the DM sheet's snapshot: names from column A,
    /// descriptions from column B, names title-cased for lookup.
    pub fn from_snapshot(snap: &SheetSnapshot) -> Result<Self> {
        let names = snap.value_range(NAME_RANGE)?;
        let descs = snap.value_range(DESC_RANGE)?;
        let monsters = names
            .into_iter()
            .zip(descs)
            .filter(|(name, _)| !name.trim().is_empty())
            .map(|(name, desc)| (title_case(&name), desc))
            .collect();
        Ok(Self { monsters })
    }

    /// Case-insensitive lookup by monster name.
    pub fn lookup(&self, name: &str) -> Result<&str> {
        self.monsters
            .get(&title_case(name))
            .map(String::as_str)
            .ok_or_else(|| CoreError::UnknownMonster(name.to_string()))
    }

    /// All monster names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.monsters.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dex() -> MonsterDex {
        let mut grid = vec![vec!["Name".to_string(), "Description".to_string()]];
        for (name, desc) in [
            ("dire wolf", "A wolf, but dire."),
            ("GOBLIN KING", "Wears a very small crown."),
            ("", "row left blank in the sheet"),
            ("mimic", "Probably a chest."),
            ("will-o'-wisp", "A floating light, hungry."),
        ] {
            grid.push(vec![name.to_string(), desc.to_string()]);
        }
        let snap = SheetSnapshot::new(grid.clone(), grid);
        MonsterDex::from_snapshot(&snap).unwrap()
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let d = dex();
        assert_eq!(d.lookup("dire wolf").unwrap(), "A wolf, but dire.");
        assert_eq!(d.lookup("DIRE WOLF").unwrap(), "A wolf, but dire.");
        assert_eq!(d.lookup("Goblin King").unwrap(), "Wears a very small crown.");
        assert_eq!(d.lookup("WILL-O'-WISP").unwrap(), "A floating light, hungry.");
    }

    #[test]
    fn unknown_monster() {
        assert!(matches!(
            dex().lookup("tarrasque"),
            Err(CoreError::UnknownMonster(_))
        ));
    }

    #[test]
    fn blank_rows_are_dropped() {
        let d = dex();
        assert_eq!(d.len(), 4);
    }

    #[test]
    fn names_are_sorted_title_case() {
        assert_eq!(
            dex().names(),
            vec!["Dire Wolf", "Goblin King", "Mimic", "Will-O'-Wisp"]
        );
    }
}
