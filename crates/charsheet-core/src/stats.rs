use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ability {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Ability::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownAbility(s.to_string()))
    }
}

/// Ability scores, modifiers, and wealth, extracted once per sheet load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatBlock {
    pub strength: i64,
    pub dexterity: i64,
    pub constitution: i64,
    pub intelligence: i64,
    pub wisdom: i64,
    pub charisma: i64,
    pub strength_mod: i64,
    pub dexterity_mod: i64,
    pub constitution_mod: i64,
    pub intelligence_mod: i64,
    pub wisdom_mod: i64,
    pub charisma_mod: i64,
    pub total_currency: i64,
    pub total_wealth: i64,
    pub coin_encumbered: bool,
    pub encumbrance: String,
}

impl StatBlock {
    pub fn score(&self, ability: Ability) -> i64 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i64 {
        match ability {
            Ability::Strength => self.strength_mod,
            Ability::Dexterity => self.dexterity_mod,
            Ability::Constitution => self.constitution_mod,
            Ability::Intelligence => self.intelligence_mod,
            Ability::Wisdom => self.wisdom_mod,
            Ability::Charisma => self.charisma_mod,
        }
    }

    /// Carried weight of coinage: one unit per started thousand of currency.
    pub fn coin_weight(&self) -> i64 {
        let q = self.total_currency.div_euclid(1000);
        if self.total_currency.rem_euclid(1000) > 0 {
            q + 1
        } else {
            q
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> StatBlock {
        StatBlock {
            strength: 14,
            dexterity: 16,
            constitution: 12,
            intelligence: 10,
            wisdom: 13,
            charisma: 11,
            strength_mod: 2,
            dexterity_mod: 3,
            constitution_mod: 1,
            intelligence_mod: 0,
            wisdom_mod: 1,
            charisma_mod: 0,
            total_currency: 12_500,
            total_wealth: 14_000,
            coin_encumbered: true,
            encumbrance: "Light".to_string(),
        }
    }

    #[test]
    fn score_and_modifier_tables() {
        let b = block();
        assert_eq!(b.score(Ability::Strength), 14);
        assert_eq!(b.score(Ability::Charisma), 11);
        assert_eq!(b.modifier(Ability::Dexterity), 3);
        assert_eq!(b.modifier(Ability::Intelligence), 0);
    }

    #[test]
    fn ability_from_str() {
        assert_eq!("strength".parse::<Ability>().unwrap(), Ability::Strength);
        assert_eq!(" WISDOM ".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert!(matches!(
            "luck".parse::<Ability>(),
            Err(CoreError::UnknownAbility(_))
        ));
    }

    #[test]
    fn coin_weight_rounds_up() {
        let mut b = block();
        for (currency, expected) in [(0, 0), (1, 1), (999, 1), (1000, 1), (1001, 2), (12_500, 13)]
        {
            b.total_currency = currency;
            assert_eq!(b.coin_weight(), expected, "currency {currency}");
        }
    }
}
