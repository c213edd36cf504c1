use crate::dice::DiceExpr;
use crate::error::Result;
use crate::inventory::Inventory;
use crate::stats::{Ability, StatBlock};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Subject/object/reflexive pronouns, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounSet {
    pub subject: String,
    pub object: String,
    pub reflexive: String,
}

impl PronounSet {
    /// Parse an override string like `he/him/himself`.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        match parts.as_slice() {
            [subject, object, reflexive]
                if !subject.is_empty() && !object.is_empty() && !reflexive.is_empty() =>
            {
                Some(Self {
                    subject: subject.to_lowercase(),
                    object: object.to_lowercase(),
                    reflexive: reflexive.to_lowercase(),
                })
            }
            _ => None,
        }
    }

    pub fn masculine() -> Self {
        Self {
            subject: "he".into(),
            object: "him".into(),
            reflexive: "himself".into(),
        }
    }

    pub fn feminine() -> Self {
        Self {
            subject: "she".into(),
            object: "her".into(),
            reflexive: "herself".into(),
        }
    }

    pub fn neutral() -> Self {
        Self {
            subject: "they".into(),
            object: "them".into(),
            reflexive: "themselves".into(),
        }
    }
}

/// Conjugations of "to be" and "to have" matching the pronoun set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerbSet {
    pub be: String,
    pub have: String,
}

impl VerbSet {
    /// Parse an override string like `is/has`.
    pub fn parse(s: &str) -> Option<Self> {
        let (be, have) = s.trim().split_once('/')?;
        if be.is_empty() || have.is_empty() || have.contains('/') {
            return None;
        }
        Some(Self {
            be: be.to_lowercase(),
            have: have.to_lowercase(),
        })
    }

    pub fn singular() -> Self {
        Self {
            be: "is".into(),
            have: "has".into(),
        }
    }

    pub fn plural() -> Self {
        Self {
            be: "are".into(),
            have: "have".into(),
        }
    }
}

/// Default pronoun and verb sets for a sheet's gender field.
pub fn defaults_for_gender(gender: &str) -> (PronounSet, VerbSet) {
    match gender {
        "male" => (PronounSet::masculine(), VerbSet::singular()),
        "female" => (PronounSet::feminine(), VerbSet::singular()),
        _ => (PronounSet::neutral(), VerbSet::plural()),
    }
}

/// The outcome of one dice roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Roll {
    /// Sum of the dice plus the modifier.
    pub total: i64,
    /// Individual die results.
    pub rolls: Vec<i64>,
    /// Flat modifier folded into the total (dice expression + stat + extra).
    pub modifier: i64,
}

/// Everything extracted from one linked character sheet, plus the local
/// state (inventory, overrides) layered on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub sheet_url: String,
    pub name: String,
    pub race: String,
    pub size: String,
    pub hair: String,
    pub eyes: String,
    pub height: String,
    pub weight: String,
    pub age: u32,
    pub level: u32,
    pub gender: String,
    pub image: String,
    pub feet_per_move: u32,
    pub pronouns: PronounSet,
    pub verbs: VerbSet,
    #[serde(default)]
    pub pronoun_override: Option<PronounSet>,
    #[serde(default)]
    pub verb_override: Option<VerbSet>,
    pub stats: StatBlock,
    #[serde(default)]
    pub inventory: Inventory,
    pub linked_at: DateTime<Utc>,
}

impl Character {
    /// Squares of movement per turn (a square is 5 feet).
    pub fn squares_per_move(&self) -> f64 {
        f64::from(self.feet_per_move) / 5.0
    }

    /// The one-paragraph description sentence, computed on demand.
    pub fn description(&self) -> String {
        let subject = capitalize(&self.pronouns.subject);
        format!(
            "{} {} a {} year old {} level {} {}. {} {} {} and weighs {}. \
             {} also {} {} hair and {} eyes.",
            self.name,
            self.verbs.be,
            self.age,
            self.gender,
            self.level,
            self.race,
            subject,
            self.verbs.be,
            self.height,
            self.weight,
            subject,
            self.verbs.have,
            self.hair,
            self.eyes,
        )
    }

    /// Roll dice with an optional stat modifier and a flat extra modifier.
    pub fn roll(&self, dice: &str, stat: Option<Ability>, extra: i64) -> Result<Roll> {
        self.roll_with(&mut rand::thread_rng(), dice, stat, extra)
    }

    pub fn roll_with(
        &self,
        rng: &mut impl Rng,
        dice: &str,
        stat: Option<Ability>,
        extra: i64,
    ) -> Result<Roll> {
        let expr = DiceExpr::parse(dice)?;
        let rolls = expr.roll_with(rng);
        let stat_mod = stat.map(|a| self.stats.modifier(a)).unwrap_or(0);
        let modifier = expr.modifier + stat_mod + extra;
        let total = rolls.iter().sum::<i64>() + modifier;
        Ok(Roll {
            total,
            rolls,
            modifier,
        })
    }

    /// Whether the character is over their carrying capacity, counting coin
    /// weight when the sheet's coin-encumbrance rule is on.
    pub fn encumbered(&self) -> bool {
        let mut carried = self.inventory.carried_weight();
        if self.stats.coin_encumbered {
            carried += self.stats.coin_weight() as f64;
        }
        carried > (self.stats.strength * 15) as f64
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
