use crate::error::{CoreError, Result};
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_DICE: u32 = 100;
pub const MAX_SIDES: u32 = 1000;

static DICE_RE: OnceLock<Regex> = OnceLock::new();

fn dice_re() -> &'static Regex {
    DICE_RE.get_or_init(|| Regex::new(r"^([0-9]*)d([0-9]+)([+-][0-9]+)?$").unwrap())
}

/// A parsed dice expression like `2d6+1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceExpr {
    pub count: u32,
    pub sides: u32,
    pub modifier: i64,
}

impl DiceExpr {
    pub fn parse(s: &str) -> Result<Self> {
        let input = s.trim().to_ascii_lowercase();
        let caps = dice_re()
            .captures(&input)
            .ok_or_else(|| CoreError::InvalidDice(s.to_string()))?;
        let count: u32 = if caps[1].is_empty() {
            1
        } else {
            caps[1].parse().map_err(|_| CoreError::InvalidDice(s.to_string()))?
        };
        let sides: u32 = caps[2]
            .parse()
            .map_err(|_| CoreError::InvalidDice(s.to_string()))?;
        let modifier: i64 = match caps.get(3) {
            Some(m) => m
                .as_str()
                .parse()
                .map_err(|_| CoreError::InvalidDice(s.to_string()))?,
            None => 0,
        };
        if count == 0 || count > MAX_DICE || sides < 2 || sides > MAX_SIDES {
            return Err(CoreError::InvalidDice(s.to_string()));
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Roll the dice, returning one result per die. The flat modifier is not
    /// included; callers fold it into their totals.
    pub fn roll_with(&self, rng: &mut impl Rng) -> Vec<i64> {
        (0..self.count)
            .map(|_| rng.gen_range(1..=i64::from(self.sides)))
            .collect()
    }

    pub fn roll(&self) -> Vec<i64> {
        self.roll_with(&mut rand::thread_rng())
    }
}
