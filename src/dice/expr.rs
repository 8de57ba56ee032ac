//! `NdM[±K]` dice expressions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::error::DiceError;

/// Upper bound on the dice count of a single expression.
pub const MAX_DICE: u32 = 1000;

/// A parsed dice expression: roll `count` dice with `sides` faces and add
/// `modifier`.
///
/// ## Syntax
///
/// `<count>d<sides>` optionally followed by whitespace and a signed
/// modifier: `1d20`, `1d6 +1`, `1d20 -4`, `2d4+3`. The sign must touch its
/// digits. Surrounding whitespace is ignored and `D` is accepted for `d`.
///
/// ```
/// use skirmish::dice::DiceExpr;
///
/// let expr: DiceExpr = "1d20 -4".parse().unwrap();
/// assert_eq!(expr, DiceExpr::new(1, 20, -4).unwrap());
/// assert_eq!((expr.min(), expr.max()), (-3, 16));
/// assert_eq!(expr.to_string(), "1d20 -4");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiceExpr {
    count: u32,
    sides: u32,
    modifier: i32,
}

impl DiceExpr {
    /// Create an expression, rejecting zero-sided dice and absurd counts.
    pub fn new(count: u32, sides: u32, modifier: i32) -> Result<Self, DiceError> {
        if sides == 0 {
            return Err(DiceError::ZeroSides);
        }
        if count > MAX_DICE {
            return Err(DiceError::TooManyDice {
                count,
                max: MAX_DICE,
            });
        }
        Ok(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Parse dice notation.
    pub fn parse(text: &str) -> Result<Self, DiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DiceError::Empty);
        }

        let (count_part, rest) = text
            .split_once(['d', 'D'])
            .ok_or_else(|| DiceError::MissingSeparator(text.to_string()))?;
        let count = parse_digits(count_part).ok_or_else(|| DiceError::InvalidCount(count_part.to_string()))?;

        let sides_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let (sides_part, tail) = rest.split_at(sides_end);
        let sides = parse_digits(sides_part).ok_or_else(|| DiceError::InvalidSides(sides_part.to_string()))?;

        let tail = tail.trim_start();
        let modifier = if tail.is_empty() {
            0
        } else {
            parse_modifier(tail).ok_or_else(|| DiceError::InvalidModifier(tail.to_string()))?
        };

        Self::new(count, sides, modifier)
    }

    /// Number of dice.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Faces per die.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Flat modifier added to the dice total.
    #[must_use]
    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    /// Smallest possible result.
    #[must_use]
    pub fn min(&self) -> i32 {
        saturate(i64::from(self.count) + i64::from(self.modifier))
    }

    /// Largest possible result.
    #[must_use]
    pub fn max(&self) -> i32 {
        saturate(i64::from(self.count) * i64::from(self.sides) + i64::from(self.modifier))
    }

    /// Roll the expression.
    pub fn roll(&self, rng: &mut GameRng) -> i32 {
        let total: i64 = (0..self.count).map(|_| i64::from(rng.roll_die(self.sides))).sum();
        saturate(total + i64::from(self.modifier))
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn parse_digits(text: &str) -> Option<u32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn parse_modifier(text: &str) -> Option<i32> {
    let (sign, digits) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<i32>().ok().map(|v| sign * v)
}

impl FromStr for DiceExpr {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DiceExpr {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DiceExpr> for String {
    fn from(expr: DiceExpr) -> Self {
        expr.to_string()
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.modifier != 0 {
            write!(f, " {:+}", self.modifier)?;
        }
        Ok(())
    }
}

/// Roll dice notation leniently: malformed text rolls 0.
///
/// ```
/// use skirmish::core::GameRng;
/// use skirmish::dice::roll_dice;
///
/// let mut rng = GameRng::new(1);
/// assert_eq!(roll_dice("banana", &mut rng), 0);
/// assert!((2..=7).contains(&roll_dice("1d6 +1", &mut rng)));
/// ```
pub fn roll_dice(text: &str, rng: &mut GameRng) -> i32 {
    match DiceExpr::parse(text) {
        Ok(expr) => expr.roll(rng),
        Err(err) => {
            tracing::debug!(%err, text, "unparseable dice expression rolls 0");
            0
        }
    }
}
