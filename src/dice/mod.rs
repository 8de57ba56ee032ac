//! Dice notation and effect magnitudes.
//!
//! Numbers on character sheets are either flat (`3`) or dice notation
//! (`"1d6 +1"`). [`Magnitude`] covers both and is what effect definitions
//! store; [`DiceExpr`] is the parsed dice form.
//!
//! ```
//! use skirmish::core::GameRng;
//! use skirmish::dice::Magnitude;
//!
//! let flat: Magnitude = serde_json::from_str("3").unwrap();
//! let dice: Magnitude = serde_json::from_str("\"1d4\"").unwrap();
//!
//! let mut rng = GameRng::new(0);
//! assert_eq!(flat.evaluate(&mut rng), 3);
//! assert!((1..=4).contains(&dice.evaluate(&mut rng)));
//! ```

pub mod expr;

pub use expr::{roll_dice, DiceExpr, MAX_DICE};

use serde::{Deserialize, Serialize};

use crate::core::GameRng;
use crate::error::DiceError;

/// A number that is either fixed or rolled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Magnitude {
    /// A fixed value.
    Flat(i32),
    /// A value rolled each time it is evaluated.
    Dice(DiceExpr),
}

impl Magnitude {
    /// Parse dice notation into a rolled magnitude.
    pub fn dice(text: &str) -> Result<Self, DiceError> {
        DiceExpr::parse(text).map(Self::Dice)
    }

    /// Produce a value, rolling if needed.
    pub fn evaluate(&self, rng: &mut GameRng) -> i32 {
        match self {
            Self::Flat(v) => *v,
            Self::Dice(expr) => expr.roll(rng),
        }
    }

    /// Smallest value `evaluate` can produce.
    #[must_use]
    pub fn min(&self) -> i32 {
        match self {
            Self::Flat(v) => *v,
            Self::Dice(expr) => expr.min(),
        }
    }

    /// Largest value `evaluate` can produce.
    #[must_use]
    pub fn max(&self) -> i32 {
        match self {
            Self::Flat(v) => *v,
            Self::Dice(expr) => expr.max(),
        }
    }
}

impl Default for Magnitude {
    fn default() -> Self {
        Self::Flat(0)
    }
}

impl From<i32> for Magnitude {
    fn from(value: i32) -> Self {
        Self::Flat(value)
    }
}

impl From<DiceExpr> for Magnitude {
    fn from(expr: DiceExpr) -> Self {
        Self::Dice(expr)
    }
}

impl std::fmt::Display for Magnitude {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat(v) => write!(f, "{v}"),
            Self::Dice(expr) => write!(f, "{expr}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_is_constant() {
        let mut rng = GameRng::new(4);
        let m = Magnitude::from(5);
        assert!((0..20).all(|_| m.evaluate(&mut rng) == 5));
        assert_eq!((m.min(), m.max()), (5, 5));
    }

    #[test]
    fn test_dice_bounds() {
        let m = Magnitude::dice("1d6 +1").unwrap();
        assert_eq!((m.min(), m.max()), (2, 7));
        assert!(Magnitude::dice("nope").is_err());
    }

    #[test]
    fn test_untagged_serde() {
        let values: Vec<Magnitude> = serde_json::from_str(r#"[2, "1d20 -4"]"#).unwrap();
        assert_eq!(values[0], Magnitude::Flat(2));
        assert_eq!(values[1], Magnitude::dice("1d20 -4").unwrap());
        assert_eq!(serde_json::to_string(&values).unwrap(), r#"[2,"1d20 -4"]"#);
    }
}
