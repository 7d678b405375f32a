//! Acceptance criteria for ratios

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerable loss when judging an optimized value against its reference
///
/// Loss is measured in the metric's bad direction; gains always pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "value")]
pub enum Tolerance {
    /// Loss as a fraction of the reference (`0.01` = 1% relative loss)
    Relative(f64),
    /// Loss in metric units
    Absolute(f64),
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Relative(0.01)
    }
}

impl Tolerance {
    /// Whether `loss` (non-negative, in metric units) is acceptable against `reference`
    pub fn accepts(&self, loss: f64, reference: f64) -> bool {
        if loss <= 0.0 {
            return true;
        }
        match self {
            Tolerance::Relative(limit) => reference != 0.0 && loss / reference.abs() <= *limit,
            Tolerance::Absolute(limit) => loss <= *limit,
        }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tolerance::Relative(v) => write!(f, "relative {:.2}%", v * 100.0),
            Tolerance::Absolute(v) => write!(f, "absolute {v}"),
        }
    }
}

impl std::str::FromStr for Tolerance {
    type Err = String;

    /// `1%` or `0.01` is relative; `abs:0.5` is absolute
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |v: &str| {
            v.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| format!("Invalid tolerance: {s}. Use a value like 1%, 0.01 or abs:0.5"))
        };

        if let Some(v) = s.strip_prefix("abs:") {
            Ok(Tolerance::Absolute(parse(v)?))
        } else if let Some(v) = s.strip_suffix('%') {
            Ok(Tolerance::Relative(parse(v)? / 100.0))
        } else {
            Ok(Tolerance::Relative(parse(s)?))
        }
    }
}
