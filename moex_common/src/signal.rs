//! Quote classifier.
//!
//! Maps a signed percent change to a trading signal and a strength tier. The strong
//! thresholds are strict, so a change of exactly `2` or `-2` lands in the weaker tier,
//! and so on down to the `HOLD` band `[-1, 1]`.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Recommendation derived from a price move.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Confidence bucket attached to a `Signal`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Strength {
    Strong,
    Medium,
    Weak,
}

const STRONG: f64 = 2.0;
const MEDIUM: f64 = 1.0;

/// Classify a percent change.
///
/// Total over `f64`: NaN satisfies no comparison and ends up as `(Hold, Weak)`.
pub fn classify(change_percent: f64) -> (Signal, Strength) {
    if change_percent > STRONG {
        (Signal::Buy, Strength::Strong)
    } else if change_percent > MEDIUM {
        (Signal::Buy, Strength::Medium)
    } else if change_percent < -STRONG {
        (Signal::Sell, Strength::Strong)
    } else if change_percent < -MEDIUM {
        (Signal::Sell, Strength::Medium)
    } else {
        (Signal::Hold, Strength::Weak)
    }
}
