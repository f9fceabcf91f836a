//! Recommendation, confidence and classification results.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::candidate::{StrikeBand, TradeCandidate};

/// Trade action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    /// Open a long position.
    Buy,
    /// Premium decays too fast to hold long.
    Sell,
    /// No action.
    Hold,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
            Self::Hold => "HOLD",
        })
    }
}

/// Confidence tier, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Confidence {
    /// Lowest tier.
    Low,
    /// Middle tier.
    Medium,
    /// Highest tier.
    High,
}

impl Confidence {
    /// One tier up, saturating at `High`.
    #[must_use]
    pub const fn raise(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium | Self::High => Self::High,
        }
    }

    /// One tier down, saturating at `Low`.
    #[must_use]
    pub const fn lower(self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium | Self::Low => Self::Low,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

/// Outcome of classifying one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Action.
    pub recommendation: Recommendation,
    /// Present only for `Buy`.
    pub confidence: Option<Confidence>,
    /// Strike band the rules were taken from.
    pub band: StrikeBand,
    /// Human-readable explanation.
    pub rationale: String,
}

impl Classification {
    /// Whether this is a BUY with a confidence tier.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        matches!(self.recommendation, Recommendation::Buy) && self.confidence.is_some()
    }
}

/// A BUY candidate surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionableTrade {
    /// The candidate.
    pub candidate: TradeCandidate,
    /// Its classification (always a BUY).
    pub classification: Classification,
}

impl ActionableTrade {
    /// Confidence tier; `Low` if somehow missing.
    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.classification.confidence.unwrap_or(Confidence::Low)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_tiers_saturate() {
        assert_eq!(Confidence::Medium.raise(), Confidence::High);
        assert_eq!(Confidence::High.raise(), Confidence::High);
        assert_eq!(Confidence::High.lower(), Confidence::Medium);
        assert_eq!(Confidence::Low.lower(), Confidence::Low);
        assert!(Confidence::High > Confidence::Medium);
        assert!(Confidence::Medium > Confidence::Low);
    }

    #[test]
    fn wire_names_are_upper_case() {
        assert_eq!(serde_json::to_string(&Recommendation::Buy).unwrap(), "\"BUY\"");
        assert_eq!(
            serde_json::to_string(&Confidence::Medium).unwrap(),
            "\"MEDIUM\""
        );
        assert_eq!(serde_json::to_string(&StrikeBand::Otm).unwrap(), "\"OTM\"");
    }
}
