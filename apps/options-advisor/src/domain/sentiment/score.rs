//! Sentiment score value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pricing::OptionKind;

/// Net score above which sentiment is bullish (below the negation, bearish).
const DIRECTIONAL_THRESHOLD: f64 = 5.0;
/// Net score magnitude beyond which sentiment is strong.
const STRONG_THRESHOLD: f64 = 15.0;

/// Direction of a single factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FactorImpact {
    /// Supports higher prices.
    Positive,
    /// Supports lower prices.
    Negative,
    /// No directional bias; still counts toward total weight.
    Neutral,
}

/// A named market factor with an importance weight (1 to 10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketFactor {
    /// Factor name (e.g. "FII net buying").
    pub name: String,
    /// Importance, 10 for market-moving flows.
    pub weight: u8,
    /// Direction.
    #[serde(alias = "sentiment")]
    pub impact: FactorImpact,
}

impl MarketFactor {
    /// Create a factor.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: u8, impact: FactorImpact) -> Self {
        Self {
            name: name.into(),
            weight,
            impact,
        }
    }
}

/// Overall market direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SentimentClassification {
    /// Net score above +5.
    Bullish,
    /// Net score below -5.
    Bearish,
    /// Anything in between.
    Neutral,
}

impl fmt::Display for SentimentClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
            Self::Neutral => "NEUTRAL",
        })
    }
}

/// How decisive the classification is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentStrength {
    /// Beyond ±15.
    Strong,
    /// Beyond ±5.
    Moderate,
    /// Neutral band.
    Weak,
}

/// Weighted market sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScore {
    /// Net score in `[-100, 100]`.
    pub net_score: f64,
    /// Direction derived from `net_score`.
    pub classification: SentimentClassification,
    /// Strength derived from `net_score`.
    pub strength: SentimentStrength,
}

impl Default for SentimentScore {
    fn default() -> Self {
        Self::neutral()
    }
}

impl SentimentScore {
    /// Classify a precomputed net score.
    #[must_use]
    pub fn new(net_score: f64) -> Self {
        let (classification, strength) = if net_score > STRONG_THRESHOLD {
            (SentimentClassification::Bullish, SentimentStrength::Strong)
        } else if net_score > DIRECTIONAL_THRESHOLD {
            (SentimentClassification::Bullish, SentimentStrength::Moderate)
        } else if net_score < -STRONG_THRESHOLD {
            (SentimentClassification::Bearish, SentimentStrength::Strong)
        } else if net_score < -DIRECTIONAL_THRESHOLD {
            (SentimentClassification::Bearish, SentimentStrength::Moderate)
        } else {
            (SentimentClassification::Neutral, SentimentStrength::Weak)
        };

        Self {
            net_score,
            classification,
            strength,
        }
    }

    /// Neutral sentiment with a zero score.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            net_score: 0.0,
            classification: SentimentClassification::Neutral,
            strength: SentimentStrength::Weak,
        }
    }

    /// Aggregate factors: `(Σpositive - Σnegative) / Σweight × 100`.
    ///
    /// An empty list, or one whose weights sum to zero, is neutral.
    #[must_use]
    pub fn from_factors(factors: &[MarketFactor]) -> Self {
        let (mut positive, mut negative, mut total) = (0u32, 0u32, 0u32);
        for factor in factors {
            let weight = u32::from(factor.weight);
            total += weight;
            match factor.impact {
                FactorImpact::Positive => positive += weight,
                FactorImpact::Negative => negative += weight,
                FactorImpact::Neutral => {}
            }
        }

        if total == 0 {
            return Self::neutral();
        }

        let net = (f64::from(positive) - f64::from(negative)) / f64::from(total) * 100.0;
        Self::new(net)
    }

    /// Whether a long position of `kind` goes with the market direction.
    #[must_use]
    pub fn favors(&self, kind: OptionKind) -> bool {
        matches!(
            (self.classification, kind),
            (SentimentClassification::Bullish, OptionKind::Call)
                | (SentimentClassification::Bearish, OptionKind::Put)
        )
    }

    /// Whether a long position of `kind` fights the market direction.
    #[must_use]
    pub fn opposes(&self, kind: OptionKind) -> bool {
        matches!(
            (self.classification, kind),
            (SentimentClassification::Bullish, OptionKind::Put)
                | (SentimentClassification::Bearish, OptionKind::Call)
        )
    }
}
