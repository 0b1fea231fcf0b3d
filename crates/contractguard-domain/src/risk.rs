//! Risk module - the 0-10 risk score and the signing recommendation

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Risk score on a 0-10 scale (10 = extremely risky)
///
/// The value is clamped on construction, so gauge arithmetic downstream
/// never sees anything outside the range even when the oracle answers 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RiskScore(u8);

impl RiskScore {
    /// Highest representable score
    pub const MAX: u8 = 10;

    /// Create a score, clamping into [0, 10]
    ///
    /// # Examples
    ///
    /// ```
    /// use contractguard_domain::RiskScore;
    ///
    /// assert_eq!(RiskScore::new(11).value(), 10);
    /// assert_eq!(RiskScore::new(-3).value(), 0);
    /// assert_eq!(RiskScore::new(7).value(), 7);
    /// ```
    pub fn new(value: i64) -> Self {
        Self(value.clamp(0, Self::MAX as i64) as u8)
    }

    /// Create a score from a float, rounding to the nearest integer
    ///
    /// Non-finite input yields `None`.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let clamped = value.round().clamp(0.0, Self::MAX as f64);
        Some(Self(clamped as u8))
    }

    /// Parse a score from text such as `"7"`, `"7.5"` or `"7/10"`
    pub fn parse(s: &str) -> Option<Self> {
        let head = s.trim().split('/').next().unwrap_or("").trim();
        head.parse::<f64>().ok().and_then(Self::from_f64)
    }

    /// Get the raw value
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RiskScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

struct RiskScoreVisitor;

impl<'de> Visitor<'de> for RiskScoreVisitor {
    type Value = RiskScore;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a numeric risk score")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<RiskScore, E> {
        Ok(RiskScore::new(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<RiskScore, E> {
        Ok(RiskScore::new(v.min(i64::MAX as u64) as i64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<RiskScore, E> {
        RiskScore::from_f64(v).ok_or_else(|| E::custom("risk score is not a finite number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<RiskScore, E> {
        RiskScore::parse(v).ok_or_else(|| E::custom(format!("invalid risk score: {:?}", v)))
    }
}

impl<'de> Deserialize<'de> for RiskScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RiskScoreVisitor)
    }
}

/// Overall recommendation for the person about to sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    /// The contract is reasonable as written
    Sign,
    /// Sign only after the flagged clauses are changed
    Negotiate,
    /// Walk away
    Reject,
    /// Automated analysis was inconclusive; a human should review
    Review,
}

impl Recommendation {
    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Sign => "SIGN",
            Recommendation::Negotiate => "NEGOTIATE",
            Recommendation::Reject => "REJECT",
            Recommendation::Review => "REVIEW",
        }
    }

    /// Parse a recommendation, strictly
    ///
    /// Case-insensitive. `AVOID` is the oracle's synonym for `REJECT`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SIGN" => Some(Recommendation::Sign),
            "NEGOTIATE" => Some(Recommendation::Negotiate),
            "REJECT" | "AVOID" => Some(Recommendation::Reject),
            "REVIEW" => Some(Recommendation::Review),
            _ => None,
        }
    }

    /// Parse a recommendation, mapping anything unrecognized to `Review`
    pub fn parse_lenient(s: &str) -> Self {
        Self::parse(s).unwrap_or(Recommendation::Review)
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Recommendation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Recommendation::parse_lenient(&raw))
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: any integer input lands inside [0, 10]
        #[test]
        fn test_score_always_in_range(raw in any::<i64>()) {
            let score = RiskScore::new(raw);
            prop_assert!(score.value() <= RiskScore::MAX);
        }

        /// Property: in-range values are preserved exactly
        #[test]
        fn test_in_range_preserved(raw in 0i64..=10) {
            prop_assert_eq!(RiskScore::new(raw).value() as i64, raw);
        }

        /// Property: finite floats never escape the range
        #[test]
        fn test_float_score_in_range(raw in -1.0e9f64..1.0e9f64) {
            let score = RiskScore::from_f64(raw).unwrap();
            prop_assert!(score.value() <= RiskScore::MAX);
        }
    }
}
