//! Color-coded risk gauge

use contractguard_domain::RiskScore;
use std::fmt;

/// Coarse risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    /// 0-3
    Low,
    /// 4-6
    Moderate,
    /// 7-10
    High,
}

impl RiskLevel {
    /// Band for a score
    pub fn for_score(score: RiskScore) -> Self {
        match score.value() {
            0..=3 => RiskLevel::Low,
            4..=6 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Moderate => "MODERATE",
            RiskLevel::High => "HIGH",
        }
    }

    /// CSS color
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#22c55e",
            RiskLevel::Moderate => "#f59e0b",
            RiskLevel::High => "#ef4444",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Gauge state for one risk score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskGauge {
    score: RiskScore,
    level: RiskLevel,
}

impl RiskGauge {
    /// Build a gauge
    ///
    /// ```
    /// use contractguard_domain::RiskScore;
    /// use contractguard_report::RiskGauge;
    ///
    /// let gauge = RiskGauge::new(RiskScore::new(11));
    /// assert_eq!(gauge.percent(), 100);
    /// assert_eq!(gauge.color(), "#ef4444");
    /// ```
    pub fn new(score: RiskScore) -> Self {
        Self {
            score,
            level: RiskLevel::for_score(score),
        }
    }

    /// The (clamped) score
    pub fn score(&self) -> RiskScore {
        self.score
    }

    /// Risk band
    pub fn level(&self) -> RiskLevel {
        self.level
    }

    /// Fill percentage, 0-100
    pub fn percent(&self) -> u8 {
        self.score.value().saturating_mul(10).min(100)
    }

    /// CSS color for the fill
    pub fn color(&self) -> &'static str {
        self.level.color()
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        self.level.label()
    }
}
