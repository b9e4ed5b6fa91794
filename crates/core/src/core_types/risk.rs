//! Ordered hazard levels shared by the blast and leak-detection assessors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative hazard level.
///
/// Totally ordered: `None < Low < Moderate < High < Extreme`, so levels can be
/// compared, combined with `max`, and escalated one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum RiskLevel {
    /// No hazard of this kind
    #[default]
    None = 0,
    /// Hazard present but well below action thresholds
    Low = 1,
    /// Precautions warranted
    Moderate = 2,
    /// Immediate protective action warranted
    High = 3,
    /// Life-threatening
    Extreme = 4,
}

impl RiskLevel {
    /// All levels in ascending order
    pub const ALL: [RiskLevel; 5] = [
        RiskLevel::None,
        RiskLevel::Low,
        RiskLevel::Moderate,
        RiskLevel::High,
        RiskLevel::Extreme,
    ];

    /// One level higher, saturating at `Extreme`
    #[must_use]
    pub fn escalate(self) -> Self {
        match self {
            RiskLevel::None => RiskLevel::Low,
            RiskLevel::Low => RiskLevel::Moderate,
            RiskLevel::Moderate => RiskLevel::High,
            RiskLevel::High | RiskLevel::Extreme => RiskLevel::Extreme,
        }
    }

    /// One level lower, saturating at `None`
    #[must_use]
    pub fn demote(self) -> Self {
        match self {
            RiskLevel::None | RiskLevel::Low => RiskLevel::None,
            RiskLevel::Moderate => RiskLevel::Low,
            RiskLevel::High => RiskLevel::Moderate,
            RiskLevel::Extreme => RiskLevel::High,
        }
    }

    /// Convert from u8 (0 = None ... 4 = Extreme)
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Low),
            2 => Some(Self::Moderate),
            3 => Some(Self::High),
            4 => Some(Self::Extreme),
            _ => None,
        }
    }

    /// Convert to u8
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::None => "None",
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::Extreme => "Extreme",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
