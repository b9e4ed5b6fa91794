//! Shelter-in-place versus evacuation.
//!
//! Evacuation is scored by how the time needed to clear the area compares
//! with the significant-exposure budget (10 minutes by default). Sheltering
//! is scored by how readily the chemical infiltrates a closed building:
//! low-boiling gases penetrate, high-boiling vapors are held out.

use crate::chemistry::ChemicalRecord;
use crate::core_types::ReleaseScenario;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default minutes of exposure before harm becomes significant
pub const DEFAULT_EXPOSURE_BUDGET_MIN: f64 = 10.0;

/// Share of shelter effectiveness realised as casualty reduction
const SHELTER_CASUALTY_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtectiveActionKind {
    Evacuation,
    ShelterInPlace,
}

impl fmt::Display for ProtectiveActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProtectiveActionKind::Evacuation => "Evacuation",
            ProtectiveActionKind::ShelterInPlace => "Shelter in place",
        })
    }
}

/// How completely an evacuation beats the exposure budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvacuationTier {
    /// Completed within the budget
    Full,
    /// Completed within twice the budget
    Partial,
    /// Too slow to prevent significant exposure
    Insufficient,
}

impl EvacuationTier {
    #[must_use]
    pub fn classify(evacuation_time_min: f64, budget_min: f64) -> Self {
        if evacuation_time_min <= budget_min {
            EvacuationTier::Full
        } else if evacuation_time_min <= 2.0 * budget_min {
            EvacuationTier::Partial
        } else {
            EvacuationTier::Insufficient
        }
    }

    /// `(effectiveness %, casualty reduction %)`
    #[must_use]
    pub fn scores(self) -> (f64, f64) {
        match self {
            EvacuationTier::Full => (95.0, 90.0),
            EvacuationTier::Partial => (60.0, 50.0),
            EvacuationTier::Insufficient => (25.0, 15.0),
        }
    }

    fn recommendation(self) -> &'static str {
        match self {
            EvacuationTier::Full => {
                "Evacuate: the area can be cleared before significant exposure occurs"
            }
            EvacuationTier::Partial => {
                "Evacuate the nearest areas first; shelter those who cannot leave in time"
            }
            EvacuationTier::Insufficient => {
                "Evacuation too slow: shelter in place and evacuate only after the plume passes"
            }
        }
    }
}

/// Scored protective action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectiveActionAssessment {
    pub kind: ProtectiveActionKind,
    pub effectiveness_percent: f64,
    pub casualty_reduction_percent: f64,
    /// Set for evacuations only
    pub tier: Option<EvacuationTier>,
    pub recommendation: String,
}

/// Both actions side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionComparison {
    pub evacuation: ProtectiveActionAssessment,
    pub shelter: ProtectiveActionAssessment,
    /// The more effective action; evacuation wins ties
    pub recommended: ProtectiveActionKind,
}

/// Indoor protection factor (%) from the chemical's boiling point
#[must_use]
pub fn shelter_effectiveness(chemical: Option<&ChemicalRecord>) -> f64 {
    match chemical.map(|r| r.boiling_point_c) {
        Some(bp) if bp < 20.0 => 30.0,
        Some(bp) if bp > 100.0 => 80.0,
        _ => 50.0,
    }
}

fn shelter_recommendation(effectiveness: f64) -> &'static str {
    if effectiveness >= 80.0 {
        "Shelter in place: close windows and doors, shut off ventilation"
    } else if effectiveness <= 30.0 {
        "Shelter offers limited protection against this gas; seal a room and prepare to evacuate"
    } else {
        "Shelter in place with ventilation off; move to an interior room"
    }
}

/// Score one protective action for a scenario.
///
/// `budget_min` is the significant-exposure budget evacuations are measured
/// against.
#[must_use]
pub fn evaluate_protective_action(
    scenario: &ReleaseScenario,
    chemical: Option<&ChemicalRecord>,
    evacuation_time_min: f64,
    kind: ProtectiveActionKind,
    budget_min: f64,
) -> ProtectiveActionAssessment {
    match kind {
        ProtectiveActionKind::Evacuation => {
            let tier = EvacuationTier::classify(evacuation_time_min.max(0.0), budget_min);
            let (effectiveness, casualty_reduction) = tier.scores();
            ProtectiveActionAssessment {
                kind,
                effectiveness_percent: effectiveness,
                casualty_reduction_percent: casualty_reduction,
                tier: Some(tier),
                recommendation: tier.recommendation().to_string(),
            }
        }
        ProtectiveActionKind::ShelterInPlace => {
            let effectiveness = shelter_effectiveness(chemical);
            let mut recommendation = shelter_recommendation(effectiveness).to_string();
            if scenario.indoor {
                recommendation.push_str(" (release is indoors: leave the affected building first)");
            }
            ProtectiveActionAssessment {
                kind,
                effectiveness_percent: effectiveness,
                casualty_reduction_percent: effectiveness * SHELTER_CASUALTY_RATIO,
                tier: None,
                recommendation,
            }
        }
    }
}

/// Evaluate both actions and pick the more effective
#[must_use]
pub fn compare_actions(
    scenario: &ReleaseScenario,
    chemical: Option<&ChemicalRecord>,
    evacuation_time_min: f64,
    budget_min: f64,
) -> ActionComparison {
    let evacuation = evaluate_protective_action(
        scenario,
        chemical,
        evacuation_time_min,
        ProtectiveActionKind::Evacuation,
        budget_min,
    );
    let shelter = evaluate_protective_action(
        scenario,
        chemical,
        evacuation_time_min,
        ProtectiveActionKind::ShelterInPlace,
        budget_min,
    );
    let recommended = if shelter.effectiveness_percent > evacuation.effectiveness_percent {
        ProtectiveActionKind::ShelterInPlace
    } else {
        ProtectiveActionKind::Evacuation
    };
    ActionComparison {
        evacuation,
        shelter,
        recommended,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::{ChemicalDatabase, ChemicalRepository};

    fn evaluate(
        time: f64,
        kind: ProtectiveActionKind,
        chemical: &str,
    ) -> ProtectiveActionAssessment {
        let scenario = ReleaseScenario::new(chemical, 10.0, 30.0);
        evaluate_protective_action(
            &scenario,
            ChemicalDatabase::shared().find(chemical),
            time,
            kind,
            DEFAULT_EXPOSURE_BUDGET_MIN,
        )
    }

    #[test]
    fn test_evacuation_tiers() {
        let full = evaluate(10.0, ProtectiveActionKind::Evacuation, "chlorine");
        assert_eq!(full.tier, Some(EvacuationTier::Full));
        assert_eq!(full.effectiveness_percent, 95.0);

        let partial = evaluate(15.0, ProtectiveActionKind::Evacuation, "chlorine");
        assert_eq!(partial.tier, Some(EvacuationTier::Partial));
        assert_eq!(partial.casualty_reduction_percent, 50.0);

        let slow = evaluate(45.0, ProtectiveActionKind::Evacuation, "chlorine");
        assert_eq!(slow.tier, Some(EvacuationTier::Insufficient));
    }

    #[test]
    fn test_shelter_by_boiling_point() {
        let gas = evaluate(0.0, ProtectiveActionKind::ShelterInPlace, "chlorine");
        assert_eq!(gas.effectiveness_percent, 30.0);
        let heavy = evaluate(0.0, ProtectiveActionKind::ShelterInPlace, "toluene");
        assert_eq!(heavy.effectiveness_percent, 80.0);
        assert!((heavy.casualty_reduction_percent - 72.0).abs() < 1e-9);
        let mid = evaluate(0.0, ProtectiveActionKind::ShelterInPlace, "benzene");
        assert_eq!(mid.effectiveness_percent, 50.0);
        let unknown = evaluate(0.0, ProtectiveActionKind::ShelterInPlace, "mystery gas");
        assert_eq!(unknown.effectiveness_percent, 50.0);
        assert_eq!(unknown.tier, None);
    }

    #[test]
    fn test_compare_prefers_shelter_when_evacuation_is_slow() {
        let scenario = ReleaseScenario::new("toluene", 10.0, 30.0);
        let toluene = ChemicalDatabase::shared().find("toluene");
        let slow = compare_actions(&scenario, toluene, 60.0, DEFAULT_EXPOSURE_BUDGET_MIN);
        assert_eq!(slow.recommended, ProtectiveActionKind::ShelterInPlace);
        let fast = compare_actions(&scenario, toluene, 5.0, DEFAULT_EXPOSURE_BUDGET_MIN);
        assert_eq!(fast.recommended, ProtectiveActionKind::Evacuation);
    }
}
