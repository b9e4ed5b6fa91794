//! Flammability and explosion risk for a vapor cloud.
//!
//! # Risk Ladder
//!
//! The measured concentration is converted to percent by volume and placed
//! against the flammable band:
//!
//! ```text
//! c < 0.1·LEL        Low
//! c < 0.5·LEL        Moderate
//! c < LEL            High
//! LEL ≤ c ≤ UEL      Extreme
//! c > UEL            Moderate  (too rich; dilution re-enters the band)
//! ```
//!
//! Explosion risk equals flammability risk inside the band and sits one
//! level lower outside it, unless the chemical is reactive (reactivity ≥ 3
//! or blast potential ≥ 7), which can detonate anywhere it can burn. Hot or
//! pressurised releases escalate explosion risk one level.
//!
//! # Consequence Scaling
//!
//! ```text
//! scale        = f_T · (P/P₀) · E/300
//! overpressure = base_psi(level) · scale
//! radiation    = base_kw(level)  · scale
//! safe_dist    = base_m(level)   · √(overpressure / base_psi(level))
//! ```
//!
//! # References
//! - NFPA 68 (2018). "Standard on Explosion Protection by Deflagration Venting"
//! - CCPS (2010). "Guidelines for Vapor Cloud Explosion, Pressure Vessel
//!   Burst, BLEVE and Flash Fire Hazards", 2nd ed.

use crate::chemistry::conversion::mg_m3_to_percent;
use crate::chemistry::ChemicalRecord;
use crate::core_types::units::{Atmospheres, Celsius};
use crate::core_types::RiskLevel;
use crate::dispersion::release::temperature_factor;
use serde::{Deserialize, Serialize};

/// Energy (kJ/kg) the consequence constants are calibrated for
const REFERENCE_ENERGY: f64 = 300.0;

/// Relative slack on the LEL/UEL edges; absorbs rounding in the mg/m³ → %
/// conversion
const BAND_TOLERANCE: f64 = 1e-9;

/// Conditions of the vapor cloud being assessed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlastConditions {
    pub concentration_mg_m3: f64,
    pub temperature: Celsius,
    pub pressure: Atmospheres,
}

impl BlastConditions {
    #[must_use]
    pub fn new(concentration_mg_m3: f64, temperature: Celsius, pressure: Atmospheres) -> Self {
        Self {
            concentration_mg_m3,
            temperature,
            pressure,
        }
    }

    fn is_hot_and_pressurised(&self) -> bool {
        let ratio = self.pressure.ratio();
        (*self.temperature > 50.0 && ratio > 1.2) || *self.temperature > 100.0 || ratio > 2.0
    }
}

/// Outcome of a blast assessment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlastAssessment {
    pub flammability_risk: RiskLevel,
    pub explosion_risk: RiskLevel,
    /// Concentration as percent by volume
    pub concentration_percent: f64,
    /// Concentration as a percentage of the LEL; `None` when not flammable
    pub percent_of_lel: Option<f64>,
    pub overpressure_psi: f64,
    pub thermal_radiation_kw_m2: f64,
    pub safe_distance_m: f64,
    /// True when temperature or pressure raised the explosion risk
    pub escalated: bool,
    pub comments: Vec<String>,
}

/// Per-level consequence constants `(psi, kW/m², m)`
#[must_use]
pub fn consequence_constants(level: RiskLevel) -> (f64, f64, f64) {
    match level {
        RiskLevel::Extreme => (10.0, 25.0, 500.0),
        RiskLevel::High => (5.0, 10.0, 300.0),
        RiskLevel::Moderate => (2.0, 5.0, 150.0),
        RiskLevel::Low => (0.5, 1.0, 50.0),
        RiskLevel::None => (0.0, 0.0, 0.0),
    }
}

/// Position of a concentration relative to the flammable band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BandPosition {
    NotFlammable,
    BelowLel,
    InBand,
    AboveUel,
}

/// Facts the comment rules are evaluated against
struct CommentContext {
    band: BandPosition,
    reactive: bool,
    escalated: bool,
    temperature_c: f64,
    pressure_ratio: f64,
}

type CommentRule = (fn(&CommentContext) -> bool, &'static str);

const COMMENT_RULES: &[CommentRule] = &[
    (
        |c| c.band == BandPosition::NotFlammable,
        "Not flammable: no fire or explosion hazard from this chemical",
    ),
    (
        |c| c.band == BandPosition::InBand,
        "WARNING: within the flammable range; any ignition source will cause fire or explosion",
    ),
    (
        |c| c.band == BandPosition::BelowLel,
        "Below LEL: remove ignition sources, concentration may rise into the flammable range",
    ),
    (
        |c| c.band == BandPosition::AboveUel,
        "Above UEL: too rich to burn, dilution with air will pass through the flammable range",
    ),
    (
        |c| c.reactive && c.band != BandPosition::NotFlammable,
        "Reactive chemical: explosion possible outside the flammable range",
    ),
    (
        |c| c.temperature_c > 50.0,
        "Elevated temperature increases vapor generation and blast severity",
    ),
    (
        |c| c.pressure_ratio > 1.2,
        "Elevated pressure increases overpressure on release",
    ),
    (
        |c| c.escalated,
        "Explosion risk escalated for temperature/pressure conditions",
    ),
];

fn band_position(record: &ChemicalRecord, percent: f64) -> BandPosition {
    if !record.is_flammable() {
        return BandPosition::NotFlammable;
    }
    let uel = if record.uel_percent > 0.0 {
        record.uel_percent
    } else {
        f64::INFINITY
    };
    if percent < record.lel_percent * (1.0 - BAND_TOLERANCE) {
        BandPosition::BelowLel
    } else if percent <= uel * (1.0 + BAND_TOLERANCE) {
        BandPosition::InBand
    } else {
        BandPosition::AboveUel
    }
}

/// Flammability risk for a concentration (percent by volume)
#[must_use]
pub fn flammability_risk(record: &ChemicalRecord, percent: f64) -> RiskLevel {
    match band_position(record, percent) {
        BandPosition::NotFlammable => RiskLevel::None,
        BandPosition::InBand => RiskLevel::Extreme,
        BandPosition::AboveUel => RiskLevel::Moderate,
        BandPosition::BelowLel => {
            let lel = record.lel_percent;
            if percent < 0.1 * lel {
                RiskLevel::Low
            } else if percent < 0.5 * lel {
                RiskLevel::Moderate
            } else {
                RiskLevel::High
            }
        }
    }
}

/// Assess flammability and explosion risk.
///
/// An unknown chemical yields the default assessment: both risks `None`,
/// zero consequences, no comments.
#[must_use]
pub fn assess_blast(
    chemical: Option<&ChemicalRecord>,
    conditions: &BlastConditions,
) -> BlastAssessment {
    let Some(record) = chemical else {
        return BlastAssessment::default();
    };

    let percent =
        mg_m3_to_percent(conditions.concentration_mg_m3.max(0.0), record.molecular_weight);
    let band = band_position(record, percent);
    let flammability = flammability_risk(record, percent);
    let reactive = record.is_reactive();

    let base_explosion = if reactive || band == BandPosition::InBand {
        flammability
    } else {
        flammability.demote()
    };
    let escalated = base_explosion != RiskLevel::None && conditions.is_hot_and_pressurised();
    let explosion = if escalated {
        base_explosion.escalate()
    } else {
        base_explosion
    };

    let pressure_ratio = conditions.pressure.ratio();
    let scale = temperature_factor(*conditions.temperature)
        * pressure_ratio.max(0.0)
        * record.explosion_energy_or_default()
        / REFERENCE_ENERGY;
    let (base_psi, base_kw, base_m) = consequence_constants(explosion);
    let overpressure = base_psi * scale;
    let safe_distance = if base_psi > 0.0 {
        base_m * (overpressure / base_psi).sqrt()
    } else {
        0.0
    };

    let context = CommentContext {
        band,
        reactive,
        escalated,
        temperature_c: *conditions.temperature,
        pressure_ratio,
    };
    let comments = COMMENT_RULES
        .iter()
        .filter(|(applies, _)| applies(&context))
        .map(|(_, text)| (*text).to_string())
        .collect();

    BlastAssessment {
        flammability_risk: flammability,
        explosion_risk: explosion,
        concentration_percent: percent,
        percent_of_lel: (record.lel_percent > 0.0).then_some(percent / record.lel_percent * 100.0),
        overpressure_psi: overpressure,
        thermal_radiation_kw_m2: base_kw * scale,
        safe_distance_m: safe_distance,
        escalated,
        comments,
    }
}
