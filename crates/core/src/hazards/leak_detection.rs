//! Leak detection from a single sensor reading.
//!
//! ```text
//! threshold = max(background · multiplier, 0.01 · AEGL-1[mg/m³])
//! leaking   = measured > threshold
//! factor    = measured / threshold
//! ```
//!
//! A missing AEGL-1 defaults to 1 ppm; for an unknown chemical it converts
//! by identity to 1 mg/m³.

use crate::chemistry::conversion::ppm_to_mg_m3;
use crate::chemistry::ChemicalRecord;
use crate::core_types::RiskLevel;
use serde::{Deserialize, Serialize};

/// AEGL-1 assumed when none is established (ppm)
const DEFAULT_AEGL1_PPM: f64 = 1.0;
/// Share of AEGL-1 that always counts as a leak
const AEGL1_DETECTION_FRACTION: f64 = 0.01;
/// Floor keeping the exceedance factor finite
const MIN_THRESHOLD_MG_M3: f64 = 1.0e-9;

const IGNITION_WARNING: &str = "Eliminate all ignition sources: the chemical is flammable";

/// Sensor reading and baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeakReading {
    pub measured_mg_m3: f64,
    pub background_mg_m3: f64,
    pub multiplier: f64,
}

impl LeakReading {
    #[must_use]
    pub fn new(measured_mg_m3: f64, background_mg_m3: f64, multiplier: f64) -> Self {
        Self {
            measured_mg_m3,
            background_mg_m3,
            multiplier,
        }
    }
}

/// Leak verdict and response guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakDetectionResult {
    pub is_leaking: bool,
    /// 0 when not leaking, otherwise 0.5–0.95
    pub confidence: f64,
    pub severity: RiskLevel,
    pub detection_threshold_mg_m3: f64,
    /// measured / threshold; 0 when not leaking
    pub exceeds_factor: f64,
    pub time_to_action_min: f64,
    pub recommended_actions: Vec<String>,
}

/// AEGL ladder in mg/m³ with the AEGL-1 default applied
#[derive(Debug, Clone, Copy, PartialEq)]
struct Guidelines {
    aegl1: f64,
    aegl2: Option<f64>,
    aegl3: Option<f64>,
}

impl Guidelines {
    fn for_chemical(chemical: Option<&ChemicalRecord>) -> Self {
        let Some(record) = chemical else {
            return Self {
                aegl1: DEFAULT_AEGL1_PPM,
                aegl2: None,
                aegl3: None,
            };
        };
        let (aegl1, aegl2, aegl3) = record.aegl_mg_m3();
        Self {
            aegl1: if aegl1 > 0.0 {
                aegl1
            } else {
                ppm_to_mg_m3(DEFAULT_AEGL1_PPM, record.molecular_weight)
            },
            aegl2: (aegl2 > 0.0).then_some(aegl2),
            aegl3: (aegl3 > 0.0).then_some(aegl3),
        }
    }
}

/// Detection threshold for a chemical and baseline (mg/m³)
#[must_use]
pub fn detection_threshold(
    chemical: Option<&ChemicalRecord>,
    background_mg_m3: f64,
    multiplier: f64,
) -> f64 {
    let guidelines = Guidelines::for_chemical(chemical);
    (background_mg_m3.max(0.0) * multiplier.max(0.0))
        .max(AEGL1_DETECTION_FRACTION * guidelines.aegl1)
        .max(MIN_THRESHOLD_MG_M3)
}

/// Confidence that an exceedance is a real leak
#[must_use]
pub fn detection_confidence(exceeds_factor: f64) -> f64 {
    if exceeds_factor >= 10.0 {
        0.95
    } else if exceeds_factor >= 5.0 {
        0.85
    } else if exceeds_factor >= 2.0 {
        0.70
    } else {
        0.50
    }
}

/// Minutes available before a response must be under way
#[must_use]
pub fn time_to_action(severity: RiskLevel) -> f64 {
    match severity {
        RiskLevel::Extreme => 5.0,
        RiskLevel::High => 15.0,
        RiskLevel::Moderate => 30.0,
        RiskLevel::Low | RiskLevel::None => 60.0,
    }
}

fn severity(measured: f64, threshold: f64, guidelines: &Guidelines) -> RiskLevel {
    if guidelines.aegl3.is_some_and(|limit| measured >= limit) {
        RiskLevel::Extreme
    } else if guidelines.aegl2.is_some_and(|limit| measured >= limit) {
        RiskLevel::High
    } else if measured >= guidelines.aegl1 {
        RiskLevel::Moderate
    } else if measured > 2.0 * threshold {
        RiskLevel::Low
    } else {
        RiskLevel::None
    }
}

fn actions_for(is_leaking: bool, severity: RiskLevel) -> &'static [&'static str] {
    if !is_leaking {
        return &["Continue routine monitoring"];
    }
    match severity {
        RiskLevel::None => &[
            "Verify the reading with a second instrument",
            "Increase monitoring frequency",
        ],
        RiskLevel::Low => &[
            "Verify the reading with a second instrument",
            "Inspect equipment near the sensor for leaks",
            "Notify the shift supervisor",
        ],
        RiskLevel::Moderate => &[
            "Notify the shift supervisor and emergency coordinator",
            "Restrict access to the affected area",
            "Don respiratory protection before investigating",
            "Isolate the suspected source if safe to do so",
        ],
        RiskLevel::High => &[
            "Activate the emergency response plan",
            "Evacuate non-essential personnel from the area",
            "Isolate the source remotely if possible",
            "Notify local emergency services",
        ],
        RiskLevel::Extreme => &[
            "Evacuate the area immediately",
            "Activate the emergency response plan",
            "Notify emergency services and the hazmat team",
            "Advise downwind populations to shelter in place",
        ],
    }
}

/// Decide whether a reading indicates a leak and how urgent it is
#[must_use]
pub fn detect_leak(
    chemical: Option<&ChemicalRecord>,
    reading: &LeakReading,
) -> LeakDetectionResult {
    let guidelines = Guidelines::for_chemical(chemical);
    let threshold = detection_threshold(chemical, reading.background_mg_m3, reading.multiplier);
    let measured = reading.measured_mg_m3;
    let is_leaking = measured > threshold;

    let (exceeds_factor, confidence, severity) = if is_leaking {
        let factor = measured / threshold;
        (
            factor,
            detection_confidence(factor),
            severity(measured, threshold, &guidelines),
        )
    } else {
        (0.0, 0.0, RiskLevel::None)
    };

    let mut recommended_actions: Vec<String> = actions_for(is_leaking, severity)
        .iter()
        .map(|a| (*a).to_string())
        .collect();
    if is_leaking && chemical.is_some_and(ChemicalRecord::is_flammable) {
        recommended_actions.push(IGNITION_WARNING.to_string());
    }

    LeakDetectionResult {
        is_leaking,
        confidence,
        severity,
        detection_threshold_mg_m3: threshold,
        exceeds_factor,
        time_to_action_min: time_to_action(severity),
        recommended_actions,
    }
}
