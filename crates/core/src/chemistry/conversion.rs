//! Gas concentration unit conversion
//!
//! All conversions pivot through mg/m³ using the molar volume of an ideal
//! gas at 25°C and 1 atm:
//!
//! ```text
//! mg/m³ = ppm · MW / 24.45
//! mg/m³ = % · 10000 · MW / 24.45
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Molar volume of an ideal gas at 25°C, 1 atm (L/mol)
pub const MOLAR_VOLUME_L: f64 = 24.45;

/// ppm per volume percent
const PPM_PER_PERCENT: f64 = 10_000.0;

/// Concentration units understood by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConcentrationUnit {
    /// Milligrams per cubic metre
    MgPerM3,
    /// Parts per million by volume
    Ppm,
    /// Percent by volume
    Percent,
}

impl ConcentrationUnit {
    /// Parse a unit label ("mg/m3", "ppm", "%")
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "mg/m3" | "mg/m³" | "mgm3" | "mg_m3" => Some(Self::MgPerM3),
            "ppm" => Some(Self::Ppm),
            "%" | "percent" | "vol%" => Some(Self::Percent),
            _ => None,
        }
    }

    /// Display label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ConcentrationUnit::MgPerM3 => "mg/m³",
            ConcentrationUnit::Ppm => "ppm",
            ConcentrationUnit::Percent => "%",
        }
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[inline]
#[must_use]
pub fn ppm_to_mg_m3(ppm: f64, molecular_weight: f64) -> f64 {
    ppm * molecular_weight / MOLAR_VOLUME_L
}

/// Returns the input unchanged when the molecular weight is not positive
#[inline]
#[must_use]
pub fn mg_m3_to_ppm(mg_m3: f64, molecular_weight: f64) -> f64 {
    if molecular_weight <= 0.0 {
        return mg_m3;
    }
    mg_m3 * MOLAR_VOLUME_L / molecular_weight
}

#[inline]
#[must_use]
pub fn percent_to_mg_m3(percent: f64, molecular_weight: f64) -> f64 {
    ppm_to_mg_m3(percent * PPM_PER_PERCENT, molecular_weight)
}

/// Returns the input unchanged when the molecular weight is not positive
#[inline]
#[must_use]
pub fn mg_m3_to_percent(mg_m3: f64, molecular_weight: f64) -> f64 {
    if molecular_weight <= 0.0 {
        return mg_m3;
    }
    mg_m3_to_ppm(mg_m3, molecular_weight) / PPM_PER_PERCENT
}

/// Convert between any two units.
///
/// `molecular_weight` of `None` (unknown chemical) or a non-positive value
/// returns `value` unchanged.
#[must_use]
pub fn convert(
    value: f64,
    molecular_weight: Option<f64>,
    from: ConcentrationUnit,
    to: ConcentrationUnit,
) -> f64 {
    let mw = match molecular_weight {
        Some(mw) if mw > 0.0 => mw,
        _ => return value,
    };
    if from == to {
        return value;
    }

    let mg_m3 = match from {
        ConcentrationUnit::MgPerM3 => value,
        ConcentrationUnit::Ppm => ppm_to_mg_m3(value, mw),
        ConcentrationUnit::Percent => percent_to_mg_m3(value, mw),
    };

    match to {
        ConcentrationUnit::MgPerM3 => mg_m3,
        ConcentrationUnit::Ppm => mg_m3_to_ppm(mg_m3, mw),
        ConcentrationUnit::Percent => mg_m3_to_percent(mg_m3, mw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHLORINE_MW: f64 = 70.9;

    #[test]
    fn test_ppm_to_mg_m3_chlorine() {
        // 1 ppm chlorine = 70.9 / 24.45 = 2.8998 mg/m³
        let mg = ppm_to_mg_m3(1.0, CHLORINE_MW);
        assert!((mg - 2.8998).abs() < 1e-3);
    }

    #[test]
    fn test_percent_is_ten_thousand_ppm() {
        let a = convert(1.0, Some(CHLORINE_MW), ConcentrationUnit::Percent, ConcentrationUnit::Ppm);
        assert!((a - 10_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_molecular_weight_is_identity() {
        let v = convert(42.0, None, ConcentrationUnit::Ppm, ConcentrationUnit::MgPerM3);
        assert_eq!(v, 42.0);
        let v = convert(42.0, Some(0.0), ConcentrationUnit::Ppm, ConcentrationUnit::Percent);
        assert_eq!(v, 42.0);
    }

    #[test]
    fn test_round_trip_all_pairs() {
        let units = [
            ConcentrationUnit::MgPerM3,
            ConcentrationUnit::Ppm,
            ConcentrationUnit::Percent,
        ];
        for from in units {
            for to in units {
                let there = convert(12.5, Some(CHLORINE_MW), from, to);
                let back = convert(there, Some(CHLORINE_MW), to, from);
                assert!((back - 12.5).abs() < 1e-9, "{from} -> {to} -> {from}");
            }
        }
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(ConcentrationUnit::from_label("PPM"), Some(ConcentrationUnit::Ppm));
        assert_eq!(ConcentrationUnit::from_label("mg/m3"), Some(ConcentrationUnit::MgPerM3));
        assert_eq!(ConcentrationUnit::from_label("%"), Some(ConcentrationUnit::Percent));
        assert_eq!(ConcentrationUnit::from_label("furlongs"), None);
    }
}
