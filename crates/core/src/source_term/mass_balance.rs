//! Vapor/pool partition of a release and pool evaporation.
//!
//! # Model
//!
//! ```text
//! gas at ambient (Tb < T):     f_v = 1
//! otherwise:                   f_v = clamp(0.2 + 0.8·(VP/760)·e^(0.0555·(T−20)), 0.1, 1)
//!
//! M       = Q · t
//! M_vapor = M · f_v
//! M_pool  = M · (1 − f_v)
//!
//! E       = min(0.005 · (VP/100) · √(18/MW) · f_T · √M_pool,  M_pool/10)   kg/min
//! M_evap  = min(M_pool, E · t)
//! M_air   = M_vapor + M_evap
//! ```
//!
//! `Tb` is the normal boiling point unless [`PhaseModel::PressureCorrected`]
//! is selected, `f_T` is `max(0.1, 1 + (T−20)/100)`. The pool is assumed 1 cm deep:
//! `area = M_pool / (SG · 1000) · 100` m².
//!
//! # References
//! - Mackay, D. & Matsugu, R.S. (1973). "Evaporation rates of liquid
//!   hydrocarbon spills on land and water." Can. J. Chem. Eng., 51, 434-439.
//! - US EPA (1999). "Risk Management Program Guidance for Offsite
//!   Consequence Analysis", Appendix D.

use crate::chemistry::ChemicalRecord;
use crate::core_types::units::{Atmospheres, Celsius};
use crate::core_types::ReleaseScenario;
use crate::dispersion::release::temperature_factor;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Partial-pressure exponent per °C above reference
const VAPOR_TEMPERATURE_COEFF: f64 = 0.0555;
/// mmHg per atmosphere
const MMHG_PER_ATM: f64 = 760.0;
/// Pool depth factor: 1 cm layer, m³ → m²
const POOL_AREA_PER_M3: f64 = 100.0;

/// How the gas/liquid decision treats storage pressure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PhaseModel {
    /// Gas when the normal (1 atm) boiling point is below the temperature
    #[default]
    NormalBoilingPoint,
    /// Boiling point raised or lowered for the storage pressure (Trouton)
    PressureCorrected,
}

/// Release parameters consumed by the mass balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpillInput {
    pub rate_kg_min: f64,
    pub duration_min: f64,
    pub temperature: Celsius,
    pub pressure: Atmospheres,
    pub container_volume_m3: Option<f64>,
    pub initial_mass_kg: Option<f64>,
    pub phase_model: PhaseModel,
}

impl SpillInput {
    #[must_use]
    pub fn new(
        rate_kg_min: f64,
        duration_min: f64,
        temperature: Celsius,
        pressure: Atmospheres,
    ) -> Self {
        Self {
            rate_kg_min,
            duration_min,
            temperature,
            pressure,
            container_volume_m3: None,
            initial_mass_kg: None,
            phase_model: PhaseModel::default(),
        }
    }

    pub fn with_container(mut self, volume_m3: f64, initial_mass_kg: f64) -> Self {
        self.container_volume_m3 = Some(volume_m3);
        self.initial_mass_kg = Some(initial_mass_kg);
        self
    }

    pub fn with_phase_model(mut self, phase_model: PhaseModel) -> Self {
        self.phase_model = phase_model;
        self
    }

    #[must_use]
    pub fn from_scenario(scenario: &ReleaseScenario) -> Self {
        Self {
            rate_kg_min: scenario.release_rate_kg_min,
            duration_min: scenario.duration_min,
            temperature: scenario.temperature,
            pressure: scenario.pressure,
            container_volume_m3: scenario.container_volume_m3,
            initial_mass_kg: scenario.initial_mass_kg,
            phase_model: PhaseModel::default(),
        }
    }
}

/// Mass flow rates over the release (kg/min)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReleaseRates {
    pub release: f64,
    pub vapor_generation: f64,
    pub pool_evaporation: f64,
    pub airborne: f64,
}

/// Shares of the total release (percent)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassBreakdown {
    pub vapor_percent: f64,
    pub pool_percent: f64,
    pub evaporated_percent: f64,
    pub airborne_percent: f64,
}

/// Cumulative pool evaporation at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaporationSample {
    pub time_min: f64,
    pub evaporated_kg: f64,
    pub remaining_pool_kg: f64,
}

/// Where the released mass ends up.
///
/// `Default` is the all-zero result reported for an unknown chemical.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MassBalanceResult {
    pub is_gas: bool,
    pub vapor_fraction: f64,
    pub total_released_kg: f64,
    pub vapor_generated_kg: f64,
    pub pool_formation_kg: f64,
    pub pool_evaporation_kg: f64,
    pub airborne_release_kg: f64,
    /// Evaporation rate from the pool (kg/min)
    pub evaporation_rate_kg_min: f64,
    pub pool_area_m2: f64,
    /// Time for the pool to evaporate; `None` when nothing evaporates
    pub pool_duration_min: Option<f64>,
    /// Time to empty the container; `None` without container data
    pub time_to_empty_min: Option<f64>,
    pub rates: ReleaseRates,
    pub breakdown: MassBreakdown,
    /// Release duration the totals were computed over
    pub duration_min: f64,
}

impl MassBalanceResult {
    /// Cumulative pool evaporation sampled at `steps + 1` evenly spaced
    /// instants from 0 to the release duration
    #[must_use]
    pub fn evaporation_timeline(&self, steps: usize) -> Vec<EvaporationSample> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let time_min = self.duration_min * i as f64 / steps as f64;
                let evaporated_kg =
                    (self.evaporation_rate_kg_min * time_min).min(self.pool_formation_kg);
                EvaporationSample {
                    time_min,
                    evaporated_kg,
                    remaining_pool_kg: (self.pool_formation_kg - evaporated_kg).max(0.0),
                }
            })
            .collect()
    }
}

/// Fraction of a liquid release that flashes to vapor
#[must_use]
pub fn liquid_vapor_fraction(vapor_pressure_mmhg: f64, temperature: Celsius) -> f64 {
    let partial = vapor_pressure_mmhg.max(0.0) / MMHG_PER_ATM;
    (0.2 + 0.8 * partial * (VAPOR_TEMPERATURE_COEFF * (*temperature - 20.0)).exp()).clamp(0.1, 1.0)
}

/// Pool evaporation rate (kg/min), capped at a tenth of the pool per minute
#[must_use]
pub fn pool_evaporation_rate(record: &ChemicalRecord, pool_kg: f64, temperature: Celsius) -> f64 {
    if pool_kg <= 0.0 || record.molecular_weight <= 0.0 {
        return 0.0;
    }
    let driving = 0.005
        * (record.vapor_pressure_mmhg.max(0.0) / 100.0)
        * (18.0 / record.molecular_weight).sqrt()
        * temperature_factor(*temperature)
        * pool_kg.sqrt();
    driving.min(pool_kg / 10.0)
}

/// Partition a release into vapor and pool and evaporate the pool.
///
/// Returns the all-zero result when `chemical` is `None`.
#[must_use]
pub fn compute_mass_balance(
    chemical: Option<&ChemicalRecord>,
    input: &SpillInput,
) -> MassBalanceResult {
    let Some(record) = chemical else {
        return MassBalanceResult::default();
    };

    let rate = input.rate_kg_min.max(0.0);
    let duration = input.duration_min.max(0.0);
    let total = rate * duration;

    let is_gas = match input.phase_model {
        PhaseModel::NormalBoilingPoint => record.is_gas_at(input.temperature),
        PhaseModel::PressureCorrected => record.is_gas_under(input.temperature, input.pressure),
    };
    let vapor_fraction = if is_gas {
        1.0
    } else {
        liquid_vapor_fraction(record.vapor_pressure_mmhg, input.temperature)
    };

    let vapor = total * vapor_fraction;
    let pool = if is_gas { 0.0 } else { total - vapor };
    let evaporation_rate = pool_evaporation_rate(record, pool, input.temperature);
    let evaporated = (evaporation_rate * duration).min(pool);
    let airborne = vapor + evaporated;

    let specific_gravity = if record.specific_gravity > 0.0 {
        record.specific_gravity
    } else {
        1.0
    };
    let pool_area = pool / (specific_gravity * 1000.0) * POOL_AREA_PER_M3;

    let per_minute = |kg: f64| if duration > 0.0 { kg / duration } else { 0.0 };
    let percent = |kg: f64| if total > 0.0 { kg / total * 100.0 } else { 0.0 };

    debug!(
        "Mass balance for {}: gas={}, f_v={:.4}, total={:.2} kg, pool={:.2} kg, E={:.4} kg/min",
        record.name, is_gas, vapor_fraction, total, pool, evaporation_rate
    );

    MassBalanceResult {
        is_gas,
        vapor_fraction,
        total_released_kg: total,
        vapor_generated_kg: vapor,
        pool_formation_kg: pool,
        pool_evaporation_kg: evaporated,
        airborne_release_kg: airborne,
        evaporation_rate_kg_min: evaporation_rate,
        pool_area_m2: pool_area,
        pool_duration_min: (evaporation_rate > 0.0).then_some(pool / evaporation_rate),
        time_to_empty_min: input
            .container_volume_m3
            .and(input.initial_mass_kg)
            .filter(|_| rate > 0.0)
            .map(|mass| mass.max(0.0) / rate),
        rates: ReleaseRates {
            release: rate,
            vapor_generation: per_minute(vapor),
            pool_evaporation: evaporation_rate,
            airborne: per_minute(airborne),
        },
        breakdown: MassBreakdown {
            vapor_percent: percent(vapor),
            pool_percent: percent(pool),
            evaporated_percent: percent(evaporated),
            airborne_percent: percent(airborne),
        },
        duration_min: duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chemistry::{ChemicalDatabase, ChemicalRepository};

    fn record(name: &str) -> Option<&'static ChemicalRecord> {
        ChemicalDatabase::shared().find(name)
    }

    #[test]
    fn test_gas_release_is_all_vapor() {
        let input = SpillInput::new(10.0, 60.0, Celsius::new(25.0), Atmospheres::STANDARD);
        let result = compute_mass_balance(record("chlorine"), &input);
        assert!(result.is_gas);
        assert_eq!(result.vapor_fraction, 1.0);
        assert_eq!(result.total_released_kg, 600.0);
        assert_eq!(result.pool_formation_kg, 0.0);
        assert_eq!(result.pool_duration_min, None);
        assert_eq!(result.airborne_release_kg, 600.0);
    }

    #[test]
    fn test_liquid_release_partitions() {
        let input = SpillInput::new(10.0, 10.0, Celsius::new(20.0), Atmospheres::STANDARD);
        let result = compute_mass_balance(record("benzene"), &input);
        assert!(!result.is_gas);
        assert!((result.vapor_fraction - 0.278_947).abs() < 1e-5);
        assert!((result.vapor_generated_kg + result.pool_formation_kg - 100.0).abs() < 1e-9);
        assert!(result.pool_evaporation_kg <= result.pool_formation_kg);
        assert!(result.pool_area_m2 > 0.0);
        assert!(result.pool_duration_min.is_some());
    }

    #[test]
    fn test_phase_follows_normal_boiling_point() {
        // Chlorine boils at -34°C: gas at -20°C whatever the storage pressure
        let input = SpillInput::new(10.0, 60.0, Celsius::new(-20.0), Atmospheres::new(5.0));
        let result = compute_mass_balance(record("chlorine"), &input);
        assert!(result.is_gas, "phase is decided by the 1 atm boiling point");
        assert_eq!(result.vapor_fraction, 1.0);
        assert_eq!(result.pool_formation_kg, 0.0);
        assert_eq!(result.airborne_release_kg, 600.0);
    }

    #[test]
    fn test_pressure_corrected_phase_is_opt_in() {
        // Chlorine held at 10 atm boils well above 25°C
        let input = SpillInput::new(10.0, 10.0, Celsius::new(25.0), Atmospheres::new(10.0));
        assert!(compute_mass_balance(record("chlorine"), &input).is_gas);

        let corrected = input.with_phase_model(PhaseModel::PressureCorrected);
        let result = compute_mass_balance(record("chlorine"), &corrected);
        assert!(!result.is_gas);
        assert!(result.pool_formation_kg > 0.0);
        assert!((result.vapor_generated_kg + result.pool_formation_kg - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_chemical_is_zero() {
        let input = SpillInput::new(10.0, 10.0, Celsius::new(20.0), Atmospheres::STANDARD);
        assert_eq!(compute_mass_balance(None, &input), MassBalanceResult::default());
    }

    #[test]
    fn test_zero_duration_has_zero_rates() {
        let input = SpillInput::new(10.0, 0.0, Celsius::new(20.0), Atmospheres::STANDARD);
        let result = compute_mass_balance(record("benzene"), &input);
        assert_eq!(result.total_released_kg, 0.0);
        assert_eq!(result.rates.airborne, 0.0);
        assert_eq!(result.breakdown.vapor_percent, 0.0);
        assert_eq!(result.pool_duration_min, None);
    }

    #[test]
    fn test_time_to_empty() {
        let input = SpillInput::new(20.0, 10.0, Celsius::new(20.0), Atmospheres::STANDARD)
            .with_container(5.0, 1000.0);
        let result = compute_mass_balance(record("benzene"), &input);
        assert_eq!(result.time_to_empty_min, Some(50.0));
    }

    #[test]
    fn test_timeline_is_cumulative() {
        let input = SpillInput::new(10.0, 30.0, Celsius::new(20.0), Atmospheres::STANDARD);
        let result = compute_mass_balance(record("toluene"), &input);
        let timeline = result.evaporation_timeline(6);
        assert_eq!(timeline.len(), 7);
        assert_eq!(timeline[0].evaporated_kg, 0.0);
        assert!(timeline.windows(2).all(|w| w[1].evaporated_kg >= w[0].evaporated_kg));
        let last = timeline[6].evaporated_kg;
        assert!((last - result.pool_evaporation_kg).abs() < 1e-9);
    }
}
