//! Effective release rate.
//!
//! The nominal release rate is scaled by the environmental conditions that
//! change how much material actually reaches the breathing zone:
//!
//! ```text
//! Q_eff = Q · f_T · f_RH · (P/P₀) · f_terrain · f_indoor · f_weather
//!
//! f_T       = max(0.1, 1 + (T − 20)/100)
//! f_RH      = clamp(1 + (RH − 50)/500, 0.9, 1.1)     (1 when RH unknown)
//! P/P₀      = P_hPa / 1013.25                         (1 when unknown)
//! f_terrain = urban 0.8, forest 0.7, water 1.2, else 1
//! f_indoor  = 0.3 indoors, else 1
//! f_weather = external dispersion multiplier           (1 when absent)
//! ```

use crate::core_types::units::Atmospheres;
use crate::core_types::ReleaseScenario;
use serde::{Deserialize, Serialize};

/// Share of an indoor release that escapes the building envelope
const INDOOR_FACTOR: f64 = 0.3;

/// Individual release-rate factors, kept for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReleaseAdjustment {
    pub temperature_factor: f64,
    pub humidity_factor: f64,
    pub pressure_ratio: f64,
    pub terrain_factor: f64,
    pub indoor_factor: f64,
    pub weather_multiplier: f64,
}

impl ReleaseAdjustment {
    #[must_use]
    pub fn for_scenario(scenario: &ReleaseScenario) -> Self {
        Self {
            temperature_factor: temperature_factor(*scenario.temperature),
            humidity_factor: scenario
                .humidity
                .map_or(1.0, |rh| humidity_factor(*rh)),
            pressure_ratio: scenario
                .ambient_pressure_hpa
                .filter(|hpa| *hpa > 0.0)
                .map_or(1.0, |hpa| Atmospheres::from_hpa(hpa).ratio()),
            terrain_factor: scenario.terrain.release_factor(),
            indoor_factor: if scenario.indoor { INDOOR_FACTOR } else { 1.0 },
            weather_multiplier: scenario
                .weather_impact
                .map_or(1.0, |impact| impact.dispersion_multiplier),
        }
    }

    /// Product of all factors
    #[must_use]
    pub fn combined(&self) -> f64 {
        self.temperature_factor
            * self.humidity_factor
            * self.pressure_ratio
            * self.terrain_factor
            * self.indoor_factor
            * self.weather_multiplier
    }

    /// Apply to a nominal rate (kg/min); negative rates are treated as zero
    #[must_use]
    pub fn apply(&self, nominal_rate_kg_min: f64) -> f64 {
        nominal_rate_kg_min.max(0.0) * self.combined()
    }
}

/// Warmer releases volatilize faster
#[must_use]
pub fn temperature_factor(temperature_c: f64) -> f64 {
    (1.0 + (temperature_c - 20.0) / 100.0).max(0.1)
}

/// Humid air keeps hygroscopic plumes dense and near the ground
#[must_use]
pub fn humidity_factor(relative_humidity: f64) -> f64 {
    (1.0 + (relative_humidity - 50.0) / 500.0).clamp(0.9, 1.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::{StabilityClass, WeatherImpact};
    use crate::core_types::units::{Celsius, Percent};
    use crate::core_types::Terrain;

    #[test]
    fn test_reference_conditions_are_identity() {
        let s = ReleaseScenario::new("chlorine", 10.0, 60.0);
        let adj = ReleaseAdjustment::for_scenario(&s);
        assert_eq!(adj.combined(), 1.0);
        assert_eq!(adj.apply(10.0), 10.0);
    }

    #[test]
    fn test_all_factors_multiply() {
        let s = ReleaseScenario::new("chlorine", 10.0, 60.0)
            .with_temperature(Celsius::new(30.0))
            .with_humidity(Percent::new(75.0))
            .with_ambient_pressure_hpa(1013.25)
            .with_terrain(Terrain::Urban)
            .with_indoor(true)
            .with_weather_impact(WeatherImpact {
                wind_factor: 1.0,
                stability_class: StabilityClass::D,
                dispersion_multiplier: 0.9,
            });
        let adj = ReleaseAdjustment::for_scenario(&s);
        let expected = 1.1 * 1.05 * 1.0 * 0.8 * 0.3 * 0.9;
        assert!((adj.combined() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_factor_clamps() {
        assert_eq!(temperature_factor(-200.0), 0.1);
        assert_eq!(humidity_factor(100.0), 1.1);
        assert_eq!(humidity_factor(0.0), 0.9);
    }

    #[test]
    fn test_low_ambient_pressure_thins_release() {
        let s = ReleaseScenario::new("chlorine", 10.0, 60.0).with_ambient_pressure_hpa(950.0);
        let adj = ReleaseAdjustment::for_scenario(&s);
        let ratio = 950.0 / 1013.25;
        assert!((adj.pressure_ratio - ratio).abs() < 1e-12, "ratio {}", adj.pressure_ratio);
        assert!((adj.combined() - ratio).abs() < 1e-12);
        assert!((adj.apply(10.0) - 10.0 * ratio).abs() < 1e-9);

        // Non-positive readings are ignored
        let bogus = ReleaseScenario::new("chlorine", 10.0, 60.0).with_ambient_pressure_hpa(0.0);
        assert_eq!(ReleaseAdjustment::for_scenario(&bogus).pressure_ratio, 1.0);
    }
}
