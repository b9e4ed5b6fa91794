//! Engine-wide configuration

use crate::dispersion::{DispersionConfig, ZoneJitter};
use crate::response::protective_action::DEFAULT_EXPOSURE_BUDGET_MIN;
use serde::{Deserialize, Serialize};

/// Configuration carried by [`HazardEngine`](crate::HazardEngine).
///
/// Defaults match the reference screening behaviour: ±5 % seeded zone
/// jitter, a 21-point profile, a 10-minute exposure budget and a leak
/// threshold of five times a 0.001 mg/m³ background.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Zone and profile settings
    pub dispersion: DispersionConfig,

    /// Minutes of exposure before harm becomes significant; evacuations are
    /// scored against it
    pub significant_exposure_min: f64,

    /// Background concentration assumed when a leak check omits one (mg/m³)
    pub leak_background_mg_m3: f64,

    /// Multiple of background that counts as a leak when omitted
    pub leak_multiplier: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dispersion: DispersionConfig::default(),
            significant_exposure_min: DEFAULT_EXPOSURE_BUDGET_MIN,
            leak_background_mg_m3: 0.001,
            leak_multiplier: 5.0,
        }
    }
}

impl EngineConfig {
    /// Default configuration with zone jitter switched off
    #[must_use]
    pub fn deterministic() -> Self {
        Self {
            dispersion: DispersionConfig::deterministic(),
            ..Self::default()
        }
    }

    /// Seeded zone jitter; amplitude is clamped to [0, 0.10]
    pub fn with_jitter_seed(mut self, seed: u64, amplitude: f64) -> Self {
        self.dispersion.jitter = ZoneJitter::seeded(seed, amplitude);
        self
    }

    pub fn with_dispersion(mut self, dispersion: DispersionConfig) -> Self {
        self.dispersion = dispersion;
        self
    }

    /// Set the exposure budget; non-positive values keep the default
    pub fn with_exposure_budget(mut self, minutes: f64) -> Self {
        if minutes > 0.0 {
            self.significant_exposure_min = minutes;
        }
        self
    }

    /// Set leak-detection defaults (negative values are clamped to 0)
    pub fn with_leak_defaults(mut self, background_mg_m3: f64, multiplier: f64) -> Self {
        self.leak_background_mg_m3 = background_mg_m3.max(0.0);
        self.leak_multiplier = multiplier.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.significant_exposure_min, 10.0);
        assert_eq!(config.leak_background_mg_m3, 0.001);
        assert_eq!(config.leak_multiplier, 5.0);
        assert_eq!(config.dispersion.profile_samples, 21);
        assert_eq!(
            config.dispersion.jitter,
            ZoneJitter::Seeded {
                seed: 0,
                amplitude: 0.05
            }
        );
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::deterministic()
            .with_exposure_budget(-1.0)
            .with_jitter_seed(9, 0.5)
            .with_leak_defaults(-1.0, 3.0);
        assert_eq!(config.significant_exposure_min, 10.0);
        assert_eq!(config.dispersion.jitter, ZoneJitter::seeded(9, 0.10));
        assert_eq!(config.leak_background_mg_m3, 0.0);
        assert_eq!(config.leak_multiplier, 3.0);
    }

    #[test]
    fn test_with_dispersion_replaces_settings() {
        let dispersion = DispersionConfig::deterministic()
            .with_profile_samples(11)
            .with_receptor_distance(500.0);
        let config = EngineConfig::default()
            .with_exposure_budget(20.0)
            .with_dispersion(dispersion);
        assert_eq!(config.dispersion, dispersion);
        assert_eq!(config.significant_exposure_min, 20.0, "Other settings kept");

        let engine = crate::HazardEngine::builtin().with_config(config);
        let scenario = crate::ReleaseScenario::new("chlorine", 10.0, 60.0);
        let detailed = engine.compute_detailed_dispersion(&scenario);
        let default_detailed = crate::HazardEngine::builtin()
            .with_config(EngineConfig::deterministic())
            .compute_detailed_dispersion(&scenario);

        assert_eq!(detailed.profile.points.len(), 11);
        assert_eq!(detailed.zones, default_detailed.zones);
        assert!(
            detailed.sigma_y_m > default_detailed.sigma_y_m,
            "A receptor at 500 m sees a wider plume than at 100 m"
        );
    }
}
