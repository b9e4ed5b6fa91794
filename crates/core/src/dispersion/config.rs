//! Dispersion engine configuration

use crate::dispersion::jitter::ZoneJitter;
use serde::{Deserialize, Serialize};

/// Tunables for zone and profile calculations.
///
/// Defaults reproduce the reference behaviour: ±5 % seeded jitter, a
/// 21-sample profile out to 1.2× the yellow zone, σ evaluated 100 m downwind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispersionConfig {
    /// Zone-distance jitter policy
    pub jitter: ZoneJitter,

    /// Number of concentration-profile samples (minimum 2)
    pub profile_samples: usize,

    /// Profile extent as a multiple of the yellow-zone distance
    pub profile_extent: f64,

    /// Downwind receptor distance (m) for σy/σz and peak concentration
    pub receptor_distance_m: f64,
}

impl Default for DispersionConfig {
    fn default() -> Self {
        Self {
            jitter: ZoneJitter::default(),
            profile_samples: 21,
            profile_extent: 1.2,
            receptor_distance_m: 100.0,
        }
    }
}

impl DispersionConfig {
    /// Default configuration with jitter switched off
    #[must_use]
    pub fn deterministic() -> Self {
        Self {
            jitter: ZoneJitter::Disabled,
            ..Self::default()
        }
    }

    pub fn with_jitter(mut self, jitter: ZoneJitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Set the profile resolution; values below 2 are raised to 2
    pub fn with_profile_samples(mut self, samples: usize) -> Self {
        self.profile_samples = samples.max(2);
        self
    }

    /// Set the profile extent; non-positive values fall back to 1.2
    pub fn with_profile_extent(mut self, extent: f64) -> Self {
        self.profile_extent = if extent > 0.0 { extent } else { 1.2 };
        self
    }

    /// Set the receptor distance; non-positive values fall back to 100 m
    pub fn with_receptor_distance(mut self, distance_m: f64) -> Self {
        self.receptor_distance_m = if distance_m > 0.0 { distance_m } else { 100.0 };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_and_fallbacks() {
        let config = DispersionConfig::deterministic()
            .with_jitter(ZoneJitter::seeded(5, 0.02))
            .with_profile_samples(41)
            .with_profile_extent(1.5)
            .with_receptor_distance(250.0);
        assert_eq!(config.jitter, ZoneJitter::seeded(5, 0.02));
        assert_eq!(config.profile_samples, 41);
        assert_eq!(config.profile_extent, 1.5);
        assert_eq!(config.receptor_distance_m, 250.0);

        let fallback = config
            .with_profile_samples(1)
            .with_profile_extent(0.0)
            .with_receptor_distance(-10.0);
        assert_eq!(fallback.profile_samples, 2);
        assert_eq!(fallback.profile_extent, 1.2);
        assert_eq!(fallback.receptor_distance_m, 100.0);
        assert_eq!(fallback.jitter, ZoneJitter::seeded(5, 0.02), "Jitter untouched");
    }

    #[test]
    fn test_deterministic_only_disables_jitter() {
        let config = DispersionConfig::deterministic();
        assert_eq!(config.jitter, ZoneJitter::Disabled);
        assert_eq!(
            DispersionConfig {
                jitter: ZoneJitter::default(),
                ..config
            },
            DispersionConfig::default()
        );
    }
}
