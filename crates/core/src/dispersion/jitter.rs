//! Seeded presentation jitter for zone distances.
//!
//! Zone radii can be perturbed by a few percent so adjacent scenarios do not
//! draw identical rings. The perturbation is never drawn from an ambient
//! generator: every calculation builds its own `ChaCha8Rng` from the
//! configured seed mixed with a fingerprint of the scenario inputs, so the
//! same scenario always gets the same rings, neighbouring scenarios get
//! different ones, and calculations can run on any thread in any order.

use crate::core_types::ReleaseScenario;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Largest amplitude accepted (±10 %)
pub const MAX_JITTER_AMPLITUDE: f64 = 0.10;

/// Zone jitter policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ZoneJitter {
    /// Exact zone distances
    Disabled,
    /// Multiply each zone by a factor drawn uniformly from
    /// `[1 − amplitude, 1 + amplitude]`
    Seeded { seed: u64, amplitude: f64 },
}

impl Default for ZoneJitter {
    /// ±5 % with seed 0
    fn default() -> Self {
        ZoneJitter::Seeded {
            seed: 0,
            amplitude: 0.05,
        }
    }
}

impl ZoneJitter {
    /// Seeded jitter with amplitude clamped to [0, 0.10]
    #[must_use]
    pub fn seeded(seed: u64, amplitude: f64) -> Self {
        ZoneJitter::Seeded {
            seed,
            amplitude: amplitude.clamp(0.0, MAX_JITTER_AMPLITUDE),
        }
    }
}

/// Per-calculation stream of jitter factors
pub struct JitterSource {
    rng: Option<ChaCha8Rng>,
    amplitude: f64,
}

impl JitterSource {
    #[must_use]
    pub fn new(policy: ZoneJitter) -> Self {
        match policy {
            ZoneJitter::Seeded { seed, amplitude } if amplitude > 0.0 => Self {
                rng: Some(ChaCha8Rng::seed_from_u64(seed)),
                amplitude: amplitude.min(MAX_JITTER_AMPLITUDE),
            },
            _ => Self {
                rng: None,
                amplitude: 0.0,
            },
        }
    }

    /// Stream for one scenario: the policy seed mixed with the scenario's
    /// fingerprint.
    #[must_use]
    pub fn for_scenario(policy: ZoneJitter, scenario: &ReleaseScenario) -> Self {
        match policy {
            ZoneJitter::Seeded { seed, amplitude } => Self::new(ZoneJitter::Seeded {
                seed: scenario_seed(seed, scenario),
                amplitude,
            }),
            ZoneJitter::Disabled => Self::new(policy),
        }
    }

    /// Next multiplicative factor; exactly 1.0 when disabled
    pub fn next_factor(&mut self) -> f64 {
        match self.rng.as_mut() {
            Some(rng) => 1.0 + rng.random_range(-self.amplitude..=self.amplitude),
            None => 1.0,
        }
    }
}

/// Stable hash of the inputs that shape the zones, folded into `seed`
fn scenario_seed(seed: u64, scenario: &ReleaseScenario) -> u64 {
    let mut hasher = FxHasher::default();
    seed.hash(&mut hasher);
    scenario.chemical.trim().to_ascii_lowercase().hash(&mut hasher);
    for value in [
        scenario.release_rate_kg_min,
        scenario.duration_min,
        *scenario.temperature,
        *scenario.pressure,
        *scenario.wind_speed,
        *scenario.wind_direction,
        scenario.source.lat,
        scenario.source.lng,
    ] {
        value.to_bits().hash(&mut hasher);
    }
    scenario.stability.hash(&mut hasher);
    scenario.terrain.hash(&mut hasher);
    scenario.indoor.hash(&mut hasher);
    scenario.humidity.map(|h| (*h).to_bits()).hash(&mut hasher);
    scenario.ambient_pressure_hpa.map(f64::to_bits).hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::MetersPerSecond;

    fn factors(mut source: JitterSource) -> [f64; 3] {
        [source.next_factor(), source.next_factor(), source.next_factor()]
    }

    #[test]
    fn test_disabled_is_identity() {
        let mut source = JitterSource::new(ZoneJitter::Disabled);
        for _ in 0..10 {
            assert_eq!(source.next_factor(), 1.0);
        }
        let mut zero = JitterSource::new(ZoneJitter::seeded(7, 0.0));
        assert_eq!(zero.next_factor(), 1.0);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = JitterSource::new(ZoneJitter::seeded(42, 0.05));
        let mut b = JitterSource::new(ZoneJitter::seeded(42, 0.05));
        for _ in 0..16 {
            assert_eq!(a.next_factor(), b.next_factor());
        }
    }

    #[test]
    fn test_factors_within_amplitude() {
        let mut source = JitterSource::new(ZoneJitter::seeded(3, 0.05));
        for _ in 0..1000 {
            let f = source.next_factor();
            assert!((0.95..=1.05).contains(&f), "factor {f}");
        }
    }

    #[test]
    fn test_amplitude_is_clamped() {
        assert_eq!(
            ZoneJitter::seeded(1, 0.5),
            ZoneJitter::Seeded {
                seed: 1,
                amplitude: MAX_JITTER_AMPLITUDE
            }
        );
    }

    #[test]
    fn test_scenario_fingerprint_drives_stream() {
        let policy = ZoneJitter::seeded(42, 0.05);
        let base = ReleaseScenario::new("Chlorine", 10.0, 60.0);

        let again = ReleaseScenario::new(" chlorine ", 10.0, 60.0);
        assert_eq!(
            factors(JitterSource::for_scenario(policy, &base)),
            factors(JitterSource::for_scenario(policy, &again)),
            "Identical scenarios (modulo name case) must share a stream"
        );

        let neighbours = [
            ReleaseScenario::new("chlorine", 10.5, 60.0),
            ReleaseScenario::new("ammonia", 10.0, 60.0),
            base.clone().with_wind(MetersPerSecond::new(4.0), 0.0),
        ];
        for other in &neighbours {
            assert_ne!(
                factors(JitterSource::for_scenario(policy, &base)),
                factors(JitterSource::for_scenario(policy, other)),
                "Scenario {} @ {} kg/min should draw its own factors",
                other.chemical,
                other.release_rate_kg_min
            );
        }

        let disabled = JitterSource::for_scenario(ZoneJitter::Disabled, &base);
        assert_eq!(factors(disabled), [1.0; 3]);
    }
}
