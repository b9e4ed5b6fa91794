//! Weather impact on plume dispersion
//!
//! Collapses an observation into the three numbers the dispersion engine
//! consumes:
//!
//! ```text
//! wind_factor           = 0.8                      (wind < 5 m/s)
//!                       = 1.3                      (wind > 15 m/s)
//!                       = 1.0 + (wind − 5)·0.03    (otherwise)
//! stability_factor      = A 1.3, B 1.2, C 1.1, D 1.0, E 0.8, F 0.6
//! precip_factor         = max(0.7, 1 − precip_mm·0.1)
//! dispersion_multiplier = wind_factor · stability_factor · precip_factor
//! ```
//!
//! Rain scavenges soluble gases, hence the precipitation discount.

use crate::atmosphere::stability::StabilityClass;
use crate::atmosphere::weather::WeatherObservation;
use serde::{Deserialize, Serialize};

/// Dispersion adjustments derived from weather
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherImpact {
    pub wind_factor: f64,
    pub stability_class: StabilityClass,
    pub dispersion_multiplier: f64,
}

impl Default for WeatherImpact {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl WeatherImpact {
    /// Used when no observation is available
    pub const NEUTRAL: Self = Self {
        wind_factor: 1.0,
        stability_class: StabilityClass::D,
        dispersion_multiplier: 1.0,
    };

    /// Derive the impact from an observation; `None` gives [`Self::NEUTRAL`]
    #[must_use]
    pub fn from_observation(observation: Option<&WeatherObservation>) -> Self {
        let Some(obs) = observation else {
            return Self::NEUTRAL;
        };

        let wind_factor = wind_factor(*obs.wind_speed_ms());
        let stability_class = obs.stability_class();
        let precip = precipitation_factor(obs.effective_precipitation_mm());

        Self {
            wind_factor,
            stability_class,
            dispersion_multiplier: wind_factor * stability_factor(stability_class) * precip,
        }
    }
}

/// Piecewise wind factor; continuous at both 5 and 15 m/s
#[must_use]
pub fn wind_factor(wind_ms: f64) -> f64 {
    if wind_ms < 5.0 {
        0.8
    } else if wind_ms > 15.0 {
        1.3
    } else {
        1.0 + (wind_ms - 5.0) * 0.03
    }
}

/// Weather-side stability weighting (unstable air spreads the hazard wider)
#[must_use]
pub fn stability_factor(class: StabilityClass) -> f64 {
    match class {
        StabilityClass::A => 1.3,
        StabilityClass::B => 1.2,
        StabilityClass::C => 1.1,
        StabilityClass::D => 1.0,
        StabilityClass::E => 0.8,
        StabilityClass::F => 0.6,
    }
}

#[must_use]
pub fn precipitation_factor(precipitation_mm: f64) -> f64 {
    (1.0 - precipitation_mm.max(0.0) * 0.1).max(0.7)
}
