//! Downwind centreline concentration profile.
//!
//! # Decay Model
//!
//! ```text
//! C(x) = C₀ · exp(−k' · (x / x_max)ⁿ)
//! k'   = k · (0.7 + 0.3 · clamp(u, 1, 10) / 5)
//! ```
//!
//! `(k, n)` come from the stability class (see `coefficients::profile_shape`):
//! unstable air mixes the plume down faster (large `k`, small `n`). Higher
//! wind speeds steepen the decay through `k'`.

use crate::atmosphere::StabilityClass;
use crate::dispersion::coefficients::profile_shape;
use serde::{Deserialize, Serialize};

/// One sample of the profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub distance_km: f64,
    pub concentration_mg_m3: f64,
}

/// Sampled concentration profile along the plume axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationProfile {
    /// Evenly spaced samples from the source to `max_distance_km`
    pub points: Vec<ProfilePoint>,
    pub max_distance_km: f64,
    /// Decay constant after wind scaling
    pub decay_k: f64,
    /// Decay exponent
    pub decay_n: f64,
}

impl ConcentrationProfile {
    /// Sample `samples` points (minimum 2) over `[0, max_distance_km]`.
    #[must_use]
    pub fn sample(
        peak_mg_m3: f64,
        max_distance_km: f64,
        class: StabilityClass,
        wind_speed_ms: f64,
        samples: usize,
    ) -> Self {
        let (k, n) = profile_shape(class);
        let decay_k = k * (0.7 + 0.3 * wind_speed_ms.clamp(1.0, 10.0) / 5.0);
        let samples = samples.max(2);
        let max_distance_km = max_distance_km.max(0.0);
        let last = (samples - 1) as f64;

        let points = (0..samples)
            .map(|i| {
                let relative = i as f64 / last;
                ProfilePoint {
                    distance_km: relative * max_distance_km,
                    concentration_mg_m3: peak_mg_m3 * (-decay_k * relative.powf(n)).exp(),
                }
            })
            .collect();

        Self {
            points,
            max_distance_km,
            decay_k,
            decay_n: n,
        }
    }

    /// Linearly interpolated concentration at `distance_km`.
    ///
    /// Returns `None` outside `[0, max_distance_km]`.
    #[must_use]
    pub fn concentration_at(&self, distance_km: f64) -> Option<f64> {
        if !(0.0..=self.max_distance_km).contains(&distance_km) {
            return None;
        }
        let upper = self
            .points
            .iter()
            .position(|p| p.distance_km >= distance_km)?;
        if upper == 0 {
            return self.points.first().map(|p| p.concentration_mg_m3);
        }
        let (a, b) = (self.points[upper - 1], self.points[upper]);
        let span = b.distance_km - a.distance_km;
        if span <= 0.0 {
            return Some(b.concentration_mg_m3);
        }
        let t = (distance_km - a.distance_km) / span;
        Some(a.concentration_mg_m3 + t * (b.concentration_mg_m3 - a.concentration_mg_m3))
    }

    /// Peak (first-sample) concentration
    #[must_use]
    pub fn peak(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.concentration_mg_m3)
    }

    /// Furthest sampled distance where the concentration is still at or
    /// above `threshold_mg_m3`
    #[must_use]
    pub fn reach_of(&self, threshold_mg_m3: f64) -> Option<f64> {
        self.points
            .iter()
            .rev()
            .find(|p| p.concentration_mg_m3 >= threshold_mg_m3)
            .map(|p| p.distance_km)
    }
}
