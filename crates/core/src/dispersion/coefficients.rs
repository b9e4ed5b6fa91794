//! Stability-dependent coefficient tables for the dispersion engine.
//!
//! # Dispersion Coefficients
//!
//! Lateral and vertical plume spread follow the Briggs (1973) open-country
//! fits, written in a single form for every class:
//!
//! ```text
//! σ(d) = a · d · (1 + b · d)^-0.5        d in metres
//! ```
//!
//! | Class | a (σy) | b (σy) | a (σz) | b (σz) |
//! |-------|--------|--------|--------|--------|
//! | A     | 0.22   | 0.0001 | 0.20   | 0      |
//! | B     | 0.16   | 0.0001 | 0.12   | 0      |
//! | C     | 0.11   | 0.0001 | 0.08   | 0.0002 |
//! | D     | 0.08   | 0.0001 | 0.06   | 0.0015 |
//! | E     | 0.06   | 0.0001 | 0.03   | 0.0003 |
//! | F     | 0.04   | 0.0001 | 0.016  | 0.0003 |
//!
//! # References
//!
//! - Briggs, G.A. (1973). "Diffusion estimation for small emissions."
//!   ATDL Contribution File No. 79, NOAA.
//! - Gifford, F.A. (1961). "Use of routine meteorological observations for
//!   estimating atmospheric dispersion." Nuclear Safety, 2(4), 47-51.

use crate::atmosphere::StabilityClass;

/// Coefficient pair `(a, b)` for `σ = a·d·(1 + b·d)^-0.5`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SigmaCoefficients {
    pub a: f64,
    pub b: f64,
}

impl SigmaCoefficients {
    const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Evaluate σ (m) at downwind distance `distance_m`
    #[must_use]
    pub fn sigma(&self, distance_m: f64) -> f64 {
        let d = distance_m.max(0.0);
        self.a * d * (1.0 + self.b * d).powf(-0.5)
    }
}

/// Lateral (σy) coefficients
#[must_use]
pub fn sigma_y_coefficients(class: StabilityClass) -> SigmaCoefficients {
    match class {
        StabilityClass::A => SigmaCoefficients::new(0.22, 0.0001),
        StabilityClass::B => SigmaCoefficients::new(0.16, 0.0001),
        StabilityClass::C => SigmaCoefficients::new(0.11, 0.0001),
        StabilityClass::D => SigmaCoefficients::new(0.08, 0.0001),
        StabilityClass::E => SigmaCoefficients::new(0.06, 0.0001),
        StabilityClass::F => SigmaCoefficients::new(0.04, 0.0001),
    }
}

/// Vertical (σz) coefficients
#[must_use]
pub fn sigma_z_coefficients(class: StabilityClass) -> SigmaCoefficients {
    match class {
        StabilityClass::A => SigmaCoefficients::new(0.20, 0.0),
        StabilityClass::B => SigmaCoefficients::new(0.12, 0.0),
        StabilityClass::C => SigmaCoefficients::new(0.08, 0.0002),
        StabilityClass::D => SigmaCoefficients::new(0.06, 0.0015),
        StabilityClass::E => SigmaCoefficients::new(0.03, 0.0003),
        StabilityClass::F => SigmaCoefficients::new(0.016, 0.0003),
    }
}

/// `(σy, σz)` in metres at `distance_m` downwind
#[must_use]
pub fn dispersion_coefficients(class: StabilityClass, distance_m: f64) -> (f64, f64) {
    (
        sigma_y_coefficients(class).sigma(distance_m),
        sigma_z_coefficients(class).sigma(distance_m),
    )
}

/// Zone-distance multiplier: stable air carries a hazard further
#[must_use]
pub fn distance_factor(class: StabilityClass) -> f64 {
    match class {
        StabilityClass::A => 0.5,
        StabilityClass::B => 0.7,
        StabilityClass::C => 0.85,
        StabilityClass::D => 1.0,
        StabilityClass::E => 1.25,
        StabilityClass::F => 1.5,
    }
}

/// Decay shape `(k, n)` for `C(x) = C₀·exp(−k·(x/x_max)ⁿ)`
#[must_use]
pub fn profile_shape(class: StabilityClass) -> (f64, f64) {
    match class {
        StabilityClass::A => (4.0, 1.5),
        StabilityClass::B => (3.5, 1.6),
        StabilityClass::C => (3.0, 1.7),
        StabilityClass::D => (2.5, 1.8),
        StabilityClass::E => (2.0, 1.9),
        StabilityClass::F => (1.5, 2.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigma_at_zero_distance() {
        for class in StabilityClass::ALL {
            assert_eq!(dispersion_coefficients(class, 0.0), (0.0, 0.0));
        }
    }

    #[test]
    fn test_neutral_sigma_at_one_km() {
        // D: σy = 0.08·1000/√1.1 = 76.3 m, σz = 0.06·1000/√2.5 = 37.9 m
        let (sy, sz) = dispersion_coefficients(StabilityClass::D, 1000.0);
        assert!((sy - 76.28).abs() < 0.05, "σy = {sy}");
        assert!((sz - 37.95).abs() < 0.05, "σz = {sz}");
    }

    #[test]
    fn test_unstable_spreads_more_than_stable() {
        let (sy_a, sz_a) = dispersion_coefficients(StabilityClass::A, 500.0);
        let (sy_f, sz_f) = dispersion_coefficients(StabilityClass::F, 500.0);
        assert!(sy_a > sy_f);
        assert!(sz_a > sz_f);
    }

    #[test]
    fn test_distance_factor_monotone_in_stability() {
        for pair in StabilityClass::ALL.windows(2) {
            assert!(distance_factor(pair[0]) < distance_factor(pair[1]));
        }
        assert_eq!(distance_factor(StabilityClass::D), 1.0);
    }
}
