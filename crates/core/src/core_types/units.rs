//! Semantic unit types for the release inputs
//!
//! Newtype wrappers keep the handful of quantities that are easy to mix up
//! at the API boundary apart: a temperature in °C is not a pressure in atm,
//! and a wind speed in m/s is not a bearing in degrees.
//!
//! # Design Philosophy
//! - All types use f64; the engine is screening-level and O(1) per call
//! - Total ordering via `Ord` (NaN handled as greater than all values)
//! - `Deref` to the raw value so formulas read like the textbook
//! - Serde support for serialization
//! - Results use plain `f64` fields with the unit in the field name
//!
//! # Usage
//! ```
//! use chem_hazard_core::core_types::units::{Celsius, MetersPerSecond};
//!
//! let temp = Celsius::new(25.0);
//! assert!((temp.to_kelvin() - 298.15).abs() < 1e-9);
//!
//! let wind = MetersPerSecond::from_kmh(36.0);
//! assert!((*wind - 10.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Compare f64 values with total ordering using Rust's built-in `total_cmp`
#[inline]
fn f64_total_cmp(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

// ============================================================================
// TEMPERATURE
// ============================================================================

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f64);

impl Eq for Celsius {}

impl PartialOrd for Celsius {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Celsius {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Celsius {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Celsius {
    /// Absolute zero in Celsius
    pub const ABSOLUTE_ZERO: Celsius = Celsius(-273.15);

    /// Reference temperature for vapor pressures and release-rate corrections
    pub const REFERENCE: Celsius = Celsius(20.0);

    /// Celsius to Kelvin conversion offset (0°C = 273.15 K)
    const CELSIUS_KELVIN_OFFSET: f64 = 273.15;

    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to kelvin
    #[inline]
    #[must_use]
    pub fn to_kelvin(self) -> f64 {
        self.0 + Self::CELSIUS_KELVIN_OFFSET
    }

    /// Create from a temperature in kelvin
    #[inline]
    #[must_use]
    pub fn from_kelvin(kelvin: f64) -> Self {
        Celsius(kelvin - Self::CELSIUS_KELVIN_OFFSET)
    }
}

impl From<f64> for Celsius {
    fn from(v: f64) -> Self {
        Celsius(v)
    }
}

impl From<Celsius> for f64 {
    fn from(c: Celsius) -> f64 {
        c.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

// ============================================================================
// PRESSURE
// ============================================================================

/// Absolute pressure in standard atmospheres
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Atmospheres(f64);

impl Eq for Atmospheres {}

impl PartialOrd for Atmospheres {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Atmospheres {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Atmospheres {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Default for Atmospheres {
    /// One standard atmosphere
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Atmospheres {
    /// Sea-level standard pressure
    pub const STANDARD: Atmospheres = Atmospheres(1.0);

    /// Hectopascals per atmosphere
    pub const HPA_PER_ATM: f64 = 1013.25;

    /// Create a new pressure
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Atmospheres(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Create from hectopascals (millibars)
    #[inline]
    #[must_use]
    pub fn from_hpa(hpa: f64) -> Self {
        Atmospheres(hpa / Self::HPA_PER_ATM)
    }

    /// Ratio to one standard atmosphere
    #[inline]
    #[must_use]
    pub fn ratio(self) -> f64 {
        self.0 / Self::STANDARD.0
    }
}

impl From<f64> for Atmospheres {
    fn from(v: f64) -> Self {
        Atmospheres(v)
    }
}

impl fmt::Display for Atmospheres {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} atm", self.0)
    }
}

// ============================================================================
// VELOCITY
// ============================================================================

/// Velocity in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

impl Eq for MetersPerSecond {}

impl PartialOrd for MetersPerSecond {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetersPerSecond {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for MetersPerSecond {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MetersPerSecond {
    /// Readings above this are assumed to have been reported in km/h
    pub const KMH_HEURISTIC_THRESHOLD: f64 = 20.0;

    /// Create a new velocity
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MetersPerSecond(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Create from km/h
    #[inline]
    #[must_use]
    pub fn from_kmh(kmh: f64) -> Self {
        MetersPerSecond(kmh / 3.6)
    }

    /// Interpret a raw wind reading of unknown unit.
    ///
    /// Surface wind above 20 m/s is rare enough that such a reading is taken
    /// to be km/h and divided by 3.6.
    #[inline]
    #[must_use]
    pub fn from_reading(raw: f64) -> Self {
        if raw > Self::KMH_HEURISTIC_THRESHOLD {
            Self::from_kmh(raw)
        } else {
            MetersPerSecond(raw)
        }
    }
}

impl From<f64> for MetersPerSecond {
    fn from(v: f64) -> Self {
        MetersPerSecond(v)
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} m/s", self.0)
    }
}

// ============================================================================
// ANGLE
// ============================================================================

/// Compass bearing in degrees (0 = North, 90 = East), normalized to [0, 360)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Degrees(f64);

impl Eq for Degrees {}

impl PartialOrd for Degrees {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Degrees {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Degrees {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Degrees {
    /// Create a bearing, wrapping into [0, 360)
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Degrees(value.rem_euclid(360.0))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Bearing rotated clockwise by `delta` degrees
    #[inline]
    #[must_use]
    pub fn rotated(self, delta: f64) -> Self {
        Self::new(self.0 + delta)
    }

    /// Reciprocal bearing (e.g. the downwind bearing of a "from" direction)
    #[inline]
    #[must_use]
    pub fn opposite(self) -> Self {
        self.rotated(180.0)
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl From<f64> for Degrees {
    fn from(v: f64) -> Self {
        Degrees::new(v)
    }
}

impl fmt::Display for Degrees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}°", self.0)
    }
}

// ============================================================================
// RATIO
// ============================================================================

/// Percentage (0-100 for humidity and cloud cover)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f64);

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        f64_total_cmp(self.0, other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Percent {
    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Percent {
    fn from(v: f64) -> Self {
        Percent(v)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kelvin_round_trip() {
        let t = Celsius::new(-34.0);
        let back = Celsius::from_kelvin(t.to_kelvin());
        assert!((*back - -34.0).abs() < 1e-12);
    }

    #[test]
    fn test_wind_reading_heuristic() {
        // 10 is plausible m/s, 36 is almost certainly km/h
        assert_eq!(*MetersPerSecond::from_reading(10.0), 10.0);
        assert!((*MetersPerSecond::from_reading(36.0) - 10.0).abs() < 1e-12);
        // Exactly at the threshold is still m/s
        assert_eq!(*MetersPerSecond::from_reading(20.0), 20.0);
    }

    #[test]
    fn test_degrees_wrap() {
        assert_eq!(*Degrees::new(370.0), 10.0);
        assert_eq!(*Degrees::new(-90.0), 270.0);
        assert_eq!(*Degrees::new(270.0).opposite(), 90.0);
    }

    #[test]
    fn test_pressure_from_hpa() {
        let p = Atmospheres::from_hpa(1013.25);
        assert!((p.ratio() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_ordering() {
        let a = Celsius::new(10.0);
        let b = Celsius::new(20.0);
        assert_eq!(a.max(b), b);
        assert!(Percent::new(40.0) < Percent::new(70.0));
    }
}
