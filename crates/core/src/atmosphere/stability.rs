//! Pasquill-Gifford atmospheric stability classes.
//!
//! Stability governs how quickly turbulence spreads a plume: class A
//! (strong daytime convection) dilutes fastest, class F (clear, calm night)
//! keeps a plume narrow and concentrated over long distances.
//!
//! # Classification Scheme
//!
//! ```text
//!                      wind (m/s)   <2    2-3   3-5   5-6   ≥6
//! Day, clear  (<40%)                A     A/B   B     C     D
//! Day, partly (40-70%)              one class toward D
//! Day, overcast (≥70%)              C below 5 m/s, else D
//! Night, cloudy (≥50%)              E below 3 m/s, else D
//! Night, clear  (<50%)              F below 3, E below 5, else D
//! ```
//!
//! Borderline "A/B" resolves to B, the more stable of the pair.
//!
//! # References
//!
//! - Pasquill, F. (1961). "The estimation of the dispersion of windborne
//!   material." Meteorological Magazine, 90, 33-49.
//! - Turner, D.B. (1970). Workbook of Atmospheric Dispersion Estimates.

use crate::core_types::units::{MetersPerSecond, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pasquill-Gifford stability class, A (most unstable) to F (most stable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum StabilityClass {
    /// Extremely unstable
    A,
    /// Moderately unstable
    B,
    /// Slightly unstable
    C,
    /// Neutral
    #[default]
    D,
    /// Slightly stable
    E,
    /// Moderately stable
    F,
}

impl StabilityClass {
    /// All classes from most unstable to most stable
    pub const ALL: [StabilityClass; 6] = [
        StabilityClass::A,
        StabilityClass::B,
        StabilityClass::C,
        StabilityClass::D,
        StabilityClass::E,
        StabilityClass::F,
    ];

    /// Parse "A".."F" or a borderline label such as "A/B".
    ///
    /// Borderline labels resolve to the more stable class; anything
    /// unrecognised is treated as neutral (D).
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let upper = label.trim().to_ascii_uppercase();
        upper
            .split(['/', '-'])
            .filter_map(Self::from_letter)
            .max()
            .unwrap_or(StabilityClass::D)
    }

    fn from_letter(letter: &str) -> Option<Self> {
        match letter.trim() {
            "A" => Some(StabilityClass::A),
            "B" => Some(StabilityClass::B),
            "C" => Some(StabilityClass::C),
            "D" => Some(StabilityClass::D),
            "E" => Some(StabilityClass::E),
            "F" => Some(StabilityClass::F),
            _ => None,
        }
    }

    /// Single-letter label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            StabilityClass::A => "A",
            StabilityClass::B => "B",
            StabilityClass::C => "C",
            StabilityClass::D => "D",
            StabilityClass::E => "E",
            StabilityClass::F => "F",
        }
    }

    /// One class closer to neutral (D). Stable classes are left alone.
    #[must_use]
    pub fn toward_neutral(self) -> Self {
        match self {
            StabilityClass::A => StabilityClass::B,
            StabilityClass::B => StabilityClass::C,
            StabilityClass::C | StabilityClass::D => StabilityClass::D,
            StabilityClass::E => StabilityClass::E,
            StabilityClass::F => StabilityClass::F,
        }
    }

    /// True for classes E and F
    #[must_use]
    pub fn is_stable(self) -> bool {
        self > StabilityClass::D
    }
}

impl fmt::Display for StabilityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cloud cover at or above which a daytime sky is overcast
const DAY_OVERCAST_PERCENT: f64 = 70.0;
/// Cloud cover at or above which a daytime sky is partly cloudy
const DAY_PARTLY_CLOUDY_PERCENT: f64 = 40.0;
/// Cloud cover at or above which a night sky suppresses radiative cooling
const NIGHT_CLOUDY_PERCENT: f64 = 50.0;

/// Derive the Pasquill-Gifford class from surface observations.
///
/// # Arguments
/// * `wind_reading` - Wind speed; readings above 20 are taken as km/h
/// * `cloud_cover` - Sky cover (0-100 %)
/// * `is_day` - Daytime flag
///
/// Never fails; any finite input maps to one of A-F.
#[must_use]
pub fn classify_stability(wind_reading: f64, cloud_cover: Percent, is_day: bool) -> StabilityClass {
    let wind = *MetersPerSecond::from_reading(wind_reading.max(0.0));
    let cloud = cloud_cover.value();

    if is_day {
        if cloud >= DAY_OVERCAST_PERCENT {
            return if wind < 5.0 {
                StabilityClass::C
            } else {
                StabilityClass::D
            };
        }
        let clear_sky = clear_day_class(wind);
        if cloud >= DAY_PARTLY_CLOUDY_PERCENT {
            clear_sky.toward_neutral()
        } else {
            clear_sky
        }
    } else if cloud >= NIGHT_CLOUDY_PERCENT {
        if wind < 3.0 {
            StabilityClass::E
        } else {
            StabilityClass::D
        }
    } else if wind < 3.0 {
        StabilityClass::F
    } else if wind < 5.0 {
        StabilityClass::E
    } else {
        StabilityClass::D
    }
}

/// Strong-insolation column of the Pasquill table
fn clear_day_class(wind: f64) -> StabilityClass {
    if wind < 2.0 {
        StabilityClass::A
    } else if wind < 5.0 {
        // 2-3 m/s is the A/B borderline, resolved to B
        StabilityClass::B
    } else if wind < 6.0 {
        StabilityClass::C
    } else {
        StabilityClass::D
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_day_table() {
        let clear = Percent::new(10.0);
        assert_eq!(classify_stability(1.0, clear, true), StabilityClass::A);
        assert_eq!(classify_stability(2.5, clear, true), StabilityClass::B);
        assert_eq!(classify_stability(4.0, clear, true), StabilityClass::B);
        assert_eq!(classify_stability(5.5, clear, true), StabilityClass::C);
        assert_eq!(classify_stability(8.0, clear, true), StabilityClass::D);
    }

    #[test]
    fn test_partly_cloudy_day_shifts_toward_neutral() {
        let partly = Percent::new(55.0);
        assert_eq!(classify_stability(1.0, partly, true), StabilityClass::B);
        assert_eq!(classify_stability(4.0, partly, true), StabilityClass::C);
        assert_eq!(classify_stability(5.5, partly, true), StabilityClass::D);
    }

    #[test]
    fn test_overcast_day() {
        let overcast = Percent::new(90.0);
        assert_eq!(classify_stability(2.0, overcast, true), StabilityClass::C);
        assert_eq!(classify_stability(7.0, overcast, true), StabilityClass::D);
    }

    #[test]
    fn test_night() {
        let clear = Percent::new(0.0);
        let cloudy = Percent::new(80.0);
        assert_eq!(classify_stability(1.0, clear, false), StabilityClass::F);
        assert_eq!(classify_stability(4.0, clear, false), StabilityClass::E);
        assert_eq!(classify_stability(9.0, clear, false), StabilityClass::D);
        assert_eq!(classify_stability(1.0, cloudy, false), StabilityClass::E);
        assert_eq!(classify_stability(4.0, cloudy, false), StabilityClass::D);
    }

    #[test]
    fn test_kmh_readings_are_converted() {
        // 36 km/h = 10 m/s -> neutral on a clear day
        assert_eq!(classify_stability(36.0, Percent::new(0.0), true), StabilityClass::D);
        // 21.6 km/h = 6 m/s
        assert_eq!(classify_stability(21.6, Percent::new(0.0), false), StabilityClass::D);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StabilityClass::from_label("a"), StabilityClass::A);
        assert_eq!(StabilityClass::from_label("A/B"), StabilityClass::B);
        assert_eq!(StabilityClass::from_label("c-d"), StabilityClass::D);
        assert_eq!(StabilityClass::from_label("??"), StabilityClass::D);
        for class in StabilityClass::ALL {
            assert_eq!(StabilityClass::from_label(class.label()), class);
        }
    }

    #[test]
    fn test_stable_classes() {
        let stable: Vec<_> = StabilityClass::ALL
            .into_iter()
            .filter(|c| c.is_stable())
            .collect();
        assert_eq!(stable, vec![StabilityClass::E, StabilityClass::F]);
        assert!(classify_stability(1.0, Percent::new(0.0), false).is_stable());
        assert!(!classify_stability(1.0, Percent::new(0.0), true).is_stable());
    }
}
