//! Weather observations supplied by the caller.
//!
//! The engine never fetches weather; an external collaborator hands over
//! one [`WeatherObservation`] per calculation. Values follow the common
//! forecast-API layout (WMO weather codes, cloud cover in %, day flag).

use crate::atmosphere::stability::{classify_stability, StabilityClass};
use crate::atmosphere::weather_impact::WeatherImpact;
use crate::core_types::error::{ensure_finite, ensure_non_negative, ensure_percentage};
use crate::core_types::units::{Celsius, Degrees, MetersPerSecond, Percent};
use crate::core_types::{HazardResult, ReleaseScenario};
use serde::{Deserialize, Serialize};

/// Surface weather at the release site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub temperature: Celsius,
    pub humidity: Percent,
    /// m/s; readings above 20 are treated as km/h
    pub wind_speed: f64,
    /// Direction the wind blows from
    pub wind_direction: Degrees,
    pub cloud_cover: Percent,
    /// mm in the last hour; estimated from `weather_code` when absent
    pub precipitation_mm: Option<f64>,
    /// WMO present-weather code
    pub weather_code: Option<u16>,
    pub is_day: bool,
}

impl WeatherObservation {
    /// Observation with explicit wind and sky, no precipitation
    #[must_use]
    pub fn new(
        temperature: Celsius,
        humidity: Percent,
        wind_speed: f64,
        wind_direction: f64,
        cloud_cover: Percent,
        is_day: bool,
    ) -> Self {
        Self {
            temperature,
            humidity,
            wind_speed,
            wind_direction: Degrees::new(wind_direction),
            cloud_cover,
            precipitation_mm: None,
            weather_code: None,
            is_day,
        }
    }

    pub fn with_precipitation(mut self, precipitation_mm: f64) -> Self {
        self.precipitation_mm = Some(precipitation_mm);
        self
    }

    pub fn with_weather_code(mut self, code: u16) -> Self {
        self.weather_code = Some(code);
        self
    }

    /// Wind speed in m/s after the km/h heuristic
    #[must_use]
    pub fn wind_speed_ms(&self) -> MetersPerSecond {
        MetersPerSecond::from_reading(self.wind_speed.max(0.0))
    }

    /// Pasquill-Gifford class for these conditions
    #[must_use]
    pub fn stability_class(&self) -> StabilityClass {
        classify_stability(self.wind_speed, self.cloud_cover, self.is_day)
    }

    /// Precipitation in mm, falling back to an estimate from the weather code
    #[must_use]
    pub fn effective_precipitation_mm(&self) -> f64 {
        self.precipitation_mm
            .map_or_else(|| precipitation_from_code(self.weather_code), |p| p.max(0.0))
    }

    /// Copy this observation's wind, humidity, stability and weather impact
    /// onto a scenario. The release temperature is left untouched: process
    /// temperature need not match ambient.
    #[must_use]
    pub fn apply_to(&self, scenario: ReleaseScenario) -> ReleaseScenario {
        scenario
            .with_wind(self.wind_speed_ms(), *self.wind_direction)
            .with_humidity(self.humidity)
            .with_stability(self.stability_class())
            .with_weather_impact(WeatherImpact::from_observation(Some(self)))
    }

    pub fn validate(&self) -> HazardResult<()> {
        ensure_finite("temperature", *self.temperature)?;
        ensure_percentage("humidity", *self.humidity)?;
        ensure_non_negative("wind_speed", self.wind_speed)?;
        ensure_percentage("cloud_cover", *self.cloud_cover)?;
        if let Some(p) = self.precipitation_mm {
            ensure_non_negative("precipitation_mm", p)?;
        }
        Ok(())
    }
}

/// Typical hourly precipitation for a WMO weather code (mm)
#[must_use]
pub fn precipitation_from_code(code: Option<u16>) -> f64 {
    match code {
        Some(51..=57) => 0.5, // drizzle
        Some(61..=67) => 2.0, // rain
        Some(71..=77) => 1.0, // snow
        Some(80..=86) => 3.0, // showers
        Some(95..=99) => 5.0, // thunderstorm
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeatherObservation {
        WeatherObservation::new(
            Celsius::new(18.0),
            Percent::new(60.0),
            4.0,
            225.0,
            Percent::new(20.0),
            true,
        )
    }

    #[test]
    fn test_precipitation_from_code() {
        assert_eq!(precipitation_from_code(Some(63)), 2.0);
        assert_eq!(precipitation_from_code(Some(96)), 5.0);
        assert_eq!(precipitation_from_code(Some(0)), 0.0);
        assert_eq!(precipitation_from_code(None), 0.0);
    }

    #[test]
    fn test_measured_precipitation_wins() {
        let obs = sample().with_weather_code(95).with_precipitation(0.2);
        assert_eq!(obs.effective_precipitation_mm(), 0.2);
        let obs = sample().with_weather_code(95);
        assert_eq!(obs.effective_precipitation_mm(), 5.0);
    }

    #[test]
    fn test_apply_to_scenario() {
        let scenario = sample().apply_to(ReleaseScenario::new("ammonia", 1.0, 10.0));
        assert_eq!(*scenario.wind_speed, 4.0);
        assert_eq!(*scenario.wind_direction, 225.0);
        assert_eq!(scenario.stability, StabilityClass::B);
        assert_eq!(scenario.humidity, Some(Percent::new(60.0)));
        assert!(scenario.weather_impact.is_some());
        // Temperature untouched
        assert_eq!(*scenario.temperature, 20.0);
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());
        let mut bad = sample();
        bad.cloud_cover = Percent::new(140.0);
        assert!(bad.validate().is_err());
    }
}
