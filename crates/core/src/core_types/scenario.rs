//! Per-calculation release description
//!
//! A [`ReleaseScenario`] is built once by the caller and passed by reference
//! to every calculation; nothing in the engine mutates it.

use crate::atmosphere::{StabilityClass, WeatherImpact};
use crate::core_types::error::{ensure_finite, ensure_non_negative, ensure_percentage};
use crate::core_types::units::{Atmospheres, Celsius, Degrees, MetersPerSecond, Percent};
use crate::core_types::{HazardError, HazardResult};
use serde::{Deserialize, Serialize};

/// Land cover around the release point.
///
/// Drives both the release-rate terrain factor (surface roughness and
/// deposition) and the population density used for exposure estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Terrain {
    /// Dense built-up area
    Urban,
    /// Residential outskirts
    Suburban,
    /// Open farmland
    Rural,
    /// Woodland canopy
    Forest,
    /// Open water
    Water,
    /// Not specified
    #[default]
    Unspecified,
}

impl Terrain {
    /// Multiplier applied to the nominal release rate.
    ///
    /// Rough surfaces (buildings, canopy) mix and deposit the plume faster;
    /// open water offers almost no resistance.
    #[must_use]
    pub fn release_factor(self) -> f64 {
        match self {
            Terrain::Urban => 0.8,
            Terrain::Forest => 0.7,
            Terrain::Water => 1.2,
            Terrain::Suburban | Terrain::Rural | Terrain::Unspecified => 1.0,
        }
    }

    /// Residents per km²
    #[must_use]
    pub fn population_density(self) -> f64 {
        match self {
            Terrain::Urban => 3000.0,
            Terrain::Suburban => 1000.0,
            Terrain::Rural => 100.0,
            Terrain::Forest => 50.0,
            Terrain::Water => 10.0,
            Terrain::Unspecified => 500.0,
        }
    }

    /// Parse a terrain label, falling back to `Unspecified`
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "urban" | "city" => Terrain::Urban,
            "suburban" | "residential" => Terrain::Suburban,
            "rural" | "farmland" | "open" => Terrain::Rural,
            "forest" | "woodland" => Terrain::Forest,
            "water" | "sea" | "lake" => Terrain::Water,
            _ => Terrain::Unspecified,
        }
    }
}

/// Geographic position of the release (WGS84 degrees)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub lat: f64,
    pub lng: f64,
}

impl SourceLocation {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Everything one hazard calculation needs to know about a release.
///
/// # Example
/// ```
/// use chem_hazard_core::core_types::{ReleaseScenario, Terrain};
/// use chem_hazard_core::core_types::units::{Celsius, MetersPerSecond};
///
/// let scenario = ReleaseScenario::new("chlorine", 10.0, 60.0)
///     .with_temperature(Celsius::new(25.0))
///     .with_wind(MetersPerSecond::new(3.0), 270.0)
///     .with_terrain(Terrain::Urban);
/// assert!(scenario.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseScenario {
    /// Chemical identifier (case-insensitive)
    pub chemical: String,
    /// Nominal release rate (kg/min)
    pub release_rate_kg_min: f64,
    /// Release duration (min)
    pub duration_min: f64,
    /// Release / ambient temperature
    pub temperature: Celsius,
    /// Storage pressure of the released material
    pub pressure: Atmospheres,
    /// Wind speed at 10 m
    pub wind_speed: MetersPerSecond,
    /// Direction the wind blows from
    pub wind_direction: Degrees,
    /// Pasquill-Gifford stability class
    pub stability: StabilityClass,
    /// Release point
    pub source: SourceLocation,
    /// Land cover
    pub terrain: Terrain,
    /// Release inside a building
    pub indoor: bool,
    /// Relative humidity, if observed
    pub humidity: Option<Percent>,
    /// Ambient barometric pressure (hPa), if observed
    pub ambient_pressure_hpa: Option<f64>,
    /// Container volume (m³)
    pub container_volume_m3: Option<f64>,
    /// Mass in the container when the release started (kg)
    pub initial_mass_kg: Option<f64>,
    /// Pre-computed weather impact overriding the wind factor and multiplier
    pub weather_impact: Option<WeatherImpact>,
}

impl ReleaseScenario {
    /// Create a scenario with neutral defaults: 20°C, 1 atm, 3 m/s wind from
    /// the north, class D, unspecified terrain, outdoors.
    pub fn new(chemical: impl Into<String>, release_rate_kg_min: f64, duration_min: f64) -> Self {
        Self {
            chemical: chemical.into(),
            release_rate_kg_min,
            duration_min,
            temperature: Celsius::REFERENCE,
            pressure: Atmospheres::STANDARD,
            wind_speed: MetersPerSecond::new(3.0),
            wind_direction: Degrees::new(0.0),
            stability: StabilityClass::D,
            source: SourceLocation::default(),
            terrain: Terrain::Unspecified,
            indoor: false,
            humidity: None,
            ambient_pressure_hpa: None,
            container_volume_m3: None,
            initial_mass_kg: None,
            weather_impact: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Celsius) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_pressure(mut self, pressure: Atmospheres) -> Self {
        self.pressure = pressure;
        self
    }

    /// Set wind speed and the direction it blows from (degrees)
    pub fn with_wind(mut self, speed: MetersPerSecond, direction_deg: f64) -> Self {
        self.wind_speed = speed;
        self.wind_direction = Degrees::new(direction_deg);
        self
    }

    pub fn with_stability(mut self, stability: StabilityClass) -> Self {
        self.stability = stability;
        self
    }

    pub fn with_source(mut self, lat: f64, lng: f64) -> Self {
        self.source = SourceLocation::new(lat, lng);
        self
    }

    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn with_indoor(mut self, indoor: bool) -> Self {
        self.indoor = indoor;
        self
    }

    pub fn with_humidity(mut self, humidity: Percent) -> Self {
        self.humidity = Some(humidity);
        self
    }

    pub fn with_ambient_pressure_hpa(mut self, hpa: f64) -> Self {
        self.ambient_pressure_hpa = Some(hpa);
        self
    }

    /// Describe the container so time-to-empty can be reported
    pub fn with_container(mut self, volume_m3: f64, initial_mass_kg: f64) -> Self {
        self.container_volume_m3 = Some(volume_m3);
        self.initial_mass_kg = Some(initial_mass_kg);
        self
    }

    pub fn with_weather_impact(mut self, impact: WeatherImpact) -> Self {
        self.weather_impact = Some(impact);
        self
    }

    /// Check the scenario lies inside the engine's declared input domain.
    ///
    /// Calculations do not call this; callers validate raw input first.
    pub fn validate(&self) -> HazardResult<()> {
        if self.chemical.trim().is_empty() {
            return Err(HazardError::InvalidInput {
                field: "chemical".to_string(),
                value: String::new(),
                reason: "Chemical identifier must not be empty".to_string(),
            });
        }
        ensure_non_negative("release_rate_kg_min", self.release_rate_kg_min)?;
        ensure_non_negative("duration_min", self.duration_min)?;
        ensure_finite("temperature", *self.temperature)?;
        if *self.temperature < *Celsius::ABSOLUTE_ZERO {
            return Err(HazardError::invalid_input(
                "temperature",
                *self.temperature,
                "Temperature is below absolute zero",
            ));
        }
        ensure_finite("pressure", *self.pressure)?;
        if *self.pressure <= 0.0 {
            return Err(HazardError::invalid_input(
                "pressure",
                *self.pressure,
                "Pressure must be positive",
            ));
        }
        ensure_non_negative("wind_speed", *self.wind_speed)?;
        if let Some(humidity) = self.humidity {
            ensure_percentage("humidity", *humidity)?;
        }
        if let Some(hpa) = self.ambient_pressure_hpa {
            ensure_finite("ambient_pressure_hpa", hpa)?;
            if hpa <= 0.0 {
                return Err(HazardError::invalid_input(
                    "ambient_pressure_hpa",
                    hpa,
                    "Pressure must be positive",
                ));
            }
        }
        if let Some(volume) = self.container_volume_m3 {
            ensure_non_negative("container_volume_m3", volume)?;
        }
        if let Some(mass) = self.initial_mass_kg {
            ensure_non_negative("initial_mass_kg", mass)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_neutral() {
        let s = ReleaseScenario::new("ammonia", 5.0, 30.0);
        assert_eq!(s.stability, StabilityClass::D);
        assert_eq!(*s.pressure, 1.0);
        assert_eq!(s.terrain.release_factor(), 1.0);
        assert!(!s.indoor);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        assert!(ReleaseScenario::new("ammonia", -1.0, 30.0).validate().is_err());
        assert!(ReleaseScenario::new("ammonia", 1.0, f64::NAN).validate().is_err());
        assert!(ReleaseScenario::new("", 1.0, 1.0).validate().is_err());
        let s = ReleaseScenario::new("ammonia", 1.0, 1.0).with_pressure(Atmospheres::new(0.0));
        assert!(s.validate().is_err());
        let s = ReleaseScenario::new("ammonia", 1.0, 1.0).with_humidity(Percent::new(120.0));
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_terrain_tables() {
        assert_eq!(Terrain::Urban.population_density(), 3000.0);
        assert_eq!(Terrain::Water.release_factor(), 1.2);
        assert_eq!(Terrain::from_label("Forest"), Terrain::Forest);
        assert_eq!(Terrain::from_label("moon"), Terrain::Unspecified);
    }
}
