//! Atmospheric stability and weather effects on dispersion.

pub mod stability;
pub mod weather;
pub mod weather_impact;

pub use stability::{classify_stability, StabilityClass};
pub use weather::{precipitation_from_code, WeatherObservation};
pub use weather_impact::WeatherImpact;
