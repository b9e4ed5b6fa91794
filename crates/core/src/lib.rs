//! Chemical Release Hazard Assessment Core Library
//!
//! Screening-level consequence modelling for accidental releases of toxic
//! and flammable chemicals. Given a chemical and a handful of physical and
//! meteorological parameters, the engine produces:
//! - Red/orange/yellow hazard zones from AEGL thresholds
//! - Gaussian-plume spread (Briggs σy/σz), peak concentration and a
//!   downwind concentration profile
//! - Area and population exposure per zone
//! - Vapor/pool mass balance with pool evaporation
//! - Flammability and explosion risk with overpressure and safe distance
//! - Leak detection from sensor readings
//! - Sensor placement and shelter-versus-evacuation guidance
//!
//! All calculations are pure functions over an immutable chemical
//! repository. Zone jitter comes from a seeded generator, so results are
//! reproducible and calculations can run in parallel.
//!
//! ## Usage
//! ```
//! use chem_hazard_core::{HazardEngine, ReleaseScenario};
//! use chem_hazard_core::core_types::units::Celsius;
//!
//! let engine = HazardEngine::builtin();
//! let scenario =
//!     ReleaseScenario::new("chlorine", 10.0, 60.0).with_temperature(Celsius::new(25.0));
//! let zones = engine.compute_zones(&scenario);
//! assert!(zones.red.distance_km <= zones.orange.distance_km);
//! assert!(zones.orange.distance_km <= zones.yellow.distance_km);
//! ```
//!
//! This is a screening tool: no CFD, no building-wake or complex-terrain
//! modelling, and no regulatory-grade accuracy.

// Core types and utilities
pub mod core_types;

// Chemical data and unit conversion
pub mod chemistry;

// Stability classes and weather effects
pub mod atmosphere;

// Consequence models
pub mod dispersion;
pub mod hazards;
pub mod source_term;

// Response planning
pub mod response;

pub mod config;
pub mod engine;

// Re-export core types
pub use core_types::{
    HazardError, HazardResult, ReleaseScenario, RiskLevel, SourceLocation, Terrain,
};

// Re-export chemistry and weather
pub use atmosphere::{classify_stability, StabilityClass, WeatherImpact, WeatherObservation};
pub use chemistry::{ChemicalDatabase, ChemicalRecord, ChemicalRepository, ConcentrationUnit};

// Re-export results
pub use dispersion::{DetailedDispersion, DispersionConfig, ZoneJitter, ZoneLevel, ZoneResult};
pub use hazards::{BlastAssessment, BlastConditions, LeakDetectionResult, LeakReading};
pub use response::{
    ActionComparison, ProtectiveActionAssessment, ProtectiveActionKind, SensorPlacement,
};
pub use source_term::{MassBalanceResult, PhaseModel, SpillInput};

// Re-export the engine
pub use config::EngineConfig;
pub use engine::HazardEngine;
