//! Core types and utilities

pub mod error;
pub mod geo;
pub mod risk;
pub mod scenario;
pub mod units;

pub use error::{HazardError, HazardResult};
pub use geo::Offset;
pub use risk::RiskLevel;
pub use scenario::{ReleaseScenario, SourceLocation, Terrain};
pub use units::*;
