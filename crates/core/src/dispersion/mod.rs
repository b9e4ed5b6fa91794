//! Gaussian-plume dispersion: hazard zones, plume spread, exposure and the
//! downwind concentration profile.
//!
//! All functions are pure over their inputs. Zone jitter is driven by the
//! seeded source in [`jitter`], so identical inputs always produce identical
//! zones regardless of thread or call order.

pub mod coefficients;
pub mod config;
pub mod detailed;
pub mod exposure;
pub mod jitter;
pub mod profile;
pub mod release;
pub mod zones;

pub use coefficients::{dispersion_coefficients, distance_factor};
pub use config::DispersionConfig;
pub use detailed::{compute_detailed, DetailedDispersion};
pub use jitter::{JitterSource, ZoneJitter};
pub use profile::{ConcentrationProfile, ProfilePoint};
pub use release::ReleaseAdjustment;
pub use zones::{chemical_factor, compute_zones, Zone, ZoneLevel, ZoneResult};
