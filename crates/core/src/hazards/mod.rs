//! Fire, explosion and leak hazards

pub mod blast;
pub mod leak_detection;

pub use blast::{assess_blast, flammability_risk, BlastAssessment, BlastConditions};
pub use leak_detection::{detect_leak, LeakDetectionResult, LeakReading};
