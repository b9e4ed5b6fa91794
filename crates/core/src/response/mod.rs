//! Emergency response planning: where to put sensors and which protective
//! action to take.

pub mod protective_action;
pub mod sensors;

pub use protective_action::{
    compare_actions, evaluate_protective_action, ActionComparison, EvacuationTier,
    ProtectiveActionAssessment, ProtectiveActionKind,
};
pub use sensors::{recommend_sensors, SensorPlacement, SensorRole, SensorType};
