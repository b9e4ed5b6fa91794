//! Source term: how much of a release becomes airborne

pub mod mass_balance;

pub use mass_balance::{
    compute_mass_balance, EvaporationSample, MassBalanceResult, MassBreakdown, PhaseModel,
    ReleaseRates, SpillInput,
};
