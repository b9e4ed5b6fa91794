//! `HazardEngine`: the entry points callers use.
//!
//! The engine pairs an injected, read-only [`ChemicalRepository`] with an
//! [`EngineConfig`]. Every method is a pure calculation; unknown chemicals
//! degrade to the documented neutral result and are reported through
//! `tracing` rather than as errors.

use crate::atmosphere::WeatherObservation;
use crate::chemistry::{
    convert, ChemicalDatabase, ChemicalRecord, ChemicalRepository, ConcentrationUnit,
};
use crate::config::EngineConfig;
use crate::core_types::ReleaseScenario;
use crate::dispersion::{self, DetailedDispersion, ZoneResult};
use crate::hazards::{self, BlastAssessment, BlastConditions, LeakDetectionResult, LeakReading};
use crate::response::{
    self, ActionComparison, ProtectiveActionAssessment, ProtectiveActionKind, SensorPlacement,
};
use crate::source_term::{self, MassBalanceResult, SpillInput};
use rayon::prelude::*;
use tracing::{debug, warn};

/// Hazard-assessment engine over an immutable chemical repository.
///
/// `HazardEngine` is `Send + Sync`; one instance can serve any number of
/// threads.
#[derive(Clone, Copy)]
pub struct HazardEngine<'a> {
    repository: &'a dyn ChemicalRepository,
    config: EngineConfig,
}

impl HazardEngine<'static> {
    /// Engine over the built-in chemical table with default configuration
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(ChemicalDatabase::shared())
    }
}

impl<'a> HazardEngine<'a> {
    pub fn new(repository: &'a dyn ChemicalRepository) -> Self {
        Self {
            repository,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        debug!("Hazard engine configured: {:?}", config);
        self.config = config;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn repository(&self) -> &'a dyn ChemicalRepository {
        self.repository
    }

    /// Look up a chemical, logging when the fallback path will be taken
    fn resolve(&self, name: &str) -> Option<&'a ChemicalRecord> {
        match self.repository.lookup(name) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("{}; using fallback values", e);
                None
            }
        }
    }

    /// Red/orange/yellow hazard zones
    pub fn compute_zones(&self, scenario: &ReleaseScenario) -> ZoneResult {
        let chemical = self.resolve(&scenario.chemical);
        dispersion::compute_zones(scenario, chemical, &self.config.dispersion)
    }

    /// Zones plus σ, peak concentration, exposure and the downwind profile
    pub fn compute_detailed_dispersion(&self, scenario: &ReleaseScenario) -> DetailedDispersion {
        let chemical = self.resolve(&scenario.chemical);
        dispersion::compute_detailed(scenario, chemical, &self.config.dispersion)
    }

    /// Vapor/pool partition; all zeros for an unknown chemical
    pub fn compute_mass_balance(&self, chemical: &str, input: &SpillInput) -> MassBalanceResult {
        source_term::compute_mass_balance(self.resolve(chemical), input)
    }

    /// Mass balance for the release described by a scenario
    pub fn compute_scenario_mass_balance(&self, scenario: &ReleaseScenario) -> MassBalanceResult {
        self.compute_mass_balance(&scenario.chemical, &SpillInput::from_scenario(scenario))
    }

    /// Flammability and explosion risk; `None` risks for an unknown chemical
    pub fn assess_blast(&self, chemical: &str, conditions: &BlastConditions) -> BlastAssessment {
        hazards::assess_blast(self.resolve(chemical), conditions)
    }

    /// Leak check for one reading.
    ///
    /// Omitted background and multiplier fall back to the configured
    /// defaults.
    pub fn detect_leak(
        &self,
        chemical: &str,
        measured_mg_m3: f64,
        background_mg_m3: Option<f64>,
        multiplier: Option<f64>,
    ) -> LeakDetectionResult {
        let reading = LeakReading::new(
            measured_mg_m3,
            background_mg_m3.unwrap_or(self.config.leak_background_mg_m3),
            multiplier.unwrap_or(self.config.leak_multiplier),
        );
        let result = hazards::detect_leak(self.resolve(chemical), &reading);
        debug!(
            "Leak check for {}: threshold={:.4} mg/m³, leaking={}",
            chemical, result.detection_threshold_mg_m3, result.is_leaking
        );
        result
    }

    /// Convert a concentration; returns `value` unchanged for an unknown
    /// chemical
    pub fn convert_concentration(
        &self,
        value: f64,
        chemical: &str,
        from: ConcentrationUnit,
        to: ConcentrationUnit,
    ) -> f64 {
        let molecular_weight = self.resolve(chemical).map(|r| r.molecular_weight);
        convert(value, molecular_weight, from, to)
    }

    /// Sensor positions for a scenario's zones
    #[allow(clippy::unused_self)]
    pub fn recommend_sensors(
        &self,
        scenario: &ReleaseScenario,
        zones: &ZoneResult,
        count: usize,
    ) -> Vec<SensorPlacement> {
        response::recommend_sensors(scenario, zones, count)
    }

    /// Score evacuation or sheltering against the configured exposure budget
    pub fn evaluate_protective_action(
        &self,
        scenario: &ReleaseScenario,
        evacuation_time_min: f64,
        kind: ProtectiveActionKind,
    ) -> ProtectiveActionAssessment {
        response::evaluate_protective_action(
            scenario,
            self.resolve(&scenario.chemical),
            evacuation_time_min,
            kind,
            self.config.significant_exposure_min,
        )
    }

    /// Evaluate both protective actions and recommend one
    pub fn compare_protective_actions(
        &self,
        scenario: &ReleaseScenario,
        evacuation_time_min: f64,
    ) -> ActionComparison {
        response::compare_actions(
            scenario,
            self.resolve(&scenario.chemical),
            evacuation_time_min,
            self.config.significant_exposure_min,
        )
    }

    /// Fold a weather observation into a scenario (wind, humidity,
    /// stability and weather impact)
    pub fn apply_weather(
        &self,
        scenario: ReleaseScenario,
        observation: &WeatherObservation,
    ) -> ReleaseScenario {
        let scenario = observation.apply_to(scenario);
        if let Some(impact) = scenario.weather_impact {
            debug!(
                "Weather impact: wind_factor={:.2}, class={}, multiplier={:.3}",
                impact.wind_factor, impact.stability_class, impact.dispersion_multiplier
            );
        }
        scenario
    }

    // ═══════════════════════════════════════════════════════════════════
    // BATCH
    // ═══════════════════════════════════════════════════════════════════

    /// Zones for many independent scenarios on the rayon pool.
    ///
    /// Results are in input order and identical to sequential evaluation.
    pub fn compute_zones_batch(&self, scenarios: &[ReleaseScenario]) -> Vec<ZoneResult> {
        scenarios.par_iter().map(|s| self.compute_zones(s)).collect()
    }

    /// Detailed dispersion for many independent scenarios on the rayon pool
    pub fn compute_detailed_batch(&self, scenarios: &[ReleaseScenario]) -> Vec<DetailedDispersion> {
        scenarios
            .par_iter()
            .map(|s| self.compute_detailed_dispersion(s))
            .collect()
    }
}

impl std::fmt::Debug for HazardEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HazardEngine")
            .field("chemicals", &self.repository.names().len())
            .field("config", &self.config)
            .finish()
    }
}
