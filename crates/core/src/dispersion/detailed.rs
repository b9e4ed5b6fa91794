//! Detailed dispersion results.
//!
//! Extends the zone calculation with the Gaussian-plume quantities at the
//! receptor distance and the downwind concentration profile.
//!
//! # Peak Ground Concentration
//!
//! ```text
//! C_max = Q_eff · 1000 / (π · u · σy · σz)
//! ```
//!
//! with `σy`, `σz` from the Briggs fits at the receptor distance and `u`
//! floored at the calm threshold.

use crate::chemistry::ChemicalRecord;
use crate::core_types::ReleaseScenario;
use crate::dispersion::coefficients::dispersion_coefficients;
use crate::dispersion::config::DispersionConfig;
use crate::dispersion::profile::ConcentrationProfile;
use crate::dispersion::zones::{assemble_zones, zone_distances, ZoneResult, CALM_WIND_MS};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Share of the red zone inside which exposure is expected to be lethal
const LETHAL_FRACTION: f64 = 0.7;

/// Zones plus plume statistics for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedDispersion {
    pub zones: ZoneResult,
    /// Nominal rate × duration (kg)
    pub mass_released_kg: f64,
    /// Release rate after environmental adjustment (kg/min)
    pub adjusted_rate_kg_min: f64,
    pub base_distance_km: f64,
    pub chemical_factor: f64,
    /// Lateral spread at the receptor (m)
    pub sigma_y_m: f64,
    /// Vertical spread at the receptor (m)
    pub sigma_z_m: f64,
    pub max_concentration_mg_m3: f64,
    pub lethal_distance_km: f64,
    pub total_area_km2: f64,
    pub total_population: f64,
    pub profile: ConcentrationProfile,
}

/// Peak ground-level concentration for an effective rate and plume spread.
///
/// Returns 0 when either σ is not positive.
#[must_use]
pub fn peak_concentration(
    adjusted_rate_kg_min: f64,
    wind_speed_ms: f64,
    sigma_y_m: f64,
    sigma_z_m: f64,
) -> f64 {
    let spread = sigma_y_m * sigma_z_m;
    if spread <= 0.0 {
        return 0.0;
    }
    adjusted_rate_kg_min.max(0.0) * 1000.0 / (PI * wind_speed_ms.max(CALM_WIND_MS) * spread)
}

/// Compute zones, plume statistics and the concentration profile
#[must_use]
pub fn compute_detailed(
    scenario: &ReleaseScenario,
    chemical: Option<&ChemicalRecord>,
    config: &DispersionConfig,
) -> DetailedDispersion {
    let distances = zone_distances(scenario, chemical, config);
    let zones = assemble_zones(&distances, chemical, scenario);

    let (sigma_y, sigma_z) =
        dispersion_coefficients(scenario.stability, config.receptor_distance_m);
    let max_concentration = peak_concentration(
        distances.adjusted_rate_kg_min,
        *scenario.wind_speed,
        sigma_y,
        sigma_z,
    );

    let profile = ConcentrationProfile::sample(
        max_concentration,
        zones.yellow.distance_km * config.profile_extent,
        scenario.stability,
        *scenario.wind_speed,
        config.profile_samples,
    );

    DetailedDispersion {
        mass_released_kg: scenario.release_rate_kg_min.max(0.0) * scenario.duration_min.max(0.0),
        adjusted_rate_kg_min: distances.adjusted_rate_kg_min,
        base_distance_km: distances.base_distance_km,
        chemical_factor: distances.chemical_factor,
        sigma_y_m: sigma_y,
        sigma_z_m: sigma_z,
        max_concentration_mg_m3: max_concentration,
        lethal_distance_km: zones.red.distance_km * LETHAL_FRACTION,
        total_area_km2: zones.total_area_km2(),
        total_population: zones.total_population(),
        zones,
        profile,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::StabilityClass;
    use crate::chemistry::{ChemicalDatabase, ChemicalRepository};
    use crate::core_types::units::MetersPerSecond;
    use crate::core_types::Terrain;
    use crate::dispersion::zones::compute_zones;

    #[test]
    fn test_detailed_matches_zones() {
        let chlorine = ChemicalDatabase::shared().find("chlorine");
        let scenario = ReleaseScenario::new("chlorine", 10.0, 60.0);
        let config = DispersionConfig::default();
        let detailed = compute_detailed(&scenario, chlorine, &config);
        assert_eq!(detailed.zones, compute_zones(&scenario, chlorine, &config));
        assert_eq!(detailed.mass_released_kg, 600.0);
        assert!((detailed.lethal_distance_km - 0.7 * detailed.zones.red.distance_km).abs() < 1e-12);
        assert_eq!(detailed.profile.points.len(), 21);
        let expected_extent = 1.2 * detailed.zones.yellow.distance_km;
        assert!((detailed.profile.max_distance_km - expected_extent).abs() < 1e-9);
    }

    #[test]
    fn test_peak_concentration_formula() {
        // D at 100 m: σy = 8/√1.01, σz = 6/√1.15
        let scenario = ReleaseScenario::new("mystery gas", 10.0, 10.0)
            .with_wind(MetersPerSecond::new(2.0), 0.0)
            .with_stability(StabilityClass::D);
        let detailed = compute_detailed(&scenario, None, &DispersionConfig::deterministic());
        let sy = 8.0 / 1.01f64.sqrt();
        let sz = 6.0 / 1.15f64.sqrt();
        let expected = 10.0 * 1000.0 / (PI * 2.0 * sy * sz);
        assert!((detailed.sigma_y_m - sy).abs() < 1e-9);
        assert!((detailed.sigma_z_m - sz).abs() < 1e-9);
        assert!((detailed.max_concentration_mg_m3 - expected).abs() < 1e-6);
        assert_eq!(detailed.profile.peak(), detailed.max_concentration_mg_m3);
    }

    #[test]
    fn test_calm_wind_does_not_divide_by_zero() {
        let c = peak_concentration(10.0, 0.0, 5.0, 5.0);
        assert!(c.is_finite());
        assert_eq!(peak_concentration(10.0, 2.0, 0.0, 5.0), 0.0);
    }

    #[test]
    fn test_population_uses_terrain_density() {
        let base = ReleaseScenario::new("chlorine", 10.0, 10.0);
        let chlorine = ChemicalDatabase::shared().find("chlorine");
        let config = DispersionConfig::deterministic();
        let rural = compute_detailed(&base.with_terrain(Terrain::Rural), chlorine, &config);
        assert!((rural.total_population - rural.total_area_km2 * 100.0).abs() < 1e-6);
    }
}
