//! Distance-banded hazard zones.
//!
//! # Algorithm
//!
//! ```text
//! Q_eff     = adjusted release rate (see `release`)
//! base      = √Q_eff · stability_factor · wind_factor
//! scaled    = base · chemical_factor
//! red       = clamp(0.3 · scaled · j₁, 0.5, 5)   km
//! orange    = clamp(0.6 · scaled · j₂, 1, 8)     km
//! yellow    = clamp(1.0 · scaled · j₃, 1.5, 15)  km
//! ```
//!
//! `wind_factor` is `√u / 2` (u floored at the calm threshold) unless a
//! weather impact supplies one. `jₙ` are seeded jitter factors. After
//! clamping, each outer zone is lifted to at least its inner neighbour so
//! `red ≤ orange ≤ yellow` always holds.
//!
//! Zone concentrations are the chemical's AEGL-3/2/1 in mg/m³, or 5/3/1
//! mg/m³ when the chemical is unknown. A tier without an established AEGL
//! is filled from the 5/3/1 ladder scaled to its nearest established tier.

use crate::chemistry::ChemicalRecord;
use crate::core_types::ReleaseScenario;
use crate::dispersion::coefficients::distance_factor;
use crate::dispersion::config::DispersionConfig;
use crate::dispersion::exposure::{population_at_risk, sector_areas};
use crate::dispersion::jitter::JitterSource;
use crate::dispersion::release::ReleaseAdjustment;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// Wind speed floor (m/s) wherever wind scales or divides
pub const CALM_WIND_MS: f64 = 0.5;

/// Fraction of the scaled distance for each zone
const RED_FRACTION: f64 = 0.3;
const ORANGE_FRACTION: f64 = 0.6;
const YELLOW_FRACTION: f64 = 1.0;

/// Plausible zone radii (km)
const RED_RANGE_KM: RangeInclusive<f64> = 0.5..=5.0;
const ORANGE_RANGE_KM: RangeInclusive<f64> = 1.0..=8.0;
const YELLOW_RANGE_KM: RangeInclusive<f64> = 1.5..=15.0;

/// Concentrations (mg/m³) used when no AEGL ladder is available
pub const DEFAULT_ZONE_CONCENTRATIONS: [f64; 3] = [5.0, 3.0, 1.0];

/// Chemical factor bounds
const CHEMICAL_FACTOR_MIN: f64 = 0.8;
const CHEMICAL_FACTOR_MAX: f64 = 2.0;

/// Hazard zone tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneLevel {
    /// AEGL-3: life-threatening
    Red,
    /// AEGL-2: disabling
    Orange,
    /// AEGL-1: discomfort
    Yellow,
}

impl fmt::Display for ZoneLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ZoneLevel::Red => "Red",
            ZoneLevel::Orange => "Orange",
            ZoneLevel::Yellow => "Yellow",
        })
    }
}

/// One hazard zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Downwind extent (km)
    pub distance_km: f64,
    /// Threshold concentration at the zone boundary (mg/m³)
    pub concentration_mg_m3: f64,
    /// Sector area belonging to this zone only (km²)
    pub area_km2: f64,
    /// Residents inside this zone only
    pub population: f64,
}

/// Red, orange and yellow zones for one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneResult {
    pub red: Zone,
    pub orange: Zone,
    pub yellow: Zone,
}

impl ZoneResult {
    #[must_use]
    pub fn zone(&self, level: ZoneLevel) -> &Zone {
        match level {
            ZoneLevel::Red => &self.red,
            ZoneLevel::Orange => &self.orange,
            ZoneLevel::Yellow => &self.yellow,
        }
    }

    /// Innermost zone containing `distance_km`, if any
    #[must_use]
    pub fn zone_at_distance(&self, distance_km: f64) -> Option<ZoneLevel> {
        if distance_km <= self.red.distance_km {
            Some(ZoneLevel::Red)
        } else if distance_km <= self.orange.distance_km {
            Some(ZoneLevel::Orange)
        } else if distance_km <= self.yellow.distance_km {
            Some(ZoneLevel::Yellow)
        } else {
            None
        }
    }

    /// Most severe zone whose threshold `concentration_mg_m3` reaches
    #[must_use]
    pub fn zone_for_concentration(&self, concentration_mg_m3: f64) -> Option<ZoneLevel> {
        if concentration_mg_m3 >= self.red.concentration_mg_m3 {
            Some(ZoneLevel::Red)
        } else if concentration_mg_m3 >= self.orange.concentration_mg_m3 {
            Some(ZoneLevel::Orange)
        } else if concentration_mg_m3 >= self.yellow.concentration_mg_m3 {
            Some(ZoneLevel::Yellow)
        } else {
            None
        }
    }

    /// Combined sector area of all three zones (km²)
    #[must_use]
    pub fn total_area_km2(&self) -> f64 {
        self.red.area_km2 + self.orange.area_km2 + self.yellow.area_km2
    }

    /// Combined population of all three zones
    #[must_use]
    pub fn total_population(&self) -> f64 {
        self.red.population + self.orange.population + self.yellow.population
    }
}

/// Zone geometry before areas are attached
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ZoneDistances {
    pub adjusted_rate_kg_min: f64,
    pub base_distance_km: f64,
    pub chemical_factor: f64,
    pub red_km: f64,
    pub orange_km: f64,
    pub yellow_km: f64,
}

/// Wind factor used for zone scaling
#[must_use]
pub fn zone_wind_factor(scenario: &ReleaseScenario) -> f64 {
    match scenario.weather_impact {
        Some(impact) => impact.wind_factor,
        None => (*scenario.wind_speed).max(CALM_WIND_MS).sqrt() / 2.0,
    }
}

/// Chemical volatility/weight factor.
///
/// Known chemical: `clamp(√MW/10 · log10(max(1, VP))/3, 0.8, 2.0)`.
/// Unknown chemical: a fixed per-name fallback.
#[must_use]
pub fn chemical_factor(chemical: Option<&ChemicalRecord>, name: &str) -> f64 {
    match chemical {
        Some(record) => {
            let weight = record.molecular_weight.max(0.0).sqrt() / 10.0;
            let volatility = record.vapor_pressure_mmhg.max(1.0).log10() / 3.0;
            (weight * volatility).clamp(CHEMICAL_FACTOR_MIN, CHEMICAL_FACTOR_MAX)
        }
        None => fallback_chemical_factor(name),
    }
}

/// Fallback factors for well-known toxic gases missing from a repository
#[must_use]
pub fn fallback_chemical_factor(name: &str) -> f64 {
    match name.trim().to_ascii_lowercase().as_str() {
        "chlorine" | "phosgene" => 1.5,
        "hydrogen cyanide" | "hydrogen sulfide" => 1.4,
        "ammonia" | "sulfur dioxide" | "hydrogen chloride" => 1.3,
        _ => 1.2,
    }
}

/// Zone threshold concentrations `[red, orange, yellow]` in mg/m³.
///
/// Established AEGL tiers are used as-is. A missing tier (AEGL of 0) is the
/// default ladder value scaled to the nearest established tier, so the
/// result stays strictly decreasing.
#[must_use]
pub fn zone_concentrations(chemical: Option<&ChemicalRecord>) -> [f64; 3] {
    let Some(record) = chemical else {
        return DEFAULT_ZONE_CONCENTRATIONS;
    };
    let (aegl1, aegl2, aegl3) = record.aegl_mg_m3();
    let established = [aegl3, aegl2, aegl1].map(|c| (c > 0.0).then_some(c));

    let known: Vec<f64> = established.iter().flatten().copied().collect();
    if known.is_empty() || known.windows(2).any(|w| w[1] >= w[0]) {
        warn!(
            "No usable AEGL ladder for {}, using default zone concentrations",
            record.name
        );
        return DEFAULT_ZONE_CONCENTRATIONS;
    }

    let mut tiers = [0.0; 3];
    for (i, tier) in tiers.iter_mut().enumerate() {
        *tier = match established[i] {
            Some(c) => c,
            None => established
                .iter()
                .enumerate()
                .filter_map(|(j, &c)| c.map(|c| (j, c)))
                .min_by_key(|&(j, _)| (j.abs_diff(i), j))
                .map_or(DEFAULT_ZONE_CONCENTRATIONS[i], |(j, c)| {
                    c * DEFAULT_ZONE_CONCENTRATIONS[i] / DEFAULT_ZONE_CONCENTRATIONS[j]
                }),
        };
    }
    // A scaled orange can land at or below an established yellow
    if tiers[1] >= tiers[0] || tiers[1] <= tiers[2] {
        tiers[1] = (tiers[0] * tiers[2]).sqrt();
    }

    if known.len() < 3 {
        debug!(
            "Filled missing AEGL tiers for {}: {:.3}/{:.3}/{:.3} mg/m³",
            record.name, tiers[0], tiers[1], tiers[2]
        );
    }
    tiers
}

pub(crate) fn zone_distances(
    scenario: &ReleaseScenario,
    chemical: Option<&ChemicalRecord>,
    config: &DispersionConfig,
) -> ZoneDistances {
    let adjusted_rate =
        ReleaseAdjustment::for_scenario(scenario).apply(scenario.release_rate_kg_min);
    let base_distance =
        adjusted_rate.sqrt() * distance_factor(scenario.stability) * zone_wind_factor(scenario);
    let chem_factor = chemical_factor(chemical, &scenario.chemical);
    let scaled = base_distance * chem_factor;

    let mut jitter = JitterSource::for_scenario(config.jitter, scenario);
    let red = clamp_range(scaled * RED_FRACTION * jitter.next_factor(), &RED_RANGE_KM);
    let orange = clamp_range(scaled * ORANGE_FRACTION * jitter.next_factor(), &ORANGE_RANGE_KM)
        .max(red);
    let yellow = clamp_range(scaled * YELLOW_FRACTION * jitter.next_factor(), &YELLOW_RANGE_KM)
        .max(orange);

    debug!(
        "Zones for {}: Q_eff={:.3} kg/min, base={:.3} km, chem={:.3}, zones={:.2}/{:.2}/{:.2} km",
        scenario.chemical, adjusted_rate, base_distance, chem_factor, red, orange, yellow
    );

    ZoneDistances {
        adjusted_rate_kg_min: adjusted_rate,
        base_distance_km: base_distance,
        chemical_factor: chem_factor,
        red_km: red,
        orange_km: orange,
        yellow_km: yellow,
    }
}

fn clamp_range(value: f64, range: &RangeInclusive<f64>) -> f64 {
    value.clamp(*range.start(), *range.end())
}

pub(crate) fn assemble_zones(
    distances: &ZoneDistances,
    chemical: Option<&ChemicalRecord>,
    scenario: &ReleaseScenario,
) -> ZoneResult {
    let [c_red, c_orange, c_yellow] = zone_concentrations(chemical);
    let [a_red, a_orange, a_yellow] =
        sector_areas(distances.red_km, distances.orange_km, distances.yellow_km);
    let density = scenario.terrain.population_density();

    let zone = |distance_km, concentration_mg_m3, area_km2| Zone {
        distance_km,
        concentration_mg_m3,
        area_km2,
        population: population_at_risk(area_km2, density),
    };

    ZoneResult {
        red: zone(distances.red_km, c_red, a_red),
        orange: zone(distances.orange_km, c_orange, a_orange),
        yellow: zone(distances.yellow_km, c_yellow, a_yellow),
    }
}

/// Compute red/orange/yellow zones for a scenario.
///
/// `chemical` is the repository record for `scenario.chemical`, or `None`
/// when the chemical is unknown (fallback factor and default thresholds).
#[must_use]
pub fn compute_zones(
    scenario: &ReleaseScenario,
    chemical: Option<&ChemicalRecord>,
    config: &DispersionConfig,
) -> ZoneResult {
    let distances = zone_distances(scenario, chemical, config);
    assemble_zones(&distances, chemical, scenario)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::StabilityClass;
    use crate::chemistry::{ChemicalDatabase, ChemicalRepository};
    use crate::core_types::units::MetersPerSecond;

    fn chlorine() -> &'static ChemicalRecord {
        ChemicalDatabase::shared().find("chlorine").unwrap()
    }

    #[test]
    fn test_chemical_factor_chlorine() {
        // √70.9/10 · log10(5168)/3 = 0.842 · 1.238 = 1.042
        let f = chemical_factor(Some(chlorine()), "chlorine");
        assert!((f - 1.0425).abs() < 0.002, "factor = {f}");
    }

    #[test]
    fn test_chemical_factor_clamped() {
        let db = ChemicalDatabase::shared();
        // Toluene: low vapor pressure pushes the factor to the floor
        let f = chemical_factor(db.find("toluene"), "toluene");
        assert_eq!(f, 0.8);
    }

    #[test]
    fn test_fallback_factor() {
        assert_eq!(chemical_factor(None, "Chlorine"), 1.5);
        assert_eq!(chemical_factor(None, "mystery gas"), 1.2);
    }

    #[test]
    fn test_zone_concentrations_from_aegl() {
        let [red, orange, yellow] = zone_concentrations(Some(chlorine()));
        // AEGL-3 20 ppm, AEGL-2 2 ppm, AEGL-1 0.5 ppm
        assert!((red - 20.0 * 70.9 / 24.45).abs() < 1e-9);
        assert!((orange - 2.0 * 70.9 / 24.45).abs() < 1e-9);
        assert!((yellow - 0.5 * 70.9 / 24.45).abs() < 1e-9);
    }

    #[test]
    fn test_missing_tier_is_filled_below_established_ones() {
        let db = ChemicalDatabase::shared();

        // Phosgene: AEGL-3 0.75 ppm, AEGL-2 0.3 ppm, no AEGL-1
        let [red, orange, yellow] = zone_concentrations(db.find("phosgene"));
        let mg = |ppm: f64| ppm * 98.92 / 24.45;
        assert!((red - mg(0.75)).abs() < 1e-9, "red {red} should be AEGL-3");
        assert!((orange - mg(0.3)).abs() < 1e-9, "orange {orange} should be AEGL-2");
        assert!((yellow - orange / 3.0).abs() < 1e-9, "yellow {yellow}");
        assert!(red < DEFAULT_ZONE_CONCENTRATIONS[0], "red must not loosen to the default");

        // Ethylene oxide: AEGL-3 200 ppm, AEGL-2 45 ppm, no AEGL-1
        let [red, orange, yellow] = zone_concentrations(db.find("ethylene oxide"));
        assert!((red - 200.0 * 44.05 / 24.45).abs() < 1e-9);
        assert!(red > orange && orange > yellow && yellow > 0.0);

        assert_eq!(zone_concentrations(None), DEFAULT_ZONE_CONCENTRATIONS);
    }

    #[test]
    fn test_missing_middle_tier_stays_between_neighbours() {
        let record = chlorine().clone().with_aegl(10.0, 0.0, 12.0);
        let [red, orange, yellow] = zone_concentrations(Some(&record));
        assert!(red > orange && orange > yellow, "{red}/{orange}/{yellow}");
        assert!((orange - (red * yellow).sqrt()).abs() < 1e-9);

        let bare = chlorine().clone().with_aegl(0.0, 0.0, 0.0);
        assert_eq!(zone_concentrations(Some(&bare)), DEFAULT_ZONE_CONCENTRATIONS);
    }

    #[test]
    fn test_exact_distances_without_jitter() {
        // Q = 100 kg/min, D, 4 m/s: base = 10 · 1.0 · 1.0 = 10 km
        let scenario = ReleaseScenario::new("mystery gas", 100.0, 10.0)
            .with_wind(MetersPerSecond::new(4.0), 0.0)
            .with_stability(StabilityClass::D);
        let zones = compute_zones(&scenario, None, &DispersionConfig::deterministic());
        // scaled = 10 · 1.2 = 12
        assert!((zones.red.distance_km - 3.6).abs() < 1e-9);
        assert!((zones.orange.distance_km - 7.2).abs() < 1e-9);
        assert!((zones.yellow.distance_km - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_distances_clamped() {
        let tiny = ReleaseScenario::new("chlorine", 0.01, 1.0);
        let zones = compute_zones(&tiny, Some(chlorine()), &DispersionConfig::deterministic());
        assert_eq!(zones.red.distance_km, 0.5);
        assert_eq!(zones.orange.distance_km, 1.0);
        assert_eq!(zones.yellow.distance_km, 1.5);

        let huge = ReleaseScenario::new("chlorine", 1.0e6, 1.0)
            .with_stability(StabilityClass::F);
        let zones = compute_zones(&huge, Some(chlorine()), &DispersionConfig::deterministic());
        assert_eq!(zones.red.distance_km, 5.0);
        assert_eq!(zones.orange.distance_km, 8.0);
        assert_eq!(zones.yellow.distance_km, 15.0);
    }

    #[test]
    fn test_zero_wind_is_finite() {
        let scenario = ReleaseScenario::new("chlorine", 10.0, 10.0)
            .with_wind(MetersPerSecond::new(0.0), 0.0);
        let zones = compute_zones(&scenario, Some(chlorine()), &DispersionConfig::default());
        assert!(zones.yellow.distance_km.is_finite());
        assert!(zones.red.distance_km >= 0.5);
    }

    #[test]
    fn test_zone_lookup_helpers() {
        let scenario = ReleaseScenario::new("chlorine", 10.0, 10.0);
        let zones = compute_zones(&scenario, Some(chlorine()), &DispersionConfig::deterministic());
        assert_eq!(zones.zone_at_distance(0.0), Some(ZoneLevel::Red));
        assert_eq!(zones.zone_at_distance(zones.yellow.distance_km + 1.0), None);
        assert_eq!(
            zones.zone_for_concentration(zones.red.concentration_mg_m3),
            Some(ZoneLevel::Red)
        );
        assert_eq!(zones.zone_for_concentration(0.0), None);
    }
}
