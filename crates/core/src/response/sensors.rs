//! Sensor placement around a release.
//!
//! Sensors are allocated in priority order until the requested count is
//! exhausted:
//!
//! | Priority | Role       | Count                 | Placement                                  |
//! |----------|------------|-----------------------|--------------------------------------------|
//! | 1        | Source     | 1                     | at the release point                       |
//! | 2        | Downwind   | ⌈0.4·n⌉, at most 3    | `orange·(i+1)/(k+1)` on the downwind axis  |
//! | 3        | Crosswind  | ⌈0.3·n⌉, at most 3    | ±90° alternating, within half the yellow   |
//! | 4        | Perimeter  | the rest (mobile)     | ±75° arc around downwind at 0.9·yellow     |
//!
//! Wind direction is the direction the wind blows *from*; the plume travels
//! along the opposite bearing.

use crate::core_types::geo::{displace, offset_along};
use crate::core_types::units::Degrees;
use crate::core_types::{ReleaseScenario, SourceLocation};
use crate::dispersion::ZoneResult;
use serde::{Deserialize, Serialize};

const MAX_DOWNWIND: usize = 3;
const MAX_CROSSWIND: usize = 3;
/// Half-width of the perimeter arc (degrees)
const PERIMETER_HALF_ARC: f64 = 75.0;
const PERIMETER_FRACTION: f64 = 0.9;

/// Deployment kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorType {
    Fixed,
    Mobile,
}

/// What a sensor is there to watch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorRole {
    Source,
    Downwind,
    Crosswind,
    Perimeter,
}

impl SensorRole {
    /// 1 (most important) to 4
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            SensorRole::Source => 1,
            SensorRole::Downwind => 2,
            SensorRole::Crosswind => 3,
            SensorRole::Perimeter => 4,
        }
    }

    #[must_use]
    pub fn sensor_type(self) -> SensorType {
        match self {
            SensorRole::Perimeter => SensorType::Mobile,
            _ => SensorType::Fixed,
        }
    }
}

/// One recommended sensor position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorPlacement {
    pub lat: f64,
    pub lng: f64,
    pub sensor_type: SensorType,
    pub priority: u8,
    pub role: SensorRole,
    /// Bearing from the source
    pub bearing: Degrees,
    /// Distance from the source (km)
    pub distance_km: f64,
}

impl SensorPlacement {
    fn at(source: SourceLocation, role: SensorRole, bearing: Degrees, distance_km: f64) -> Self {
        let position = displace(source, &offset_along(bearing, distance_km));
        Self {
            lat: position.lat,
            lng: position.lng,
            sensor_type: role.sensor_type(),
            priority: role.priority(),
            role,
            bearing,
            distance_km,
        }
    }
}

fn allocation(count: usize, share: f64, cap: usize, remaining: usize) -> usize {
    let wanted = (count as f64 * share).ceil() as usize;
    wanted.min(cap).min(remaining)
}

/// Recommend up to `count` sensor positions, ordered by priority
#[must_use]
pub fn recommend_sensors(
    scenario: &ReleaseScenario,
    zones: &ZoneResult,
    count: usize,
) -> Vec<SensorPlacement> {
    let mut placements = Vec::with_capacity(count);
    if count == 0 {
        return placements;
    }

    let source = scenario.source;
    let downwind = scenario.wind_direction.opposite();
    let orange_km = zones.orange.distance_km;
    let yellow_km = zones.yellow.distance_km;

    placements.push(SensorPlacement::at(source, SensorRole::Source, downwind, 0.0));
    let mut remaining = count - 1;

    let n_down = allocation(count, 0.4, MAX_DOWNWIND, remaining);
    for i in 0..n_down {
        let distance = orange_km * (i + 1) as f64 / (n_down + 1) as f64;
        placements.push(SensorPlacement::at(source, SensorRole::Downwind, downwind, distance));
    }
    remaining -= n_down;

    let n_cross = allocation(count, 0.3, MAX_CROSSWIND, remaining);
    let pairs = n_cross.div_ceil(2);
    for j in 0..n_cross {
        let side = if j % 2 == 0 { 90.0 } else { -90.0 };
        let pair = j / 2;
        let distance = 0.5 * yellow_km * (pair + 1) as f64 / (pairs + 1) as f64;
        placements.push(SensorPlacement::at(
            source,
            SensorRole::Crosswind,
            downwind.rotated(side),
            distance,
        ));
    }
    remaining -= n_cross;

    let perimeter_km = PERIMETER_FRACTION * yellow_km;
    for k in 0..remaining {
        let offset = if remaining == 1 {
            0.0
        } else {
            -PERIMETER_HALF_ARC + 2.0 * PERIMETER_HALF_ARC * k as f64 / (remaining - 1) as f64
        };
        placements.push(SensorPlacement::at(
            source,
            SensorRole::Perimeter,
            downwind.rotated(offset),
            perimeter_km,
        ));
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispersion::{Zone, ZoneResult};

    fn zones() -> ZoneResult {
        let zone = |distance_km| Zone {
            distance_km,
            concentration_mg_m3: 1.0,
            area_km2: 0.0,
            population: 0.0,
        };
        ZoneResult {
            red: zone(1.0),
            orange: zone(2.0),
            yellow: zone(4.0),
        }
    }

    fn scenario() -> ReleaseScenario {
        // Wind from the west blows the plume east
        ReleaseScenario::new("chlorine", 10.0, 10.0)
            .with_source(40.0, -75.0)
            .with_wind(crate::core_types::MetersPerSecond::new(3.0), 270.0)
    }

    fn count_role(placements: &[SensorPlacement], role: SensorRole) -> usize {
        placements.iter().filter(|p| p.role == role).count()
    }

    #[test]
    fn test_ten_sensor_allocation() {
        let placements = recommend_sensors(&scenario(), &zones(), 10);
        assert_eq!(placements.len(), 10);
        assert_eq!(count_role(&placements, SensorRole::Source), 1);
        assert_eq!(count_role(&placements, SensorRole::Downwind), 3);
        assert_eq!(count_role(&placements, SensorRole::Crosswind), 3);
        assert_eq!(count_role(&placements, SensorRole::Perimeter), 3);
        assert!(placements.windows(2).all(|w| w[0].priority <= w[1].priority));
    }

    #[test]
    fn test_source_sensor_at_release_point() {
        let placements = recommend_sensors(&scenario(), &zones(), 1);
        assert_eq!(placements.len(), 1);
        assert_eq!(placements[0].priority, 1);
        assert_eq!(placements[0].sensor_type, SensorType::Fixed);
        assert!((placements[0].lat - 40.0).abs() < 1e-12);
        assert!((placements[0].lng + 75.0).abs() < 1e-12);
    }

    #[test]
    fn test_downwind_sensors_lie_east() {
        let placements = recommend_sensors(&scenario(), &zones(), 5);
        for p in placements.iter().filter(|p| p.role == SensorRole::Downwind) {
            assert!(p.lng > -75.0, "downwind sensor at {}", p.lng);
            assert!((p.lat - 40.0).abs() < 1e-9);
            assert!(p.distance_km < zones().orange.distance_km);
        }
    }

    #[test]
    fn test_small_budgets_are_respected() {
        for count in 0..=12 {
            let placements = recommend_sensors(&scenario(), &zones(), count);
            assert_eq!(placements.len(), count);
        }
    }

    #[test]
    fn test_perimeter_sensors_are_mobile() {
        let placements = recommend_sensors(&scenario(), &zones(), 12);
        for p in placements.iter().filter(|p| p.role == SensorRole::Perimeter) {
            assert_eq!(p.sensor_type, SensorType::Mobile);
            assert!((p.distance_km - 3.6).abs() < 1e-9);
        }
    }

    #[test]
    fn test_crosswind_sensors_alternate_sides() {
        let placements = recommend_sensors(&scenario(), &zones(), 10);
        let crosswind: Vec<_> = placements
            .iter()
            .filter(|p| p.role == SensorRole::Crosswind)
            .collect();
        assert_eq!(crosswind.len(), 3);

        // Plume heads east (90°), so crosswind means south then north
        let bearings: Vec<f64> = crosswind.iter().map(|p| *p.bearing).collect();
        assert_eq!(bearings, vec![180.0, 0.0, 180.0]);
        assert!(crosswind[0].lat < 40.0 && crosswind[1].lat > 40.0);

        let half_yellow = 0.5 * zones().yellow.distance_km;
        let distances: Vec<f64> = crosswind.iter().map(|p| p.distance_km).collect();
        let expected = [half_yellow / 3.0, half_yellow / 3.0, half_yellow * 2.0 / 3.0];
        for (got, want) in distances.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "crosswind distance {got}, expected {want}");
        }
        assert!(distances.iter().all(|&d| d <= half_yellow));
    }
}
