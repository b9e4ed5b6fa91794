//! Zone areas and population at risk.
//!
//! A plume covers roughly a third of the circle around the source, so each
//! zone's footprint is approximated as a 120° sector:
//!
//! ```text
//! A_red    = π · r_red² · 0.33
//! A_orange = π · r_orange² · 0.33 − A_red
//! A_yellow = π · r_yellow² · 0.33 − A_red − A_orange
//! ```

use std::f64::consts::PI;

/// Fraction of the full circle swept by the plume
pub const SECTOR_FRACTION: f64 = 0.33;

/// Sector area (km²) out to `radius_km`
#[must_use]
pub fn sector_area(radius_km: f64) -> f64 {
    PI * radius_km.max(0.0).powi(2) * SECTOR_FRACTION
}

/// Annular areas `[red, orange, yellow]` belonging to each zone only
#[must_use]
pub fn sector_areas(red_km: f64, orange_km: f64, yellow_km: f64) -> [f64; 3] {
    let red = sector_area(red_km);
    let orange = (sector_area(orange_km) - red).max(0.0);
    let yellow = (sector_area(yellow_km) - red - orange).max(0.0);
    [red, orange, yellow]
}

/// Residents inside `area_km2` at `density` people/km²
#[must_use]
pub fn population_at_risk(area_km2: f64, density: f64) -> f64 {
    area_km2.max(0.0) * density.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_areas_partition_outer_sector() {
        let [r, o, y] = sector_areas(1.0, 2.0, 3.0);
        assert!((r - PI * 0.33).abs() < 1e-12);
        assert!((r + o + y - sector_area(3.0)).abs() < 1e-9);
        assert!(o > 0.0 && y > 0.0);
    }

    #[test]
    fn test_equal_radii_give_zero_rings() {
        let [_, o, y] = sector_areas(2.0, 2.0, 2.0);
        assert_eq!(o, 0.0);
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_population() {
        assert_eq!(population_at_risk(2.0, 3000.0), 6000.0);
        assert_eq!(population_at_risk(-1.0, 3000.0), 0.0);
    }
}
