//! Physical and toxicological constants for one chemical
//!
//! # Units
//! - Molecular weight: g/mol
//! - Boiling point: °C at 1 atm
//! - Vapor pressure: mmHg at 20°C
//! - Specific gravity: liquid density relative to water
//! - LEL/UEL: % by volume in air (0 when non-flammable)
//! - AEGL/ERPG/IDLH: ppm (60-minute AEGL values)
//!
//! # References
//! - US EPA Acute Exposure Guideline Levels (AEGL) program
//! - AIHA Emergency Response Planning Guidelines (2016)
//! - NIOSH Pocket Guide to Chemical Hazards

use crate::chemistry::conversion::ppm_to_mg_m3;
use crate::core_types::units::{Atmospheres, Celsius};
use serde::{Deserialize, Serialize};

/// Trouton's rule constant ΔHvap / (R·Tb) ≈ 88 J/(mol·K) / 8.314 J/(mol·K)
const TROUTON_RATIO: f64 = 10.58;

/// Immutable constants for one chemical.
///
/// Records are loaded once into a repository and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChemicalRecord {
    /// Lowercase identifier
    pub name: String,
    /// g/mol
    pub molecular_weight: f64,
    /// °C at 1 atm
    pub boiling_point_c: f64,
    /// mmHg at 20°C
    pub vapor_pressure_mmhg: f64,
    /// Liquid density relative to water
    pub specific_gravity: f64,
    /// Lower explosive limit (vol %), 0 if non-flammable
    pub lel_percent: f64,
    /// Upper explosive limit (vol %), 0 if non-flammable
    pub uel_percent: f64,
    /// Discomfort threshold (ppm), 0 if not established
    pub aegl1_ppm: f64,
    /// Disabling-effects threshold (ppm), 0 if not established
    pub aegl2_ppm: f64,
    /// Lethality threshold (ppm), 0 if not established
    pub aegl3_ppm: f64,
    /// Immediately dangerous to life or health (ppm)
    pub idlh_ppm: f64,
    pub erpg1_ppm: Option<f64>,
    pub erpg2_ppm: Option<f64>,
    pub erpg3_ppm: Option<f64>,
    /// °C, closed cup
    pub flash_point_c: Option<f64>,
    /// NFPA 704 instability rating (0-4)
    pub reactivity_hazard: Option<u8>,
    /// Relative blast potential (0-10)
    pub blast_potential: f64,
    /// Relative explosion energy; 300 is the reference hydrocarbon
    pub explosion_energy: Option<f64>,
}

impl ChemicalRecord {
    /// Explosion energy assumed when a record has none
    pub const DEFAULT_EXPLOSION_ENERGY: f64 = 300.0;

    /// Create a record with the mandatory constants; optional fields start
    /// empty and hazard-potential fields at zero.
    #[must_use]
    pub fn new(
        name: &str,
        molecular_weight: f64,
        boiling_point_c: f64,
        vapor_pressure_mmhg: f64,
        specific_gravity: f64,
    ) -> Self {
        Self {
            name: name.trim().to_ascii_lowercase(),
            molecular_weight,
            boiling_point_c,
            vapor_pressure_mmhg,
            specific_gravity,
            lel_percent: 0.0,
            uel_percent: 0.0,
            aegl1_ppm: 0.0,
            aegl2_ppm: 0.0,
            aegl3_ppm: 0.0,
            idlh_ppm: 0.0,
            erpg1_ppm: None,
            erpg2_ppm: None,
            erpg3_ppm: None,
            flash_point_c: None,
            reactivity_hazard: None,
            blast_potential: 0.0,
            explosion_energy: None,
        }
    }

    pub fn with_flammability(mut self, lel_percent: f64, uel_percent: f64) -> Self {
        self.lel_percent = lel_percent;
        self.uel_percent = uel_percent;
        self
    }

    pub fn with_aegl(mut self, aegl1: f64, aegl2: f64, aegl3: f64) -> Self {
        self.aegl1_ppm = aegl1;
        self.aegl2_ppm = aegl2;
        self.aegl3_ppm = aegl3;
        self
    }

    pub fn with_idlh(mut self, idlh_ppm: f64) -> Self {
        self.idlh_ppm = idlh_ppm;
        self
    }

    pub fn with_erpg(mut self, erpg1: Option<f64>, erpg2: Option<f64>, erpg3: Option<f64>) -> Self {
        self.erpg1_ppm = erpg1;
        self.erpg2_ppm = erpg2;
        self.erpg3_ppm = erpg3;
        self
    }

    pub fn with_flash_point(mut self, flash_point_c: f64) -> Self {
        self.flash_point_c = Some(flash_point_c);
        self
    }

    pub fn with_reactivity(mut self, reactivity_hazard: u8) -> Self {
        self.reactivity_hazard = Some(reactivity_hazard.min(4));
        self
    }

    pub fn with_blast(mut self, blast_potential: f64, explosion_energy: Option<f64>) -> Self {
        self.blast_potential = blast_potential.clamp(0.0, 10.0);
        self.explosion_energy = explosion_energy;
        self
    }

    /// True when the record carries a flammable range
    #[must_use]
    pub fn is_flammable(&self) -> bool {
        self.lel_percent > 0.0 || self.uel_percent > 0.0
    }

    /// Boiling point at a storage pressure other than 1 atm.
    ///
    /// Clausius-Clapeyron with Trouton's rule for the heat of vaporization:
    /// ```text
    /// 1/Tb(P) = 1/Tb · (1 − ln(P) / 10.58)
    /// ```
    #[must_use]
    pub fn boiling_point_at(&self, pressure: Atmospheres) -> Celsius {
        let tb = Celsius::new(self.boiling_point_c).to_kelvin();
        let ratio = pressure.ratio();
        if ratio <= 0.0 || (ratio - 1.0).abs() < f64::EPSILON {
            return Celsius::new(self.boiling_point_c);
        }
        let denom = 1.0 - ratio.ln() / TROUTON_RATIO;
        if denom <= 0.0 {
            // Beyond the range of the approximation; treat as never boiling
            return Celsius::new(f64::INFINITY);
        }
        Celsius::from_kelvin(tb / denom)
    }

    /// True when the normal boiling point is below `temperature`
    #[must_use]
    pub fn is_gas_at(&self, temperature: Celsius) -> bool {
        self.boiling_point_c < *temperature
    }

    /// Like [`is_gas_at`](Self::is_gas_at) with the boiling point corrected
    /// for a storage pressure
    #[must_use]
    pub fn is_gas_under(&self, temperature: Celsius, pressure: Atmospheres) -> bool {
        *self.boiling_point_at(pressure) < *temperature
    }

    /// AEGL levels in mg/m³ as `(aegl1, aegl2, aegl3)`
    #[must_use]
    pub fn aegl_mg_m3(&self) -> (f64, f64, f64) {
        let mw = self.molecular_weight;
        (
            ppm_to_mg_m3(self.aegl1_ppm, mw),
            ppm_to_mg_m3(self.aegl2_ppm, mw),
            ppm_to_mg_m3(self.aegl3_ppm, mw),
        )
    }

    /// Explosion energy with the reference default applied
    #[must_use]
    pub fn explosion_energy_or_default(&self) -> f64 {
        self.explosion_energy
            .filter(|e| *e > 0.0)
            .unwrap_or(Self::DEFAULT_EXPLOSION_ENERGY)
    }

    /// True for chemicals that can detonate outside the flammable band
    #[must_use]
    pub fn is_reactive(&self) -> bool {
        self.reactivity_hazard.is_some_and(|r| r >= 3) || self.blast_potential >= 7.0
    }

    /// Check the record's internal orderings: LEL ≤ UEL and
    /// AEGL-1 ≤ AEGL-2 ≤ AEGL-3 wherever both sides are established.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let ordered = |lo: f64, hi: f64| lo <= 0.0 || hi <= 0.0 || lo <= hi;
        self.molecular_weight > 0.0
            && ordered(self.lel_percent, self.uel_percent)
            && ordered(self.aegl1_ppm, self.aegl2_ppm)
            && ordered(self.aegl2_ppm, self.aegl3_ppm)
            && ordered(self.aegl1_ppm, self.aegl3_ppm)
    }
}
