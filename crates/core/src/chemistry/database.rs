//! Read-only chemical property repository
//!
//! The engine never owns chemical data: every calculation receives a
//! [`ChemicalRepository`] by reference. The built-in [`ChemicalDatabase`] is
//! constructed once behind a `LazyLock` and never mutated, so any number of
//! threads can read it without synchronization.
//!
//! # Data Sources
//! - AEGL: US EPA final/interim 60-minute values
//! - ERPG: AIHA (2016)
//! - IDLH: NIOSH Pocket Guide
//! - Flammability: NFPA 325 / CRC Handbook
//! - Vapor pressure at 20°C: CRC Handbook of Chemistry and Physics

use crate::chemistry::record::ChemicalRecord;
use crate::core_types::{HazardError, HazardResult};
use rustc_hash::FxHashMap;
use std::sync::LazyLock;

/// Lookup interface every component consumes.
///
/// Implementations must be immutable after construction; `Send + Sync` lets
/// one repository back calculations on any number of worker threads.
pub trait ChemicalRepository: Send + Sync {
    /// Case-insensitive exact-match lookup
    fn lookup(&self, name: &str) -> HazardResult<&ChemicalRecord>;

    /// Sorted list of known identifiers
    fn names(&self) -> Vec<&str>;

    /// `lookup` collapsed to an `Option`
    fn find(&self, name: &str) -> Option<&ChemicalRecord> {
        self.lookup(name).ok()
    }

    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }
}

/// Hash-map backed repository keyed by lowercase name
#[derive(Debug, Clone, Default)]
pub struct ChemicalDatabase {
    records: FxHashMap<String, ChemicalRecord>,
}

static BUILTIN: LazyLock<ChemicalDatabase> =
    LazyLock::new(|| ChemicalDatabase::from_records(builtin_records()));

impl ChemicalDatabase {
    /// Build a repository from any set of records; later duplicates win
    pub fn from_records(records: impl IntoIterator<Item = ChemicalRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| (normalize(&r.name), r))
            .collect();
        Self { records }
    }

    /// The built-in table, shared process-wide
    pub fn shared() -> &'static ChemicalDatabase {
        &BUILTIN
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over all records in unspecified order
    pub fn records(&self) -> impl Iterator<Item = &ChemicalRecord> {
        self.records.values()
    }
}

impl ChemicalRepository for ChemicalDatabase {
    fn lookup(&self, name: &str) -> HazardResult<&ChemicalRecord> {
        self.records
            .get(&normalize(name))
            .ok_or_else(|| HazardError::chemical_not_found(name))
    }

    fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// The built-in chemical table.
///
/// AEGL values of 0 mean "not established" (e.g. phosgene AEGL-1).
#[must_use]
pub fn builtin_records() -> Vec<ChemicalRecord> {
    vec![
        // ═══════════════════════════════════════════════════════════════
        // TOXIC INHALATION HAZARDS (non-flammable)
        // ═══════════════════════════════════════════════════════════════
        ChemicalRecord::new("chlorine", 70.9, -34.04, 5168.0, 1.47)
            .with_aegl(0.5, 2.0, 20.0)
            .with_idlh(10.0)
            .with_erpg(Some(1.0), Some(3.0), Some(20.0))
            .with_reactivity(0),
        ChemicalRecord::new("hydrogen chloride", 36.46, -85.05, 31920.0, 1.19)
            .with_aegl(1.8, 22.0, 100.0)
            .with_idlh(50.0)
            .with_erpg(Some(3.0), Some(20.0), Some(150.0))
            .with_reactivity(1),
        ChemicalRecord::new("sulfur dioxide", 64.07, -10.0, 2538.0, 1.46)
            .with_aegl(0.2, 0.75, 30.0)
            .with_idlh(100.0)
            .with_erpg(Some(0.3), Some(3.0), Some(25.0))
            .with_reactivity(0),
        ChemicalRecord::new("phosgene", 98.92, 8.3, 1215.0, 1.43)
            .with_aegl(0.0, 0.3, 0.75)
            .with_idlh(2.0)
            .with_erpg(None, Some(0.5), Some(1.5))
            .with_reactivity(1),
        ChemicalRecord::new("hydrogen fluoride", 20.01, 19.5, 783.0, 0.99)
            .with_aegl(1.0, 24.0, 44.0)
            .with_idlh(30.0)
            .with_erpg(Some(2.0), Some(20.0), Some(50.0))
            .with_reactivity(1),
        // ═══════════════════════════════════════════════════════════════
        // TOXIC AND FLAMMABLE
        // ═══════════════════════════════════════════════════════════════
        ChemicalRecord::new("ammonia", 17.03, -33.3, 6460.0, 0.68)
            .with_flammability(15.0, 28.0)
            .with_aegl(30.0, 160.0, 1100.0)
            .with_idlh(300.0)
            .with_erpg(Some(25.0), Some(150.0), Some(1500.0))
            .with_reactivity(0)
            .with_blast(2.0, Some(186.0)),
        ChemicalRecord::new("hydrogen sulfide", 34.08, -60.3, 13376.0, 0.99)
            .with_flammability(4.0, 44.0)
            .with_aegl(0.51, 27.0, 50.0)
            .with_idlh(100.0)
            .with_erpg(Some(0.1), Some(30.0), Some(100.0))
            .with_reactivity(0)
            .with_blast(5.0, Some(152.0)),
        ChemicalRecord::new("hydrogen cyanide", 27.03, 25.6, 620.0, 0.69)
            .with_flammability(5.6, 40.0)
            .with_aegl(1.0, 7.1, 15.0)
            .with_idlh(50.0)
            .with_erpg(None, Some(10.0), Some(25.0))
            .with_flash_point(-18.0)
            .with_reactivity(2)
            .with_blast(5.0, Some(245.0)),
        ChemicalRecord::new("acrylonitrile", 53.06, 77.3, 83.0, 0.81)
            .with_flammability(3.0, 17.0)
            .with_aegl(4.6, 8.6, 28.0)
            .with_idlh(85.0)
            .with_erpg(Some(10.0), Some(35.0), Some(75.0))
            .with_flash_point(-1.0)
            .with_reactivity(2)
            .with_blast(6.0, Some(317.0)),
        ChemicalRecord::new("ethylene oxide", 44.05, 10.7, 1095.0, 0.88)
            .with_flammability(3.0, 100.0)
            .with_aegl(0.0, 45.0, 200.0)
            .with_idlh(800.0)
            .with_erpg(None, Some(50.0), Some(500.0))
            .with_flash_point(-20.0)
            .with_reactivity(3)
            .with_blast(8.0, Some(270.0)),
        ChemicalRecord::new("benzene", 78.11, 80.1, 75.0, 0.879)
            .with_flammability(1.2, 7.8)
            .with_aegl(52.0, 800.0, 4000.0)
            .with_idlh(500.0)
            .with_erpg(Some(50.0), Some(150.0), Some(1000.0))
            .with_flash_point(-11.0)
            .with_reactivity(0)
            .with_blast(4.0, Some(401.0)),
        // ═══════════════════════════════════════════════════════════════
        // FLAMMABLE (low toxicity)
        // ═══════════════════════════════════════════════════════════════
        ChemicalRecord::new("methane", 16.04, -161.5, 466_000.0, 0.42)
            .with_flammability(5.0, 15.0)
            .with_aegl(10_000.0, 25_000.0, 50_000.0)
            .with_reactivity(0)
            .with_blast(6.0, Some(500.0)),
        ChemicalRecord::new("propane", 44.1, -42.1, 6460.0, 0.493)
            .with_flammability(2.1, 9.5)
            .with_aegl(5500.0, 17000.0, 33000.0)
            .with_idlh(2100.0)
            .with_reactivity(0)
            .with_blast(7.0, Some(463.0)),
        ChemicalRecord::new("toluene", 92.14, 110.6, 22.0, 0.867)
            .with_flammability(1.1, 7.1)
            .with_aegl(67.0, 560.0, 3700.0)
            .with_idlh(500.0)
            .with_erpg(Some(50.0), Some(300.0), Some(1000.0))
            .with_flash_point(4.0)
            .with_reactivity(0)
            .with_blast(4.0, Some(406.0)),
        ChemicalRecord::new("acetone", 58.08, 56.05, 184.0, 0.784)
            .with_flammability(2.5, 12.8)
            .with_aegl(200.0, 3200.0, 5700.0)
            .with_idlh(2500.0)
            .with_flash_point(-20.0)
            .with_reactivity(0)
            .with_blast(3.0, Some(286.0)),
        ChemicalRecord::new("methanol", 32.04, 64.7, 97.0, 0.792)
            .with_flammability(6.0, 36.0)
            .with_aegl(530.0, 2100.0, 7200.0)
            .with_idlh(6000.0)
            .with_erpg(Some(200.0), Some(1000.0), Some(5000.0))
            .with_flash_point(11.0)
            .with_reactivity(0)
            .with_blast(3.0, Some(199.0)),
    ]
}
