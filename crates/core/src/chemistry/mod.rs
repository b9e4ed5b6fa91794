//! Chemical property store and concentration unit conversion

pub mod conversion;
pub mod database;
pub mod record;

pub use conversion::{convert, ConcentrationUnit, MOLAR_VOLUME_L};
pub use database::{builtin_records, ChemicalDatabase, ChemicalRepository};
pub use record::ChemicalRecord;
