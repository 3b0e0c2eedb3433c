//! Version-evolution resolution
//!
//! Maps version-qualified data onto stable values: [`EvolutionTable`] selects a
//! payload per version range, [`EnumEvolution`] builds enumeration decoding on
//! top of it and [`EnumRegistry`] collects named enumerations.

pub mod enums;
pub mod registry;
pub mod table;

pub use enums::{EnumEvolution, Slot, StableValue};
pub use registry::EnumRegistry;
pub use table::EvolutionTable;
