//! Stable object model support for VM diagnostic trace logs.
//!
//! - [`domain`] - release identifiers ([`VersionTag`]) and version ranges
//! - [`evolution`] - resolving version-specific payloads and enumeration codes
//! - [`index`] - splay-tree ordered index for addresses, lines and timestamps

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod evolution;
pub mod index;
pub mod ui;

pub use domain::{VersionRange, VersionTag};
pub use error::{Result, TraceModelError};
pub use evolution::{EnumEvolution, EvolutionTable, Slot, StableValue};
pub use index::{KeyComparator, NaturalOrder, SplayNode, SplayTree};
