//! Version domain - release identifiers and version ranges

pub mod range;
pub mod version;

pub use range::VersionRange;
pub use version::{Extra, VersionTag};
