//! Version-aware enumeration decoding
//!
//! Trace producers encode enumerations as raw numbers (or raw names) whose
//! meaning shifts between releases: members get inserted, removed and
//! renumbered. An [`EnumEvolution`] keeps, per version range, the ordered slot
//! list in force for that range. A slot's position is its raw numeric code;
//! its content is the stable value the rest of the model works with.

use crate::domain::VersionTag;
use crate::error::{Result, TraceModelError};
use crate::evolution::table::EvolutionTable;
use std::fmt;

/// A stable enumeration value.
///
/// `to_code` provides the decimal form printed for slots declared without a
/// display name.
pub trait StableValue: Copy + PartialEq + fmt::Debug {
    fn to_code(self) -> i64;
}

macro_rules! impl_stable_value {
    ($($ty:ty),*) => {
        $(
            impl StableValue for $ty {
                fn to_code(self) -> i64 {
                    self as i64
                }
            }
        )*
    };
}

impl_stable_value!(i8, i16, i32, i64, u8, u16, u32);

/// One position of a slot list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<E> {
    /// Stable value with no display name
    Bare(E),
    /// Stable value with a display name and the names accepted when decoding.
    ///
    /// Only `aliases` are matched by [`EnumEvolution::decode_name`]; `name` is
    /// what [`EnumEvolution::encode_name`] produces.
    Named {
        value: E,
        name: String,
        aliases: Vec<String>,
    },
}

impl<E: StableValue> Slot<E> {
    pub fn bare(value: E) -> Self {
        Slot::Bare(value)
    }

    pub fn named<I, S>(value: E, name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Slot::Named {
            value,
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn value(&self) -> E {
        match self {
            Slot::Bare(value) => *value,
            Slot::Named { value, .. } => *value,
        }
    }

    /// Name produced when formatting this slot
    pub fn display_name(&self) -> String {
        match self {
            Slot::Bare(value) => value.to_code().to_string(),
            Slot::Named { name, .. } => name.clone(),
        }
    }

    fn matches_alias(&self, raw_name: &str, ignore_case: bool) -> bool {
        match self {
            Slot::Bare(_) => false,
            Slot::Named { aliases, .. } => aliases.iter().any(|alias| {
                if ignore_case {
                    alias.eq_ignore_ascii_case(raw_name)
                } else {
                    alias == raw_name
                }
            }),
        }
    }
}

/// Enumeration whose raw encoding evolves across producer versions
#[derive(Debug)]
pub struct EnumEvolution<E> {
    name: String,
    table: EvolutionTable<Vec<Slot<E>>>,
}

impl<E: StableValue> EnumEvolution<E> {
    /// Build an enumeration from `(range, slot list)` pairs
    ///
    /// # Errors
    /// Returns `InvalidArgument` if a range string cannot be parsed
    pub fn new<I, S>(name: impl Into<String>, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<Slot<E>>)>,
        S: AsRef<str>,
    {
        Ok(EnumEvolution {
            name: name.into(),
            table: EvolutionTable::new(entries)?,
        })
    }

    /// Wrap an existing table
    pub fn from_table(name: impl Into<String>, table: EvolutionTable<Vec<Slot<E>>>) -> Self {
        EnumEvolution {
            name: name.into(),
            table,
        }
    }

    /// Set the slot list used for versions outside every declared range
    pub fn with_default(self, slots: Vec<Slot<E>>) -> Self {
        EnumEvolution {
            name: self.name,
            table: self.table.with_default(slots),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &EvolutionTable<Vec<Slot<E>>> {
        &self.table
    }

    /// Slot list in force for `version`
    pub fn slots(&self, version: &VersionTag) -> Option<&[Slot<E>]> {
        self.table.resolve(version).map(Vec::as_slice)
    }

    /// Convert a raw numeric code into its stable value
    ///
    /// # Errors
    /// `UnrecognizedValue` if no slot list applies to `version` or `raw_code`
    /// is outside it
    pub fn decode_numeric(&self, raw_code: i64, version: &VersionTag) -> Result<E> {
        let slots = self.slots(version).ok_or_else(|| self.unrecognized(raw_code))?;

        usize::try_from(raw_code)
            .ok()
            .and_then(|index| slots.get(index))
            .map(Slot::value)
            .ok_or_else(|| self.unrecognized(raw_code))
    }

    /// Convert a raw name (or an all-digit raw code) into its stable value
    ///
    /// Only alias names are considered. A slot's display name is not accepted
    /// unless it is also listed among the aliases.
    ///
    /// # Errors
    /// `UnrecognizedValue` if no slot list applies to `version` or no alias
    /// matches
    pub fn decode_name(&self, raw_name: &str, version: &VersionTag, ignore_case: bool) -> Result<E> {
        if !raw_name.is_empty() && raw_name.bytes().all(|b| b.is_ascii_digit()) {
            let raw_code = raw_name
                .parse::<i64>()
                .map_err(|_| self.unrecognized(raw_name))?;
            return self.decode_numeric(raw_code, version);
        }

        let slots = self.slots(version).ok_or_else(|| self.unrecognized(raw_name))?;

        slots
            .iter()
            .find(|slot| slot.matches_alias(raw_name, ignore_case))
            .map(Slot::value)
            .ok_or_else(|| self.unrecognized(raw_name))
    }

    /// Format a stable value as the name `version` uses for it
    ///
    /// # Errors
    /// `UnrecognizedValue` if no slot list applies to `version` or it has no
    /// slot holding `value`
    pub fn encode_name(&self, value: E, version: &VersionTag) -> Result<String> {
        let slots = self
            .slots(version)
            .ok_or_else(|| self.unrecognized(format!("{:?}", value)))?;

        slots
            .iter()
            .find(|slot| slot.value() == value)
            .map(Slot::display_name)
            .ok_or_else(|| self.unrecognized(format!("{:?}", value)))
    }

    fn unrecognized(&self, input: impl ToString) -> TraceModelError {
        TraceModelError::unrecognized(&self.name, input)
    }
}
