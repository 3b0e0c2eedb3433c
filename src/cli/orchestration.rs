//! Command orchestration logic
//!
//! Runs one trace-model command against an enumeration registry and returns a
//! structured [`CommandOutput`]. Keeping this separate from `main.rs` lets the
//! commands be driven and tested without clap or a terminal.

use anyhow::{Context, Result};
use std::cmp::Ordering;

use crate::domain::{VersionRange, VersionTag};
use crate::evolution::{EnumRegistry, Slot};

/// A command to run
///
/// Mirrors the CLI subcommands in a form suitable for programmatic use.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceCommand {
    /// Decode a raw code or raw name into its stable value
    Decode {
        enum_name: String,
        raw: String,
        target: String,
        ignore_case: bool,
    },
    /// Format a stable value as the name used by a version
    Encode {
        enum_name: String,
        value: i64,
        target: String,
    },
    /// Show the slot list in force for a version
    Slots { enum_name: String, target: String },
    /// List configured enumerations
    List,
    /// Compare two versions
    Compare { left: String, right: String },
    /// Test a version against a range
    Satisfies { version: String, range: String },
}

/// Result of a successful command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Decoded {
        enum_name: String,
        raw: String,
        value: i64,
        name: String,
    },
    Encoded {
        enum_name: String,
        value: i64,
        name: String,
    },
    Slots {
        enum_name: String,
        version: VersionTag,
        slots: Vec<Slot<i64>>,
    },
    EnumNames(Vec<String>),
    Comparison {
        left: VersionTag,
        right: VersionTag,
        ordering: Ordering,
    },
    Satisfies {
        version: VersionTag,
        range: VersionRange,
        satisfied: bool,
    },
}

fn parse_version(text: &str) -> Result<VersionTag> {
    VersionTag::parse(text).with_context(|| format!("Invalid target version '{}'", text))
}

/// Run one command
///
/// # Arguments
///
/// * `command` - The command to run
/// * `registry` - Enumerations available to decode/encode/slots
///
/// # Returns
///
/// The command's output, or the first error encountered
pub fn run_command(command: TraceCommand, registry: &EnumRegistry) -> Result<CommandOutput> {
    match command {
        TraceCommand::Decode {
            enum_name,
            raw,
            target,
            ignore_case,
        } => {
            let evolution = registry.require(&enum_name)?;
            let version = parse_version(&target)?;

            // Negative codes are numeric input too; decode_name only treats
            // unsigned digit strings as codes.
            let value = match raw.strip_prefix('-').map(|digits| digits.parse::<i64>()) {
                Some(Ok(magnitude)) => evolution.decode_numeric(-magnitude, &version)?,
                _ => evolution.decode_name(&raw, &version, ignore_case)?,
            };
            let name = evolution.encode_name(value, &version)?;

            Ok(CommandOutput::Decoded {
                enum_name,
                raw,
                value,
                name,
            })
        }
        TraceCommand::Encode {
            enum_name,
            value,
            target,
        } => {
            let evolution = registry.require(&enum_name)?;
            let version = parse_version(&target)?;
            let name = evolution.encode_name(value, &version)?;

            Ok(CommandOutput::Encoded {
                enum_name,
                value,
                name,
            })
        }
        TraceCommand::Slots { enum_name, target } => {
            let evolution = registry.require(&enum_name)?;
            let version = parse_version(&target)?;
            let slots = evolution
                .slots(&version)
                .with_context(|| format!("{} has no slot list for {}", enum_name, version))?
                .to_vec();

            Ok(CommandOutput::Slots {
                enum_name,
                version,
                slots,
            })
        }
        TraceCommand::List => Ok(CommandOutput::EnumNames(
            registry.names().into_iter().map(str::to_string).collect(),
        )),
        TraceCommand::Compare { left, right } => {
            let left = parse_version(&left)?;
            let right = parse_version(&right)?;
            let ordering = left.cmp(&right);

            Ok(CommandOutput::Comparison {
                left,
                right,
                ordering,
            })
        }
        TraceCommand::Satisfies { version, range } => {
            let version = parse_version(&version)?;
            let range = VersionRange::parse(&range)?;
            let satisfied = version.satisfies(&range);

            Ok(CommandOutput::Satisfies {
                version,
                range,
                satisfied,
            })
        }
    }
}
