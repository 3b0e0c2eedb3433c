//! Pure formatting functions for UI output.
//!
//! Functions here build strings and never print, so the layout is testable.
//! Styling goes through `console`, which drops colors when the output is not a
//! terminal.

use crate::domain::VersionTag;
use crate::evolution::{Slot, StableValue};
use console::style;
use std::cmp::Ordering;

/// Format a slot list as one numbered line per raw code.
///
/// # Arguments
/// * `enum_name` - Enumeration the slots belong to
/// * `version` - Version the slot list was resolved for
/// * `slots` - The resolved slot list
pub fn format_slots<E: StableValue>(
    enum_name: &str,
    version: &VersionTag,
    slots: &[Slot<E>],
) -> String {
    let mut out = format!("{} for {}\n", style(enum_name).bold(), style(version).cyan());

    for (code, slot) in slots.iter().enumerate() {
        let line = match slot {
            Slot::Bare(value) => format!("  {:>3} -> {}", code, value.to_code()),
            Slot::Named {
                value,
                name,
                aliases,
            } if aliases.is_empty() => format!("  {:>3} -> {} ({})", code, name, value.to_code()),
            Slot::Named {
                value,
                name,
                aliases,
            } => format!(
                "  {:>3} -> {} ({}) aliases: {}",
                code,
                name,
                value.to_code(),
                aliases.join(", ")
            ),
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Format a list of enumeration names, one per line.
pub fn format_enum_names(names: &[String]) -> String {
    let mut out = format!("{}\n", style("Configured enumerations:").bold());
    for name in names {
        out.push_str(&format!("  - {}\n", name));
    }
    out
}

/// Format the outcome of a version comparison as `a < b`, `a = b` or `a > b`.
pub fn format_comparison(left: &VersionTag, right: &VersionTag, ordering: Ordering) -> String {
    let symbol = match ordering {
        Ordering::Less => "<",
        Ordering::Equal => "=",
        Ordering::Greater => ">",
    };
    format!("{} {} {}", left, symbol, right)
}
