//! User interface module - printing and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Writing results and status lines to the terminal

use console::style;

use crate::cli::orchestration::CommandOutput;

pub mod formatter;

pub use formatter::{format_comparison, format_enum_names, format_slots};

/// Print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print a success message with a green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Print a status message with a yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print the result of a trace-model command.
pub fn display_output(output: &CommandOutput) {
    match output {
        CommandOutput::Decoded {
            enum_name,
            raw,
            value,
            name,
        } => display_success(&format!("{} '{}' -> {} ({})", enum_name, raw, value, name)),
        CommandOutput::Encoded {
            enum_name,
            value,
            name,
        } => display_success(&format!("{} {} -> {}", enum_name, value, name)),
        CommandOutput::Slots {
            enum_name,
            version,
            slots,
        } => print!("{}", format_slots(enum_name, version, slots)),
        CommandOutput::EnumNames(names) => print!("{}", format_enum_names(names)),
        CommandOutput::Comparison {
            left,
            right,
            ordering,
        } => println!("{}", format_comparison(left, right, *ordering)),
        CommandOutput::Satisfies {
            version,
            range,
            satisfied,
        } => {
            if *satisfied {
                display_success(&format!("{} satisfies '{}'", version, range));
            } else {
                display_status(&format!("{} does not satisfy '{}'", version, range));
            }
        }
    }
}
