use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trace_model::cli::orchestration::{run_command, TraceCommand};
use trace_model::{config, ui};

#[derive(Parser)]
#[command(
    name = "trace-model",
    version,
    about = "Resolve version-specific trace-log values into stable values"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a raw numeric code or raw name into its stable value
    Decode {
        #[arg(help = "Enumeration name")]
        enum_name: String,
        #[arg(help = "Raw code or name from the trace log", allow_hyphen_values = true)]
        raw: String,
        #[arg(short, long, help = "Version of the trace-log producer")]
        target: String,
        #[arg(short, long, help = "Match names without regard to ASCII case")]
        ignore_case: bool,
    },
    /// Format a stable value as the name used by a producer version
    Encode {
        #[arg(help = "Enumeration name")]
        enum_name: String,
        #[arg(help = "Stable value", allow_hyphen_values = true)]
        value: i64,
        #[arg(short, long, help = "Version of the trace-log producer")]
        target: String,
    },
    /// Show the slot list in force for a producer version
    Slots {
        #[arg(help = "Enumeration name")]
        enum_name: String,
        #[arg(short, long, help = "Version of the trace-log producer")]
        target: String,
    },
    /// List configured enumerations
    List,
    /// Compare two versions
    Compare { left: String, right: String },
    /// Check whether a version lies inside a range
    Satisfies { version: String, range: String },
}

impl From<Command> for TraceCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Decode {
                enum_name,
                raw,
                target,
                ignore_case,
            } => TraceCommand::Decode {
                enum_name,
                raw,
                target,
                ignore_case,
            },
            Command::Encode {
                enum_name,
                value,
                target,
            } => TraceCommand::Encode {
                enum_name,
                value,
                target,
            },
            Command::Slots { enum_name, target } => TraceCommand::Slots { enum_name, target },
            Command::List => TraceCommand::List,
            Command::Compare { left, right } => TraceCommand::Compare { left, right },
            Command::Satisfies { version, range } => TraceCommand::Satisfies { version, range },
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let registry = match config.build_registry() {
        Ok(registry) => registry,
        Err(e) => {
            ui::display_error(&format!("Invalid configuration: {}", e));
            std::process::exit(1);
        }
    };

    match run_command(args.command.into(), &registry) {
        Ok(output) => {
            ui::display_output(&output);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}
