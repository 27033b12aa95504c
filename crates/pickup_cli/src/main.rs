//! Pickup CLI
//!
//! Names list / skill table → two balanced teams

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pickup")]
#[command(about = "Split a pickup game roster into two balanced teams", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Args)]
struct OutputArgs {
    /// Config file (JSON or YAML); falls back to PICKUP_CONFIG_PATH
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the export text (or JSON report) here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Emit the full JSON report instead of the export text
    #[arg(long, default_value = "false")]
    json: bool,

    /// Status message locale (es-ES, en-US)
    #[arg(long)]
    locale: Option<String>,

    /// Directory of <locale>.ftl files overriding the status text
    #[arg(long)]
    locales: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Balance a pasted list of names, one per line
    Split {
        /// Names file, or - for stdin
        #[arg(long)]
        names: PathBuf,

        /// Mark a player as goalkeeper (repeatable)
        #[arg(long = "goalkeeper", value_name = "NAME")]
        goalkeepers: Vec<String>,

        /// Set a player's skill, e.g. --skill "Juan=7,5" (repeatable)
        #[arg(long = "skill", value_name = "NAME=VALUE")]
        skills: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Balance a name / skill / goalkeeper CSV table
    Table {
        /// CSV file, or - for stdin
        #[arg(long)]
        csv: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the JSON Schema of the balance request
    Schema,
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Split { names, goalkeepers, skills, output } => {
            let config = pickup_cli::load_config(
                output.config.as_deref(),
                output.locale.as_deref(),
                output.locales.as_deref(),
            )?;
            let adjustments = pickup_cli::Adjustments {
                skills: skills
                    .iter()
                    .map(|arg| pickup_cli::parse_assignment(arg))
                    .collect::<Result<_>>()?,
                goalkeepers,
            };

            let raw = pickup_cli::read_input(&names)?;
            let mut warnings = Vec::new();
            let mut session =
                pickup_cli::session_from_names(&raw, config, &adjustments, &mut warnings)?;
            let report = pickup_cli::split(&mut session, warnings)?;
            emit(&report, session.config(), &output)?;
        }

        Commands::Table { csv, output } => {
            let config = pickup_cli::load_config(
                output.config.as_deref(),
                output.locale.as_deref(),
                output.locales.as_deref(),
            )?;
            let raw = pickup_cli::read_input(&csv)?;
            let mut warnings = Vec::new();
            let mut session = pickup_cli::session_from_table(&raw, config, &mut warnings)?;
            let report = pickup_cli::split(&mut session, warnings)?;
            emit(&report, session.config(), &output)?;
        }

        Commands::Schema => {
            let schema = serde_json::to_string_pretty(&pickup_core::request_schema())?;
            println!("{}", schema);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn emit(
    report: &pickup_cli::SplitReport,
    config: &pickup_core::PickupConfig,
    output: &OutputArgs,
) -> Result<()> {
    if output.json {
        let body = serde_json::to_string_pretty(report)?;
        return pickup_cli::write_output(output.out.as_deref(), &body);
    }

    eprintln!("{}", report.status);
    for warning in &report.warnings {
        eprintln!("  ! {}", warning);
    }
    pickup_cli::write_output(output.out.as_deref(), &report.export)?;
    if let Some(path) = output.out.as_deref() {
        let copied = pickup_cli::render_status(config, &pickup_core::StatusMessage::CopyReady)?;
        eprintln!("{} ({})", copied, path.display());
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("pickup CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
