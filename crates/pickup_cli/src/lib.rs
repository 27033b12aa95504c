//! Pickup CLI library
//!
//! Names file / skill table → balanced teams → export text or JSON report

use anyhow::{bail, Context, Result};
use pickup_core::config::resolve_config;
use pickup_core::roster::TableWarning;
use pickup_core::{
    BalanceSummary, Lineup, PickupConfig, Session, StatusLocalizer, StatusMessage, Tone, Totals,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Per-player adjustments given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Adjustments {
    /// (name, raw skill) pairs, applied in order
    pub skills: Vec<(String, String)>,
    pub goalkeepers: Vec<String>,
}

/// Result of one CLI run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitReport {
    /// RFC3339 timestamp
    pub generated_at: String,
    pub lineup: Lineup,
    pub totals: Totals,
    pub summary: BalanceSummary,
    pub export: String,
    pub status: String,
    pub tone: Tone,
    /// Players left out because their skill input was invalid
    pub excluded: Vec<String>,
    pub warnings: Vec<String>,
}

/// Split a `NAME=VALUE` argument.
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    let Some((name, value)) = arg.split_once('=') else {
        bail!("Expected NAME=VALUE, got '{}'", arg);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Missing player name in '{}'", arg);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Read a whole file, or stdin when the path is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read input: {}", path.display()))
}

/// Config from `--config` or `PICKUP_CONFIG_PATH`, with optional locale and
/// status text directory overrides.
pub fn load_config(
    path: Option<&Path>,
    locale: Option<&str>,
    locales_dir: Option<&Path>,
) -> Result<PickupConfig> {
    let mut config = resolve_config(path).context("Failed to load config")?;
    if let Some(locale) = locale {
        config.locale = locale.to_string();
    }
    if let Some(dir) = locales_dir {
        config.locales_dir = Some(dir.to_path_buf());
    }
    config.validate().context("Invalid --locale or --locales")?;
    Ok(config)
}

/// Localized text of one status message.
pub fn render_status(config: &PickupConfig, message: &StatusMessage) -> Result<String> {
    let localizer = StatusLocalizer::for_config(config).context("Failed to load status text")?;
    Ok(localizer.render(message))
}

/// Apply `--skill` and `--goalkeeper` adjustments by player name.
///
/// An invalid skill leaves the player out of the split and is reported as a
/// warning; an unknown name or a goalkeeper over the cap is an error.
pub fn apply_adjustments(
    session: &mut Session,
    adjustments: &Adjustments,
    warnings: &mut Vec<String>,
) -> Result<()> {
    for (name, raw) in &adjustments.skills {
        let id = session
            .find_by_name(name)
            .map(|p| p.id)
            .with_context(|| format!("No player named '{}'", name))?;
        if let Err(err) = session.set_skill(id, raw) {
            log::warn!("{}", err);
            warnings.push(err.to_string());
        }
    }

    for name in &adjustments.goalkeepers {
        let id = session
            .find_by_name(name)
            .map(|p| p.id)
            .with_context(|| format!("No player named '{}'", name))?;
        let already = session.participant(id).map(|p| p.is_goalkeeper).unwrap_or(false);
        if !already {
            session.toggle_goalkeeper(id)?;
        }
    }
    Ok(())
}

pub fn session_from_names(
    raw: &str,
    config: PickupConfig,
    adjustments: &Adjustments,
    warnings: &mut Vec<String>,
) -> Result<Session> {
    let mut session = Session::from_text(raw, config).context("Failed to read roster")?;
    apply_adjustments(&mut session, adjustments, warnings)?;
    Ok(session)
}

pub fn session_from_table(
    raw: &str,
    config: PickupConfig,
    warnings: &mut Vec<String>,
) -> Result<Session> {
    let (session, table_warnings) =
        Session::from_table(raw.as_bytes(), config).context("Failed to read skill table")?;
    for warning in &table_warnings {
        log::warn!("{}", warning);
    }
    warnings.extend(table_warnings.iter().map(TableWarning::to_string));
    Ok(session)
}

/// Balance the session and collect everything worth printing.
pub fn split(session: &mut Session, warnings: Vec<String>) -> Result<SplitReport> {
    let localizer =
        StatusLocalizer::for_config(session.config()).context("Failed to load status text")?;

    let lineup = match session.balance() {
        Ok(lineup) => lineup.clone(),
        Err(err) => {
            let status = localizer.render(&StatusMessage::from(&err));
            return Err(anyhow::Error::new(err).context(status));
        }
    };

    let excluded = session
        .participants()
        .iter()
        .filter(|p| session.is_excluded(p.id))
        .map(|p| p.name.clone())
        .collect();

    let summary = session.summary()?;
    let message = session.status();

    Ok(SplitReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        totals: lineup.totals(),
        summary,
        export: session.export()?,
        status: localizer.render(&message),
        tone: message.tone(),
        lineup,
        excluded,
        warnings,
    })
}

/// Write to a file (creating parent dirs) or to stdout when no path is given.
pub fn write_output(out: Option<&Path>, text: &str) -> Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
            fs::write(path, text)
                .with_context(|| format!("Failed to write output file: {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text).context("Failed to write to stdout")
        }
    }
}
