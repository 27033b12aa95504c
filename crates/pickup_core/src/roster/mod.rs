//! Roster builder
//!
//! Turns pasted free text (one name per line, often numbered by the chat app
//! it was copied from) into participants with synthetic ids, and owns the
//! input-time rules: skill range and the goalkeeper cap.

pub mod table;


pub use table::{SkillTable, TableImport, TableWarning};

use crate::config::{RosterConfig, MAX_SKILL, MIN_SKILL};
use crate::error::{Result, RosterError};
use crate::models::{Participant, ParticipantId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static ORDINAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("ordinal prefix pattern is valid"));

/// Trim a line and drop a leading "<digits>." ordinal.
pub fn clean_name(line: &str) -> String {
    ORDINAL_PREFIX.replace(line.trim(), "").trim().to_string()
}

pub fn parse_roster(raw: &str, config: &RosterConfig) -> Result<Vec<Participant>> {
    let mut seen = HashSet::new();
    let mut participants = Vec::new();

    for name in raw.lines().map(clean_name).filter(|n| !n.is_empty()) {
        if config.deduplicate_names && !seen.insert(name.clone()) {
            log::debug!("Skipping repeated name '{}'", name);
            continue;
        }
        let id = ParticipantId(participants.len() as u32);
        participants.push(Participant::new(id, name, config.default_skill));
    }

    if participants.len() < 2 {
        return Err(RosterError::InsufficientParticipants { found: participants.len() });
    }

    log::debug!("Parsed roster with {} participants", participants.len());
    Ok(participants)
}

pub fn validate_skill(name: &str, skill: f64) -> Result<f64> {
    if skill.is_finite() && (MIN_SKILL..=MAX_SKILL).contains(&skill) {
        Ok(skill)
    } else {
        Err(RosterError::InvalidSkillValue { name: name.to_string(), value: skill.to_string() })
    }
}

/// Parse a skill cell as typed by a user. Commas are accepted as decimal marks.
pub fn parse_skill(name: &str, raw: &str) -> Result<f64> {
    let invalid =
        || RosterError::InvalidSkillValue { name: name.to_string(), value: raw.to_string() };

    let value: f64 = raw.trim().replace(',', ".").parse().map_err(|_| invalid())?;
    validate_skill(name, value).map_err(|_| invalid())
}

/// Flip the goalkeeper flag of `id`, returning the new value.
///
/// Setting a flag when `max_goalkeepers` are already flagged is rejected and
/// nothing changes.
pub fn toggle_goalkeeper(
    participants: &mut [Participant],
    id: ParticipantId,
    max_goalkeepers: usize,
) -> Result<bool> {
    let idx = participants
        .iter()
        .position(|p| p.id == id)
        .ok_or(RosterError::UnknownParticipant(id))?;

    if participants[idx].is_goalkeeper {
        participants[idx].is_goalkeeper = false;
        return Ok(false);
    }

    let goalkeepers = participants.iter().filter(|p| p.is_goalkeeper).count();
    if goalkeepers >= max_goalkeepers {
        log::warn!(
            "Rejected goalkeeper flag for '{}': {} of {} already set",
            participants[idx].name,
            goalkeepers,
            max_goalkeepers
        );
        return Err(RosterError::GoalkeeperLimitExceeded { max: max_goalkeepers });
    }

    participants[idx].is_goalkeeper = true;
    Ok(true)
}
