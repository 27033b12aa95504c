use crate::balance::{self, recompute};
use crate::config::{PickupConfig, RosterConfig};
use crate::error::{ApiError, RosterError};
use crate::export::format_export;
use crate::models::{BalanceSummary, Participant, ParticipantId, Team, Totals};
use crate::roster::{clean_name, validate_skill};
use crate::status::{StatusLocalizer, StatusMessage, Tone};
use schemars::{schema::RootSchema, schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ParticipantInput {
    pub name: String,
    /// Missing means the configured default skill
    #[serde(default)]
    pub skill: Option<f64>,
    #[serde(default)]
    pub is_goalkeeper: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BalanceRequest {
    pub schema_version: u8,
    pub participants: Vec<ParticipantInput>,
    #[serde(default)]
    pub config: Option<PickupConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecomputeRequest {
    pub schema_version: u8,
    pub team_a: Vec<ParticipantInput>,
    pub team_b: Vec<ParticipantInput>,
    #[serde(default)]
    pub config: Option<PickupConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatusPayload {
    pub key: String,
    pub tone: Tone,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BalanceResponse {
    pub schema_version: u8,
    pub team_a: Team,
    pub team_b: Team,
    pub totals: Totals,
    pub summary: BalanceSummary,
    pub export: String,
    pub status: StatusPayload,
    /// Entries left out of the split
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RecomputeResponse {
    pub schema_version: u8,
    pub totals: Totals,
    pub summary: BalanceSummary,
    #[serde(default)]
    pub warnings: Vec<String>,
}

fn check_version(found: u8) -> Result<(), ApiError> {
    if found != SCHEMA_VERSION {
        return Err(ApiError::SchemaVersion { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

fn resolve_config(config: Option<PickupConfig>) -> Result<PickupConfig, ApiError> {
    let config = config.unwrap_or_default();
    config.validate()?;
    Ok(config)
}

/// Turn request entries into participants with sequential ids starting at
/// `first_id`. Names are cleaned like pasted roster lines; blank, repeated and
/// invalid-skill entries are left out and reported in `warnings`.
fn build_participants(
    inputs: &[ParticipantInput],
    first_id: u32,
    config: &RosterConfig,
    seen: &mut HashSet<String>,
    warnings: &mut Vec<String>,
) -> Vec<Participant> {
    let mut participants = Vec::with_capacity(inputs.len());

    for input in inputs {
        let name = clean_name(&input.name);
        if name.is_empty() {
            continue;
        }
        if config.deduplicate_names && !seen.insert(name.clone()) {
            log::debug!("Dropping repeated name {}", name);
            warnings.push(format!("repeated name '{}' skipped", name));
            continue;
        }

        let skill = match validate_skill(&name, input.skill.unwrap_or(config.default_skill)) {
            Ok(skill) => skill,
            Err(err) => {
                log::warn!("Excluding {}: {}", name, err);
                warnings.push(err.to_string());
                continue;
            }
        };

        let id = ParticipantId(first_id + participants.len() as u32);
        let mut participant = Participant::new(id, name, skill);
        participant.is_goalkeeper = input.is_goalkeeper;
        participants.push(participant);
    }
    participants
}

fn check_goalkeeper_cap<'a, I>(participants: I, config: &RosterConfig) -> Result<(), RosterError>
where
    I: IntoIterator<Item = &'a Participant>,
{
    let keepers = participants.into_iter().filter(|p| p.is_goalkeeper).count();
    if keepers > config.max_goalkeepers {
        return Err(RosterError::GoalkeeperLimitExceeded { max: config.max_goalkeepers });
    }
    Ok(())
}

fn localized_status(
    message: &StatusMessage,
    config: &PickupConfig,
) -> Result<StatusPayload, ApiError> {
    let localizer = StatusLocalizer::for_config(config)?;

    Ok(StatusPayload {
        key: message.key().to_string(),
        tone: message.tone(),
        text: localizer.render(message),
    })
}

/// Balance a roster sent as JSON and answer with both teams, the totals,
/// the export text and a status line in the configured locale.
pub fn balance_json(request_json: &str) -> Result<String, ApiError> {
    let request: BalanceRequest = serde_json::from_str(request_json)?;
    check_version(request.schema_version)?;
    let config = resolve_config(request.config)?;

    let mut warnings = Vec::new();
    let participants = build_participants(
        &request.participants,
        0,
        &config.roster,
        &mut HashSet::new(),
        &mut warnings,
    );
    check_goalkeeper_cap(&participants, &config.roster)?;
    if participants.len() < 2 {
        return Err(RosterError::InsufficientParticipants { found: participants.len() }.into());
    }

    let lineup = balance::balance(&participants, &config.balance);
    let totals = lineup.totals();
    let summary = lineup.summary(config.balance.even_threshold);
    let export = format_export(&lineup.team_a, &lineup.team_b, &config.export);
    let status = localized_status(&StatusMessage::TeamsGenerated(summary), &config)?;

    let response = BalanceResponse {
        schema_version: SCHEMA_VERSION,
        team_a: lineup.team_a,
        team_b: lineup.team_b,
        totals,
        summary,
        export,
        status,
        warnings,
    };
    Ok(serde_json::to_string(&response)?)
}

/// Recompute totals for teams the caller has already arranged by hand.
pub fn recompute_json(request_json: &str) -> Result<String, ApiError> {
    let request: RecomputeRequest = serde_json::from_str(request_json)?;
    check_version(request.schema_version)?;
    let config = resolve_config(request.config)?;

    // One name set across both teams: a name listed twice is counted once
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();
    let members_a =
        build_participants(&request.team_a, 0, &config.roster, &mut seen, &mut warnings);
    let members_b = build_participants(
        &request.team_b,
        members_a.len() as u32,
        &config.roster,
        &mut seen,
        &mut warnings,
    );
    check_goalkeeper_cap(members_a.iter().chain(members_b.iter()), &config.roster)?;

    let mut team_a = Team::new();
    let mut team_b = Team::new();
    for p in members_a {
        team_a.push(p, 0.0);
    }
    for p in members_b {
        team_b.push(p, 0.0);
    }

    let totals = recompute(&mut team_a, &mut team_b, &config.balance);
    let summary = BalanceSummary::from_totals(&totals, config.balance.even_threshold);

    let response = RecomputeResponse { schema_version: SCHEMA_VERSION, totals, summary, warnings };
    Ok(serde_json::to_string(&response)?)
}

/// JSON Schema of `BalanceRequest`.
pub fn request_schema() -> RootSchema {
    schema_for!(BalanceRequest)
}
