//! User-visible status line
//!
//! Every command outcome, good or bad, maps to one `StatusMessage`. The UI
//! adapter renders it through a `StatusLocalizer` and colors it by `Tone`.

pub mod localization;

pub use localization::StatusLocalizer;

use crate::error::RosterError;
use crate::models::{BalanceQuality, BalanceSummary};
use fluent::FluentValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    RosterReady,
    NotEnoughPlayers { found: usize },
    TeamsGenerated(BalanceSummary),
    InvalidSkill { name: String, value: String },
    GoalkeeperLimit { max: usize },
    UnknownParticipant { id: String },
    NotBalanced,
    TableFormat { detail: String },
    CopyReady,
    Failure { detail: String },
}

impl StatusMessage {
    pub fn key(&self) -> &'static str {
        match self {
            StatusMessage::RosterReady => "roster-ready",
            StatusMessage::NotEnoughPlayers { .. } => "not-enough-players",
            StatusMessage::TeamsGenerated(_) => "teams-generated",
            StatusMessage::InvalidSkill { .. } => "invalid-skill",
            StatusMessage::GoalkeeperLimit { .. } => "goalkeeper-limit",
            StatusMessage::UnknownParticipant { .. } => "unknown-participant",
            StatusMessage::NotBalanced => "not-balanced",
            StatusMessage::TableFormat { .. } => "table-format",
            StatusMessage::CopyReady => "copy-ready",
            StatusMessage::Failure { .. } => "failure",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            StatusMessage::RosterReady => Tone::Info,
            StatusMessage::CopyReady => Tone::Success,
            StatusMessage::TeamsGenerated(summary) => match summary.quality {
                BalanceQuality::Even => Tone::Success,
                BalanceQuality::Uneven => Tone::Warning,
            },
            StatusMessage::InvalidSkill { .. } | StatusMessage::GoalkeeperLimit { .. } => {
                Tone::Warning
            }
            StatusMessage::NotEnoughPlayers { .. }
            | StatusMessage::UnknownParticipant { .. }
            | StatusMessage::NotBalanced
            | StatusMessage::TableFormat { .. }
            | StatusMessage::Failure { .. } => Tone::Error,
        }
    }

    pub fn args(&self) -> Option<HashMap<String, FluentValue<'static>>> {
        let mut args = HashMap::new();
        match self {
            StatusMessage::NotEnoughPlayers { found } => {
                args.insert("found".to_string(), FluentValue::from(*found as i64));
            }
            StatusMessage::TeamsGenerated(summary) => {
                args.insert("difference".to_string(), FluentValue::from(summary.difference));
            }
            StatusMessage::InvalidSkill { name, value } => {
                args.insert("name".to_string(), FluentValue::from(name.clone()));
                args.insert("value".to_string(), FluentValue::from(value.clone()));
            }
            StatusMessage::GoalkeeperLimit { max } => {
                args.insert("max".to_string(), FluentValue::from(*max as i64));
            }
            StatusMessage::UnknownParticipant { id } => {
                args.insert("id".to_string(), FluentValue::from(id.clone()));
            }
            StatusMessage::TableFormat { detail } | StatusMessage::Failure { detail } => {
                args.insert("detail".to_string(), FluentValue::from(detail.clone()));
            }
            StatusMessage::RosterReady | StatusMessage::NotBalanced | StatusMessage::CopyReady => {
                return None
            }
        }
        Some(args)
    }
}

impl From<&RosterError> for StatusMessage {
    fn from(err: &RosterError) -> Self {
        match err {
            RosterError::InsufficientParticipants { found } => {
                StatusMessage::NotEnoughPlayers { found: *found }
            }
            RosterError::InvalidSkillValue { name, value } => {
                StatusMessage::InvalidSkill { name: name.clone(), value: value.clone() }
            }
            RosterError::GoalkeeperLimitExceeded { max } => {
                StatusMessage::GoalkeeperLimit { max: *max }
            }
            RosterError::UnknownParticipant(id) => {
                StatusMessage::UnknownParticipant { id: id.to_string() }
            }
            RosterError::NotBalanced => StatusMessage::NotBalanced,
            RosterError::TableFormat(detail) => StatusMessage::TableFormat { detail: detail.clone() },
            RosterError::Csv(_) | RosterError::Io(_) => {
                StatusMessage::Failure { detail: err.to_string() }
            }
        }
    }
}
