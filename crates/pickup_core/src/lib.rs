//! # pickup_core - Two-team skill balancer for pickup games
//!
//! Turns a pasted list of names into two teams of similar total skill.
//!
//! ## Features
//! - Roster cleanup (ordinal prefixes, blank lines, repeated names)
//! - Greedy, goalkeeper-aware balancing with team sizes within one
//! - Recompute after manual moves
//! - Plain-text export for group chats
//! - Localized status messages (Spanish, English)
//! - JSON API for UI adapters

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod balance;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod roster;
pub mod session;
pub mod status;

// Re-export main API functions
pub use api::{balance_json, recompute_json, request_schema, BalanceRequest, BalanceResponse};
pub use error::{ApiError, ConfigError, LocalizationError, Result, RosterError};

pub use balance::{balance, goalkeeper_value, recompute};
pub use config::PickupConfig;
pub use export::format_export;
pub use models::{
    BalanceQuality, BalanceSummary, Lineup, Participant, ParticipantId, Side, Team, Totals,
};
pub use roster::{parse_roster, parse_skill, toggle_goalkeeper};
pub use session::Session;
pub use status::{StatusLocalizer, StatusMessage, Tone};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub use api::SCHEMA_VERSION;
