pub mod participant;
pub mod team;

pub use participant::{Participant, ParticipantId, Side};
pub use team::{BalanceQuality, BalanceSummary, Lineup, Team, Totals};
