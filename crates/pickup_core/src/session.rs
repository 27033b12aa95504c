//! Balancing session
//!
//! A `Session` is the whole state of one "paste names, rate, split, adjust"
//! cycle. It is owned by the caller and passed by `&mut` into each command;
//! nothing is kept in process-wide state. Every command runs to completion
//! before returning, so a move and the recompute it triggers can never
//! interleave with another command.

use crate::balance;
use crate::config::PickupConfig;
use crate::error::{Result, RosterError};
use crate::export::format_export;
use crate::models::{BalanceSummary, Lineup, Participant, ParticipantId, Side, Totals};
use crate::roster::{self, SkillTable, TableWarning};
use crate::status::StatusMessage;
use std::collections::BTreeSet;
use std::io::Read;

#[derive(Debug, Clone)]
pub struct Session {
    participants: Vec<Participant>,
    /// Entries whose last skill input was invalid; left out of the next pass
    excluded: BTreeSet<ParticipantId>,
    lineup: Option<Lineup>,
    config: PickupConfig,
}

impl Session {
    pub fn new(participants: Vec<Participant>, config: PickupConfig) -> Self {
        Self { participants, excluded: BTreeSet::new(), lineup: None, config }
    }

    /// Start from pasted names, one per line.
    pub fn from_text(raw: &str, config: PickupConfig) -> Result<Self> {
        let participants = roster::parse_roster(raw, &config.roster)?;
        Ok(Self::new(participants, config))
    }

    /// Start from a skill table; rows that were skipped come back as warnings.
    pub fn from_table<R: Read>(
        reader: R,
        config: PickupConfig,
    ) -> Result<(Self, Vec<TableWarning>)> {
        let import = SkillTable::read(reader, &config.roster)?;
        Ok((Self::new(import.participants, config), import.warnings))
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// First participant with this exact name.
    pub fn find_by_name(&self, name: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.name == name)
    }

    pub fn config(&self) -> &PickupConfig {
        &self.config
    }

    pub fn lineup(&self) -> Option<&Lineup> {
        self.lineup.as_ref()
    }

    pub fn is_excluded(&self, id: ParticipantId) -> bool {
        self.excluded.contains(&id)
    }

    fn index_of(&self, id: ParticipantId) -> Result<usize> {
        self.participants
            .iter()
            .position(|p| p.id == id)
            .ok_or(RosterError::UnknownParticipant(id))
    }

    /// Store a typed skill. Invalid input excludes the participant from the
    /// next balance pass until a valid value is entered.
    pub fn set_skill(&mut self, id: ParticipantId, raw: &str) -> Result<f64> {
        let idx = self.index_of(id)?;

        let skill = match roster::parse_skill(&self.participants[idx].name, raw) {
            Ok(skill) => skill,
            Err(err) => {
                self.excluded.insert(id);
                return Err(err);
            }
        };

        self.participants[idx].skill = skill;
        self.excluded.remove(&id);

        let balance_config = &self.config.balance;
        if let Some(lineup) = self.lineup.as_mut() {
            if let Some(member) = lineup.participant_mut(id) {
                member.skill = skill;
                lineup.recompute(balance_config);
            }
        }
        Ok(skill)
    }

    /// Flip a goalkeeper flag under the configured cap. With teams already
    /// built the flag is mirrored into them and totals are recomputed.
    pub fn toggle_goalkeeper(&mut self, id: ParticipantId) -> Result<bool> {
        let is_goalkeeper = roster::toggle_goalkeeper(
            &mut self.participants,
            id,
            self.config.roster.max_goalkeepers,
        )?;

        let balance_config = &self.config.balance;
        if let Some(lineup) = self.lineup.as_mut() {
            if let Some(member) = lineup.participant_mut(id) {
                member.is_goalkeeper = is_goalkeeper;
                lineup.recompute(balance_config);
            }
        }
        Ok(is_goalkeeper)
    }

    pub fn balance(&mut self) -> Result<&Lineup> {
        for p in self.participants.iter().filter(|p| self.excluded.contains(&p.id)) {
            log::warn!("Leaving '{}' out of the split: skill input is invalid", p.name);
        }

        let eligible: Vec<Participant> = self
            .participants
            .iter()
            .filter(|p| !self.excluded.contains(&p.id))
            .cloned()
            .collect();

        if eligible.len() < 2 {
            return Err(RosterError::InsufficientParticipants { found: eligible.len() });
        }

        let lineup = balance::balance(&eligible, &self.config.balance);
        log::info!(
            "Balanced {} participants: A {:.2} ({}), B {:.2} ({})",
            eligible.len(),
            lineup.team_a.total_skill,
            lineup.team_a.len(),
            lineup.team_b.total_skill,
            lineup.team_b.len()
        );

        Ok(&*self.lineup.insert(lineup))
    }

    /// Move a participant to `to`, then recompute. Moving onto the side the
    /// participant is already on only recomputes.
    pub fn move_participant(&mut self, id: ParticipantId, to: Side) -> Result<Totals> {
        let lineup = self.lineup.as_mut().ok_or(RosterError::NotBalanced)?;
        let from = lineup.side_of(id).ok_or(RosterError::UnknownParticipant(id))?;

        if from != to {
            let member =
                lineup.team_mut(from).remove(id).ok_or(RosterError::UnknownParticipant(id))?;
            log::info!("Moved '{}' from team {} to team {}", member.name, from, to);
            lineup.team_mut(to).push(member, 0.0);
        }

        Ok(lineup.recompute(&self.config.balance))
    }

    pub fn recompute(&mut self) -> Result<Totals> {
        let lineup = self.lineup.as_mut().ok_or(RosterError::NotBalanced)?;
        Ok(lineup.recompute(&self.config.balance))
    }

    pub fn summary(&self) -> Result<BalanceSummary> {
        let lineup = self.lineup.as_ref().ok_or(RosterError::NotBalanced)?;
        Ok(lineup.summary(self.config.balance.even_threshold))
    }

    /// Status line for the current step: rate and split, or the result.
    pub fn status(&self) -> StatusMessage {
        match &self.lineup {
            Some(lineup) => {
                StatusMessage::TeamsGenerated(lineup.summary(self.config.balance.even_threshold))
            }
            None => StatusMessage::RosterReady,
        }
    }

    /// Shareable plain-text roster of the current teams.
    pub fn export(&self) -> Result<String> {
        let lineup = self.lineup.as_ref().ok_or(RosterError::NotBalanced)?;
        Ok(format_export(&lineup.team_a, &lineup.team_b, &self.config.export))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BalanceQuality;

    fn session(names: &str) -> Session {
        Session::from_text(names, PickupConfig::default()).unwrap()
    }

    fn rated(skills: &[&str]) -> Session {
        let names: Vec<String> = (0..skills.len()).map(|i| format!("{}. P{}", i + 1, i)).collect();
        let mut s = session(&names.join("\n"));
        for (i, raw) in skills.iter().enumerate() {
            let _ = s.set_skill(ParticipantId(i as u32), raw);
        }
        s
    }

    #[test]
    fn test_full_cycle() {
        let mut s = rated(&["10", "9", "8", "7", "6", "5"]);
        let lineup = s.balance().unwrap();
        assert_eq!(lineup.team_a.names(), vec!["P0", "P3", "P4"]);
        assert_eq!(lineup.team_b.names(), vec!["P1", "P2", "P5"]);

        let summary = s.summary().unwrap();
        assert_eq!(summary.difference, 1.0);
        assert_eq!(summary.quality, BalanceQuality::Even);

        let text = s.export().unwrap();
        assert!(text.starts_with("Equipo A\n-----------\n1. P0\n"));
    }

    #[test]
    fn test_invalid_skill_excludes_until_fixed() {
        let mut s = rated(&["8", "7", "6"]);
        let err = s.set_skill(ParticipantId(1), "12").unwrap_err();
        assert!(matches!(err, RosterError::InvalidSkillValue { .. }));
        assert!(s.is_excluded(ParticipantId(1)));
        // Previous value survives the rejected input
        assert_eq!(s.participant(ParticipantId(1)).map(|p| p.skill), Some(7.0));

        assert_eq!(s.balance().unwrap().len(), 2);

        s.set_skill(ParticipantId(1), "4").unwrap();
        assert!(!s.is_excluded(ParticipantId(1)));
        assert_eq!(s.balance().unwrap().len(), 3);
    }

    #[test]
    fn test_balance_needs_two_valid_entries() {
        let mut s = rated(&["8", "x"]);
        let err = s.balance().unwrap_err();
        assert!(matches!(err, RosterError::InsufficientParticipants { found: 1 }));
        assert!(s.lineup().is_none());
    }

    #[test]
    fn test_commands_before_balance() {
        let mut s = session("Ana\nBeto");
        assert!(matches!(s.move_participant(ParticipantId(0), Side::B), Err(RosterError::NotBalanced)));
        assert!(matches!(s.recompute(), Err(RosterError::NotBalanced)));
        assert!(matches!(s.export(), Err(RosterError::NotBalanced)));
        assert!(matches!(s.summary(), Err(RosterError::NotBalanced)));
    }

    #[test]
    fn test_move_participant_recomputes_totals() {
        let mut s = rated(&["10", "9", "8", "7", "6", "5"]);
        s.balance().unwrap();

        let totals = s.move_participant(ParticipantId(0), Side::B).unwrap();
        assert_eq!(totals.total_a, 13.0);
        assert_eq!(totals.total_b, 32.0);

        let lineup = s.lineup().unwrap();
        assert_eq!(lineup.side_of(ParticipantId(0)), Some(Side::B));
        assert_eq!(lineup.team_b.names().last(), Some(&"P0"));
        assert_eq!(lineup.team_a.total_skill, 13.0);
    }

    #[test]
    fn test_move_to_same_side_is_noop() {
        let mut s = rated(&["10", "9", "8", "7"]);
        let before = s.balance().unwrap().clone();
        let totals = s.move_participant(ParticipantId(0), Side::A).unwrap();
        assert_eq!(totals, before.totals());
        assert_eq!(s.lineup(), Some(&before));
    }

    #[test]
    fn test_move_unknown_participant() {
        let mut s = rated(&["10", "9"]);
        s.balance().unwrap();
        let err = s.move_participant(ParticipantId(7), Side::A).unwrap_err();
        assert!(matches!(err, RosterError::UnknownParticipant(ParticipantId(7))));
    }

    #[test]
    fn test_goalkeeper_value_follows_moves_of_field_players() {
        let mut s = rated(&["3", "9", "8", "6", "5", "4"]);
        s.toggle_goalkeeper(ParticipantId(0)).unwrap();
        let lineup = s.balance().unwrap();
        assert_eq!(lineup.goalkeeper_value, 8.5);

        // Turning the 9 into a keeper after the split revalues both keepers
        s.toggle_goalkeeper(ParticipantId(1)).unwrap();
        let totals = s.recompute().unwrap();
        assert_eq!(totals.goalkeeper_value, 7.0);
    }

    #[test]
    fn test_third_goalkeeper_rejected_in_session() {
        let mut s = rated(&["3", "9", "8", "6"]);
        s.toggle_goalkeeper(ParticipantId(0)).unwrap();
        s.toggle_goalkeeper(ParticipantId(1)).unwrap();

        let err = s.toggle_goalkeeper(ParticipantId(2)).unwrap_err();
        assert!(matches!(err, RosterError::GoalkeeperLimitExceeded { max: 2 }));

        let flags: Vec<bool> = s.participants().iter().map(|p| p.is_goalkeeper).collect();
        assert_eq!(flags, vec![true, true, false, false]);
    }

    #[test]
    fn test_balance_is_repeatable() {
        let mut s = rated(&["7", "3", "9", "5", "5", "8", "2"]);
        let first = s.balance().unwrap().clone();
        let second = s.balance().unwrap().clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_from_table() {
        let csv = "name,skill,gk\nAna,8,\nBeto,6,yes\nCris,oops,\nDani,7,\n";
        let (mut s, warnings) = Session::from_table(csv.as_bytes(), PickupConfig::default()).unwrap();
        assert_eq!(s.participants().len(), 3);
        assert_eq!(warnings.len(), 1);
        assert_eq!(s.find_by_name("Beto").map(|p| p.is_goalkeeper), Some(true));
        assert_eq!(s.balance().unwrap().len(), 3);
    }

    #[test]
    fn test_status_follows_step() {
        let mut s = rated(&["8", "6", "5", "3"]);
        assert_eq!(s.status(), StatusMessage::RosterReady);

        s.balance().unwrap();
        let summary = s.summary().unwrap();
        assert_eq!(s.status(), StatusMessage::TeamsGenerated(summary));
    }
}
