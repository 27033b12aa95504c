use super::{Participant, ParticipantId, Side};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub members: Vec<Participant>,
    /// Cached sum; goalkeepers count at the current goalkeeper value.
    pub total_skill: f64,
}

impl Team {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn goalkeeper_count(&self) -> usize {
        self.members.iter().filter(|p| p.is_goalkeeper).count()
    }

    pub fn field_players(&self) -> impl Iterator<Item = &Participant> {
        self.members.iter().filter(|p| !p.is_goalkeeper)
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.members.iter().any(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.members.iter_mut().find(|p| p.id == id)
    }

    pub(crate) fn push(&mut self, participant: Participant, contribution: f64) {
        self.total_skill += contribution;
        self.members.push(participant);
    }

    /// Detach a member, keeping the order of the rest. The cached total is
    /// left stale until the next resum.
    pub(crate) fn remove(&mut self, id: ParticipantId) -> Option<Participant> {
        let idx = self.members.iter().position(|p| p.id == id)?;
        Some(self.members.remove(idx))
    }

    pub(crate) fn resum(&mut self, goalkeeper_value: f64) -> f64 {
        self.total_skill = self.members.iter().map(|p| p.contribution(goalkeeper_value)).sum();
        self.total_skill
    }

    pub fn names(&self) -> Vec<&str> {
        self.members.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Result of a recompute pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Totals {
    pub total_a: f64,
    pub total_b: f64,
    pub goalkeeper_value: f64,
}

impl Totals {
    pub fn difference(&self) -> f64 {
        (self.total_a - self.total_b).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BalanceQuality {
    Even,
    Uneven,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BalanceSummary {
    pub difference: f64,
    pub quality: BalanceQuality,
}

impl BalanceSummary {
    pub fn from_totals(totals: &Totals, even_threshold: f64) -> Self {
        let difference = totals.difference();
        let quality = if difference <= even_threshold {
            BalanceQuality::Even
        } else {
            BalanceQuality::Uneven
        };
        Self { difference, quality }
    }
}

/// Two teams plus the goalkeeper value their totals were computed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Lineup {
    pub team_a: Team,
    pub team_b: Team,
    pub goalkeeper_value: f64,
}

impl Lineup {
    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::A => &self.team_a,
            Side::B => &self.team_b,
        }
    }

    pub fn team_mut(&mut self, side: Side) -> &mut Team {
        match side {
            Side::A => &mut self.team_a,
            Side::B => &mut self.team_b,
        }
    }

    pub fn side_of(&self, id: ParticipantId) -> Option<Side> {
        if self.team_a.contains(id) {
            Some(Side::A)
        } else if self.team_b.contains(id) {
            Some(Side::B)
        } else {
            None
        }
    }

    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        match self.side_of(id)? {
            Side::A => self.team_a.get_mut(id),
            Side::B => self.team_b.get_mut(id),
        }
    }

    pub fn len(&self) -> usize {
        self.team_a.len() + self.team_b.len()
    }

    pub fn is_empty(&self) -> bool {
        self.team_a.is_empty() && self.team_b.is_empty()
    }

    pub fn totals(&self) -> Totals {
        Totals {
            total_a: self.team_a.total_skill,
            total_b: self.team_b.total_skill,
            goalkeeper_value: self.goalkeeper_value,
        }
    }

    pub fn summary(&self, even_threshold: f64) -> BalanceSummary {
        BalanceSummary::from_totals(&self.totals(), even_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u32, skill: f64) -> Participant {
        Participant::new(ParticipantId(id), format!("P{}", id), skill)
    }

    #[test]
    fn test_resum_values_goalkeepers_at_given_value() {
        let mut team = Team::new();
        team.push(p(0, 7.0), 7.0);
        team.push(p(1, 2.0).goalkeeper(), 6.0);
        assert_eq!(team.total_skill, 13.0);

        assert_eq!(team.resum(8.5), 15.5);
        assert_eq!(team.goalkeeper_count(), 1);
        assert_eq!(team.field_players().count(), 1);
    }

    #[test]
    fn test_remove_keeps_member_order() {
        let mut team = Team::new();
        for i in 0..4 {
            team.push(p(i, 5.0), 5.0);
        }
        let removed = team.remove(ParticipantId(1)).map(|m| m.id);
        assert_eq!(removed, Some(ParticipantId(1)));
        assert_eq!(team.names(), vec!["P0", "P2", "P3"]);
        assert!(team.remove(ParticipantId(9)).is_none());
    }

    #[test]
    fn test_summary_quality_threshold() {
        let totals = Totals { total_a: 20.0, total_b: 21.0, goalkeeper_value: 5.0 };
        assert_eq!(BalanceSummary::from_totals(&totals, 1.0).quality, BalanceQuality::Even);

        let totals = Totals { total_a: 20.0, total_b: 22.5, goalkeeper_value: 5.0 };
        let summary = BalanceSummary::from_totals(&totals, 1.0);
        assert_eq!(summary.quality, BalanceQuality::Uneven);
        assert_eq!(summary.difference, 2.5);
    }
}
