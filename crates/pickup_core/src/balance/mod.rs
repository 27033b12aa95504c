//! # Balancer
//!
//! Greedy two-way split of a roster by skill.
//!
//! ## Pass
//! 1. Goalkeepers are valued at the mean of the two best field skills
//!    (fallback when fewer than two field players exist).
//! 2. Goalkeepers alternate A, B, A, ...
//! 3. Field players, strongest first, go to the side whose running total
//!    (plus a goalkeeper bonus for the side short of a keeper) is lower or
//!    equal, ties to A.
//! 4. No side may exceed `ceil(n / 2)` members; once one side is full the
//!    rest go to the other regardless of skill.
//!
//! The pass is deterministic and O(n log n). It does not search for the
//! optimal partition.

#[cfg(test)]
mod tests;

use crate::config::BalanceConfig;
use crate::models::{Lineup, Participant, Team, Totals};

/// Mean of the two highest field skills, or the fallback with fewer than two.
pub fn goalkeeper_value<'a, I>(field: I, fallback: f64) -> f64
where
    I: IntoIterator<Item = &'a Participant>,
{
    let mut best = [f64::NEG_INFINITY; 2];
    let mut seen = 0usize;

    for p in field.into_iter().filter(|p| !p.is_goalkeeper) {
        seen += 1;
        if p.skill > best[0] {
            best[1] = best[0];
            best[0] = p.skill;
        } else if p.skill > best[1] {
            best[1] = p.skill;
        }
    }

    if seen < 2 {
        fallback
    } else {
        (best[0] + best[1]) / 2.0
    }
}

pub fn balance(participants: &[Participant], config: &BalanceConfig) -> Lineup {
    let (keepers, mut field): (Vec<&Participant>, Vec<&Participant>) =
        participants.iter().partition(|p| p.is_goalkeeper);

    let gk_value = goalkeeper_value(field.iter().copied(), config.fallback_goalkeeper_value);
    let limit = participants.len().div_ceil(2);

    log::debug!(
        "Balance pass: {} participants ({} goalkeepers), limit {}, goalkeeper value {:.2}",
        participants.len(),
        keepers.len(),
        limit,
        gk_value
    );

    let mut team_a = Team::new();
    let mut team_b = Team::new();

    for (idx, keeper) in keepers.into_iter().enumerate() {
        let team = if idx % 2 == 0 { &mut team_a } else { &mut team_b };
        team.push(keeper.clone(), gk_value);
    }

    // Stable: equal skills keep input order
    field.sort_by(|a, b| b.skill.total_cmp(&a.skill));

    for player in field {
        let to_a = if team_a.len() >= limit {
            false
        } else if team_b.len() >= limit {
            true
        } else {
            let (gk_a, gk_b) = (team_a.goalkeeper_count(), team_b.goalkeeper_count());
            let bonus_a = if gk_a < gk_b { gk_value } else { 0.0 };
            let bonus_b = if gk_b < gk_a { gk_value } else { 0.0 };
            team_a.total_skill + bonus_a <= team_b.total_skill + bonus_b
        };

        let team = if to_a { &mut team_a } else { &mut team_b };
        team.push(player.clone(), player.skill);
    }

    Lineup { team_a, team_b, goalkeeper_value: gk_value }
}

/// Resum both teams with a goalkeeper value taken from the field players
/// currently on them.
pub fn recompute(team_a: &mut Team, team_b: &mut Team, config: &BalanceConfig) -> Totals {
    let gk_value = goalkeeper_value(
        team_a.field_players().chain(team_b.field_players()),
        config.fallback_goalkeeper_value,
    );

    let totals = Totals {
        total_a: team_a.resum(gk_value),
        total_b: team_b.resum(gk_value),
        goalkeeper_value: gk_value,
    };

    log::debug!(
        "Recomputed totals: A {:.2}, B {:.2} (goalkeeper value {:.2})",
        totals.total_a,
        totals.total_b,
        gk_value
    );
    totals
}

impl Lineup {
    pub fn recompute(&mut self, config: &BalanceConfig) -> Totals {
        let totals = recompute(&mut self.team_a, &mut self.team_b, config);
        self.goalkeeper_value = totals.goalkeeper_value;
        totals
    }
}
