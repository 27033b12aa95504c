use super::*;
use crate::models::ParticipantId;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn field(id: u32, skill: f64) -> Participant {
    Participant::new(ParticipantId(id), format!("P{}", id), skill)
}

fn keeper(id: u32, skill: f64) -> Participant {
    field(id, skill).goalkeeper()
}

fn roster(skills: &[f64]) -> Vec<Participant> {
    skills.iter().enumerate().map(|(i, &s)| field(i as u32, s)).collect()
}

fn skills(team: &Team) -> Vec<f64> {
    team.members.iter().map(|p| p.skill).collect()
}

#[test]
fn test_greedy_split_of_six_field_players() {
    let lineup = balance(&roster(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0]), &BalanceConfig::default());

    assert_eq!(skills(&lineup.team_a), vec![10.0, 7.0, 6.0]);
    assert_eq!(skills(&lineup.team_b), vec![9.0, 8.0, 5.0]);
    assert_eq!(lineup.team_a.total_skill, 23.0);
    assert_eq!(lineup.team_b.total_skill, 22.0);
    assert!(lineup.totals().difference() <= 10.0);
}

#[test]
fn test_input_order_does_not_matter_for_distinct_skills() {
    let shuffled = roster(&[6.0, 9.0, 5.0, 10.0, 7.0, 8.0]);
    let lineup = balance(&shuffled, &BalanceConfig::default());
    assert_eq!(skills(&lineup.team_a), vec![10.0, 7.0, 6.0]);
    assert_eq!(skills(&lineup.team_b), vec![9.0, 8.0, 5.0]);
}

#[test]
fn test_equal_skills_keep_input_order() {
    let lineup = balance(&roster(&[5.0, 5.0, 5.0, 5.0]), &BalanceConfig::default());
    let ids_a: Vec<u32> = lineup.team_a.members.iter().map(|p| p.id.0).collect();
    let ids_b: Vec<u32> = lineup.team_b.members.iter().map(|p| p.id.0).collect();
    assert_eq!(ids_a, vec![0, 2]);
    assert_eq!(ids_b, vec![1, 3]);
}

#[test]
fn test_two_participants() {
    let lineup = balance(&roster(&[4.0, 9.0]), &BalanceConfig::default());
    assert_eq!(skills(&lineup.team_a), vec![9.0]);
    assert_eq!(skills(&lineup.team_b), vec![4.0]);
}

#[test]
fn test_size_limit_overrides_skill_sums() {
    // A holds the 10 and stays ahead, yet B may not grow past ceil(6/2)
    let lineup = balance(&roster(&[10.0, 1.0, 1.0, 1.0, 1.0, 1.0]), &BalanceConfig::default());
    assert_eq!(lineup.team_a.len(), 3);
    assert_eq!(lineup.team_b.len(), 3);
    assert_eq!(lineup.team_a.total_skill, 12.0);
    assert_eq!(lineup.team_b.total_skill, 3.0);
}

#[test]
fn test_goalkeeper_value() {
    let players = vec![field(0, 4.0), field(1, 9.0), keeper(2, 10.0), field(3, 7.0)];
    assert_eq!(goalkeeper_value(&players, 5.0), 8.0);

    let single = vec![field(0, 9.0), keeper(1, 2.0)];
    assert_eq!(goalkeeper_value(&single, 5.0), 5.0);
    assert_eq!(goalkeeper_value(Vec::<Participant>::new().iter(), 6.0), 6.0);

    let tied = vec![field(0, 10.0), field(1, 10.0), field(2, 3.0)];
    assert_eq!(goalkeeper_value(&tied, 5.0), 10.0);
}

#[test]
fn test_single_goalkeeper_gets_compensated() {
    let players = vec![
        keeper(0, 3.0),
        field(1, 9.0),
        field(2, 8.0),
        field(3, 6.0),
        field(4, 5.0),
        field(5, 4.0),
    ];
    let lineup = balance(&players, &BalanceConfig::default());

    assert_eq!(lineup.goalkeeper_value, 8.5);
    let ids_a: Vec<u32> = lineup.team_a.members.iter().map(|p| p.id.0).collect();
    let ids_b: Vec<u32> = lineup.team_b.members.iter().map(|p| p.id.0).collect();
    assert_eq!(ids_a, vec![0, 1, 4]);
    assert_eq!(ids_b, vec![2, 3, 5]);
    // Goalkeeper counted at 8.5, not at the 3 typed for them
    assert_eq!(lineup.team_a.total_skill, 22.5);
    assert_eq!(lineup.team_b.total_skill, 18.0);
}

#[test]
fn test_two_goalkeepers_split_across_teams() {
    let players = vec![
        keeper(0, 2.0),
        field(1, 10.0),
        keeper(2, 9.0),
        field(3, 7.0),
        field(4, 6.0),
        field(5, 3.0),
    ];
    let lineup = balance(&players, &BalanceConfig::default());

    assert_eq!(lineup.team_a.goalkeeper_count(), 1);
    assert_eq!(lineup.team_b.goalkeeper_count(), 1);
    assert_eq!(lineup.team_a.members[0].id, ParticipantId(0));
    assert_eq!(lineup.team_b.members[0].id, ParticipantId(2));
    assert_eq!(lineup.team_a.total_skill, 21.5);
    assert_eq!(lineup.team_b.total_skill, 21.5);
}

#[test]
fn test_only_goalkeepers_use_fallback_value() {
    let players = vec![keeper(0, 9.0), keeper(1, 2.0)];
    let config = BalanceConfig { fallback_goalkeeper_value: 6.0, ..BalanceConfig::default() };
    let lineup = balance(&players, &config);
    assert_eq!(lineup.goalkeeper_value, 6.0);
    assert_eq!(lineup.team_a.total_skill, 6.0);
    assert_eq!(lineup.team_b.total_skill, 6.0);
}

#[test]
fn test_recompute_uses_current_field_players() {
    let players = vec![
        keeper(0, 3.0),
        field(1, 9.0),
        field(2, 8.0),
        field(3, 6.0),
        field(4, 5.0),
        field(5, 4.0),
    ];
    let config = BalanceConfig::default();
    let mut lineup = balance(&players, &config);

    // The 9 becomes a second goalkeeper: the best field pair is now 8 and 6
    if let Some(p) = lineup.participant_mut(ParticipantId(1)) {
        p.is_goalkeeper = true;
    }
    let totals = lineup.recompute(&config);

    assert_eq!(totals.goalkeeper_value, 7.0);
    assert_eq!(totals.total_a, 19.0);
    assert_eq!(totals.total_b, 18.0);
    assert_eq!(lineup.goalkeeper_value, 7.0);
    assert_eq!(lineup.team_a.total_skill, 19.0);
}

#[test]
fn test_recompute_after_move_keeps_field_pool() {
    let config = BalanceConfig::default();
    let mut lineup = balance(&roster(&[10.0, 9.0, 8.0, 7.0, 6.0, 5.0]), &config);

    let moved = lineup.team_a.remove(ParticipantId(0)).unwrap();
    lineup.team_b.push(moved, 0.0);
    let totals = lineup.recompute(&config);

    assert_eq!(totals.total_a, 13.0);
    assert_eq!(totals.total_b, 32.0);
    assert_eq!(totals.goalkeeper_value, 9.5);
}

fn roster_strategy() -> impl Strategy<Value = Vec<Participant>> {
    prop::collection::vec((1.0f64..=10.0, any::<bool>()), 2..40).prop_map(|entries| {
        let mut keepers = 0;
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (skill, wants_gk))| {
                let p = field(i as u32, skill);
                if wants_gk && keepers < 2 {
                    keepers += 1;
                    p.goalkeeper()
                } else {
                    p
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn prop_every_participant_assigned_once(players in roster_strategy()) {
        let lineup = balance(&players, &BalanceConfig::default());

        let expected: BTreeSet<ParticipantId> = players.iter().map(|p| p.id).collect();
        let assigned: Vec<ParticipantId> = lineup
            .team_a
            .members
            .iter()
            .chain(lineup.team_b.members.iter())
            .map(|p| p.id)
            .collect();
        prop_assert_eq!(assigned.len(), players.len());
        prop_assert_eq!(assigned.into_iter().collect::<BTreeSet<_>>(), expected);
    }

    #[test]
    fn prop_team_sizes_differ_by_at_most_one(players in roster_strategy()) {
        let lineup = balance(&players, &BalanceConfig::default());
        let diff = lineup.team_a.len().abs_diff(lineup.team_b.len());
        prop_assert!(diff <= 1, "sizes {} vs {}", lineup.team_a.len(), lineup.team_b.len());
    }

    #[test]
    fn prop_goalkeepers_split_evenly(players in roster_strategy()) {
        let lineup = balance(&players, &BalanceConfig::default());
        let diff = lineup.team_a.goalkeeper_count().abs_diff(lineup.team_b.goalkeeper_count());
        prop_assert!(diff <= 1);
    }

    #[test]
    fn prop_goalkeeper_value_is_top_two_mean(players in roster_strategy()) {
        let lineup = balance(&players, &BalanceConfig::default());

        let mut field_skills: Vec<f64> =
            players.iter().filter(|p| !p.is_goalkeeper).map(|p| p.skill).collect();
        field_skills.sort_by(|a, b| b.total_cmp(a));
        let expected = if field_skills.len() >= 2 {
            (field_skills[0] + field_skills[1]) / 2.0
        } else {
            5.0
        };
        prop_assert!((lineup.goalkeeper_value - expected).abs() < 1e-9);
    }

    #[test]
    fn prop_totals_match_member_contributions(players in roster_strategy()) {
        let lineup = balance(&players, &BalanceConfig::default());
        for team in [&lineup.team_a, &lineup.team_b] {
            let sum: f64 = team.members.iter().map(|p| p.contribution(lineup.goalkeeper_value)).sum();
            prop_assert!((team.total_skill - sum).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_balance_is_idempotent(players in roster_strategy()) {
        let config = BalanceConfig::default();
        prop_assert_eq!(balance(&players, &config), balance(&players, &config));
    }

    #[test]
    fn prop_recompute_on_fresh_lineup_changes_nothing(players in roster_strategy()) {
        let config = BalanceConfig::default();
        let lineup = balance(&players, &config);
        let mut again = lineup.clone();
        let totals = again.recompute(&config);
        prop_assert!((totals.total_a - lineup.team_a.total_skill).abs() < 1e-9);
        prop_assert!((totals.total_b - lineup.team_b.total_skill).abs() < 1e-9);
    }
}
