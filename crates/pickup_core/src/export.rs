//! Plain-text roster for pasting into a group chat

use crate::config::ExportConfig;
use crate::models::Team;
use crate::roster::clean_name;

fn numbered(team: &Team) -> Vec<String> {
    team.members
        .iter()
        .enumerate()
        .map(|(idx, p)| format!("{}. {}", idx + 1, clean_name(&p.name)))
        .collect()
}

/// Render both teams as heading, rule and a 1-based numbered list, with one
/// blank line between the teams. Names are re-cleaned so an ordinal that
/// slipped through does not end up numbered twice.
pub fn format_export(team_a: &Team, team_b: &Team, config: &ExportConfig) -> String {
    let mut lines = vec![config.team_a_heading.clone(), config.rule.clone()];
    lines.extend(numbered(team_a));
    lines.push(String::new());
    lines.push(config.team_b_heading.clone());
    lines.push(config.rule.clone());
    lines.extend(numbered(team_b));
    lines.join("\n")
}
