//! Skill table import
//!
//! Reads the "name / level / goalkeeper" table as CSV. Bad rows are reported
//! as warnings and left out; only a table that cannot be read at all, or that
//! leaves fewer than two players, fails the import.

use super::{clean_name, parse_skill};
use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::models::{Participant, ParticipantId};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::fmt;
use std::io::Read;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
enum TableField {
    Goalkeeper,
    Skill,
    Name,
}

// Checked in order; a header belongs to the first field it matches.
static FIELD_HEADER_PATTERNS: Lazy<Vec<(TableField, Regex)>> = Lazy::new(|| {
    [
        (TableField::Goalkeeper, vec!["^gk$", "goalkeeper", "keeper", "portero", "arquero"]),
        (TableField::Skill, vec!["skill", "nivel", "level", "rating"]),
        (TableField::Name, vec!["name", "nombre", "jugador", "player"]),
    ]
    .into_iter()
    .map(|(field, patterns)| {
        let regex = RegexBuilder::new(&patterns.join("|"))
            .case_insensitive(true)
            .build()
            .expect("header patterns are valid");
        (field, regex)
    })
    .collect()
});

const DELIMITER_CANDIDATES: [u8; 3] = [b',', b';', b'\t'];

#[derive(Debug)]
pub enum TableWarning {
    SkippedEmptyName { row: usize },
    DuplicateName { row: usize, name: String },
    /// Row kept or dropped according to the error: an invalid skill drops the
    /// row, a goalkeeper over the cap keeps it as a field player.
    Rejected { row: usize, error: RosterError },
}

impl fmt::Display for TableWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableWarning::SkippedEmptyName { row } => write!(f, "row {}: empty name, skipped", row),
            TableWarning::DuplicateName { row, name } => {
                write!(f, "row {}: repeated name '{}', skipped", row, name)
            }
            TableWarning::Rejected { row, error } => write!(f, "row {}: {}", row, error),
        }
    }
}

#[derive(Debug)]
pub struct TableImport {
    pub participants: Vec<Participant>,
    pub warnings: Vec<TableWarning>,
}

/// Column layout of a skill table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillTable {
    pub name_column: usize,
    pub skill_column: usize,
    pub goalkeeper_column: Option<usize>,
    pub delimiter: u8,
}

fn parse_bool_cell(val: &str) -> bool {
    matches!(
        val.trim().to_lowercase().as_str(),
        "true" | "yes" | "si" | "sí" | "y" | "s" | "1" | "x"
    )
}

fn sniff_delimiter(buffer: &[u8]) -> u8 {
    let mut counts = [0usize; 3];
    for byte in buffer {
        for (i, delimiter) in DELIMITER_CANDIDATES.iter().enumerate() {
            if byte == delimiter {
                counts[i] += 1;
            }
        }
    }

    counts
        .into_iter()
        .enumerate()
        .max_by_key(|(i, c)| (*c, std::cmp::Reverse(*i)))
        .filter(|(_, c)| *c > 0)
        .map(|(i, _)| DELIMITER_CANDIDATES[i])
        .unwrap_or(b',')
}

impl SkillTable {
    /// Read a whole table: sniff the delimiter, map the header, parse rows.
    pub fn read<R: Read>(mut reader: R, config: &RosterConfig) -> Result<TableImport> {
        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;

        let delimiter = sniff_delimiter(&buffer);
        let mut csv_reader =
            csv::ReaderBuilder::new().delimiter(delimiter).from_reader(&buffer[..]);
        let headers = csv_reader.headers()?;

        let table = Self::from_headers(headers.iter(), delimiter)?;
        table.parse(&buffer[..], config)
    }

    pub fn from_headers<'a, I>(headers: I, delimiter: u8) -> Result<Self>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut name_column = None;
        let mut skill_column = None;
        let mut goalkeeper_column = None;

        for (idx, header) in headers.enumerate() {
            let field = FIELD_HEADER_PATTERNS
                .iter()
                .find(|(_, pattern)| pattern.is_match(header.trim()))
                .map(|(field, _)| *field);

            let slot = match field {
                Some(TableField::Name) => &mut name_column,
                Some(TableField::Skill) => &mut skill_column,
                Some(TableField::Goalkeeper) => &mut goalkeeper_column,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(idx);
            }
        }

        let name_column = name_column
            .ok_or_else(|| RosterError::TableFormat("no name column in header".to_string()))?;
        let skill_column = skill_column
            .ok_or_else(|| RosterError::TableFormat("no skill column in header".to_string()))?;

        Ok(Self { name_column, skill_column, goalkeeper_column, delimiter })
    }

    pub fn parse<R: Read>(&self, reader: R, config: &RosterConfig) -> Result<TableImport> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut participants: Vec<Participant> = Vec::new();
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let row = idx + 1;

            let name = clean_name(record.get(self.name_column).unwrap_or(""));
            if name.is_empty() {
                warnings.push(TableWarning::SkippedEmptyName { row });
                continue;
            }
            if config.deduplicate_names && !seen.insert(name.clone()) {
                warnings.push(TableWarning::DuplicateName { row, name });
                continue;
            }

            let skill = match parse_skill(&name, record.get(self.skill_column).unwrap_or("")) {
                Ok(skill) => skill,
                Err(error) => {
                    log::warn!("Excluding row {}: {}", row, error);
                    warnings.push(TableWarning::Rejected { row, error });
                    continue;
                }
            };

            let mut participant =
                Participant::new(ParticipantId(participants.len() as u32), name, skill);

            let wants_goalkeeper = self
                .goalkeeper_column
                .and_then(|col| record.get(col))
                .map(parse_bool_cell)
                .unwrap_or(false);
            if wants_goalkeeper {
                let goalkeepers = participants.iter().filter(|p| p.is_goalkeeper).count();
                if goalkeepers < config.max_goalkeepers {
                    participant.is_goalkeeper = true;
                } else {
                    log::warn!("Row {}: goalkeeper flag for '{}' dropped", row, participant.name);
                    warnings.push(TableWarning::Rejected {
                        row,
                        error: RosterError::GoalkeeperLimitExceeded { max: config.max_goalkeepers },
                    });
                }
            }

            participants.push(participant);
        }

        if participants.len() < 2 {
            return Err(RosterError::InsufficientParticipants { found: participants.len() });
        }

        Ok(TableImport { participants, warnings })
    }
}
