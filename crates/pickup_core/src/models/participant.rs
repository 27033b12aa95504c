use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic identity assigned by the roster builder.
///
/// Names are not unique keys: two people called "Juan" can share a roster,
/// so every command addresses participants through this id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ParticipantId(pub u32);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// 1.0..=10.0, fractional values allowed
    pub skill: f64,
    #[serde(default)]
    pub is_goalkeeper: bool,
}

impl Participant {
    pub fn new(id: ParticipantId, name: impl Into<String>, skill: f64) -> Self {
        Self { id, name: name.into(), skill, is_goalkeeper: false }
    }

    pub fn goalkeeper(mut self) -> Self {
        self.is_goalkeeper = true;
        self
    }

    /// Value this participant adds to a team total.
    #[inline]
    pub fn contribution(&self, goalkeeper_value: f64) -> f64 {
        if self.is_goalkeeper {
            goalkeeper_value
        } else {
            self.skill
        }
    }
}

/// One of the two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Side {
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B")]
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::A => "A",
            Side::B => "B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Side::A),
            "B" => Ok(Side::B),
            other => Err(format!("unknown side '{}', expected A or B", other)),
        }
    }
}
