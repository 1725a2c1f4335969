//! Transformation stages of a ruleset model
use serde::{Deserialize, Serialize};
use std::fmt;

/// Document field carrying the stage discriminator.
pub const STAGE_FIELD: &str = "transformation_stage";

/// The three copies held by a triplet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    User,
    Proposed,
    Baseline,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::User, Stage::Proposed, Stage::Baseline];

    /// Value written into [`STAGE_FIELD`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::User => "USER",
            Stage::Proposed => "PROPOSED",
            Stage::Baseline => "BASELINE",
        }
    }

    /// Suffix used for the instance file name (`<root>.<suffix>.json`)
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Stage::User => "user",
            Stage::Proposed => "proposed",
            Stage::Baseline => "baseline",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == tag)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
