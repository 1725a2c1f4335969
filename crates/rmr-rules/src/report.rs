//! Run reports
//!
//! Every check a rule performs becomes a [`CheckRecord`]. A [`RunReport`]
//! collects them for one `check` call, along with the flags and the stage
//! digests the run saw.

use chrono::{DateTime, Utc};
use rmr_core::{FailureFlags, Flag, StageDigests};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Unmodeled case. Never counted as a pass.
    NotChecked,
}

/// Single check result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckRecord {
    pub rule: String,
    /// Entity id or position, e.g. `thermal_blocks[1].exterior_walls[0]`
    pub entity: String,
    pub check: String,
    pub status: CheckStatus,
    /// Flag a failure raises; `None` for not-checked records
    pub flag: Option<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckRecord {
    pub fn is_failure(&self) -> bool {
        self.status == CheckStatus::Fail
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Rule codes evaluated, in evaluation order
    pub rules: Vec<String>,
    pub records: Vec<CheckRecord>,
    /// Triplet flags after the run
    pub flags: FailureFlags,
    pub digests: StageDigests,
}

impl RunReport {
    pub fn new(rules: Vec<String>, digests: StageDigests) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            rules,
            records: Vec::new(),
            flags: FailureFlags::new(),
            digests,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckRecord> {
        self.records.iter().filter(|r| r.status == CheckStatus::Fail)
    }

    pub fn not_checked(&self) -> impl Iterator<Item = &CheckRecord> {
        self.records.iter().filter(|r| r.status == CheckStatus::NotChecked)
    }

    pub fn records_for<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a CheckRecord> + 'a {
        self.records.iter().filter(move |r| r.rule == rule)
    }

    /// Whether the stage behind `flag` came through the run clean
    pub fn passed(&self, flag: Flag) -> bool {
        !self.flags.is_raised(flag)
    }

    /// `proposed: PASS, baseline: FAIL (3 failed, 1 not checked)`
    pub fn summary(&self) -> String {
        let verdict = |flag| if self.passed(flag) { "PASS" } else { "FAIL" };
        format!(
            "proposed: {}, baseline: {} ({} failed, {} not checked)",
            verdict(Flag::Proposed),
            verdict(Flag::Baseline),
            self.failures().count(),
            self.not_checked().count()
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
