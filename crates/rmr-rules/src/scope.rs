//! Per-rule check scope
use crate::report::{CheckRecord, CheckStatus};
use rmr_core::{FailureFlags, Flag, InvariantOutcome, StructuralInvariant};
use serde::Serialize;
use serde_json::Value;

/// Collects the records and flags of one rule evaluation.
///
/// Every check lands here: comparisons raise their flag on mismatch and
/// never stop the rule, so one evaluation reports every violation.
#[derive(Debug)]
pub struct RuleScope {
    rule: String,
    flags: FailureFlags,
    records: Vec<CheckRecord>,
}

impl RuleScope {
    pub fn new(rule: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            flags: FailureFlags::new(),
            records: Vec::new(),
        }
    }

    pub fn rule(&self) -> &str {
        &self.rule
    }

    pub fn flags(&self) -> FailureFlags {
        self.flags
    }

    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }

    pub fn into_parts(self) -> (FailureFlags, Vec<CheckRecord>) {
        (self.flags, self.records)
    }

    pub fn pass(
        &mut self,
        flag: Flag,
        entity: &str,
        check: &str,
        expected: Option<Value>,
        actual: Option<Value>,
    ) {
        self.push(CheckRecord {
            rule: self.rule.clone(),
            entity: entity.to_string(),
            check: check.to_string(),
            status: CheckStatus::Pass,
            flag: Some(flag),
            expected,
            actual,
            detail: None,
        });
    }

    pub fn fail(
        &mut self,
        flag: Flag,
        entity: &str,
        check: &str,
        expected: Option<Value>,
        actual: Option<Value>,
        detail: Option<String>,
    ) {
        self.flags.raise(flag);
        self.push(CheckRecord {
            rule: self.rule.clone(),
            entity: entity.to_string(),
            check: check.to_string(),
            status: CheckStatus::Fail,
            flag: Some(flag),
            expected,
            actual,
            detail,
        });
    }

    /// Records an unmodeled case. Raises nothing.
    pub fn not_checked(&mut self, entity: &str, check: &str, reason: impl Into<String>) {
        self.push(CheckRecord {
            rule: self.rule.clone(),
            entity: entity.to_string(),
            check: check.to_string(),
            status: CheckStatus::NotChecked,
            flag: None,
            expected: None,
            actual: None,
            detail: Some(reason.into()),
        });
    }

    /// Exact comparison for categorical and table-derived values. A missing
    /// actual value is a mismatch.
    pub fn expect_equal<T>(&mut self, flag: Flag, entity: &str, check: &str, expected: T, actual: Option<T>) -> bool
    where
        T: PartialEq + Serialize,
    {
        let ok = actual.as_ref() == Some(&expected);
        let expected = serde_json::to_value(&expected).ok();
        let actual = actual.and_then(|a| serde_json::to_value(a).ok());
        if ok {
            self.pass(flag, entity, check, expected, actual);
        } else {
            self.fail(flag, entity, check, expected, actual, None);
        }
        ok
    }

    /// `|expected - actual| < tolerance`
    pub fn expect_within(
        &mut self,
        flag: Flag,
        entity: &str,
        check: &str,
        expected: f64,
        actual: Option<f64>,
        tolerance: f64,
    ) -> bool {
        let ok = matches!(actual, Some(a) if (expected - a).abs() < tolerance);
        let expected_value = serde_json::to_value(expected).ok();
        let actual_value = actual.and_then(|a| serde_json::to_value(a).ok());
        if ok {
            self.pass(flag, entity, check, expected_value, actual_value);
        } else {
            let detail = format!("tolerance {}", tolerance);
            self.fail(flag, entity, check, expected_value, actual_value, Some(detail));
        }
        ok
    }

    /// Structural invariant over one substructure: `right` must equal `left`
    /// once every path in `neutralized` is set to `null` on both sides.
    pub fn expect_unchanged(
        &mut self,
        flag: Flag,
        entity: &str,
        neutralized: &[&str],
        left: Option<&Value>,
        right: Option<&Value>,
    ) -> bool {
        let check = if neutralized.is_empty() {
            format!("{} unchanged", flag.stage())
        } else {
            format!("{} unchanged except {}", flag.stage(), neutralized.join(", "))
        };

        let invariant = match StructuralInvariant::neutralizing(neutralized) {
            Ok(invariant) => invariant,
            Err(e) => {
                self.not_checked(entity, &check, e.to_string());
                return false;
            }
        };

        match invariant.check(left, right) {
            InvariantOutcome::Holds => {
                self.pass(flag, entity, &check, None, None);
                true
            }
            InvariantOutcome::Broken { at } => {
                self.fail(flag, entity, &check, None, None, Some(format!("first difference at {}", at)));
                false
            }
        }
    }

    fn push(&mut self, record: CheckRecord) {
        let expected = display(record.expected.as_ref());
        let actual = display(record.actual.as_ref());
        let detail = record.detail.as_deref().unwrap_or("");
        match record.status {
            CheckStatus::Pass => tracing::info!(
                rule = %record.rule,
                entity = %record.entity,
                check = %record.check,
                expected = %expected,
                actual = %actual,
                "check passed"
            ),
            CheckStatus::Fail => tracing::warn!(
                rule = %record.rule,
                entity = %record.entity,
                check = %record.check,
                flag = ?record.flag,
                expected = %expected,
                actual = %actual,
                detail,
                "check failed"
            ),
            CheckStatus::NotChecked => tracing::info!(
                rule = %record.rule,
                entity = %record.entity,
                check = %record.check,
                not_checked = true,
                reason = detail,
                "not checked"
            ),
        }
        self.records.push(record);
    }
}

fn display(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expect_equal_raises_flag_on_mismatch() {
        let mut scope = RuleScope::new("18a");
        assert!(scope.expect_equal(Flag::Proposed, "sys-1", "hvac_system_type", "PSZ_AC", Some("PSZ_AC")));
        assert!(!scope.flags().any());

        assert!(!scope.expect_equal(Flag::Proposed, "sys-2", "hvac_system_type", "PSZ_AC", Some("PSZ_HP")));
        assert!(scope.flags().proposed_err());
        assert!(!scope.flags().baseline_err());
        assert_eq!(scope.records()[1].actual, Some(json!("PSZ_HP")));
    }

    #[test]
    fn test_missing_actual_fails() {
        let mut scope = RuleScope::new("6a");
        assert!(!scope.expect_equal(Flag::Baseline, "area-1", "power", 150.0, None));
        assert!(scope.flags().baseline_err());
    }

    #[test]
    fn test_tolerance_is_strict() {
        let mut scope = RuleScope::new("19a");
        assert!(scope.expect_within(Flag::Baseline, "sys-1", "bhp", 13.0, Some(13.4), 0.5));
        assert!(!scope.expect_within(Flag::Baseline, "sys-1", "bhp", 13.0, Some(13.5), 0.5));
        assert!(!scope.expect_within(Flag::Baseline, "sys-1", "bhp", 13.0, None, 0.5));
    }

    #[test]
    fn test_not_checked_raises_nothing() {
        let mut scope = RuleScope::new("5a");
        scope.not_checked("model", "building_area_type", "mixed building area types");
        let (flags, records) = scope.into_parts();
        assert!(!flags.any());
        assert_eq!(records[0].status, CheckStatus::NotChecked);
        assert_eq!(records[0].flag, None);
    }

    #[test]
    fn test_expect_unchanged_reports_location() {
        let user = json!([{ "id": "a", "power": 10, "area": 5 }]);
        let baseline = json!([{ "id": "a", "power": 20, "area": 6 }]);
        let mut scope = RuleScope::new("6a");

        assert!(!scope.expect_unchanged(Flag::Baseline, "exterior_lighting_areas", &["[*].power"], Some(&user), Some(&baseline)));
        let record = &scope.records()[0];
        assert_eq!(record.check, "BASELINE unchanged except [*].power");
        assert_eq!(record.detail.as_deref(), Some("first difference at $[0].area"));
    }

    #[test]
    fn test_bad_path_is_not_checked() {
        let value = json!([]);
        let mut scope = RuleScope::new("6a");
        assert!(!scope.expect_unchanged(Flag::Baseline, "x", &["[*]..power"], Some(&value), Some(&value)));
        assert_eq!(scope.records()[0].status, CheckStatus::NotChecked);
        assert!(!scope.flags().any());
    }
}
