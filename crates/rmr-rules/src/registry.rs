//! Rule registry and dispatcher
use crate::config::CheckConfig;
use crate::report::RunReport;
use crate::rule::Rule;
use crate::rules::{ExteriorLighting, FanPower, FenestrationArea, FenestrationAssembly, SystemSelection};
use crate::scope::RuleScope;
use once_cell::sync::Lazy;
use rmr_core::{Result, Triplet};

/// Sentinel that selects every registered rule (case-insensitive)
pub const ALL: &str = "all";

/// Explicit mapping from rule codes to evaluators.
///
/// Rules run in registration order. Codes are unique; registering a code
/// twice replaces the earlier rule in place.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Every rule this crate implements: `6a, 18a, 19a, 5a, 5b`
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry
            .register(Box::new(ExteriorLighting))
            .register(Box::new(SystemSelection))
            .register(Box::new(FanPower))
            .register(Box::new(FenestrationArea))
            .register(Box::new(FenestrationAssembly));
        registry
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) -> &mut Self {
        match self.rules.iter().position(|r| r.code() == rule.code()) {
            Some(i) => self.rules[i] = rule,
            None => self.rules.push(rule),
        }
        self
    }

    pub fn codes(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.code()).collect()
    }

    pub fn get(&self, code: &str) -> Option<&dyn Rule> {
        self.rules.iter().find(|r| r.code() == code).map(|r| r.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules selected by `ids`, in registration order. `"all"` selects
    /// everything; unknown codes are skipped.
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Vec<&dyn Rule> {
        if ids.iter().any(|id| id.as_ref().eq_ignore_ascii_case(ALL)) {
            return self.rules.iter().map(|r| r.as_ref()).collect();
        }

        for id in ids {
            let id = id.as_ref();
            if self.get(id).is_none() {
                tracing::debug!(rule = id, "unknown rule code ignored");
            }
        }

        self.rules
            .iter()
            .filter(|r| ids.iter().any(|id| id.as_ref() == r.code()))
            .map(|r| r.as_ref())
            .collect()
    }

    /// Evaluates the selected rules against `triplet` and merges their flags
    /// into it. Returns `None`, without evaluating anything, when no rule is
    /// selected.
    pub fn check<S: AsRef<str>>(&self, triplet: &mut Triplet, ids: &[S]) -> Option<RunReport> {
        let rules = self.resolve(ids);
        if rules.is_empty() {
            tracing::debug!("no rules selected");
            return None;
        }

        let codes = rules.iter().map(|r| r.code().to_string()).collect();
        let mut report = RunReport::new(codes, triplet.digests());
        tracing::info!(run_id = %report.run_id, rules = ?report.rules, "rule check started");

        for rule in rules {
            let span = tracing::debug_span!("rule", code = rule.code());
            let _enter = span.enter();
            tracing::debug!(title = rule.title(), "rule started");

            let mut scope = RuleScope::new(rule.code());
            rule.evaluate(triplet, &mut scope);
            let (flags, records) = scope.into_parts();

            triplet.merge_flags(flags);
            tracing::debug!(
                checks = records.len(),
                proposed_err = flags.proposed_err(),
                baseline_err = flags.baseline_err(),
                "rule finished"
            );
            report.records.extend(records);
        }

        report.flags = triplet.flags();
        tracing::info!(run_id = %report.run_id, summary = %report.summary(), "rule check finished");
        Some(report)
    }

    /// [`check`](Self::check) driven by a config; saves the stage documents
    /// afterwards when asked to. A failed save is fatal.
    pub fn run(&self, triplet: &mut Triplet, config: &CheckConfig) -> Result<Option<RunReport>> {
        let report = self.check(triplet, config.rules.as_slice());
        if config.save_instances {
            triplet.save_instances()?;
        }
        Ok(report)
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

static STANDARD: Lazy<RuleRegistry> = Lazy::new(RuleRegistry::standard);

/// Shared instance of [`RuleRegistry::standard`]
pub fn standard_registry() -> &'static RuleRegistry {
    &STANDARD
}

/// `triplet.check_rules(&["all"])`
pub trait CheckRules {
    fn check_rules<S: AsRef<str>>(&mut self, ids: &[S]) -> Option<RunReport>;
}

impl CheckRules for Triplet {
    fn check_rules<S: AsRef<str>>(&mut self, ids: &[S]) -> Option<RunReport> {
        standard_registry().check(self, ids)
    }
}
