//! Rule engine for ranking doctors.
//!
//! Applies ranking rules in sequence: the first rule that separates two
//! doctors decides their order, later rules only see ties. When every
//! rule ties, the stable sort keeps the doctors in roster order.

use std::cmp::Ordering;
use std::sync::Arc;

use super::{rules, RankingContext, RankingRule, RuleScore};
use crate::models::Doctor;

/// A composable chain of ranking rules.
///
/// # Example
/// ```
/// use icu_roster::dispatching::RuleEngine;
///
/// let engine = RuleEngine::standard();
/// assert_eq!(
///     engine.rule_names(),
///     vec!["PREFERENCE", "TEMI", "RESIDENCE", "BALANCE", "TENURE", "LOAD"]
/// );
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn RankingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine (roster order only).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The unit's six-stage chain: preference, TEMI, residence,
    /// historical balance, tenure, current load.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(rules::PreferenceScore)
            .with_rule(rules::TemiFirst)
            .with_rule(rules::ResidenceFirst)
            .with_rule(rules::PerformanceBalance)
            .with_rule(rules::Seniority)
            .with_rule(rules::CurrentLoad)
    }

    /// Appends a rule to the end of the chain.
    pub fn with_rule<R: RankingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts candidates by priority (highest priority first).
    ///
    /// Returns indices into `candidates`. Each doctor is scored once per
    /// rule; ties across every rule keep their input order.
    pub fn sort_indices(&self, candidates: &[&Doctor], context: &RankingContext<'_>) -> Vec<usize> {
        let scores: Vec<Vec<RuleScore>> = candidates
            .iter()
            .map(|doctor| self.evaluate(doctor, context))
            .collect();

        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| scores[a].cmp(&scores[b]));
        indices
    }

    /// Returns candidates in ranked order.
    pub fn rank<'d>(&self, candidates: &[&'d Doctor], context: &RankingContext<'_>) -> Vec<&'d Doctor> {
        self.sort_indices(candidates, context)
            .into_iter()
            .map(|i| candidates[i])
            .collect()
    }

    /// Returns the index of the highest-priority candidate.
    pub fn select_best(&self, candidates: &[&Doctor], context: &RankingContext<'_>) -> Option<usize> {
        self.sort_indices(candidates, context).first().copied()
    }

    /// Scores from each rule for one doctor.
    pub fn evaluate(&self, doctor: &Doctor, context: &RankingContext<'_>) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(doctor, context))
            .collect()
    }

    /// Compares two doctors rule by rule, stopping at the first difference.
    ///
    /// `Ordering::Less` means `a` ranks ahead of `b`.
    pub fn compare(&self, a: &Doctor, b: &Doctor, context: &RankingContext<'_>) -> Ordering {
        for rule in &self.rules {
            let ordering = rule.evaluate(a, context).cmp(&rule.evaluate(b, context));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
