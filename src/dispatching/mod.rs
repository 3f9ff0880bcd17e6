//! Ranking rules and rule engine for doctor selection.
//!
//! Orders the eligible doctors of one shift, most preferred first, by an
//! ordered chain of ranking rules. Each rule only breaks ties left by the
//! rules before it; a stable sort keeps roster order as the last resort.
//!
//! # Usage
//!
//! ```
//! use icu_roster::dispatching::{rules, RuleEngine};
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::PreferenceScore)
//!     .with_rule(rules::CurrentLoad);
//! assert_eq!(engine.rule_names(), vec!["PREFERENCE", "LOAD"]);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::RankingContext;
pub use engine::RuleEngine;

use crate::models::Doctor;
use std::fmt::Debug;

/// Score returned by a ranking rule.
///
/// Lower scores = higher priority (chosen first).
pub type RuleScore = i64;

/// A ranking rule that scores a doctor for the shift in context.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules that prefer larger values
/// (preference, seniority) negate them.
pub trait RankingRule: Send + Sync + Debug {
    /// Rule name (e.g., "PREFERENCE", "TENURE").
    fn name(&self) -> &'static str;

    /// Scores a doctor; lower ranks first.
    fn evaluate(&self, doctor: &Doctor, context: &RankingContext<'_>) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
