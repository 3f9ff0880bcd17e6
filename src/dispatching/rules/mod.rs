//! Built-in ranking rules.
//!
//! The standard chain, in order:
//!
//! | # | Rule | Prefers |
//! |---|------|---------|
//! | 1 | PREFERENCE | higher preference score for weekday × kind |
//! | 2 | TEMI | board-certified intensivists |
//! | 3 | RESIDENCE | residents |
//! | 4 | BALANCE | lower expected − actual balance |
//! | 5 | TENURE | more senior doctors |
//! | 6 | LOAD | fewer shifts assigned so far in this run |
//!
//! # Score Convention
//! All rules return lower scores for higher priority doctors.

use super::{RankingContext, RankingRule, RuleScore};
use crate::models::Doctor;

/// Declared preference for the shift's weekday and kind, descending.
#[derive(Debug, Clone, Copy)]
pub struct PreferenceScore;

impl RankingRule for PreferenceScore {
    fn name(&self) -> &'static str {
        "PREFERENCE"
    }

    fn evaluate(&self, doctor: &Doctor, context: &RankingContext<'_>) -> RuleScore {
        let shift = context.shift;
        -(doctor.preference_for(shift.date, shift.kind) as RuleScore)
    }

    fn description(&self) -> &'static str {
        "Highest preference score first"
    }
}

/// TEMI-certified doctors first.
#[derive(Debug, Clone, Copy)]
pub struct TemiFirst;

impl RankingRule for TemiFirst {
    fn name(&self) -> &'static str {
        "TEMI"
    }

    fn evaluate(&self, doctor: &Doctor, _context: &RankingContext<'_>) -> RuleScore {
        flag_first(doctor.temi)
    }

    fn description(&self) -> &'static str {
        "Board-certified intensivists first"
    }
}

/// Residents first.
#[derive(Debug, Clone, Copy)]
pub struct ResidenceFirst;

impl RankingRule for ResidenceFirst {
    fn name(&self) -> &'static str {
        "RESIDENCE"
    }

    fn evaluate(&self, doctor: &Doctor, _context: &RankingContext<'_>) -> RuleScore {
        flag_first(doctor.residence)
    }

    fn description(&self) -> &'static str {
        "Residents first"
    }
}

/// Historical balance (expected − actual), ascending.
///
/// The lowest balance ranks first.
#[derive(Debug, Clone, Copy)]
pub struct PerformanceBalance;

impl RankingRule for PerformanceBalance {
    fn name(&self) -> &'static str {
        "BALANCE"
    }

    fn evaluate(&self, doctor: &Doctor, context: &RankingContext<'_>) -> RuleScore {
        context.ledger.balance(&doctor.id)
    }

    fn description(&self) -> &'static str {
        "Lowest expected-minus-actual balance first"
    }
}

/// Tenure, descending.
#[derive(Debug, Clone, Copy)]
pub struct Seniority;

impl RankingRule for Seniority {
    fn name(&self) -> &'static str {
        "TENURE"
    }

    fn evaluate(&self, doctor: &Doctor, _context: &RankingContext<'_>) -> RuleScore {
        doctor.tenure.saturating_neg()
    }

    fn description(&self) -> &'static str {
        "Most senior first"
    }
}

/// Shifts already assigned in this run, ascending.
#[derive(Debug, Clone, Copy)]
pub struct CurrentLoad;

impl RankingRule for CurrentLoad {
    fn name(&self) -> &'static str {
        "LOAD"
    }

    fn evaluate(&self, doctor: &Doctor, context: &RankingContext<'_>) -> RuleScore {
        context.state.counts_for(&doctor.id).total as RuleScore
    }

    fn description(&self) -> &'static str {
        "Fewest shifts so far first"
    }
}

#[inline]
fn flag_first(flag: bool) -> RuleScore {
    if flag {
        0
    } else {
        1
    }
}
