//! Priority Budgeter & Sorter
//!
//! Caps an included rule set by priority and puts the survivors in emission order.
//!
//! The cap is a walking budget rather than a top-K cut: candidates are visited
//! from most to least important, and a candidate with priority `p` survives only
//! while the number of candidates still in play is at most `p`. Each drop shrinks
//! that number, so later (less important) candidates see a smaller count.

use crate::rules::entry::ResolvedRule;
use std::cmp::{Ordering, Reverse};

/// Apply the priority budget and return survivors in final emission order.
pub fn filter(mut candidates: Vec<ResolvedRule<'_>>) -> Vec<ResolvedRule<'_>> {
    candidates.sort_by(budget_order);

    let mut remaining = candidates.len() as u64;
    candidates.retain(|candidate| {
        if remaining > candidate.effective_priority() {
            remaining -= 1;
            false
        } else {
            true
        }
    });

    candidates.sort_by(emission_order);
    candidates
}

/// priority asc, order desc, depth asc, path asc
fn budget_order(a: &ResolvedRule<'_>, b: &ResolvedRule<'_>) -> Ordering {
    (
        a.effective_priority(),
        Reverse(a.effective_order()),
        a.agent_depth,
        a.path(),
    )
        .cmp(&(
            b.effective_priority(),
            Reverse(b.effective_order()),
            b.agent_depth,
            b.path(),
        ))
}

/// order asc, depth asc, path asc
fn emission_order(a: &ResolvedRule<'_>, b: &ResolvedRule<'_>) -> Ordering {
    (a.effective_order(), a.agent_depth, a.path()).cmp(&(
        b.effective_order(),
        b.agent_depth,
        b.path(),
    ))
}
