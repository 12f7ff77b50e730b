use code_editor_agent::rules::{budget, resolve, ResolvedRule, RuleCache, RuleEntry};
use proptest::prelude::*;
use std::collections::HashSet;

const TAGS: [&str; 3] = ["alpha", "beta", "gamma"];

fn entry_strategy() -> impl Strategy<Value = (Option<u64>, Option<u64>, bool, Vec<usize>, Vec<usize>)> {
    (
        prop::option::of(0u64..6),
        prop::option::of(0u64..4),
        any::<bool>(),
        prop::collection::vec(0usize..3, 0..3),
        prop::collection::vec(0usize..3, 0..3),
    )
}

/// Entries whose tags and always-references are drawn from a small label set,
/// so reference cycles are common.
fn build_cache(specs: &[(Option<u64>, Option<u64>, bool, Vec<usize>, Vec<usize>)]) -> RuleCache {
    let entries = specs
        .iter()
        .enumerate()
        .map(|(i, (priority, order, top, tags, refs))| {
            let pattern = if *top { "src/**" } else { "docs/**" };
            let mut entry = RuleEntry::new(format!("r{:02}.md", i), vec![pattern.to_string()]);
            entry.priority = *priority;
            entry.order = *order;
            entry.tags = tags.iter().map(|t| TAGS[*t].to_string()).collect();
            entry.references_always = refs.iter().map(|t| TAGS[*t].to_string()).collect();
            entry
        })
        .collect();
    let mut cache = RuleCache::new();
    cache.insert("main", entries);
    cache
}

/// Paths and depths emitted for `src/lib.rs`, in final order.
fn emitted(specs: &[(Option<u64>, Option<u64>, bool, Vec<usize>, Vec<usize>)]) -> Vec<(String, usize)> {
    let cache = build_cache(specs);
    let resolution = resolve(&cache, "main", &[], "src/lib.rs").unwrap();
    budget::filter(resolution.rules)
        .iter()
        .map(|rule| (rule.path().to_string(), rule.agent_depth))
        .collect()
}

fn emission_key(rule: &ResolvedRule<'_>) -> (u64, usize, String) {
    (rule.effective_order(), rule.agent_depth, rule.path().to_string())
}

proptest! {
    #[test]
    fn resolution_terminates_without_duplicates(specs in prop::collection::vec(entry_strategy(), 0..12)) {
        let cache = build_cache(&specs);
        let resolution = resolve(&cache, "main", &[], "src/lib.rs").unwrap();
        let keys: HashSet<_> = resolution.rules.iter().map(|r| r.key()).collect();
        prop_assert_eq!(keys.len(), resolution.rules.len());

        let top = specs.iter().filter(|s| s.2).count();
        prop_assert!(resolution.rules.len() >= top);
        prop_assert!(resolution.rules.len() <= specs.len());
    }

    #[test]
    fn rules_without_priority_are_never_dropped(specs in prop::collection::vec(entry_strategy(), 0..12)) {
        let cache = build_cache(&specs);
        let resolution = resolve(&cache, "main", &[], "src/lib.rs").unwrap();
        let unbudgeted: HashSet<&str> = resolution
            .rules
            .iter()
            .filter(|r| r.entry.priority.is_none())
            .map(|r| r.path())
            .collect();

        let kept = budget::filter(resolution.rules);
        let kept_paths: HashSet<&str> = kept.iter().map(|r| r.path()).collect();
        prop_assert!(unbudgeted.is_subset(&kept_paths));
    }

    #[test]
    fn budget_output_is_in_emission_order(specs in prop::collection::vec(entry_strategy(), 0..12)) {
        let cache = build_cache(&specs);
        let resolution = resolve(&cache, "main", &[], "src/lib.rs").unwrap();
        let before = resolution.rules.len();
        let kept = budget::filter(resolution.rules);
        prop_assert!(kept.len() <= before);

        let keys: Vec<_> = kept.iter().map(emission_key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn emission_order_ignores_priority_when_nothing_is_dropped(
        specs in prop::collection::vec(entry_strategy(), 0..12),
        priorities in prop::collection::vec(prop::option::of(12u64..1000), 12),
    ) {
        // With at most 12 candidates, a priority of 12 or more is never capped.
        let unbudgeted: Vec<_> = specs
            .iter()
            .cloned()
            .map(|mut spec| {
                spec.0 = None;
                spec
            })
            .collect();
        let reprioritized: Vec<_> = specs
            .iter()
            .cloned()
            .zip(priorities)
            .map(|(mut spec, priority)| {
                spec.0 = priority;
                spec
            })
            .collect();

        let baseline = emitted(&unbudgeted);
        let reordered = emitted(&reprioritized);
        prop_assert_eq!(baseline, reordered);
    }
}
