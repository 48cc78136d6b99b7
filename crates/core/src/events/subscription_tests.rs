// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    exact = { "stage:finished", "stage:finished", true },
    wrong_action = { "stage:finished", "stage:submitted", false },
    single_wildcard = { "stage:*", "stage:finished", true },
    wildcard_wrong_category = { "stage:*", "signal:completed", false },
    category_rest = { "signal:**", "signal:completed", true },
    match_all = { "**", "run:started", true },
    star_matches_all = { "*", "run:started", true },
    empty = { "", "run:started", false },
    too_short = { "stage", "stage:finished", false },
)]
fn pattern_matching(pattern: &str, event_name: &str, expected: bool) {
    assert_eq!(EventPattern::new(pattern).matches(event_name), expected);
}

#[test]
fn subscription_matches_any_of_its_patterns() {
    let sub = Subscription::new(
        "watcher",
        vec![
            EventPattern::new("stage:finished"),
            EventPattern::new("signal:*"),
        ],
    );
    assert!(sub.matches("stage:finished"));
    assert!(sub.matches("signal:completed"));
    assert!(!sub.matches("run:started"));
}
