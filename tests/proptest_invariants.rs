
use proptest::prelude::*;
use strategies::{arb_ruleset, arb_sentence};
use wordrule::{select, Sentence};

// ---------------------------------------------------------------------------
// Invariant 1: Determinism
//
// The same ruleset + sentence must always produce the same verdict.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn determinism_repeated(rules in arb_ruleset(), sentence in arb_sentence()) {
        let ruleset = rules.compile();
        let first = ruleset.evaluate(&sentence.text);
        for _ in 0..5 {
            prop_assert_eq!(first, ruleset.evaluate(&sentence.text));
        }
    }

    #[test]
    fn determinism_recompile(rules in arb_ruleset(), sentence in arb_sentence()) {
        prop_assert_eq!(
            rules.compile().evaluate(&sentence.text),
            rules.compile().evaluate(&sentence.text),
        );
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: First match by priority
//
// The verdict is the lowest-priority rule that holds; among equal priorities
// the one added first wins.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn verdict_is_first_match(rules in arb_ruleset(), sentence in arb_sentence()) {
        let ruleset = rules.compile();
        let verdict = ruleset.evaluate(&sentence.text).map(|v| (v.rule(), v.priority()));
        prop_assert_eq!(verdict, rules.expected(&sentence.words));
    }

    #[test]
    fn rule_order_is_sorted(rules in arb_ruleset()) {
        let order = rules.compile().rule_order();
        prop_assert_eq!(order.len(), rules.rules.len());
        for pair in order.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].1);
            if pair[0].1 == pair[1].1 {
                // ids are insertion positions
                prop_assert!(pair[0].0 < pair[1].0);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Evaluation paths agree
//
// Plain, detailed and per-call selection return the same verdict.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn detailed_agrees_with_plain(rules in arb_ruleset(), sentence in arb_sentence()) {
        let ruleset = rules.compile();
        let report = ruleset.evaluate_detailed(&sentence.text);
        prop_assert_eq!(report.verdict().copied(), ruleset.evaluate(&sentence.text));

        // Every outcome before the last is a rejection.
        let outcomes = report.outcomes();
        if let Some((last, earlier)) = outcomes.split_last() {
            prop_assert!(earlier.iter().all(|o| !o.matched()));
            prop_assert_eq!(last.matched(), report.verdict().is_some());
        }
    }

    #[test]
    fn select_agrees_with_ruleset(rules in arb_ruleset(), sentence in arb_sentence()) {
        let ruleset = rules.compile();
        let selected = select(&rules.to_rules(), &sentence.text).unwrap();
        prop_assert_eq!(selected, ruleset.evaluate(&sentence.text));
    }

    #[test]
    fn sentence_and_text_paths_agree(rules in arb_ruleset(), sentence in arb_sentence()) {
        let ruleset = rules.compile();
        prop_assert_eq!(
            ruleset.evaluate_sentence(&Sentence::new(&sentence.text)),
            ruleset.evaluate(&sentence.text),
        );
    }
}
