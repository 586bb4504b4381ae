use std::sync::Arc;
use std::thread;

use wordrule::{RuleSetBuilder, Verdict};

#[test]
fn evaluate_across_threads() {
    let ruleset = Arc::new(
        RuleSetBuilder::new()
            .rule(1, 0, "&stop | &halt")
            .rule(2, 5, "(&go | &move) !&not")
            .rule(3, 10, "&wait[s/ing]")
            .compile()
            .unwrap(),
    );

    let sentences = [
        ("please stop now", Some(Verdict::new(1, 0))),
        ("go go go", Some(Verdict::new(2, 5))),
        ("do not move", None),
        ("keep waiting", Some(Verdict::new(3, 10))),
        ("halt and go", Some(Verdict::new(1, 0))),
    ];

    let handles: Vec<_> = sentences
        .iter()
        .map(|&(sentence, _)| {
            let rs = Arc::clone(&ruleset);
            thread::spawn(move || rs.evaluate(sentence))
        })
        .collect();

    let results: Vec<Option<Verdict>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    for ((sentence, expected), actual) in sentences.iter().zip(results) {
        assert_eq!(actual, *expected, "sentence: {sentence}");
    }
}

#[test]
fn concurrent_evaluation_is_consistent() {
    let ruleset = Arc::new(
        RuleSetBuilder::new()
            .rule(1, 0, "&a !&b")
            .rule(2, 1, "&a | &b")
            .compile()
            .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let rs = Arc::clone(&ruleset);
            thread::spawn(move || {
                (0..1000)
                    .map(|i| {
                        let sentence = if i % 2 == 0 { "a" } else { "a b" };
                        rs.evaluate(sentence).map(|v| v.rule())
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().unwrap();
        for (i, rule) in results.into_iter().enumerate() {
            let expected = if i % 2 == 0 { 1 } else { 2 };
            assert_eq!(rule, Some(expected));
        }
    }
}
