use std::sync::Arc;
use std::thread;

use wordrule::RuleSetBuilder;

fn main() {
    let ruleset = Arc::new(
        RuleSetBuilder::new()
            .rule(1, 0, "&stop | &halt")
            .rule(2, 1, "(&go | &move) !&not")
            .compile()
            .expect("failed to compile ruleset"),
    );

    let sentences = ["stop here", "go now", "do not move", "wait"];

    let handles: Vec<_> = sentences
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let rs = Arc::clone(&ruleset);
            thread::spawn(move || {
                let result = rs.evaluate(text);
                println!("Thread {i}: {text:?} -> {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
