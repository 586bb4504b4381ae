use wordrule::{compile, RuleSetBuilder, Sentence};

fn main() {
    // Define rules
    let ruleset = RuleSetBuilder::new()
        .rule(1, 0, "(&hello | &hi) !&bye")
        .rule(2, 1, "&bye | &goodbye")
        .compile()
        .expect("failed to compile ruleset");

    println!("{ruleset}");

    // Show how a single rule compiles into nodes
    let compiled = compile("(&hello | &hi) !&bye").expect("failed to compile rule");
    println!("{compiled}");

    for text in ["hi there", "goodbye then", "hello and bye", "nothing"] {
        match ruleset.evaluate_sentence(&Sentence::new(text)) {
            Some(verdict) => println!("{text:?}: {verdict}"),
            None => println!("{text:?}: no match"),
        }
    }
}
