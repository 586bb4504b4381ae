use wordrule::RuleSetBuilder;

fn main() {
    // RUST_LOG=debug shows each rejected rule as it is evaluated
    env_logger::init();

    let ruleset = RuleSetBuilder::new()
        .rule(1, 0, "&please &give[s] !&not")
        .rule(2, 1, "(&thank | &thanks) !(&no &thanks)")
        .rule(3, 2, "&help | &assist")
        .compile()
        .expect("failed to compile ruleset");

    let report = ruleset.evaluate_detailed("please do not give me that");

    println!("{report}");
    println!();
    for outcome in report.outcomes() {
        match outcome.mismatch() {
            Some(reason) => println!("rule {} rejected: {reason}", outcome.rule()),
            None => println!("rule {} matched", outcome.rule()),
        }
    }
    println!("Duration: {:?}", report.duration());

    if let Some(compiled) = ruleset.compiled(2) {
        println!();
        println!("rule 2 compiles to:\n{compiled}");
    }
}
