use wordrule::{select, Rule, RuleSetBuilder};

fn main() {
    // Specific-before-general pattern using priorities.
    // Lower priority numbers are evaluated first.
    let ruleset = RuleSetBuilder::new()
        .rule(100, 10, "&open") // general: any mention of opening
        .rule(200, 0, "&open &door !&not") // specific: checked first
        .rule(300, 5, "!&open &door[s]")
        .compile()
        .expect("failed to compile ruleset");

    println!("Evaluation order: {:?}", ruleset.rule_order());

    for text in ["open the door", "do not open the door", "open a window", "two doors"] {
        match ruleset.evaluate(text) {
            Some(verdict) => println!("{text:?}: {verdict}"),
            None => println!("{text:?}: no match"),
        }
    }

    // The same selection without a precompiled set: every call recompiles.
    let rules = vec![Rule::new(1, 2, "&open"), Rule::new(2, 1, "&open &door")];
    match select(&rules, "open door") {
        Ok(Some(verdict)) => println!("select: {verdict}"),
        Ok(None) => println!("select: no match"),
        Err(e) => eprintln!("select: {e}"),
    }
}
