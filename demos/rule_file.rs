use wordrule::RuleSet;

fn main() {
    let ruleset = RuleSet::from_file("demos/greetings.rules").expect("failed to load rules");

    println!("{ruleset}");

    for text in ["hi there", "hello you", "good morning", "bye now"] {
        match ruleset.evaluate(text) {
            Some(verdict) => println!("{text:?}: {verdict}"),
            None => println!("{text:?}: no match"),
        }
    }
}
