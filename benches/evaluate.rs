use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wordrule::{compile_and_validate, select, Rule, RuleSetBuilder, Sentence};

/// `n` rules, each requiring one group of two alternatives and forbidding a
/// third word. Only the last rule matches `sentence(n)`.
fn build_rules(n: usize) -> Vec<Rule> {
    (0..n)
        .map(|i| {
            Rule::new(
                i as i32,
                i as i32,
                format!("(&w{i} | &v{i}[s/ed]) !&x{i} &common"),
            )
        })
        .collect()
}

fn sentence(n: usize) -> String {
    format!("the common v{}ed word", n - 1)
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_eval");

    for &n in &[5, 20, 50] {
        let ruleset = build_rules(n)
            .into_iter()
            .fold(RuleSetBuilder::new(), RuleSetBuilder::add)
            .compile()
            .unwrap();
        let text = sentence(n);
        let tokens = Sentence::new(&text);

        group.bench_function(&format!("{n}_rules_text"), |b| {
            b.iter(|| ruleset.evaluate(black_box(&text)));
        });

        group.bench_function(&format!("{n}_rules_sentence"), |b| {
            b.iter(|| ruleset.evaluate_sentence(black_box(&tokens)));
        });

        // compiles every rule on every call
        let rules = build_rules(n);
        group.bench_function(&format!("{n}_rules_select"), |b| {
            b.iter(|| select(black_box(&rules), black_box(&text)).unwrap());
        });
    }

    group.finish();
}

fn bench_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    for depth in [1, 8, 32] {
        let mut rule = "&a | &b".to_owned();
        for _ in 0..depth {
            rule = format!("!({rule}) &c");
        }
        group.bench_function(&format!("depth_{depth}"), |b| {
            b.iter(|| compile_and_validate(black_box(&rule), black_box("a c")).unwrap());
        });
    }

    for &n in &[5, 20, 50] {
        group.bench_function(&format!("{n}_rules"), |b| {
            b.iter(|| {
                let builder = build_rules(n)
                    .into_iter()
                    .fold(RuleSetBuilder::new(), RuleSetBuilder::add);
                black_box(builder.compile().unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_compilation);
criterion_main!(benches);
