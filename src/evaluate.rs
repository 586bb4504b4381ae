use std::time::Instant;

use crate::types::{
    Mismatch, NodeCollection, Operand, Operator, RuleEntry, RuleOutcome, Sentence,
};
use crate::{CompileError, EvaluationReport, Rule, Verdict};

/// Location of the first failing condition inside a node collection.
///
/// Kept as plain indices so results can be cached per node; turned into a
/// [`Mismatch`] only when an explanation is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Miss {
    Term { node: usize, term: usize },
    Run { node: usize, start: usize, end: usize },
}

impl Miss {
    pub(crate) fn describe(self, nodes: &NodeCollection) -> Mismatch {
        match self {
            Miss::Term { node, term } => {
                let term = &nodes[node].terms[term];
                match (&term.operand, term.negated) {
                    (Operand::Word(word), false) => Mismatch::WordAbsent { word: word.clone() },
                    (Operand::Word(word), true) => Mismatch::WordPresent { word: word.clone() },
                    (Operand::Node(child), _) => Mismatch::GroupMatched { node: *child },
                }
            }
            Miss::Run { node, start, end } => Mismatch::NoAlternative {
                terms: nodes[node].terms[start..end]
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            },
        }
    }
}

/// Evaluate node `index`, left to right.
///
/// A term with operator OR opens a maximal run of OR terms of which at least
/// one must hold; every other term must hold on its own. Each node is
/// evaluated at most once per call, however many `#k` terms reach it.
pub(crate) fn eval_node(
    nodes: &NodeCollection,
    index: usize,
    sentence: &Sentence,
) -> Result<(), Miss> {
    let mut memo = vec![None; nodes.len()];
    walk_node(nodes, index, sentence, &mut memo)
}

type Memo = Vec<Option<Result<(), Miss>>>;

fn walk_node(
    nodes: &NodeCollection,
    index: usize,
    sentence: &Sentence,
    memo: &mut Memo,
) -> Result<(), Miss> {
    if let Some(done) = memo[index] {
        return done;
    }
    let node = &nodes[index];
    let mut result = Ok(());
    let mut j = 0;
    while j < node.terms.len() {
        if node.terms[j].operator == Operator::Or {
            let end = node.or_run_end(j);
            if !(j..end).any(|t| walk_term(nodes, index, t, sentence, memo).is_ok()) {
                result = Err(Miss::Run {
                    node: index,
                    start: j,
                    end,
                });
                break;
            }
            j = end;
        } else if let Err(miss) = walk_term(nodes, index, j, sentence, memo) {
            result = Err(miss);
            break;
        } else {
            j += 1;
        }
    }
    memo[index] = Some(result);
    result
}

fn walk_term(
    nodes: &NodeCollection,
    node: usize,
    term: usize,
    sentence: &Sentence,
    memo: &mut Memo,
) -> Result<(), Miss> {
    let t = &nodes[node].terms[term];
    match &t.operand {
        Operand::Word(word) => {
            if sentence.contains(word) != t.negated {
                Ok(())
            } else {
                Err(Miss::Term { node, term })
            }
        }
        Operand::Node(child) => match (walk_node(nodes, *child, sentence, memo), t.negated) {
            (Ok(()), false) | (Err(_), true) => Ok(()),
            (Err(inner), false) => Err(inner),
            (Ok(()), true) => Err(Miss::Term { node, term }),
        },
    }
}

pub(crate) fn evaluate(rules: &[RuleEntry], sentence: &Sentence) -> Option<Verdict> {
    // Rules are pre-sorted by priority (ascending = checked first)
    for entry in rules {
        match eval_node(&entry.compiled.nodes, entry.compiled.root, sentence) {
            Ok(()) => {
                log::trace!("rule {} matched", entry.rule.id);
                return Some(Verdict::new(entry.rule.id, entry.rule.priority));
            }
            Err(miss) => {
                if log::log_enabled!(log::Level::Debug) {
                    log::debug!(
                        "sentence does not match rule {}: {}",
                        entry.rule.id,
                        miss.describe(&entry.compiled.nodes)
                    );
                }
            }
        }
    }
    None
}

pub(crate) fn evaluate_detailed(rules: &[RuleEntry], sentence: &Sentence) -> EvaluationReport {
    let start = Instant::now();
    let mut outcomes = Vec::new();
    let mut verdict = None;

    for entry in rules {
        let mismatch = entry.compiled.explain(sentence);
        let matched = mismatch.is_none();
        if let Some(reason) = &mismatch {
            log::debug!("sentence does not match rule {}: {reason}", entry.rule.id);
        }
        outcomes.push(RuleOutcome::new(
            entry.rule.id,
            entry.rule.priority,
            mismatch,
        ));
        if matched {
            verdict = Some(Verdict::new(entry.rule.id, entry.rule.priority));
            break;
        }
    }

    EvaluationReport::new(verdict, outcomes, start.elapsed())
}

/// First-match selection with per-call compilation.
pub(crate) fn select(rules: &[Rule], sentence: &Sentence) -> Result<Option<Verdict>, CompileError> {
    let mut ordered: Vec<&Rule> = rules.iter().collect();
    ordered.sort();

    for rule in ordered {
        let compiled = rule.compile().map_err(|source| {
            log::debug!("rejecting rule {}: {source}", rule.id);
            CompileError::InvalidRule {
                rule: rule.id,
                source,
            }
        })?;
        if compiled.evaluate(sentence) {
            return Ok(Some(Verdict::new(rule.id, rule.priority)));
        }
    }
    Ok(None)
}
