use std::collections::HashSet;

use crate::parse::token::{self, Token};
use crate::types::{Node, NodeCollection, Operator, RuleEntry, Term};
use crate::{CompileError, CompiledRule, ParseError, Rule, RuleSet};

/// Compile rule text into a node collection whose last node is the root.
///
/// Parenthesised groups are resolved innermost first: each group is compiled
/// into a node and spliced back into the text as `#k` until no `)` remains.
pub(crate) fn compile_text(text: &str) -> Result<CompiledRule, ParseError> {
    let mut nodes = NodeCollection::new();
    let mut rest = text.trim().to_owned();

    while let Some(close) = rest.find(')') {
        let Some(open) = rest[..close].rfind('(') else {
            return Err(ParseError::UnmatchedParen { fragment: rest });
        };
        let group = compile_group(&rest[open + 1..close], &nodes)?;
        let index = nodes.push(group);
        rest = format!("{}#{index}{}", &rest[..open], &rest[close + 1..])
            .trim()
            .to_owned();
    }

    if rest.contains('(') {
        return Err(ParseError::UnmatchedParen { fragment: rest });
    }

    let top = compile_group(&rest, &nodes)?;
    let root = nodes.push(top);
    Ok(CompiledRule::new(nodes, root))
}

/// Fold the tokens of a parenthesis-free group into a node.
///
/// `next` is the operator the next appended term receives; `|` sets it to OR
/// and relabels the previously appended term so the whole run is OR-joined.
fn compile_group(text: &str, nodes: &NodeCollection) -> Result<Node, ParseError> {
    let mut terms: Vec<Term> = Vec::new();
    let mut next = Operator::And;

    for raw in text.trim().split(' ') {
        match token::token(raw)? {
            Token::Or => {
                next = Operator::Or;
                if let Some(last) = terms.last_mut() {
                    last.operator = Operator::Or;
                }
            }
            Token::Node { index, negated } => {
                if index >= nodes.len() {
                    return Err(ParseError::InvalidNodeRef {
                        token: raw.to_owned(),
                    });
                }
                // `next` carries over: `(&a) | (&b) &c` is one run of three
                terms.push(Term::node(next, index, negated));
            }
            Token::Word { word, negated } => {
                terms.push(Term::word(next, word, negated));
                next = Operator::And;
            }
            Token::Expansion {
                base,
                suffixes,
                negated,
            } => {
                // word OR any variant; negated: NOT word AND NOT any variant
                let group = if negated { Operator::And } else { Operator::Or };
                terms.push(Term::word(group, base, negated));
                for suffix in suffixes {
                    terms.push(Term::word(group, &format!("{base}{suffix}"), negated));
                }
                next = Operator::And;
            }
        }
    }

    if terms.is_empty() {
        return Err(ParseError::EmptyExpression);
    }
    Ok(Node::new(terms))
}

/// Compile every rule and order them for first-match selection.
pub(crate) fn compile(rules: Vec<Rule>) -> Result<RuleSet, CompileError> {
    check_duplicates(&rules)?;

    let mut entries = rules
        .into_iter()
        .map(|rule| match compile_text(&rule.text) {
            Ok(compiled) => Ok(RuleEntry { rule, compiled }),
            Err(source) => {
                log::debug!("rejecting rule {}: {source}", rule.id);
                Err(CompileError::InvalidRule {
                    rule: rule.id,
                    source,
                })
            }
        })
        .collect::<Result<Vec<_>, CompileError>>()?;

    // Stable: equal priorities keep insertion order.
    entries.sort_by_key(|entry| entry.rule.priority);

    Ok(RuleSet::from_compiled(entries))
}

fn check_duplicates(rules: &[Rule]) -> Result<(), CompileError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.id) {
            return Err(CompileError::DuplicateRule { id: rule.id });
        }
    }
    Ok(())
}
