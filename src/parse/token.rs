//! Grammar for a single space-delimited token of rule text.

use winnow::ascii::digit1;
use winnow::combinator::{delimited, opt, preceded, separated};
use winnow::error::ModalResult;
use winnow::prelude::*;
use winnow::token::take_while;

use crate::ParseError;

/// A classified rule-text token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// `|`: the next term joins an OR-run with the previous one.
    Or,
    /// `#k` / `!#k`: reference to compiled node `k`.
    Node { index: usize, negated: bool },
    /// `&word` / `!&word`.
    Word { word: &'a str, negated: bool },
    /// `&base[s1/s2]` / `!&base[s1/s2]`.
    Expansion {
        base: &'a str,
        suffixes: Vec<&'a str>,
        negated: bool,
    },
}

fn node_index(input: &mut &str) -> ModalResult<usize> {
    preceded('#', digit1.try_map(|digits: &str| digits.parse::<usize>())).parse_next(input)
}

fn base_word<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c != '[' && c != ']').parse_next(input)
}

fn suffix<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| !matches!(c, '[' | ']' | '/')).parse_next(input)
}

fn suffix_list<'i>(input: &mut &'i str) -> ModalResult<Vec<&'i str>> {
    delimited('[', separated(1.., suffix, '/'), ']').parse_next(input)
}

fn word_body<'i>(input: &mut &'i str) -> ModalResult<(&'i str, Option<Vec<&'i str>>)> {
    (base_word, opt(suffix_list)).parse_next(input)
}

/// Classify one token. `raw` must not contain spaces.
pub(crate) fn token(raw: &str) -> Result<Token<'_>, ParseError> {
    let (negated, body) = match raw.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };

    match body.chars().next() {
        Some('#') => node_index
            .parse(body)
            .map(|index| Token::Node { index, negated })
            .map_err(|_| ParseError::InvalidNodeRef {
                token: raw.to_owned(),
            }),
        Some('|') if !negated => Ok(Token::Or),
        Some('&') if body.len() > 1 => match word_body.parse(&body[1..]) {
            Ok((word, None)) => Ok(Token::Word { word, negated }),
            Ok((base, Some(suffixes))) => Ok(Token::Expansion {
                base,
                suffixes,
                negated,
            }),
            Err(_) => Err(ParseError::MalformedBracket {
                token: raw.to_owned(),
            }),
        },
        _ => Err(ParseError::UnexpectedToken {
            token: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_word() {
        assert_eq!(
            token("&cat").unwrap(),
            Token::Word {
                word: "cat",
                negated: false
            }
        );
    }

    #[test]
    fn negated_word() {
        assert_eq!(
            token("!&cat").unwrap(),
            Token::Word {
                word: "cat",
                negated: true
            }
        );
    }

    #[test]
    fn bar_with_trailing_text_is_or() {
        assert_eq!(token("|").unwrap(), Token::Or);
        assert_eq!(token("||").unwrap(), Token::Or);
    }

    #[test]
    fn negated_bar_is_rejected() {
        assert!(matches!(
            token("!|"),
            Err(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn node_reference() {
        assert_eq!(
            token("!#12").unwrap(),
            Token::Node {
                index: 12,
                negated: true
            }
        );
    }

    #[test]
    fn node_reference_requires_digits() {
        for raw in ["#", "#x", "#1x", "#-1"] {
            assert!(
                matches!(token(raw), Err(ParseError::InvalidNodeRef { .. })),
                "failed for {raw}"
            );
        }
    }

    #[test]
    fn bracket_expansion() {
        assert_eq!(
            token("&walk[s/ed/ing]").unwrap(),
            Token::Expansion {
                base: "walk",
                suffixes: vec!["s", "ed", "ing"],
                negated: false
            }
        );
    }

    #[test]
    fn malformed_brackets() {
        for raw in ["&cat[s", "&cat]", "&cat[]", "&cat[s]x", "&[s]", "&cat[s//es]", "&a[b[c]]"] {
            assert!(
                matches!(token(raw), Err(ParseError::MalformedBracket { .. })),
                "failed for {raw}"
            );
        }
    }

    #[test]
    fn unknown_sigils() {
        for raw in ["~b", "cat", "", "&", "!", "!!&a"] {
            assert!(
                matches!(token(raw), Err(ParseError::UnexpectedToken { .. })),
                "failed for {raw:?}"
            );
        }
    }
}
