use winnow::ascii::{dec_int, space0, space1, till_line_ending};
use winnow::combinator::{alt, cut_err, delimited, opt, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::take_while;

use crate::Rule;

use super::parser::ParsedRuleFile;

// -- Whitespace & comments --------------------------------------------------

// Comments only occur between rules: a `#` inside rule text is a node reference.
fn ws(input: &mut &str) -> ModalResult<()> {
    let _: () = repeat(
        0..,
        alt((
            take_while(1.., |c: char| c.is_ascii_whitespace()).void(),
            ('#', till_line_ending).void(),
        )),
    )
    .parse_next(input)?;
    Ok(())
}

// -- Rule definitions -------------------------------------------------------

fn priority_annotation(input: &mut &str) -> ModalResult<i32> {
    delimited(
        (space0, '(', space0, "priority", space1),
        cut_err(dec_int::<_, i32, _>),
        (space0, cut_err(')')),
    )
    .parse_next(input)
}

fn rule_text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    till_line_ending
        .verify(|s: &str| !s.trim().is_empty())
        .map(str::trim)
        .parse_next(input)
}

fn rule_def(input: &mut &str) -> ModalResult<Rule> {
    ws.parse_next(input)?;
    "rule".parse_next(input)?;
    space1.parse_next(input)?;

    let id = cut_err(dec_int::<_, i32, _>)
        .context(StrContext::Expected(StrContextValue::Description(
            "rule id",
        )))
        .parse_next(input)?;

    let priority = opt(priority_annotation).parse_next(input)?;

    space0.parse_next(input)?;
    cut_err(':').parse_next(input)?;

    let text = cut_err(rule_text)
        .context(StrContext::Expected(StrContextValue::Description(
            "rule text",
        )))
        .parse_next(input)?;

    Ok(Rule::new(id, priority.unwrap_or(0), text))
}

// -- Top-level parser -------------------------------------------------------

pub fn parse_rule_file(input: &mut &str) -> ModalResult<ParsedRuleFile> {
    let rules: Vec<Rule> = repeat(0.., rule_def).parse_next(input)?;
    ws.parse_next(input)?;
    Ok(ParsedRuleFile { rules })
}
