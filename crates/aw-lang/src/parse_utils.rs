use winnow::ascii::{Caseless, digit1, multispace0};
use winnow::combinator::{cut_err, not, opt, preceded, terminated};
use winnow::error::{ContextError, ErrMode, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{literal, one_of, take_while};

// ---------------------------------------------------------------------------
// Whitespace
// ---------------------------------------------------------------------------

pub fn ws_skip(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

// ---------------------------------------------------------------------------
// Identifiers and keywords
// ---------------------------------------------------------------------------

/// A letter or underscore followed by any run of word characters.
pub fn ident<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    (
        one_of(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '_'),
    )
        .take()
        .parse_next(input)
}

/// Keyword matcher. Case-insensitive, and refuses to match a mere prefix of
/// a longer identifier: `NOT` matches, `NOTable` backtracks.
pub fn kw<'a>(keyword: &'static str) -> impl Parser<&'a str, (), ErrMode<ContextError>> {
    terminated(
        literal(Caseless(keyword)).void(),
        not(one_of(|c: char| c.is_ascii_alphanumeric() || c == '_')),
    )
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

/// String literal in double or single quotes; the closer has to match the
/// opener. There are no escape sequences, so a value containing one quote
/// style is written with the other.
pub fn quoted_string(input: &mut &str) -> ModalResult<String> {
    let delim = one_of(['"', '\'']).parse_next(input)?;
    let content = take_while(0.., move |c: char| c != delim).parse_next(input)?;
    cut_err(delim)
        .context(StrContext::Expected(StrContextValue::Description(
            "closing quote",
        )))
        .void()
        .parse_next(input)?;
    Ok(content.to_string())
}

/// Number literal: optional minus, integer part, optional fraction. Once the
/// decimal point is seen the fraction digits are committed.
pub fn number_literal(input: &mut &str) -> ModalResult<f64> {
    let text = (
        opt('-'),
        digit1,
        opt(preceded(
            '.',
            cut_err(digit1).context(StrContext::Expected(StrContextValue::Description(
                "digits after decimal point",
            ))),
        )),
    )
        .take()
        .parse_next(input)?;
    text.parse()
        .map_err(|_| ErrMode::Cut(ContextError::new()))
}
