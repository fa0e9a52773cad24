use winnow::combinator::{alt, cut_err, opt};
use winnow::error::{StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::literal;

use crate::ast::{CmpOp, Cond, Expr, Literal};
use crate::error::CompileError;
use crate::parse_utils::{ident, kw, number_literal, quoted_string, ws_skip};

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// Parse a complete rule expression. The whole input must be consumed;
/// anything left over is reported as a parse error at its position.
pub(crate) fn parse_text(text: &str) -> Result<Expr, CompileError> {
    root.parse(text)
        .map_err(|e| CompileError::from_parse(&e, text))
}

fn root(input: &mut &str) -> ModalResult<Expr> {
    ws_skip.parse_next(input)?;
    let expr = or_expr.parse_next(input)?;
    ws_skip.parse_next(input)?;
    Ok(expr)
}

// ---------------------------------------------------------------------------
// Precedence levels (lowest to highest)
// ---------------------------------------------------------------------------

/// `or_expr = and_expr { OR and_expr }`
fn or_expr(input: &mut &str) -> ModalResult<Expr> {
    let mut left = and_expr.parse_next(input)?;
    loop {
        ws_skip.parse_next(input)?;
        if opt(kw("OR")).parse_next(input)?.is_some() {
            ws_skip.parse_next(input)?;
            let right = cut_err(and_expr).parse_next(input)?;
            left = Expr::Or(Box::new(left), Box::new(right));
        } else {
            break;
        }
    }
    Ok(left)
}

/// `and_expr = not_expr { AND not_expr }`
fn and_expr(input: &mut &str) -> ModalResult<Expr> {
    let mut left = not_expr.parse_next(input)?;
    loop {
        ws_skip.parse_next(input)?;
        if opt(kw("AND")).parse_next(input)?.is_some() {
            ws_skip.parse_next(input)?;
            let right = cut_err(not_expr).parse_next(input)?;
            left = Expr::And(Box::new(left), Box::new(right));
        } else {
            break;
        }
    }
    Ok(left)
}

/// `not_expr = NOT not_expr | atom`
fn not_expr(input: &mut &str) -> ModalResult<Expr> {
    if opt(kw("NOT")).parse_next(input)?.is_some() {
        ws_skip.parse_next(input)?;
        let inner = cut_err(not_expr).parse_next(input)?;
        return Ok(Expr::Not(Box::new(inner)));
    }
    atom.parse_next(input)
}

// ---------------------------------------------------------------------------
// Atoms
// ---------------------------------------------------------------------------

fn atom(input: &mut &str) -> ModalResult<Expr> {
    alt((paren_expr, condition))
        .context(StrContext::Expected(StrContextValue::Description(
            "condition or parenthesized expression",
        )))
        .parse_next(input)
}

fn paren_expr(input: &mut &str) -> ModalResult<Expr> {
    literal("(").parse_next(input)?;
    ws_skip.parse_next(input)?;
    let inner = cut_err(or_expr).parse_next(input)?;
    ws_skip.parse_next(input)?;
    cut_err(literal(")"))
        .context(StrContext::Expected(StrContextValue::Description(
            "closing parenthesis",
        )))
        .parse_next(input)?;
    Ok(inner)
}

/// `condition = field operator literal`
fn condition(input: &mut &str) -> ModalResult<Expr> {
    let field = ident.parse_next(input)?;
    ws_skip.parse_next(input)?;
    let op = cut_err(cmp_op).parse_next(input)?;
    ws_skip.parse_next(input)?;
    let value = cut_err(literal_value).parse_next(input)?;
    Ok(Expr::Cond(Cond {
        field: field.to_string(),
        op,
        value,
    }))
}

fn cmp_op(input: &mut &str) -> ModalResult<CmpOp> {
    alt((
        literal("!=").value(CmpOp::Ne),
        literal("<=").value(CmpOp::Le),
        literal(">=").value(CmpOp::Ge),
        literal("=").value(CmpOp::Eq),
        literal("<").value(CmpOp::Lt),
        literal(">").value(CmpOp::Gt),
        kw("contains").value(CmpOp::Contains),
        kw("startswith").value(CmpOp::StartsWith),
        kw("endswith").value(CmpOp::EndsWith),
        kw("matches").value(CmpOp::Matches),
        kw("fuzzy_contains").value(CmpOp::FuzzyContains),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "comparison operator",
    )))
    .parse_next(input)
}

fn literal_value(input: &mut &str) -> ModalResult<Literal> {
    alt((
        number_literal.map(Literal::Number),
        quoted_string.map(Literal::Str),
    ))
    .context(StrContext::Expected(StrContextValue::Description(
        "literal value",
    )))
    .parse_next(input)
}

#[cfg(test)]
mod tests;
