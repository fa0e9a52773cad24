use regex::{Regex, RegexBuilder};

use crate::ast::{CmpOp, Cond, Expr, Literal};
use crate::error::CompileError;
use crate::fields::{Field, FieldKind};
use crate::parser;

/// Similarity ratio at or above which `fuzzy_contains` reports a match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

// ---------------------------------------------------------------------------
// Compiled form
// ---------------------------------------------------------------------------

/// A rule expression after parsing and type checking. Every condition has
/// been resolved to a concrete field and a pre-lowered test: string operands
/// are lowercased and regexes compiled exactly once, so evaluation never
/// allocates or fails.
#[derive(Debug, Clone)]
pub enum CompiledExpr {
    Cond(CompiledCond),
    Not(Box<CompiledExpr>),
    And(Box<CompiledExpr>, Box<CompiledExpr>),
    Or(Box<CompiledExpr>, Box<CompiledExpr>),
}

#[derive(Debug, Clone)]
pub struct CompiledCond {
    pub field: Field,
    pub test: CondTest,
}

#[derive(Debug, Clone)]
pub enum CondTest {
    /// Numeric comparison; only built for number fields.
    NumCmp { op: NumOp, operand: f64 },
    /// Full-string equality on the lowercased value.
    StrEq { operand: String, negate: bool },
    /// Substring, prefix, or suffix test on the lowercased value.
    Substr { mode: SubstrMode, operand: String },
    /// Unanchored regex search, compiled case-insensitively.
    Regex { pattern: Regex },
    /// Similarity test against [`FUZZY_MATCH_THRESHOLD`].
    Fuzzy { operand: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstrMode {
    Contains,
    StartsWith,
    EndsWith,
}

// ---------------------------------------------------------------------------
// Compilation
// ---------------------------------------------------------------------------

/// Parse and type-check one rule expression.
pub fn compile(text: &str) -> Result<CompiledExpr, CompileError> {
    let expr = parser::parse_text(text)?;
    lower(expr)
}

fn lower(expr: Expr) -> Result<CompiledExpr, CompileError> {
    Ok(match expr {
        Expr::Cond(cond) => CompiledExpr::Cond(lower_cond(cond)?),
        Expr::Not(inner) => CompiledExpr::Not(Box::new(lower(*inner)?)),
        Expr::And(lhs, rhs) => {
            CompiledExpr::And(Box::new(lower(*lhs)?), Box::new(lower(*rhs)?))
        }
        Expr::Or(lhs, rhs) => {
            CompiledExpr::Or(Box::new(lower(*lhs)?), Box::new(lower(*rhs)?))
        }
    })
}

fn lower_cond(cond: Cond) -> Result<CompiledCond, CompileError> {
    let field = Field::resolve(&cond.field).ok_or_else(|| CompileError::UnknownField {
        name: cond.field.clone(),
    })?;
    let kind = field.kind();

    let test = match cond.op {
        CmpOp::Eq => lower_equality(field, kind, &cond, false)?,
        CmpOp::Ne => lower_equality(field, kind, &cond, true)?,
        CmpOp::Lt => lower_ordering(field, kind, &cond, NumOp::Lt)?,
        CmpOp::Gt => lower_ordering(field, kind, &cond, NumOp::Gt)?,
        CmpOp::Le => lower_ordering(field, kind, &cond, NumOp::Le)?,
        CmpOp::Ge => lower_ordering(field, kind, &cond, NumOp::Ge)?,
        CmpOp::Contains => lower_substring(field, kind, &cond, SubstrMode::Contains)?,
        CmpOp::StartsWith => lower_substring(field, kind, &cond, SubstrMode::StartsWith)?,
        CmpOp::EndsWith => lower_substring(field, kind, &cond, SubstrMode::EndsWith)?,
        CmpOp::Matches => lower_regex(field, kind, &cond)?,
        CmpOp::FuzzyContains => lower_fuzzy(field, kind, &cond)?,
    };

    Ok(CompiledCond { field, test })
}

fn lower_equality(
    field: Field,
    kind: FieldKind,
    cond: &Cond,
    negate: bool,
) -> Result<CondTest, CompileError> {
    match kind {
        FieldKind::Number => {
            let operand = expect_number(field, cond)?;
            let op = if negate { NumOp::Ne } else { NumOp::Eq };
            Ok(CondTest::NumCmp { op, operand })
        }
        FieldKind::String | FieldKind::EnumString => {
            let operand = expect_string(field, cond)?.to_lowercase();
            Ok(CondTest::StrEq { operand, negate })
        }
        FieldKind::StringSet => Err(mismatch(
            field,
            cond.op,
            "not defined for string-set fields, use contains instead",
        )),
    }
}

fn lower_ordering(
    field: Field,
    kind: FieldKind,
    cond: &Cond,
    op: NumOp,
) -> Result<CondTest, CompileError> {
    if kind != FieldKind::Number {
        return Err(mismatch(
            field,
            cond.op,
            format!("requires a number field, got {kind}"),
        ));
    }
    let operand = expect_number(field, cond)?;
    Ok(CondTest::NumCmp { op, operand })
}

fn lower_substring(
    field: Field,
    kind: FieldKind,
    cond: &Cond,
    mode: SubstrMode,
) -> Result<CondTest, CompileError> {
    expect_text_kind(field, kind, cond)?;
    let operand = expect_string(field, cond)?.to_lowercase();
    Ok(CondTest::Substr { mode, operand })
}

fn lower_regex(field: Field, kind: FieldKind, cond: &Cond) -> Result<CondTest, CompileError> {
    expect_text_kind(field, kind, cond)?;
    let source = expect_string(field, cond)?;
    let pattern = RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|e| CompileError::InvalidPattern {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;
    Ok(CondTest::Regex { pattern })
}

fn lower_fuzzy(field: Field, kind: FieldKind, cond: &Cond) -> Result<CondTest, CompileError> {
    expect_text_kind(field, kind, cond)?;
    let operand = expect_string(field, cond)?.to_lowercase();
    Ok(CondTest::Fuzzy { operand })
}

// ---------------------------------------------------------------------------
// Operand checks
// ---------------------------------------------------------------------------

fn expect_text_kind(field: Field, kind: FieldKind, cond: &Cond) -> Result<(), CompileError> {
    if kind == FieldKind::Number {
        return Err(mismatch(
            field,
            cond.op,
            "requires a string or string-set field, got number",
        ));
    }
    Ok(())
}

fn expect_number(field: Field, cond: &Cond) -> Result<f64, CompileError> {
    match &cond.value {
        Literal::Number(n) => Ok(*n),
        Literal::Str(_) => Err(mismatch(field, cond.op, "literal must be a number")),
    }
}

fn expect_string<'a>(field: Field, cond: &'a Cond) -> Result<&'a str, CompileError> {
    match &cond.value {
        Literal::Str(s) => Ok(s),
        Literal::Number(_) => Err(mismatch(field, cond.op, "literal must be a quoted string")),
    }
}

fn mismatch(field: Field, op: CmpOp, reason: impl Into<String>) -> CompileError {
    CompileError::TypeMismatch {
        field: field.name(),
        op,
        reason: reason.into(),
    }
}
