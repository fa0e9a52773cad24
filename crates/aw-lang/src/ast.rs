use std::fmt;

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// Condition operator as written in rule text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Contains,
    StartsWith,
    EndsWith,
    Matches,
    FuzzyContains,
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "!=",
            CmpOp::Lt => "<",
            CmpOp::Gt => ">",
            CmpOp::Le => "<=",
            CmpOp::Ge => ">=",
            CmpOp::Contains => "contains",
            CmpOp::StartsWith => "startswith",
            CmpOp::EndsWith => "endswith",
            CmpOp::Matches => "matches",
            CmpOp::FuzzyContains => "fuzzy_contains",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Syntax tree
// ---------------------------------------------------------------------------

/// Literal operand of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Str(String),
}

/// `<field> <op> <literal>` with the field still a raw token; resolution and
/// type checking happen during lowering.
#[derive(Debug, Clone, PartialEq)]
pub struct Cond {
    pub field: String,
    pub op: CmpOp,
    pub value: Literal,
}

/// Boolean expression over conditions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Cond(Cond),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
}
