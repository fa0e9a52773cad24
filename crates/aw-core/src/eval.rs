use aw_lang::{CompiledCond, CompiledExpr, CondTest, FUZZY_MATCH_THRESHOLD, NumOp, SubstrMode};

use crate::listing::{FieldValue, Listing};

/// Evaluate a compiled expression against one listing.
///
/// Total and pure: absent fields make their condition false, operands were
/// lowercased and regexes compiled when the rule was built, so there is no
/// error path. `And`/`Or` short-circuit left to right.
pub fn evaluate(expr: &CompiledExpr, listing: &Listing) -> bool {
    match expr {
        CompiledExpr::Cond(cond) => eval_cond(cond, listing),
        CompiledExpr::Not(inner) => !evaluate(inner, listing),
        CompiledExpr::And(lhs, rhs) => evaluate(lhs, listing) && evaluate(rhs, listing),
        CompiledExpr::Or(lhs, rhs) => evaluate(lhs, listing) || evaluate(rhs, listing),
    }
}

fn eval_cond(cond: &CompiledCond, listing: &Listing) -> bool {
    // Absence never satisfies any operator, `!=` included.
    let Some(value) = listing.field_value(cond.field) else {
        return false;
    };
    match (&cond.test, value) {
        (CondTest::NumCmp { op, operand }, FieldValue::Number(n)) => num_cmp(*op, n, *operand),
        (CondTest::StrEq { operand, negate }, FieldValue::Text(s)) => {
            (s.to_lowercase() == *operand) != *negate
        }
        (CondTest::Substr { mode, operand }, FieldValue::Text(s)) => {
            substr(*mode, &s.to_lowercase(), operand)
        }
        (CondTest::Substr { mode, operand }, FieldValue::Set(items)) => items
            .iter()
            .any(|item| substr(*mode, &item.to_lowercase(), operand)),
        (CondTest::Regex { pattern }, FieldValue::Text(s)) => pattern.is_match(s),
        (CondTest::Regex { pattern }, FieldValue::Set(items)) => {
            items.iter().any(|item| pattern.is_match(item))
        }
        (CondTest::Fuzzy { operand }, FieldValue::Text(s)) => fuzzy(operand, &s.to_lowercase()),
        (CondTest::Fuzzy { operand }, FieldValue::Set(items)) => items
            .iter()
            .any(|item| fuzzy(operand, &item.to_lowercase())),
        (test, value) => {
            // Lowering pairs every test with a matching field kind; reaching
            // this arm is an engine defect, not a user error.
            tracing::error!(field = %cond.field, ?test, ?value, "test does not match field kind");
            false
        }
    }
}

fn num_cmp(op: NumOp, lhs: f64, rhs: f64) -> bool {
    match op {
        NumOp::Eq => lhs == rhs,
        NumOp::Ne => lhs != rhs,
        NumOp::Lt => lhs < rhs,
        NumOp::Gt => lhs > rhs,
        NumOp::Le => lhs <= rhs,
        NumOp::Ge => lhs >= rhs,
    }
}

fn substr(mode: SubstrMode, haystack: &str, needle: &str) -> bool {
    match mode {
        SubstrMode::Contains => haystack.contains(needle),
        SubstrMode::StartsWith => haystack.starts_with(needle),
        SubstrMode::EndsWith => haystack.ends_with(needle),
    }
}

fn fuzzy(operand: &str, value: &str) -> bool {
    strsim::normalized_levenshtein(value, operand) >= FUZZY_MATCH_THRESHOLD
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
