use super::parse_text;
use crate::ast::{CmpOp, Cond, Expr, Literal};
use crate::error::CompileError;

fn parse(text: &str) -> Expr {
    parse_text(text).expect("expression should parse")
}

fn parse_err(text: &str) -> (usize, String, String) {
    match parse_text(text).expect_err("expression should be rejected") {
        CompileError::Parse {
            position,
            expected,
            found,
        } => (position, expected, found),
        other => panic!("expected parse error, got {other:?}"),
    }
}

fn cond(field: &str, op: CmpOp, value: Literal) -> Expr {
    Expr::Cond(Cond {
        field: field.to_string(),
        op,
        value,
    })
}

// -- 1. conditions and literals ---------------------------------------------

#[test]
fn single_condition() {
    assert_eq!(
        parse("price < 1000"),
        cond("price", CmpOp::Lt, Literal::Number(1000.0))
    );
}

#[test]
fn symbolic_operators() {
    assert_eq!(
        parse("price != 42"),
        cond("price", CmpOp::Ne, Literal::Number(42.0))
    );
    assert_eq!(
        parse("price <= 999.99"),
        cond("price", CmpOp::Le, Literal::Number(999.99))
    );
    assert_eq!(
        parse("price >= -12.5"),
        cond("price", CmpOp::Ge, Literal::Number(-12.5))
    );
    assert_eq!(
        parse("price = 0.25"),
        cond("price", CmpOp::Eq, Literal::Number(0.25))
    );
}

#[test]
fn word_operators() {
    assert_eq!(
        parse("title contains \"HD800\""),
        cond("title", CmpOp::Contains, Literal::Str("HD800".to_string()))
    );
    assert_eq!(
        parse("title startswith \"Sony\""),
        cond("title", CmpOp::StartsWith, Literal::Str("Sony".to_string()))
    );
    assert_eq!(
        parse("title endswith \"mint\""),
        cond("title", CmpOp::EndsWith, Literal::Str("mint".to_string()))
    );
    assert_eq!(
        parse("title matches \"64\\s*audio\""),
        cond(
            "title",
            CmpOp::Matches,
            Literal::Str("64\\s*audio".to_string())
        )
    );
    assert_eq!(
        parse("title fuzzy_contains \"monarch\""),
        cond(
            "title",
            CmpOp::FuzzyContains,
            Literal::Str("monarch".to_string())
        )
    );
}

#[test]
fn word_operators_are_case_insensitive() {
    assert_eq!(
        parse("title CONTAINS \"x\""),
        cond("title", CmpOp::Contains, Literal::Str("x".to_string()))
    );
    assert_eq!(
        parse("title Matches \"x\""),
        cond("title", CmpOp::Matches, Literal::Str("x".to_string()))
    );
}

#[test]
fn both_quote_styles_are_accepted() {
    assert_eq!(
        parse("seller = 'audio_fan'"),
        parse("seller = \"audio_fan\"")
    );
}

#[test]
fn double_quoted_string_may_contain_single_quotes() {
    assert_eq!(
        parse("title contains \"driver's\""),
        cond(
            "title",
            CmpOp::Contains,
            Literal::Str("driver's".to_string())
        )
    );
}

#[test]
fn whitespace_is_flexible() {
    let expected = cond("price", CmpOp::Lt, Literal::Number(1000.0));
    assert_eq!(parse("price<1000"), expected);
    assert_eq!(parse("  price  <  1000  "), expected);
}

// -- 2. precedence and associativity ------------------------------------------

#[test]
fn and_binds_tighter_than_or() {
    let a = cond("title", CmpOp::Contains, Literal::Str("a".to_string()));
    let b = cond("price", CmpOp::Lt, Literal::Number(1.0));
    let c = cond("currency", CmpOp::Eq, Literal::Str("usd".to_string()));

    assert_eq!(
        parse("title contains \"a\" AND price < 1 OR currency = \"usd\""),
        Expr::Or(
            Box::new(Expr::And(Box::new(a.clone()), Box::new(b.clone()))),
            Box::new(c.clone())
        )
    );
    assert_eq!(
        parse("title contains \"a\" OR price < 1 AND currency = \"usd\""),
        Expr::Or(Box::new(a), Box::new(Expr::And(Box::new(b), Box::new(c))))
    );
}

#[test]
fn binary_operators_are_left_associative() {
    let a = cond("price", CmpOp::Gt, Literal::Number(1.0));
    let b = cond("price", CmpOp::Gt, Literal::Number(2.0));
    let c = cond("price", CmpOp::Gt, Literal::Number(3.0));

    assert_eq!(
        parse("price > 1 AND price > 2 AND price > 3"),
        Expr::And(
            Box::new(Expr::And(Box::new(a), Box::new(b))),
            Box::new(c)
        )
    );
}

#[test]
fn not_binds_tighter_than_and() {
    let a = cond("condition", CmpOp::Eq, Literal::Str("parts".to_string()));
    let b = cond("price", CmpOp::Lt, Literal::Number(50.0));

    assert_eq!(
        parse("NOT condition = \"parts\" AND price < 50"),
        Expr::And(Box::new(Expr::Not(Box::new(a))), Box::new(b))
    );
}

#[test]
fn parentheses_override_precedence() {
    let a = cond("title", CmpOp::Contains, Literal::Str("x".to_string()));
    let b = cond("price", CmpOp::Lt, Literal::Number(5.0));
    let c = cond("price", CmpOp::Gt, Literal::Number(10.0));

    assert_eq!(
        parse("title contains \"x\" AND (price < 5 OR price > 10)"),
        Expr::And(
            Box::new(a),
            Box::new(Expr::Or(Box::new(b), Box::new(c)))
        )
    );
}

#[test]
fn double_negation_parses() {
    let inner = cond("price", CmpOp::Lt, Literal::Number(1000.0));
    assert_eq!(
        parse("NOT NOT price < 1000"),
        Expr::Not(Box::new(Expr::Not(Box::new(inner))))
    );
}

#[test]
fn keywords_are_case_insensitive() {
    assert_eq!(
        parse("price > 1 and price < 2 or not price = 3"),
        parse("price > 1 AND price < 2 OR NOT price = 3")
    );
}

#[test]
fn keyword_prefix_of_identifier_is_not_a_keyword() {
    // `notable` must parse as a field token, not as `NOT able`.
    assert_eq!(
        parse("notable = \"x\""),
        cond("notable", CmpOp::Eq, Literal::Str("x".to_string()))
    );
}

// -- 3. parse errors ----------------------------------------------------------

#[test]
fn stray_operator_char_is_reported_at_its_position() {
    let (position, expected, found) = parse_err("price <<< 1000");
    assert_eq!(position, 7);
    assert_eq!(expected, "literal value");
    assert_eq!(found, "<<");
}

#[test]
fn missing_operator() {
    let (position, expected, found) = parse_err("price 1000");
    assert_eq!(position, 6);
    assert_eq!(expected, "comparison operator");
    assert_eq!(found, "1000");
}

#[test]
fn missing_literal() {
    let (position, expected, found) = parse_err("price <");
    assert_eq!(position, 7);
    assert_eq!(expected, "literal value");
    assert_eq!(found, "end of input");
}

#[test]
fn unterminated_string() {
    let text = "title = \"unterminated";
    let (position, expected, found) = parse_err(text);
    assert_eq!(position, text.len());
    assert_eq!(expected, "closing quote");
    assert_eq!(found, "end of input");
}

#[test]
fn unclosed_parenthesis() {
    let text = "(price < 1000";
    let (position, expected, found) = parse_err(text);
    assert_eq!(position, text.len());
    assert_eq!(expected, "closing parenthesis");
    assert_eq!(found, "end of input");
}

#[test]
fn trailing_input_is_rejected() {
    let (position, expected, found) = parse_err("price < 1000 extra");
    assert_eq!(position, 13);
    assert_eq!(expected, "end of input");
    assert_eq!(found, "extra");
}

#[test]
fn empty_input_is_rejected() {
    let (position, expected, found) = parse_err("");
    assert_eq!(position, 0);
    assert_eq!(expected, "condition or parenthesized expression");
    assert_eq!(found, "end of input");

    let (position, ..) = parse_err("   ");
    assert_eq!(position, 3);
}

#[test]
fn dangling_not_is_rejected() {
    let (position, expected, found) = parse_err("NOT");
    assert_eq!(position, 3);
    assert_eq!(expected, "condition or parenthesized expression");
    assert_eq!(found, "end of input");
}

#[test]
fn truncated_decimal_is_rejected() {
    let text = "price < 10.";
    let (position, expected, _) = parse_err(text);
    assert_eq!(position, text.len());
    assert_eq!(expected, "digits after decimal point");
}
