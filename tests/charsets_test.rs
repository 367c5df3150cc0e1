// charsets_test.rs - Character sets, ranges and alternation fusion.

use expressive::prelude::*;

fn render(expr: Expression) -> String {
    expr.to_regex_string().unwrap()
}

// === Sets ===

#[test]
fn any_of_chars() {
    let expr = Expression::new().any_of_chars("aeiou.-").unwrap();
    assert_eq!(render(expr), r"[aeiou\.\-]");
}

#[test]
fn any_of_chars_special_characters() {
    let expr = Expression::new().any_of_chars(r"[]\^").unwrap();
    assert_eq!(render(expr), r"[\[\]\\\^]");
}

#[test]
fn anything_but_chars() {
    let expr = Expression::new().anything_but_chars("aeiou.-").unwrap();
    assert_eq!(render(expr), r"[^aeiou\.\-]");
}

#[test]
fn empty_sets_rejected() {
    assert!(Expression::new().any_of_chars("").is_err());
    assert!(Expression::new().anything_but_chars("").is_err());
    assert!(Expression::new().anything_but_string("").is_err());
}

// === Ranges ===

#[test]
fn range() {
    assert_eq!(render(Expression::new().range('a', 'z').unwrap()), "[a-z]");
}

#[test]
fn anything_but_range() {
    let expr = Expression::new().anything_but_range('0', '9').unwrap();
    assert_eq!(render(expr), "[^0-9]");
}

#[test]
fn inverted_range_rejected() {
    let err = Expression::new().range('z', 'a').unwrap_err();
    assert_eq!(
        err,
        ExpressionError::InvalidRange {
            start: 'z',
            end: 'a'
        }
    );
    assert!(Expression::new().range('a', 'a').is_err());
    assert!(Expression::new().anything_but_range('9', '0').is_err());
}

// === Anything but string ===

#[test]
fn anything_but_string() {
    let expr = Expression::new().anything_but_string("hello").unwrap();
    assert_eq!(render(expr), "(?:(?!hello).{5})");
}

#[test]
fn anything_but_string_not_ascii() {
    let expr = Expression::new().anything_but_string("привет").unwrap();
    assert_eq!(render(expr), "(?:(?!привет).{6})");
}

#[test]
fn anything_but_string_length_ignores_escapes() {
    let expr = Expression::new().anything_but_string("a+b").unwrap();
    assert_eq!(render(expr), r"(?:(?!a\+b).{3})");
}

// === Alternation ===

#[test]
fn any_of_basic() {
    let expr = Expression::new()
        .any_of()
        .string("hello")
        .unwrap()
        .digit()
        .word()
        .char('.')
        .char('#')
        .end()
        .unwrap();
    assert_eq!(render(expr), r"(?:hello|\d|\w|[\.#])");
}

#[test]
fn any_of_range_fusion() {
    let expr = Expression::new()
        .any_of()
        .range('a', 'z')
        .unwrap()
        .range('A', 'Z')
        .unwrap()
        .range('0', '9')
        .unwrap()
        .char('.')
        .char('#')
        .end()
        .unwrap();
    assert_eq!(render(expr), r"[a-zA-Z0-9\.#]");
}

#[test]
fn any_of_range_fusion_with_other_choices() {
    let expr = Expression::new()
        .any_of()
        .range('a', 'z')
        .unwrap()
        .range('A', 'Z')
        .unwrap()
        .range('0', '9')
        .unwrap()
        .char('.')
        .char('#')
        .string("XXX")
        .unwrap()
        .end()
        .unwrap();
    assert_eq!(render(expr), r"(?:XXX|[a-zA-Z0-9\.#])");
}

#[test]
fn any_of_keeps_rest_order() {
    let expr = Expression::new()
        .any_of()
        .string("b")
        .unwrap()
        .string("zz")
        .unwrap()
        .any_of_chars("xy")
        .unwrap()
        .string("aa")
        .unwrap()
        .end()
        .unwrap();
    assert_eq!(render(expr), "(?:zz|aa|[bxy])");
}

#[test]
fn quantified_char_is_not_fused() {
    let expr = Expression::new()
        .any_of()
        .char('a')
        .one_or_more()
        .unwrap()
        .char('b')
        .end()
        .unwrap();
    assert_eq!(render(expr), "(?:b+|[a])");
}

#[test]
fn quantified_any_of() {
    let expr = Expression::new()
        .one_or_more()
        .unwrap()
        .any_of()
        .digit()
        .char('-')
        .end()
        .unwrap();
    assert_eq!(render(expr), r"(?:\d|[\-])+");
}
