// groups_test.rs - Groups, captures, lookaround and backreferences.

use expressive::prelude::*;

fn render(expr: Expression) -> String {
    expr.to_regex_string().unwrap()
}

fn hello_word_bang(expr: Expression) -> Expression {
    expr.string("hello ").unwrap().word().char('!')
}

// === Containers ===

#[test]
fn group() {
    let expr = hello_word_bang(Expression::new().group()).end().unwrap();
    assert_eq!(render(expr), r"(?:hello \w!)");
}

#[test]
fn capture() {
    let expr = hello_word_bang(Expression::new().capture()).end().unwrap();
    assert_eq!(render(expr), r"(hello \w!)");
}

#[test]
fn named_capture() {
    let expr = hello_word_bang(Expression::new().named_capture("this_is_the_name").unwrap())
        .end()
        .unwrap();
    assert_eq!(render(expr), r"(?P<this_is_the_name>hello \w!)");
}

#[test]
fn empty_group() {
    let expr = Expression::new().group().end().unwrap();
    assert_eq!(render(expr), "(?:)");
}

#[test]
fn nested_containers() {
    let expr = Expression::new()
        .capture()
        .group()
        .digit()
        .end()
        .unwrap()
        .end()
        .unwrap();
    assert_eq!(render(expr), r"((?:\d))");
}

#[test]
fn assertions() {
    let ahead = Expression::new()
        .assert_ahead()
        .range('a', 'f')
        .unwrap()
        .end()
        .unwrap()
        .range('a', 'z')
        .unwrap();
    assert_eq!(render(ahead), "(?=[a-f])[a-z]");

    let not_ahead = Expression::new()
        .assert_not_ahead()
        .range('a', 'f')
        .unwrap()
        .end()
        .unwrap()
        .range('0', '9')
        .unwrap();
    assert_eq!(render(not_ahead), "(?![a-f])[0-9]");

    let behind = Expression::new()
        .assert_behind()
        .string("hello ")
        .unwrap()
        .end()
        .unwrap()
        .string("world")
        .unwrap();
    assert_eq!(render(behind), "(?<=hello )world");

    let not_behind = Expression::new()
        .assert_not_behind()
        .string("hello ")
        .unwrap()
        .end()
        .unwrap()
        .string("world")
        .unwrap();
    assert_eq!(render(not_behind), "(?<!hello )world");
}

#[test]
fn unclosed_container_cannot_render() {
    let err = Expression::new().capture().digit().render().unwrap_err();
    assert_eq!(
        err,
        ExpressionError::Incomplete {
            context: "capture".into()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Structural);
}

// === Group names ===

#[test]
fn named_capture_bad_name() {
    let err = Expression::new().named_capture("hello world").unwrap_err();
    assert_eq!(
        err,
        ExpressionError::InvalidGroupName {
            name: "hello world".into()
        }
    );
    assert_eq!(err.kind(), ErrorKind::Naming);
    assert!(Expression::new().named_capture("").is_err());
    assert!(Expression::new().named_capture("1st").is_err());
}

#[test]
fn named_capture_duplicate_name() {
    let err = Expression::new()
        .named_capture("hello")
        .unwrap()
        .end()
        .unwrap()
        .named_capture("hello")
        .unwrap_err();
    assert_eq!(err.to_string(), "cannot use 'hello' again for a capture group");
}

// === Backreferences ===

#[test]
fn backreference() {
    let expr = hello_word_bang(Expression::new().capture())
        .end()
        .unwrap()
        .backreference(1)
        .unwrap();
    assert_eq!(render(expr), r"(hello \w!)\1");
}

#[test]
fn backreference_inside_open_capture() {
    let expr = Expression::new()
        .capture()
        .digit()
        .backreference(1)
        .unwrap()
        .end()
        .unwrap();
    assert_eq!(render(expr), r"(\d\1)");
}

#[test]
fn backreference_followed_by_digit() {
    let expr = Expression::new()
        .capture()
        .char('a')
        .end()
        .unwrap()
        .backreference(1)
        .unwrap()
        .char('0');
    assert_eq!(render(expr.clone()), r"(a)\1(?:)0");

    let re = expr.to_regex().unwrap();
    assert!(re.is_match("aa0").unwrap());
    assert!(!re.is_match("a0").unwrap());

    let spliced = Expression::new()
        .capture()
        .char('a')
        .end()
        .unwrap()
        .backreference(1)
        .unwrap()
        .subexpression(
            &Expression::new().string("12").unwrap(),
            &SubexpressionOptions::new(),
        )
        .unwrap();
    assert_eq!(render(spliced), r"(a)\1(?:)12");
}

#[test]
fn backreference_out_of_range() {
    let expr = Expression::new().capture().digit().end().unwrap();
    let err = expr.backreference(2).unwrap_err();
    assert_eq!(
        err,
        ExpressionError::InvalidBackreference {
            index: 2,
            captures: 1
        }
    );
    assert_eq!(err.kind(), ErrorKind::Reference);
    assert!(expr.backreference(0).is_err());
}

#[test]
fn named_backreference() {
    let expr = hello_word_bang(Expression::new().named_capture("this_is_the_name").unwrap())
        .end()
        .unwrap()
        .named_backreference("this_is_the_name")
        .unwrap();
    assert_eq!(
        render(expr),
        r"(?P<this_is_the_name>hello \w!)(?P=this_is_the_name)"
    );
}

#[test]
fn named_backreference_unknown_group() {
    let err = Expression::new()
        .named_backreference("not_here")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "no capture group called 'not_here' exists (create one with named_capture())"
    );
}

#[test]
fn capture_count_includes_open_groups() {
    let expr = Expression::new()
        .capture()
        .named_capture("a")
        .unwrap()
        .capture();
    assert_eq!(expr.capture_count(), 3);
    assert!(expr.backreference(3).is_ok());
    assert!(expr.backreference(4).is_err());
}
