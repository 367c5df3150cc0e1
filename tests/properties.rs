// properties.rs - Property tests for rendering, escaping and capture counting.

use expressive::node::is_special;
use expressive::prelude::*;
use proptest::prelude::*;

/// Undo the escaping applied by `string`, failing on a stray backslash or an
/// unescaped metacharacter.
fn unescape(rendered: &str) -> Option<String> {
    let mut out = String::new();
    let mut chars = rendered.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            let escaped = chars.next()?;
            if !is_special(escaped) {
                return None;
            }
            out.push(escaped);
        } else if is_special(c) {
            return None;
        } else {
            out.push(c);
        }
    }
    Some(out)
}

proptest! {
    #[test]
    fn string_escapes_exactly_the_metacharacters(s in "[ -~]{1,24}") {
        let rendered = Expression::new().string(&s).unwrap().render().unwrap();
        prop_assert_eq!(unescape(&rendered), Some(s));
    }

    #[test]
    fn char_escapes_exactly_the_metacharacters(c in any::<char>()) {
        let rendered = Expression::new().char(c).render().unwrap();
        prop_assert_eq!(unescape(&rendered), Some(c.to_string()));
    }

    #[test]
    fn rendering_is_idempotent(s in "[a-z.*+]{1,8}", n in 1u32..5) {
        let expr = Expression::new()
            .capture()
            .exactly(n)
            .unwrap()
            .string(&s)
            .unwrap()
            .end()
            .unwrap()
            .any_of()
            .string(&s)
            .unwrap()
            .digit()
            .end()
            .unwrap();
        prop_assert_eq!(expr.render().unwrap(), expr.render().unwrap());
        prop_assert_eq!(expr.to_regex_string().unwrap(), expr.to_regex_string().unwrap());
    }

    #[test]
    fn capture_count_and_backreference_validity(
        opens in proptest::collection::vec(any::<bool>(), 0..8),
        index in 0usize..10,
    ) {
        let mut expr = Expression::new();
        for (i, named) in opens.iter().enumerate() {
            expr = if *named {
                expr.named_capture(&format!("g{i}")).unwrap()
            } else {
                expr.capture()
            };
        }
        prop_assert_eq!(expr.capture_count(), opens.len());
        let valid = index >= 1 && index <= opens.len();
        prop_assert_eq!(expr.backreference(index).is_ok(), valid);
    }

    #[test]
    fn backreference_shift_after_splice(host in 0usize..5, k in 1usize..4) {
        let mut donor = Expression::new();
        for _ in 0..k {
            donor = donor.capture().any_char().end().unwrap();
        }
        let donor = donor.backreference(k).unwrap();

        let mut expr = Expression::new();
        for _ in 0..host {
            expr = expr.capture().digit().end().unwrap();
        }
        let expr = expr.subexpression(&donor, &SubexpressionOptions::new()).unwrap();
        let rendered = expr.render().unwrap();
        let expected_ref = format!("\\{}", host + k);
        prop_assert!(rendered.ends_with(&expected_ref));
        prop_assert_eq!(expr.capture_count(), host + k);
    }

    #[test]
    fn backreference_then_digit_still_compiles(d in proptest::char::range('0', '9')) {
        let re = Expression::new()
            .capture()
            .char('a')
            .end()
            .unwrap()
            .backreference(1)
            .unwrap()
            .char(d)
            .to_regex()
            .unwrap();
        let haystack = format!("aa{d}");
        prop_assert!(re.is_match(&haystack).unwrap());
    }
}
