/**
 * Plural Rule Tests
 *
 * Plural-Forms headers of real languages plus the corners of the expression
 * language: declarations, C truth values, division by zero and parse errors.
 */

#[cfg(test)]
mod tests {
    use gettext_template::plural::{Lexer, Parser, PluralRule};
    use gettext_template::{compile, GettextError, DEFAULT_PLURAL_FORMS};

    fn indices(expr: &str, counts: &[i64]) -> Vec<i64> {
        let rule = PluralRule::compile(expr).unwrap();
        counts.iter().map(|&n| rule.index(n)).collect()
    }

    fn error_offset(expr: &str) -> usize {
        match PluralRule::compile(expr) {
            Err(GettextError::InvalidPluralExpression { offset, .. }) => offset,
            other => panic!("expected invalid plural expression, got {other:?}"),
        }
    }

    mod languages {
        use super::*;

        #[test]
        fn should_select_english_forms() {
            assert_eq!(indices(DEFAULT_PLURAL_FORMS, &[0, 1, 2, 100]), vec![1, 0, 1, 1]);
        }

        #[test]
        fn should_select_french_forms() {
            assert_eq!(
                indices("nplurals=2; plural=(n > 1);", &[0, 1, 2, 3]),
                vec![0, 0, 1, 1]
            );
        }

        #[test]
        fn should_select_russian_forms() {
            let expr = "nplurals=3; plural=(n%10==1 && n%100!=11 ? 0 : n%10>=2 && n%10<=4 && (n%100<10 || n%100>=20) ? 1 : 2);";
            assert_eq!(
                indices(expr, &[0, 1, 2, 5, 11, 12, 21, 22, 25, 111]),
                vec![2, 0, 1, 2, 2, 2, 0, 1, 2, 2]
            );
            assert_eq!(PluralRule::compile(expr).unwrap().nplurals(), Some(3));
        }

        #[test]
        fn should_select_arabic_forms() {
            let expr = "nplurals=6; plural=(n==0 ? 0 : n==1 ? 1 : n==2 ? 2 : n%100>=3 && n%100<=10 ? 3 : n%100>=11 ? 4 : 5);";
            assert_eq!(
                indices(expr, &[0, 1, 2, 3, 10, 11, 99, 100, 102]),
                vec![0, 1, 2, 3, 3, 4, 4, 5, 5]
            );
        }

        #[test]
        fn should_select_single_form() {
            assert_eq!(indices("nplurals=1; plural=0;", &[0, 1, 7]), vec![0, 0, 0]);
        }
    }

    mod evaluation {
        use super::*;

        #[test]
        fn should_support_declarations() {
            assert_eq!(indices("let x = n * 2, y; plural = x + y;", &[3]), vec![6]);
            assert_eq!(indices("var plural; plural = n == 1 ? 0 : 1", &[1, 2]), vec![0, 1]);
            assert_eq!(indices("const k = 4; plural = n % k", &[9]), vec![1]);
        }

        #[test]
        fn should_start_unknown_names_at_zero() {
            assert_eq!(indices("plural = foo + n", &[3]), vec![3]);
        }

        #[test]
        fn should_use_c_truth_values() {
            assert_eq!(indices("plural = !n", &[0, 5]), vec![1, 0]);
            assert_eq!(indices("plural = n > 1 && 7", &[2]), vec![1]);
            assert_eq!(indices("plural = n || 0", &[4]), vec![1]);
        }

        #[test]
        fn should_yield_zero_for_division_by_zero() {
            assert_eq!(indices("plural = n / 0", &[5]), vec![0]);
            assert_eq!(indices("plural = n % 0", &[5]), vec![0]);
        }

        #[test]
        fn should_wrap_on_overflow() {
            assert_eq!(indices("plural = n * 2", &[i64::MAX]), vec![-2]);
        }

        #[test]
        fn should_treat_strict_equality_as_equality() {
            assert_eq!(indices("plural = n === 1 ? 0 : 1", &[1, 2]), vec![0, 1]);
            assert_eq!(indices("plural = n !== 1", &[1, 2]), vec![0, 1]);
        }

        #[test]
        fn should_support_unary_operators() {
            assert_eq!(indices("plural = -n", &[3]), vec![-3]);
            assert_eq!(indices("plural = +n", &[3]), vec![3]);
        }

        #[test]
        fn should_default_plural_to_zero() {
            assert_eq!(indices("nplurals = 2", &[5]), vec![0]);
            assert_eq!(indices("", &[5]), vec![0]);
        }

        #[test]
        fn should_expose_closure() {
            let select = compile("nplurals=2; plural=(n != 1);").unwrap();
            let copy = select.clone();
            assert_eq!((select(1), copy(2)), (0, 1));
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn should_report_end_of_input() {
            assert_eq!(error_offset("plural = (n"), 11);
        }

        #[test]
        fn should_report_invalid_assignment_target() {
            assert_eq!(error_offset("1 = n"), 2);
        }

        #[test]
        fn should_report_unexpected_character() {
            assert_eq!(error_offset("plural = n @ 1"), 11);
        }

        #[test]
        fn should_reject_incomplete_expressions() {
            for expr in ["plural = n +", "plural = n ? 1", "plural = n ? 1 : ", "plural n"] {
                assert!(PluralRule::compile(expr).is_err(), "{expr} should not compile");
            }
        }

        #[test]
        fn should_reject_hostile_nesting_without_overflow() {
            for source in [
                "(".repeat(100_000),
                format!("plural = {}n", "-".repeat(100_000)),
                format!("plural = n{}", " * n".repeat(100_000)),
            ] {
                assert!(PluralRule::compile(&source).unwrap_err().is_invalid_plural());
            }
        }

        #[test]
        fn should_include_source_in_message() {
            let err = PluralRule::compile("plural = (n").unwrap_err();
            assert!(err.to_string().contains("`plural = (n`"));
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn should_tokenize_header() {
            let tokens = Lexer::new().tokenize("nplurals=2;");
            let values: Vec<&str> = tokens.iter().map(|t| t.str_value.as_str()).collect();
            assert_eq!(values, vec!["nplurals", "=", "", ";"]);
            assert_eq!(tokens[2].num_value, 2);
        }

        #[test]
        fn should_print_canonical_form() {
            let program = Parser::new().parse("plural=n%10==1?0:1").unwrap();
            assert_eq!(program.to_string(), "plural = (((n % 10) == 1) ? 0 : 1);");
        }

        #[test]
        fn should_print_nested_assignments_that_reparse() {
            for (source, expected) in [
                ("plural = !(k = 1)", "plural = !(k = 1);"),
                ("plural = (k = 1) + k", "plural = ((k = 1) + k);"),
                ("plural = n ? (k = 2) : k = 3", "plural = (n ? (k = 2) : (k = 3));"),
                ("a = b = n; plural = a + b", "a = (b = n); plural = (a + b);"),
            ] {
                let rule = PluralRule::compile(source).unwrap();
                let canonical = rule.program().to_string();
                assert_eq!(canonical, expected);
                let reparsed = PluralRule::compile(&canonical).unwrap();
                for n in [0, 1, 2, 7] {
                    assert_eq!(reparsed.index(n), rule.index(n), "{source} at n = {n}");
                }
            }
            assert_eq!(PluralRule::compile("plural = (k = 1) + k").unwrap().index(0), 2);
        }
    }
}
