use descent::{Calculator, LexerConfig, ParseError, Silent};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn calc() -> Calculator<Silent> {
    let _ = env_logger::builder().is_test(true).try_init();
    Calculator::with_observer(Silent).unwrap()
}

#[test]
fn subtraction_groups_left() {
    assert_eq!(calc().parse("6-5-5").unwrap(), -4);
}

#[test]
fn exponent_groups_right() {
    assert_eq!(calc().parse("2^3^2").unwrap(), 512);
}

#[test]
fn precedence_ordering() {
    let mut c = calc();
    assert_eq!(c.parse("2+3*4").unwrap(), 14);
    assert_eq!(c.parse("2*3+4").unwrap(), 10);
    assert_eq!(c.parse("2+3^2").unwrap(), 11);
    assert_eq!(c.parse("(2+3)*4").unwrap(), 20);
}

#[test]
fn assignment_survives_between_parses() {
    let mut c = calc();
    assert_eq!(c.parse("set x = 10").unwrap(), 10);
    assert_eq!(c.parse("x*2").unwrap(), 20);
}

#[test]
fn undefined_identifier_is_an_error_not_zero() {
    let err = calc().parse("y+1").unwrap_err();
    assert!(err.is_fatal());
    assert!(matches!(err, ParseError::UndefinedIdentifier { ref name, .. } if name == "y"));
}

#[test]
fn trailing_garbage_is_rejected() {
    let mut c = calc();
    assert_eq!(c.parse("5").unwrap(), 5);
    assert!(matches!(c.parse("5 5"), Err(ParseError::TrailingInput { .. })));
}

#[test]
fn same_input_same_result() {
    let mut c = calc();
    for input in ["1+2*3", "(7-2)^2", "100/7"] {
        let first = c.parse(input).unwrap();
        assert_eq!(c.parse(input).unwrap(), first);
    }
}

#[test]
fn random_additive_chains_fold_left() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..200 {
        let mut expected: i64 = rng.gen_range(0..100);
        let mut input = expected.to_string();

        for _ in 0..rng.gen_range(1..10) {
            let operand: i64 = rng.gen_range(0..100);
            if rng.gen_bool(0.5) {
                input.push_str(&format!(" - {}", operand));
                expected -= operand;
            } else {
                input.push_str(&format!(" + {}", operand));
                expected += operand;
            }
        }

        assert_eq!(calc().parse(&input).unwrap(), expected, "input: {}", input);
    }
}

#[test]
fn random_multiplicative_chains_fold_left() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let mut expected: i64 = rng.gen_range(1..1000);
        let mut input = expected.to_string();

        for _ in 0..rng.gen_range(1..6) {
            let operand: i64 = rng.gen_range(1..10);
            if rng.gen_bool(0.5) {
                input.push_str(&format!("/{}", operand));
                expected /= operand;
            } else {
                input.push_str(&format!("*{}", operand));
                expected *= operand;
            }
        }

        assert_eq!(calc().parse(&input).unwrap(), expected, "input: {}", input);
    }
}

#[test]
fn custom_rule_table_from_json() {
    let json = r#"{
        "rules": [
            { "pattern": "\\d+", "kind": "NUMBER" },
            { "pattern": "plus", "kind": "PLUS" },
            { "pattern": "times", "kind": "MULTIPLY" }
        ]
    }"#;
    let config = LexerConfig::from_json(json).unwrap();
    assert!(config.skip_whitespace);

    let mut c = Calculator::with_config(config, Silent).unwrap();
    assert_eq!(c.parse("2 plus 3 times 4").unwrap(), 14);
}

#[test]
fn errors_are_classified() {
    let mut c = calc();
    assert!(matches!(c.parse(""), Err(ParseError::UnexpectedEnd)));
    assert!(matches!(c.parse("5+"), Err(ParseError::UnexpectedEnd)));
    assert!(matches!(c.parse("(1+2"), Err(ParseError::UnexpectedEnd)));
    assert!(matches!(c.parse(")"), Err(ParseError::UnexpectedToken { .. })));
    assert!(matches!(c.parse("4/0"), Err(ParseError::DivisionByZero { .. })));
    assert!(matches!(c.parse("2^(0-1)"), Err(ParseError::NegativeExponent { .. })));
    assert!(matches!(c.parse("3 $"), Err(ParseError::Lex(_))));
}
