use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use serde_json::json;
use shelf_core::{CommandRegistry, ParamType, Parameter, ShelfError, Value};

fn echo_registry(calls: Rc<Cell<usize>>) -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .register(
            "calc sum",
            vec![
                Parameter::new("a", ParamType::int()),
                Parameter::new("b", ParamType::float()),
                Parameter::new("flag", ParamType::boolean()),
                Parameter::untyped("label"),
            ],
            move |args| {
                calls.set(calls.get() + 1);
                Ok(Value::Array(args.values()))
            },
        )
        .unwrap();
    registry
}

// Property: valid literals for every parameter reach the handler as coerced
// values, in declaration order.
proptest! {
    #[test]
    fn prop_valid_literals_are_coerced(
        a in any::<i64>(),
        b in -1.0e6f64..1.0e6,
        flag in any::<bool>(),
        label in "[a-zA-Z0-9_]{1,12}",
    ) {
        let calls = Rc::new(Cell::new(0));
        let registry = echo_registry(calls.clone());
        let line = format!("calc sum {} {} {} {}", a, b, flag, label);

        let result = registry.parse(&line).unwrap();
        prop_assert_eq!(result, json!([a, b, flag, label]));
        prop_assert_eq!(calls.get(), 1);
    }
}

// Property: text that does not start with a registered prefix is never
// dispatched.
proptest! {
    #[test]
    fn prop_unknown_prefix_never_invokes(line in "[a-bd-z][a-z0-9 ]{0,20}") {
        let calls = Rc::new(Cell::new(0));
        let registry = echo_registry(calls.clone());

        let err = registry.parse(&line).unwrap_err();
        prop_assert!(matches!(err, ShelfError::NoMatch(_)));
        prop_assert_eq!(calls.get(), 0);
    }
}

// Property: wrong argument counts are arity failures, whatever the tokens are.
proptest! {
    #[test]
    fn prop_wrong_arity_is_mismatch(words in prop::collection::vec("[a-z0-9]{1,6}", 0..8)) {
        prop_assume!(words.len() != 4);
        let calls = Rc::new(Cell::new(0));
        let registry = echo_registry(calls.clone());
        let line = format!("calc sum {}", words.join(" "));

        let err = registry.parse(&line).unwrap_err();
        prop_assert!(matches!(err, ShelfError::Mismatch { .. }), "got {:?}", err);
        prop_assert_eq!(calls.get(), 0);
    }
}

// Property: parsing the same line twice with a pure handler gives the same
// answer.
proptest! {
    #[test]
    fn prop_parse_is_idempotent(a in any::<i64>(), label in "[a-z]{1,8}") {
        let registry = echo_registry(Rc::new(Cell::new(0)));
        let line = format!("calc sum {} 1.5 on {}", a, label);

        let first = registry.parse(&line).unwrap();
        let second = registry.parse(&line).unwrap();
        prop_assert_eq!(first, second);
    }
}
