//! End-to-end evaluation scenarios exercising whole definition graphs rather
//! than individual node kinds.

use axon_eval::{Definition, EvalError, EvalOptions, Layer, Literal, SwitchCase, Value, evaluate};
use axon_common::Identifier;
use std::rc::Rc;

fn layer(entries: Vec<(&str, Definition)>) -> Rc<Layer> {
    let mut l = Layer::new();
    for (k, v) in entries {
        l.insert(Identifier::from(k), v);
    }
    Rc::new(l)
}

fn run(layers: Vec<Rc<Layer>>, id: &str) -> Result<Value, EvalError> {
    evaluate(layers, Identifier::from(id), |_| Value::Null, || false, EvalOptions::default())
}

/// A zero-arity call on a non-callable forces it to a value; calling a
/// number with arguments fails instead of coercing it into a function.
#[test]
fn scenario_1_zero_arity_forces_a_non_callable_but_arguments_fail() {
    let graph = layer(vec![
        ("a", Definition::Number { v: 2.0 }),
        ("b", Definition::Call { f: Identifier::from("a"), a: vec![] }),
        ("c", Definition::Call { f: Identifier::from("b"), a: vec![Identifier::from("a")] }),
    ]);

    assert_eq!(run(vec![graph.clone()], "a").unwrap(), Value::Number(2.0));
    assert_eq!(run(vec![graph.clone()], "b").unwrap(), Value::Number(2.0));
    assert!(matches!(
        run(vec![graph], "c"),
        Err(EvalError::ArityMismatch { expected: 0, actual: 1 })
    ));
}

/// A user function closes over its defining scope; a private helper used
/// only inside the body (`_3neg`) is ordinary lexical scoping, not the
/// privacy boundary (which is analysis-only).
#[test]
fn scenario_2_user_function_application() {
    let body = layer(vec![
        ("=", Definition::Call { f: Identifier::from("+"), a: vec![Identifier::from("a"), Identifier::from("_3neg")] }),
        ("_3neg", Definition::Number { v: 3.0 }),
    ]);
    let graph = layer(vec![
        ("_3", Definition::Number { v: -3.0 }),
        ("add3", Definition::Function { p: vec![Identifier::from("a")], b: body }),
        ("one", Definition::Number { v: 1.0 }),
        ("call", Definition::Call { f: Identifier::from("add3"), a: vec![Identifier::from("one")] }),
    ]);

    let result = run(vec![axon_stdlib::stdlib_layer(), graph], "call").unwrap();
    assert_eq!(result, Value::Number(4.0));
}

/// Mapping a user function over an inline array literal.
#[test]
fn scenario_3_map_over_an_array_literal() {
    let add3_body = layer(vec![
        ("=", Definition::Call { f: Identifier::from("+"), a: vec![Identifier::from("a"), Identifier::from("three")] }),
        ("three", Definition::Number { v: 3.0 }),
    ]);
    let graph = layer(vec![
        ("add3", Definition::Function { p: vec![Identifier::from("a")], b: add3_body }),
        ("nums", Definition::InlineArray { v: vec![Literal::Number(1.0), Literal::Number(2.0), Literal::Number(3.0)] }),
        ("mapped", Definition::Call { f: Identifier::from("map"), a: vec![Identifier::from("add3"), Identifier::from("nums")] }),
    ]);

    let result = run(vec![axon_stdlib::stdlib_layer(), graph], "mapped").unwrap();
    assert_eq!(result, Value::array(vec![Value::Number(4.0), Value::Number(5.0), Value::Number(6.0)]));
}

/// A switch selects the first arm whose condition is `true`, falling back
/// to the arm with no condition.
#[test]
fn scenario_4_switch_falls_through_to_the_default_arm() {
    let graph = layer(vec![
        (
            "x",
            Definition::Switch {
                m: vec![
                    SwitchCase { c: Some(Identifier::from("t1")), v: Identifier::from("v1") },
                    SwitchCase { c: None, v: Identifier::from("v2") },
                ],
            },
        ),
        ("t1", Definition::Bool { v: false }),
        ("v1", Definition::Number { v: 1.0 }),
        ("v2", Definition::Number { v: 2.0 }),
    ]);

    assert_eq!(run(vec![graph], "x").unwrap(), Value::Number(2.0));
}

/// Calling stdlib operators directly, exercising the oddities each one
/// commits to: `+` against `null` is `null` rather than `NaN`, `mod` is
/// Euclidean, `date_sub` returns a fractional month count, and `cat`
/// flattens every argument (strings into characters, arrays into elements)
/// into one array.
#[test]
fn scenario_6_stdlib_operators() {
    let stdlib = axon_stdlib::stdlib_layer();
    let get = |name: &str| match stdlib.get(&Identifier::from(name)).unwrap() {
        Definition::Bound(Value::Callable(c)) => c.clone(),
        _ => panic!("{name} is not a bound callable"),
    };
    let mut ctx = axon_eval::EvalContext::new(vec![], || false, |_| Value::Null);

    let plus = get("+");
    assert_eq!(plus.apply(&[Value::Number(1.0), Value::Null], &mut ctx).unwrap(), Value::Null);

    let modulo = get("mod");
    assert_eq!(modulo.apply(&[Value::Number(7.0), Value::Number(-4.0)], &mut ctx).unwrap(), Value::Number(1.0));

    let date_sub = get("date_sub");
    let result = date_sub
        .apply(&[Value::string("months"), Value::string("2019-05-03"), Value::string("2019-01-01")], &mut ctx)
        .unwrap();
    match result {
        Value::Number(n) => assert!((n - (4.0 + 2.0 / 31.0)).abs() < 1e-9),
        other => panic!("expected a number, got {other:?}"),
    }

    let cat = get("cat");
    let result = cat.apply(&[Value::string("cat"), Value::array(vec![Value::Number(3.0), Value::Number(4.0)])], &mut ctx).unwrap();
    assert_eq!(
        result,
        Value::array(vec![
            Value::string("c"),
            Value::string("a"),
            Value::string("t"),
            Value::Number(3.0),
            Value::Number(4.0),
        ])
    );
}
