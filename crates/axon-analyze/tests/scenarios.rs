//! End-to-end analysis scenarios exercising whole definition graphs rather
//! than individual node kinds.

use axon_analyze::analyze;
use axon_common::Identifier;
use axon_eval::{Definition, Layer, Literal};
use axon_types::{TypeArena, does_halt, signature};
use rustc_hash::FxHashMap;
use std::rc::Rc;

fn layer(entries: Vec<(&str, Definition)>) -> Rc<Layer> {
    let mut l = Layer::new();
    for (k, v) in entries {
        l.insert(Identifier::from(k), v);
    }
    Rc::new(l)
}

/// `add3`'s function type has arity one; applying it to a number (`call`)
/// yields `number`.
#[test]
fn scenario_2_function_arity_and_application_type() {
    let mut arena = TypeArena::new();
    let body = layer(vec![("=", Definition::Call { f: Identifier::from("+"), a: vec![Identifier::from("a"), Identifier::from("_3neg")] }), ("_3neg", Definition::Number { v: 3.0 })]);
    let graph = layer(vec![
        ("add3", Definition::Function { p: vec![Identifier::from("a")], b: body }),
        ("one", Definition::Number { v: 1.0 }),
        ("call", Definition::Call { f: Identifier::from("add3"), a: vec![Identifier::from("one")] }),
    ]);
    let stdlib = axon_stdlib::stdlib_types(&mut arena);

    let add3_report = analyze(&mut arena, vec![graph.clone()], stdlib.clone(), Identifier::from("add3"), |_| None).unwrap();
    assert!(signature(&arena, add3_report.ty).starts_with("fn["));

    let call_report = analyze(&mut arena, vec![graph], stdlib, Identifier::from("call"), |_| None).unwrap();
    assert_eq!(signature(&arena, call_report.ty), "number");
}

/// Mapping a function over an array literal analyzes to `array(number)`.
#[test]
fn scenario_3_map_over_array_literal_type() {
    let mut arena = TypeArena::new();
    let add3_body = layer(vec![
        ("=", Definition::Call { f: Identifier::from("+"), a: vec![Identifier::from("a"), Identifier::from("three")] }),
        ("three", Definition::Number { v: 3.0 }),
    ]);
    let graph = layer(vec![
        ("add3", Definition::Function { p: vec![Identifier::from("a")], b: add3_body }),
        ("nums", Definition::InlineArray { v: vec![Literal::Number(1.0), Literal::Number(2.0), Literal::Number(3.0)] }),
        ("mapped", Definition::Call { f: Identifier::from("map"), a: vec![Identifier::from("add3"), Identifier::from("nums")] }),
    ]);
    let stdlib = axon_stdlib::stdlib_types(&mut arena);

    let report = analyze(&mut arena, vec![graph], stdlib, Identifier::from("mapped"), |_| None).unwrap();
    assert_eq!(signature(&arena, report.ty), "array(number)");
}

/// Unlike the evaluator, which picks exactly one arm, the analyzer can't
/// know a condition's runtime value, so a switch's type is the union of
/// every arm's type, not just the one the evaluator would select.
#[test]
fn scenario_4_switch_type_is_the_union_of_every_arms_type() {
    let mut arena = TypeArena::new();
    let graph = layer(vec![
        (
            "x",
            Definition::Switch {
                m: vec![
                    axon_eval::SwitchCase { c: Some(Identifier::from("t1")), v: Identifier::from("v1") },
                    axon_eval::SwitchCase { c: None, v: Identifier::from("v2") },
                ],
            },
        ),
        ("t1", Definition::Bool { v: false }),
        ("v1", Definition::Str { v: "unreachable".into() }),
        ("v2", Definition::Number { v: 2.0 }),
    ]);
    let stdlib = axon_stdlib::stdlib_types(&mut arena);

    let report = analyze(&mut arena, vec![graph], stdlib, Identifier::from("x"), |_| None).unwrap();
    assert_eq!(signature(&arena, report.ty), "union(number|string)");
}

/// A self-referential definition resolves to `never` rather than looping
/// forever, and is reported as certain to diverge.
#[test]
fn scenario_5_self_reference_resolves_to_never() {
    let mut arena = TypeArena::new();
    let graph = layer(vec![("r", Definition::RefList { v: vec![Identifier::from("r")] })]);

    let report = analyze(&mut arena, vec![graph], FxHashMap::default(), Identifier::from("r"), |_| None).unwrap();
    assert_eq!(signature(&arena, report.ty), "never");
    assert_eq!(does_halt(&arena, report.ty), Some(false));
}
