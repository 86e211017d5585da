//! Wiring layer that resolves the `axon-eval` ⟷ `axon-stdlib` dependency
//! direction: neither crate depends on the other, so assembling a full
//! stack (stdlib beneath user layers) and dispatching a whole program lives
//! here instead.

use axon_analyze::{AnalyzeResult, analyze, analyze_all};
use axon_common::Identifier;
use axon_eval::{EvalError, EvalOptions, Layer, Value, evaluate};
use axon_types::{TypeArena, TypeId};
use std::rc::Rc;

/// Stacks the stdlib value layer beneath the caller's user layers for the
/// evaluator (spec §2 "Both begin by layering the stdlib under the user
/// definitions").
fn full_stack(user_layers: Vec<Rc<Layer>>) -> Vec<Rc<Layer>> {
    let mut layers = Vec::with_capacity(user_layers.len() + 1);
    layers.push(axon_stdlib::stdlib_layer());
    layers.extend(user_layers);
    layers
}

/// Evaluates one top-level identifier against the user's layers, with the
/// stdlib layered in underneath.
pub fn evaluate_program<'a>(
    user_layers: Vec<Rc<Layer>>,
    id: Identifier,
    get_form_value: impl Fn(&str) -> Value + 'a,
    should_halt: impl Fn() -> bool + 'a,
    options: EvalOptions,
) -> Result<Value, EvalError> {
    evaluate(full_stack(user_layers), id, get_form_value, should_halt, options)
}

/// Evaluates every identifier bound in the top-most user layer, continuing
/// past a failed one (spec §4.6 "evaluate ... prints `id -> value` per id,
/// continuing past per-id failures").
pub fn evaluate_all_program<'a>(
    user_layers: Vec<Rc<Layer>>,
    get_form_value: impl Fn(&str) -> Value + 'a,
    should_halt: impl Fn() -> bool + 'a,
    options: EvalOptions,
) -> Vec<(Identifier, Result<Value, EvalError>)> {
    let top_level: Vec<Identifier> = user_layers.last().map(|l| l.keys().cloned().collect()).unwrap_or_default();
    top_level
        .into_iter()
        .map(|id| {
            let result = evaluate(full_stack(user_layers.clone()), id.clone(), &get_form_value, &should_halt, options);
            (id, result)
        })
        .collect()
}

/// Analyzes one top-level identifier, consulting the stdlib's call
/// signatures as the implicit bottom layer (spec §3.5, §4.4).
pub fn analyze_program(
    arena: &mut TypeArena,
    user_layers: Vec<Rc<Layer>>,
    id: Identifier,
    form_value_types: impl Fn(&str) -> Option<TypeId>,
) -> AnalyzeResult {
    let stdlib = axon_stdlib::stdlib_types(arena);
    analyze(arena, user_layers, stdlib, id, form_value_types)
}

/// Analyzes every identifier bound in the top-most user layer, sharing one
/// context (and so one resolve map) across all of them.
pub fn analyze_all_program(
    arena: &mut TypeArena,
    user_layers: Vec<Rc<Layer>>,
    form_value_types: impl Fn(&str) -> Option<TypeId>,
) -> Vec<(Identifier, AnalyzeResult)> {
    let stdlib = axon_stdlib::stdlib_types(arena);
    analyze_all(arena, user_layers, stdlib, form_value_types)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_eval::Definition;
    use axon_types::signature;

    fn layer(entries: Vec<(&str, Definition)>) -> Rc<Layer> {
        let mut l = Layer::new();
        for (k, v) in entries {
            l.insert(Identifier::from(k), v);
        }
        Rc::new(l)
    }

    #[test]
    fn evaluate_program_sees_the_stdlib_beneath_user_layers() {
        let layers = vec![layer(vec![
            ("x", Definition::Call { f: Identifier::from("+"), a: vec![Identifier::from("a"), Identifier::from("b")] }),
            ("a", Definition::Number { v: 2.0 }),
            ("b", Definition::Number { v: 3.0 }),
        ])];
        let result = evaluate_program(layers, Identifier::from("x"), |_| Value::Null, || false, EvalOptions::default());
        assert!(matches!(result, Ok(Value::Number(n)) if n == 5.0));
    }

    #[test]
    fn analyze_program_resolves_stdlib_call_types() {
        let mut arena = TypeArena::new();
        let layers = vec![layer(vec![
            ("x", Definition::Call { f: Identifier::from("+"), a: vec![Identifier::from("a"), Identifier::from("b")] }),
            ("a", Definition::Number { v: 2.0 }),
            ("b", Definition::Number { v: 3.0 }),
        ])];
        let report = analyze_program(&mut arena, layers, Identifier::from("x"), |_| None).unwrap();
        assert_eq!(signature(&arena, report.ty), "number");
    }

    #[test]
    fn evaluate_all_program_continues_past_a_failing_definition() {
        let layers = vec![layer(vec![
            ("good", Definition::Number { v: 1.0 }),
            ("bad", Definition::Call { f: Identifier::from("nope"), a: vec![] }),
        ])];
        let results = evaluate_all_program(layers, |_| Value::Null, || false, EvalOptions::default());
        assert_eq!(results.len(), 2);
        assert!(results.iter().any(|(id, r)| id.to_string() == "good" && r.is_ok()));
        assert!(results.iter().any(|(id, r)| id.to_string() == "bad" && r.is_err()));
    }
}
