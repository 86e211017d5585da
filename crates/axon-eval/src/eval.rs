//! The evaluator (spec §4.3): a lazily-scoped, cached, curry-friendly
//! reducer over the definition graph.

use crate::callable::UserFunction;
use crate::context::EvalContext;
use crate::def::{Definition, Layer, Literal, SwitchCase};
use crate::error::EvalError;
use crate::value::Value;
use axon_common::Identifier;
use std::rc::Rc;

/// Knobs that don't affect evaluation semantics (spec §6.2 `options.debug`).
#[derive(Default, Clone, Copy)]
pub struct EvalOptions {
    pub debug: bool,
}

/// `evaluate(layers, id, getFormValue, options) → value` (spec §6.2).
/// `layers` is the caller's full stack, stdlib already layered at the
/// bottom — building that layering is the host's job (spec §2 "Both begin
/// by layering the stdlib under the user definitions").
pub fn evaluate<'a>(
    layers: Vec<Rc<Layer>>,
    id: Identifier,
    get_form_value: impl Fn(&str) -> Value + 'a,
    should_halt: impl Fn() -> bool + 'a,
    options: EvalOptions,
) -> Result<Value, EvalError> {
    if options.debug {
        tracing::debug!(%id, layers = layers.len(), "evaluate: entry");
    }
    let mut ctx = EvalContext::new(layers, should_halt, get_form_value);
    let ceiling = ctx.stack.len().saturating_sub(1);
    eval_identifier(&mut ctx, &id, ceiling)
}

pub(crate) fn eval_identifier(
    ctx: &mut EvalContext,
    id: &Identifier,
    ceiling: usize,
) -> Result<Value, EvalError> {
    stacker::maybe_grow(64 * 1024, 1024 * 1024, || {
        eval_identifier_inner(ctx, id, ceiling)
    })
}

fn eval_identifier_inner(
    ctx: &mut EvalContext,
    id: &Identifier,
    ceiling: usize,
) -> Result<Value, EvalError> {
    ctx.check_halt()?;

    if id.is_form_value() {
        let name = id.as_str().unwrap_or_default().trim_start_matches('@');
        return Ok(ctx.form_value(name));
    }

    let (layer, found_at, def) = lookup(ctx, id, ceiling)?;
    if let Some(cached) = ctx.cache_get(&layer, id) {
        return Ok(cached);
    }
    let value = eval_definition(ctx, &def, found_at)?;
    ctx.cache_put(&layer, id, value.clone());
    Ok(value)
}

fn lookup(
    ctx: &EvalContext,
    id: &Identifier,
    ceiling: usize,
) -> Result<(Rc<Layer>, usize, Definition), EvalError> {
    for idx in (0..=ceiling).rev() {
        if let Some(def) = ctx.stack[idx].get(id) {
            return Ok((ctx.stack[idx].clone(), idx, def.clone()));
        }
    }
    Err(EvalError::UndefinedIdentifier(id.clone()))
}

fn eval_definition(
    ctx: &mut EvalContext,
    def: &Definition,
    ceiling: usize,
) -> Result<Value, EvalError> {
    match def {
        Definition::Bound(v) => Ok(v.clone()),
        Definition::Null => Ok(Value::Null),
        Definition::Bool { v } => Ok(Value::Bool(*v)),
        Definition::Number { v } => {
            if axon_common::numeric::is_finite_number(*v) {
                Ok(Value::Number(*v))
            } else {
                Err(EvalError::InvalidFormat)
            }
        }
        Definition::Str { v } => Ok(Value::string(v.clone())),
        Definition::InlineArray { v } => Ok(Value::array(literal_values(v))),
        Definition::RefList { v } => {
            let items = v
                .iter()
                .map(|elem| eval_identifier(ctx, elem, ceiling))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::array(items))
        }
        Definition::Call { f, a } => eval_call(ctx, f, a, ceiling),
        Definition::Function { p, b } => {
            let closure_stack = Rc::new(ctx.stack[0..=ceiling].to_vec());
            Ok(Value::Callable(Rc::new(UserFunction {
                params: p.clone(),
                body: b.clone(),
                closure_stack,
            })))
        }
        Definition::Switch { m } => eval_switch(ctx, m, ceiling),
    }
}

fn literal_values(literals: &[Literal]) -> Vec<Value> {
    literals.iter().map(literal_value).collect()
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::string(s.clone()),
        Literal::Array(items) => Value::array(literal_values(items)),
    }
}

fn eval_call(
    ctx: &mut EvalContext,
    f: &Identifier,
    a: &[Identifier],
    ceiling: usize,
) -> Result<Value, EvalError> {
    let callee = eval_identifier(ctx, f, ceiling)?;
    let args = a
        .iter()
        .map(|arg| eval_identifier(ctx, arg, ceiling))
        .collect::<Result<Vec<_>, _>>()?;

    match &callee {
        Value::Callable(c) => {
            if c.arity() != args.len() {
                return Err(EvalError::ArityMismatch {
                    expected: c.arity(),
                    actual: args.len(),
                });
            }
            c.apply(&args, ctx)
        }
        _ if args.is_empty() => Ok(callee),
        _ => Err(EvalError::ArityMismatch {
            expected: 0,
            actual: args.len(),
        }),
    }
}

fn eval_switch(
    ctx: &mut EvalContext,
    cases: &[SwitchCase],
    ceiling: usize,
) -> Result<Value, EvalError> {
    for case in cases {
        let selected = match &case.c {
            Some(cond_id) => eval_identifier(ctx, cond_id, ceiling)?.is_truthy_true(),
            None => true,
        };
        if selected {
            return eval_identifier(ctx, &case.v, ceiling);
        }
    }
    Ok(Value::Null)
}

/// Entry point for [`UserFunction::apply`] (spec §4.3 "Function (`f`)").
pub(crate) fn apply_user_function(
    ctx: &mut EvalContext,
    func: &UserFunction,
    args: &[Value],
) -> Result<Value, EvalError> {
    let saved_stack = std::mem::replace(&mut ctx.stack, (*func.closure_stack).clone());

    let mut param_layer: Layer = Layer::new();
    for (name, value) in func.params.iter().zip(args.iter()) {
        param_layer.insert(name.clone(), Definition::Bound(value.clone()));
    }
    ctx.stack.push(Rc::new(param_layer));
    ctx.stack.push(func.body.clone());
    ctx.push_cache_scope();

    let ceiling = ctx.stack.len() - 1;
    let entry = Identifier::from("=");
    let result = eval_identifier(ctx, &entry, ceiling);

    ctx.pop_cache_scope();
    ctx.stack = saved_stack;
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::Layer;

    fn layer(entries: Vec<(&str, Definition)>) -> Rc<Layer> {
        let mut l = Layer::new();
        for (k, v) in entries {
            l.insert(Identifier::from(k), v);
        }
        Rc::new(l)
    }

    fn run(layers: Vec<Rc<Layer>>, id: &str) -> Result<Value, EvalError> {
        evaluate(
            layers,
            Identifier::from(id),
            |_| Value::Null,
            || false,
            EvalOptions::default(),
        )
    }

    #[test]
    fn literal_number_evaluates_to_itself() {
        let layers = vec![layer(vec![("a", Definition::Number { v: 2.0 })])];
        assert_eq!(run(layers, "a").unwrap(), Value::Number(2.0));
    }

    #[test]
    fn call_on_non_callable_with_args_fails() {
        // {a:{t:"n",v:2}, b:{t:"c",f:"a"}, c:{t:"c",f:"b",a:["a"]}}
        let layers = vec![layer(vec![
            ("a", Definition::Number { v: 2.0 }),
            ("b", Definition::Call { f: Identifier::from("a"), a: vec![] }),
            (
                "c",
                Definition::Call {
                    f: Identifier::from("b"),
                    a: vec![Identifier::from("a")],
                },
            ),
        ])];
        assert_eq!(run(layers.clone(), "a").unwrap(), Value::Number(2.0));
        assert_eq!(run(layers.clone(), "b").unwrap(), Value::Number(2.0));
        assert!(run(layers, "c").is_err());
    }

    #[test]
    fn switch_with_no_matching_case_is_null() {
        let layers = vec![layer(vec![
            ("x", Definition::Switch { m: vec![SwitchCase { c: Some(Identifier::from("t1")), v: Identifier::from("v1") }] }),
            ("t1", Definition::Bool { v: false }),
            ("v1", Definition::Number { v: 1.0 }),
        ])];
        assert_eq!(run(layers, "x").unwrap(), Value::Null);
    }

    #[test]
    fn switch_default_case_with_no_condition_wins() {
        let layers = vec![layer(vec![
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
        ])];
        assert_eq!(run(layers, "x").unwrap(), Value::Number(2.0));
    }

    #[test]
    fn recursive_definition_does_not_evaluate() {
        // r = r should not be evaluated by the test harness; this merely
        // checks that a self-referential lookup still terminates via the
        // halt predicate rather than overflowing the stack.
        let layers = vec![layer(vec![(
            "r",
            Definition::Call { f: Identifier::from("r"), a: vec![] },
        )])];
        let calls = std::cell::Cell::new(0u32);
        let result = evaluate(
            layers,
            Identifier::from("r"),
            |_| Value::Null,
            || {
                calls.set(calls.get() + 1);
                calls.get() > 1000
            },
            EvalOptions::default(),
        );
        assert!(result.is_err());
    }
}
