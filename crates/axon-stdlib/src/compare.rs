//! Equality and ordering stdlib callables (spec §4.2).
//!
//! Equality is deep-structural over arrays and reference-identity for
//! callables; ordering compares strings lexicographically and numbers
//! numerically; type-mismatched comparisons yield `false`.

use axon_eval::{NativeFn, Value};

fn deep_eq(a: &Value, b: &Value) -> bool {
    a == b
}

pub fn eq() -> NativeFn {
    NativeFn::new(2, |args, _ctx| Ok(Value::Bool(deep_eq(&args[0], &args[1]))))
}

pub fn neq() -> NativeFn {
    NativeFn::new(2, |args, _ctx| Ok(Value::Bool(!deep_eq(&args[0], &args[1]))))
}

fn ordering_op(f: impl Fn(std::cmp::Ordering) -> bool + 'static) -> NativeFn {
    NativeFn::new(2, move |args, _ctx| {
        let result = match (&args[0], &args[1]) {
            (Value::Number(a), Value::Number(b)) => a.partial_cmp(b).map(&f),
            (Value::String(a), Value::String(b)) => Some(f(a.as_ref().cmp(b.as_ref()))),
            _ => None,
        };
        Ok(Value::Bool(result.unwrap_or(false)))
    })
}

pub fn gt() -> NativeFn {
    ordering_op(|o| o == std::cmp::Ordering::Greater)
}
pub fn lt() -> NativeFn {
    ordering_op(|o| o == std::cmp::Ordering::Less)
}
pub fn gte() -> NativeFn {
    ordering_op(|o| o != std::cmp::Ordering::Less)
}
pub fn lte() -> NativeFn {
    ordering_op(|o| o != std::cmp::Ordering::Greater)
}
