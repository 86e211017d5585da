//! Sequence stdlib callables (spec §4.2, §6.5).
//!
//! These act uniformly over arrays and strings: a string is decomposed into
//! one-character-string elements and the result is rejoined into a string
//! when every output element is still a single-character string, otherwise
//! the result becomes an array. A non-iterable argument to a unary mapping
//! operation is treated as a singleton sequence so the operator stays
//! total.

use axon_eval::{Callable, EvalContext, EvalError, NativeFn, Value};
use std::rc::Rc;

fn to_seq(v: &Value) -> (Vec<Value>, bool) {
    match v {
        Value::Array(items) => (items.as_ref().clone(), false),
        Value::String(s) => (s.chars().map(|c| Value::string(c.to_string())).collect(), true),
        other => (vec![other.clone()], false),
    }
}

fn from_seq(elements: Vec<Value>, was_string: bool) -> Value {
    if was_string
        && elements
            .iter()
            .all(|e| matches!(e, Value::String(s) if s.chars().count() == 1))
    {
        let joined: String = elements
            .iter()
            .map(|e| match e {
                Value::String(s) => s.as_ref(),
                _ => unreachable!(),
            })
            .collect();
        Value::string(joined)
    } else {
        Value::array(elements)
    }
}

fn call(f: &Value, args: &[Value], ctx: &mut EvalContext) -> Result<Value, EvalError> {
    match f {
        Value::Callable(c) => c.apply(args, ctx),
        _ => Ok(Value::Null),
    }
}

/// `++(a, b)`: concatenation; stays a string only if both operands were
/// strings.
pub fn concat() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        let (mut a, a_str) = to_seq(&args[0]);
        let (mut b, b_str) = to_seq(&args[1]);
        a.append(&mut b);
        Ok(from_seq(a, a_str && b_str))
    })
}

pub fn map() -> NativeFn {
    NativeFn::new(2, |args, ctx| {
        let (elements, was_string) = to_seq(&args[1]);
        let mut mapped = Vec::with_capacity(elements.len());
        for e in elements {
            mapped.push(call(&args[0], &[e], ctx)?);
        }
        Ok(from_seq(mapped, was_string))
    })
}

pub fn flat_map() -> NativeFn {
    NativeFn::new(2, |args, ctx| {
        let (elements, was_string) = to_seq(&args[1]);
        let mut mapped = Vec::new();
        for e in elements {
            let r = call(&args[0], &[e], ctx)?;
            mapped.extend(to_seq(&r).0);
        }
        Ok(from_seq(mapped, was_string))
    })
}

pub fn fold() -> NativeFn {
    NativeFn::new(3, |args, ctx| {
        let (elements, _) = to_seq(&args[2]);
        let mut acc = args[1].clone();
        for e in elements {
            acc = call(&args[0], &[acc, e], ctx)?;
        }
        Ok(acc)
    })
}

pub fn fold1() -> NativeFn {
    NativeFn::new(2, |args, ctx| {
        let (elements, _) = to_seq(&args[1]);
        let mut iter = elements.into_iter();
        let Some(mut acc) = iter.next() else {
            return Ok(Value::Null);
        };
        for e in iter {
            acc = call(&args[0], &[acc, e], ctx)?;
        }
        Ok(acc)
    })
}

pub fn filter() -> NativeFn {
    NativeFn::new(2, |args, ctx| {
        let (elements, was_string) = to_seq(&args[1]);
        let mut kept = Vec::new();
        for e in elements {
            if call(&args[0], &[e.clone()], ctx)?.is_truthy_true() {
                kept.push(e);
            }
        }
        Ok(from_seq(kept, was_string))
    })
}

pub fn index() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        let (elements, _) = to_seq(&args[0]);
        let idx = args[1].as_number().unwrap_or(-1.0);
        if idx < 0.0 {
            return Ok(Value::Null);
        }
        Ok(elements.get(idx as usize).cloned().unwrap_or(Value::Null))
    })
}

pub fn find_index() -> NativeFn {
    NativeFn::new(2, |args, ctx| {
        let (elements, _) = to_seq(&args[1]);
        for (i, e) in elements.into_iter().enumerate() {
            if call(&args[0], &[e], ctx)?.is_truthy_true() {
                return Ok(Value::Number(i as f64));
            }
        }
        Ok(Value::Null)
    })
}

pub fn length() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        let (elements, _) = to_seq(&args[0]);
        Ok(Value::Number(elements.len() as f64))
    })
}

pub fn contains() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        let (elements, _) = to_seq(&args[0]);
        Ok(Value::Bool(elements.iter().any(|e| *e == args[1])))
    })
}

pub fn head() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        let (elements, _) = to_seq(&args[0]);
        Ok(elements.into_iter().next().unwrap_or(Value::Null))
    })
}

pub fn tail() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        let (elements, was_string) = to_seq(&args[0]);
        let rest = if elements.is_empty() { vec![] } else { elements[1..].to_vec() };
        Ok(from_seq(rest, was_string))
    })
}

fn compare_values(a: &Value, b: &Value) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

pub fn sort() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        let (mut elements, was_string) = to_seq(&args[0]);
        elements.sort_by(compare_values);
        Ok(from_seq(elements, was_string))
    })
}

fn numbers_of(v: &Value) -> Vec<f64> {
    to_seq(v).0.iter().filter_map(|e| e.as_number()).collect()
}

pub fn sum() -> NativeFn {
    NativeFn::new(1, |args, _ctx| Ok(Value::Number(numbers_of(&args[0]).iter().sum())))
}

pub fn min() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        Ok(numbers_of(&args[0])
            .into_iter()
            .fold(None, |acc: Option<f64>, n| Some(acc.map_or(n, |a| a.min(n))))
            .map(Value::Number)
            .unwrap_or(Value::Null))
    })
}

pub fn max() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        Ok(numbers_of(&args[0])
            .into_iter()
            .fold(None, |acc: Option<f64>, n| Some(acc.map_or(n, |a| a.max(n))))
            .map(Value::Number)
            .unwrap_or(Value::Null))
    })
}

pub fn avg() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        let nums = numbers_of(&args[0]);
        if nums.is_empty() {
            Ok(Value::Null)
        } else {
            Ok(Value::Number(nums.iter().sum::<f64>() / nums.len() as f64))
        }
    })
}

pub fn med() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        let mut nums = numbers_of(&args[0]);
        if nums.is_empty() {
            return Ok(Value::Null);
        }
        nums.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = nums.len() / 2;
        let median = if nums.len() % 2 == 0 {
            (nums[mid - 1] + nums[mid]) / 2.0
        } else {
            nums[mid]
        };
        Ok(Value::Number(median))
    })
}
