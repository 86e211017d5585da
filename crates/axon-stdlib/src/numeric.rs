//! Arithmetic stdlib callables (spec §4.2, §6.5).
//!
//! Every operator is strict and value-level typed: a wrong-tag argument
//! yields `null` rather than raising. Division by zero yields `0`; `mod`
//! follows sign-of-divisor semantics.

use axon_eval::{NativeFn, Value};

fn binary_numeric(f: impl Fn(f64, f64) -> f64 + 'static) -> NativeFn {
    NativeFn::new(2, move |args, _ctx| {
        Ok(match (args[0].as_number(), args[1].as_number()) {
            (Some(a), Some(b)) => Value::Number(f(a, b)),
            _ => Value::Null,
        })
    })
}

fn unary_numeric(f: impl Fn(f64) -> f64 + 'static) -> NativeFn {
    NativeFn::new(1, move |args, _ctx| {
        Ok(match args[0].as_number() {
            Some(a) => Value::Number(f(a)),
            None => Value::Null,
        })
    })
}

/// `mod(a, b)`: `((sign(b)·a mod |b|) + |b|) mod |b|`; `mod(·, 0) = 0`.
pub fn modulo(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        return 0.0;
    }
    let ab = b.abs();
    (((b.signum() * a) % ab) + ab) % ab
}

pub fn add() -> NativeFn {
    binary_numeric(|a, b| a + b)
}
pub fn sub() -> NativeFn {
    binary_numeric(|a, b| a - b)
}
pub fn mul() -> NativeFn {
    binary_numeric(|a, b| a * b)
}
pub fn div() -> NativeFn {
    binary_numeric(|a, b| if b == 0.0 { 0.0 } else { a / b })
}
pub fn pow() -> NativeFn {
    binary_numeric(f64::powf)
}
pub fn mod_() -> NativeFn {
    binary_numeric(modulo)
}
pub fn floor() -> NativeFn {
    unary_numeric(f64::floor)
}
pub fn ceil() -> NativeFn {
    unary_numeric(f64::ceil)
}
pub fn round() -> NativeFn {
    unary_numeric(f64::round)
}
pub fn trunc() -> NativeFn {
    unary_numeric(f64::trunc)
}
pub fn sign() -> NativeFn {
    unary_numeric(|a| if a == 0.0 { 0.0 } else { a.signum() })
}
pub fn abs() -> NativeFn {
    unary_numeric(f64::abs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mod_follows_sign_of_divisor() {
        assert_eq!(modulo(7.0, -4.0), 1.0);
    }

    #[test]
    fn mod_by_zero_is_zero() {
        assert_eq!(modulo(5.0, 0.0), 0.0);
    }

    #[test]
    fn divide_by_zero_is_zero() {
        let f = div();
        let result = f.apply(&[Value::Number(5.0), Value::Number(0.0)], &mut dummy_ctx()).unwrap();
        assert_eq!(result, Value::Number(0.0));
    }

    #[test]
    fn wrong_tag_yields_null() {
        let f = add();
        let result = f
            .apply(&[Value::Number(1.0), Value::string("x")], &mut dummy_ctx())
            .unwrap();
        assert_eq!(result, Value::Null);
    }

    fn dummy_ctx<'a>() -> axon_eval::EvalContext<'a> {
        axon_eval::EvalContext::new(vec![], || false, |_| Value::Null)
    }

    use axon_eval::Callable;
}
