//! Boolean and control-flow stdlib callables (spec §6.5: `and or not xor`,
//! `if id`).

use axon_eval::{NativeFn, Value};

fn bool_or_false(v: &Value) -> bool {
    v.as_bool().unwrap_or(false)
}

pub fn and() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        Ok(Value::Bool(bool_or_false(&args[0]) && bool_or_false(&args[1])))
    })
}

pub fn or() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        Ok(Value::Bool(bool_or_false(&args[0]) || bool_or_false(&args[1])))
    })
}

pub fn not() -> NativeFn {
    NativeFn::new(1, |args, _ctx| Ok(Value::Bool(!bool_or_false(&args[0]))))
}

pub fn xor() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        Ok(Value::Bool(bool_or_false(&args[0]) ^ bool_or_false(&args[1])))
    })
}

/// `if(cond, then, else)`: a non-boolean condition is the "wrong tag" case
/// and yields `null`, same as every other value-level type mismatch.
pub fn if_() -> NativeFn {
    NativeFn::new(3, |args, _ctx| {
        Ok(match args[0].as_bool() {
            Some(true) => args[1].clone(),
            Some(false) => args[2].clone(),
            None => Value::Null,
        })
    })
}

pub fn id() -> NativeFn {
    NativeFn::new(1, |args, _ctx| Ok(args[0].clone()))
}
