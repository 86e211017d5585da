//! Formatter stdlib callables backed by host-injected extensions (spec
//! §6.4, §6.5: `currency_fmt`, `country_fmt`, `phone_fmt`).
//!
//! Each of these is `null` whenever the matching extension slot is unset,
//! or the argument falls outside what the slot/table recognizes.

use crate::currency;
use crate::extensions;
use axon_eval::{NativeFn, Value};

/// `currency_fmt(code, amount)`.
pub fn currency_fmt() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        let (Some(code), Some(amount)) = (args[0].as_str(), args[1].as_number()) else {
            return Ok(Value::Null);
        };
        let Some(minor_units) = currency::minor_units(code) else {
            return Ok(Value::Null);
        };
        Ok(extensions::format_currency(code, minor_units, amount)
            .map(Value::string)
            .unwrap_or(Value::Null))
    })
}

/// `country_fmt(code)`.
pub fn country_fmt() -> NativeFn {
    NativeFn::new(1, |args, _ctx| {
        let Some(code) = args[0].as_str() else {
            return Ok(Value::Null);
        };
        Ok(extensions::country_name(code).map(Value::string).unwrap_or(Value::Null))
    })
}

/// `phone_fmt(region, number)`.
pub fn phone_fmt() -> NativeFn {
    NativeFn::new(2, |args, _ctx| {
        let (Some(region), Some(number)) = (args[0].as_str(), args[1].as_str()) else {
            return Ok(Value::Null);
        };
        Ok(extensions::format_phone(region, number).map(Value::string).unwrap_or(Value::Null))
    })
}
