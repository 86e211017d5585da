//! Assembles the stdlib definition layer (spec §6.5) that every evaluation
//! stacks beneath user layers.

use crate::{compare, date, format, logic, numeric, sequence, timestamp};
use axon_common::Identifier;
use axon_eval::{Definition, Layer, Value};
use std::rc::Rc;

fn bind(layer: &mut Layer, name: &str, value: Value) {
    layer.insert(Identifier::name(name), Definition::Bound(value));
}

fn native(f: axon_eval::NativeFn) -> Value {
    Value::Callable(Rc::new(f))
}

/// Builds a fresh stdlib layer. Cheap enough to call per evaluation; the
/// layer holds no mutable state of its own (host extensions live in
/// [`crate::extensions`]).
pub fn stdlib_layer() -> Rc<Layer> {
    let mut layer = Layer::new();

    bind(&mut layer, "+", native(numeric::add()));
    bind(&mut layer, "-", native(numeric::sub()));
    bind(&mut layer, "*", native(numeric::mul()));
    bind(&mut layer, "/", native(numeric::div()));
    bind(&mut layer, "^", native(numeric::pow()));
    bind(&mut layer, "mod", native(numeric::mod_()));
    bind(&mut layer, "floor", native(numeric::floor()));
    bind(&mut layer, "ceil", native(numeric::ceil()));
    bind(&mut layer, "round", native(numeric::round()));
    bind(&mut layer, "trunc", native(numeric::trunc()));
    bind(&mut layer, "sign", native(numeric::sign()));
    bind(&mut layer, "abs", native(numeric::abs()));

    bind(&mut layer, "==", native(compare::eq()));
    bind(&mut layer, "!=", native(compare::neq()));
    bind(&mut layer, ">", native(compare::gt()));
    bind(&mut layer, "<", native(compare::lt()));
    bind(&mut layer, ">=", native(compare::gte()));
    bind(&mut layer, "<=", native(compare::lte()));

    bind(&mut layer, "and", native(logic::and()));
    bind(&mut layer, "or", native(logic::or()));
    bind(&mut layer, "not", native(logic::not()));
    bind(&mut layer, "xor", native(logic::xor()));
    bind(&mut layer, "if", native(logic::if_()));
    bind(&mut layer, "id", native(logic::id()));

    bind(&mut layer, "++", native(sequence::concat()));
    bind(&mut layer, "cat", native(sequence::concat()));
    bind(&mut layer, "map", native(sequence::map()));
    bind(&mut layer, "flat_map", native(sequence::flat_map()));
    bind(&mut layer, "fold", native(sequence::fold()));
    bind(&mut layer, "fold1", native(sequence::fold1()));
    bind(&mut layer, "filter", native(sequence::filter()));
    bind(&mut layer, "index", native(sequence::index()));
    bind(&mut layer, "find_index", native(sequence::find_index()));
    bind(&mut layer, "length", native(sequence::length()));
    bind(&mut layer, "contains", native(sequence::contains()));
    bind(&mut layer, "head", native(sequence::head()));
    bind(&mut layer, "tail", native(sequence::tail()));
    bind(&mut layer, "sort", native(sequence::sort()));
    bind(&mut layer, "sum", native(sequence::sum()));
    bind(&mut layer, "min", native(sequence::min()));
    bind(&mut layer, "max", native(sequence::max()));
    bind(&mut layer, "avg", native(sequence::avg()));
    bind(&mut layer, "med", native(sequence::med()));

    bind(&mut layer, "date_today", native(date::date_today()));
    bind(&mut layer, "date_add", native(date::date_add()));
    bind(&mut layer, "date_sub", native(date::date_sub()));
    bind(&mut layer, "date_fmt", native(date::date_fmt()));
    bind(&mut layer, "date_get", native(date::date_get()));
    bind(&mut layer, "date_set", native(date::date_set()));

    bind(&mut layer, "ts_now", native(timestamp::ts_now()));
    bind(&mut layer, "tz_utc", native(timestamp::tz_utc()));
    bind(&mut layer, "tz_local", native(timestamp::tz_local()));
    bind(&mut layer, "ts_from_unix", native(timestamp::ts_from_unix()));
    bind(&mut layer, "ts_to_unix", native(timestamp::ts_to_unix()));
    bind(&mut layer, "ts_from_date", native(timestamp::ts_from_date()));
    bind(&mut layer, "ts_to_date", native(timestamp::ts_to_date()));
    bind(&mut layer, "ts_parse", native(timestamp::ts_parse()));
    bind(&mut layer, "ts_to_string", native(timestamp::ts_to_string()));
    bind(&mut layer, "ts_fmt", native(timestamp::ts_fmt()));
    bind(&mut layer, "ts_add", native(timestamp::ts_add()));
    bind(&mut layer, "ts_sub", native(timestamp::ts_sub()));
    bind(&mut layer, "ts_get", native(timestamp::ts_get()));
    bind(&mut layer, "ts_set", native(timestamp::ts_set()));

    bind(&mut layer, "currency_fmt", native(format::currency_fmt()));
    bind(&mut layer, "country_fmt", native(format::country_fmt()));
    bind(&mut layer, "phone_fmt", native(format::phone_fmt()));

    Rc::new(layer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_every_advertised_name_exactly_once() {
        let layer = stdlib_layer();
        assert_eq!(layer.get(&Identifier::name("+")).is_some(), true);
        assert_eq!(layer.get(&Identifier::name("ts_set")).is_some(), true);
        assert_eq!(layer.get(&Identifier::name("currency_fmt")).is_some(), true);
        assert_eq!(layer.len(), layer.keys().collect::<std::collections::HashSet<_>>().len());
    }
}
