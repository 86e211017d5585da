//! Evaluation context: the definition stack, layered caches, and the two
//! host-supplied callbacks (spec §3.4).

use crate::def::Layer;
use crate::error::EvalError;
use crate::value::Value;
use axon_common::Identifier;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Cache key: a node is identified by the layer it lives in (by pointer
/// identity, since synthetic parameter layers are freshly allocated per
/// call) plus its name within that layer.
type CacheKey = (usize, Identifier);

pub struct EvalContext<'a> {
    pub stack: Vec<Rc<Layer>>,
    caches: Vec<FxHashMap<CacheKey, Value>>,
    should_halt: Box<dyn Fn() -> bool + 'a>,
    get_form_value: Box<dyn Fn(&str) -> Value + 'a>,
}

impl<'a> EvalContext<'a> {
    pub fn new(
        stack: Vec<Rc<Layer>>,
        should_halt: impl Fn() -> bool + 'a,
        get_form_value: impl Fn(&str) -> Value + 'a,
    ) -> Self {
        EvalContext {
            stack,
            caches: vec![FxHashMap::default()],
            should_halt: Box::new(should_halt),
            get_form_value: Box::new(get_form_value),
        }
    }

    pub fn check_halt(&self) -> Result<(), EvalError> {
        if (self.should_halt)() {
            Err(EvalError::Aborted)
        } else {
            Ok(())
        }
    }

    pub fn form_value(&self, name: &str) -> Value {
        (self.get_form_value)(name)
    }

    /// Pushes a fresh cache scope, matching lexical-scope entry into a
    /// function body (spec §4.3 "Caching rule").
    pub fn push_cache_scope(&mut self) {
        self.caches.push(FxHashMap::default());
    }

    pub fn pop_cache_scope(&mut self) {
        self.caches.pop();
    }

    fn cache_key(layer: &Rc<Layer>, id: &Identifier) -> CacheKey {
        (Rc::as_ptr(layer) as *const () as usize, id.clone())
    }

    /// Searches every open cache scope from innermost to outermost.
    pub fn cache_get(&self, layer: &Rc<Layer>, id: &Identifier) -> Option<Value> {
        let key = Self::cache_key(layer, id);
        self.caches.iter().rev().find_map(|c| c.get(&key).cloned())
    }

    /// Writes go to the innermost cache scope only.
    pub fn cache_put(&mut self, layer: &Rc<Layer>, id: &Identifier, value: Value) {
        let key = Self::cache_key(layer, id);
        if let Some(innermost) = self.caches.last_mut() {
            innermost.insert(key, value);
        }
    }
}
