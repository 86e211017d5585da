//! Analyzer context (spec §3.5): a node-identity cache, a lock map guarding
//! against infinite recursion, and the resolve map that ties unresolved
//! placeholders back to their eventual types.

use crate::report::AnalysisReport;
use axon_common::{Identifier, Path};
use axon_eval::Layer;
use axon_types::{ResolveMap, TypeArena, TypeId, UnresolvedId};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// Pointer identity of the layer a definition lives in, paired with its
/// key — stable across lookups, unlike a `(stack index, id)` pair, which
/// shifts as the stack grows and shrinks under nested function bodies.
pub type CacheKey = (usize, Identifier);

pub fn cache_key(layer: &Rc<Layer>, id: &Identifier) -> CacheKey {
    (Rc::as_ptr(layer) as *const () as usize, id.clone())
}

pub struct AnalyzeContext<'a> {
    pub arena: &'a mut TypeArena,
    pub stack: Vec<Rc<Layer>>,
    cache: FxHashMap<CacheKey, AnalysisReport>,
    locks: FxHashMap<CacheKey, (UnresolvedId, TypeId)>,
    resolve_map: ResolveMap,
    /// Synthetic function-parameter bindings: a parameter layer's entries
    /// carry a dummy `Definition::Bound(Value::Null)` (so normal lookup
    /// finds *something*), and the real type lives here instead.
    param_types: FxHashMap<CacheKey, TypeId>,
    /// Stack index at/above which identifiers are visible regardless of a
    /// leading `_`; below it, private parent-scope definitions are hidden
    /// from the current function body (spec §4.4 step 7 `f`).
    privacy_boundary: usize,
    /// Consulted once a name isn't found in any user layer — the
    /// standard library's call signatures (spec §4.2), keyed the same way
    /// as the value-level stdlib layer the evaluator stacks underneath.
    stdlib_types: FxHashMap<Identifier, TypeId>,
    form_value_types: Box<dyn Fn(&str) -> Option<TypeId> + 'a>,
    pub path: Path,
}

impl<'a> AnalyzeContext<'a> {
    pub fn new(
        arena: &'a mut TypeArena,
        stack: Vec<Rc<Layer>>,
        stdlib_types: FxHashMap<Identifier, TypeId>,
        form_value_types: impl Fn(&str) -> Option<TypeId> + 'a,
    ) -> Self {
        AnalyzeContext {
            arena,
            stack,
            cache: FxHashMap::default(),
            locks: FxHashMap::default(),
            resolve_map: ResolveMap::default(),
            param_types: FxHashMap::default(),
            privacy_boundary: 0,
            stdlib_types,
            form_value_types: Box::new(form_value_types),
            path: Path::new(),
        }
    }

    pub fn stdlib_type(&self, id: &Identifier) -> Option<TypeId> {
        self.stdlib_types.get(id).copied()
    }

    pub fn form_value_type(&self, name: &str) -> Option<TypeId> {
        (self.form_value_types)(name)
    }

    pub fn cache_get(&self, key: &CacheKey) -> Option<AnalysisReport> {
        self.cache.get(key).cloned()
    }

    pub fn cache_put(&mut self, key: CacheKey, report: AnalysisReport) {
        self.cache.insert(key, report);
    }

    /// `true` if `idx` is hidden from the current (possibly nested)
    /// function-body scope because it sits below the privacy boundary and
    /// the looked-up identifier is private.
    pub fn is_hidden(&self, idx: usize, id: &Identifier) -> bool {
        idx < self.privacy_boundary && id.is_private()
    }

    pub fn set_param_type(&mut self, key: CacheKey, ty: TypeId) {
        self.param_types.insert(key, ty);
    }

    pub fn param_type(&self, key: &CacheKey) -> Option<TypeId> {
        self.param_types.get(key).copied()
    }

    /// Locks `key` for the duration of `f`, returning the unresolved
    /// placeholder from `f`'s perspective if `key` was already locked
    /// (recursive reference), otherwise running `f` and unlocking
    /// afterwards regardless of outcome.
    pub fn with_lock<T>(&mut self, key: CacheKey, name: &str, f: impl FnOnce(&mut Self, TypeId) -> T) -> T
    where
        T: LockOutcome,
    {
        if let Some((_, ty)) = self.locks.get(&key) {
            return T::recursive(*ty);
        }
        let (unresolved_id, ty) = self.arena.fresh_unresolved(name);
        self.locks.insert(key.clone(), (unresolved_id, ty));
        let result = f(self, ty);
        self.locks.remove(&key);
        if let Some(final_ty) = result.resolved_type() {
            self.resolve_map.insert(unresolved_id, final_ty);
        }
        result
    }

    /// Runs `f` with the privacy boundary set to the stack's current depth
    /// (everything pushed by `f` itself stays visible; everything below
    /// the boundary gets private-filtered), restoring the previous
    /// boundary afterwards.
    pub fn with_privacy_boundary<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let previous = self.privacy_boundary;
        self.privacy_boundary = self.stack.len();
        let result = f(self);
        self.privacy_boundary = previous;
        result
    }

    pub fn resolve_map(&self) -> &ResolveMap {
        &self.resolve_map
    }
}

/// Lets [`AnalyzeContext::with_lock`] serve both the `Result`-returning
/// analysis path and a plain-value one, giving back the locked type on a
/// recursive hit either way.
pub trait LockOutcome {
    fn recursive(ty: TypeId) -> Self;
    /// The type to record in the resolve map once `f` completes, or
    /// `None` if `f` failed and nothing should be recorded.
    fn resolved_type(&self) -> Option<TypeId>;
}

impl LockOutcome for crate::report::AnalyzeResult {
    fn recursive(ty: TypeId) -> Self {
        Ok(AnalysisReport::bare(ty))
    }

    fn resolved_type(&self) -> Option<TypeId> {
        self.as_ref().ok().map(|r| r.ty)
    }
}
