//! `match(pattern, t)` — pattern matching against a single argument type
//! (spec §4.1).

use crate::arena::{Pattern, TypeArena, TypeData, TypeId, VarId};
use crate::signature::signature;
use rustc_hash::FxHashMap;

pub type Bindings = FxHashMap<VarId, TypeId>;

/// Attempts to match `pattern` against `t`. Returns the variable bindings
/// produced on success, `None` on failure.
///
/// On a union `t`, every member is matched independently; if at least one
/// member matches, the binding maps of the successful members are merged
/// (per-key union of the bound types) and returned (spec §4.1 `match`).
pub fn match_pattern(arena: &mut TypeArena, pattern: &Pattern, t: TypeId) -> Option<Bindings> {
    if let TypeData::Union(members) = arena.get(t).clone() {
        let mut merged: Option<Bindings> = None;
        for m in members {
            if let Some(b) = match_pattern(arena, pattern, m) {
                merged = Some(match merged {
                    None => b,
                    Some(existing) => merge_bindings(arena, existing, b),
                });
            }
        }
        return merged;
    }

    match pattern {
        Pattern::Primitive(expected) => {
            if signature(arena, *expected) == signature(arena, t) {
                Some(Bindings::default())
            } else {
                None
            }
        }
        Pattern::Applied { head, args } => {
            let TypeData::Applied {
                receiver,
                args: actual_args,
            } = arena.get(t).clone()
            else {
                return None;
            };
            if signature(arena, *head) != signature(arena, receiver) {
                return None;
            }
            if args.len() != actual_args.len() {
                return None;
            }
            let mut bindings = Bindings::default();
            for (sub_pattern, actual) in args.iter().zip(actual_args.iter()) {
                let sub = match_pattern(arena, sub_pattern, *actual)?;
                bindings = merge_bindings(arena, bindings, sub);
            }
            Some(bindings)
        }
        Pattern::Function { arity, bind } => {
            let TypeData::Function(mappings) = arena.get(t) else {
                return None;
            };
            let actual_arity = mappings.first().map(|m| m.patterns.len()).unwrap_or(0);
            if actual_arity != *arity {
                return None;
            }
            let mut bindings = Bindings::default();
            bindings.insert(*bind, t);
            Some(bindings)
        }
        Pattern::Var(v) => {
            let mut bindings = Bindings::default();
            bindings.insert(*v, t);
            Some(bindings)
        }
    }
}

fn merge_bindings(arena: &mut TypeArena, mut a: Bindings, b: Bindings) -> Bindings {
    for (k, v) in b {
        a.entry(k)
            .and_modify(|existing| *existing = arena.union(vec![*existing, v]))
            .or_insert(v);
    }
    a
}

/// `true` if `t` is itself a bare type variable — used by `apply` to
/// distinguish "this mapping doesn't apply" from "this argument is still
/// unconstrained" (spec §4.1 step 3).
pub fn is_type_var(arena: &TypeArena, t: TypeId) -> bool {
    matches!(arena.get(t), TypeData::Var(..))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::TypeArena;

    #[test]
    fn var_pattern_matches_anything() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let v = arena.fresh_var("bind_target");
        let bind = if let TypeData::Var(id, _) = arena.get(v) {
            *id
        } else {
            unreachable!()
        };
        let bindings = match_pattern(&mut arena, &Pattern::Var(bind), n).unwrap();
        assert_eq!(bindings.get(&bind).copied(), Some(n));
    }

    #[test]
    fn primitive_pattern_requires_equality() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let s = arena.string();
        assert!(match_pattern(&mut arena, &Pattern::Primitive(n), n).is_some());
        assert!(match_pattern(&mut arena, &Pattern::Primitive(n), s).is_none());
    }

    #[test]
    fn union_match_merges_successful_members() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let s = arena.string();
        let u = arena.union(vec![n, s]);
        assert!(match_pattern(&mut arena, &Pattern::Primitive(n), u).is_some());
        let b = arena.bool_();
        assert!(match_pattern(&mut arena, &Pattern::Primitive(b), u).is_none());
    }
}
