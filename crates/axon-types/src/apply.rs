//! `apply(recv, args)` — function-type application, including the ad-hoc
//! polymorphic pattern-mapping dispatch of spec §4.1 "Function application
//! with mappings".

use crate::arena::{ErrorReason, TypeArena, TypeData, TypeId};
use crate::pattern::{Bindings, is_type_var, match_pattern};
use crate::reduce::reduce;
use crate::substitute::substitute;

pub fn apply(arena: &mut TypeArena, recv: TypeId, args: Vec<TypeId>) -> TypeId {
    stacker::maybe_grow(64 * 1024, 4 * 1024 * 1024, || apply_inner(arena, recv, args))
}

fn apply_inner(arena: &mut TypeArena, recv: TypeId, args: Vec<TypeId>) -> TypeId {
    if matches!(arena.get(recv), TypeData::Never) {
        return arena.never();
    }
    match arena.get(recv).clone() {
        TypeData::Null
        | TypeData::Bool
        | TypeData::Number
        | TypeData::String
        | TypeData::ArrayCtor
        | TypeData::Unresolved(..) => arena.applied(recv, args),
        TypeData::Function(mappings) => apply_function(arena, recv, &mappings, args),
        TypeData::Union(members) => {
            let results: Vec<TypeId> = members
                .iter()
                .map(|m| apply(arena, *m, args.clone()))
                .collect();
            arena.union(results)
        }
        TypeData::Error(_) => recv,
        // Applied / Conditional / Var receivers are not directly callable;
        // treat like an opaque stub awaiting further reduction.
        TypeData::Applied { .. } | TypeData::Conditional(_) | TypeData::Var(_, _) => {
            arena.applied(recv, args)
        }
        // Already handled by the early return above.
        TypeData::Never => unreachable!(),
    }
}

fn apply_function(
    arena: &mut TypeArena,
    recv: TypeId,
    mappings: &[crate::arena::Mapping],
    args: Vec<TypeId>,
) -> TypeId {
    let Some(first) = mappings.first() else {
        return arena.error(ErrorReason::Undefined);
    };
    let expected = first.patterns.len();
    if expected != args.len() {
        return arena.error(ErrorReason::ArityMismatch {
            expected,
            actual: args.len(),
        });
    }

    let mut saw_type_var = false;
    for mapping in mappings {
        let mut bindings: Bindings = Bindings::default();
        let mut ok = true;
        for (pattern, arg) in mapping.patterns.iter().zip(args.iter()) {
            match match_pattern(arena, pattern, *arg) {
                Some(found) => {
                    for (k, v) in found {
                        bindings
                            .entry(k)
                            .and_modify(|existing| *existing = arena.union(vec![*existing, v]))
                            .or_insert(v);
                    }
                }
                None => {
                    if is_type_var(arena, *arg) {
                        saw_type_var = true;
                    }
                    ok = false;
                    break;
                }
            }
        }
        if ok {
            let mut result = mapping.result;
            for (key, value) in bindings {
                result = substitute(arena, result, key, value);
            }
            let once = reduce(arena, result);
            return reduce(arena, once);
        }
    }

    if saw_type_var {
        arena.applied(recv, args)
    } else {
        arena.error(ErrorReason::Undefined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::{Mapping, Pattern, TypeData};

    fn identity_fn(arena: &mut TypeArena) -> TypeId {
        let v = arena.fresh_var("a");
        let key = if let TypeData::Var(id, _) = arena.get(v) {
            *id
        } else {
            unreachable!()
        };
        arena.function(vec![Mapping {
            bindings: vec![key],
            patterns: vec![Pattern::Var(key)],
            result: v,
        }])
    }

    #[test]
    fn identity_applies_to_any_concrete_type() {
        let mut arena = TypeArena::new();
        let id = identity_fn(&mut arena);
        let n = arena.number();
        let result = apply(&mut arena, id, vec![n]);
        assert_eq!(
            crate::signature::signature(&arena, result),
            crate::signature::signature(&arena, n)
        );
    }

    #[test]
    fn wrong_arity_is_an_error() {
        let mut arena = TypeArena::new();
        let id = identity_fn(&mut arena);
        let n = arena.number();
        let result = apply(&mut arena, id, vec![n, n]);
        assert!(matches!(arena.get(result), TypeData::Error(_)));
    }

    #[test]
    fn no_mapping_matches_is_undefined_error() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let s = arena.string();
        let mapping = Mapping {
            bindings: vec![],
            patterns: vec![Pattern::Primitive(n)],
            result: n,
        };
        let f = arena.function(vec![mapping]);
        let result = apply(&mut arena, f, vec![s]);
        assert!(matches!(arena.get(result), TypeData::Error(_)));
    }

    #[test]
    fn never_poisons_application() {
        let mut arena = TypeArena::new();
        let nv = arena.never();
        let n = arena.number();
        let result = apply(&mut arena, nv, vec![n]);
        assert!(matches!(arena.get(result), TypeData::Never));
    }
}
