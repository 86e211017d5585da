//! The resolve-map post-pass for recursive definitions (spec §4.1
//! "Unresolved types", §9): once an outer analysis finishes with a final
//! type `T` for a lock that produced an `unresolved` placeholder, every
//! occurrence of that placeholder is replaced by `T` and the result is
//! reduced. If `T` itself still mentions the same placeholder (the
//! definition never actually terminates), the placeholder is replaced by
//! `never` instead, which is what later makes `doesHalt` report `None`.

use crate::arena::{Branch, Mapping, TypeArena, TypeData, TypeId, UnresolvedId};
use crate::reduce::reduce;
use rustc_hash::FxHashMap;

pub type ResolveMap = FxHashMap<UnresolvedId, TypeId>;

pub fn resolve_all(arena: &mut TypeArena, t: TypeId, map: &ResolveMap) -> TypeId {
    let mut out = t;
    for (&id, &value) in map {
        let grounded = if contains_unresolved(arena, value, id) {
            let never = arena.never();
            substitute_unresolved(arena, value, id, never)
        } else {
            value
        };
        out = substitute_unresolved(arena, out, id, grounded);
    }
    let once = reduce(arena, out);
    reduce(arena, once)
}

fn contains_unresolved(arena: &TypeArena, t: TypeId, id: UnresolvedId) -> bool {
    match arena.get(t) {
        TypeData::Unresolved(found, _) => *found == id,
        TypeData::Union(members) => members.iter().any(|m| contains_unresolved(arena, *m, id)),
        TypeData::Applied { receiver, args } => {
            contains_unresolved(arena, *receiver, id)
                || args.iter().any(|a| contains_unresolved(arena, *a, id))
        }
        TypeData::Function(mappings) => {
            mappings.iter().any(|m| contains_unresolved(arena, m.result, id))
        }
        TypeData::Conditional(branches) => {
            branches.iter().any(|b| contains_unresolved(arena, b.result, id))
        }
        _ => false,
    }
}

fn substitute_unresolved(arena: &mut TypeArena, t: TypeId, key: UnresolvedId, value: TypeId) -> TypeId {
    match arena.get(t).clone() {
        TypeData::Unresolved(found, _) if found == key => value,
        TypeData::Never
        | TypeData::Null
        | TypeData::Bool
        | TypeData::Number
        | TypeData::String
        | TypeData::ArrayCtor
        | TypeData::Var(..)
        | TypeData::Unresolved(..)
        | TypeData::Error(_) => t,
        TypeData::Union(members) => {
            let new_members = members
                .iter()
                .map(|m| substitute_unresolved(arena, *m, key, value))
                .collect();
            arena.union(new_members)
        }
        TypeData::Applied { receiver, args } => {
            let new_receiver = substitute_unresolved(arena, receiver, key, value);
            let new_args = args
                .iter()
                .map(|a| substitute_unresolved(arena, *a, key, value))
                .collect();
            arena.applied(new_receiver, new_args)
        }
        TypeData::Function(mappings) => {
            let new_mappings = mappings
                .into_iter()
                .map(|m| Mapping {
                    bindings: m.bindings,
                    patterns: m.patterns,
                    result: substitute_unresolved(arena, m.result, key, value),
                })
                .collect();
            arena.function(new_mappings)
        }
        TypeData::Conditional(branches) => {
            let new_branches = branches
                .into_iter()
                .map(|b| Branch {
                    predicates: b.predicates,
                    result: substitute_unresolved(arena, b.result, key, value),
                })
                .collect();
            arena.conditional(new_branches)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::does_halt;
    use crate::signature::signature;

    #[test]
    fn resolves_to_final_type() {
        let mut arena = TypeArena::new();
        let (id, placeholder) = arena.fresh_unresolved("r");
        let n = arena.number();
        let mut map = ResolveMap::default();
        map.insert(id, n);
        let resolved = resolve_all(&mut arena, placeholder, &map);
        assert_eq!(signature(&arena, resolved), "number");
    }

    #[test]
    fn self_referential_definition_yields_never_and_uncertain_halt() {
        let mut arena = TypeArena::new();
        let (id, placeholder) = arena.fresh_unresolved("r");
        // r = r: the final type for the lock is the placeholder itself.
        let mut map = ResolveMap::default();
        map.insert(id, placeholder);
        let resolved = resolve_all(&mut arena, placeholder, &map);
        assert_eq!(signature(&arena, resolved), "never");
        assert_eq!(does_halt(&arena, resolved), Some(false));
    }
}
