//! `reduce(t)` — one pass of normalization (spec §4.1 `reduce`).
//!
//! Composite types reduce their children; function types reduce each
//! mapping's result; applied types reduce receiver and arguments and then
//! re-apply; conditional types collapse tautological branches and flatten
//! nested conditionals into their parent.

use crate::apply::apply;
use crate::arena::{Branch, Mapping, TypeArena, TypeData, TypeId};

pub fn reduce(arena: &mut TypeArena, t: TypeId) -> TypeId {
    stacker::maybe_grow(64 * 1024, 4 * 1024 * 1024, || reduce_inner(arena, t))
}

fn reduce_inner(arena: &mut TypeArena, t: TypeId) -> TypeId {
    match arena.get(t).clone() {
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
            let reduced: Vec<TypeId> = members.iter().map(|m| reduce(arena, *m)).collect();
            arena.union(reduced)
        }
        TypeData::Applied { receiver, args } => {
            let receiver = reduce(arena, receiver);
            let args: Vec<TypeId> = args.iter().map(|a| reduce(arena, *a)).collect();
            match arena.get(receiver) {
                TypeData::Function(_) | TypeData::Union(_) => apply(arena, receiver, args),
                _ => arena.applied(receiver, args),
            }
        }
        TypeData::Function(mappings) => {
            let reduced: Vec<Mapping> = mappings
                .into_iter()
                .map(|m| Mapping {
                    bindings: m.bindings,
                    patterns: m.patterns,
                    result: reduce(arena, m.result),
                })
                .collect();
            arena.function(reduced)
        }
        TypeData::Conditional(branches) => reduce_conditional(arena, branches),
    }
}

fn reduce_conditional(arena: &mut TypeArena, branches: Vec<Branch>) -> TypeId {
    let mut flattened: Vec<Branch> = Vec::with_capacity(branches.len());
    for branch in branches {
        let result = reduce(arena, branch.result);
        if branch.predicates.is_empty() {
            // Tautology: every later branch is unreachable.
            return result;
        }
        match arena.get(result).clone() {
            TypeData::Conditional(inner) => {
                // Merge a nested conditional into the parent, prefixing the
                // outer predicates onto each inner branch.
                for inner_branch in inner {
                    let mut predicates = branch.predicates.clone();
                    predicates.extend(inner_branch.predicates);
                    flattened.push(Branch {
                        predicates,
                        result: inner_branch.result,
                    });
                }
            }
            _ => flattened.push(Branch {
                predicates: branch.predicates,
                result,
            }),
        }
    }
    if flattened.is_empty() {
        return arena.never();
    }
    arena.conditional(flattened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Pattern;
    use crate::signature::signature;

    #[test]
    fn reduce_is_idempotent_on_primitives() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let once = reduce(&mut arena, n);
        let twice = reduce(&mut arena, once);
        assert_eq!(signature(&arena, once), signature(&arena, twice));
    }

    #[test]
    fn reduce_flattens_unions_of_unions() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let s = arena.string();
        let inner = arena.union(vec![n, s]);
        let outer = arena.union(vec![inner, n]);
        let reduced = reduce(&mut arena, outer);
        assert_eq!(signature(&arena, reduced), signature(&arena, inner));
    }

    #[test]
    fn tautological_branch_collapses_conditional() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let s = arena.string();
        let cond = arena.conditional(vec![Branch {
            predicates: vec![],
            result: n,
        }]);
        let reduced = reduce(&mut arena, cond);
        assert_eq!(signature(&arena, reduced), signature(&arena, n));
        let _ = s;
    }

    #[test]
    fn applied_function_reduces_through_apply() {
        let mut arena = TypeArena::new();
        let v = arena.fresh_var("a");
        let key = if let TypeData::Var(id, _) = arena.get(v) {
            *id
        } else {
            unreachable!()
        };
        let f = arena.function(vec![Mapping {
            bindings: vec![key],
            patterns: vec![Pattern::Var(key)],
            result: v,
        }]);
        let n = arena.number();
        let applied = arena.applied(f, vec![n]);
        let reduced = reduce(&mut arena, applied);
        assert_eq!(signature(&arena, reduced), signature(&arena, n));
    }
}
