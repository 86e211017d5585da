//! `substitute(t, key, value)` — replace every occurrence of variable `key`
//! by `value` (spec §4.1). Function types block substitution whose key
//! shadows one of their own bound variables; this is what keeps nested
//! polymorphic stdlib functions from capturing each other's type
//! parameters (spec §9 "Function-type α-safety").

use crate::arena::{Branch, Mapping, Pattern, TypeArena, TypeData, VarId};
use crate::arena::TypeId;

pub fn substitute(arena: &mut TypeArena, t: TypeId, key: VarId, value: TypeId) -> TypeId {
    match arena.get(t).clone() {
        TypeData::Never
        | TypeData::Null
        | TypeData::Bool
        | TypeData::Number
        | TypeData::String
        | TypeData::ArrayCtor
        | TypeData::Unresolved(..)
        | TypeData::Error(_) => t,
        TypeData::Var(id, _) => {
            if id == key { value } else { t }
        }
        TypeData::Union(members) => {
            let new_members = members
                .iter()
                .map(|m| substitute(arena, *m, key, value))
                .collect();
            arena.union(new_members)
        }
        TypeData::Applied { receiver, args } => {
            let new_receiver = substitute(arena, receiver, key, value);
            let new_args = args
                .iter()
                .map(|a| substitute(arena, *a, key, value))
                .collect();
            arena.applied(new_receiver, new_args)
        }
        TypeData::Function(mappings) => {
            let new_mappings = mappings
                .into_iter()
                .map(|m| substitute_mapping(arena, m, key, value))
                .collect();
            arena.function(new_mappings)
        }
        TypeData::Conditional(branches) => {
            let new_branches = branches
                .into_iter()
                .map(|b| substitute_branch(arena, b, key, value))
                .collect();
            arena.conditional(new_branches)
        }
    }
}

fn substitute_mapping(arena: &mut TypeArena, m: Mapping, key: VarId, value: TypeId) -> Mapping {
    // alpha-safety: a mapping that itself binds `key` shadows it entirely.
    if m.bindings.contains(&key) {
        return m;
    }
    let patterns = m
        .patterns
        .into_iter()
        .map(|p| substitute_pattern(arena, p, key, value))
        .collect();
    let result = substitute(arena, m.result, key, value);
    Mapping {
        bindings: m.bindings,
        patterns,
        result,
    }
}

fn substitute_branch(arena: &mut TypeArena, b: Branch, key: VarId, value: TypeId) -> Branch {
    let predicates = b
        .predicates
        .into_iter()
        .map(|(v, p)| (v, substitute_pattern(arena, p, key, value)))
        .collect();
    let result = substitute(arena, b.result, key, value);
    Branch { predicates, result }
}

fn substitute_pattern(arena: &mut TypeArena, p: Pattern, key: VarId, value: TypeId) -> Pattern {
    match p {
        Pattern::Primitive(t) => Pattern::Primitive(substitute(arena, t, key, value)),
        Pattern::Applied { head, args } => Pattern::Applied {
            head: substitute(arena, head, key, value),
            args: args
                .into_iter()
                .map(|a| substitute_pattern(arena, a, key, value))
                .collect(),
        },
        Pattern::Function { arity, bind } => Pattern::Function { arity, bind },
        Pattern::Var(v) => Pattern::Var(v),
    }
}
