//! `isConcrete`, `doesHalt`, `isValid` (spec §4.1).

use crate::arena::{TypeArena, TypeData, TypeId, VarId};
use crate::substitute::substitute;
use rustc_hash::FxHashSet;

/// `true` iff no free type variable remains after every bound variable of
/// every function mapping in `t` is substituted with `never` (spec §4.1
/// `isConcrete`).
pub fn is_concrete(arena: &mut TypeArena, t: TypeId) -> bool {
    let never = arena.never();
    let grounded = ground_bound_vars(arena, t, never);
    !contains_var(arena, grounded, &mut FxHashSet::default())
}

fn ground_bound_vars(arena: &mut TypeArena, t: TypeId, never: TypeId) -> TypeId {
    let bound = collect_bound_vars(arena, t);
    let mut result = t;
    for key in bound {
        result = substitute(arena, result, key, never);
    }
    result
}

fn collect_bound_vars(arena: &TypeArena, t: TypeId) -> Vec<VarId> {
    let mut out = Vec::new();
    let mut seen = FxHashSet::default();
    collect_bound_vars_into(arena, t, &mut out, &mut seen);
    out
}

fn collect_bound_vars_into(
    arena: &TypeArena,
    t: TypeId,
    out: &mut Vec<VarId>,
    seen: &mut FxHashSet<TypeId>,
) {
    if !seen.insert(t) {
        return;
    }
    match arena.get(t) {
        TypeData::Function(mappings) => {
            for m in mappings {
                out.extend(m.bindings.iter().copied());
                collect_bound_vars_into(arena, m.result, out, seen);
            }
        }
        TypeData::Union(members) => {
            for m in members {
                collect_bound_vars_into(arena, *m, out, seen);
            }
        }
        TypeData::Applied { receiver, args } => {
            collect_bound_vars_into(arena, *receiver, out, seen);
            for a in args {
                collect_bound_vars_into(arena, *a, out, seen);
            }
        }
        TypeData::Conditional(branches) => {
            for b in branches {
                collect_bound_vars_into(arena, b.result, out, seen);
            }
        }
        _ => {}
    }
}

fn contains_var(arena: &TypeArena, t: TypeId, seen: &mut FxHashSet<TypeId>) -> bool {
    if !seen.insert(t) {
        return false;
    }
    match arena.get(t) {
        TypeData::Var(..) => true,
        TypeData::Union(members) => members.iter().any(|m| contains_var(arena, *m, seen)),
        TypeData::Applied { receiver, args } => {
            contains_var(arena, *receiver, seen) || args.iter().any(|a| contains_var(arena, *a, seen))
        }
        TypeData::Function(mappings) => mappings.iter().any(|m| contains_var(arena, m.result, seen)),
        TypeData::Conditional(branches) => {
            branches.iter().any(|b| contains_var(arena, b.result, seen))
        }
        _ => false,
    }
}

/// Tri-valued halting verdict (spec §4.1 `doesHalt`): `Some(true)` if `t`
/// provably terminates, `Some(false)` if it provably diverges (a `never`
/// appears in result position outside a union branch), `None` otherwise.
pub fn does_halt(arena: &TypeArena, t: TypeId) -> Option<bool> {
    let mut seen = FxHashSet::default();
    halt_of(arena, t, &mut seen)
}

fn halt_of(arena: &TypeArena, t: TypeId, seen: &mut FxHashSet<TypeId>) -> Option<bool> {
    if !seen.insert(t) {
        return Some(true);
    }
    match arena.get(t) {
        TypeData::Never => Some(false),
        TypeData::Union(members) => {
            // never anywhere inside a union is a possible branch, not a
            // certain one: the union as a whole still may halt.
            if members.iter().any(|m| matches!(arena.get(*m), TypeData::Never)) {
                None
            } else {
                Some(true)
            }
        }
        TypeData::Function(mappings) => {
            let verdicts: Vec<Option<bool>> =
                mappings.iter().map(|m| halt_of(arena, m.result, seen)).collect();
            if verdicts.iter().any(|v| *v == Some(false)) {
                Some(false)
            } else if verdicts.iter().all(|v| *v == Some(true)) {
                Some(true)
            } else {
                None
            }
        }
        TypeData::Conditional(branches) => {
            let verdicts: Vec<Option<bool>> =
                branches.iter().map(|b| halt_of(arena, b.result, seen)).collect();
            if verdicts.iter().any(|v| *v == Some(false)) {
                Some(false)
            } else if verdicts.iter().all(|v| *v == Some(true)) {
                Some(true)
            } else {
                None
            }
        }
        _ => Some(true),
    }
}

/// `false` iff `t` contains an `error` type anywhere (spec §4.1 `isValid`).
pub fn is_valid(arena: &TypeArena, t: TypeId) -> bool {
    !contains_error(arena, t, &mut FxHashSet::default())
}

fn contains_error(arena: &TypeArena, t: TypeId, seen: &mut FxHashSet<TypeId>) -> bool {
    if !seen.insert(t) {
        return false;
    }
    match arena.get(t) {
        TypeData::Error(_) => true,
        TypeData::Union(members) => members.iter().any(|m| contains_error(arena, *m, seen)),
        TypeData::Applied { receiver, args } => {
            contains_error(arena, *receiver, seen) || args.iter().any(|a| contains_error(arena, *a, seen))
        }
        TypeData::Function(mappings) => {
            mappings.iter().any(|m| contains_error(arena, m.result, seen))
        }
        TypeData::Conditional(branches) => {
            branches.iter().any(|b| contains_error(arena, b.result, seen))
        }
        _ => false,
    }
}
