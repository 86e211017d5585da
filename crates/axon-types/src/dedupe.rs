//! Union-member deduplication by [`signature`] (spec §3.3 "Union").

use crate::arena::{TypeArena, TypeId};
use crate::signature::signature;
use rustc_hash::FxHashSet;

pub fn dedupe_union_members(arena: &TypeArena, members: Vec<TypeId>) -> Vec<TypeId> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::with_capacity(members.len());
    for m in members {
        // Flatten nested unions so union([union([A,B]), C]) == union([A,B,C]).
        if let crate::arena::TypeData::Union(inner) = arena.get(m) {
            for &i in inner {
                push_unique(arena, &mut seen, &mut out, i);
            }
            continue;
        }
        push_unique(arena, &mut seen, &mut out, m);
    }
    out
}

fn push_unique(
    arena: &TypeArena,
    seen: &mut FxHashSet<String>,
    out: &mut Vec<TypeId>,
    id: TypeId,
) {
    let sig = signature(arena, id);
    if matches!(arena.get(id), crate::arena::TypeData::Never) {
        return;
    }
    if seen.insert(sig) {
        out.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::TypeArena;

    #[test]
    fn union_idempotence() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let u = arena.union(vec![n, n]);
        assert_eq!(signature(&arena, u), signature(&arena, n));
    }

    #[test]
    fn empty_union_is_never() {
        let mut arena = TypeArena::new();
        let u = arena.union(vec![]);
        assert_eq!(signature(&arena, u), "never");
    }

    #[test]
    fn never_is_absorbed() {
        let mut arena = TypeArena::new();
        let n = arena.number();
        let nv = arena.never();
        let u = arena.union(vec![n, nv]);
        assert_eq!(signature(&arena, u), signature(&arena, n));
    }
}
