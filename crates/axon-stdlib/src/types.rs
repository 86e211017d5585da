//! Polymorphic call signatures for every stdlib name (spec §4.2), built the
//! same way a user-facing poly-fn would be: one [`PolyRow`] per overload.

use axon_common::Identifier;
use axon_types::{Pattern, PolyRow, TypeArena, TypeData, TypeId, VarId, create_poly_fn};
use rustc_hash::FxHashMap;

fn var_id(arena: &TypeArena, t: TypeId) -> VarId {
    match arena.get(t) {
        TypeData::Var(id, _) => *id,
        _ => unreachable!("fresh_var always produces a Var node"),
    }
}

/// Allocates a fresh type variable, returning both its node and its identity.
fn fresh(arena: &mut TypeArena, name: &str) -> (TypeId, VarId) {
    let t = arena.fresh_var(name);
    let id = var_id(arena, t);
    (t, id)
}

/// A pattern matching an array of anything, binding the element type to `bind`.
fn array_of_var(arena: &mut TypeArena, bind: VarId) -> Pattern {
    Pattern::Applied { head: arena.array_ctor(), args: vec![Pattern::Var(bind)] }
}

fn mono(arena: &mut TypeArena, params: Vec<TypeId>, result: TypeId) -> TypeId {
    let patterns = params.into_iter().map(Pattern::Primitive).collect();
    create_poly_fn(arena, vec![PolyRow::new(patterns, result)])
}

/// `f(a, a) -> bool`: same-type equality family (spec §4.2 `==`/`!=`).
fn same_type_predicate(arena: &mut TypeArena) -> TypeId {
    let (_, a) = fresh(arena, "a");
    let b = arena.bool_();
    create_poly_fn(arena, vec![PolyRow::new(vec![Pattern::Var(a), Pattern::Var(a)], b)])
}

/// `f(number, number) -> bool` / `f(string, string) -> bool`: ordering family.
fn ordering(arena: &mut TypeArena) -> TypeId {
    let n = arena.number();
    let s = arena.string();
    let b = arena.bool_();
    create_poly_fn(
        arena,
        vec![
            PolyRow::new(vec![Pattern::Primitive(n), Pattern::Primitive(n)], b),
            PolyRow::new(vec![Pattern::Primitive(s), Pattern::Primitive(s)], b),
        ],
    )
}

/// `map`/`flat_map`: `(f, array<a>) -> array<applied(f, a)>`, plus a string
/// overload that folds back to `string`. Building the result as
/// `applied(f, a)` rather than a fresh variable lets [`axon_types::reduce`]
/// actually run the bound callable's type through `apply` once a concrete
/// function gets substituted in for `f`.
fn map_type(arena: &mut TypeArena) -> TypeId {
    let (a_t, a) = fresh(arena, "a");
    let (f_t, f) = fresh(arena, "f");
    let s = arena.string();
    let array_a = array_of_var(arena, a);
    let applied_f_a = arena.applied(f_t, vec![a_t]);
    let array_result = arena.array_of(applied_f_a);
    create_poly_fn(
        arena,
        vec![
            PolyRow::new(vec![Pattern::Function { arity: 1, bind: f }, Pattern::Primitive(s)], s),
            PolyRow::new(vec![Pattern::Function { arity: 1, bind: f }, array_a], array_result),
        ],
    )
}

/// `(f, array<a>) -> array<a>`, used by `filter` (the predicate narrows
/// membership, not the element type).
fn filter_type(arena: &mut TypeArena) -> TypeId {
    let (a_t, a) = fresh(arena, "a");
    let (_, f) = fresh(arena, "f");
    let array_a = array_of_var(arena, a);
    let result = arena.array_of(a_t);
    create_poly_fn(arena, vec![PolyRow::new(vec![Pattern::Function { arity: 1, bind: f }, array_a], result)])
}

/// `(array<a>) -> a`, used by `head`.
fn array_to_element(arena: &mut TypeArena) -> TypeId {
    let (a_t, a) = fresh(arena, "a");
    let array_a = array_of_var(arena, a);
    create_poly_fn(arena, vec![PolyRow::new(vec![array_a], a_t)])
}

/// `(array<a>) -> array<a>`, used by `sort`/`tail`.
fn array_to_same_array(arena: &mut TypeArena) -> TypeId {
    let (a_t, a) = fresh(arena, "a");
    let array_a = array_of_var(arena, a);
    let result = arena.array_of(a_t);
    create_poly_fn(arena, vec![PolyRow::new(vec![array_a], result)])
}

/// `(array<a>) -> number`, used by the aggregate family and `length`.
fn array_to_number(arena: &mut TypeArena) -> TypeId {
    let (_, a) = fresh(arena, "a");
    let n = arena.number();
    let array_a = array_of_var(arena, a);
    create_poly_fn(arena, vec![PolyRow::new(vec![array_a], n)])
}

/// Builds the full stdlib call-signature table.
pub fn stdlib_types(arena: &mut TypeArena) -> FxHashMap<Identifier, TypeId> {
    let mut types = FxHashMap::default();

    let n = arena.number();
    let b = arena.bool_();
    let s = arena.string();

    let binop_num = mono(arena, vec![n, n], n);
    for name in ["+", "-", "*", "/", "^", "mod"] {
        types.insert(Identifier::name(name), binop_num);
    }

    let unary_num = mono(arena, vec![n], n);
    for name in ["floor", "ceil", "round", "trunc", "sign", "abs"] {
        types.insert(Identifier::name(name), unary_num);
    }

    let eq_ty = same_type_predicate(arena);
    types.insert(Identifier::name("=="), eq_ty);
    types.insert(Identifier::name("!="), eq_ty);
    let ord_ty = ordering(arena);
    for name in [">", "<", ">=", "<="] {
        types.insert(Identifier::name(name), ord_ty);
    }

    let logic_binop = mono(arena, vec![b, b], b);
    types.insert(Identifier::name("and"), logic_binop);
    types.insert(Identifier::name("or"), logic_binop);
    types.insert(Identifier::name("xor"), logic_binop);
    types.insert(Identifier::name("not"), mono(arena, vec![b], b));

    {
        let (then_t, then_v) = fresh(arena, "then");
        let (else_t, else_v) = fresh(arena, "else");
        let result = arena.union(vec![then_t, else_t]);
        let if_ty = create_poly_fn(
            arena,
            vec![PolyRow::new(vec![Pattern::Primitive(b), Pattern::Var(then_v), Pattern::Var(else_v)], result)],
        );
        types.insert(Identifier::name("if"), if_ty);
    }
    {
        let (a_t, a) = fresh(arena, "a");
        let id_ty = create_poly_fn(arena, vec![PolyRow::new(vec![Pattern::Var(a)], a_t)]);
        types.insert(Identifier::name("id"), id_ty);
    }

    {
        let array_s = arena.array_of(s);
        let concat_ty = create_poly_fn(
            arena,
            vec![
                PolyRow::new(vec![Pattern::Primitive(s), Pattern::Primitive(s)], s),
                PolyRow::new(vec![Pattern::Primitive(array_s), Pattern::Primitive(array_s)], array_s),
            ],
        );
        types.insert(Identifier::name("++"), concat_ty);
        types.insert(Identifier::name("cat"), concat_ty);
    }

    let map_ty = map_type(arena);
    types.insert(Identifier::name("map"), map_ty);
    types.insert(Identifier::name("flat_map"), map_type(arena));
    types.insert(Identifier::name("filter"), filter_type(arena));
    types.insert(Identifier::name("find_index"), {
        let (_, a) = fresh(arena, "a");
        let (_, f) = fresh(arena, "f");
        let array_a = array_of_var(arena, a);
        create_poly_fn(arena, vec![PolyRow::new(vec![Pattern::Function { arity: 1, bind: f }, array_a], n)])
    });

    types.insert(Identifier::name("length"), array_to_number(arena));
    for name in ["sum", "min", "max", "avg", "med"] {
        types.insert(Identifier::name(name), array_to_number(arena));
    }
    types.insert(Identifier::name("sort"), array_to_same_array(arena));
    types.insert(Identifier::name("tail"), array_to_same_array(arena));
    types.insert(Identifier::name("head"), array_to_element(arena));

    types.insert(Identifier::name("date_fmt"), mono(arena, vec![s], s));
    types.insert(Identifier::name("date_today"), create_poly_fn(arena, vec![PolyRow::new(vec![], s)]));

    types
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_types::{apply, signature};

    #[test]
    fn arithmetic_applies_to_numbers() {
        let mut arena = TypeArena::new();
        let types = stdlib_types(&mut arena);
        let plus = *types.get(&Identifier::name("+")).unwrap();
        let n = arena.number();
        let result = apply(&mut arena, plus, vec![n, n]);
        assert_eq!(signature(&arena, result), "number");
    }

    #[test]
    fn ordering_accepts_strings_too() {
        let mut arena = TypeArena::new();
        let types = stdlib_types(&mut arena);
        let gt = *types.get(&Identifier::name(">")).unwrap();
        let s = arena.string();
        let result = apply(&mut arena, gt, vec![s, s]);
        assert_eq!(signature(&arena, result), "bool");
    }

    #[test]
    fn sort_preserves_the_element_type() {
        let mut arena = TypeArena::new();
        let types = stdlib_types(&mut arena);
        let sort_fn = *types.get(&Identifier::name("sort")).unwrap();
        let s = arena.string();
        let array_s = arena.array_of(s);
        let result = apply(&mut arena, sort_fn, vec![array_s]);
        assert_eq!(signature(&arena, result), signature(&arena, array_s));
    }

    #[test]
    fn map_propagates_the_callables_return_type() {
        let mut arena = TypeArena::new();
        let types = stdlib_types(&mut arena);
        let map_fn = *types.get(&Identifier::name("map")).unwrap();
        let n = arena.number();
        let s = arena.string();
        let to_string = create_poly_fn(&mut arena, vec![PolyRow::new(vec![Pattern::Primitive(n)], s)]);
        let array_n = arena.array_of(n);
        let result = apply(&mut arena, map_fn, vec![to_string, array_n]);
        let expected = arena.array_of(s);
        assert_eq!(signature(&arena, result), signature(&arena, expected));
    }
}
