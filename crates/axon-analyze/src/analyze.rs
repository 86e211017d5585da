//! `analyzeScoped` and its entry points (spec §4.4).

use crate::context::{AnalyzeContext, cache_key};
use crate::report::{AnalysisFailure, AnalysisReport, AnalyzeResult, DefTag};
use axon_common::numeric::is_finite_number;
use axon_common::{ErrorKind, Identifier};
use axon_eval::{Definition, Layer, Literal, Value};
use axon_types::{Pattern, PolyRow, TypeId, create_poly_fn};
use rustc_hash::FxHashMap;
use std::rc::Rc;

const STACK_RED_ZONE: usize = 64 * 1024;
const STACK_GROWTH: usize = 4 * 1024 * 1024;

fn fail(ctx: &AnalyzeContext<'_>, kind: ErrorKind) -> AnalysisFailure {
    AnalysisFailure { kind, path: ctx.path.clone() }
}

/// Walks the stack from `ceiling` down to `0`, skipping entries the
/// current privacy boundary hides, and returns the layer they were found
/// in along with its stack index.
fn lookup(ctx: &AnalyzeContext<'_>, ceiling: usize, id: &Identifier) -> Option<(Rc<Layer>, usize, Definition)> {
    for idx in (0..=ceiling).rev() {
        if ctx.is_hidden(idx, id) {
            continue;
        }
        if let Some(def) = ctx.stack[idx].get(id) {
            return Some((ctx.stack[idx].clone(), idx, def.clone()));
        }
    }
    None
}

fn literal_type(arena: &mut axon_types::TypeArena, literal: &Literal) -> TypeId {
    match literal {
        Literal::Null => arena.null(),
        Literal::Bool(_) => arena.bool_(),
        Literal::Number(_) => arena.number(),
        Literal::String(_) => arena.string(),
        Literal::Array(items) => {
            let element = array_literal_element_type(arena, items);
            arena.array_of(element)
        }
    }
}

fn array_literal_element_type(arena: &mut axon_types::TypeArena, items: &[Literal]) -> TypeId {
    if items.is_empty() {
        return arena.fresh_var("empty_array_element");
    }
    let members = items.iter().map(|item| literal_type(arena, item)).collect();
    arena.union(members)
}

pub fn analyze_scoped(ctx: &mut AnalyzeContext<'_>, ceiling: usize, id: &Identifier) -> AnalyzeResult {
    stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || analyze_scoped_inner(ctx, ceiling, id))
}

fn analyze_scoped_inner(ctx: &mut AnalyzeContext<'_>, ceiling: usize, id: &Identifier) -> AnalyzeResult {
    if id.is_form_value() {
        let name = id.as_str().unwrap_or_default().trim_start_matches('@');
        if let Some(ty) = ctx.form_value_type(name) {
            return Ok(AnalysisReport::bare(ty));
        }
        return match lookup(ctx, ceiling, id) {
            Some(found) => dispatch_found(ctx, ceiling, id, found),
            None => Err(fail(ctx, ErrorKind::LeadingAtIdent)),
        };
    }

    match lookup(ctx, ceiling, id) {
        Some(found) => dispatch_found(ctx, ceiling, id, found),
        None => match ctx.stdlib_type(id) {
            Some(ty) => Ok(AnalysisReport { ty, def_types: Default::default(), std_usage: [id.clone()].into_iter().collect() }),
            None => Err(fail(ctx, ErrorKind::NotInScope)),
        },
    }
}

fn dispatch_found(ctx: &mut AnalyzeContext<'_>, ceiling: usize, id: &Identifier, found: (Rc<Layer>, usize, Definition)) -> AnalyzeResult {
    let (layer, _idx, def) = found;
    let key = cache_key(&layer, id);

    if let Some(cached) = ctx.cache_get(&key) {
        return Ok(cached);
    }

    if let Definition::Bound(_) = &def {
        let ty = ctx
            .param_type(&key)
            .ok_or_else(|| fail(ctx, ErrorKind::InvalidFormat))?;
        return Ok(AnalysisReport::bare(ty));
    }

    ctx.with_lock(key.clone(), &id.to_string(), |ctx, locked_ty| -> AnalyzeResult {
        let _ = locked_ty;
        let report = analyze_definition(ctx, ceiling, id, &def)?;
        let reduced_ty = axon_types::reduce(ctx.arena, report.ty);
        if !axon_types::is_valid(ctx.arena, reduced_ty) {
            return Err(fail(ctx, ErrorKind::TypeError));
        }
        let reduced = AnalysisReport { ty: reduced_ty, ..report };
        ctx.cache_put(key.clone(), reduced.clone());
        Ok(reduced)
    })
}

fn analyze_definition(ctx: &mut AnalyzeContext<'_>, ceiling: usize, id: &Identifier, def: &Definition) -> AnalyzeResult {
    ctx.path = ctx.path.pushed(id.clone());
    let result = analyze_definition_body(ctx, ceiling, def);
    let mut path = ctx.path.clone();
    path.0.pop();
    ctx.path = path;
    result
}

fn analyze_definition_body(ctx: &mut AnalyzeContext<'_>, ceiling: usize, def: &Definition) -> AnalyzeResult {
    match def {
        Definition::Null => Ok(AnalysisReport::leaf(ctx.arena.null(), DefTag::Null)),
        Definition::Bool { .. } => Ok(AnalysisReport::leaf(ctx.arena.bool_(), DefTag::Bool)),
        Definition::Number { v } => {
            if !is_finite_number(*v) {
                return Err(fail(ctx, ErrorKind::InvalidFormat));
            }
            Ok(AnalysisReport::leaf(ctx.arena.number(), DefTag::Number))
        }
        Definition::Str { .. } => Ok(AnalysisReport::leaf(ctx.arena.string(), DefTag::Str)),
        Definition::InlineArray { v } => {
            let element = array_literal_element_type(ctx.arena, v);
            let ty = ctx.arena.array_of(element);
            Ok(AnalysisReport::leaf(ty, DefTag::InlineArray))
        }
        Definition::RefList { v } => {
            let mut report = AnalysisReport::leaf(ctx.arena.never(), DefTag::RefList);
            let mut members = Vec::with_capacity(v.len());
            for ref_id in v {
                let r = analyze_scoped(ctx, ceiling, ref_id)?;
                report.absorb(&r);
                members.push(r.ty);
            }
            report.ty = ctx.arena.union(members);
            Ok(report)
        }
        Definition::Call { f, a } => {
            let mut report = AnalysisReport::leaf(ctx.arena.never(), DefTag::Call);
            let callee = analyze_scoped(ctx, ceiling, f)?;
            report.absorb(&callee);
            let mut arg_types = Vec::with_capacity(a.len());
            for arg_id in a {
                let r = analyze_scoped(ctx, ceiling, arg_id)?;
                report.absorb(&r);
                arg_types.push(r.ty);
            }
            report.ty = axon_types::apply(ctx.arena, callee.ty, arg_types);
            Ok(report)
        }
        Definition::Function { p, b } => analyze_function(ctx, ceiling, p, b),
        Definition::Switch { m } => {
            let mut report = AnalysisReport::leaf(ctx.arena.never(), DefTag::Switch);
            let mut results = Vec::new();
            for case in m {
                if let Some(cond_id) = &case.c {
                    let cond = analyze_scoped(ctx, ceiling, cond_id)?;
                    report.absorb(&cond);
                    let cond_ty = axon_types::reduce(ctx.arena, cond.ty);
                    let bool_ty = ctx.arena.bool_();
                    if axon_types::signature(ctx.arena, cond_ty) != axon_types::signature(ctx.arena, bool_ty) {
                        return Err(fail(ctx, ErrorKind::TypeError));
                    }
                }
                let v = analyze_scoped(ctx, ceiling, &case.v)?;
                report.absorb(&v);
                results.push(v.ty);
            }
            report.ty = ctx.arena.union(results);
            Ok(report)
        }
        Definition::Bound(_) => unreachable!("Bound definitions are intercepted before dispatch"),
    }
}

fn analyze_function(ctx: &mut AnalyzeContext<'_>, ceiling: usize, params: &[Identifier], body: &Rc<Layer>) -> AnalyzeResult {
    let mut param_layer = Layer::new();
    let mut param_vars = Vec::with_capacity(params.len());
    for p in params {
        let ty = ctx.arena.fresh_var(p.to_string());
        param_layer.insert(p.clone(), Definition::Bound(Value::Null));
        param_vars.push((p.clone(), ty));
    }
    let param_layer = Rc::new(param_layer);
    for (p, ty) in &param_vars {
        ctx.set_param_type(cache_key(&param_layer, p), *ty);
    }

    let closure = ctx.stack[0..=ceiling].to_vec();
    ctx.stack = closure;

    // Push the param/body layers *inside* the boundary closure so the
    // boundary is captured at the closure's depth, not past these two
    // layers — otherwise the function's own body layer would count as
    // "below the boundary" and its private definitions would be hidden
    // from itself.
    let body_result = ctx.with_privacy_boundary(|ctx| {
        ctx.stack.push(param_layer);
        ctx.stack.push(body.clone());
        let new_ceiling = ctx.stack.len() - 1;
        analyze_scoped(ctx, new_ceiling, &Identifier::from("="))
    });

    ctx.stack.truncate(ceiling + 1);

    let body_report = body_result?;
    let patterns = param_vars
        .iter()
        .map(|(_, ty)| match ctx.arena.get(*ty) {
            axon_types::TypeData::Var(id, _) => Pattern::Var(*id),
            _ => unreachable!("fresh_var always produces a Var node"),
        })
        .collect();
    let ty = create_poly_fn(ctx.arena, vec![PolyRow::new(patterns, body_report.ty)]);

    let mut report = AnalysisReport::leaf(ty, DefTag::Function);
    report.absorb(&body_report);
    Ok(report)
}

/// Analyzes a single top-level identifier against its own fresh context.
pub fn analyze(
    arena: &mut axon_types::TypeArena,
    layers: Vec<Rc<Layer>>,
    stdlib_types: FxHashMap<Identifier, TypeId>,
    id: Identifier,
    form_value_types: impl Fn(&str) -> Option<TypeId>,
) -> AnalyzeResult {
    let ceiling = layers.len() - 1;
    let mut ctx = AnalyzeContext::new(arena, layers, stdlib_types, form_value_types);
    let mut result = analyze_scoped(&mut ctx, ceiling, &id);
    if let Ok(report) = &mut result {
        let resolve_map = ctx.resolve_map().clone();
        report.ty = axon_types::resolve_all(ctx.arena, report.ty, &resolve_map);
    }
    result
}

/// Analyzes every identifier bound in the top-most layer, sharing one
/// context (and so one resolve map) across all of them, then resolves
/// every result's unresolved placeholders in a final pass (spec §4.4:
/// "analyzeAll ... then resolve unresolved types ... over every result").
pub fn analyze_all(
    arena: &mut axon_types::TypeArena,
    layers: Vec<Rc<Layer>>,
    stdlib_types: FxHashMap<Identifier, TypeId>,
    form_value_types: impl Fn(&str) -> Option<TypeId>,
) -> Vec<(Identifier, AnalyzeResult)> {
    let ceiling = layers.len() - 1;
    let top_level: Vec<Identifier> = layers[ceiling].keys().cloned().collect();
    let mut ctx = AnalyzeContext::new(arena, layers, stdlib_types, form_value_types);

    let mut results: Vec<(Identifier, AnalyzeResult)> =
        top_level.into_iter().map(|id| (id.clone(), analyze_scoped(&mut ctx, ceiling, &id))).collect();

    let resolve_map = ctx.resolve_map().clone();
    for (_, result) in &mut results {
        if let Ok(report) = result {
            report.ty = axon_types::resolve_all(ctx.arena, report.ty, &resolve_map);
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_types::{TypeArena, does_halt, signature};

    fn layer(entries: Vec<(&str, Definition)>) -> Rc<Layer> {
        let mut l = Layer::new();
        for (k, v) in entries {
            l.insert(Identifier::from(k), v);
        }
        Rc::new(l)
    }

    fn run(arena: &mut TypeArena, layers: Vec<Rc<Layer>>, id: &str) -> AnalyzeResult {
        analyze(arena, layers, FxHashMap::default(), Identifier::from(id), |_| None)
    }

    #[test]
    fn primitive_number_analyzes_to_number() {
        let mut arena = TypeArena::new();
        let layers = vec![layer(vec![("x", Definition::Number { v: 2.0 })])];
        let report = run(&mut arena, layers, "x").unwrap();
        assert_eq!(signature(&arena, report.ty), "number");
        assert!(report.def_types.contains(&DefTag::Number));
    }

    #[test]
    fn call_applies_a_stdlib_function_and_records_its_usage() {
        let mut arena = TypeArena::new();
        let stdlib = axon_stdlib::stdlib_types(&mut arena);
        let layers = vec![layer(vec![
            ("x", Definition::Call { f: Identifier::from("+"), a: vec![Identifier::from("a"), Identifier::from("b")] }),
            ("a", Definition::Number { v: 2.0 }),
            ("b", Definition::Number { v: 3.0 }),
        ])];
        let mut ctx = AnalyzeContext::new(&mut arena, layers, stdlib, |_| None);
        let report = analyze_scoped(&mut ctx, 0, &Identifier::from("x")).unwrap();
        assert_eq!(signature(ctx.arena, report.ty), "number");
        assert!(report.std_usage.contains(&Identifier::from("+")));
    }

    #[test]
    fn self_referential_definition_resolves_to_never_and_is_valid() {
        let mut arena = TypeArena::new();
        let layers = vec![layer(vec![("r", Definition::RefList { v: vec![Identifier::from("r")] })])];
        let report = run(&mut arena, layers, "r").unwrap();
        assert_eq!(signature(&arena, report.ty), "never");
        assert_eq!(does_halt(&arena, report.ty), Some(false));
    }

    #[test]
    fn private_parent_definitions_are_hidden_from_function_bodies() {
        let mut arena = TypeArena::new();
        let body = layer(vec![("=", Definition::RefList { v: vec![Identifier::from("_hidden")] })]);
        let layers = vec![layer(vec![
            ("_hidden", Definition::Number { v: 5.0 }),
            ("f", Definition::Function { p: vec![], b: body }),
        ])];
        let err = run(&mut arena, layers, "f").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotInScope);
    }

    #[test]
    fn function_type_threads_the_parameter_through_its_body() {
        let mut arena = TypeArena::new();
        let body = layer(vec![("=", Definition::RefList { v: vec![Identifier::from("x")] })]);
        let layers = vec![layer(vec![("double", Definition::Function { p: vec![Identifier::from("x")], b: body })])];
        let mut ctx = AnalyzeContext::new(&mut arena, layers, FxHashMap::default(), |_| None);
        let report = analyze_scoped(&mut ctx, 0, &Identifier::from("double")).unwrap();
        let n = ctx.arena.number();
        let applied = axon_types::apply(ctx.arena, report.ty, vec![n]);
        assert_eq!(signature(ctx.arena, applied), "number");
    }
}
