//! `createPolyFn` — builds a polymorphic stdlib function type from a table
//! of `[arg1Pattern, …, argNPattern, result]` rows, one mapping per row
//! (spec §4.2).

use crate::arena::{Mapping, Pattern, TypeArena, TypeId, VarId};

/// One row of a poly-fn spec table: the argument patterns and the result
/// type they produce when every pattern matches.
pub struct PolyRow {
    pub patterns: Vec<Pattern>,
    pub result: TypeId,
}

impl PolyRow {
    pub fn new(patterns: Vec<Pattern>, result: TypeId) -> Self {
        PolyRow { patterns, result }
    }
}

pub fn create_poly_fn(arena: &mut TypeArena, rows: Vec<PolyRow>) -> TypeId {
    let mappings = rows
        .into_iter()
        .map(|row| {
            let mut bindings = Vec::new();
            for p in &row.patterns {
                collect_vars(p, &mut bindings);
            }
            Mapping {
                bindings,
                patterns: row.patterns,
                result: row.result,
            }
        })
        .collect();
    arena.function(mappings)
}

fn collect_vars(pattern: &Pattern, out: &mut Vec<VarId>) {
    match pattern {
        Pattern::Primitive(_) => {}
        Pattern::Applied { args, .. } => {
            for a in args {
                collect_vars(a, out);
            }
        }
        Pattern::Function { bind, .. } | Pattern::Var(bind) => {
            if !out.contains(bind) {
                out.push(*bind);
            }
        }
    }
}
