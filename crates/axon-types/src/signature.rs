//! `signature(t)` — the deterministic textual form every type reduces to
//! for equality purposes (spec §4.1). Two types are interchangeable for
//! union deduplication iff their signatures match.

use crate::arena::{Pattern, TypeArena, TypeData, TypeId};
use std::fmt::Write;

pub fn signature(arena: &TypeArena, id: TypeId) -> String {
    let mut out = String::new();
    write_signature(arena, id, &mut out);
    out
}

fn write_signature(arena: &TypeArena, id: TypeId, out: &mut String) {
    match arena.get(id) {
        TypeData::Never => out.push_str("never"),
        TypeData::Null => out.push_str("null"),
        TypeData::Bool => out.push_str("bool"),
        TypeData::Number => out.push_str("number"),
        TypeData::String => out.push_str("string"),
        TypeData::ArrayCtor => out.push_str("array"),
        TypeData::Var(id, _) => {
            let _ = write!(out, "var#{}", id.0);
        }
        TypeData::Unresolved(id, _) => {
            let _ = write!(out, "unresolved#{}", id.0);
        }
        TypeData::Error(_) => out.push_str("error"),
        TypeData::Union(members) => {
            out.push_str("union(");
            let mut sigs: Vec<String> = members.iter().map(|m| signature(arena, *m)).collect();
            sigs.sort();
            out.push_str(&sigs.join("|"));
            out.push(')');
        }
        TypeData::Applied { receiver, args } => {
            write_signature(arena, *receiver, out);
            out.push('<');
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_signature(arena, *a, out);
            }
            out.push('>');
        }
        TypeData::Function(mappings) => {
            out.push_str("fn[");
            for (i, m) in mappings.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                out.push('(');
                for (j, p) in m.patterns.iter().enumerate() {
                    if j > 0 {
                        out.push(',');
                    }
                    write_pattern_signature(arena, p, out);
                }
                out.push_str(")=>");
                write_signature(arena, m.result, out);
            }
            out.push(']');
        }
        TypeData::Conditional(branches) => {
            out.push_str("cond[");
            for (i, b) in branches.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                for (j, (var, pat)) in b.predicates.iter().enumerate() {
                    if j > 0 {
                        out.push('&');
                    }
                    let _ = write!(out, "var#{}~", var.0);
                    write_pattern_signature(arena, pat, out);
                }
                out.push_str("=>");
                write_signature(arena, b.result, out);
            }
            out.push(']');
        }
    }
}

fn write_pattern_signature(arena: &TypeArena, pattern: &Pattern, out: &mut String) {
    match pattern {
        Pattern::Primitive(t) => write_signature(arena, *t, out),
        Pattern::Applied { head, args } => {
            write_signature(arena, *head, out);
            out.push('<');
            for (i, a) in args.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_pattern_signature(arena, a, out);
            }
            out.push('>');
        }
        Pattern::Function { arity, bind } => {
            let _ = write!(out, "fnpat({arity})~var#{}", bind.0);
        }
        Pattern::Var(v) => {
            let _ = write!(out, "var#{}", v.0);
        }
    }
}
