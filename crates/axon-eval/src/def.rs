//! The definition graph (spec §3.1): the JSON-tagged node shapes every
//! program is built from, and the layered scoping that resolves
//! identifiers against them.

use axon_common::Identifier;
use indexmap::IndexMap;
use serde::Deserialize;
use std::rc::Rc;

/// A layer: one level of lexical scope. Keys never include `@`-prefixed
/// form-value names (spec §3.1 "Identifier invariants").
pub type Layer = IndexMap<Identifier, Definition>;

/// A JSON-literal value nested inside an `m` (inline array) node. Unlike
/// [`crate::value::Value`], this has no callable/date/timestamp variants —
/// those only exist after evaluation.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Literal>),
}

/// One arm of a `w` switch node.
#[derive(Clone, Debug, Deserialize)]
pub struct SwitchCase {
    /// Condition identifier; absent means "default" (always selects).
    pub c: Option<Identifier>,
    pub v: Identifier,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "t")]
pub enum Definition {
    #[serde(rename = "u")]
    Null,
    #[serde(rename = "b")]
    Bool { v: bool },
    #[serde(rename = "n")]
    Number { v: f64 },
    #[serde(rename = "s")]
    Str { v: String },
    #[serde(rename = "m")]
    InlineArray { v: Vec<Literal> },
    #[serde(rename = "l")]
    RefList { v: Vec<Identifier> },
    #[serde(rename = "c")]
    Call {
        f: Identifier,
        #[serde(default)]
        a: Vec<Identifier>,
    },
    #[serde(rename = "f")]
    Function { p: Vec<Identifier>, b: Rc<Layer> },
    #[serde(rename = "w")]
    Switch { m: Vec<SwitchCase> },
    /// Synthetic: an already-evaluated value bound into a function-call
    /// parameter layer (spec §4.3, the `VM_FN_PARAM` node). Never appears
    /// in a deserialized program.
    #[serde(skip)]
    Bound(crate::value::Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_number_literal() {
        let def: Definition = serde_json::from_str(r#"{"t":"n","v":2}"#).unwrap();
        assert!(matches!(def, Definition::Number { v } if v == 2.0));
    }

    #[test]
    fn deserializes_call_with_default_empty_args() {
        let def: Definition = serde_json::from_str(r#"{"t":"c","f":"a"}"#).unwrap();
        match def {
            Definition::Call { f, a } => {
                assert_eq!(f, Identifier::from("a"));
                assert!(a.is_empty());
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn deserializes_nested_inline_array() {
        let def: Definition = serde_json::from_str(r#"{"t":"m","v":[1,"x",[true,null]]}"#).unwrap();
        match def {
            Definition::InlineArray { v } => assert_eq!(v.len(), 3),
            _ => panic!("wrong variant"),
        }
    }
}
