//! Definition-graph identifiers.
//!
//! Keys into a [definition layer](https://example.invalid) are either plain
//! text or an opaque symbol supplied by the host (spec §3.1). Only the text
//! form ever crosses the JSON boundary (§6.1) — symbols are a pure in-process
//! construct for hosts that embed the evaluator/analyzer directly and want
//! collision-proof hidden keys.

use std::fmt;
use std::rc::Rc;

/// A key into a definition layer.
///
/// Cheap to clone (`Name` is reference-counted); equality and hashing are by
/// value, not by `Rc` pointer, so two `Name`s built from the same text are
/// interchangeable.
#[derive(Clone, Debug, Eq)]
pub enum Identifier {
    Name(Rc<str>),
    Symbol(u64),
}

impl Identifier {
    pub fn name(s: impl Into<Rc<str>>) -> Self {
        Identifier::Name(s.into())
    }

    pub fn symbol(id: u64) -> Self {
        Identifier::Symbol(id)
    }

    /// `true` for identifiers of the form `@name` — externally supplied
    /// form values (spec §3.1, §6.2).
    pub fn is_form_value(&self) -> bool {
        matches!(self, Identifier::Name(s) if s.starts_with('@'))
    }

    /// `true` for definitions considered private to their defining scope
    /// (spec §4.4 step 7 `f`, §9 "Private definitions").
    pub fn is_private(&self) -> bool {
        matches!(self, Identifier::Name(s) if s.starts_with('_'))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Identifier::Name(s) => Some(s),
            Identifier::Symbol(_) => None,
        }
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Identifier::Name(a), Identifier::Name(b)) => a == b,
            (Identifier::Symbol(a), Identifier::Symbol(b)) => a == b,
            _ => false,
        }
    }
}

impl std::hash::Hash for Identifier {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Identifier::Name(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Identifier::Symbol(id) => {
                1u8.hash(state);
                id.hash(state);
            }
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Name(s) => write!(f, "{s}"),
            Identifier::Symbol(id) => write!(f, "<symbol:{id}>"),
        }
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier::Name(Rc::from(value))
    }
}

impl From<String> for Identifier {
    fn from(value: String) -> Self {
        Identifier::Name(Rc::from(value.as_str()))
    }
}

impl serde::Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Identifier::Name(s) => serializer.serialize_str(s),
            Identifier::Symbol(id) => serializer.serialize_str(&format!("<symbol:{id}>")),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Identifier::Name(Rc::from(s.as_str())))
    }
}
