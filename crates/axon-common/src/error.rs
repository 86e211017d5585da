//! The error taxonomy shared by the evaluator and the analyzer (spec §7).

use crate::ident::Identifier;
use std::fmt;

/// Structural/scope errors that both subsystems can hit while walking a
/// definition graph. Evaluator-only errors (`UndefinedIdentifier`,
/// `ArityMismatch`, `Aborted`) live alongside this enum in `axon-eval`,
/// since they carry evaluator-specific payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A node's shape doesn't match its declared tag, or the tag is absent.
    InvalidFormat,
    /// An identifier could not be resolved in any layer.
    NotInScope,
    /// An `@`-prefixed identifier was used as a definition key, or the host
    /// provided no form value and the name would also fail a normal lookup.
    LeadingAtIdent,
    /// A node's `t` field is not one of the eight known tags.
    UnknownDefType,
    /// Type reduction produced the sentinel `error` type.
    TypeError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ErrorKind::InvalidFormat => "invalid definition format",
            ErrorKind::NotInScope => "identifier not in scope",
            ErrorKind::LeadingAtIdent => "leading '@' identifier is not a valid definition key",
            ErrorKind::UnknownDefType => "unknown definition tag",
            ErrorKind::TypeError => "type error",
        };
        f.write_str(msg)
    }
}

/// The chain of identifiers traversed on the way to an error (spec §7,
/// "errors as values with a `path`").
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(pub Vec<Identifier>);

impl Path {
    pub fn new() -> Self {
        Path(Vec::new())
    }

    pub fn pushed(&self, id: Identifier) -> Self {
        let mut next = self.0.clone();
        next.push(id);
        Path(next)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}
