//! Polymorphic type algebra for the expression-graph analyzer.
//!
//! Types live in a [`TypeArena`](arena::TypeArena): an allocator of
//! [`TypeData`](arena::TypeData) nodes addressed by stable
//! [`TypeId`](arena::TypeId) handles, never hash-consed. Every operation the
//! analyzer needs — `signature`, `substitute`, `apply`, `reduce`, `match`,
//! `isConcrete`, `doesHalt`, `isValid` — lives in its own module here; the
//! standard library builds its polymorphic call signatures on top via
//! [`poly::create_poly_fn`].

pub mod apply;
pub mod arena;
pub mod dedupe;
pub mod pattern;
pub mod poly;
pub mod query;
pub mod reduce;
pub mod signature;
pub mod substitute;
pub mod unresolved;

pub use apply::apply;
pub use arena::{Branch, ErrorReason, Mapping, Pattern, TypeArena, TypeData, TypeId, UnresolvedId, VarId};
pub use pattern::{Bindings, match_pattern};
pub use poly::{PolyRow, create_poly_fn};
pub use query::{does_halt, is_concrete, is_valid};
pub use reduce::reduce;
pub use signature::signature;
pub use substitute::substitute;
pub use unresolved::{ResolveMap, resolve_all};
