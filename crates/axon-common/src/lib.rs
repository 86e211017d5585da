//! Common types shared by every crate in the axon workspace.
//!
//! This crate provides the foundations the evaluator and analyzer both sit
//! on top of:
//! - `Identifier` — a definition-graph key, either a textual name or an
//!   opaque symbol.
//! - `Path` — the reference chain an error is attributed to.
//! - `ErrorKind` — the closed taxonomy of structural/scope errors shared by
//!   both subsystems.

pub mod error;
pub mod ident;
pub mod numeric;

pub use error::{ErrorKind, Path};
pub use ident::Identifier;
