//! Value model and lazily-scoped evaluator (spec §3.2, §4.3).
//!
//! [`def`] holds the JSON-tagged definition graph; [`value`] holds the
//! runtime value domain produced by evaluating it; [`callable`] unifies
//! stdlib natives and user closures behind one interface; [`eval`] is the
//! reducer itself.

pub mod callable;
pub mod context;
pub mod def;
pub mod error;
pub mod eval;
pub mod value;

pub use callable::{Callable, NativeFn, UserFunction};
pub use context::EvalContext;
pub use def::{Definition, Layer, Literal, SwitchCase};
pub use error::EvalError;
pub use eval::{EvalOptions, evaluate};
pub use value::Value;
