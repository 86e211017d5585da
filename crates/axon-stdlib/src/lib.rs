//! Standard library: the callables every evaluation stacks beneath user
//! layers, and the matching polymorphic call signatures the analyzer uses
//! (spec §4.2, §6.5).

pub mod compare;
pub mod currency;
pub mod date;
pub mod extensions;
pub mod format;
pub mod layer;
pub mod logic;
pub mod numeric;
pub mod sequence;
pub mod timestamp;
pub mod types;

pub use extensions::Extensions;
pub use layer::stdlib_layer;
pub use types::stdlib_types;
