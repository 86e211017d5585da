//! The uniform callable wrapper (spec §4.5): stdlib natives and user
//! functions are both exposed through one `arity`/`apply` interface so the
//! evaluator's call-node handling doesn't need to know which it has.

use crate::context::EvalContext;
use crate::def::Layer;
use crate::error::EvalError;
use crate::value::Value;
use axon_common::Identifier;
use std::rc::Rc;

pub trait Callable {
    fn arity(&self) -> usize;
    fn apply(&self, args: &[Value], ctx: &mut EvalContext) -> Result<Value, EvalError>;
}

/// A stdlib function: a fixed-arity native closure invoked directly
/// (spec §4.5 "For native stdlib functions, the underlying host function is
/// called directly").
pub struct NativeFn {
    arity: usize,
    #[allow(clippy::type_complexity)]
    f: Box<dyn Fn(&[Value], &mut EvalContext) -> Result<Value, EvalError>>,
}

impl NativeFn {
    pub fn new(
        arity: usize,
        f: impl Fn(&[Value], &mut EvalContext) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        NativeFn {
            arity,
            f: Box::new(f),
        }
    }
}

impl Callable for NativeFn {
    fn arity(&self) -> usize {
        self.arity
    }

    fn apply(&self, args: &[Value], ctx: &mut EvalContext) -> Result<Value, EvalError> {
        if args.len() != self.arity {
            return Err(EvalError::ArityMismatch {
                expected: self.arity,
                actual: args.len(),
            });
        }
        (self.f)(args, ctx)
    }
}

/// A user function: parameters, a body layer, and a snapshot of the
/// definition stack in effect where the `f` node was defined (spec §3.2
/// "a user function closing over a definition stack").
pub struct UserFunction {
    pub params: Vec<Identifier>,
    pub body: Rc<Layer>,
    pub closure_stack: Rc<Vec<Rc<Layer>>>,
}

impl Callable for UserFunction {
    fn arity(&self) -> usize {
        self.params.len()
    }

    fn apply(&self, args: &[Value], ctx: &mut EvalContext) -> Result<Value, EvalError> {
        if args.len() != self.params.len() {
            return Err(EvalError::ArityMismatch {
                expected: self.params.len(),
                actual: args.len(),
            });
        }
        crate::eval::apply_user_function(ctx, self, args)
    }
}
