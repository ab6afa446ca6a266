//! Path expression evaluation on top of the resolver chain.
//!
//! This module contains the compiled expression, the variable and function
//! binding maps, and the evaluation context that owns them.

pub mod context;
pub mod expression;
pub mod function;
pub mod variables;

pub use context::EvaluationContext;
pub use expression::CompiledExpression;
pub use function::{FunctionMapper, NativeFn, NativeFunction};
pub use variables::{ValueExpression, VariableMapper};
