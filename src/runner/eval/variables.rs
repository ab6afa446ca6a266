use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::ds::error::ResolveError;
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::eval::context::EvaluationContext;
use crate::runner::eval::expression::CompiledExpression;

/// The deferred right-hand side of a variable binding.
#[derive(Debug, Clone)]
pub enum ValueExpression {
    /// A fixed value. Never writable.
    Literal(Value),
    /// A path evaluated each time the variable is read; writes go through it.
    Expression(CompiledExpression),
}

impl ValueExpression {
    pub fn get_value(&self, ctx: &EvaluationContext) -> Result<Value, ResolveError> {
        match self {
            ValueExpression::Literal(v) => Ok(v.clone()),
            ValueExpression::Expression(e) => e.get_value(ctx),
        }
    }

    pub fn get_type(&self, ctx: &EvaluationContext) -> Result<ValueType, ResolveError> {
        match self {
            ValueExpression::Literal(v) => Ok(v.value_type()),
            ValueExpression::Expression(e) => e.get_type(ctx),
        }
    }

    pub fn is_read_only(&self, ctx: &EvaluationContext) -> Result<bool, ResolveError> {
        match self {
            ValueExpression::Literal(_) => Ok(true),
            ValueExpression::Expression(e) => e.is_read_only(ctx),
        }
    }

    pub fn set_value(&self, ctx: &EvaluationContext, value: Value) -> Result<(), ResolveError> {
        match self {
            ValueExpression::Literal(v) => Err(ResolveError::not_writable(format!(
                "variable bound to literal {}",
                v
            ))),
            ValueExpression::Expression(e) => e.set_value(ctx, value),
        }
    }
}

/// Expression-level variables, consulted for root identifiers before the chain.
///
/// Bindings are shared by `Rc`: an expression compiled against this map keeps
/// the binding it saw even after the name is rebound or removed here.
#[derive(Clone, Default)]
pub struct VariableMapper {
    variables: HashMap<String, Rc<ValueExpression>>,
}

impl VariableMapper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve_variable(&self, name: &str) -> Option<Rc<ValueExpression>> {
        self.variables.get(name).cloned()
    }

    /// Bind, rebind or (with `None`) remove `name`. Returns the previous binding.
    pub fn set_variable(
        &mut self,
        name: impl Into<String>,
        expression: Option<ValueExpression>,
    ) -> Option<Rc<ValueExpression>> {
        let name = name.into();
        match expression {
            Some(e) => self.variables.insert(name, Rc::new(e)),
            None => self.variables.remove(&name),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names = self.variables.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}
