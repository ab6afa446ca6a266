//! Compiled path expressions.
//!
//! A path is walked left to right. The root is looked up in the variables
//! captured at compile time and then in the resolver chain; every later segment
//! is a `(base, property)` request to the chain.
//!
//! ```text
//! a.b[c]   →   root "a"       → captured variable, else chain(None, "a")
//!              .b             → chain(Some(a), "b")
//!              [c]            → chain(Some(a.b), eval(c))
//! ```

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::parser::ast::{Expr, Literal, PathExpr, Root, Segment};
use crate::parser::PathParser;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::eval::context::EvaluationContext;
use crate::runner::eval::function::{FunctionMapper, NativeFunction};
use crate::runner::eval::variables::{ValueExpression, VariableMapper};
use crate::runner::plugin::resolver::Resolver;

/// A parsed path with its variable and function bindings fixed.
///
/// Re-binding a variable after compilation does not affect this expression.
/// Local variables and every other resolver are still read live.
#[derive(Clone)]
pub struct CompiledExpression {
    source: String,
    expr: Rc<Expr>,
    variables: HashMap<String, Rc<ValueExpression>>,
    functions: HashMap<(String, String), NativeFunction>,
}

/// Where a write, type query or writability check lands.
enum Target {
    /// The root identifier itself.
    Root(String),
    /// A property of an already evaluated base.
    Property(Value, Value),
}

impl CompiledExpression {
    pub fn compile(
        source: &str,
        variables: &VariableMapper,
        functions: &FunctionMapper,
    ) -> Result<Self, ResolveError> {
        let expr = PathParser::parse_to_ast_from_str(source)?;
        let captured = expr
            .root_identifiers()
            .into_iter()
            .filter_map(|name| {
                variables
                    .resolve_variable(name)
                    .map(|binding| (name.to_string(), binding))
            })
            .collect::<HashMap<_, _>>();
        let mut bound = HashMap::new();
        for call in expr.function_calls() {
            let function = functions
                .resolve_function(&call.prefix, &call.name)
                .ok_or_else(|| ResolveError::FunctionNotFound {
                    prefix: call.prefix.clone(),
                    name: call.name.clone(),
                })?;
            bound.insert((call.prefix.clone(), call.name.clone()), function.clone());
        }
        trace!(
            source,
            variables = captured.len(),
            functions = bound.len(),
            "compiled expression"
        );
        Ok(CompiledExpression {
            source: source.to_string(),
            expr: Rc::new(expr),
            variables: captured,
            functions: bound,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Names of variables captured at compile time.
    pub fn captured_variables(&self) -> Vec<&str> {
        let mut names = self.variables.keys().map(|n| n.as_str()).collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn get_value(&self, ctx: &EvaluationContext) -> Result<Value, ResolveError> {
        self.eval(&self.expr, ctx)
    }

    pub fn get_type(&self, ctx: &EvaluationContext) -> Result<ValueType, ResolveError> {
        let path = match self.expr.as_ref() {
            Expr::Literal(l) => return Ok(literal_value(l).value_type()),
            Expr::Path(path) => path,
        };
        match self.target(path, ctx)? {
            None => Ok(self.eval(&self.expr, ctx)?.value_type()),
            Some(Target::Root(name)) => match self.variables.get(&name) {
                Some(binding) => binding.get_type(ctx),
                None => resolved(
                    ctx.resolver().get_type(None, &Value::string(name.as_str())),
                    || unresolved_root(&name),
                ),
            },
            Some(Target::Property(base, property)) => resolved(
                ctx.resolver().get_type(Some(&base), &property),
                || unresolved_property(&base, &property),
            ),
        }
    }

    pub fn is_read_only(&self, ctx: &EvaluationContext) -> Result<bool, ResolveError> {
        let path = match self.expr.as_ref() {
            Expr::Literal(_) => return Ok(true),
            Expr::Path(path) => path,
        };
        match self.target(path, ctx)? {
            None => Ok(true),
            Some(Target::Root(name)) => match self.variables.get(&name) {
                Some(binding) => binding.is_read_only(ctx),
                None => resolved(
                    ctx.resolver().is_read_only(None, &Value::string(name.as_str())),
                    || unresolved_root(&name),
                ),
            },
            Some(Target::Property(base, property)) => resolved(
                ctx.resolver().is_read_only(Some(&base), &property),
                || unresolved_property(&base, &property),
            ),
        }
    }

    pub fn set_value(&self, ctx: &EvaluationContext, value: Value) -> Result<(), ResolveError> {
        let path = match self.expr.as_ref() {
            Expr::Literal(_) => {
                return Err(ResolveError::not_writable(format!(
                    "cannot assign to literal '{}'",
                    self.source
                )))
            }
            Expr::Path(path) => path,
        };
        match self.target(path, ctx)? {
            None => Err(ResolveError::not_writable(format!(
                "cannot assign to function result '{}'",
                self.source
            ))),
            Some(Target::Root(name)) => match self.variables.get(&name) {
                Some(binding) => binding.set_value(ctx, value),
                None => ctx
                    .resolver()
                    .assign(None, &Value::string(name.as_str()), value),
            },
            Some(Target::Property(base, property)) => {
                ctx.resolver().assign(Some(&base), &property, value)
            }
        }
    }

    fn eval(&self, expr: &Expr, ctx: &EvaluationContext) -> Result<Value, ResolveError> {
        match expr {
            Expr::Literal(l) => Ok(literal_value(l)),
            Expr::Path(path) => {
                let mut base = self.eval_root(&path.root, ctx)?;
                for segment in &path.segments {
                    if base.is_null() {
                        return Ok(Value::Null);
                    }
                    let property = self.eval_segment(segment, ctx)?;
                    base = resolved(ctx.resolver().get_value(Some(&base), &property), || {
                        unresolved_property(&base, &property)
                    })?;
                }
                Ok(base)
            }
        }
    }

    fn eval_root(&self, root: &Root, ctx: &EvaluationContext) -> Result<Value, ResolveError> {
        match root {
            Root::Identifier(name) => match self.variables.get(name) {
                Some(binding) => binding.get_value(ctx),
                None => resolved(
                    ctx.resolver().get_value(None, &Value::string(name.as_str())),
                    || unresolved_root(name),
                ),
            },
            Root::Call(call) => {
                let key = (call.prefix.clone(), call.name.clone());
                let function = self.functions.get(&key).ok_or_else(|| {
                    ResolveError::FunctionNotFound {
                        prefix: call.prefix.clone(),
                        name: call.name.clone(),
                    }
                })?;
                let args = call
                    .arguments
                    .iter()
                    .map(|arg| self.eval(arg, ctx))
                    .collect::<Result<Vec<_>, _>>()?;
                function.call(args)
            }
        }
    }

    fn eval_segment(&self, segment: &Segment, ctx: &EvaluationContext) -> Result<Value, ResolveError> {
        match segment {
            Segment::Property(name) => Ok(Value::string(name.as_str())),
            Segment::Index(index) => self.eval(index, ctx),
        }
    }

    /// Evaluates everything but the last segment.
    ///
    /// `None` means the path ends in a function call and has no assignable target.
    fn target(&self, path: &PathExpr, ctx: &EvaluationContext) -> Result<Option<Target>, ResolveError> {
        let (last, init) = match path.segments.split_last() {
            Some(split) => split,
            None => {
                return Ok(match &path.root {
                    Root::Identifier(name) => Some(Target::Root(name.clone())),
                    Root::Call(_) => None,
                })
            }
        };
        let mut base = self.eval_root(&path.root, ctx)?;
        for segment in init {
            if base.is_null() {
                break;
            }
            let property = self.eval_segment(segment, ctx)?;
            base = resolved(ctx.resolver().get_value(Some(&base), &property), || {
                unresolved_property(&base, &property)
            })?;
        }
        if base.is_null() {
            return Err(ResolveError::not_found(format!(
                "target unreachable: '{}' passes through null",
                self.source
            )));
        }
        let property = self.eval_segment(last, ctx)?;
        Ok(Some(Target::Property(base, property)))
    }
}

impl fmt::Debug for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CompiledExpression({})", self.source)
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Boolean(b) => Value::Boolean(*b),
        Literal::Integer(i) => Value::integer(*i),
        Literal::Float(f) => Value::float(*f),
        Literal::String(s) => Value::string(s.as_str()),
    }
}

/// Turns an unclaimed request into the error produced by `unclaimed`.
fn resolved<T>(
    resolution: Option<Result<T, ResolveError>>,
    unclaimed: impl FnOnce() -> ResolveError,
) -> Result<T, ResolveError> {
    resolution.unwrap_or_else(|| Err(unclaimed()))
}

fn unresolved_root(name: &str) -> ResolveError {
    ResolveError::not_found(format!("identifier '{}' cannot be resolved", name))
}

fn unresolved_property(base: &Value, property: &Value) -> ResolveError {
    ResolveError::not_found(format!(
        "property '{}' not found on type {}",
        property,
        base.value_type()
    ))
}
