//! Evaluation context: the resolver chain plus variable and function bindings.
//!
//! The chain is assembled in a fixed priority order:
//!
//! ```text
//! [local variables] [custom resolvers...] [map] [list] [array] [record]
//!                    ↑ add_resolver inserts here, after earlier custom ones
//! ```
//!
//! With `local_variables = "last"` the local resolver moves behind the record
//! resolver, so every other resolver gets first refusal on a root name.

use tracing::debug;

use crate::runner::ds::error::ResolveError;
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::eval::expression::CompiledExpression;
use crate::runner::eval::function::{FunctionMapper, NativeFunction};
use crate::runner::eval::variables::{ValueExpression, VariableMapper};
use crate::runner::plugin::array_resolver::ArrayResolver;
use crate::runner::plugin::chain::ResolverChain;
use crate::runner::plugin::class_resolver::ClassResolver;
use crate::runner::plugin::color_resolver::ColorResolver;
use crate::runner::plugin::config::{ContextConfig, LocalPlacement};
use crate::runner::plugin::list_resolver::ListResolver;
use crate::runner::plugin::local_resolver::{LocalVariableResolver, LocalVariableStore};
use crate::runner::plugin::map_resolver::MapResolver;
use crate::runner::plugin::record_resolver::RecordResolver;
use crate::runner::plugin::registry::ClassRegistry;
use crate::runner::plugin::resolver::Resolver;
use crate::runner::std_lib::register_core_functions;

pub struct EvaluationContext {
    resolver: ResolverChain,
    /// Index at which the next custom resolver is inserted.
    custom_slot: usize,
    beans: LocalVariableStore,
    variables: VariableMapper,
    functions: FunctionMapper,
}

impl EvaluationContext {
    /// Default chain, no namespaces, core functions under `fn`.
    pub fn new() -> Self {
        Self::from_config(&ContextConfig::default())
    }

    pub fn from_config(config: &ContextConfig) -> Self {
        let beans = LocalVariableStore::new();
        let read_only = config.resolvers.read_only_collections;

        let mut resolver = ResolverChain::new();
        resolver.add(Box::new(MapResolver::new(read_only)));
        resolver.add(Box::new(ListResolver::new(read_only)));
        resolver.add(Box::new(ArrayResolver::new(read_only)));
        resolver.add(Box::new(RecordResolver::new(read_only)));

        let local = Box::new(LocalVariableResolver::new(beans.clone()));
        let custom_slot = match config.resolvers.local_variables {
            LocalPlacement::First => {
                resolver.prepend(local);
                1
            }
            LocalPlacement::Last => {
                resolver.add(local);
                0
            }
        };

        let mut ctx = EvaluationContext {
            resolver,
            custom_slot,
            beans,
            variables: VariableMapper::new(),
            functions: FunctionMapper::new(),
        };
        if config.resolvers.class_namespace {
            ctx.add_resolver(Box::new(ClassResolver::new(ClassRegistry::with_core())));
        }
        if config.resolvers.color_namespace {
            ctx.add_resolver(Box::new(ColorResolver::new()));
        }
        if !config.functions.core_prefix.is_empty() {
            register_core_functions(&mut ctx.functions, &config.functions.core_prefix);
        }
        debug!(resolvers = ?ctx.resolver.names(), "evaluation context assembled");
        ctx
    }

    /// Insert a resolver ahead of the generic fallbacks.
    ///
    /// Resolvers added this way keep their registration order among themselves.
    pub fn add_resolver(&mut self, resolver: Box<dyn Resolver>) {
        self.resolver.insert(self.custom_slot, resolver);
        self.custom_slot += 1;
    }

    pub fn resolver(&self) -> &ResolverChain {
        &self.resolver
    }

    /// The local variable store. Clones share storage with the chain.
    pub fn beans(&self) -> &LocalVariableStore {
        &self.beans
    }

    pub fn define_bean(&self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.beans.define(name, value)
    }

    /// Bind `name` to a fixed value. Returns the previous binding, if any.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) -> Option<ValueExpression> {
        self.bind_variable(name, Some(ValueExpression::Literal(value)))
    }

    /// Bind, rebind or remove `name`.
    pub fn bind_variable(
        &mut self,
        name: impl Into<String>,
        expression: Option<ValueExpression>,
    ) -> Option<ValueExpression> {
        self.variables
            .set_variable(name, expression)
            .map(|previous| previous.as_ref().clone())
    }

    pub fn variable_mapper(&self) -> &VariableMapper {
        &self.variables
    }

    pub fn variable_mapper_mut(&mut self) -> &mut VariableMapper {
        &mut self.variables
    }

    pub fn function_mapper(&self) -> &FunctionMapper {
        &self.functions
    }

    pub fn define_function(&mut self, prefix: &str, local_name: &str, function: NativeFunction) {
        self.functions.define_function(prefix, local_name, function);
    }

    /// Compile `source` into a value expression usable as a variable binding.
    pub fn create_value_expression(&self, source: &str) -> Result<ValueExpression, ResolveError> {
        self.compile(source).map(ValueExpression::Expression)
    }

    /// Parse `source` and capture the current variable and function bindings.
    pub fn compile(&self, source: &str) -> Result<CompiledExpression, ResolveError> {
        CompiledExpression::compile(source, &self.variables, &self.functions)
    }

    pub fn eval(&self, source: &str) -> Result<Value, ResolveError> {
        self.get_value(source)
    }

    pub fn get_value(&self, source: &str) -> Result<Value, ResolveError> {
        self.compile(source)?.get_value(self)
    }

    pub fn set_value(&self, source: &str, value: Value) -> Result<(), ResolveError> {
        self.compile(source)?.set_value(self, value)
    }

    pub fn get_type(&self, source: &str) -> Result<ValueType, ResolveError> {
        self.compile(source)?.get_type(self)
    }

    pub fn is_read_only(&self, source: &str) -> Result<bool, ResolveError> {
        self.compile(source)?.is_read_only(self)
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}
