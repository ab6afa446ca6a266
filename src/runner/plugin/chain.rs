//! Resolver chain: an ordered composite of resolvers.
//!
//! ```text
//! get_value(base, property)
//!      ↓
//! 1. Ask resolver[0] → None (not mine)
//! 2. Ask resolver[1] → Some(Ok(v))   ← stop, v is the answer
//!    or            → Some(Err(e))  ← stop, e propagates
//! 3. resolver[2..] are never consulted
//! ```
//!
//! Order is load-bearing: a resolver placed later can never override one
//! placed earlier for the same identifier. Resolvers that hand out marker
//! values must sit before the generic fallbacks, otherwise a fallback would
//! see the marker as an ordinary base.
//!
//! ## Example
//!
//! ```
//! use pathres::runner::ds::value::Value;
//! use pathres::runner::plugin::chain::ResolverChain;
//! use pathres::runner::plugin::implicit_resolver::ImplicitObjectResolver;
//! use pathres::runner::plugin::resolver::Resolver;
//!
//! let mut chain = ResolverChain::new();
//! chain.add(Box::new(ImplicitObjectResolver::new("answer", Value::integer(42))));
//!
//! let v = chain.get_value(None, &Value::string("answer"));
//! assert_eq!(v, Some(Ok(Value::integer(42))));
//! assert_eq!(chain.get_value(None, &Value::string("question")), None);
//! ```

use tracing::{debug, trace};

use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::plugin::resolver::{Resolution, Resolver};

/// Ordered list of resolvers tried until one claims the request.
///
/// The chain is itself a [`Resolver`], so chains can be nested.
pub struct ResolverChain {
    resolvers: Vec<Box<dyn Resolver>>,
}

impl ResolverChain {
    pub fn new() -> Self {
        ResolverChain {
            resolvers: Vec::new(),
        }
    }

    /// Append a resolver; it is consulted after every resolver already present.
    pub fn add(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.push(resolver);
    }

    /// Put a resolver ahead of every resolver already present.
    pub fn prepend(&mut self, resolver: Box<dyn Resolver>) {
        self.resolvers.insert(0, resolver);
    }

    /// Insert at `index`, clamped to the length of the chain.
    pub fn insert(&mut self, index: usize, resolver: Box<dyn Resolver>) {
        let index = index.min(self.resolvers.len());
        self.resolvers.insert(index, resolver);
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    /// Resolver names in consultation order.
    pub fn names(&self) -> Vec<&str> {
        self.resolvers.iter().map(|r| r.name()).collect()
    }

    /// Assign through the chain, treating an unclaimed write as not writable.
    pub fn assign(
        &self,
        base: Option<&Value>,
        property: &Value,
        value: Value,
    ) -> Result<(), ResolveError> {
        match self.set_value(base, property, value) {
            Some(result) => result,
            None => Err(ResolveError::not_writable(format!(
                "no resolver accepts assignment to '{}'",
                property
            ))),
        }
    }

    fn dispatch<T>(
        &self,
        operation: &str,
        property: &Value,
        mut call: impl FnMut(&dyn Resolver) -> Resolution<T>,
    ) -> Resolution<T> {
        for resolver in &self.resolvers {
            if let Some(result) = call(resolver.as_ref()) {
                match &result {
                    Ok(_) => trace!(
                        resolver = resolver.name(),
                        operation,
                        property = %property,
                        "resolved"
                    ),
                    Err(e) => debug!(
                        resolver = resolver.name(),
                        operation,
                        property = %property,
                        error = %e,
                        "resolution failed"
                    ),
                }
                return Some(result);
            }
        }
        trace!(operation, property = %property, "unresolved");
        None
    }
}

impl Default for ResolverChain {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for ResolverChain {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        self.dispatch("get_value", property, |r| r.get_value(base, property))
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        self.dispatch("get_type", property, |r| r.get_type(base, property))
    }

    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
        self.dispatch("is_read_only", property, |r| r.is_read_only(base, property))
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, value: Value) -> Resolution<()> {
        self.dispatch("set_value", property, |r| {
            r.set_value(base, property, value.clone())
        })
    }

    fn feature_descriptors<'a>(
        &'a self,
        base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        Box::new(
            self.resolvers
                .iter()
                .flat_map(move |r| r.feature_descriptors(base)),
        )
    }

    fn common_property_type(&self, base: Option<&Value>) -> Option<ValueType> {
        self.resolvers
            .iter()
            .find_map(|r| r.common_property_type(base))
    }

    fn name(&self) -> &str {
        "chain"
    }
}
