//! Resolver trait for pluggable resolution of path segments.
//!
//! A path expression such as `a.b[c]` is walked one `(base, property)` pair at a
//! time. For the root segment `base` is `None`. Each resolver decides whether the
//! pair belongs to it.

use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::value::{Value, ValueType};

/// Outcome of one resolver call.
///
/// - `None`: not this resolver's concern, the chain moves on.
/// - `Some(Ok(..))`: resolved.
/// - `Some(Err(..))`: claimed but invalid; terminal for the whole chain.
pub type Resolution<T> = Option<Result<T, ResolveError>>;

/// A unit of resolution logic for one kind of base.
///
/// Resolvers are queried in registration order. The first one that returns
/// `Some` wins. Implementations must check the shape of `base` and `property`
/// themselves and never assume they are the only resolver asked.
///
/// A chain is shared read-only between concurrent evaluations, so resolvers
/// must be `Send + Sync` and keep any mutable state behind a lock.
pub trait Resolver: Send + Sync {
    /// Read the value of `property` on `base`.
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value>;

    /// The type `get_value` would produce, without evaluating side effects.
    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType>;

    /// Whether a `set_value` on the same pair would be refused.
    ///
    /// Returns `Some(Ok(true))` unless an assignment is actually expected to succeed.
    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool>;

    fn set_value(&self, base: Option<&Value>, property: &Value, value: Value) -> Resolution<()>;

    /// Names available on `base`, for tooling. Not needed for resolution.
    fn feature_descriptors<'a>(
        &'a self,
        _base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        Box::new(std::iter::empty())
    }

    /// The most general type of property this resolver accepts for `base`.
    fn common_property_type(&self, _base: Option<&Value>) -> Option<ValueType> {
        None
    }

    /// Human-readable name for this resolver (for debugging/logging).
    fn name(&self) -> &str;
}

/// The root identifier named by `property`, when `base` is the root.
pub(crate) fn root_name<'v>(base: Option<&Value>, property: &'v Value) -> Option<&'v str> {
    match (base, property) {
        (None, Value::String(name)) => Some(name.as_str()),
        _ => None,
    }
}
