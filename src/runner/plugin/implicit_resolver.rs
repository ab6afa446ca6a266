//! A single fixed root name bound to a value supplied by the host.

use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::error::ResolveError;
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::plugin::resolver::{root_name, Resolution, Resolver};

/// Exposes `value` under the root identifier `root`. Read-only.
pub struct ImplicitObjectResolver {
    root: String,
    value: Value,
}

impl ImplicitObjectResolver {
    pub fn new(root: impl Into<String>, value: Value) -> Self {
        ImplicitObjectResolver {
            root: root.into(),
            value,
        }
    }

    fn claims(&self, base: Option<&Value>, property: &Value) -> bool {
        root_name(base, property) == Some(self.root.as_str())
    }
}

impl Resolver for ImplicitObjectResolver {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        if self.claims(base, property) {
            Some(Ok(self.value.clone()))
        } else {
            None
        }
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        if self.claims(base, property) {
            Some(Ok(self.value.value_type()))
        } else {
            None
        }
    }

    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
        if self.claims(base, property) {
            Some(Ok(true))
        } else {
            None
        }
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, _value: Value) -> Resolution<()> {
        if self.claims(base, property) {
            Some(Err(ResolveError::not_writable(format!(
                "'{}' is an implicit object",
                self.root
            ))))
        } else {
            None
        }
    }

    fn feature_descriptors<'a>(
        &'a self,
        base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        match base {
            None => Box::new(std::iter::once(
                FeatureDescriptor::new(self.root.clone(), self.value.value_type())
                    .with_description("implicit object"),
            )),
            Some(_) => Box::new(std::iter::empty()),
        }
    }

    fn name(&self) -> &str {
        &self.root
    }
}
