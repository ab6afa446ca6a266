//! Local variables resolved at the root of a path.
//!
//! Reads only succeed for names already in the store; an unknown name is left
//! to the rest of the chain. Writes to any root name succeed and create the
//! entry when it is missing. Every expression sees the latest stored value.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::runner::ds::descriptor::FeatureDescriptor;
use crate::runner::ds::shared;
use crate::runner::ds::value::{Value, ValueType};
use crate::runner::plugin::resolver::{root_name, Resolution, Resolver};

/// Shared, mutable `name -> value` map.
///
/// Clones share the same storage, so the evaluation context and its resolver
/// see each other's writes.
#[derive(Clone, Default)]
pub struct LocalVariableStore {
    beans: Arc<RwLock<HashMap<String, Value>>>,
}

impl LocalVariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&self, name: impl Into<String>, value: Value) -> Option<Value> {
        shared::write(&self.beans).insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        shared::read(&self.beans).get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        shared::read(&self.beans).contains_key(name)
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        shared::write(&self.beans).remove(name)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names = shared::read(&self.beans).keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        shared::read(&self.beans).len()
    }

    pub fn is_empty(&self) -> bool {
        shared::read(&self.beans).is_empty()
    }

    /// Swap the whole content, returning what was there before.
    pub fn replace(&self, beans: HashMap<String, Value>) -> HashMap<String, Value> {
        std::mem::replace(&mut *shared::write(&self.beans), beans)
    }
}

pub struct LocalVariableResolver {
    store: LocalVariableStore,
}

impl LocalVariableResolver {
    pub fn new(store: LocalVariableStore) -> Self {
        LocalVariableResolver { store }
    }

    pub fn store(&self) -> &LocalVariableStore {
        &self.store
    }
}

impl Resolver for LocalVariableResolver {
    fn get_value(&self, base: Option<&Value>, property: &Value) -> Resolution<Value> {
        let name = root_name(base, property)?;
        self.store.get(name).map(Ok)
    }

    fn get_type(&self, base: Option<&Value>, property: &Value) -> Resolution<ValueType> {
        let name = root_name(base, property)?;
        self.store.get(name).map(|v| Ok(v.value_type()))
    }

    fn is_read_only(&self, base: Option<&Value>, property: &Value) -> Resolution<bool> {
        root_name(base, property).map(|_| Ok(false))
    }

    fn set_value(&self, base: Option<&Value>, property: &Value, value: Value) -> Resolution<()> {
        let name = root_name(base, property)?;
        self.store.define(name, value);
        Some(Ok(()))
    }

    fn feature_descriptors<'a>(
        &'a self,
        base: Option<&'a Value>,
    ) -> Box<dyn Iterator<Item = FeatureDescriptor> + 'a> {
        if base.is_some() {
            return Box::new(std::iter::empty());
        }
        let descriptors = self
            .store
            .names()
            .into_iter()
            .filter_map(|name| {
                let value = self.store.get(&name)?;
                Some(
                    FeatureDescriptor::new(name, value.value_type())
                        .with_description("local variable"),
                )
            })
            .collect::<Vec<_>>();
        Box::new(descriptors.into_iter())
    }

    fn common_property_type(&self, base: Option<&Value>) -> Option<ValueType> {
        match base {
            None => Some(ValueType::String),
            Some(_) => None,
        }
    }

    fn name(&self) -> &str {
        "local_variables"
    }
}
