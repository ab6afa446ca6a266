use std::sync::{Arc, RwLock};

use crate::runner::ds::error::ResolveError;
use crate::runner::ds::value::Value;

pub type RecordRef = Arc<RwLock<dyn Record>>;

/// An object-like value with named accessor properties.
///
/// The record resolver classifies requests (unknown name, read-only property)
/// before calling `set_property`, so implementations only need to store.
pub trait Record: Send + Sync {
    fn type_name(&self) -> &str;

    fn property_names(&self) -> Vec<String>;

    fn get_property(&self, name: &str) -> Option<Value>;

    fn is_writable(&self, name: &str) -> bool;

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ResolveError>;

    fn has_property(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }
}

struct RecordProperty {
    name: String,
    value: Value,
    writable: bool,
}

/// Record backed by an ordered list of properties.
pub struct SimpleRecord {
    type_name: String,
    properties: Vec<RecordProperty>,
}

impl SimpleRecord {
    pub fn new(type_name: impl Into<String>) -> Self {
        SimpleRecord {
            type_name: type_name.into(),
            properties: Vec::new(),
        }
    }

    /// Add a readable and writable property.
    pub fn with_property(self, name: impl Into<String>, value: Value) -> Self {
        self.push(name.into(), value, true)
    }

    /// Add a property that has a getter but no setter.
    pub fn with_read_only_property(self, name: impl Into<String>, value: Value) -> Self {
        self.push(name.into(), value, false)
    }

    fn push(mut self, name: String, value: Value, writable: bool) -> Self {
        self.properties.retain(|p| p.name != name);
        self.properties.push(RecordProperty {
            name,
            value,
            writable,
        });
        self
    }

    fn find(&self, name: &str) -> Option<&RecordProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

impl Record for SimpleRecord {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn property_names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }

    fn get_property(&self, name: &str) -> Option<Value> {
        self.find(name).map(|p| p.value.clone())
    }

    fn is_writable(&self, name: &str) -> bool {
        self.find(name).map(|p| p.writable).unwrap_or(false)
    }

    fn set_property(&mut self, name: &str, value: Value) -> Result<(), ResolveError> {
        let type_name = self.type_name.clone();
        match self.properties.iter_mut().find(|p| p.name == name) {
            Some(p) if p.writable => {
                p.value = value;
                Ok(())
            }
            Some(_) => Err(ResolveError::not_writable(format!(
                "{}.{} has no setter",
                type_name, name
            ))),
            None => Err(ResolveError::not_found(format!(
                "{}.{}",
                type_name, name
            ))),
        }
    }
}
