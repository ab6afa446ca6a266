//! Classes with named fields, as seen through the class namespace.
//!
//! A class is looked up by its qualified name through a [`ClassLoader`]. Only
//! its static fields are reachable from a path expression; instance fields are
//! kept so that the static check has something to reject.

use std::sync::{Arc, RwLock};

use crate::runner::ds::shared;
use crate::runner::ds::value::Value;

pub type ClassRef = Arc<ClassDef>;

pub struct FieldDef {
    value: RwLock<Value>,
    is_static: bool,
    is_final: bool,
}

impl FieldDef {
    pub fn value(&self) -> Value {
        shared::read(&self.value).clone()
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Static and not final.
    pub fn is_assignable(&self) -> bool {
        self.is_static && !self.is_final
    }

    /// Stores a new value. Callers check [`FieldDef::is_assignable`] first.
    pub(crate) fn store(&self, value: Value) {
        *shared::write(&self.value) = value;
    }
}

pub struct ClassDef {
    name: String,
    fields: Vec<(String, FieldDef)>,
}

impl ClassDef {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDef {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Mutable static field.
    pub fn with_static_field(self, name: impl Into<String>, value: Value) -> Self {
        self.with_field(name.into(), value, true, false)
    }

    /// Static final field.
    pub fn with_constant(self, name: impl Into<String>, value: Value) -> Self {
        self.with_field(name.into(), value, true, true)
    }

    pub fn with_instance_field(self, name: impl Into<String>, value: Value) -> Self {
        self.with_field(name.into(), value, false, false)
    }

    fn with_field(mut self, name: String, value: Value, is_static: bool, is_final: bool) -> Self {
        self.fields.retain(|(n, _)| *n != name);
        self.fields.push((
            name,
            FieldDef {
                value: RwLock::new(value),
                is_static,
                is_final,
            },
        ));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, f)| f)
    }

    pub fn static_field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(_, f)| f.is_static)
            .map(|(n, _)| n.clone())
            .collect()
    }

    pub fn into_ref(self) -> ClassRef {
        Arc::new(self)
    }
}

/// Capability to find a class by its qualified name.
pub trait ClassLoader: Send + Sync {
    fn load_class(&self, name: &str) -> Option<ClassRef>;

    /// Names this loader can enumerate. Loaders that cannot list return nothing.
    fn class_names(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Loader that never finds a class, for deployments where reflection is off.
pub struct DisabledClassLoader;

impl ClassLoader for DisabledClassLoader {
    fn load_class(&self, _name: &str) -> Option<ClassRef> {
        None
    }
}
