//! In-process class registry backing the class namespace.

use std::collections::HashMap;

use crate::runner::ds::class::{ClassDef, ClassLoader, ClassRef};
use crate::runner::std_lib::register_core_classes;

/// Registry for classes reachable through `Class['name']`.
/// Classes are keyed by their qualified name; registering a name twice replaces it.
pub struct ClassRegistry {
    /// All registered classes.
    classes: HashMap<String, ClassRef>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ClassRegistry {
            classes: HashMap::new(),
        }
    }

    /// Create a registry with the core classes (`java.lang.Math`).
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        register_core_classes(&mut registry);
        registry
    }

    /// Register a class (programmatic API).
    pub fn register_class(&mut self, class: ClassDef) -> ClassRef {
        let class = class.into_ref();
        self.classes
            .insert(class.name().to_string(), ClassRef::clone(&class));
        class
    }

    /// Get a registered class by qualified name.
    pub fn get_class(&self, name: &str) -> Option<&ClassRef> {
        self.classes.get(name)
    }

    /// Check if a class exists in the registry.
    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::with_core()
    }
}

impl ClassLoader for ClassRegistry {
    fn load_class(&self, name: &str) -> Option<ClassRef> {
        self.classes.get(name).cloned()
    }

    fn class_names(&self) -> Vec<String> {
        let mut names = self.classes.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}
