//! Registry of native class specifications.

use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::class::spec::ClassSpec;
use crate::runner::std_classes::register_core_classes;

/// Holds the class specs an evaluation context can materialize.
///
/// Registering a spec makes its name resolvable from scripts; the
/// prototype and constructor are only created on first reference.
pub struct ClassRegistry {
    classes: HashMap<String, Rc<ClassSpec>>,
    registration_order: Vec<String>,
}

impl ClassRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ClassRegistry {
            classes: HashMap::new(),
            registration_order: Vec::new(),
        }
    }

    /// Create a registry with the core classes (Crc, Uint8Array).
    pub fn with_core() -> Self {
        let mut registry = Self::new();
        register_core_classes(&mut registry);
        registry
    }

    pub fn register(&mut self, spec: ClassSpec) {
        let name = spec.name().to_string();
        if !self.classes.contains_key(&name) {
            self.registration_order.push(name.clone());
        }
        self.classes.insert(name, Rc::new(spec));
    }

    pub fn get(&self, name: &str) -> Option<Rc<ClassSpec>> {
        self.classes.get(name).cloned()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, in registration order.
    pub fn class_names(&self) -> Vec<&str> {
        self.registration_order.iter().map(|s| s.as_str()).collect()
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::with_core()
    }
}
