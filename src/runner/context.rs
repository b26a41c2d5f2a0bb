//! Evaluation context: bindings plus lazy materialization of registered
//! classes.
//!
//! Class names resolve the way the lookup goes: local bindings first,
//! then the materialization cache, then the registry. The first reference
//! to a registered class creates its constructor and its single shared
//! prototype object; both are cached so each class materializes at most
//! once per context.

use std::collections::HashMap;
use std::rc::Rc;

use crate::runner::class::registry::ClassRegistry;
use crate::runner::class::spec::ClassSpec;
use crate::runner::config::EngineConfig;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::function::Callable;
use crate::runner::ds::object::{HostObject, ObjectRef};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::Value;

lazy_static! {
    static ref CONSTRUCTOR_PROP: PropertyKey = PropertyKey::Str("constructor".to_string());
}

/// A class made concrete within one context: its constructor callable and
/// its shared prototype object.
pub struct MaterializedClass {
    pub constructor: Rc<Callable>,
    pub template: ObjectRef,
}

pub struct EvalContext {
    config: EngineConfig,
    registry: ClassRegistry,
    bindings: HashMap<String, Value>,
    materialized: HashMap<String, MaterializedClass>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        EvalContext {
            config,
            registry: ClassRegistry::new(),
            bindings: HashMap::new(),
            materialized: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Install a registry of classes, replacing the current one.
    pub fn install_classes(&mut self, registry: ClassRegistry) {
        self.registry = registry;
    }

    /// Register a single additional class.
    pub fn register_class(&mut self, spec: ClassSpec) {
        self.registry.register(spec);
    }

    /// Declare (or overwrite) a named binding. Local bindings shadow
    /// registered class names.
    pub fn declare_binding(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn has_binding(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
            || self.materialized.contains_key(name)
            || self.registry.has_class(name)
    }

    /// Resolve a name: local bindings, then (lazily materialized)
    /// registered classes. Unknown names are reference errors.
    pub fn get_binding(&mut self, name: &str) -> Result<Value, EngineError> {
        if let Some(value) = self.bindings.get(name) {
            return Ok(value.clone());
        }
        if let Some(class) = self.lookup_class(name) {
            return Ok(Value::Function(class.constructor.clone()));
        }
        Err(EngineError::Reference(format!("{} is not defined", name)))
    }

    /// The shared prototype object of a registered class, materializing
    /// the class if this is its first reference.
    pub fn class_template(&mut self, name: &str) -> Result<ObjectRef, EngineError> {
        match self.lookup_class(name) {
            Some(class) => Ok(class.template.clone()),
            None => Err(EngineError::Reference(format!("{} is not defined", name))),
        }
    }

    /// The constructor of a registered class, materializing the class if
    /// this is its first reference.
    pub fn class_constructor(&mut self, name: &str) -> Result<Rc<Callable>, EngineError> {
        match self.lookup_class(name) {
            Some(class) => Ok(class.constructor.clone()),
            None => Err(EngineError::Reference(format!("{} is not defined", name))),
        }
    }

    fn lookup_class(&mut self, name: &str) -> Option<&MaterializedClass> {
        if !self.materialized.contains_key(name) {
            let spec = self.registry.get(name)?;
            let materialized = materialize_class(spec);
            self.materialized.insert(name.to_string(), materialized);
        }
        self.materialized.get(name)
    }
}

impl Default for EvalContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the constructor and the single shared prototype of a class.
///
/// The template gets a non-enumerable `constructor` back-reference, the
/// way an engine's class-initialization hook wires prototypes up.
fn materialize_class(spec: Rc<ClassSpec>) -> MaterializedClass {
    let template = HostObject::new_shared_template(spec.clone());
    let constructor = Rc::new(Callable::constructor(spec, template.clone()));
    template.borrow_mut().define_own_property(
        CONSTRUCTOR_PROP.clone(),
        PropertyDescriptor::Data {
            value: Value::Function(constructor.clone()),
            writable: true,
            enumerable: false,
            configurable: true,
        },
    );
    MaterializedClass {
        constructor,
        template,
    }
}
