use std::cell::RefCell;
use std::collections::HashMap;
use std::mem;
use std::rc::Rc;

use crate::runner::class::spec::{ClassSpec, InstanceState};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};

pub type ObjectRef = Rc<RefCell<HostObject>>;

pub struct ObjectBase {
    properties: HashMap<PropertyKey, PropertyDescriptor>,
    is_extensible: bool,
    prototype: Option<ObjectRef>,
}

impl ObjectBase {
    pub fn new() -> Self {
        ObjectBase {
            properties: HashMap::new(),
            is_extensible: true,
            prototype: None,
        }
    }
}

impl Default for ObjectBase {
    fn default() -> Self {
        Self::new()
    }
}

/// Discriminates the shared prototype from regular instances.
///
/// The shared template of a class carries no per-instance state; every
/// other object of the class owns exactly one `InstanceState`. The check
/// sits at the top of every instance-only operation.
pub enum ClassNature {
    /// Not a class object at all.
    Plain,
    /// The single shared prototype of a class within one context.
    SharedTemplate,
    /// A regular instance owning its state.
    Instance(Box<dyn InstanceState>),
    /// An instance whose state has already been released.
    Released,
}

pub struct HostObject {
    base: ObjectBase,
    class: Option<Rc<ClassSpec>>,
    nature: ClassNature,
}

impl HostObject {
    pub fn new_plain() -> ObjectRef {
        Rc::new(RefCell::new(HostObject {
            base: ObjectBase::new(),
            class: None,
            nature: ClassNature::Plain,
        }))
    }

    /// Create the shared prototype object of a class. One per class per
    /// context; the caller is responsible for caching it.
    pub fn new_shared_template(class: Rc<ClassSpec>) -> ObjectRef {
        Rc::new(RefCell::new(HostObject {
            base: ObjectBase::new(),
            class: Some(class),
            nature: ClassNature::SharedTemplate,
        }))
    }

    /// Create an instance carrying freshly constructed state, inheriting
    /// from the class's shared template.
    pub fn new_instance(
        class: Rc<ClassSpec>,
        state: Box<dyn InstanceState>,
        template: ObjectRef,
    ) -> ObjectRef {
        let mut base = ObjectBase::new();
        base.prototype = Some(template);
        Rc::new(RefCell::new(HostObject {
            base,
            class: Some(class),
            nature: ClassNature::Instance(state),
        }))
    }

    pub fn class(&self) -> Option<Rc<ClassSpec>> {
        self.class.clone()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class.as_ref().map(|c| c.name())
    }

    pub fn is_shared_template(&self) -> bool {
        matches!(self.nature, ClassNature::SharedTemplate)
    }

    pub fn has_instance_state(&self) -> bool {
        matches!(self.nature, ClassNature::Instance(_))
    }

    pub fn instance_state(&self) -> Option<&dyn InstanceState> {
        match &self.nature {
            ClassNature::Instance(state) => Some(state.as_ref()),
            _ => None,
        }
    }

    pub fn instance_state_mut(&mut self) -> Option<&mut dyn InstanceState> {
        match &mut self.nature {
            ClassNature::Instance(state) => Some(state.as_mut()),
            _ => None,
        }
    }

    pub fn prototype(&self) -> Option<ObjectRef> {
        self.base.prototype.clone()
    }

    pub fn is_extensible(&self) -> bool {
        self.base.is_extensible
    }

    pub fn prevent_extensions(&mut self) {
        self.base.is_extensible = false;
    }

    pub fn get_own_property(&self, property: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.base.properties.get(property)
    }

    pub fn has_own_property(&self, property: &PropertyKey) -> bool {
        self.base.properties.contains_key(property)
    }

    /// Add or replace an own property.
    ///
    /// Redefinition of a non-configurable property is rejected, as is any
    /// addition to a non-extensible object.
    pub fn define_own_property(
        &mut self,
        property: PropertyKey,
        descriptor: PropertyDescriptor,
    ) -> bool {
        match self.base.properties.get(&property) {
            Some(current) => {
                if !current.is_configurable() {
                    return false;
                }
                self.base.properties.insert(property, descriptor);
                true
            }
            None => {
                if !self.base.is_extensible {
                    return false;
                }
                self.base.properties.insert(property, descriptor);
                true
            }
        }
    }

    pub fn has_property(&self, property: &PropertyKey) -> bool {
        if self.base.properties.contains_key(property) {
            true
        } else {
            match &self.base.prototype {
                None => false,
                Some(p) => p.borrow().has_property(property),
            }
        }
    }

    /// Own keys in enumeration order: integer keys sorted ascending, then
    /// string keys.
    pub fn own_property_keys(&self) -> Vec<PropertyKey> {
        let mut int_keys = vec![];
        let mut str_keys = vec![];
        for key in self.base.properties.keys() {
            match key {
                PropertyKey::Int(i) => int_keys.push(*i),
                PropertyKey::Str(s) => str_keys.push(s.to_string()),
            }
        }
        int_keys.sort_unstable();
        str_keys.sort_unstable();

        let mut result: Vec<PropertyKey> = int_keys.into_iter().map(PropertyKey::Int).collect();
        result.extend(str_keys.into_iter().map(PropertyKey::Str));
        result
    }

    /// Release instance state exactly once.
    ///
    /// Invoked from `Drop`, and callable by embedders ahead of that.
    /// Idempotent: on the shared template, a plain object, or an
    /// already-released instance this is a defined no-op.
    pub fn finalize(&mut self) {
        if let ClassNature::Instance(_) = self.nature {
            let taken = mem::replace(&mut self.nature, ClassNature::Released);
            if let ClassNature::Instance(state) = taken {
                if let Some(hook) = self.class.as_ref().and_then(|c| c.finalize_hook()) {
                    hook(state);
                }
            }
        }
    }

    pub fn to_display_string(&self) -> String {
        match self.class_name() {
            Some(name) => format!("[object {}]", name),
            None => "[object Object]".to_string(),
        }
    }
}

impl Drop for HostObject {
    fn drop(&mut self) {
        self.finalize();
    }
}
