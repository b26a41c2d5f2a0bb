//! Lazy member resolution on class prototypes.
//!
//! A property miss on a class object gives the resolver a chance to
//! materialize the member. Resolution only ever happens on the shared
//! prototype: an instance skips, and the ordinary prototype-chain walk
//! re-enters resolution against the template. Once materialized, a member
//! is an ordinary property and the resolver is never consulted for it
//! again.

use std::rc::Rc;

use crate::runner::class::spec::{ClassSpec, LazyMember};
use crate::runner::ds::function::Callable;
use crate::runner::ds::object::HostObject;
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::Value;

/// Cheap pre-check: can `key` ever resolve on `class`?
///
/// An optimization hook, not a correctness-bearing one: it lets property
/// lookup skip the resolution path for names that can never resolve,
/// without touching any object.
pub fn may_resolve(class: &ClassSpec, key: &PropertyKey) -> bool {
    match key {
        PropertyKey::Str(name) => class.defines_member(name),
        PropertyKey::Int(_) => false,
    }
}

/// Materialize the member named by `key` on `object`, if appropriate.
///
/// Returns `true` only when a concrete member was defined. Skips when
/// `object` is not the shared template (the lookup chain will re-invoke
/// resolution against the template) and when `key` is not a simple
/// string-valued name.
pub fn resolve(object: &mut HostObject, key: &PropertyKey) -> bool {
    if !object.is_shared_template() {
        return false;
    }

    let name = match key {
        PropertyKey::Str(name) => name,
        PropertyKey::Int(_) => return false,
    };

    let class = match object.class() {
        Some(class) => class,
        None => return false,
    };

    match class.lazy_member(name) {
        Some(LazyMember::Method { arity, body }) => {
            let function = Rc::new(Callable::native(name.as_str(), *arity, *body));
            object.define_own_property(
                key.clone(),
                PropertyDescriptor::Data {
                    value: Value::Function(function),
                    writable: true,
                    enumerable: true,
                    configurable: true,
                },
            );
            true
        }
        Some(LazyMember::Getter(body)) => {
            let getter = Rc::new(Callable::getter(name.as_str(), *body));
            object.define_own_property(
                key.clone(),
                PropertyDescriptor::Accessor {
                    get: Some(getter),
                    enumerable: true,
                    configurable: true,
                },
            );
            true
        }
        None => false,
    }
}

/// Report the lazily-resolvable member names without materializing any.
///
/// Exactly the dispatch-table names, in registration order, when `object`
/// is the shared template; empty for instances and plain objects, whose
/// materialized members enumerate through the ordinary mechanisms.
pub fn enumerate_resolvable(object: &HostObject) -> Vec<String> {
    if !object.is_shared_template() {
        return Vec::new();
    }
    match object.class() {
        Some(class) => class.member_names(),
        None => Vec::new(),
    }
}
