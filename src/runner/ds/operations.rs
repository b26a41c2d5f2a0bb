//! Abstract operations over host objects: property lookup with lazy
//! class resolution, and enumeration.

use std::rc::Rc;

use crate::runner::class::resolver;
use crate::runner::context::EvalContext;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::function::Callable;
use crate::runner::ds::object::{HostObject, ObjectRef};
use crate::runner::ds::object_property::{PropertyDescriptor, PropertyKey};
use crate::runner::ds::value::Value;

enum OwnLookup {
    Value(Value),
    Getter(Rc<Callable>),
    Miss,
}

/// Look a property up on `object`, walking the prototype chain.
///
/// The order per object is: own property table, indexed access (integer
/// keys on instances), lazy class resolution (gated by
/// [`resolver::may_resolve`]), then the prototype. Getters run with the
/// original receiver, so an accessor materialized on the shared template
/// still reads the state of the instance the lookup started from.
pub fn get_property(
    ctx: &mut EvalContext,
    object: &ObjectRef,
    key: &PropertyKey,
) -> Result<Value, EngineError> {
    let receiver = Value::Object(object.clone());
    get_with_receiver(ctx, object, key, &receiver)
}

fn get_with_receiver(
    ctx: &mut EvalContext,
    object: &ObjectRef,
    key: &PropertyKey,
    receiver: &Value,
) -> Result<Value, EngineError> {
    let own = {
        let o = object.borrow();
        match o.get_own_property(key) {
            Some(PropertyDescriptor::Data { value, .. }) => OwnLookup::Value(value.clone()),
            Some(PropertyDescriptor::Accessor { get, .. }) => match get {
                Some(getter) => OwnLookup::Getter(getter.clone()),
                None => OwnLookup::Value(Value::Undefined),
            },
            None => OwnLookup::Miss,
        }
    };
    match own {
        OwnLookup::Value(v) => return Ok(v),
        OwnLookup::Getter(getter) => return getter.call(ctx, receiver.clone(), Vec::new()),
        OwnLookup::Miss => {}
    }

    if let PropertyKey::Int(index) = key {
        let indexed = {
            let o = object.borrow();
            indexed_value(&o, *index)
        };
        if let Some(v) = indexed {
            return Ok(v);
        }
    }

    let resolved = {
        let mut o = object.borrow_mut();
        match o.class() {
            Some(class) if resolver::may_resolve(&class, key) => resolver::resolve(&mut o, key),
            _ => false,
        }
    };
    if resolved {
        // The member is an ordinary own property now.
        return get_with_receiver(ctx, object, key, receiver);
    }

    let prototype = object.borrow().prototype();
    match prototype {
        Some(parent) => get_with_receiver(ctx, &parent, key, receiver),
        None => Ok(Value::Undefined),
    }
}

fn indexed_value(object: &HostObject, index: u32) -> Option<Value> {
    let class = object.class()?;
    let hook = class.index_hook()?;
    let state = object.instance_state()?;
    hook(state, index)
}

/// Enumerable keys of `object`: the lazily-resolvable names first (shared
/// template only, registration order, never materializing anything),
/// then own enumerable keys, each key exactly once.
pub fn enumerate_keys(object: &ObjectRef) -> Vec<PropertyKey> {
    let o = object.borrow();
    let mut keys: Vec<PropertyKey> = resolver::enumerate_resolvable(&o)
        .into_iter()
        .map(PropertyKey::Str)
        .collect();
    for key in o.own_property_keys() {
        let enumerable = o
            .get_own_property(&key)
            .map(|d| d.is_enumerable())
            .unwrap_or(false);
        if enumerable && !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
