//! Core native classes.
//!
//! This module contains the classes every context installs by default:
//! `Crc` (incremental CRC-32 accumulator) and `Uint8Array` (byte buffer).

pub mod bytes;
pub mod crc;

use crate::runner::class::registry::ClassRegistry;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::object::{HostObject, ObjectRef};
use crate::runner::ds::value::Value;

/// Register the core classes with the registry.
pub fn register_core_classes(registry: &mut ClassRegistry) {
    crc::register(registry);
    bytes::register(registry);
}

/// `this` must be an object for any instance-only operation.
pub(crate) fn this_object(
    this: &Value,
    class_name: &str,
    what: &str,
) -> Result<ObjectRef, EngineError> {
    match this {
        Value::Object(o) => Ok(o.clone()),
        other => Err(EngineError::ArgumentType(format!(
            "can't {} on a {}; {} instance expected",
            what,
            other.type_name(),
            class_name
        ))),
    }
}

/// Borrow the instance state of `object`, or fail with the usage error
/// the shared prototype (and any other state-less object) earns.
pub(crate) fn instance_state_ref<'a, T: 'static>(
    object: &'a HostObject,
    class_name: &str,
    what: &str,
) -> Result<&'a T, EngineError> {
    match object.instance_state() {
        Some(state) => state
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| incompatible_receiver(class_name, what)),
        None => Err(stateless_receiver(object, class_name, what)),
    }
}

pub(crate) fn instance_state_mut<'a, T: 'static>(
    object: &'a mut HostObject,
    class_name: &str,
    what: &str,
) -> Result<&'a mut T, EngineError> {
    let stateless = match object.instance_state() {
        Some(_) => None,
        None => Some(stateless_receiver(object, class_name, what)),
    };
    if let Some(err) = stateless {
        return Err(err);
    }
    object
        .instance_state_mut()
        .and_then(|state| state.as_any_mut().downcast_mut::<T>())
        .ok_or_else(|| incompatible_receiver(class_name, what))
}

fn stateless_receiver(object: &HostObject, class_name: &str, what: &str) -> EngineError {
    if object.is_shared_template() {
        EngineError::PrototypeUsage(format!("can't {} on {}.prototype", what, class_name))
    } else {
        EngineError::PrototypeUsage(format!(
            "can't {} on an object without {} state",
            what, class_name
        ))
    }
}

fn incompatible_receiver(class_name: &str, what: &str) -> EngineError {
    EngineError::ArgumentType(format!(
        "can't {} on an incompatible receiver; {} instance expected",
        what, class_name
    ))
}
