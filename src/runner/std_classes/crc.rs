//! Crc native class.
//!
//! A constructible accumulator over the CRC-32 checksum from the
//! `crc32fast` crate. Both members resolve lazily on the shared
//! prototype: the `update(bytes)` method folds a `Uint8Array` into the
//! running checksum, and the read-only `checksum` property reads the
//! current value out.

use std::any::Any;

use crc32fast::Hasher;

use crate::runner::class::registry::ClassRegistry;
use crate::runner::class::spec::{ClassSpec, InstanceState};
use crate::runner::context::EvalContext;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::value::Value;
use crate::runner::std_classes::{bytes, instance_state_mut, instance_state_ref, this_object};

const CLASS_NAME: &str = "Crc";

/// Register the Crc class with the registry.
pub fn register(registry: &mut ClassRegistry) {
    registry.register(
        ClassSpec::new(CLASS_NAME, construct)
            .add_method("update", 1, update)
            .add_getter("checksum", checksum)
            .with_finalize(finalize),
    );
}

/// Per-instance accumulator, created at the algorithm's identity value.
struct CrcState {
    hasher: Hasher,
}

impl InstanceState for CrcState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn construct(
    _ctx: &mut EvalContext,
    _args: Vec<Value>,
) -> Result<Box<dyn InstanceState>, EngineError> {
    Ok(Box::new(CrcState {
        hasher: Hasher::new(),
    }))
}

/// Crc.prototype.update
fn update(_ctx: &mut EvalContext, this: Value, args: Vec<Value>) -> Result<Value, EngineError> {
    let object = this_object(&this, CLASS_NAME, "call update()")?;
    {
        // Usage check first, before any argument validation.
        let o = object.borrow();
        instance_state_ref::<CrcState>(&o, CLASS_NAME, "call update()")?;
    }

    if args.len() != 1 {
        return Err(EngineError::ArgumentType(
            "update() requires exactly 1 argument".to_string(),
        ));
    }
    let data = bytes::byte_array_data(&args[0]).ok_or_else(|| {
        EngineError::ArgumentType("argument to update() should be a Uint8Array".to_string())
    })?;
    if data.len() > u32::MAX as usize {
        return Err(EngineError::Capacity("array has too many bytes".to_string()));
    }

    let mut o = object.borrow_mut();
    let state = instance_state_mut::<CrcState>(&mut o, CLASS_NAME, "call update()")?;
    state.hasher.update(&data);
    Ok(Value::Undefined)
}

/// Crc.prototype.checksum getter
fn checksum(_ctx: &mut EvalContext, this: Value) -> Result<Value, EngineError> {
    let object = this_object(&this, CLASS_NAME, "read checksum")?;
    let o = object.borrow();
    let state = instance_state_ref::<CrcState>(&o, CLASS_NAME, "read checksum")?;
    // Finalization of CRC-32 is the identity; cloning keeps the running
    // accumulator intact.
    let value = state.hasher.clone().finalize();
    Ok(Value::Integer(i64::from(value)))
}

fn finalize(state: Box<dyn InstanceState>) {
    drop(state);
}
