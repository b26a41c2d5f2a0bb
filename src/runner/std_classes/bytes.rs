//! Uint8Array native class.
//!
//! A fixed-size byte buffer, constructible from an array literal of
//! integers (wrapped to octets the way scripts expect) or from a
//! non-negative length. Reads go through the indexed-access hook; the
//! `length` member resolves lazily like any other class member.

use std::any::Any;

use crate::runner::class::registry::ClassRegistry;
use crate::runner::class::spec::{ClassSpec, InstanceState};
use crate::runner::context::EvalContext;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::value::Value;
use crate::runner::std_classes::{instance_state_ref, this_object};

const CLASS_NAME: &str = "Uint8Array";

/// Register the Uint8Array class with the registry.
pub fn register(registry: &mut ClassRegistry) {
    registry.register(
        ClassSpec::new(CLASS_NAME, construct)
            .add_getter("length", length)
            .with_index(index),
    );
}

struct BytesState {
    data: Vec<u8>,
}

impl InstanceState for BytesState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

fn construct(
    ctx: &mut EvalContext,
    args: Vec<Value>,
) -> Result<Box<dyn InstanceState>, EngineError> {
    let data = match args.first() {
        None => Vec::new(),
        Some(Value::Array(elements)) => {
            let mut data = Vec::with_capacity(elements.len());
            for element in elements.iter() {
                match element {
                    Value::Integer(i) => data.push(i.rem_euclid(256) as u8),
                    other => {
                        return Err(EngineError::ArgumentType(format!(
                            "Uint8Array elements must be integers, found {}",
                            other.type_name()
                        )))
                    }
                }
            }
            data
        }
        Some(Value::Integer(len)) => {
            if *len < 0 {
                return Err(EngineError::ArgumentType(format!(
                    "invalid Uint8Array length: {}",
                    len
                )));
            }
            vec![0u8; *len as usize]
        }
        Some(other) => {
            return Err(EngineError::ArgumentType(format!(
                "invalid argument to Uint8Array constructor: {}",
                other.type_name()
            )))
        }
    };

    if !ctx.config().allows_buffer(data.len()) {
        return Err(EngineError::Capacity(format!(
            "buffer allocation of {} bytes exceeds the configured limit",
            data.len()
        )));
    }

    Ok(Box::new(BytesState { data }))
}

/// Uint8Array.prototype.length getter
fn length(_ctx: &mut EvalContext, this: Value) -> Result<Value, EngineError> {
    let object = this_object(&this, CLASS_NAME, "read length")?;
    let o = object.borrow();
    let state = instance_state_ref::<BytesState>(&o, CLASS_NAME, "read length")?;
    Ok(Value::Integer(state.data.len() as i64))
}

fn index(state: &dyn InstanceState, index: u32) -> Option<Value> {
    let bytes = state.as_any().downcast_ref::<BytesState>()?;
    bytes
        .data
        .get(index as usize)
        .map(|b| Value::Integer(i64::from(*b)))
}

/// Copy the byte contents out of a `Uint8Array` value, if it is one.
pub(crate) fn byte_array_data(value: &Value) -> Option<Vec<u8>> {
    let object = value.as_object()?;
    let o = object.borrow();
    let state = o.instance_state()?;
    let bytes = state.as_any().downcast_ref::<BytesState>()?;
    Some(bytes.data.clone())
}
