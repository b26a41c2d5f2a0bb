//! # husk - embeddable mini-script host
//!
//! A small script host built around one architectural idea: **native
//! classes whose members resolve lazily on a shared prototype**. A class
//! is described by a static dispatch table (name → method or getter);
//! nothing is materialized until script code first touches a member, and
//! once materialized the member is an ordinary property that never goes
//! through resolution again.
//!
//! The flagship class is `Crc`, an incremental CRC-32 accumulator backed
//! by the `crc32fast` crate, together with `Uint8Array`, the byte buffer
//! it consumes.
//!
//! ## Quick Start
//!
//! ```
//! use husk::runner::api::run_script;
//! use husk::runner::class::registry::ClassRegistry;
//! use husk::runner::context::EvalContext;
//! use husk::runner::ds::value::Value;
//!
//! let mut ctx = EvalContext::new();
//! ctx.install_classes(ClassRegistry::with_core());
//!
//! let script = r#"
//!     const crc = new Crc();
//!     crc.update(new Uint8Array([1, 2, 3, 4, 5]));
//!     crc.checksum;
//! "#;
//! let result = run_script(script, &mut ctx).unwrap();
//! assert_eq!(result, Value::Integer(0x470B99F4));
//! ```
//!
//! ## Lazy Class Resolution
//!
//! Property lookup consults, in order: the object's own property table,
//! the class's indexed-access hook, the lazy resolver, and finally the
//! prototype chain. Resolution itself only ever acts on the shared
//! prototype:
//!
//! 1. **Instances skip.** A miss on an instance falls through to the
//!    prototype chain, which re-enters resolution against the template.
//! 2. **Cheap gate first.** [`runner::class::resolver::may_resolve`] is a
//!    set-membership test that never touches an object, so lookups for
//!    unrelated names skip the resolution path entirely.
//! 3. **Resolve once, cache forever.** A resolved member is defined as an
//!    ordinary property on the template; later lookups hit it directly.
//!
//! The prototype itself is discriminated from instances by the absence of
//! attached instance state, and every instance-only operation checks that
//! first — reading `checksum` on `Crc.prototype` is a type error, not a
//! crash.
//!
//! ## Example: Custom Class
//!
//! ```
//! use std::any::Any;
//!
//! use husk::runner::api::run_script;
//! use husk::runner::class::spec::{ClassSpec, InstanceState};
//! use husk::runner::context::EvalContext;
//! use husk::runner::ds::error::EngineError;
//! use husk::runner::ds::value::Value;
//!
//! struct CounterState {
//!     count: i64,
//! }
//!
//! impl InstanceState for CounterState {
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//!     fn as_any_mut(&mut self) -> &mut dyn Any {
//!         self
//!     }
//! }
//!
//! fn construct(
//!     _ctx: &mut EvalContext,
//!     _args: Vec<Value>,
//! ) -> Result<Box<dyn InstanceState>, EngineError> {
//!     Ok(Box::new(CounterState { count: 0 }))
//! }
//!
//! fn bump(
//!     _ctx: &mut EvalContext,
//!     this: Value,
//!     _args: Vec<Value>,
//! ) -> Result<Value, EngineError> {
//!     let object = this.as_object().unwrap().clone();
//!     let mut o = object.borrow_mut();
//!     let counter = o
//!         .instance_state_mut()
//!         .unwrap()
//!         .as_any_mut()
//!         .downcast_mut::<CounterState>()
//!         .unwrap();
//!     counter.count += 1;
//!     Ok(Value::Integer(counter.count))
//! }
//!
//! let mut ctx = EvalContext::new();
//! ctx.register_class(ClassSpec::new("Counter", construct).add_method("bump", 0, bump));
//!
//! let result = run_script("const c = new Counter(); c.bump(); c.bump();", &mut ctx).unwrap();
//! assert_eq!(result, Value::Integer(2));
//! ```
//!
//! ## Architecture
//!
//! - **[`parser`]** - pest grammar and AST for the mini-script surface
//! - **[`runner`]** - execution
//!   - **[`runner::ds`]** - values, objects, properties, errors
//!   - **[`runner::class`]** - class specs, lazy resolution, registry
//!   - **[`runner::std_classes`]** - Crc and Uint8Array
//!   - **[`runner::eval`]** - tree-walking evaluator

#[macro_use]
extern crate lazy_static;

pub mod parser;
pub mod runner;
