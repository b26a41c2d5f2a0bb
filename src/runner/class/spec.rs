//! Native class specifications.
//!
//! A `ClassSpec` is a static dispatch table: a fixed, closed set of named
//! members that can be materialized lazily on the class's shared
//! prototype, plus the construction, finalization and indexed-access
//! hooks the runtime needs around it.

use std::any::Any;

use crate::runner::context::EvalContext;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::function::{GetterFn, NativeFn};
use crate::runner::ds::value::Value;

/// Per-instance native state attached to a host object at construction
/// and released exactly once when the owning object goes away.
pub trait InstanceState: Any {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Allocates the instance state for a construction call.
pub type ConstructFn =
    fn(&mut EvalContext, Vec<Value>) -> Result<Box<dyn InstanceState>, EngineError>;

/// Receives the released instance state when an instance is finalized.
pub type FinalizeFn = fn(Box<dyn InstanceState>);

/// Serves integer-keyed reads straight from instance state.
pub type IndexFn = fn(&dyn InstanceState, u32) -> Option<Value>;

/// A member that resolves lazily on the shared prototype.
pub enum LazyMember {
    Method { arity: usize, body: NativeFn },
    Getter(GetterFn),
}

pub struct ClassSpec {
    name: String,
    construct: ConstructFn,
    members: Vec<(String, LazyMember)>,
    finalize: Option<FinalizeFn>,
    index: Option<IndexFn>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>, construct: ConstructFn) -> Self {
        ClassSpec {
            name: name.into(),
            construct,
            members: Vec::new(),
            finalize: None,
            index: None,
        }
    }

    /// Add a lazily-resolved method member.
    pub fn add_method(mut self, name: impl Into<String>, arity: usize, body: NativeFn) -> Self {
        self.members.push((name.into(), LazyMember::Method { arity, body }));
        self
    }

    /// Add a lazily-resolved getter-only member.
    pub fn add_getter(mut self, name: impl Into<String>, body: GetterFn) -> Self {
        self.members.push((name.into(), LazyMember::Getter(body)));
        self
    }

    /// Set the finalize hook, invoked with the released instance state.
    pub fn with_finalize(mut self, finalize: FinalizeFn) -> Self {
        self.finalize = Some(finalize);
        self
    }

    /// Set the indexed-access hook.
    pub fn with_index(mut self, index: IndexFn) -> Self {
        self.index = Some(index);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn construct_state(
        &self,
        ctx: &mut EvalContext,
        args: Vec<Value>,
    ) -> Result<Box<dyn InstanceState>, EngineError> {
        (self.construct)(ctx, args)
    }

    pub fn lazy_member(&self, name: &str) -> Option<&LazyMember> {
        self.members
            .iter()
            .find(|(member_name, _)| member_name == name)
            .map(|(_, member)| member)
    }

    /// Does `name` belong to the dispatch table? Cheap membership test;
    /// never touches any object.
    pub fn defines_member(&self, name: &str) -> bool {
        self.members.iter().any(|(member_name, _)| member_name == name)
    }

    /// Member names in registration order, each exactly once.
    pub fn member_names(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|(member_name, _)| member_name.to_string())
            .collect()
    }

    pub fn finalize_hook(&self) -> Option<FinalizeFn> {
        self.finalize
    }

    pub fn index_hook(&self) -> Option<IndexFn> {
        self.index
    }
}
