use std::fmt;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

use crate::runner::class::spec::ClassSpec;
use crate::runner::context::EvalContext;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::object::{HostObject, ObjectRef};
use crate::runner::ds::value::Value;

#[derive(Debug, PartialEq)]
pub enum FunctionKind {
    Normal,
    ClassConstructor,
}

/// Signature for native methods: evaluation context, `this`, arguments.
pub type NativeFn = fn(&mut EvalContext, Value, Vec<Value>) -> Result<Value, EngineError>;

/// Signature for native getters: evaluation context and `this` only.
pub type GetterFn = fn(&mut EvalContext, Value) -> Result<Value, EngineError>;

enum CallableBody {
    Native(NativeFn),
    Getter(GetterFn),
    Constructor {
        class: Rc<ClassSpec>,
        template: ObjectRef,
    },
}

/// A callable value: a native function, a native getter, or a class
/// constructor bound to its shared prototype object.
pub struct Callable {
    name: String,
    arity: usize,
    body: CallableBody,
}

impl Callable {
    pub fn native(name: impl Into<String>, arity: usize, body: NativeFn) -> Self {
        Callable {
            name: name.into(),
            arity,
            body: CallableBody::Native(body),
        }
    }

    pub fn getter(name: impl Into<String>, body: GetterFn) -> Self {
        Callable {
            name: name.into(),
            arity: 0,
            body: CallableBody::Getter(body),
        }
    }

    pub fn constructor(class: Rc<ClassSpec>, template: ObjectRef) -> Self {
        Callable {
            name: class.name().to_string(),
            arity: 0,
            body: CallableBody::Constructor { class, template },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn kind(&self) -> FunctionKind {
        match self.body {
            CallableBody::Constructor { .. } => FunctionKind::ClassConstructor,
            _ => FunctionKind::Normal,
        }
    }

    /// The shared prototype object, for class constructors only.
    pub fn template(&self) -> Option<ObjectRef> {
        match &self.body {
            CallableBody::Constructor { template, .. } => Some(template.clone()),
            _ => None,
        }
    }

    /// Invoke as a plain (non-constructing) call.
    ///
    /// Class constructors reject plain calls; construction semantics are
    /// only available through [`Callable::construct`].
    pub fn call(
        &self,
        ctx: &mut EvalContext,
        this: Value,
        args: Vec<Value>,
    ) -> Result<Value, EngineError> {
        match &self.body {
            CallableBody::Native(body) => body(ctx, this, args),
            CallableBody::Getter(body) => body(ctx, this),
            CallableBody::Constructor { .. } => Err(EngineError::ConstructorMisuse(format!(
                "class constructor {} cannot be invoked without 'new'",
                self.name
            ))),
        }
    }

    /// Invoke as a construction call.
    ///
    /// Allocates fresh instance state through the class spec and attaches
    /// it to a new object whose prototype is the shared template.
    pub fn construct(
        &self,
        ctx: &mut EvalContext,
        args: Vec<Value>,
    ) -> Result<Value, EngineError> {
        match &self.body {
            CallableBody::Constructor { class, template } => {
                let state = class.construct_state(ctx, args)?;
                let instance = HostObject::new_instance(class.clone(), state, template.clone());
                Ok(Value::Object(instance))
            }
            _ => Err(EngineError::ConstructorMisuse(format!(
                "{} is not a constructor",
                self.name
            ))),
        }
    }
}

impl Display for Callable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.body {
            CallableBody::Constructor { .. } => {
                write!(f, "class {} {{ [native code] }}", self.name)
            }
            _ => write!(f, "function {}() {{ [native code] }}", self.name),
        }
    }
}
