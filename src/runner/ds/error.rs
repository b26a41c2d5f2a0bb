use std::fmt;
use std::fmt::{Display, Formatter};

/// Errors raised by the engine and surfaced to the calling script.
///
/// Every error is raised synchronously at the offending call site and
/// propagated with `?`; nothing is retried or swallowed.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A class constructor was invoked as a plain function.
    ConstructorMisuse(String),
    /// An instance-only operation was invoked with the shared prototype
    /// (or another state-less object) as `this`.
    PrototypeUsage(String),
    /// Wrong argument count, or an argument of the wrong type.
    ArgumentType(String),
    /// A buffer or byte length exceeded its representable width.
    Capacity(String),
    /// A name could not be resolved to any binding.
    Reference(String),
    /// The source text could not be parsed.
    Syntax(String),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ConstructorMisuse(m) => write!(f, "Uncaught type error: {}.", m),
            EngineError::PrototypeUsage(m) => write!(f, "Uncaught type error: {}.", m),
            EngineError::ArgumentType(m) => write!(f, "Uncaught type error: {}.", m),
            EngineError::Capacity(m) => write!(f, "Uncaught range error: {}.", m),
            EngineError::Reference(m) => write!(f, "Uncaught reference error: {}.", m),
            EngineError::Syntax(m) => write!(f, "Uncaught syntax error: {}.", m),
        }
    }
}

impl std::error::Error for EngineError {}
