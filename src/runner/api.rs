//! Convenience entry points for embedders.

use crate::parser;
use crate::runner::context::EvalContext;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::value::Value;
use crate::runner::eval::execute_statement;

/// Parse and execute `source` against `ctx`, returning the value of the
/// last statement that produced one.
pub fn run_script(source: &str, ctx: &mut EvalContext) -> Result<Value, EngineError> {
    let program =
        parser::parse_to_ast(source).map_err(|e| EngineError::Syntax(e.to_string()))?;
    let mut last = Value::Undefined;
    for statement in &program.body {
        if let Some(value) = execute_statement(statement, ctx)?.value {
            last = value;
        }
    }
    Ok(last)
}
