//! Tree-walking evaluator for the mini-script AST.

use std::rc::Rc;

use crate::parser::ast::{Expression, Statement};
use crate::runner::context::EvalContext;
use crate::runner::ds::error::EngineError;
use crate::runner::ds::operations::get_property;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::Value;

/// Result of executing one statement.
pub struct Completion {
    pub value: Option<Value>,
}

pub fn execute_statement(
    statement: &Statement,
    ctx: &mut EvalContext,
) -> Result<Completion, EngineError> {
    match statement {
        Statement::VarDeclaration { name, init } => {
            let value = evaluate_expression(init, ctx)?;
            ctx.declare_binding(name.as_str(), value);
            Ok(Completion { value: None })
        }
        Statement::Expression(expression) => {
            let value = evaluate_expression(expression, ctx)?;
            Ok(Completion { value: Some(value) })
        }
    }
}

pub fn evaluate_expression(
    expression: &Expression,
    ctx: &mut EvalContext,
) -> Result<Value, EngineError> {
    match expression {
        Expression::Identifier(name) => ctx.get_binding(name),
        Expression::IntegerLiteral(i) => Ok(Value::Integer(*i)),
        Expression::StringLiteral(s) => Ok(Value::String(s.to_string())),
        Expression::ArrayLiteral(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(evaluate_expression(element, ctx)?);
            }
            Ok(Value::Array(Rc::new(values)))
        }
        Expression::Member { object, property } => {
            let target = evaluate_expression(object, ctx)?;
            member_value(ctx, &target, property)
        }
        Expression::Index { object, index } => {
            let target = evaluate_expression(object, ctx)?;
            let index = evaluate_expression(index, ctx)?;
            indexed_member_value(ctx, &target, &index)
        }
        Expression::Call { callee, arguments } => {
            let args = evaluate_arguments(arguments, ctx)?;
            match callee.as_ref() {
                // A method call binds `this` to the object expression.
                Expression::Member { object, property } => {
                    let this = evaluate_expression(object, ctx)?;
                    let member = member_value(ctx, &this, property)?;
                    match member {
                        Value::Function(function) => function.call(ctx, this, args),
                        other => Err(EngineError::ArgumentType(format!(
                            "{} is not a function (it is {})",
                            property,
                            other.type_name()
                        ))),
                    }
                }
                other => {
                    let target = evaluate_expression(other, ctx)?;
                    match target {
                        Value::Function(function) => function.call(ctx, Value::Undefined, args),
                        not_callable => Err(EngineError::ArgumentType(format!(
                            "{} is not a function",
                            not_callable.type_name()
                        ))),
                    }
                }
            }
        }
        Expression::New {
            class_name,
            arguments,
        } => {
            let args = evaluate_arguments(arguments, ctx)?;
            match ctx.get_binding(class_name)? {
                Value::Function(function) => function.construct(ctx, args),
                other => Err(EngineError::ArgumentType(format!(
                    "{} is not a constructor (it is {})",
                    class_name,
                    other.type_name()
                ))),
            }
        }
    }
}

fn evaluate_arguments(
    arguments: &[Expression],
    ctx: &mut EvalContext,
) -> Result<Vec<Value>, EngineError> {
    let mut args = Vec::with_capacity(arguments.len());
    for argument in arguments {
        args.push(evaluate_expression(argument, ctx)?);
    }
    Ok(args)
}

fn member_value(
    ctx: &mut EvalContext,
    target: &Value,
    property: &str,
) -> Result<Value, EngineError> {
    match target {
        Value::Object(object) => {
            get_property(ctx, object, &PropertyKey::Str(property.to_string()))
        }
        // `Klass.prototype` exposes the shared template, the way a class
        // constructor does in the language this surface imitates.
        Value::Function(function) => {
            if property == "prototype" {
                Ok(function
                    .template()
                    .map(Value::Object)
                    .unwrap_or(Value::Undefined))
            } else if property == "name" {
                Ok(Value::String(function.name().to_string()))
            } else {
                Ok(Value::Undefined)
            }
        }
        Value::Undefined => Err(EngineError::ArgumentType(format!(
            "cannot read properties of undefined (reading '{}')",
            property
        ))),
        _ => Ok(Value::Undefined),
    }
}

fn indexed_member_value(
    ctx: &mut EvalContext,
    target: &Value,
    index: &Value,
) -> Result<Value, EngineError> {
    let object = match target {
        Value::Object(object) => object,
        Value::Undefined => {
            return Err(EngineError::ArgumentType(
                "cannot read properties of undefined (indexing)".to_string(),
            ))
        }
        _ => return Ok(Value::Undefined),
    };
    match index {
        Value::Integer(i) if *i >= 0 && *i <= i64::from(u32::MAX) => {
            get_property(ctx, object, &PropertyKey::Int(*i as u32))
        }
        Value::String(s) => get_property(ctx, object, &PropertyKey::Str(s.to_string())),
        // Out-of-range and non-indexable keys miss like any absent member.
        _ => Ok(Value::Undefined),
    }
}
