use pest::error::{Error, ErrorVariant};
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

use super::ast::*;

#[derive(Parser)]
#[grammar = "parser/script_grammar.pest"] // relative to src
pub struct ScriptParser;

pub fn parse_to_pairs(script: &str) -> Result<Pairs<Rule>, Error<Rule>> {
    ScriptParser::parse(Rule::script, script)
}

pub fn parse_to_ast(script: &str) -> Result<Program, Error<Rule>> {
    let pairs = ScriptParser::parse(Rule::script, script)?;
    let mut body = vec![];
    for pair in pairs {
        match pair.as_rule() {
            Rule::statement => body.push(build_statement(pair)?),
            Rule::EOI => { /* Do nothing */ }
            _ => return Err(unexpected(&pair)),
        }
    }
    Ok(Program { body })
}

fn build_statement(pair: Pair<Rule>) -> Result<Statement, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::variable_declaration => {
            let mut parts = inner_pair.into_inner();
            let _keyword = parts.next().unwrap();
            let name = parts.next().unwrap().as_str().to_string();
            let init = build_expression(parts.next().unwrap())?;
            Ok(Statement::VarDeclaration { name, init })
        }
        Rule::expression_statement => {
            let expression_pair = inner_pair.into_inner().next().unwrap();
            Ok(Statement::Expression(build_expression(expression_pair)?))
        }
        _ => Err(unexpected(&inner_pair)),
    }
}

fn build_expression(pair: Pair<Rule>) -> Result<Expression, Error<Rule>> {
    let mut inner = pair.into_inner();
    let mut expression = build_operand(inner.next().unwrap())?;
    for postfix_pair in inner {
        expression = apply_postfix(expression, postfix_pair)?;
    }
    Ok(expression)
}

fn build_operand(pair: Pair<Rule>) -> Result<Expression, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::new_expression => {
            let mut parts = inner_pair.into_inner();
            let _keyword = parts.next().unwrap();
            let class_name = parts.next().unwrap().as_str().to_string();
            let arguments = match parts.next() {
                Some(argument_list) => build_argument_list(argument_list)?,
                None => vec![],
            };
            Ok(Expression::New {
                class_name,
                arguments,
            })
        }
        Rule::primary => build_primary(inner_pair),
        _ => Err(unexpected(&inner_pair)),
    }
}

fn build_primary(pair: Pair<Rule>) -> Result<Expression, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::array_literal => {
            let elements = match inner_pair.into_inner().next() {
                Some(argument_list) => build_argument_list(argument_list)?,
                None => vec![],
            };
            Ok(Expression::ArrayLiteral(elements))
        }
        Rule::number_literal => build_number(inner_pair),
        Rule::string_literal => {
            let chars_pair = inner_pair.into_inner().next().unwrap();
            Ok(Expression::StringLiteral(chars_pair.as_str().to_string()))
        }
        Rule::identifier => Ok(Expression::Identifier(inner_pair.as_str().to_string())),
        Rule::expression => build_expression(inner_pair),
        _ => Err(unexpected(&inner_pair)),
    }
}

fn build_number(pair: Pair<Rule>) -> Result<Expression, Error<Rule>> {
    let text = pair.as_str();
    let parsed = if let Some(hex_digits) = text.strip_prefix("0x") {
        i64::from_str_radix(hex_digits, 16)
    } else {
        text.parse::<i64>()
    };
    match parsed {
        Ok(value) => Ok(Expression::IntegerLiteral(value)),
        Err(_) => Err(custom_error(&pair, "number literal out of range")),
    }
}

fn apply_postfix(expression: Expression, pair: Pair<Rule>) -> Result<Expression, Error<Rule>> {
    let inner_pair = pair.into_inner().next().unwrap();
    match inner_pair.as_rule() {
        Rule::member_access => {
            let property = inner_pair.into_inner().next().unwrap().as_str().to_string();
            Ok(Expression::Member {
                object: Box::new(expression),
                property,
            })
        }
        Rule::index_access => {
            let index = build_expression(inner_pair.into_inner().next().unwrap())?;
            Ok(Expression::Index {
                object: Box::new(expression),
                index: Box::new(index),
            })
        }
        Rule::call_arguments => {
            let arguments = match inner_pair.into_inner().next() {
                Some(argument_list) => build_argument_list(argument_list)?,
                None => vec![],
            };
            Ok(Expression::Call {
                callee: Box::new(expression),
                arguments,
            })
        }
        _ => Err(unexpected(&inner_pair)),
    }
}

fn build_argument_list(pair: Pair<Rule>) -> Result<Vec<Expression>, Error<Rule>> {
    pair.into_inner().map(build_expression).collect()
}

fn unexpected(pair: &Pair<Rule>) -> Error<Rule> {
    custom_error(pair, &format!("unexpected {:?}", pair.as_rule()))
}

fn custom_error(pair: &Pair<Rule>, message: &str) -> Error<Rule> {
    Error::new_from_span(
        ErrorVariant::CustomError {
            message: message.to_string(),
        },
        pair.as_span(),
    )
}
