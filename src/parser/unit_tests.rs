use crate::parser::ast::{Expression, Statement};
use crate::parser::parse_to_ast;

#[test]
fn test_parse_variable_declaration() {
    let program = parse_to_ast("const crc = new Crc();").unwrap();
    assert_eq!(program.body.len(), 1);
    assert_eq!(
        program.body[0],
        Statement::VarDeclaration {
            name: "crc".to_string(),
            init: Expression::New {
                class_name: "Crc".to_string(),
                arguments: vec![],
            },
        }
    );
}

#[test]
fn test_parse_method_call_with_array_argument() {
    let program = parse_to_ast("crc.update([1, 2, 3]);").unwrap();
    assert_eq!(
        program.body[0],
        Statement::Expression(Expression::Call {
            callee: Box::new(Expression::Member {
                object: Box::new(Expression::Identifier("crc".to_string())),
                property: "update".to_string(),
            }),
            arguments: vec![Expression::ArrayLiteral(vec![
                Expression::IntegerLiteral(1),
                Expression::IntegerLiteral(2),
                Expression::IntegerLiteral(3),
            ])],
        })
    );
}

#[test]
fn test_parse_nested_new_in_call() {
    let program = parse_to_ast("crc.update(new Uint8Array([1]));").unwrap();
    match &program.body[0] {
        Statement::Expression(Expression::Call { arguments, .. }) => {
            assert_eq!(
                arguments[0],
                Expression::New {
                    class_name: "Uint8Array".to_string(),
                    arguments: vec![Expression::ArrayLiteral(vec![Expression::IntegerLiteral(
                        1
                    )])],
                }
            );
        }
        other => panic!("expected a call statement, got {:?}", other),
    }
}

#[test]
fn test_parse_member_read() {
    let program = parse_to_ast("crc.checksum;").unwrap();
    assert_eq!(
        program.body[0],
        Statement::Expression(Expression::Member {
            object: Box::new(Expression::Identifier("crc".to_string())),
            property: "checksum".to_string(),
        })
    );
}

#[test]
fn test_parse_chained_postfixes() {
    let program = parse_to_ast("Crc.prototype.checksum;").unwrap();
    assert_eq!(
        program.body[0],
        Statement::Expression(Expression::Member {
            object: Box::new(Expression::Member {
                object: Box::new(Expression::Identifier("Crc".to_string())),
                property: "prototype".to_string(),
            }),
            property: "checksum".to_string(),
        })
    );
}

#[test]
fn test_parse_index_access() {
    let program = parse_to_ast("bytes[0];").unwrap();
    assert_eq!(
        program.body[0],
        Statement::Expression(Expression::Index {
            object: Box::new(Expression::Identifier("bytes".to_string())),
            index: Box::new(Expression::IntegerLiteral(0)),
        })
    );
}

#[test]
fn test_parse_hex_literal() {
    let program = parse_to_ast("const mask = 0xFF;").unwrap();
    assert_eq!(
        program.body[0],
        Statement::VarDeclaration {
            name: "mask".to_string(),
            init: Expression::IntegerLiteral(255),
        }
    );
}

#[test]
fn test_parse_string_literals() {
    let program = parse_to_ast("const a = \"double\"; const b = 'single';").unwrap();
    assert_eq!(
        program.body[0],
        Statement::VarDeclaration {
            name: "a".to_string(),
            init: Expression::StringLiteral("double".to_string()),
        }
    );
    assert_eq!(
        program.body[1],
        Statement::VarDeclaration {
            name: "b".to_string(),
            init: Expression::StringLiteral("single".to_string()),
        }
    );
}

#[test]
fn test_parse_line_comments() {
    let source = r#"
        // build an accumulator
        const crc = new Crc(); // trailing comment
    "#;
    let program = parse_to_ast(source).unwrap();
    assert_eq!(program.body.len(), 1);
}

#[test]
fn test_parse_identifier_prefixed_by_keyword() {
    let program = parse_to_ast("newish;").unwrap();
    assert_eq!(
        program.body[0],
        Statement::Expression(Expression::Identifier("newish".to_string()))
    );
}

#[test]
fn test_parse_error_on_missing_semicolon() {
    assert!(parse_to_ast("const crc = new Crc()").is_err());
}

#[test]
fn test_parse_error_on_reserved_word_as_identifier() {
    assert!(parse_to_ast("const new = 1;").is_err());
}
