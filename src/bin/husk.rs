//! CLI wrapper for the husk script host.
//!
//! Usage:
//!   husk <file.hk>              # Execute a script file
//!   husk -e "code"              # Evaluate script code
//!   husk                        # Start REPL (interactive mode)

use husk::parser;
use husk::runner::class::registry::ClassRegistry;
use husk::runner::context::EvalContext;
use husk::runner::ds::value::Value;
use husk::runner::eval::execute_statement;
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();

    match args.len() {
        1 => {
            run_repl();
        }
        2 => {
            let arg = &args[1];
            if arg == "-h" || arg == "--help" {
                print_usage();
                process::exit(0);
            }
            run_file(arg);
        }
        3 if args[1] == "-e" || args[1] == "--eval" => {
            eval_code(&args[2]);
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("husk - embeddable mini-script host");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  husk <file.hk>              Execute a script file");
    eprintln!("  husk -e \"code\"              Evaluate script code");
    eprintln!("  husk --eval \"code\"          Evaluate script code");
    eprintln!("  husk                        Start REPL (interactive mode)");
}

fn new_context() -> EvalContext {
    let mut ctx = EvalContext::new();
    ctx.install_classes(ClassRegistry::with_core());
    ctx
}

fn run_file(filename: &str) {
    let source = match fs::read_to_string(filename) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", filename, e);
            process::exit(1);
        }
    };

    let program = match parser::parse_to_ast(&source) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };

    let mut ctx = new_context();
    for statement in &program.body {
        if let Err(e) = execute_statement(statement, &mut ctx) {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

fn eval_code(code: &str) {
    let program = match parser::parse_to_ast(code) {
        Ok(program) => program,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            process::exit(1);
        }
    };

    let mut ctx = new_context();
    let mut last_value: Option<Value> = None;
    for statement in &program.body {
        match execute_statement(statement, &mut ctx) {
            Ok(completion) => {
                if let Some(value) = completion.value {
                    last_value = Some(value);
                }
            }
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
    }

    if let Some(value) = last_value {
        if !matches!(value, Value::Undefined) {
            println!("{}", value);
        }
    }
}

fn run_repl() {
    println!("husk v0.1.0 - mini-script host");
    println!("Type script code and press Enter. Type .exit to quit.");
    println!();

    let mut ctx = new_context();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().unwrap();

        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {}", e);
                break;
            }
        }

        let input = input.trim();

        if input == ".exit" || input == ".quit" {
            break;
        }

        if input.is_empty() {
            continue;
        }

        let program = match parser::parse_to_ast(input) {
            Ok(program) => program,
            Err(e) => {
                eprintln!("Parse error: {}", e);
                continue;
            }
        };

        for statement in &program.body {
            match execute_statement(statement, &mut ctx) {
                Ok(completion) => {
                    if let Some(value) = completion.value {
                        if !matches!(value, Value::Undefined) {
                            println!("{}", value);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("{}", e);
                }
            }
        }
    }

    println!("Goodbye!");
}
