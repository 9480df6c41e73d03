// ABOUTME: REPL and file-driver entry point for the Lispy interpreter

use clap::Parser;
use lispy::builtins;
use lispy::env::Environment;
use lispy::eval::eval;
use lispy::printer::print as render;
use lispy::reader;
use lispy::value::Value;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use std::rc::Rc;

/// Lispy — an embeddable interpreter for a small Lisp-family language.
#[derive(Parser, Debug)]
#[command(name = "lispy")]
#[command(version)]
#[command(about = "An interactive, embeddable Lisp-family interpreter")]
struct CliArgs {
    /// Script files to load in order; with none, starts an interactive REPL.
    #[arg(value_name = "FILE")]
    scripts: Vec<PathBuf>,
}

const HISTORY_FILE: &str = ".lispy_history";

fn main() {
    let args = CliArgs::parse();
    let env = Environment::new();
    builtins::register_all(&env);

    if args.scripts.is_empty() {
        repl(&env);
    } else {
        for script in &args.scripts {
            load_file(&env, script);
        }
    }
}

fn load_file(env: &Rc<Environment>, path: &PathBuf) {
    let result = builtins::io::load(
        env.clone(),
        vec![Value::Str(path.display().to_string())],
    );
    match result {
        Ok(_) => {}
        Err(e) => println!("Error: {}", e),
    }
}

/// Interactive prompt: one line in, one result printed, per spec.md §6.
/// `exit` terminates; `symbols` lists the global environment's bindings
/// without evaluating anything.
fn repl(env: &Rc<Environment>) {
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Could not start the line editor: {}", e);
            std::process::exit(1);
        }
    };
    let _ = rl.load_history(HISTORY_FILE);

    loop {
        match rl.readline("lispy> ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                match trimmed {
                    "exit" => break,
                    "symbols" => {
                        println!("{}", env.names().join(" "));
                        continue;
                    }
                    _ => {}
                }
                run_line(env, trimmed);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {}", e);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
}

/// Reads `line` and evaluates each top-level form it contains in turn,
/// printing each result separately — the same "one root SExpr, N forms"
/// destructuring `load` (builtins/io.rs) does for a whole file, so a line
/// with more than one form (`1 2`, or a whole multi-form transcript typed
/// on one line) behaves like N separate REPL entries rather than the root
/// SExpr being misread as one form applying the first to the rest.
fn run_line(env: &Rc<Environment>, line: &str) {
    let value = match reader::read_source(line) {
        Ok(v) => v,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    let forms = match value {
        Value::SExpr(items) => items,
        other => vec![other],
    };
    for form in forms {
        match eval(env, form) {
            Ok(result) => println!("{}", render(env, &result)),
            Err(e) => println!("Error: {}", e),
        }
    }
}
