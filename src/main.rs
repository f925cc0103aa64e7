// Relapse: a seek-driven interpreter for a backtracking register language

mod interpreter;
mod scan;
mod source;
mod symtab;

use std::fs;
use std::path::Path;
use std::process;
use std::str::FromStr;

use num_bigint::BigUint;

use interpreter::{Interpreter, Outcome};
use source::MemorySource;
use symtab::SymbolTable;

struct Options {
    files: Vec<String>,
    entry: String,
    register: BigUint,
    debug: bool,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args
        .first()
        .map(|s| s.as_str())
        .unwrap_or("relapse")
        .to_string();

    let options = match parse_args(&args[1..]) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage(&program_name);
            return;
        }
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(&program_name);
            process::exit(1);
        }
    };

    // Load every source fully into memory; the engine seeks within them.
    let mut sources = Vec::with_capacity(options.files.len());
    for file in &options.files {
        if !Path::new(file).exists() {
            eprintln!("Error: File '{}' not found", file);
            process::exit(1);
        }
        match fs::read(file) {
            Ok(bytes) => sources.push(MemorySource::new(bytes)),
            Err(e) => {
                eprintln!("Error: Failed to read '{}': {}", file, e);
                process::exit(1);
            }
        }
    }

    // Pre-pass: build the global symbol table. All structural errors are
    // caught here, before anything executes.
    let symbols = match SymbolTable::build(&mut sources) {
        Ok(symbols) => symbols,
        Err(e) => {
            eprintln!("Scan error: {}", e);
            process::exit(1);
        }
    };

    let mut interp = Interpreter::new(
        sources,
        symbols,
        options.entry,
        options.register,
        options.debug,
    );

    match interp.run() {
        Ok(Outcome::Success(value)) => println!("{}", value),
        Ok(Outcome::Failure) => println!("-"),
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            process::exit(1);
        }
    }
}

/// Parse the argument list. `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<Options>, String> {
    let mut files = Vec::new();
    let mut entry = "main".to_string();
    let mut register = BigUint::default();
    let mut debug = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(None),
            "-d" | "--debug" => debug = true,
            "-f" | "--function" => {
                entry = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a function name", arg))?
                    .clone();
            }
            "-r" | "--register" => {
                let value = iter
                    .next()
                    .ok_or_else(|| format!("{} requires a value", arg))?;
                // BigUint parsing rejects signs and junk, so negative input
                // never reaches the engine.
                register = BigUint::from_str(value).map_err(|_| {
                    format!("'{}' is not a non-negative integer", value)
                })?;
            }
            other if other.starts_with('-') && other.len() > 1 => {
                return Err(format!("Unknown option '{}'", other));
            }
            _ => files.push(arg.clone()),
        }
    }

    if files.is_empty() {
        return Err("No input file provided".to_string());
    }

    Ok(Some(Options {
        files,
        entry,
        register,
        debug,
    }))
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] <file>...", program_name);
    eprintln!();
    eprintln!("Function names must be unique across all listed files.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -f, --function <NAME>   Entry function (default: main)");
    eprintln!("  -r, --register <VALUE>  Initial register value (default: 0)");
    eprintln!("  -d, --debug             Enable the ! and @ debug commands");
    eprintln!("  -h, --help              Show this help");
    eprintln!();
    eprintln!("Examples:");
    eprintln!(
        "  {} demos/add.rl -r 4        # run main with register 4",
        program_name
    );
    eprintln!(
        "  {} -d lib.rl prog.rl        # two sources, debug on",
        program_name
    );
    eprintln!();
    eprintln!("Prints the final register value, or '-' if the computation");
    eprintln!("failed with no remaining backtrack point.");
}
