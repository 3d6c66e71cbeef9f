use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
    rc::Rc,
    time::Instant,
};

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tracec::{
    ast::ast::Program,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    render_report,
    type_checker::{type_checker::SemanticAnalyser, types::Type},
};

#[derive(Debug, Parser)]
#[command(
    name = "tracec",
    version,
    about = "Type checks tracing scripts",
    long_about = None
)]
struct Args {
    /// Script to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print each map's key signature and value type after a successful check
    #[arg(long)]
    dump_maps: bool,

    /// Raise the log level (-v info, -vv debug, -vvv trace); RUST_LOG overrides it
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Exit status for scripts that fail to tokenize or parse (sysexits `EX_DATAERR`).
const EXIT_SYNTAX_ERROR: i32 = 65;
/// Exit status for scripts that cannot be read (sysexits `EX_NOINPUT`).
const EXIT_NO_INPUT: i32 = 66;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|expr| EnvFilter::try_new(expr).ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let start = Instant::now();
    let file_name = args.file.display().to_string();
    let source = match read_script(&args.file, &file_name) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: {:?}", error);
            std::process::exit(EXIT_NO_INPUT);
        }
    };

    let program = match front_end(&source, &file_name) {
        Ok(program) => program,
        Err(error) => {
            eprint!(
                "{}",
                render_report(&error.headline(), error.get_position(), &source)
            );
            std::process::exit(EXIT_SYNTAX_ERROR);
        }
    };

    let analysis_start = Instant::now();
    let mut analyser = SemanticAnalyser::new(&program);
    let status = analyser.analyse();

    info!(
        elapsed = ?analysis_start.elapsed(),
        passes = analyser.passes_run(),
        "analysed"
    );

    if !status.is_success() {
        for diagnostic in analyser.diagnostics() {
            eprint!(
                "{}",
                render_report(&diagnostic.to_string(), &diagnostic.span.start, &source)
            );
        }
        std::process::exit(status.exit_code());
    }

    if args.dump_maps {
        for (name, keys) in analyser.map_signatures().iter() {
            let value = analyser.map_values().get(name).unwrap_or_default();
            println!("{}", format_map(name, keys, value));
        }
    }

    info!(total = ?start.elapsed(), "checked {}", file_name);
}

fn read_script(path: &Path, file_name: &str) -> anyhow::Result<String> {
    read_to_string(path).with_context(|| format!("failed to read script {}", file_name))
}

fn front_end(source: &str, file_name: &str) -> Result<Program, Error> {
    let tokenize_start = Instant::now();
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))?;
    info!(tokens = tokens.len(), elapsed = ?tokenize_start.elapsed(), "tokenized");

    let parse_start = Instant::now();
    let program = parse(tokens, Rc::new(file_name.to_string()))?;
    info!(probes = program.probes.len(), elapsed = ?parse_start.elapsed(), "parsed");

    Ok(program)
}

/// `@name[key, key] -> value`, or `@name -> value` for maps without keys.
fn format_map(name: &str, keys: &[Type], value: Type) -> String {
    if keys.is_empty() {
        return format!("{} -> {}", name, value);
    }

    let keys: Vec<&str> = keys.iter().map(Type::name).collect();
    format!("{}[{}] -> {}", name, keys.join(", "), value)
}
