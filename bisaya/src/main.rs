use bisaya_interpreter::{InputSource, Interpreter, LineSource, RunError, WriterSink};
use bisaya_parser::{DiagnosticCollector, parse_program_with_diagnostics, parse_tokens, tokenize};
use clap::{ArgAction, Parser, Subcommand};
use miette::{IntoDiagnostic, MietteHandlerOpts, NamedSource, Report, Result};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process;

mod logging;
mod repl;
mod sexpr;

use repl::{ReplConfig, ReplSession};

#[derive(Parser)]
#[command(
    name = "bisaya",
    version,
    about = "The Bisaya++ teaching language toolchain",
    long_about = "Bisaya++ is a small imperative language with Cebuano keywords, written between SUGOD and KATAPUSAN."
)]
struct Cli {
    /// Log more (-v debug, -vv trace); otherwise BISAYA_LOG decides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Bisaya++ program
    Run {
        /// Program to run (use '-' to read it from stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Read DAWAT lines from this file instead of stdin
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Parse Bisaya++ source files and display their AST
    Parse {
        /// Source files to parse (use '-' to read from stdin)
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,

        /// Show detailed span information in output
        #[arg(short, long)]
        spans: bool,
    },

    /// Print the token stream of a source file
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Start an interactive session
    Repl,
}

fn main() {
    setup_miette_handler();

    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match cli.command {
        Some(Commands::Run { file, input }) => handle_run_command(&file, input.as_deref()),
        Some(Commands::Parse { files, spans }) => handle_parse_command(files, spans),
        Some(Commands::Tokens { file }) => handle_tokens_command(&file),
        Some(Commands::Repl) => handle_repl_command(),
        None => {
            // No subcommand provided, show help
            Cli::parse_from(["bisaya", "--help"]);
            0
        }
    };

    process::exit(code);
}

/// Configure miette for error reporting against the offending source
fn setup_miette_handler() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .tab_width(4)
                .with_cause_chain()
                .build(),
        )
    }))
    .ok();
}

fn handle_run_command(file: &Path, input: Option<&Path>) -> i32 {
    let (source, source_name) = match read_source(file) {
        Ok(read) => read,
        Err(e) => {
            eprintln!("{e:?}");
            return 1;
        }
    };

    let console: Box<dyn InputSource> = match input {
        Some(path) => match File::open(path) {
            Ok(handle) => Box::new(LineSource::new(BufReader::new(handle))),
            Err(e) => {
                eprintln!(
                    "{:?}",
                    miette::miette!("Cannot open input file {}: {}", path.display(), e)
                );
                return 1;
            }
        },
        None => Box::new(LineSource::stdin()),
    };

    match run_program(&source, &source_name, console) {
        Ok(()) => 0,
        Err(error) => {
            let code = error.exit_code();
            // lexical diagnostics were already reported one by one
            if !matches!(error, RunError::Lexical { .. }) {
                let report = Report::new(error)
                    .with_source_code(NamedSource::new(source_name, source));
                eprintln!("{report:?}");
            }
            code
        }
    }
}

/// Lex, parse and execute, reporting each lexical diagnostic as it is found
fn run_program(
    source: &str,
    source_name: &str,
    input: Box<dyn InputSource>,
) -> std::result::Result<(), RunError> {
    let mut diagnostics = DiagnosticCollector::new(source);
    let tokens = tokenize(source, &mut diagnostics);
    if diagnostics.has_errors() {
        diagnostics.print_diagnostics(source_name);
        eprintln!("\nDiagnostics Summary: {}", diagnostics.summary());
        return Err(RunError::from(&diagnostics));
    }

    let program = parse_tokens(&tokens)?;
    tracing::info!(source = source_name, "running program");

    let mut interpreter = Interpreter::new(WriterSink::stdout(), input);
    interpreter.interpret(&program)?;
    Ok(())
}

fn handle_parse_command(files: Vec<PathBuf>, spans: bool) -> i32 {
    let mut success = true;
    let multiple_files = files.len() > 1;

    for file_path in files {
        let display_name = display_name(&file_path);

        match parse_single_file(&file_path, spans) {
            Ok(()) => {
                if multiple_files {
                    println!("✅ {display_name}");
                }
            }
            Err(e) => {
                eprintln!("{e:?}");
                success = false;
            }
        }
    }

    if success { 0 } else { 1 }
}

fn parse_single_file(file_path: &Path, spans: bool) -> Result<()> {
    let (source, source_name) = read_source(file_path)?;

    let (result, diagnostics) = parse_program_with_diagnostics(&source);

    if diagnostics.has_errors() {
        diagnostics.print_diagnostics(&source_name);
        eprintln!("\nDiagnostics Summary: {}", diagnostics.summary());
        return Err(miette::miette!(
            "Parsing failed with {} errors",
            diagnostics.error_count()
        ));
    }

    let program = result
        .map_err(|e| Report::new(e).with_source_code(NamedSource::new(source_name, source)))?;

    if spans {
        println!("{program:#?}");
    } else {
        println!("{}", sexpr::format_program_as_sexpr(&program));
    }
    Ok(())
}

fn handle_tokens_command(file: &Path) -> i32 {
    let (source, source_name) = match read_source(file) {
        Ok(read) => read,
        Err(e) => {
            eprintln!("{e:?}");
            return 1;
        }
    };

    let mut diagnostics = DiagnosticCollector::new(source.as_str());
    let tokens = tokenize(&source, &mut diagnostics);

    for token in &tokens {
        println!(
            "{:>4}:{:<4} {:<16} {}",
            token.line(),
            token.column(),
            format!("{:?}", token.kind),
            token.lexeme
        );
    }

    if diagnostics.has_errors() {
        diagnostics.print_diagnostics(&source_name);
        return 1;
    }
    0
}

fn handle_repl_command() -> i32 {
    let result = ReplSession::new(ReplConfig::default()).and_then(|mut session| session.run());
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

fn display_name(file_path: &Path) -> String {
    if file_path.to_str() == Some("-") {
        "<stdin>".to_string()
    } else {
        file_path.display().to_string()
    }
}

/// Source text and its display name; `-` reads stdin, anything else must be a `.bpp` file
fn read_source(file_path: &Path) -> Result<(String, String)> {
    if file_path.to_str() == Some("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).into_diagnostic()?;
        return Ok((buffer, "<stdin>".to_string()));
    }

    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    if file_path.extension().and_then(|s| s.to_str()) != Some("bpp") {
        return Err(miette::miette!(
            "Expected .bpp file, got: {}",
            file_path.display()
        ));
    }

    let source = fs::read_to_string(file_path).into_diagnostic()?;
    Ok((source, file_path.display().to_string()))
}
