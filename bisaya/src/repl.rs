//! REPL (Read-Eval-Print Loop) for Bisaya++
//!
//! Each entry is a run of statements without `SUGOD`/`KATAPUSAN`, executed
//! against one interpreter that lives for the whole session. Features:
//! - Persistent variables, so `DAWAT` and later statements see earlier declarations
//! - Multi-line entries that complete once braces and parentheses balance
//! - `:`-prefixed commands for inspecting and resetting the session
//! - Error recovery with miette reports
//! - History support and line editing with rustyline

use bisaya_interpreter::{
    InputError, InputSource, Interpreter, LineSource, OutputSink, RunError, WriterSink,
};
use bisaya_parser::{DiagnosticCollector, Statement, parse_statements, tokenize};
use miette::{Diagnostic, NamedSource, Report};
use rustyline::{DefaultEditor, error::ReadlineError};
use std::io::{self, Stdout};
use thiserror::Error;

/// Errors that can occur in the REPL
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Run(#[from] RunError),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("Readline error: {source}")]
    Readline {
        #[from]
        source: ReadlineError,
    },

    #[error("REPL command error: {message}")]
    #[diagnostic(code(bisaya::repl::command), help("Type :help for available commands"))]
    Command { message: String },
}

/// DAWAT input for the REPL: one stdin line per read, without holding the lock between reads
#[derive(Debug, Default)]
pub struct ConsoleInput;

impl InputSource for ConsoleInput {
    fn read_line(&mut self) -> Result<String, InputError> {
        LineSource::new(io::stdin().lock()).read_line()
    }
}

/// REPL session that keeps one interpreter alive across entries
pub struct ReplSession<O: OutputSink = WriterSink<Stdout>, I: InputSource = ConsoleInput> {
    /// Interactive line editor with history
    editor: DefaultEditor,

    interpreter: Interpreter<O, I>,

    config: ReplConfig,

    stats: ReplStats,
}

/// REPL configuration options
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string for input
    pub prompt: String,

    /// Prompt shown while an entry is still open
    pub continuation_prompt: String,

    /// Enable history persistence
    pub persist_history: bool,

    /// History file path
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "bisaya> ".to_string(),
            continuation_prompt: "... ".to_string(),
            persist_history: true,
            history_file: Some(".bisaya_history".to_string()),
        }
    }
}

/// REPL session statistics
#[derive(Debug, Clone, Default)]
pub struct ReplStats {
    /// Number of statements executed
    pub statements_executed: usize,

    /// Number of errors encountered
    pub errors_encountered: usize,

    /// Total REPL commands executed
    pub commands_executed: usize,
}

/// Result of evaluating one entry
#[derive(Debug, PartialEq)]
pub enum ReplResult {
    /// Statements ran; their output has already been written
    Executed { statements: usize },

    /// Executed a REPL command
    Command { message: String },

    /// Empty line or comment
    Empty,

    /// Exit request
    Exit,
}

impl ReplSession {
    /// Create a session writing to stdout and reading DAWAT lines from stdin
    pub fn new(config: ReplConfig) -> Result<Self, ReplError> {
        Self::with_io(config, WriterSink::stdout(), ConsoleInput)
    }
}

impl<O: OutputSink, I: InputSource> ReplSession<O, I> {
    pub fn with_io(config: ReplConfig, output: O, input: I) -> Result<Self, ReplError> {
        let mut editor = DefaultEditor::new()?;

        if config.persist_history {
            if let Some(ref history_file) = config.history_file {
                let _ = editor.load_history(history_file); // missing on first run
            }
        }

        Ok(Self {
            editor,
            interpreter: Interpreter::new(output, input),
            config,
            stats: ReplStats::default(),
        })
    }

    /// Start the REPL main loop
    pub fn run(&mut self) -> Result<(), ReplError> {
        self.print_welcome();

        while let Some(entry) = self.read_entry()? {
            match self.evaluate_line(&entry) {
                Ok(ReplResult::Exit) => break,
                Ok(result) => self.display_result(result),
                Err(error) => {
                    self.stats.errors_encountered += 1;
                    self.display_error(error, &entry);
                }
            }
        }

        self.print_goodbye();
        self.save_history()?;
        Ok(())
    }

    /// Read one entry, continuing over several lines until it balances
    fn read_entry(&mut self) -> Result<Option<String>, ReplError> {
        let mut entry = String::new();
        let mut line_count = 0;

        loop {
            let prompt = if line_count == 0 {
                &self.config.prompt
            } else {
                &self.config.continuation_prompt
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    line_count += 1;

                    if line_count == 1 && line.trim().is_empty() {
                        return Ok(Some(String::new()));
                    }

                    if !entry.is_empty() {
                        entry.push('\n');
                    }
                    entry.push_str(&line);

                    if is_input_complete(&entry) {
                        self.editor.add_history_entry(entry.clone())?;
                        return Ok(Some(entry));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // cancel any half-typed entry
                    println!("^C");
                    return Ok(Some(String::new()));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(ReplError::Readline { source: err }),
            }
        }
    }

    /// Evaluate one entry
    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(ReplResult::Empty);
        }

        if trimmed.starts_with(':') {
            return self.execute_command(trimmed);
        }

        let statements = self.parse_entry(line)?;
        if statements.is_empty() {
            return Ok(ReplResult::Empty);
        }

        let executed = self.interpreter.execute_statements(&statements);
        let finished = self.interpreter.finish();
        executed.and(finished).map_err(RunError::from)?;

        self.stats.statements_executed += statements.len();
        tracing::debug!(statements = statements.len(), "REPL entry executed");
        Ok(ReplResult::Executed {
            statements: statements.len(),
        })
    }

    fn parse_entry(&self, entry: &str) -> Result<Vec<Statement>, ReplError> {
        let mut diagnostics = DiagnosticCollector::new(entry);
        let tokens = tokenize(entry, &mut diagnostics);
        if diagnostics.has_errors() {
            return Err(RunError::from(&diagnostics).into());
        }

        let statements = parse_statements(&tokens, self.interpreter.environment().names())
            .map_err(RunError::from)?;
        Ok(statements)
    }

    /// Execute a REPL command
    fn execute_command(&mut self, command: &str) -> Result<ReplResult, ReplError> {
        self.stats.commands_executed += 1;

        let parts: Vec<&str> = command.split_whitespace().collect();
        let Some(name) = parts.first() else {
            return Ok(ReplResult::Empty);
        };

        match *name {
            ":help" | ":h" => Ok(ReplResult::Command {
                message: self.help_message(),
            }),

            ":vars" | ":variables" => Ok(ReplResult::Command {
                message: self.format_variables(),
            }),

            ":reset" => {
                self.interpreter.environment_mut().clear();
                Ok(ReplResult::Command {
                    message: "Environment cleared".to_string(),
                })
            }

            ":stats" => Ok(ReplResult::Command {
                message: self.format_stats(),
            }),

            ":quit" | ":q" | ":exit" => Ok(ReplResult::Exit),

            unknown => Err(ReplError::Command {
                message: format!("Unknown command: {unknown}"),
            }),
        }
    }

    fn display_result(&self, result: ReplResult) {
        match result {
            ReplResult::Command { message } => println!("{message}"),
            ReplResult::Executed { .. } | ReplResult::Empty | ReplResult::Exit => {}
        }
    }

    /// Report an error against the entry that caused it
    fn display_error(&self, error: ReplError, entry: &str) {
        let source = NamedSource::new("<repl>", entry.to_string());
        match error {
            ReplError::Run(RunError::Lexical { diagnostics, .. }) => {
                for diagnostic in diagnostics {
                    let report = Report::new(diagnostic).with_source_code(source.clone());
                    eprintln!("{report:?}");
                }
            }
            error @ (ReplError::Run(_) | ReplError::Command { .. }) => {
                let report = Report::new(error).with_source_code(source);
                eprintln!("{report:?}");
            }
            error => eprintln!("Error: {error}"),
        }
    }

    fn print_welcome(&self) {
        println!("Bisaya++ REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for commands, :quit to exit");
        println!();
    }

    fn print_goodbye(&self) {
        println!("{}", self.format_stats());
        println!("Babay!");
    }

    fn save_history(&mut self) -> Result<(), ReplError> {
        if self.config.persist_history {
            if let Some(ref history_file) = self.config.history_file {
                self.editor.save_history(history_file)?;
            }
        }
        Ok(())
    }

    fn help_message(&self) -> String {
        r#"Bisaya++ REPL Commands:
  :help, :h            Show this help message
  :vars, :variables    List variables with their types and values
  :reset               Forget every variable
  :stats               Show session statistics
  :quit, :q, :exit     Exit the REPL

Examples:
  MUGNA NUMERO x = 5   Declare a variable
  IPAKITA: x * 2       Print a value
  DAWAT: x             Read x from the console

Multi-line input:
  KUNG (x > 3) PUNDOK {     An open brace continues the entry
    IPAKITA: "dako"         on the next line (...)
  }                         and it runs once the braces close

Use Ctrl+C to cancel an entry, Ctrl+D to exit."#
            .to_string()
    }

    /// Variables in declaration order
    fn format_variables(&self) -> String {
        let environment = self.interpreter.environment();
        if environment.is_empty() {
            return "No variables defined".to_string();
        }

        let mut lines = vec!["Variables:".to_string()];
        for (name, data_type, value) in environment.iter() {
            lines.push(format!("  {name}: {data_type} = {}", value.to_display_string()));
        }
        lines.join("\n")
    }

    fn format_stats(&self) -> String {
        format!(
            r#"Session Statistics:
  Statements executed: {}
  Errors encountered: {}
  Commands executed: {}"#,
            self.stats.statements_executed,
            self.stats.errors_encountered,
            self.stats.commands_executed
        )
    }
}

/// Whether braces and parentheses balance outside literals, escapes and comments
fn is_input_complete(input: &str) -> bool {
    let mut brace_count = 0i32;
    let mut paren_count = 0i32;
    let mut in_string = false;
    let mut in_char = false;

    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];

        match ch {
            '"' if !in_char => in_string = !in_string,
            '\'' if !in_string => in_char = !in_char,
            '\n' => in_char = false,
            _ if in_string || in_char => {}
            '[' => {
                // `[]]` escapes a closing bracket
                if chars.get(i + 1) == Some(&']') && chars.get(i + 2) == Some(&']') {
                    i += 3;
                    continue;
                }
                while i < chars.len() && chars[i] != ']' && chars[i] != '\n' {
                    i += 1;
                }
            }
            '-' if chars.get(i + 1) == Some(&'-') && starts_comment(&chars, i) => {
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
                continue;
            }
            '{' => brace_count += 1,
            '}' => brace_count -= 1,
            '(' => paren_count += 1,
            ')' => paren_count -= 1,
            _ => {}
        }

        i += 1;
    }

    brace_count <= 0 && paren_count <= 0 && !in_string
}

/// `--` at `at` is a comment unless it sits against an operand
fn starts_comment(chars: &[char], at: usize) -> bool {
    let before = at.checked_sub(1).map(|i| chars[i]);
    let after = chars.get(at + 2).copied();
    let postfix = before.is_some_and(|c| c.is_alphanumeric() || c == '_' || c == ')');
    let prefix = after.is_some_and(|c| c.is_alphabetic() || c == '_');
    !(postfix || prefix)
}
