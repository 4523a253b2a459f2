//! Common utils shared by the one-shot mode and the REPL.

use clap::ValueEnum;
use codespan::{FileId, Files};
use codespan_reporting::{
    diagnostic::{Diagnostic, Label},
    term::termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor},
    term::{emit, Config as ReportingConfig},
};
use is_terminal::IsTerminal;

use std::io::{self, Write};

use calc_eval::{Binding, EvaluationError, Session, SpannedEvalError};
use calc_parser::Error as ParseError;

/// Exit code on parse or evaluation errors.
pub const ERROR_EXIT_CODE: i32 = 2;

const COMMANDS_HELP: &str = "\
Commands:
    .help     Show this message
    .clear    Forget the previous result
    .ans      Show the previous result
    .dump     List names that can be used in expressions
    quit      Exit the REPL (`exit` works as well)";

/// Color preference for the output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorPreference {
    /// Use colors if the output stream is a terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorPreference {
    fn choice(self, is_terminal: bool) -> ColorChoice {
        match self {
            Self::Auto if is_terminal => ColorChoice::Auto,
            Self::Auto | Self::Never => ColorChoice::Never,
            Self::Always => ColorChoice::Always,
        }
    }
}

/// Code map containing evaluated code snippets.
#[derive(Debug, Default)]
pub struct CodeMap {
    files: Files<String>,
    snippet_count: usize,
}

impl CodeMap {
    fn add(&mut self, source: &str) -> FileId {
        self.snippet_count += 1;
        let file_name = format!("Snip #{}", self.snippet_count);
        self.files.add(file_name, source.to_owned())
    }
}

/// Outcome of processing a single input line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineOutcome {
    /// Line evaluated to a number.
    Value(f64),
    /// Line was a command or blank.
    Skipped,
    /// Line has produced an error, which was reported.
    Errored,
    /// Line requested to exit.
    Quit,
}

/// Evaluation environment: the session together with output streams.
pub struct Env {
    code_map: CodeMap,
    session: Session,
    out: StandardStream,
    writer: StandardStream,
    config: ReportingConfig,
}

impl Env {
    pub fn new(session: Session, color: ColorPreference) -> Self {
        Self {
            code_map: CodeMap::default(),
            session,
            out: StandardStream::stdout(color.choice(io::stdout().is_terminal())),
            writer: StandardStream::stderr(color.choice(io::stderr().is_terminal())),
            config: ReportingConfig::default(),
        }
    }

    pub fn print_greeting(&mut self) -> io::Result<()> {
        let mut writer = self.writer.lock();
        writer.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(writer, "calc REPL v{}", env!("CARGO_PKG_VERSION"))?;
        writer.reset()?;
        writeln!(writer, "{}", env!("CARGO_PKG_DESCRIPTION"))?;
        writeln!(writer, "Type `.help` for help, `quit` or `exit` to exit.")
    }

    fn print_help(&mut self) -> io::Result<()> {
        let env = self.session.environment();
        writeln!(self.out, "{COMMANDS_HELP}")?;
        writeln!(self.out)?;
        writeln!(self.out, "Functions: {}", env.function_names().join(", "))?;
        writeln!(self.out, "Constants: {}", env.constant_names().join(", "))?;
        writeln!(self.out, "Operators: + - * / // % ** (unary + -)")
    }

    fn print_ans(&mut self) -> io::Result<()> {
        match self.session.last_result() {
            Some(value) => self.print_value(value),
            None => writeln!(self.out, "No previous answer yet"),
        }
    }

    fn dump_environment(&mut self) -> io::Result<()> {
        let env = self.session.environment();
        let fn_color = ColorSpec::new().set_fg(Some(Color::Magenta)).clone();

        for name in env.constant_names() {
            if let Some(Binding::Number(value)) = env.get(name) {
                write!(self.out, "{name} = ")?;
                self.print_value(value)?;
            }
        }
        for name in env.function_names() {
            write!(self.out, "{name} = ")?;
            self.out.set_color(&fn_color)?;
            write!(self.out, "(native fn)")?;
            self.out.reset()?;
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn print_value(&mut self, value: f64) -> io::Result<()> {
        let num_color = ColorSpec::new().set_fg(Some(Color::Green)).clone();
        self.out.set_color(&num_color)?;
        write!(self.out, "{}", format_number(value))?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn emit(&self, diagnostic: &Diagnostic<FileId>) -> io::Result<()> {
        emit(
            &mut self.writer.lock(),
            &self.config,
            &self.code_map.files,
            diagnostic,
        )
        .map_err(io::Error::other)
    }

    /// Reports a parsing error.
    fn report_parse_error(&self, file: FileId, err: &ParseError<'_>) -> io::Result<()> {
        let kind = err.kind();
        let label =
            Label::primary(file, err.span().byte_range()).with_message(kind.main_span_info());
        let mut diagnostic = Diagnostic::error()
            .with_message(kind.to_string())
            .with_code("PARSE")
            .with_labels(vec![label]);
        if let Some(help) = kind.help() {
            diagnostic = diagnostic.with_notes(vec![help.to_owned()]);
        }
        self.emit(&diagnostic)
    }

    /// Reports an evaluation error.
    fn report_eval_error(&self, file: FileId, err: &SpannedEvalError<'_>) -> io::Result<()> {
        let kind = err.kind();
        let main_label = Label::primary(file, err.main_span().byte_range())
            .with_message(kind.main_span_info());
        let aux_labels = err.aux_spans().iter().map(|aux_span| {
            Label::secondary(file, aux_span.byte_range()).with_message(aux_span.extra.to_string())
        });
        let labels = std::iter::once(main_label).chain(aux_labels).collect();

        let mut diagnostic = Diagnostic::error()
            .with_message(kind.to_short_string())
            .with_code("EVAL")
            .with_labels(labels)
            .with_notes(vec![kind.to_string()]);
        if let Some(help) = kind.help() {
            diagnostic.notes.push(help);
        }
        self.emit(&diagnostic)
    }

    fn report_error(&self, file: FileId, err: &EvaluationError<'_>) -> io::Result<()> {
        match err {
            EvaluationError::Parse(err) => self.report_parse_error(file, err),
            EvaluationError::Eval(err) => self.report_eval_error(file, err),
            _ => {
                let label = Label::primary(file, err.main_span().byte_range());
                let diagnostic = Diagnostic::error()
                    .with_message(err.to_string())
                    .with_labels(vec![label]);
                self.emit(&diagnostic)
            }
        }
    }

    fn report_unknown_command(&self, file: FileId, line: &str) -> io::Result<()> {
        let label = Label::primary(file, 0..line.len())
            .with_message("Use `.help` to find out commands");
        let diagnostic = Diagnostic::error()
            .with_message("Unknown command")
            .with_code("CMD")
            .with_labels(vec![label]);
        self.emit(&diagnostic)
    }

    /// Parses the AST of `source` and prints it.
    pub fn parse_and_print_ast(&mut self, source: &str) -> io::Result<bool> {
        let file = self.code_map.add(source);
        match calc_parser::parse_with_options(source, self.session.options()) {
            Ok(expr) => {
                writeln!(self.out, "{expr:#?}")?;
                Ok(true)
            }
            Err(err) => {
                self.report_parse_error(file, &err)?;
                Ok(false)
            }
        }
    }

    /// Evaluates `source` as an expression, printing the result or reporting an error.
    pub fn evaluate(&mut self, source: &str) -> io::Result<LineOutcome> {
        let file = self.code_map.add(source);
        match self.session.evaluate(source) {
            Ok(value) => {
                self.print_value(value)?;
                Ok(LineOutcome::Value(value))
            }
            Err(err) => {
                self.report_error(file, &err)?;
                Ok(LineOutcome::Errored)
            }
        }
    }

    /// Processes a single input line: a REPL command, a blank line or an expression.
    pub fn process_line(&mut self, line: &str) -> io::Result<LineOutcome> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(LineOutcome::Skipped);
        }
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            return Ok(LineOutcome::Quit);
        }

        if trimmed.starts_with('.') {
            match trimmed {
                ".help" => self.print_help()?,
                ".clear" => self.session.clear(),
                ".ans" => self.print_ans()?,
                ".dump" => self.dump_environment()?,
                _ => {
                    let file = self.code_map.add(line);
                    self.report_unknown_command(file, line)?;
                    return Ok(LineOutcome::Errored);
                }
            }
            return Ok(LineOutcome::Skipped);
        }

        self.evaluate(line)
    }
}

/// Formats a number for output. Integral values are printed without a fractional part,
/// and very large or very small magnitudes use scientific notation.
pub fn format_number(value: f64) -> String {
    const SCIENTIFIC_MAX: f64 = 1e16;
    const SCIENTIFIC_MIN: f64 = 1e-4;

    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if !(SCIENTIFIC_MIN..SCIENTIFIC_MAX).contains(&magnitude) {
        format!("{value:e}")
    } else {
        // `Display` for `f64` yields the shortest representation that round-trips,
        // with no fractional part for integral values.
        value.to_string()
    }
}
