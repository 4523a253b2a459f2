//! Simple CLI / REPL for evaluating restricted arithmetic expressions.

use clap::{Args, Parser, Subcommand};

use std::{
    io::{self, BufRead, Read},
    process,
};

use calc_eval::Session;
use calc_parser::ParserOptions;

mod common;
mod repl;

use crate::{
    common::{ColorPreference, Env, LineOutcome, ERROR_EXIT_CODE},
    repl::repl,
};

const ABOUT: &str = "CLI and REPL for evaluating restricted arithmetic expressions.";

const AFTER_HELP: &str = "\
EXIT CODES:
    0    Normal exit
    1    I/O error
    2    Invalid command-line option, or a parsing or evaluation error";

#[derive(Debug, Parser)]
#[command(name = "calc", about = ABOUT, after_help = AFTER_HELP, version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Maximum nesting depth of parsed expressions.
    #[arg(
        long,
        global = true,
        env = "CALC_MAX_DEPTH",
        default_value_t = ParserOptions::DEFAULT_MAX_DEPTH
    )]
    max_depth: usize,
    /// Maximum height of parsed expression trees, e.g., the number of terms in a sum.
    #[arg(
        long,
        global = true,
        env = "CALC_MAX_HEIGHT",
        default_value_t = ParserOptions::DEFAULT_MAX_HEIGHT
    )]
    max_height: usize,
    /// Coloring of the output.
    #[arg(long, global = true, value_enum, default_value_t = ColorPreference::Auto)]
    color: ColorPreference,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse the input and output the AST.
    Ast {
        /// Expression to parse. If omitted, the expression will be read from stdin.
        command: Option<String>,
    },
    /// Evaluate the input.
    Eval(EvalArgs),
}

#[derive(Debug, Args)]
struct EvalArgs {
    /// Launch the REPL for arithmetic expressions.
    #[arg(long, short = 'i')]
    interactive: bool,
    /// Previous result available to expressions as `ans`.
    #[arg(long, allow_negative_numbers = true)]
    ans: Option<f64>,
    /// Expression to evaluate. If omitted, expressions will be read from stdin line by line.
    #[arg(conflicts_with = "interactive")]
    command: Option<String>,
}

impl Cli {
    fn run(self) -> anyhow::Result<bool> {
        let options = ParserOptions::default()
            .with_max_depth(self.common.max_depth)
            .with_max_height(self.common.max_height);
        match self.command {
            Command::Ast { command } => {
                let command = match command {
                    Some(command) => command,
                    None => {
                        let mut buffer = String::new();
                        io::stdin().read_to_string(&mut buffer)?;
                        buffer
                    }
                };
                let mut env = Env::new(Session::with_options(options), self.common.color);
                Ok(env.parse_and_print_ast(&command)?)
            }
            Command::Eval(eval_args) => eval_args.run(options, self.common.color),
        }
    }
}

impl EvalArgs {
    fn run(self, options: ParserOptions, color: ColorPreference) -> anyhow::Result<bool> {
        let mut session = Session::with_options(options);
        if let Some(ans) = self.ans {
            session = session.with_last_result(ans);
        }
        let mut env = Env::new(session, color);

        if self.interactive {
            repl(env)?;
            Ok(true)
        } else if let Some(command) = self.command {
            let outcome = env.evaluate(&command)?;
            Ok(outcome != LineOutcome::Errored)
        } else {
            Self::run_lines(&mut env, io::stdin().lock())
        }
    }

    fn run_lines(env: &mut Env, input: impl BufRead) -> anyhow::Result<bool> {
        let mut success = true;
        for line in input.lines() {
            match env.process_line(&line?)? {
                LineOutcome::Quit => break,
                LineOutcome::Errored => success = false,
                LineOutcome::Value(_) | LineOutcome::Skipped => {}
            }
        }
        Ok(success)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if !cli.run()? {
        process::exit(ERROR_EXIT_CODE);
    }
    Ok(())
}
