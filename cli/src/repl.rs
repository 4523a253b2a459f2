//! REPL for arithmetic expressions.

use rustyline::{error::ReadlineError, DefaultEditor};

use crate::common::{Env, LineOutcome};

const PROMPT: &str = "calc> ";

pub fn repl(mut env: Env) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;
    env.print_greeting()?;

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                if env.process_line(&line)? == LineOutcome::Quit {
                    break Ok(());
                }
            }

            Err(ReadlineError::Interrupted) => {
                println!("Bye");
                break Ok(());
            }

            Err(ReadlineError::Eof) => {
                break Ok(());
            }

            Err(err) => break Err(err.into()),
        }
    }
}
