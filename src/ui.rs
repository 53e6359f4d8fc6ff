// UI layer: the numbered menu loop. Reads one line, runs the matching
// command, prints what came back and asks again until the line is blank.

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::Input;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{info, warn};

use crate::api::{ApiResponse, Transport};
use crate::commands::{self, CommandError};
use crate::config::Config;

/// Source of user answers. `Ok(None)` means input has ended.
pub trait Prompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Reads from the terminal through `dialoguer`, or line by line from stdin
/// when it is piped.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if self.interactive {
            let line = Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()?;
            return Ok(Some(line));
        }

        read_plain_line(&mut io::stdin().lock(), &mut io::stdout(), prompt)
    }
}

/// Write `prompt: ` to `output`, then read one line from `input` without
/// its line ending. `Ok(None)` at end of input.
pub fn read_plain_line(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(output, "{prompt}: ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}

/// Main interactive menu. Runs until a blank line or end of input; a
/// failing command is reported and the loop carries on.
pub fn main_menu(config: &Config, prompter: &mut dyn Prompter, transport: &dyn Transport) -> Result<()> {
    let usage = commands::usage();
    loop {
        println!("\n{usage}");
        let Some(line) = prompter.read_line("Enter choice (or leave blank to finish)")? else {
            break;
        };
        let choice = line.trim();
        if choice.is_empty() {
            break;
        }

        let Some(command) = commands::find(choice) else {
            warn!(choice, "unknown menu choice");
            println!("{}", format!("unknown choice {choice:?}, pick a number from the menu").yellow());
            continue;
        };
        report(choice, command.run(config, prompter, transport));
    }
    println!("=> exit");
    Ok(())
}

/// Print the outcome of one command the same way whatever it was.
fn report(choice: &str, outcome: std::result::Result<ApiResponse, CommandError>) {
    match outcome {
        Ok(resp) => {
            info!(choice, status = resp.status, "request done");
            println!("{} {}", resp.url, resp.body);
        }
        Err(CommandError::Validation(msg)) => {
            warn!(choice, %msg, "command rejected");
            println!("{}", msg.yellow());
        }
        Err(err) => {
            let err = anyhow::Error::new(err);
            warn!(choice, error = %format!("{err:#}"), "command failed");
            println!("{}", format!("choice {choice} failed: {err:#}").red());
        }
    }
}
