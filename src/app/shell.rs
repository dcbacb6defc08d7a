use crate::app::commands::{execute, render, CommandContext};
use crate::config::cli::{Command, ShellLine};
use crate::core::inventory::Inventory;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use clap::Parser;
use std::io::{BufRead, Write};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShellSummary {
    pub executed: usize,
    pub failed: usize,
    pub mutated: bool,
}

/// Reads one command per line until `exit`, `quit` or end of input.
///
/// Failed commands and lines that are not UTF-8 are reported on `output` and
/// the loop carries on with the inventory as it was; only I/O errors on
/// `input`/`output` end the session.
pub fn run_shell<S: Storage, W: Write>(
    inventory: &mut Inventory,
    ctx: &CommandContext<'_, S>,
    input: &mut dyn BufRead,
    output: &mut W,
    json: bool,
) -> Result<ShellSummary> {
    let mut summary = ShellSummary::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                writeln!(output, "Ignoring line that is not valid UTF-8: {}", e)?;
                summary.failed += 1;
                continue;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if matches!(trimmed, "exit" | "quit") {
            break;
        }

        let command = match ShellLine::try_parse_from(trimmed.split_whitespace()) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(output, "{}", e.render())?;
                summary.failed += 1;
                continue;
            }
        };

        match execute(inventory, &command, ctx, input) {
            Ok(outcome) => {
                writeln!(output, "{}", render(&outcome, json)?)?;
                summary.executed += 1;
                summary.mutated |= command.mutates();
            }
            Err(e) => {
                tracing::debug!("Command {:?} failed: {}", command, e);
                writeln!(output, "{}", e.user_friendly_message())?;
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}
