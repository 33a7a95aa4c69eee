//! Interactive commands read from stdin.
//!
//! One command per line:
//! - a ticker (e.g. `SBER`) selects it,
//! - `refresh` (or `r`) polls quotes immediately,
//! - `search <text>` (or `/ <text>`) searches securities,
//! - `quit` (or `q`) ends the session.
use crossbeam_channel::Sender;
use log::{info, warn};
use moex_common::{MoexError, Ticker};
use std::io::BufRead;
use std::thread;

use crate::refresh::Command;

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, MoexError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (head, rest) = trimmed
        .split_once(char::is_whitespace)
        .map(|(h, r)| (h, r.trim()))
        .unwrap_or((trimmed, ""));

    let command = match head.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => Command::Quit,
        "r" | "refresh" => Command::Refresh,
        "/" | "search" => {
            if rest.is_empty() {
                return Err(MoexError::Format("search needs a query".to_string()));
            }
            Command::Search(rest.to_string())
        }
        _ if rest.is_empty() => Command::Select(head.parse::<Ticker>()?),
        _ => return Err(MoexError::Format(format!("unknown command: {trimmed}"))),
    };
    Ok(Some(command))
}

/// Spawns a thread forwarding parsed stdin lines to `tx`.
///
/// The thread ends on EOF, on `quit`, or once the session stops listening. EOF only
/// ends the reader; the session keeps polling until it is told to quit.
pub fn spawn_stdin_reader<R>(reader: R, tx: Sender<Command>)
where
    R: BufRead + Send + 'static,
{
    thread::spawn(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read command: {e}");
                    break;
                }
            };
            match parse_command(&line) {
                Ok(Some(command)) => {
                    let quit = command == Command::Quit;
                    if tx.send(command).is_err() || quit {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!("{e}"),
            }
        }
        info!("Command input closed");
    });
}
