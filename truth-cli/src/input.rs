use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use truth_types::PlayerSlot;

use crate::driver::DriverCommand;

/// Turn one line typed at the shared keyboard into a command.
///
/// Answers are a player number followed by `t` or `f` (`1t`, `2 false`),
/// `r` starts another match and `q` quits.
pub fn parse_command(line: &str) -> Option<DriverCommand> {
    let line = line.trim().to_lowercase();
    match line.as_str() {
        "q" | "quit" | "exit" => return Some(DriverCommand::Quit),
        "r" | "replay" | "again" => return Some(DriverCommand::PlayAgain),
        _ => {}
    }

    let mut chars = line.chars();
    let number = chars.next()?.to_digit(10)?;
    let player = PlayerSlot::from_number(u8::try_from(number).ok()?)?;
    let answer = match chars.as_str().trim() {
        "t" | "true" => true,
        "f" | "false" => false,
        _ => return None,
    };

    Some(DriverCommand::Answer { player, answer })
}

/// Read stdin on a plain thread so a pending read never holds up shutdown.
pub fn spawn_stdin_reader(commands: mpsc::Sender<DriverCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                warn!("Failed to read from stdin");
                break;
            };
            match parse_command(&line) {
                Some(command) => {
                    if commands.blocking_send(command).is_err() {
                        break;
                    }
                }
                None if line.trim().is_empty() => {}
                None => debug!("Ignoring unrecognised input {:?}", line),
            }
        }
        let _ = commands.blocking_send(DriverCommand::Quit);
    });
}
