//! Host adapters
//!
//! A [`CommandSink`] receives the simulation's side effects. Real hosts
//! (a renderer, an audio engine) implement it; the sinks here cover logging,
//! streaming JSON lines to another process, and tests.

use std::io::Write;

use crate::error::Result;
use crate::sim::{Command, TowerState};

/// Consumer of simulation side effects
pub trait CommandSink {
    fn apply(&mut self, command: &Command) -> Result<()>;
}

/// Drain the state's queued commands into `sink`, in order.
/// Returns how many were applied.
pub fn dispatch(state: &mut TowerState, sink: &mut impl CommandSink) -> Result<usize> {
    let commands = state.drain_commands();
    for command in &commands {
        sink.apply(command)?;
    }
    Ok(commands.len())
}

/// Writes every command as a `log` record. Movement goes to `trace`.
#[derive(Debug, Default)]
pub struct LogSink;

impl CommandSink for LogSink {
    fn apply(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::MoveBlock { .. } | Command::SetBlockScale { .. } => {
                log::trace!("{}: {:?}", command.kind(), command)
            }
            Command::UpdateScore { text } => log::info!("Score: {text}"),
            Command::ShowGameOver => log::info!("GAME OVER"),
            _ => log::debug!("{}: {:?}", command.kind(), command),
        }
        Ok(())
    }
}

/// Streams commands as newline-delimited JSON
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandSink for JsonLinesSink<W> {
    fn apply(&mut self, command: &Command) -> Result<()> {
        serde_json::to_writer(&mut self.out, command)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// Keeps every command it sees
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub commands: Vec<Command>,
}

impl CommandSink for RecordingSink {
    fn apply(&mut self, command: &Command) -> Result<()> {
        self.commands.push(command.clone());
        Ok(())
    }
}
