//! Protocol trait for chess engine communication.
//!
//! Defines a common interface for the front ends (UCI, CLI) and the command
//! loop that feeds them.

use std::io::BufRead;

use super::output::Output;
use super::session::EngineSession;

/// Front ends the command loop can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    Uci,
    Cli,
}

/// What the command loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Switch(ProtocolKind),
    Quit,
}

/// A front end: accepts a command name and argument string and returns a control signal.
pub trait Protocol {
    fn kind(&self) -> ProtocolKind;

    /// Called once when the protocol becomes active
    fn activate(&mut self, _session: &mut EngineSession) {}

    /// Called once before another protocol takes over the output
    fn deactivate(&mut self, _session: &mut EngineSession) {}

    fn handle(&mut self, session: &mut EngineSession, command: &str, args: &str) -> Control;
}

/// Split a line into its command word and the trimmed remainder.
#[must_use]
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(match line.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim()),
        None => (line, ""),
    })
}

/// Build the front end for `kind` writing to `output`.
#[must_use]
pub fn protocol_for(kind: ProtocolKind, output: &Output) -> Box<dyn Protocol> {
    match kind {
        ProtocolKind::Uci => Box::new(crate::uci::Uci::new(output.clone())),
        ProtocolKind::Cli => Box::new(crate::cli::Cli::new(output.clone())),
    }
}

/// Read commands until `quit` or end of input, dispatching to the active protocol.
///
/// Any running calculation is stopped before returning.
pub fn run_command_loop(
    session: &mut EngineSession,
    input: impl BufRead,
    output: &Output,
    start: ProtocolKind,
) -> std::io::Result<()> {
    let mut protocol = protocol_for(start, output);
    protocol.activate(session);

    for line in input.lines() {
        let line = line?;
        let Some((command, args)) = split_command(&line) else {
            continue;
        };
        log::debug!("{:?} <- {}", protocol.kind(), line.trim());

        match protocol.handle(session, command, args) {
            Control::Continue => {}
            Control::Switch(kind) => {
                log::info!("switching to {kind:?} mode");
                protocol.deactivate(session);
                protocol = protocol_for(kind, output);
                protocol.activate(session);
            }
            Control::Quit => break,
        }
    }

    session.stop_and_wait();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineConfig, SharedBuffer};
    use std::io::Cursor;

    #[test]
    fn switching_from_cli_ends_the_prompt_line() {
        let buffer = SharedBuffer::new();
        let mut session = EngineSession::new(EngineConfig::default());
        let script = Cursor::new("uci\nuci\nquit\n");
        run_command_loop(&mut session, script, &Output::new(buffer.clone()), ProtocolKind::Cli)
            .unwrap();

        let contents = buffer.contents();
        assert!(contents.starts_with(">>> \nid name "), "{contents}");
        assert!(buffer.lines().iter().any(|l| l == "uciok"));
    }

    #[test]
    fn splits_command_and_arguments() {
        assert_eq!(split_command("  go depth 4 "), Some(("go", "depth 4")));
        assert_eq!(split_command("quit"), Some(("quit", "")));
        assert_eq!(
            split_command("setboard 8/8/8/8/8/8/8/8 w - - 0 1"),
            Some(("setboard", "8/8/8/8/8/8/8/8 w - - 0 1"))
        );
        assert_eq!(split_command("   "), None);
    }
}
