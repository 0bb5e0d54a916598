//! Universal Chess Interface (UCI) protocol implementation.
//!
//! Handles communication with chess GUIs over stdin and stdout.

use std::sync::Arc;
use std::time::Instant;

use crate::board::{SearchInfoCallback, SearchIterationInfo};
use crate::engine::{Control, EngineError, EngineSession, Output, Protocol, ProtocolKind};

pub mod command;
pub mod options;
pub mod print;

use command::{parse_uci_command, UciCommand};
use options::{UciOptionAction, UciOptions};
use print::{format_bestmove, format_info, format_perft};

pub const ENGINE_NAME: &str = concat!("bitboard_engine ", env!("CARGO_PKG_VERSION"));

/// UCI front end.
pub struct Uci {
    output: Output,
    options: Option<UciOptions>,
}

impl Uci {
    #[must_use]
    pub fn new(output: Output) -> Self {
        Uci {
            output,
            options: None,
        }
    }

    fn report_error(&self, err: &EngineError) {
        log::warn!("uci: {err}");
        self.output.line(format_args!("info string error {err}"));
    }

    fn execute(&mut self, session: &mut EngineSession, cmd: UciCommand) -> Result<Control, EngineError> {
        let options = self
            .options
            .get_or_insert_with(|| UciOptions::new(session.config().hash_mb));

        match cmd {
            UciCommand::Uci => {
                self.output.line(format_args!("id name {ENGINE_NAME}"));
                for line in options.describe() {
                    self.output.line(line);
                }
                self.output.line("uciok");
            }
            UciCommand::IsReady => self.output.line("readyok"),
            UciCommand::UciNewGame => session.new_game(),
            UciCommand::Position { fen, moves } => {
                let moves: Vec<&str> = moves.iter().map(String::as_str).collect();
                session.set_position(&fen, &moves)?;
            }
            UciCommand::Go(limits) => {
                let info_output = self.output.clone();
                let on_info: SearchInfoCallback = Arc::new(move |info: &SearchIterationInfo| {
                    info_output.line(format_info(info));
                });
                let done_output = self.output.clone();
                session.start_search(limits, Some(on_info), move |report| {
                    done_output.line(format_bestmove(report.best_move));
                })?;
            }
            UciCommand::SetOption { name, value } => {
                if let Some(UciOptionAction::ReinitHash(mb)) =
                    options.apply_setoption(&name, value.as_deref())
                {
                    session.set_hash_size(mb);
                    self.output
                        .line(format_args!("info string Hash set to {mb} MB"));
                }
            }
            UciCommand::Perft(depth) => {
                let output = self.output.clone();
                let start = Instant::now();
                session.start_perft(depth, move |nodes| {
                    output.line(format_perft(depth, nodes, start.elapsed().as_millis()));
                })?;
            }
            UciCommand::Stop => {
                session.stop();
            }
            UciCommand::Quit => return Ok(Control::Quit),
            UciCommand::Cli => return Ok(Control::Switch(ProtocolKind::Cli)),
            UciCommand::Ignored => {}
            UciCommand::Unknown(name) => return Err(EngineError::UnknownCommand(name)),
        }
        Ok(Control::Continue)
    }
}

impl Protocol for Uci {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Uci
    }

    fn handle(&mut self, session: &mut EngineSession, command: &str, args: &str) -> Control {
        match parse_uci_command(command, args).and_then(|cmd| self.execute(session, cmd)) {
            Ok(control) => control,
            Err(err) => {
                self.report_error(&err);
                Control::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineConfig, SharedBuffer};
    use std::thread;
    use std::time::Duration;

    fn uci() -> (Uci, SharedBuffer, EngineSession) {
        let buffer = SharedBuffer::new();
        let uci = Uci::new(Output::new(buffer.clone()));
        (uci, buffer, EngineSession::new(EngineConfig::default()))
    }

    fn wait_for(buffer: &SharedBuffer, prefix: &str) -> String {
        for _ in 0..3000 {
            if let Some(line) = buffer.lines().into_iter().find(|l| l.starts_with(prefix)) {
                return line;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("no line starting with '{prefix}' in {:?}", buffer.lines());
    }

    #[test]
    fn handshake() {
        let (mut uci, buffer, mut session) = uci();
        assert_eq!(uci.handle(&mut session, "uci", ""), Control::Continue);
        assert_eq!(uci.handle(&mut session, "isready", ""), Control::Continue);
        let lines = buffer.lines();
        assert!(lines[0].starts_with("id name bitboard_engine"));
        assert_eq!(lines[1], "option name Hash type spin default 2 min 0 max 512");
        assert_eq!(lines[2], "uciok");
        assert_eq!(lines[3], "readyok");
    }

    #[test]
    fn go_depth_prints_info_then_bestmove() {
        let (mut uci, buffer, mut session) = uci();
        uci.handle(&mut session, "position", "startpos moves e2e4");
        uci.handle(&mut session, "go", "depth 2");
        let best = wait_for(&buffer, "bestmove");
        session.wait();

        let lines = buffer.lines();
        assert!(lines.iter().any(|l| l.starts_with("info depth 1 score cp")));
        assert!(lines.iter().any(|l| l.starts_with("info depth 2 score cp")));
        assert_ne!(best, "bestmove 0000");
    }

    #[test]
    fn bad_position_reports_error() {
        let (mut uci, buffer, mut session) = uci();
        uci.handle(&mut session, "position", "startpos moves e2e5");
        assert!(buffer.lines()[0].starts_with("info string error"));
        assert_eq!(*session.position(), crate::board::Position::new());
    }

    #[test]
    fn setoption_resizes_hash() {
        let (mut uci, buffer, mut session) = uci();
        uci.handle(&mut session, "setoption", "name Hash value 8");
        assert_eq!(session.config().hash_mb, 8);
        assert_eq!(buffer.lines(), vec!["info string Hash set to 8 MB"]);
    }

    #[test]
    fn stop_and_mode_switch() {
        let (mut uci, buffer, mut session) = uci();
        uci.handle(&mut session, "go", "infinite");
        uci.handle(&mut session, "stop", "");
        wait_for(&buffer, "bestmove");
        session.wait();
        assert_eq!(
            uci.handle(&mut session, "cli", ""),
            Control::Switch(ProtocolKind::Cli)
        );
        assert_eq!(uci.handle(&mut session, "quit", ""), Control::Quit);
    }

    #[test]
    fn perft_reports_node_count() {
        let (mut uci, buffer, mut session) = uci();
        uci.handle(&mut session, "perft", "3");
        let line = wait_for(&buffer, "info string perft");
        assert!(line.starts_with("info string perft depth 3 nodes 8902"), "{line}");
    }
}
