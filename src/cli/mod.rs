//! Interactive command-line front end.
//!
//! Commands: `new`, `setboard <fen>`, `display`, `move <coords>`,
//! `search <depth>`, `stop`, `perft <depth>`, `divide <depth>`, `hash <MB>`,
//! `uci`, `quit`. Scores are shown from White's point of view.

use std::sync::Arc;
use std::time::Instant;

use crate::board::{Color, SearchInfoCallback, SearchIterationInfo, SearchLimits};
use crate::engine::{Control, EngineError, EngineSession, Output, Protocol, ProtocolKind};
use crate::tt::GameResult;

pub const PROMPT: &str = ">>> ";

/// CLI front end.
pub struct Cli {
    output: Output,
}

impl Cli {
    #[must_use]
    pub fn new(output: Output) -> Self {
        Cli { output }
    }

    fn execute(&self, session: &mut EngineSession, command: &str, args: &str) -> Result<Control, EngineError> {
        match command {
            "quit" => return Ok(Control::Quit),
            "uci" => return Ok(Control::Switch(ProtocolKind::Uci)),
            "new" => {
                session.new_game();
                self.output.line(session.display());
            }
            "setboard" => {
                session.set_position(args, &[])?;
                self.output.line(session.display());
            }
            "display" => self.output.line(session.display()),
            "move" => {
                let coords = args
                    .split_whitespace()
                    .next()
                    .ok_or_else(|| EngineError::invalid("move", "expected a move such as e2e4"))?;
                session.make_move(coords)?;
                self.output.line(session.display());
            }
            "search" => {
                let depth = parse_depth("search", args)?;
                self.start_search(session, depth)?;
            }
            "stop" => {
                if !session.stop() {
                    self.output.line("Engine not calculating");
                }
            }
            "perft" => {
                let depth = parse_depth("perft", args)?;
                let output = self.output.clone();
                let start = Instant::now();
                session.start_perft(depth, move |nodes| match nodes {
                    Some(nodes) => {
                        let secs = start.elapsed().as_secs_f64();
                        output.line(format_args!("Perft {depth}: {nodes}. ({})", nps(nodes, secs)));
                    }
                    None => output.line(format_args!("Perft {depth}: stopped")),
                })?;
            }
            "divide" => {
                let depth = parse_depth("divide", args)?;
                self.divide(session, depth);
            }
            "hash" => {
                let mb = args
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| EngineError::invalid("hash", "argument must be a size in MB"))?;
                session.set_hash_size(mb);
                self.output
                    .line(format_args!("Hash table set to {} MB", session.config().hash_mb));
            }
            _ => return Err(EngineError::UnknownCommand(command.to_string())),
        }
        Ok(Control::Continue)
    }

    fn start_search(&self, session: &mut EngineSession, depth: u32) -> Result<(), EngineError> {
        let side = session.position().side_to_move();

        let info_output = self.output.clone();
        let on_info: SearchInfoCallback = Arc::new(move |info: &SearchIterationInfo| {
            info_output.line(format_iteration(info, side));
            let secs = info.time_ms as f64 / 1000.0;
            info_output.line(format_args!(
                "searched {} nodes in {:.3}s ({})",
                info.nodes,
                secs,
                nps(info.nodes, secs)
            ));
        });

        let done_output = self.output.clone();
        session.start_search(SearchLimits::depth(depth), Some(on_info), move |report| {
            if let Some(mv) = report.best_move {
                done_output.line(format_args!("Best move: {}", mv.display()));
            }
        })
    }

    fn divide(&self, session: &EngineSession, depth: u32) {
        let start = Instant::now();
        let Some(counts) = session.divide(depth) else {
            self.output.line("Divide stopped");
            return;
        };
        let mut total = 0;
        for (mv, nodes) in &counts {
            self.output.line(format_args!("{mv}: {nodes}"));
            total += nodes;
        }
        let secs = start.elapsed().as_secs_f64();
        self.output.line(format_args!(
            "Moves: {} Nodes: {} ({})",
            counts.len(),
            total,
            nps(total, secs)
        ));
    }
}

impl Protocol for Cli {
    fn kind(&self) -> ProtocolKind {
        ProtocolKind::Cli
    }

    fn activate(&mut self, _session: &mut EngineSession) {
        self.output.text(PROMPT);
    }

    fn deactivate(&mut self, _session: &mut EngineSession) {
        // Finish the prompt line so the next protocol starts on a fresh one
        self.output.line("");
    }

    fn handle(&mut self, session: &mut EngineSession, command: &str, args: &str) -> Control {
        let control = match self.execute(session, command, args) {
            Ok(control) => control,
            Err(err) => {
                log::warn!("cli: {err}");
                self.output.line(err);
                Control::Continue
            }
        };
        if control == Control::Continue {
            self.output.text(PROMPT);
        }
        control
    }
}

fn parse_depth(command: &'static str, args: &str) -> Result<u32, EngineError> {
    args.split_whitespace()
        .next()
        .and_then(|v| v.parse::<u32>().ok())
        .ok_or_else(|| EngineError::invalid(command, "argument must be a depth in plies"))
}

/// One line per completed depth: result or evaluation, then the variation.
fn format_iteration(info: &SearchIterationInfo, side: Color) -> String {
    let white_score = match side {
        Color::White => info.score,
        Color::Black => -info.score,
    };
    let verdict = match info.result {
        GameResult::Checkmate if info.mate_in().is_some() => {
            if white_score > 0 {
                "White is mating".to_string()
            } else {
                "Black is mating".to_string()
            }
        }
        GameResult::Stalemate => "Stalemate".to_string(),
        _ => format!("Eval: {:.2}", f64::from(white_score) / 100.0),
    };
    format!(
        "{} | {} | Variation: {}",
        info.depth,
        verdict,
        variation(info)
    )
}

/// The PV in display form
fn variation(info: &SearchIterationInfo) -> String {
    info.pv
        .iter()
        .map(|mv| mv.display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn nps(nodes: u64, secs: f64) -> String {
    if secs <= 0.0 {
        return "- n/s".to_string();
    }
    format!("{:.0} n/s", nodes as f64 / secs)
}
