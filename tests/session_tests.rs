//! Scripted command sessions through the command loop.

use std::io::Cursor;

use bitboard_engine::engine::{run_command_loop, Output, ProtocolKind, SharedBuffer};
use bitboard_engine::{EngineConfig, EngineSession, Position};

fn run_script(start: ProtocolKind, script: &str) -> (EngineSession, Vec<String>) {
    let buffer = SharedBuffer::new();
    let output = Output::new(buffer.clone());
    let mut session = EngineSession::new(EngineConfig::default().with_hash_mb(4));
    run_command_loop(&mut session, Cursor::new(script.to_string()), &output, start)
        .expect("in-memory input cannot fail");
    (session, buffer.lines())
}

#[test]
fn uci_handshake_and_position() {
    let (session, lines) = run_script(
        ProtocolKind::Uci,
        "uci\nisready\nucinewgame\nposition startpos moves e2e4 e7e5 g1f3\nquit\n",
    );

    assert!(lines[0].starts_with("id name bitboard_engine"));
    assert!(lines.contains(&"uciok".to_string()));
    assert!(lines.contains(&"readyok".to_string()));
    assert_eq!(
        session.position().to_fen(),
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2"
    );
}

#[test]
fn uci_errors_do_not_end_the_session() {
    let (session, lines) = run_script(
        ProtocolKind::Uci,
        "position fen 8/8/8 w - -\nfrobnicate\nposition startpos moves e2e4\nisready\n",
    );

    assert!(lines[0].starts_with("info string error"));
    assert!(lines[1].starts_with("info string error"));
    assert_eq!(lines.last().map(String::as_str), Some("readyok"));
    assert_eq!(session.position().side_to_move(), bitboard_engine::Color::Black);
}

#[test]
fn unterminated_search_still_answers_bestmove() {
    // End of input stops the search, which must still name a legal move
    let (session, lines) = run_script(ProtocolKind::Uci, "position startpos\ngo infinite\n");

    let best = lines
        .iter()
        .find_map(|line| line.strip_prefix("bestmove "))
        .expect("no bestmove line");
    assert!(Position::new().parse_move(best).is_ok(), "illegal bestmove {best}");
    assert!(!session.is_calculating());
}

#[test]
fn cli_commands_and_switch_to_uci() {
    let (session, lines) = run_script(
        ProtocolKind::Cli,
        "move e2e4\nhash 8\ndivide 1\nuci\nuci\nquit\n",
    );

    assert!(lines.iter().any(|l| l == ">>> Hash table set to 8 MB"));
    assert!(lines.iter().any(|l| l.contains("Moves: 20 Nodes: 20")));
    assert!(lines.iter().any(|l| l.starts_with("id name")));
    assert!(lines.contains(&"uciok".to_string()));
    assert_eq!(session.config().hash_mb, 8);
}

#[test]
fn uci_switches_to_cli_prompt() {
    let (_session, lines) = run_script(ProtocolKind::Uci, "cli\nnew\nbogus\nquit\n");

    assert!(lines[0].starts_with(">>> "));
    assert!(lines.iter().any(|l| l.contains("unknown command")));
}
