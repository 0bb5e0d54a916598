use crate::board::SearchLimits;
use crate::engine::EngineError;

/// A parsed UCI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    Position { fen: String, moves: Vec<String> },
    Go(SearchLimits),
    SetOption { name: String, value: Option<String> },
    Perft(u32),
    Stop,
    Quit,
    Cli,
    /// Accepted and ignored
    Ignored,
    Unknown(String),
}

pub fn parse_uci_command(command: &str, args: &str) -> Result<UciCommand, EngineError> {
    let cmd = match command {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => parse_position(args)?,
        "go" => UciCommand::Go(parse_go(args)?),
        "setoption" => {
            let (name, value) = parse_setoption(args)
                .ok_or_else(|| EngineError::invalid("setoption", "expected 'name <id> [value <x>]'"))?;
            UciCommand::SetOption { name, value }
        }
        "perft" => UciCommand::Perft(parse_number("perft", args.split_whitespace().next())?),
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        "cli" => UciCommand::Cli,
        "debug" | "ponderhit" | "register" => UciCommand::Ignored,
        _ => UciCommand::Unknown(command.to_string()),
    };
    Ok(cmd)
}

/// `startpos | fen <fields>` optionally followed by `moves <m1> <m2> ...`
fn parse_position(args: &str) -> Result<UciCommand, EngineError> {
    let tokens: Vec<&str> = args.split_whitespace().collect();
    let (head, moves) = match tokens.iter().position(|&t| t == "moves") {
        Some(idx) => (&tokens[..idx], &tokens[idx + 1..]),
        None => (&tokens[..], &[][..]),
    };
    let fen = match head.split_first() {
        Some((&"startpos", [])) => String::new(),
        Some((&"fen", fields)) if !fields.is_empty() => fields.join(" "),
        _ => {
            return Err(EngineError::invalid(
                "position",
                "expected 'startpos' or 'fen <fields>' before 'moves'",
            ))
        }
    };

    Ok(UciCommand::Position {
        fen,
        moves: moves.iter().map(|m| (*m).to_string()).collect(),
    })
}

/// `depth N`, `movetime MS` and `infinite`. Clock parameters are ignored.
fn parse_go(args: &str) -> Result<SearchLimits, EngineError> {
    let mut limits = SearchLimits::default();
    let mut parts = args.split_whitespace();
    while let Some(part) = parts.next() {
        match part {
            "infinite" => limits.infinite = true,
            "depth" => limits.depth = Some(parse_number("go depth", parts.next())?),
            "movetime" => limits.movetime_ms = Some(parse_number("go movetime", parts.next())?),
            _ => {}
        }
    }
    Ok(limits)
}

fn parse_number<T: std::str::FromStr>(
    command: &'static str,
    value: Option<&str>,
) -> Result<T, EngineError> {
    let value = value.ok_or_else(|| EngineError::invalid(command, "missing value"))?;
    value
        .parse()
        .map_err(|_| EngineError::invalid(command, format!("'{value}' is not a valid number")))
}

/// Split `name <id...> [value <x...>]` into its name and optional value.
#[must_use]
pub fn parse_setoption(args: &str) -> Option<(String, Option<String>)> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut mode = "";

    for part in args.split_whitespace() {
        match part {
            "name" => mode = "name",
            "value" => mode = "value",
            _ => match mode {
                "name" => name_parts.push(part),
                "value" => value_parts.push(part),
                _ => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let name = name_parts.join(" ");
    let value = if value_parts.is_empty() {
        None
    } else {
        Some(value_parts.join(" "))
    };

    Some((name, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_startpos_with_moves() {
        let cmd = parse_uci_command("position", "startpos moves e2e4 e7e5").unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: String::new(),
                moves: vec!["e2e4".to_string(), "e7e5".to_string()],
            }
        );
    }

    #[test]
    fn parses_fen_with_and_without_moves() {
        let fen = "4k3/8/8/8/8/8/8/4K2R w K - 0 1";
        let cmd = parse_uci_command("position", &format!("fen {fen}")).unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: fen.to_string(),
                moves: Vec::new(),
            }
        );

        let cmd = parse_uci_command("position", &format!("fen {fen} moves e1g1")).unwrap();
        assert_eq!(
            cmd,
            UciCommand::Position {
                fen: fen.to_string(),
                moves: vec!["e1g1".to_string()],
            }
        );
    }

    #[test]
    fn rejects_malformed_position() {
        assert!(parse_uci_command("position", "").is_err());
        assert!(parse_uci_command("position", "somewhere").is_err());
        assert!(parse_uci_command("position", "startpos e2e4").is_err());
    }

    #[test]
    fn parses_go_limits() {
        assert_eq!(
            parse_uci_command("go", "depth 6").unwrap(),
            UciCommand::Go(SearchLimits::depth(6))
        );
        assert_eq!(
            parse_uci_command("go", "movetime 250").unwrap(),
            UciCommand::Go(SearchLimits::movetime(250))
        );
        assert_eq!(
            parse_uci_command("go", "infinite").unwrap(),
            UciCommand::Go(SearchLimits::infinite())
        );
        assert_eq!(
            parse_uci_command("go", "wtime 1000 btime 1000").unwrap(),
            UciCommand::Go(SearchLimits::default())
        );
        assert!(parse_uci_command("go", "depth x").is_err());
        assert!(parse_uci_command("go", "movetime").is_err());
    }

    #[test]
    fn parses_setoption() {
        assert_eq!(
            parse_uci_command("setoption", "name Hash value 16").unwrap(),
            UciCommand::SetOption {
                name: "Hash".to_string(),
                value: Some("16".to_string()),
            }
        );
        assert!(parse_uci_command("setoption", "value 3").is_err());
    }

    #[test]
    fn unknown_and_ignored_commands() {
        assert_eq!(parse_uci_command("ponderhit", "").unwrap(), UciCommand::Ignored);
        assert_eq!(
            parse_uci_command("xyzzy", "").unwrap(),
            UciCommand::Unknown("xyzzy".to_string())
        );
        assert_eq!(parse_uci_command("perft", "3").unwrap(), UciCommand::Perft(3));
        assert!(parse_uci_command("perft", "").is_err());
    }
}
