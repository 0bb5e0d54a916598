use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};

use bitboard_engine::engine::{run_command_loop, EngineConfig, EngineSession, Output, ProtocolKind};
use bitboard_engine::tt::DEFAULT_TT_MB;

#[derive(Parser)]
#[command(name = "bitboard_engine", version)]
#[command(about = "Bitboard chess engine speaking UCI and an interactive command line")]
struct Args {
    /// Transposition table size in MB (0 disables it)
    #[arg(long, default_value_t = DEFAULT_TT_MB)]
    hash: usize,
    /// Start in UCI mode instead of the command line
    #[arg(long)]
    uci: bool,
    /// Write log messages to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info", value_parser = parse_level)]
    log_level: LevelFilter,
}

fn parse_level(level: &str) -> Result<LevelFilter, String> {
    level
        .parse()
        .map_err(|_| format!("invalid log level '{level}'"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    // Stdout carries protocol traffic, so logs only ever go to a file
    match &args.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|err| format!("{}: {err}", path.display()))?;
            WriteLogger::init(args.log_level, Config::default(), file)
                .map_err(|err| format!("logger: {err}"))?;
        }
        None => WriteLogger::init(LevelFilter::Off, Config::default(), io::sink())
            .map_err(|err| format!("logger: {err}"))?,
    }

    let config = EngineConfig::default().with_hash_mb(args.hash);
    log::info!("starting with {config:?}");

    let mut session = EngineSession::new(config);
    let start = if args.uci {
        ProtocolKind::Uci
    } else {
        ProtocolKind::Cli
    };
    run_command_loop(&mut session, io::stdin().lock(), &Output::stdout(), start)?;
    Ok(())
}
