use crate::board::{Move, SearchIterationInfo};

pub fn format_info(info: &SearchIterationInfo) -> String {
    let score = match info.mate_in() {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {}", info.score),
    };
    let mut line = format!(
        "info depth {} score {} nodes {} nps {} hashfull {} time {}",
        info.depth, score, info.nodes, info.nps, info.hashfull, info.time_ms
    );
    if !info.pv.is_empty() {
        line.push_str(" pv ");
        line.push_str(&info.pv_string());
    }
    line
}

pub fn format_bestmove(best_move: Option<Move>) -> String {
    match best_move {
        Some(mv) => format!("bestmove {mv}"),
        None => "bestmove 0000".to_string(),
    }
}

pub fn format_perft(depth: u32, nodes: Option<u64>, elapsed_ms: u128) -> String {
    match nodes {
        Some(nodes) => format!("info string perft depth {depth} nodes {nodes} time {elapsed_ms}"),
        None => format!("info string perft depth {depth} stopped"),
    }
}
