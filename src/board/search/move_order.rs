use crate::board::Move;

/// Move `hash_move` to the front of `moves`, keeping every capture ahead of
/// every quiet move behind it.
///
/// A capture is swapped with the first entry. A quiet move is rotated to the
/// front, shifting the block before it back by one so the captures stay
/// contiguous. Returns false if the move is not in the list.
pub(crate) fn promote_hash_move(moves: &mut [Move], hash_move: Move) -> bool {
    let Some(idx) = moves.iter().position(|&mv| mv == hash_move) else {
        return false;
    };
    if hash_move.is_capture() {
        moves.swap(0, idx);
    } else {
        moves[..=idx].rotate_right(1);
    }
    true
}
