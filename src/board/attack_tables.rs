//! Precomputed per-square move and attack masks.
//!
//! Tables are built lazily on first use and are read-only afterwards. Sliding
//! pieces use one ray mask per compass direction; the nearest blocker on a ray
//! is found with a single `trailing_zeros`/`leading_zeros` query.

use once_cell::sync::Lazy;

use super::{Bitboard, Color, Square};

pub(crate) const DIR_N: usize = 0;
pub(crate) const DIR_NE: usize = 1;
pub(crate) const DIR_E: usize = 2;
pub(crate) const DIR_NW: usize = 3;
pub(crate) const DIR_S: usize = 4;
pub(crate) const DIR_SW: usize = 5;
pub(crate) const DIR_W: usize = 6;
pub(crate) const DIR_SE: usize = 7;

/// Orthogonal directions (rook moves)
pub(crate) const ROOK_DIRS: [usize; 4] = [DIR_N, DIR_E, DIR_S, DIR_W];
/// Diagonal directions (bishop moves)
pub(crate) const BISHOP_DIRS: [usize; 4] = [DIR_NE, DIR_NW, DIR_SW, DIR_SE];

/// Rank/file step per direction, indexed by the `DIR_*` constants.
/// The first four walk toward higher square indices, the last four toward lower ones.
const DIR_DELTAS: [(isize, isize); 8] = [
    (1, 0),   // N
    (1, 1),   // NE
    (0, 1),   // E
    (1, -1),  // NW
    (-1, 0),  // S
    (-1, -1), // SW
    (0, -1),  // W
    (-1, 1),  // SE
];

fn jump_table(deltas: &[(isize, isize)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << (nr * 8 + nf);
            }
        }
        *slot = mask;
    }
    attacks
}

pub(crate) static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    jump_table(&[
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ])
});

pub(crate) static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    jump_table(&[
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ])
});

/// Squares a pawn of each color attacks from a given square
pub(crate) static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> =
    Lazy::new(|| [jump_table(&[(1, -1), (1, 1)]), jump_table(&[(-1, -1), (-1, 1)])]);

/// Non-capturing pawn destinations: one step forward, plus two from the starting rank
pub(crate) static PAWN_PUSHES: Lazy<[[u64; 64]; 2]> = Lazy::new(|| {
    let mut pushes = [[0u64; 64]; 2];
    for sq in 8..56 {
        pushes[Color::White.index()][sq] = 1u64 << (sq + 8);
        pushes[Color::Black.index()][sq] = 1u64 << (sq - 8);
        if sq / 8 == 1 {
            pushes[Color::White.index()][sq] |= 1u64 << (sq + 16);
        }
        if sq / 8 == 6 {
            pushes[Color::Black.index()][sq] |= 1u64 << (sq - 16);
        }
    }
    pushes
});

/// Ray masks per direction, running from (not including) the square to the board edge
pub(crate) static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    for sq in 0..64 {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        for (d, (dr, df)) in DIR_DELTAS.iter().enumerate() {
            let mut mask = 0u64;
            let mut nr = r + dr;
            let mut nf = f + df;
            while (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << (nr * 8 + nf);
                nr += dr;
                nf += df;
            }
            rays[d][sq] = mask;
        }
    }
    rays
});

#[inline]
const fn is_positive(dir: usize) -> bool {
    dir < 4
}

/// The first occupied square along `dir` from `sq`, if any
#[inline]
pub(crate) fn nearest_blocker(dir: usize, sq: Square, occupied: Bitboard) -> Option<Square> {
    let blockers = Bitboard(RAYS[dir][sq.index()]) & occupied;
    if blockers.is_empty() {
        None
    } else if is_positive(dir) {
        Some(blockers.lsb())
    } else {
        Some(blockers.msb())
    }
}

/// Ray from `sq` in `dir`, truncated at (and including) the nearest blocker
#[inline]
pub(crate) fn ray_attacks(dir: usize, sq: Square, occupied: Bitboard) -> Bitboard {
    let ray = RAYS[dir][sq.index()];
    match nearest_blocker(dir, sq, occupied) {
        Some(blocker) => Bitboard(ray ^ RAYS[dir][blocker.index()]),
        None => Bitboard(ray),
    }
}

#[inline]
pub(crate) fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.index()])
}

#[inline]
pub(crate) fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.index()])
}

#[inline]
pub(crate) fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][sq.index()])
}

#[inline]
pub(crate) fn pawn_pushes(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_PUSHES[color.index()][sq.index()])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn knight_in_corner_has_two_moves() {
        assert_eq!(knight_attacks(Square::A1).popcount(), 2);
        assert_eq!(knight_attacks(sq("d4")).popcount(), 8);
    }

    #[test]
    fn king_on_edge() {
        assert_eq!(king_attacks(Square::A1).popcount(), 3);
        assert_eq!(king_attacks(sq("e1")).popcount(), 5);
    }

    #[test]
    fn pawn_masks_per_side() {
        assert_eq!(pawn_attacks(Color::White, sq("a2")), Bitboard::from_square(sq("b3")));
        assert_eq!(pawn_attacks(Color::Black, sq("e5")).popcount(), 2);
        assert_eq!(pawn_pushes(Color::White, sq("e2")).popcount(), 2);
        assert_eq!(pawn_pushes(Color::White, sq("e3")).popcount(), 1);
        assert!(pawn_pushes(Color::Black, sq("d7")).contains(sq("d5")));
    }

    #[test]
    fn rays_stop_at_edges() {
        assert_eq!(RAYS[DIR_N][sq("a1").index()], Bitboard::FILE_A.0 & !1);
        assert_eq!(RAYS[DIR_W][sq("a4").index()], 0);
        assert_eq!(Bitboard(RAYS[DIR_NE][sq("a1").index()]).popcount(), 7);
    }

    #[test]
    fn ray_truncates_at_nearest_blocker() {
        let occupied = Bitboard::from_square(sq("d6")) | Bitboard::from_square(sq("d7"));
        let north = ray_attacks(DIR_N, sq("d4"), occupied);
        assert_eq!(north, Bitboard::from_square(sq("d5")) | Bitboard::from_square(sq("d6")));

        let occupied = Bitboard::from_square(sq("b4")) | Bitboard::from_square(sq("a4"));
        assert_eq!(nearest_blocker(DIR_W, sq("e4"), occupied), Some(sq("b4")));
        assert_eq!(nearest_blocker(DIR_SW, sq("e4"), occupied), None);
    }
}
