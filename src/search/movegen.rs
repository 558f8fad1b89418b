//! Candidate move generation
//!
//! Only empty cells near existing stones are worth searching. Restricting the
//! branching to a Chebyshev neighbourhood is what keeps full-width minimax
//! tractable on a 15x15 board.

use crate::board::{Bitboard, Board, Pos, Stone};
use crate::eval::Evaluator;

/// Empty in-bounds cells within `radius` (Chebyshev) of any stone, each once.
///
/// Stones are visited in row-major order and their neighbourhoods scanned in the
/// same order, so the result is deterministic. An empty board yields only the center.
pub fn nearby_cells(board: &Board, radius: u8) -> Vec<Pos> {
    if board.is_board_empty() {
        return vec![board.center()];
    }

    let size = board.size();
    let radius = i32::from(radius);
    let mut seen = Bitboard::new();
    let mut cells = Vec::with_capacity(64);

    for stone in board.occupied().iter_ones() {
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let Some(pos) = stone.offset(dr, dc, 1, size) else {
                    continue;
                };
                if seen.get(pos) {
                    continue;
                }
                seen.set(pos);

                if board.is_empty(pos) {
                    cells.push(pos);
                }
            }
        }
    }

    cells
}

/// Candidates for `mover`, most desirable first.
///
/// Scores come from [`Evaluator::move_desirability`]; the sort is stable, so cells
/// with equal scores keep their scan order. The board is restored before returning.
pub fn candidate_moves(
    board: &mut Board,
    mover: Stone,
    radius: u8,
    evaluator: &Evaluator,
) -> Vec<Pos> {
    let cells = nearby_cells(board, radius);
    if cells.len() <= 1 {
        return cells;
    }

    let mut scored: Vec<(Pos, f64)> = cells
        .into_iter()
        .map(|pos| (pos, evaluator.move_desirability(board, pos, mover)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.into_iter().map(|(pos, _)| pos).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EvalConfig;

    fn evaluator(size: usize) -> Evaluator {
        Evaluator::new(&EvalConfig::default(), size)
    }

    #[test]
    fn test_empty_board_center() {
        let mut board = Board::new();
        let moves = candidate_moves(&mut board, Stone::Black, 2, &evaluator(15));
        assert_eq!(moves, vec![Pos::new(7, 7)]);

        let mut small = Board::with_size(5);
        let moves = candidate_moves(&mut small, Stone::Black, 2, &evaluator(5));
        assert_eq!(moves, vec![Pos::new(2, 2)]);
    }

    #[test]
    fn test_single_stone_radius_two() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        let moves = candidate_moves(&mut board, Stone::White, 2, &evaluator(15));

        assert_eq!(moves.len(), 24);
        let mut sorted = moves.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 24);
        for pos in &moves {
            let dr = (i32::from(pos.row) - 7).abs();
            let dc = (i32::from(pos.col) - 7).abs();
            assert!(dr.max(dc) <= 2 && *pos != Pos::new(7, 7));
        }
    }

    #[test]
    fn test_neighbour_variant() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        assert_eq!(nearby_cells(&board, 1).len(), 8);
    }

    #[test]
    fn test_overlapping_neighbourhoods_deduplicated() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);
        let cells = nearby_cells(&board, 1);
        // 3x4 block minus the two stones
        assert_eq!(cells.len(), 10);
        let mut sorted = cells.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), cells.len());
    }

    #[test]
    fn test_clipped_at_corner() {
        let mut board = Board::new();
        board.place_stone(Pos::new(0, 0), Stone::White);
        // 3x3 corner block minus the stone
        assert_eq!(nearby_cells(&board, 2).len(), 8);
    }

    #[test]
    fn test_ordering_puts_completion_first() {
        let mut board = Board::new();
        for c in 3..7 {
            board.place_stone(Pos::new(5, c), Stone::White);
        }
        board.place_stone(Pos::new(5, 2), Stone::Black);
        let snapshot = board.clone();

        let moves = candidate_moves(&mut board, Stone::White, 2, &evaluator(15));
        assert_eq!(moves[0], Pos::new(5, 7));
        assert_eq!(board, snapshot);
    }
}
