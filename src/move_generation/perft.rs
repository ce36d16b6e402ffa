//! Move-path enumeration used to verify generator correctness.

use std::thread;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::commit_move;
use crate::move_generation::legal_move_checks::is_king_in_check;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Counts leaf move paths of exactly `depth` plies, with move-kind tallies
/// for the final ply. Depth 0 counts the root as one node.
pub fn perft(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }
    perft_recurse(game_state, depth, &mut counts)?;
    Ok(counts)
}

/// Node counts below each root move, in generation order.
pub fn perft_divide(game_state: &GameState, depth: u8) -> ChessResult<Vec<(Move, usize)>> {
    let mut divided = Vec::new();
    if depth == 0 {
        return Ok(divided);
    }
    for mv in game_state.all_legal_moves()? {
        let next = commit_move(game_state, mv)?;
        divided.push((mv, perft(&next, depth - 1)?.nodes));
    }
    Ok(divided)
}

/// [`perft`] with one worker thread per root move.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth <= 1 {
        return perft(game_state, depth);
    }

    let mut handles = Vec::new();
    for mv in game_state.all_legal_moves()? {
        let root = game_state.clone();
        handles.push(thread::spawn(move || -> ChessResult<PerftCounts> {
            let mut local = PerftCounts::default();
            let next = commit_move(&root, mv)?;
            tally(&root, &next, mv, depth, 1, &mut local)?;
            Ok(local)
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle.join().map_err(|_| {
            ChessError::InvariantViolation("perft worker thread panicked".to_owned())
        })??;
        total.merge(local);
    }
    Ok(total)
}

fn perft_recurse(game_state: &GameState, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    for mv in game_state.all_legal_moves()? {
        let next = commit_move(game_state, mv)?;
        tally(game_state, &next, mv, depth, 1, counts)?;
    }
    Ok(())
}

fn tally(
    prev: &GameState,
    next: &GameState,
    mv: Move,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> ChessResult<()> {
    if current_depth < search_depth {
        for child in next.all_legal_moves()? {
            let after = commit_move(next, child)?;
            tally(next, &after, child, search_depth, current_depth + 1, counts)?;
        }
        return Ok(());
    }

    counts.nodes += 1;
    if prev.board.is_occupied(mv.to, None) || mv.flag == MoveFlag::EnPassantCapture {
        counts.captures += 1;
    }
    if mv.flag == MoveFlag::EnPassantCapture {
        counts.en_passant += 1;
    }
    if mv.is_castle() {
        counts.castles += 1;
    }
    if mv.promotion.is_some() {
        counts.promotions += 1;
    }
    if is_king_in_check(&next.board, next.side_to_move)? {
        counts.checks += 1;
    }
    if matches!(next.outcome, Outcome::Checkmate { .. }) {
        counts.checkmates += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 0";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    #[test]
    fn perft_from_start() {
        let game = GameState::new_game();
        assert_eq!(perft(&game, 0).expect("perft").nodes, 1);
        assert_eq!(perft(&game, 1).expect("perft").nodes, 20);
        assert_eq!(perft(&game, 2).expect("perft").nodes, 400);

        let depth_3 = perft(&game, 3).expect("perft");
        assert_eq!(depth_3.nodes, 8_902);
        assert_eq!(depth_3.captures, 34);
        assert_eq!(depth_3.checks, 12);
        assert_eq!(depth_3.checkmates, 0);
    }

    #[test]
    fn perft_kiwipete() {
        let game = GameState::from_fen(KIWIPETE).expect("fen");
        let depth_1 = perft(&game, 1).expect("perft");
        assert_eq!(depth_1.nodes, 48);
        assert_eq!(depth_1.captures, 8);
        assert_eq!(depth_1.castles, 2);

        let depth_2 = perft(&game, 2).expect("perft");
        assert_eq!(depth_2.nodes, 2_039);
        assert_eq!(depth_2.captures, 351);
        assert_eq!(depth_2.en_passant, 1);
        assert_eq!(depth_2.castles, 91);
        assert_eq!(depth_2.checks, 3);
    }

    #[test]
    fn perft_position_3() {
        let game = GameState::from_fen(POSITION_3).expect("fen");
        assert_eq!(perft(&game, 1).expect("perft").nodes, 14);
        assert_eq!(perft(&game, 2).expect("perft").nodes, 191);
        assert_eq!(perft(&game, 3).expect("perft").nodes, 2_812);
    }

    #[test]
    fn multi_threaded_matches_single_threaded() {
        let game = GameState::from_fen(POSITION_3).expect("fen");
        assert_eq!(
            perft_multi_threaded(&game, 3).expect("perft"),
            perft(&game, 3).expect("perft")
        );
    }

    #[test]
    fn divide_sums_to_total() {
        let game = GameState::new_game();
        let divided = perft_divide(&game, 2).expect("divide");
        assert_eq!(divided.len(), 20);
        assert_eq!(divided.iter().map(|(_, nodes)| nodes).sum::<usize>(), 400);
    }
}
