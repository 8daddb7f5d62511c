use super::board::Board;
use super::common::PlayerId;
use super::config::PAWNS_PER_PLAYER;
use super::hex::Hex;

/// True when `player`'s three pawns form a connected group: at least two of
/// the three pairs are adjacent (a line of three or a triangle).
///
/// Only meaningful right after that player's slide; the turn controller never
/// calls it after a relocation or for the opponent.
pub fn check_win(board: &Board, player: PlayerId) -> bool {
    let pawns = board.pawns(player);
    if pawns.len() != PAWNS_PER_PLAYER {
        return false;
    }
    adjacent_pairs(pawns[0], pawns[1], pawns[2]) >= 2
}

fn adjacent_pairs(a: Hex, b: Hex, c: Hex) -> usize {
    [(a, b), (a, c), (b, c)]
        .into_iter()
        .filter(|(x, y)| x.is_adjacent(*y))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Ring;

    fn board_with_pawns(pawns: [(i32, i32); 3]) -> Board {
        let mut rings: alloc::vec::Vec<Ring> = Hex::spiral(3)
            .filter(|h| !pawns.contains(&(h.q, h.r)))
            .map(Ring::empty)
            .collect();
        rings.extend(
            pawns
                .iter()
                .map(|&(q, r)| Ring::new(Hex::new(q, r), Some(PlayerId::One))),
        );
        Board::from_rings(rings).unwrap()
    }

    #[test]
    fn triangle_wins() {
        let board = board_with_pawns([(0, 0), (1, 0), (0, 1)]);
        assert!(check_win(&board, PlayerId::One));
        assert!(!check_win(&board, PlayerId::Two));
    }

    #[test]
    fn line_of_three_wins() {
        let board = board_with_pawns([(-1, 0), (0, 0), (1, 0)]);
        assert!(check_win(&board, PlayerId::One));
    }

    #[test]
    fn bent_chain_wins() {
        let board = board_with_pawns([(0, 0), (1, 0), (2, -1)]);
        assert!(check_win(&board, PlayerId::One));
    }

    #[test]
    fn scattered_pawns_do_not_win() {
        let board = board_with_pawns([(0, 0), (2, 0), (0, 2)]);
        assert!(!check_win(&board, PlayerId::One));
    }

    #[test]
    fn a_single_pair_is_not_enough() {
        let board = board_with_pawns([(0, 0), (1, 0), (-2, 2)]);
        assert!(!check_win(&board, PlayerId::One));
    }

    #[test]
    fn opening_position_is_not_a_win() {
        let board = Board::standard();
        assert!(!check_win(&board, PlayerId::One));
        assert!(!check_win(&board, PlayerId::Two));
    }
}
