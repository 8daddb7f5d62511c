use nonaga::rules::{
    check_ring_target, is_valid_pawn_move, is_valid_ring_target, is_valid_ring_to_remove,
};
use nonaga::{check_win, Board, GameState, Hex, MoveError, PlayerId, Ring, Stage};

fn h(q: i32, r: i32) -> Hex {
    Hex::new(q, r)
}

#[test]
fn slide_stops_at_the_board_edge() {
    let board = Board::from_rings([
        Ring::new(h(0, 0), Some(PlayerId::One)),
        Ring::empty(h(1, 0)),
        Ring::empty(h(2, 0)),
    ])
    .unwrap();
    assert!(!is_valid_pawn_move(&board, h(0, 0), h(1, 0)));
    assert!(is_valid_pawn_move(&board, h(0, 0), h(2, 0)));
}

#[test]
fn pawn_validation_is_repeatable() {
    let board = Board::standard();
    for _ in 0..3 {
        assert!(is_valid_pawn_move(&board, h(0, -2), h(0, 1)));
        assert!(!is_valid_pawn_move(&board, h(0, -2), h(0, 0)));
    }
}

#[test]
fn triangle_and_scatter() {
    let make = |pawns: [(i32, i32); 3]| {
        let mut rings: Vec<Ring> = Hex::spiral(2)
            .filter(|c| !pawns.contains(&(c.q, c.r)))
            .map(Ring::empty)
            .collect();
        rings.extend(pawns.iter().map(|&(q, r)| Ring::new(h(q, r), Some(PlayerId::One))));
        Board::from_rings(rings).unwrap()
    };
    assert!(check_win(&make([(0, 0), (1, 0), (0, 1)]), PlayerId::One));
    assert!(!check_win(&make([(0, 0), (2, 0), (0, 2)]), PlayerId::One));
}

#[test]
fn bridge_ring_cannot_be_removed() {
    // Two triangles joined through (0,0).
    let board = Board::from_coords([h(-2, 0), h(-1, 0), h(-1, -1), h(0, 0), h(1, 0), h(1, 1), h(2, 0)])
        .unwrap();
    assert!(board.is_peripheral(h(0, 0)));
    assert!(!is_valid_ring_to_remove(&board, h(0, 0), None));
    assert!(is_valid_ring_to_remove(&board, h(2, 0), None));
}

#[test]
fn drop_needs_two_anchors() {
    let board = Board::from_coords([h(0, 0), h(1, 0), h(2, 0), h(-1, 0)]).unwrap();
    // (3,0) touches only (2,0); (0,1) touches (0,0) and (1,0).
    assert_eq!(
        check_ring_target(&board, h(-1, 0), h(3, 0)),
        Err(MoveError::InsufficientAnchors { touching: 1 })
    );
    assert!(is_valid_ring_target(&board, h(-1, 0), h(0, 1)));
    assert_eq!(
        check_ring_target(&board, h(-1, 0), h(1, 0)),
        Err(MoveError::TargetOccupied(h(1, 0)))
    );
}

#[test]
fn anchors_exclude_the_carried_ring() {
    let board = Board::from_coords([h(0, 0), h(1, 0), h(2, -1), h(3, -1)]).unwrap();
    // (1,-1) touches (0,0), (1,0) and (2,-1); lifting (0,0) leaves two.
    assert!(is_valid_ring_target(&board, h(0, 0), h(1, -1)));
    // (0,-1) touches only the lifted ring.
    assert!(!is_valid_ring_target(&board, h(0, 0), h(0, -1)));
}

#[test]
fn relocated_ring_is_locked_for_one_turn() {
    let mut state = GameState::new();
    state.move_pawn(h(0, -2), h(0, 1)).unwrap();
    state.relocate_ring(h(1, 1), h(3, -1)).unwrap();
    assert!(!is_valid_ring_to_remove(&state.board, h(3, -1), state.last_relocated));

    state.move_pawn(h(2, -2), h(0, -2)).unwrap();
    let (from, to) = state.legal_relocations()[0];
    assert_ne!(from, h(3, -1));
    state.relocate_ring(from, to).unwrap();
    assert!(is_valid_ring_to_remove(&state.board, h(3, -1), state.last_relocated));
}

#[test]
fn winning_slide_skips_relocation() {
    let mut state = GameState::new();
    state.board.move_pawn(h(2, 0), h(1, 0)).unwrap();
    state.board.move_pawn(h(-2, 2), h(-1, 1)).unwrap();
    state.move_pawn(h(0, -2), h(0, 1)).unwrap();
    assert_eq!(state.winner, Some(PlayerId::One));
    assert_eq!(state.stage(), Stage::GameOver);
    assert_eq!(state.current_player, PlayerId::One);
    assert_eq!(
        state.relocate_ring(h(1, 1), h(3, -1)),
        Err(MoveError::GameOver)
    );
}
