#![cfg(feature = "std")]

//! Plain-text board rendering for terminal play.

use std::fmt::Write;
use std::string::String;

use crate::core::{Board, GameState, Hex, PlayerId, Stage};

const EMPTY_RING: char = 'o';
const HIGHLIGHT_RING: char = '*';
const HIGHLIGHT_CELL: char = '+';

fn pawn_char(player: PlayerId) -> char {
    match player {
        PlayerId::One => '1',
        PlayerId::Two => '2',
    }
}

/// Draw the board row by row (one row per `r`), shifting each row by half a
/// cell so neighbours line up. Highlighted rings show as `*`, highlighted
/// empty cells (drop targets) as `+`.
pub fn render_board(board: &Board, highlights: &[Hex]) -> String {
    let cells: Vec<Hex> = board
        .positions()
        .into_iter()
        .chain(highlights.iter().copied())
        .collect();
    let (Some(min_r), Some(max_r)) = (
        cells.iter().map(|h| h.r).min(),
        cells.iter().map(|h| h.r).max(),
    ) else {
        return String::new();
    };
    let column = |h: &Hex| 2 * h.q + h.r;
    let min_x = cells.iter().map(column).min().unwrap_or(0);
    let max_x = cells.iter().map(column).max().unwrap_or(0);
    let width = (max_x - min_x + 1) as usize;

    let mut out = String::new();
    for r in min_r..=max_r {
        let mut line = vec![' '; width];
        for h in cells.iter().filter(|h| h.r == r) {
            let lit = highlights.contains(h);
            line[(column(h) - min_x) as usize] = match board.ring_at(*h) {
                Some(ring) => match ring.pawn {
                    Some(player) => pawn_char(player),
                    None if lit => HIGHLIGHT_RING,
                    None => EMPTY_RING,
                },
                None => HIGHLIGHT_CELL,
            };
        }
        let row: String = line.into_iter().collect();
        let _ = writeln!(out, "{:>3} | {}", r, row.trim_end());
    }
    out
}

/// One-line description of whose turn it is and what they must do.
pub fn describe(state: &GameState) -> String {
    let player = state.current_player;
    match state.stage() {
        Stage::MovePawn => format!("Player {} ({}): slide a pawn", player.number(), pawn_char(player)),
        Stage::RelocateRing => format!(
            "Player {} ({}): relocate a ring",
            player.number(),
            pawn_char(player)
        ),
        Stage::GameOver => match state.winner {
            Some(winner) => format!("Player {} wins", winner.number()),
            None => String::from("Game over"),
        },
    }
}

/// Print the board and turn line to stdout.
pub fn print_state(state: &GameState, highlights: &[Hex]) {
    std::println!("{}", render_board(&state.board, highlights));
    std::println!("{}", describe(state));
}
