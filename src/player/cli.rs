#![cfg(feature = "std")]

use std::io::{self, BufRead, Write};
use std::string::String;

use rand::rngs::SmallRng;

use crate::core::{rules, GameState, Hex, Outcome};
use crate::ui;

use super::ai::AiPlayer;
use super::Player;

enum Input {
    /// Process stdin; its buffer is shared, so two hot-seat players can read
    /// from it in turn.
    Stdin,
    Reader(Box<dyn BufRead + Send>),
}

/// Interactive player reading `q,r q,r` lines. An empty line accepts the
/// suggestion shown in brackets.
pub struct CliPlayer {
    input: Input,
    suggest: AiPlayer,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self {
            input: Input::Stdin,
            suggest: AiPlayer::new(),
        }
    }

    pub fn with_input(input: Box<dyn BufRead + Send>) -> Self {
        Self {
            input: Input::Reader(input),
            suggest: AiPlayer::new(),
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        let read = match &mut self.input {
            Input::Stdin => io::stdin().read_line(&mut line),
            Input::Reader(reader) => reader.read_line(&mut line),
        };
        match read {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Prompt until the player enters a pair accepted by `legal`.
    fn prompt<F>(&mut self, what: &str, suggestion: Option<(Hex, Hex)>, legal: F) -> Option<(Hex, Hex)>
    where
        F: Fn(Hex, Hex) -> Result<(), String>,
    {
        loop {
            match suggestion {
                Some((from, to)) => std::print!("{} [suggested: {} {}]: ", what, from, to),
                None => std::print!("{}: ", what),
            }
            let _ = io::stdout().flush();
            let line = self.read_line()?;

            if line.is_empty() {
                if suggestion.is_some() {
                    return suggestion;
                }
                continue;
            }
            if line.eq_ignore_ascii_case("help") {
                print_help();
                continue;
            }
            match parse_move(&line).and_then(|(from, to)| legal(from, to).map(|()| (from, to))) {
                Ok(choice) => return Some(choice),
                Err(e) => std::println!("✗ Error: {}", e),
            }
        }
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

fn print_help() {
    std::println!("\nEnter two cells as axial coordinates: `from to`, each `q,r`.");
    std::println!("  Pawn phase:   the pawn to slide, then where it stops (e.g. 0,-2 0,1)");
    std::println!("  Ring phase:   the ring to lift, then the empty cell to drop it on");
    std::println!("Press ENTER to accept the suggestion.\n");
}

/// Parse one cell, `q,r`.
pub fn parse_hex(input: &str) -> Result<Hex, String> {
    let (q, r) = input
        .split_once(',')
        .ok_or_else(|| format!("Expected q,r but got '{}'", input))?;
    let q: i32 = q
        .trim()
        .parse()
        .map_err(|_| format!("Invalid q '{}'", q.trim()))?;
    let r: i32 = r
        .trim()
        .parse()
        .map_err(|_| format!("Invalid r '{}'", r.trim()))?;
    Ok(Hex::new(q, r))
}

/// Parse `q,r q,r` into a (from, to) pair.
pub fn parse_move(input: &str) -> Result<(Hex, Hex), String> {
    let mut parts = input.split_whitespace();
    let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err("Enter exactly two cells, e.g. 0,-2 0,1".to_string());
    };
    Ok((parse_hex(from)?, parse_hex(to)?))
}

impl Player for CliPlayer {
    fn choose_pawn_move(&mut self, state: &GameState, rng: &mut SmallRng) -> Option<(Hex, Hex)> {
        ui::print_state(state, &[]);
        let suggestion = self.suggest.choose_pawn_move(state, rng);
        let me = state.current_player;
        self.prompt("Slide", suggestion, |from, to| {
            if state.board.pawn_at(from) != Some(me) {
                return Err(format!("No pawn of yours at {}", from));
            }
            rules::check_pawn_move(&state.board, from, to).map_err(|e| e.to_string())
        })
    }

    fn choose_relocation(&mut self, state: &GameState, rng: &mut SmallRng) -> Option<(Hex, Hex)> {
        ui::print_state(state, &state.highlights());
        let suggestion = self.suggest.choose_relocation(state, rng);
        self.prompt("Relocate", suggestion, |from, to| {
            rules::check_ring_to_remove(&state.board, from, state.last_relocated)
                .and_then(|()| rules::check_ring_target(&state.board, from, to))
                .map_err(|e| e.to_string())
        })
    }

    fn handle_outcome(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Won { player, .. } => std::println!("\n{} wins!", player),
            Outcome::Ignored(reason) => std::println!("✗ Rejected: {}", reason),
            _ => {}
        }
    }

    fn handle_opponent_state(&mut self, state: &GameState) {
        std::println!("\nOpponent moved.");
        if let Some(to) = state.last_relocated {
            std::println!("Last ring placed at {}", to);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn scripted(lines: &str) -> CliPlayer {
        CliPlayer::with_input(Box::new(io::Cursor::new(lines.as_bytes().to_vec())))
    }

    #[test]
    fn parses_cells_and_moves() {
        assert_eq!(parse_hex("0,-2"), Ok(Hex::new(0, -2)));
        assert_eq!(parse_hex(" 3 , -1 "), Ok(Hex::new(3, -1)));
        assert!(parse_hex("3").is_err());
        assert!(parse_hex("a,1").is_err());
        assert_eq!(
            parse_move("0,-2 0,1"),
            Ok((Hex::new(0, -2), Hex::new(0, 1)))
        );
        assert!(parse_move("0,-2").is_err());
        assert!(parse_move("0,-2 0,1 1,1").is_err());
    }

    #[test]
    fn illegal_entries_are_retried() {
        let mut player = scripted("0,-2 0,0\n2,-2 1,-2\n0,-2 0,1\n");
        let mut rng = SmallRng::seed_from_u64(3);
        let choice = player.choose_pawn_move(&GameState::new(), &mut rng);
        assert_eq!(choice, Some((Hex::new(0, -2), Hex::new(0, 1))));
    }

    #[test]
    fn relocation_to_an_extreme_cell_is_retried() {
        let mut state = GameState::new();
        state.move_pawn(Hex::new(0, -2), Hex::new(0, 1)).unwrap();
        let mut player = scripted("1,1 2147483647,0\n1,1 3,-1\n");
        let mut rng = SmallRng::seed_from_u64(3);
        let choice = player.choose_relocation(&state, &mut rng);
        assert_eq!(choice, Some((Hex::new(1, 1), Hex::new(3, -1))));
    }

    #[test]
    fn closed_input_yields_nothing() {
        let mut player = scripted("");
        let mut rng = SmallRng::seed_from_u64(3);
        assert_eq!(player.choose_pawn_move(&GameState::new(), &mut rng), None);
    }
}
