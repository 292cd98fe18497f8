// ═══════════════════════════════════════════════════════════════════════
// Visibility / Information Model
//
// At the table, information splits three ways:
//   PUBLIC  — board occupancy and topology, estate contents (the tokens
//             are on the table), seating order, current actor, the turn
//             state including any announced guess, hand SIZES,
//             elimination flags, the outcome, and the solution once the
//             game is over
//   PRIVATE — a player's own hand; the refuter's matching options; a
//             revealed card travels only through the reveal event
//   HIDDEN  — the solution while the game is live, everyone else's hands
//
// This module produces the view of the game a single player is allowed
// to see. Agents MUST only receive PlayerView, never the raw GameState.
// ═══════════════════════════════════════════════════════════════════════

use crate::cards::{Card, CharacterName, EstateName, Guess, WeaponName};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The slice of game state one player is allowed to see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    // ── Public info ────────────────────────────────────────
    pub viewer: CharacterName,
    pub seat: usize,
    pub current_seat: usize,
    /// Turn state, including an announced guess and pending refuter.
    pub turn: TurnState,
    pub turn_count: u32,
    /// Where every character token is.
    pub positions: HashMap<CharacterName, CharacterPlace>,
    /// What every estate visibly contains.
    pub estate_contents: HashMap<EstateName, Vec<Card>>,
    /// Which estate each weapon token sits in.
    pub weapons: HashMap<WeaponName, EstateName>,
    /// Per seat: nickname, controlled character, hand size, eliminated.
    pub seats: Vec<SeatInfo>,
    pub outcome: Option<Outcome>,
    /// Revealed only after the game ends.
    pub solution: Option<Guess>,

    // ── Private info (only for the viewer) ─────────────────
    pub my_hand: Vec<Card>,
    /// When the viewer is the pending refuter: the guessed cards they
    /// hold and must choose among.
    pub refute_options: Option<Vec<Card>>,
}

/// Public facts about one seat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatInfo {
    pub number: u8,
    pub nickname: String,
    pub character: CharacterName,
    pub hand_size: u8,
    pub eliminated: bool,
}

/// Build the view for the player at `seat`.
pub fn player_view(state: &GameState, seat: usize) -> PlayerView {
    let player = state.player(seat);

    let seats = state
        .players
        .iter()
        .map(|p| SeatInfo {
            number: p.number,
            nickname: p.nickname.clone(),
            character: p.character,
            hand_size: p.hand.len() as u8,
            eliminated: p.solve_attempted,
        })
        .collect();

    let estate_contents = state
        .estates
        .iter()
        .map(|(&name, e)| (name, e.contents.clone()))
        .collect();

    // The refuter's matching options are theirs alone.
    let refute_options = match state.turn {
        TurnState::AwaitingRefute { guess, refuter } if refuter == seat => Some(
            guess
                .cards()
                .iter()
                .copied()
                .filter(|&c| player.holds(c))
                .collect(),
        ),
        _ => None,
    };

    PlayerView {
        viewer: player.character,
        seat,
        current_seat: state.current_seat,
        turn: state.turn,
        turn_count: state.turn_count,
        positions: state.positions.clone(),
        estate_contents,
        weapons: state.weapons.clone(),
        seats,
        outcome: state.outcome,
        solution: state.outcome.map(|_| state.solution),
        my_hand: player.hand.clone(),
        refute_options,
    }
}
