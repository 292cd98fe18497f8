// ═══════════════════════════════════════════════════════════════════════
// Game setup — board, weapon seeding, solution draw, and the deal
// ═══════════════════════════════════════════════════════════════════════

use crate::board;
use crate::cards::{Card, CharacterName, EstateName, Guess, WeaponName};
use crate::engine::initial_turn_state;
use crate::types::{GameState, PlayerState, TurnState};
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

/// Who sits at each seat: a nickname and the character they control.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub nickname: String,
    pub character: CharacterName,
}

/// A game that cannot be constructed. Fatal at setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// Player count outside 3–4.
    PlayerCount(usize),
    /// Two seats claimed the same character.
    DuplicateCharacter(CharacterName),
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::PlayerCount(n) => {
                write!(f, "need 3 or 4 players, got {n}")
            }
            SetupError::DuplicateCharacter(c) => {
                write!(f, "character {c} assigned to more than one player")
            }
        }
    }
}

impl std::error::Error for SetupError {}

/// Build a fresh game: construct the board, seed one weapon into each
/// estate, draw the secret solution, shuffle and deal the remaining 11
/// cards, and pick the first player. All randomness derives from `seed`.
pub fn new_game(configs: &[PlayerConfig], seed: u64) -> Result<GameState, SetupError> {
    if !(3..=4).contains(&configs.len()) {
        return Err(SetupError::PlayerCount(configs.len()));
    }
    for (i, cfg) in configs.iter().enumerate() {
        if configs[..i].iter().any(|c| c.character == cfg.character) {
            return Err(SetupError::DuplicateCharacter(cfg.character));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let built = board::build_board();
    let mut estates = built.estates;

    // One weapon into each estate, pairing in shuffled estate order.
    let mut estate_order = EstateName::ALL.to_vec();
    estate_order.shuffle(&mut rng);
    let mut weapons = HashMap::new();
    for (&weapon, &estate) in WeaponName::ALL.iter().zip(estate_order.iter()) {
        estates
            .get_mut(&estate)
            .unwrap()
            .contents
            .push(Card::Weapon(weapon));
        weapons.insert(weapon, estate);
    }

    // The solution: one card of each kind, uniform from its pool.
    let solution = Guess {
        character: *CharacterName::ALL.choose(&mut rng).unwrap(),
        estate: *EstateName::ALL.choose(&mut rng).unwrap(),
        weapon: *WeaponName::ALL.choose(&mut rng).unwrap(),
    };

    let mut players: Vec<PlayerState> = configs
        .iter()
        .enumerate()
        .map(|(i, cfg)| PlayerState {
            number: i as u8 + 1,
            nickname: cfg.nickname.clone(),
            character: cfg.character,
            hand: Vec::new(),
            solve_attempted: false,
        })
        .collect();

    // Shuffle the 11 non-solution cards and deal them round-robin from
    // the back, starting at a random seat.
    let mut remaining: Vec<Card> = crate::cards::full_deck()
        .into_iter()
        .filter(|&c| !solution.contains(c))
        .collect();
    remaining.shuffle(&mut rng);
    let mut deal_seat = rng.gen_range(0..players.len());
    while let Some(card) = remaining.pop() {
        players[deal_seat].hand.push(card);
        deal_seat = (deal_seat + 1) % players.len();
    }

    // First player is an independent draw from the dealer start.
    let first_seat = rng.gen_range(0..players.len());

    let mut state = GameState {
        squares: built.squares,
        estates,
        positions: built.positions,
        weapons,
        players,
        solution,
        current_seat: first_seat,
        turn: TurnState::AwaitingRoll,
        outcome: None,
        turn_count: 0,
        seed,
        rng_counter: 0,
    };
    state.turn = initial_turn_state(&state, first_seat);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_players() -> Vec<PlayerConfig> {
        CharacterName::ALL
            .iter()
            .map(|&c| PlayerConfig {
                nickname: format!("{c}'s player"),
                character: c,
            })
            .collect()
    }

    #[test]
    fn rejects_bad_player_counts() {
        let cfgs = four_players();
        assert_eq!(
            new_game(&cfgs[..2], 1).unwrap_err(),
            SetupError::PlayerCount(2)
        );
        assert!(new_game(&cfgs[..3], 1).is_ok());
        assert!(new_game(&cfgs, 1).is_ok());
    }

    #[test]
    fn rejects_duplicate_characters() {
        let mut cfgs = four_players();
        cfgs[2].character = CharacterName::Lucilla;
        assert_eq!(
            new_game(&cfgs, 1).unwrap_err(),
            SetupError::DuplicateCharacter(CharacterName::Lucilla)
        );
    }

    #[test]
    fn each_estate_starts_with_one_weapon() {
        let state = new_game(&four_players(), 7).unwrap();
        for estate in EstateName::ALL {
            let weapons_inside = state
                .estate(estate)
                .contents
                .iter()
                .filter(|c| matches!(c, Card::Weapon(_)))
                .count();
            assert_eq!(weapons_inside, 1);
        }
        assert_eq!(state.weapons.len(), 5);
    }

    #[test]
    fn same_seed_same_game() {
        let a = new_game(&four_players(), 1234).unwrap();
        let b = new_game(&four_players(), 1234).unwrap();
        assert_eq!(a.solution, b.solution);
        assert_eq!(a.current_seat, b.current_seat);
        for (pa, pb) in a.players.iter().zip(&b.players) {
            assert_eq!(pa.hand, pb.hand);
        }
    }
}
