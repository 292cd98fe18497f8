// ═══════════════════════════════════════════════════════════════════════
// Random Agent — a seeded random walk over the command surface.
// Serves as a soak-tester for engine stability, not a strategy.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Agent;
use madness_engine::cards::{Card, CharacterName, EstateName, WeaponName};
use madness_engine::engine::Command;
use madness_engine::types::{Direction, Side, TurnState};
use madness_engine::visibility::PlayerView;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct RandomAgent {
    character: CharacterName,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(character: CharacterName, seed: u64) -> Self {
        RandomAgent {
            character,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn eliminated(&self, view: &PlayerView) -> bool {
        view.seats[view.seat].eliminated
    }

    fn random_triple(&mut self) -> (CharacterName, EstateName, WeaponName) {
        (
            *CharacterName::ALL.choose(&mut self.rng).unwrap(),
            *EstateName::ALL.choose(&mut self.rng).unwrap(),
            *WeaponName::ALL.choose(&mut self.rng).unwrap(),
        )
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "Random"
    }

    fn character(&self) -> CharacterName {
        self.character
    }

    fn take_turn(&mut self, view: &PlayerView) -> Command {
        match view.turn {
            TurnState::AwaitingRoll => {
                // Occasionally gamble on a solve instead of moving.
                if !self.eliminated(view) && self.rng.gen_bool(0.02) {
                    let (character, estate, weapon) = self.random_triple();
                    return Command::Solve {
                        character,
                        estate,
                        weapon,
                    };
                }
                Command::Roll
            }
            TurnState::Moving { moves_left } => {
                if moves_left == 0 || self.rng.gen_bool(0.05) {
                    return Command::EndTurn;
                }
                Command::Move(*Direction::ALL.choose(&mut self.rng).unwrap())
            }
            TurnState::InEstate => {
                if !self.eliminated(view) && self.rng.gen_bool(0.4) {
                    return Command::Guess {
                        character: *CharacterName::ALL.choose(&mut self.rng).unwrap(),
                        weapon: *WeaponName::ALL.choose(&mut self.rng).unwrap(),
                    };
                }
                if self.rng.gen_bool(0.8) {
                    // A blocked or missing exit just gets rejected; the
                    // harness will ask again.
                    return Command::LeaveEstate(*Side::ALL.choose(&mut self.rng).unwrap());
                }
                Command::EndTurn
            }
            // The harness routes pending refutes through choose_refute.
            TurnState::AwaitingRefute { .. } => Command::EndTurn,
        }
    }

    fn choose_refute(&mut self, _view: &PlayerView, options: &[Card]) -> Card {
        *options.choose(&mut self.rng).expect("refute options empty")
    }
}
