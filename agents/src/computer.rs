// ═══════════════════════════════════════════════════════════════════════
// Computer Agent — the trivial built-in opponent.
// On its own turn it immediately ends; when forced to refute it reveals
// a uniformly random matching card.
// ═══════════════════════════════════════════════════════════════════════

use crate::agent::Agent;
use madness_engine::cards::{Card, CharacterName};
use madness_engine::engine::Command;
use madness_engine::visibility::PlayerView;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct ComputerAgent {
    character: CharacterName,
    rng: ChaCha8Rng,
}

impl ComputerAgent {
    pub fn new(character: CharacterName, seed: u64) -> Self {
        ComputerAgent {
            character,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for ComputerAgent {
    fn name(&self) -> &str {
        "Computer"
    }

    fn character(&self) -> CharacterName {
        self.character
    }

    fn take_turn(&mut self, _view: &PlayerView) -> Command {
        Command::EndTurn
    }

    fn choose_refute(&mut self, _view: &PlayerView, options: &[Card]) -> Card {
        *options.choose(&mut self.rng).expect("refute options empty")
    }
}
