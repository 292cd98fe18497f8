// ═══════════════════════════════════════════════════════════════════════
// Agent Trait — interface that all automated players implement
//
// KEY DESIGN PRINCIPLE:
//   Agents receive a `PlayerView` (not raw GameState), which only
//   contains information the player is legally allowed to see.
//   This enforces information hiding at the type level.
//
//   The agent never gets to see:
//     - Other players' hands
//     - The solution while the game is live
// ═══════════════════════════════════════════════════════════════════════

use madness_engine::cards::{Card, CharacterName};
use madness_engine::engine::Command;
use madness_engine::visibility::PlayerView;

/// An automated player. The harness calls `decide` whenever it is this
/// agent's turn to act — either their own turn, or a forced refutation.
pub trait Agent: Send + Sync {
    /// Human-readable name for this agent (e.g., "Computer", "Random").
    fn name(&self) -> &str;

    /// The character this agent's player controls.
    fn character(&self) -> CharacterName;

    /// Universal entry point: dispatches to the refute choice when a
    /// guess is waiting on this player, otherwise to the turn logic.
    fn decide(&mut self, view: &PlayerView) -> Command {
        match &view.refute_options {
            Some(options) => Command::RefuteWith(self.choose_refute(view, options)),
            None => self.take_turn(view),
        }
    }

    /// Pick the next command on this agent's own turn.
    fn take_turn(&mut self, view: &PlayerView) -> Command;

    /// Pick one of the matching cards to reveal to the guesser.
    /// `options` is never empty.
    fn choose_refute(&mut self, view: &PlayerView, options: &[Card]) -> Card;
}
