// ═══════════════════════════════════════════════════════════════════════
// Game Runner — runs complete headless games with agents
// ═══════════════════════════════════════════════════════════════════════

use madness_agents::Agent;
use madness_engine::cards::CharacterName;
use madness_engine::engine::{apply_command, Command};
use madness_engine::setup::{new_game, PlayerConfig};
use madness_engine::types::{GameState, Outcome};
use madness_engine::visibility::player_view;
use rayon::prelude::*;
use serde::Serialize;

/// Result of a completed game.
#[derive(Debug, Clone, Serialize)]
pub struct GameResult {
    pub seed: u64,
    /// The winning character, or None if everyone was eliminated.
    pub winner: Option<CharacterName>,
    pub turns: u32,
    pub decisions: usize,
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub seat: usize,
    pub agent_name: String,
    pub character: CharacterName,
    pub hand_size: usize,
    pub eliminated: bool,
    pub won: bool,
}

/// How many rejected commands an agent gets per decision point before
/// the harness falls back to a command that cannot be rejected.
const RETRY_LIMIT: usize = 16;

/// Run a complete game with the given agents, one per seat.
/// `max_decisions` bounds non-terminating agent sets.
pub fn run_game(
    agents: &mut [Box<dyn Agent>],
    seed: u64,
    max_decisions: usize,
) -> Result<GameResult, String> {
    let configs: Vec<PlayerConfig> = agents
        .iter()
        .map(|a| PlayerConfig {
            nickname: a.name().to_string(),
            character: a.character(),
        })
        .collect();
    let mut state = new_game(&configs, seed).map_err(|e| e.to_string())?;
    let mut decisions = 0usize;

    while state.outcome.is_none() {
        // The acting seat is the pending refuter if a guess is waiting,
        // otherwise the current player.
        let seat = state.acting_seat();
        let actor = state.players[seat].character;
        let view = player_view(&state, seat);

        let mut applied = false;
        for _ in 0..RETRY_LIMIT {
            decisions += 1;
            if decisions > max_decisions {
                return Err(format!(
                    "game exceeded {} decisions without finishing (turn {})",
                    max_decisions, state.turn_count
                ));
            }
            let command = agents[seat].decide(&view);
            if apply_command(&mut state, actor, command).is_ok() {
                applied = true;
                break;
            }
        }
        if !applied {
            // EndTurn is always accepted outside a pending refute, and
            // the first refute option is always valid within one.
            let fallback = match &view.refute_options {
                Some(options) => Command::RefuteWith(options[0]),
                None => Command::EndTurn,
            };
            apply_command(&mut state, actor, fallback)
                .map_err(|e| format!("fallback command rejected: {e}"))?;
        }
    }

    Ok(build_result(&state, seed, decisions, agents))
}

fn build_result(
    state: &GameState,
    seed: u64,
    decisions: usize,
    agents: &[Box<dyn Agent>],
) -> GameResult {
    let winner_seat = match state.outcome {
        Some(Outcome::Won { seat }) => Some(seat),
        _ => None,
    };
    let players = state
        .players
        .iter()
        .enumerate()
        .map(|(seat, p)| PlayerSummary {
            seat,
            agent_name: agents[seat].name().to_string(),
            character: p.character,
            hand_size: p.hand.len(),
            eliminated: p.solve_attempted,
            won: winner_seat == Some(seat),
        })
        .collect();
    GameResult {
        seed,
        winner: winner_seat.map(|s| state.players[s].character),
        turns: state.turn_count,
        decisions,
        players,
    }
}

/// Run `games` independent games in parallel, one seed per game.
pub fn run_batch<F>(
    make_agents: F,
    base_seed: u64,
    games: u32,
    max_decisions: usize,
) -> Vec<Result<GameResult, String>>
where
    F: Fn(u64) -> Vec<Box<dyn Agent>> + Sync,
{
    (0..games)
        .into_par_iter()
        .map(|g| {
            let seed = base_seed.wrapping_add(g as u64 * 1000);
            let mut agents = make_agents(seed);
            run_game(&mut agents, seed, max_decisions)
        })
        .collect()
}
