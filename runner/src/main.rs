// ═══════════════════════════════════════════════════════════════════════
// Runner — CLI entry point: hot-seat console play, headless games,
// tournaments, and the leaderboard. Pure presentation: all game logic
// lives behind the engine's query/command surfaces.
// ═══════════════════════════════════════════════════════════════════════

mod console;

use clap::{Parser, Subcommand};
use madness_agents::{Agent, ComputerAgent, RandomAgent};
use madness_engine::cards::CharacterName;
use madness_tournament::{database::Database, run_batch, run_game};
use std::collections::HashMap;

#[derive(Parser)]
#[command(name = "madness-runner", about = "Murder Madness — deduction board game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a hot-seat game in the terminal
    Console {
        /// Number of players (3 or 4); prompted for when omitted
        #[arg(short, long)]
        players: Option<usize>,
        /// Seed for the deal and dice; random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Run a single headless game between agents
    Play {
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(short, long, default_value_t = 4)]
        players: usize,
        /// Agent type: "random" or "computer"
        #[arg(short, long, default_value = "random")]
        agent: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a tournament of N games and store results
    Tournament {
        #[arg(short, long, default_value_t = 100)]
        games: u32,
        #[arg(short, long, default_value_t = 4)]
        players: usize,
        #[arg(short, long, default_value = "results.db")]
        db: String,
        #[arg(short, long, default_value = "random")]
        agent: String,
    },
    /// Show the ELO leaderboard from a results database
    Leaderboard {
        #[arg(short, long, default_value = "results.db")]
        db: String,
    },
}

const MAX_DECISIONS: usize = 500_000;

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Console { players, seed } => {
            console::play(players, seed.unwrap_or_else(rand::random))
        }
        Commands::Play {
            seed,
            players,
            agent,
            json,
        } => cmd_play(seed.unwrap_or_else(rand::random), players, &agent, json),
        Commands::Tournament {
            games,
            players,
            db,
            agent,
        } => cmd_tournament(games, players, &db, &agent),
        Commands::Leaderboard { db } => cmd_leaderboard(&db),
    }
}

fn cmd_play(seed: u64, players: usize, agent_type: &str, json: bool) {
    let mut agents = make_agents(seed, players, agent_type);
    match run_game(&mut agents, seed, MAX_DECISIONS) {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result).unwrap());
                return;
            }
            println!("Game finished! seed={seed}");
            match result.winner {
                Some(winner) => println!("  Winner: {winner}"),
                None => println!("  All players eliminated; no winner."),
            }
            println!("  Turns: {}", result.turns);
            for p in &result.players {
                println!(
                    "    seat {}: {:8} ({:7}) cards: {}, eliminated: {}",
                    p.seat + 1,
                    p.character.to_string(),
                    p.agent_name,
                    p.hand_size,
                    p.eliminated,
                );
            }
        }
        Err(e) => eprintln!("Game error: {e}"),
    }
}

fn cmd_tournament(games: u32, players: usize, db_path: &str, agent_type: &str) {
    println!("=== Tournament: {games} games, {players} players, agent={agent_type} ===\n");

    let db = Database::new(db_path);
    let agent_ids: Vec<i64> = CharacterName::ALL
        .iter()
        .take(players)
        .map(|c| db.register_agent(&format!("{agent_type}-{c}")))
        .collect();

    let agent_type_owned = agent_type.to_string();
    let results = run_batch(
        move |seed| make_agents(seed, players, &agent_type_owned),
        42,
        games,
        MAX_DECISIONS,
    );

    let mut wins: HashMap<CharacterName, u32> = HashMap::new();
    let mut errors = 0u32;
    for result in &results {
        match result {
            Ok(result) => {
                db.store_game(result, &agent_ids);
                if let Some(winner) = result.winner {
                    *wins.entry(winner).or_insert(0) += 1;
                    let winner_seat = result.players.iter().find(|p| p.won).unwrap().seat;
                    let losers: Vec<i64> = agent_ids
                        .iter()
                        .enumerate()
                        .filter(|&(seat, _)| seat != winner_seat)
                        .map(|(_, &id)| id)
                        .collect();
                    db.update_elo(agent_ids[winner_seat], &losers, 16.0);
                }
            }
            Err(e) => {
                errors += 1;
                eprintln!("ERROR -- {e}");
            }
        }
    }

    println!("--- Summary ({games} games, {errors} errors) ---");
    for &character in CharacterName::ALL.iter().take(players) {
        let w = wins.get(&character).copied().unwrap_or(0);
        let pct = if games > 0 {
            w as f64 / games as f64 * 100.0
        } else {
            0.0
        };
        println!("  {:8}: {:>4} wins ({pct:.1}%)", character.to_string(), w);
    }
    println!("\nResults saved to: {db_path}");
    println!("Total games in DB: {}", db.game_count());
}

fn cmd_leaderboard(db_path: &str) {
    let db = Database::new(db_path);
    let board = db.leaderboard();
    if board.is_empty() {
        println!("No agents found. Run some tournaments first.");
        return;
    }
    println!("=== Leaderboard ===\n");
    println!("{:<20} {:>8} {:>8} {:>8}", "Agent", "ELO", "Games", "Wins");
    println!("{}", "-".repeat(48));
    for (name, elo, games, wins) in &board {
        println!("{name:<20} {elo:>8.1} {games:>8} {wins:>8}");
    }
}

fn make_agents(seed: u64, players: usize, agent_type: &str) -> Vec<Box<dyn Agent>> {
    CharacterName::ALL
        .iter()
        .take(players)
        .enumerate()
        .map(|(i, &character)| -> Box<dyn Agent> {
            match agent_type {
                "computer" => Box::new(ComputerAgent::new(character, seed + i as u64)),
                _ => Box::new(RandomAgent::new(character, seed + i as u64)),
            }
        })
        .collect()
}
