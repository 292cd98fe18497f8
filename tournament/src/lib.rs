pub mod database;
pub mod runner;

pub use runner::{run_batch, run_game, GameResult, PlayerSummary};
