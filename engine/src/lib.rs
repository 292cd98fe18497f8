pub mod board;
pub mod cards;
pub mod engine;
pub mod setup;
pub mod text;
pub mod types;
pub mod visibility;

#[cfg(test)]
mod tests;

pub use cards::*;
pub use types::*;
