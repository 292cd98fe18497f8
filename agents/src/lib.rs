pub mod agent;
pub mod computer;
pub mod random;

pub use agent::Agent;
pub use computer::ComputerAgent;
pub use random::RandomAgent;
