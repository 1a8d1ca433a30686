// Library root for the game projection pipeline.
//
// Data flows one way: injury report -> roster -> availability trim ->
// score projection -> simulated result.

pub mod availability;
pub mod error;
pub mod injury;
pub mod projection;
pub mod roster;
pub mod season;
pub mod simulator;
pub mod sources;
pub mod stats;
pub mod teams;

pub use error::SimulationError;
pub use simulator::{simulate_game, GameResult, GameSimulator, ProjectedGame};
