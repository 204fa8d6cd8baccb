//! Podcastr CLI Library
//!
//! Terminal front end for the playback core: loads an episode catalog,
//! lists it, and plays it against a simulated audio element driven by
//! line commands.
//!
//! This library exposes the components for testing purposes.

pub mod config;
pub mod error;
pub mod input;
pub mod player;
pub mod render;
pub mod simulator;

pub use config::AppConfig;
pub use error::{CliError, Result};
pub use player::{run_player, PlayerOptions};
pub use simulator::{Deck, SimulatedHost, Tick};
