pub mod config;
pub mod state;

pub mod cli;
pub mod events;
pub mod inputs;
pub mod keys;
pub mod library_helpers;
pub use state::*;
