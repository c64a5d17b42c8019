pub mod config;

pub use config::ConfigCommands;
