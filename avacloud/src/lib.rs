pub mod cli;
pub mod conversion;
pub mod load_config;

pub use cli::{run, Cli, Commands};
