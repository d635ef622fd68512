pub mod cli;
pub mod config;

pub use cli::{AttrCommands, Cli, Commands, LpCommands, OutputFormat, TimeCommands};
pub use config::ShopConfig;
