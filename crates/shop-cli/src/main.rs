use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use shop_cli::{AttrCommands, Cli, Commands, LpCommands, ShopConfig, TimeCommands};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::attr::GetArgs;

fn load_config(cli: &Cli) -> Result<ShopConfig> {
    match &cli.config {
        Some(path) => ShopConfig::load_from(path),
        None => ShopConfig::load(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG directives refine the --log-level baseline.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(cli.log_level.into()))
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    let decimals = config.output.decimal_places;

    match &cli.command {
        Commands::Time { command } => match command {
            TimeCommands::Decode { time_string, tz } => {
                commands::time::decode(time_string, tz.as_deref(), &config)
            }
            TimeCommands::Encode { timestamp } => commands::time::encode(timestamp),
        },
        Commands::Attr { command } => match command {
            AttrCommands::Get {
                snapshot,
                object_type,
                object_name,
                attr,
                kind,
                format,
            } => {
                let args = GetArgs {
                    snapshot,
                    object_type,
                    object_name,
                    attr,
                    kind,
                };
                commands::attr::get(args, format.unwrap_or(config.output.format), decimals)
            }
        },
        Commands::Timeres { snapshot, format } => {
            commands::timeres::show(snapshot, format.unwrap_or(config.output.format), decimals)
        }
        Commands::Lp { command } => match command {
            LpCommands::Vars {
                snapshot,
                var_type,
                format,
            } => commands::lp::vars(snapshot, *var_type, format.unwrap_or(config.output.format)),
        },
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "shop", &mut io::stdout());
            Ok(())
        }
    }
}
