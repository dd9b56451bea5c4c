//! `quietspot` - CLI and HTTP server for the quiet-spot service.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use quietspot::cli::{Cli, Command, ConfigCommand, ServeCommand, SpotsCommand};
use quietspot::{init_logging, rank_quiet_spots, Config, ReadingStore, DEFAULT_SPOT_LIMIT};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let mut config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Serve(cmd) => handle_serve(&mut config, &cmd).await,
        Command::Spots(cmd) => handle_spots(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

async fn handle_serve(config: &mut Config, cmd: &ServeCommand) -> Result<()> {
    if let Some(host) = &cmd.host {
        config.server.host.clone_from(host);
    }
    if let Some(port) = cmd.port {
        config.server.port = port;
    }
    config.validate()?;

    quietspot::api::serve(config).await?;
    Ok(())
}

fn handle_spots(config: &Config, cmd: &SpotsCommand) -> Result<()> {
    let store = ReadingStore::open(config.data_path())?;
    let readings = store.all();
    let limit = cmd.limit.unwrap_or(DEFAULT_SPOT_LIMIT);
    let spots = rank_quiet_spots(&readings, limit);

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&spots)?);
    } else if spots.is_empty() {
        println!("No readings in {}", store.path().display());
    } else {
        println!("{:>10}  {:>10}  {:>8}  {:>5}", "lat", "lng", "avg dBA", "n");
        for spot in &spots {
            println!(
                "{:>10.4}  {:>10.4}  {:>8.1}  {:>5}",
                spot.lat, spot.lng, spot.avg, spot.n
            );
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Bind address:  {}", config.bind_addr());
                println!("  CORS:          {}", config.server.cors);
                println!("  Spot limit:    {}", config.server.spot_limit);
                println!();
                println!("[Storage]");
                println!("  Data file:     {}", config.data_path().display());
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
