mod cli;
mod command;
mod config;
mod error;
mod render;

use error::WrapErr;

use clap::CommandFactory;
use clap::Parser;
use tracing::Level;

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;

    let command_line = cli::Cli::parse();
    let level = match command_line.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let cfg = config::Config::load().context("Load configuration error")?;

    if let Some(command) = command_line.command {
        let cmd: Box<dyn command::Command> = match command {
            cli::Commands::Serve => Box::new(command::ServeCommand::new(cfg)),
            cli::Commands::Ingest { files } => Box::new(command::IngestCommand::new(cfg, files)),
            cli::Commands::Search(args) => Box::new(command::SearchCommand::new(cfg, args)),
            cli::Commands::List { json } => Box::new(command::ListCommand::new(cfg, json)),
            cli::Commands::Show { id, json } => Box::new(command::ShowCommand::new(cfg, id, json)),
            cli::Commands::Delete { id } => Box::new(command::DeleteCommand::new(cfg, id)),
            cli::Commands::Stats { json } => Box::new(command::StatsCommand::new(cfg, json)),
        };
        cmd.execute().await?;
    } else {
        cli::Cli::command().print_help()?;
    }

    Ok(())
}
