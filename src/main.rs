use clap::Parser;
use laybook::adapter::inbound::cli::command::{Cli, Commands, ConfigCommand};
use laybook::adapter::inbound::cli::output::{self, OutputConfig};
use laybook::adapter::inbound::cli::{config, replay, run};
use laybook::error::Result;
use laybook::infrastructure::config::Config;
use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    if let Err(e) = dispatch(&cli).await {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

async fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(&cli.config),
        Commands::Config(ConfigCommand::Show) => config::execute_show(&cli.config),
        Commands::Replay(args) => {
            let config = Config::load(&cli.config)?;
            config.init_logging();
            replay::execute(&config, args).await
        }
        Commands::Run(args) => {
            let config = Config::load(&cli.config)?;
            config.init_logging();
            output::header(env!("CARGO_PKG_VERSION"));
            info!("laybook starting");

            let (stop, shutdown) = watch::channel(false);
            tokio::spawn(async move {
                match signal::ctrl_c().await {
                    Ok(()) => info!("Shutdown signal received"),
                    Err(err) => warn!(error = %err, "Failed to listen for shutdown signal"),
                }
                let _ = stop.send(true);
            });

            let result = run::execute(&config, args, shutdown).await;
            info!("laybook stopped");
            result
        }
    }
}
