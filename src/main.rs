use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{error, info};

use omnicmd::cli::Cli;
use omnicmd::commands::EXIT_REQUESTED;
use omnicmd::core::Session;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_filter())).init();

    info!("Starting omnicmd v{}", env!("CARGO_PKG_VERSION"));

    let one_shot = args.command.clone();
    let mut session = Session::new(args).await?;

    if let Some(line) = one_shot {
        let code = session.execute_command(&line).await;
        std::process::exit(if code == EXIT_REQUESTED { 0 } else { code });
    }

    if let Err(e) = session.run().await {
        error!("Session error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
