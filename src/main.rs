//! pgdesk - A small PostgreSQL query console.

mod cli;

use cli::Cli;
use pgdesk::config::ConnectionConfig;
use pgdesk::db::PostgresClient;
use pgdesk::error::Result;
use pgdesk::logging;
use pgdesk::shell::Shell;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // .env is loaded before the configuration is built; a missing file
    // is not an error.
    dotenvy::dotenv().ok();

    logging::init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        eprintln!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let action = cli.action()?;
    let format = cli.output_format()?;

    // The environment is read exactly once, here; everything below
    // receives the configuration by parameter.
    let config = cli.resolve_config(ConnectionConfig::from_env())?;
    info!("Connection: {}", config.display_string());

    let client = PostgresClient::new(config);
    let shell = Shell::new(&client, format);

    let output = shell.run(&action).await?;
    print!("{output}");

    Ok(())
}
