use anyhow::Result;

use gymdesk_cli::cli::{Cli, Command};
use gymdesk_cli::logger;
use gymdesk_cli::report::Failure;
use gymdesk_db::Connection;

async fn run(cli: Cli) -> Result<()> {
    let conn = Connection::open(&cli.db).await?;
    match cli.command {
        Command::Members(cmd) => cmd.run(&conn).await,
        Command::Payments(cmd) => cmd.run(&conn).await,
        Command::Dashboard(cmd) => cmd.run(&conn).await,
    }
}

#[tokio::main]
async fn main() {
    logger::setup_logger();
    let cli = Cli::init();

    if let Err(err) = run(cli).await {
        let failure = Failure::classify(&err);
        match failure {
            Failure::Store => log::error!("store error: {:#}", err),
            _ => log::debug!("{:?}", err),
        }
        eprintln!("{}", failure);
        std::process::exit(1);
    }
}
