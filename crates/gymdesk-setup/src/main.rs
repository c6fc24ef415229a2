use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use gymdesk_db::{schema, Connection};

#[derive(Parser, Debug)]
#[clap(name="gymdesk-setup")]
struct Cli {
    #[clap(long, env = "GYMDESK_DB", default_value = "gym.sqlite3")]
    pub db: String,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database and install the schema
    Init,
}

/// Initialize the database
async fn db_init(filename: &str) -> Result<()> {
    let conn = Connection::open(filename).await?;
    schema::install(&conn).await?;
    println!("Database {} is ready.", filename);

    Ok(())
}


#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Init => db_init(&cli.db).await?,
    }
    Ok(())
}
