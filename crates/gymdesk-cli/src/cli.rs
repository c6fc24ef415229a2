
use clap::{Parser, Subcommand};

use crate::commands::{Members, Payments, ShowDashboard};

#[derive(Parser, Debug)]
#[clap(name = "gymdesk", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Path to the SQLite database
    #[clap(long, env = "GYMDESK_DB", default_value = "gym.sqlite3")]
    pub db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}


#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage members
    #[clap(subcommand)]
    Members(Members),

    /// Manage payments
    #[clap(subcommand)]
    Payments(Payments),

    /// Show the summary figures
    #[clap(name = "dashboard")]
    Dashboard(ShowDashboard),
}
