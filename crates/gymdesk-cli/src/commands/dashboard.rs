use anyhow::Result;
use clap::Args;

use gymdesk_accounting::{dashboard, datetime};
use gymdesk_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Args, Debug)]
pub struct ShowDashboard {}

impl ShowDashboard {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let summary = dashboard::fetch_summary(db, datetime::today()).await?;
        println!();
        summary.print_formatted();
        println!();
        Ok(())
    }
}
