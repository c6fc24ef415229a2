use anyhow::Result;

use crate::Connection;

const SCHEMA: &str = include_str!("../db/schema.sql");

/// Install the database schema. Installing into a database
/// which already has the schema is a no-op.
pub async fn install(conn: &Connection) -> Result<()> {
    let mut conn = conn.lock().await;
    sqlx::raw_sql(SCHEMA).execute(&mut *conn).await?;
    log::info!("database schema installed");
    Ok(())
}
