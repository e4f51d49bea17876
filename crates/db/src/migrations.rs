use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::Db;
use crate::error::Result;

const MIGRATION_0001: &str = include_str!("../migrations/0001_daily_usage.sql");
const MIGRATION_0002: &str = include_str!("../migrations/0002_add_tool_name.sql");
const MIGRATION_0003: &str = include_str!("../migrations/0003_daily_usage_unique.sql");

const MIGRATIONS: &[(&str, &str)] = &[
    ("0001_daily_usage", MIGRATION_0001),
    ("0002_add_tool_name", MIGRATION_0002),
    ("0003_daily_usage_unique", MIGRATION_0003),
];

impl Db {
    /// Brings the schema up to date. Safe to run on every open, including
    /// against a `daily_usage` table created by older tooling.
    pub fn migrate(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_migrations (
              name TEXT PRIMARY KEY,
              applied_at TEXT NOT NULL
            )
            "#,
        )?;
        for (name, sql) in MIGRATIONS {
            if migration_applied(&tx, name)? {
                continue;
            }
            if *name == "0002_add_tool_name" && table_has_column(&tx, "daily_usage", "tool_name")? {
                record_migration(&tx, name)?;
                continue;
            }
            tx.execute_batch(sql)?;
            record_migration(&tx, name)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn migration_applied(conn: &Connection, name: &str) -> Result<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM schema_migrations WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn record_migration(conn: &Connection, name: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_migrations (name, applied_at) VALUES (?1, ?2)",
        params![name, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

pub(crate) fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}
