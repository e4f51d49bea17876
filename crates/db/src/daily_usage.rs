use rusqlite::params;
use tracker_core::{DailyUsage, TokenCounters};

use crate::Db;
use crate::error::{DbError, Result};
use crate::types::DailyUsageRow;

impl Db {
    /// Writes one total per date for `tool_name`, replacing any existing row for
    /// the same `(date, tool_name)`. Dates with a zero total are not written.
    ///
    /// Returns the number of rows written.
    pub fn upsert_daily_totals<'a, I>(&mut self, tool_name: &str, totals: I) -> Result<usize>
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let tx = self.conn.transaction()?;
        let mut written = 0usize;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR REPLACE INTO daily_usage (date, tokens_used, tool_name)
                VALUES (?1, ?2, ?3)
                "#,
            )?;
            for (date, total) in totals {
                if total == 0 {
                    continue;
                }
                let tokens = i64::try_from(total).map_err(|_| DbError::TokenOverflow(total))?;
                stmt.execute(params![date, tokens, tool_name])?;
                written += 1;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    /// Persists a provider aggregate under its tool name.
    pub fn save_daily_usage<C: TokenCounters>(&mut self, usage: &DailyUsage<C>) -> Result<usize> {
        let totals = usage
            .iter()
            .map(|(date, bucket)| (date, bucket.total_tokens()));
        self.upsert_daily_totals(C::PROVIDER.tool_name(), totals)
    }

    /// Rows stored for `tool_name`, ordered by date.
    pub fn list_daily_usage(&self, tool_name: &str) -> Result<Vec<DailyUsageRow>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT date, tokens_used, tool_name
            FROM daily_usage
            WHERE tool_name = ?1
            ORDER BY date ASC
            "#,
        )?;
        let rows = stmt.query_map(params![tool_name], |row| {
            let tokens: i64 = row.get(1)?;
            Ok(DailyUsageRow {
                date: row.get(0)?,
                tokens_used: tokens.max(0) as u64,
                tool_name: row.get(2)?,
            })
        })?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}
