/// One persisted `(date, tool)` summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyUsageRow {
    pub date: String,
    pub tokens_used: u64,
    pub tool_name: String,
}
