mod support;

use support::{claude_usage, setup_db};
use tracker_core::{DailyUsage, QwenCounters, TokenSample};
use tracker_db::{DailyUsageRow, Db};

#[test]
fn save_writes_one_row_per_date() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let usage = claude_usage(&[("2026-01-01", 100, 50), ("2026-01-02", 7, 0)]);

    let written = db.save_daily_usage(&usage).expect("save");
    assert_eq!(written, 2);

    let rows = db.list_daily_usage("claude").expect("list");
    assert_eq!(
        rows,
        vec![
            DailyUsageRow {
                date: "2026-01-01".to_string(),
                tokens_used: 150,
                tool_name: "claude".to_string(),
            },
            DailyUsageRow {
                date: "2026-01-02".to_string(),
                tokens_used: 7,
                tool_name: "claude".to_string(),
            },
        ]
    );
}

#[test]
fn saving_twice_replaces_instead_of_duplicating() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.save_daily_usage(&claude_usage(&[("2026-01-01", 10, 0)]))
        .expect("first save");
    db.save_daily_usage(&claude_usage(&[("2026-01-01", 25, 5)]))
        .expect("second save");

    let rows = db.list_daily_usage("claude").expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tokens_used, 30);
}

#[test]
fn tools_do_not_overwrite_each_other() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    db.save_daily_usage(&claude_usage(&[("2026-01-01", 10, 0)]))
        .expect("claude save");

    let qwen: DailyUsage<QwenCounters> = [(
        "2026-01-01".to_string(),
        TokenSample {
            counters: QwenCounters {
                prompt_tokens: 30,
                total_tokens: 42,
                ..QwenCounters::default()
            },
            model: Some("qwen3-coder-plus".to_string()),
        },
    )]
    .into_iter()
    .collect();
    db.save_daily_usage(&qwen).expect("qwen save");

    assert_eq!(db.list_daily_usage("claude").expect("claude")[0].tokens_used, 10);
    assert_eq!(db.list_daily_usage("qwen").expect("qwen")[0].tokens_used, 42);
}

#[test]
fn zero_totals_are_not_written() {
    let mut test_db = setup_db();
    let db = &mut test_db.db;
    let written = db
        .upsert_daily_totals("claude", [("2026-01-01", 0), ("2026-01-02", 3)])
        .expect("upsert");
    assert_eq!(written, 1);
    let dates: Vec<String> = db
        .list_daily_usage("claude")
        .expect("list")
        .into_iter()
        .map(|row| row.date)
        .collect();
    assert_eq!(dates, vec!["2026-01-02".to_string()]);
}

#[test]
fn data_survives_reopen() {
    let mut test_db = setup_db();
    test_db
        .db
        .upsert_daily_totals("qwen", [("unknown", 9)])
        .expect("upsert");
    drop(test_db.db);

    let mut reopened = Db::open(&test_db.path).expect("reopen");
    reopened.migrate().expect("migrate again");
    let rows = reopened.list_daily_usage("qwen").expect("list");
    assert_eq!(rows[0].date, "unknown");
    assert_eq!(rows[0].tokens_used, 9);
}

#[test]
fn oversized_totals_are_rejected() {
    let mut db = Db::open_in_memory().expect("open");
    db.migrate().expect("migrate");
    let err = db
        .upsert_daily_totals("claude", [("2026-01-01", u64::MAX)])
        .expect_err("overflow");
    assert!(matches!(err, tracker_db::DbError::TokenOverflow(u64::MAX)));
    assert!(db.list_daily_usage("claude").expect("list").is_empty());
}
