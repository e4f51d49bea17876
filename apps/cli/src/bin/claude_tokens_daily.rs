use std::process::ExitCode;

use token_tracker_cli::report::run_report;
use tracker_core::ClaudeCounters;

fn main() -> ExitCode {
    run_report::<ClaudeCounters>(
        "claude-tokens-daily",
        "Extract token usage from Claude Code local JSONL logs, grouped by date.",
    )
}
