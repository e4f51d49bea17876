use std::process::ExitCode;

use token_tracker_cli::report::run_report;
use tracker_core::QwenCounters;

fn main() -> ExitCode {
    run_report::<QwenCounters>(
        "qwen-tokens-daily",
        "Extract token usage from Qwen local JSONL logs, grouped by date.",
    )
}
