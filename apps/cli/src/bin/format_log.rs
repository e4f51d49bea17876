use std::process::ExitCode;

fn main() -> ExitCode {
    token_tracker_cli::format_log::run()
}
