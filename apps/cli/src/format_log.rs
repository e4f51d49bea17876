use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use log_view::{LogFormatter, LogTail, LogViewError, resolve_log_file};

use crate::args::FormatLogArgs;
use crate::config;
use crate::logging::init_logging;

pub fn run() -> ExitCode {
    let args = FormatLogArgs::parse();
    init_logging(args.verbose);

    let loaded = match config::load_or_create(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let config = loaded.config;

    let formatter = match LogFormatter::new(config.display_utc_offset_hours) {
        Ok(formatter) => formatter,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };
    let mut formatter = formatter
        .with_color(color_enabled(args.no_color))
        .with_full_meta(args.full_meta);

    let path = match resolve_log_file(args.log_file.as_deref(), &config.openclaw_log_dir) {
        Ok(path) => path,
        Err(err @ LogViewError::NoLogFiles(_)) => {
            eprintln!("{}", formatter.error(&format!("Error: {}", err)));
            eprintln!("{}", formatter.warning("Hint: Specify a log file manually"));
            eprintln!(
                "  Usage: format-log {}",
                config.openclaw_log_dir.join("openclaw-YYYY-MM-DD.log").display()
            );
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("{}", formatter.error(&format!("Error: {}", err)));
            return ExitCode::FAILURE;
        }
    };

    let poll = Duration::from_millis(config.follow_poll_ms);
    match File::open(&path) {
        Ok(file) => show(&mut formatter, &path, LogTail::new(BufReader::new(file)), &args, poll),
        Err(err) => {
            eprintln!(
                "{}",
                formatter.error(&format!("Error reading log file: {}", err))
            );
            if args.follow {
                println!("{}", formatter.heading("Live monitoring (Ctrl+C to stop):"));
                eprintln!("\n{}", formatter.error(&format!("Error: {}", err)));
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
    }
}

fn show(
    formatter: &mut LogFormatter,
    path: &Path,
    mut tail: LogTail<BufReader<File>>,
    args: &FormatLogArgs,
    poll: Duration,
) -> ExitCode {
    if args.follow {
        println!("{}", formatter.banner(&path.display().to_string()));
    }

    println!("{}", formatter.heading("Recent logs:"));
    match tail.read_initial(args.lines, args.follow) {
        Ok(lines) => {
            for line in &lines {
                if let Some(rendered) = formatter.format_line(line) {
                    println!("{}", rendered);
                }
            }
            println!();
        }
        Err(err) => eprintln!(
            "{}",
            formatter.error(&format!("Error reading log file: {}", err))
        ),
    }

    if !args.follow {
        return ExitCode::SUCCESS;
    }

    println!("{}", formatter.heading("Live monitoring (Ctrl+C to stop):"));
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    if let Err(err) = ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst)) {
        eprintln!("\n{}", formatter.error(&format!("Error: {}", err)));
        return ExitCode::FAILURE;
    }

    let mut stdout = io::stdout();
    let result = tail.follow(&stop, poll, |line| {
        if let Some(rendered) = formatter.format_line(line) {
            writeln!(stdout, "{}", rendered)?;
            stdout.flush()?;
        }
        Ok(())
    });
    match result {
        Ok(()) => {
            println!("\n{}", formatter.warning("Monitoring stopped."));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("\n{}", formatter.error(&format!("Error: {}", err)));
            ExitCode::FAILURE
        }
    }
}

/// `--no-color` or a non-empty `NO_COLOR` disables styling.
fn color_enabled(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none_or(|value| value.is_empty())
}
