use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use ingest::{ExtractSample, daily_usage_from_reader};
use serde_json::json;
use tracker_core::{ClaudeCounters, QwenCounters};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: ingest_cli <claude|qwen> <path|->");
        std::process::exit(2);
    }

    let path = &args[2];
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(err) => {
                eprintln!("failed to open {}: {}", path, err);
                std::process::exit(1);
            }
        }
    };

    match args[1].as_str() {
        "claude" => print_daily::<ClaudeCounters>(reader),
        "qwen" => print_daily::<QwenCounters>(reader),
        other => {
            eprintln!("unknown provider: {}", other);
            std::process::exit(2);
        }
    }
}

fn print_daily<C: ExtractSample>(reader: Box<dyn BufRead>) {
    let usage = daily_usage_from_reader::<C, _>(reader);
    if usage.is_empty() {
        eprintln!("no token usage found");
        std::process::exit(3);
    }
    let dates: Vec<_> = usage
        .iter()
        .map(|(date, bucket)| {
            json!({
                "date": date,
                "counters": bucket.counters,
                "totalTokens": bucket.total_tokens(),
                "models": bucket.models,
            })
        })
        .collect();
    match serde_json::to_string_pretty(&json!({ "provider": C::PROVIDER, "dates": dates })) {
        Ok(text) => println!("{}", text),
        Err(err) => {
            eprintln!("failed to encode aggregate: {}", err);
            std::process::exit(1);
        }
    }
}
