use std::io::BufRead;

use tracker_core::{DailyUsage, TokenCounters, TokenSample};

use crate::parser::{ExtractSample, extract_date_key, parse_json_line};

/// Extracts the date key and sample for one log line.
///
/// Blank lines, invalid JSON, non-object roots, records without a timestamp,
/// malformed counters and samples without usage all yield `None`.
pub fn sample_from_line<C: ExtractSample>(line: &str) -> Option<(String, TokenSample<C>)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let entry = parse_json_line(line)?;
    if !entry.is_object() {
        return None;
    }
    let date = extract_date_key(&entry)?;
    let sample = C::extract_sample(&entry)?;
    if !sample.counters.has_usage() {
        return None;
    }
    Some((date, sample))
}

pub fn daily_usage_from_lines<C, I, S>(lines: I) -> DailyUsage<C>
where
    C: ExtractSample,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| sample_from_line(line.as_ref()))
        .collect()
}

pub fn daily_usage_from_reader<C: ExtractSample, R: BufRead>(reader: R) -> DailyUsage<C> {
    daily_usage_from_lines(reader.lines().map_while(|line| line.ok()))
}

/// Folds per-file aggregates into one, summing counters and unioning models per date.
pub fn merge_daily_usage<C, I>(parts: I) -> DailyUsage<C>
where
    C: TokenCounters,
    I: IntoIterator<Item = DailyUsage<C>>,
{
    let mut merged = DailyUsage::new();
    for part in parts {
        merged.merge(part);
    }
    merged
}
