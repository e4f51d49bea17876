use std::collections::BTreeSet;
use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Map, Value};
use tracker_core::{
    ClaudeCounters, DailyUsage, Provider, QwenCounters, TokenCounters, format_tokens,
};

use crate::config::OutputFormat;
use crate::error::Result;

const RULE_WIDTH: usize = 60;
const SOURCE_TAG: &str = "jsonl";

/// Counter sets that know their text report layout.
pub trait ReportCounters: TokenCounters {
    const MODELS_LABEL: &'static str;

    /// Padded labels and values in print order, ending with the total.
    fn text_rows(&self) -> Vec<(&'static str, u64)>;
}

impl ReportCounters for ClaudeCounters {
    const MODELS_LABEL: &'static str = "Models used:         ";

    fn text_rows(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("Input tokens:        ", self.input_tokens),
            ("Output tokens:       ", self.output_tokens),
            ("Cache read tokens:   ", self.cache_read_tokens),
            ("Cache creation:      ", self.cache_creation_tokens),
            ("Total tokens:        ", self.total_tokens()),
        ]
    }
}

impl ReportCounters for QwenCounters {
    const MODELS_LABEL: &'static str = "Models used:        ";

    fn text_rows(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("Prompt tokens:      ", self.prompt_tokens),
            ("Candidates tokens:  ", self.candidates_tokens),
            ("Thoughts tokens:    ", self.thoughts_tokens),
            ("Cached tokens:      ", self.cached_tokens),
            ("Total tokens:       ", TokenCounters::total_tokens(self)),
        ]
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DateEntry<'a, C> {
    date: &'a str,
    #[serde(flatten)]
    counters: &'a C,
    total_tokens: u64,
    total_tokens_formatted: String,
    models: &'a BTreeSet<String>,
}

#[derive(Serialize)]
struct JsonReport<'a, C> {
    provider: Provider,
    source: &'static str,
    dates: Vec<DateEntry<'a, C>>,
}

/// Renders the aggregate in the requested format, newline terminated.
pub fn render_report<C: ReportCounters>(
    usage: &DailyUsage<C>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(usage)),
        OutputFormat::Json { pretty } => {
            let mut out = render_json(usage, pretty)?;
            out.push('\n');
            Ok(out)
        }
    }
}

pub fn render_text<C: ReportCounters>(usage: &DailyUsage<C>) -> String {
    let mut out = String::new();
    out.push_str(C::PROVIDER.report_title());
    out.push('\n');
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    for (date, bucket) in usage.iter() {
        let _ = writeln!(out, "\n{}", date);
        for (label, value) in bucket.counters.text_rows() {
            let _ = writeln!(out, "  {}{}", label, format_tokens(value));
        }
        if !bucket.models.is_empty() {
            let models: Vec<&str> = bucket.models.iter().map(String::as_str).collect();
            let _ = writeln!(out, "  {}{}", C::MODELS_LABEL, models.join(", "));
        }
    }
    out
}

/// Structured report. Compact output keeps field order; `pretty` indents by
/// two spaces and sorts keys at every level.
pub fn render_json<C: ReportCounters>(usage: &DailyUsage<C>, pretty: bool) -> Result<String> {
    let report = JsonReport {
        provider: C::PROVIDER,
        source: SOURCE_TAG,
        dates: usage
            .iter()
            .map(|(date, bucket)| {
                let total = bucket.total_tokens();
                DateEntry {
                    date,
                    counters: &bucket.counters,
                    total_tokens: total,
                    total_tokens_formatted: format_tokens(total),
                    models: &bucket.models,
                }
            })
            .collect(),
    };
    if pretty {
        let value = sort_keys(serde_json::to_value(&report)?);
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(serde_json::to_string(&report)?)
    }
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::new();
            for (key, value) in entries {
                sorted.insert(key, sort_keys(value));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}
