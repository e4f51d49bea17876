use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};
use tracker_core::{ClaudeCounters, QwenCounters, TokenCounters, TokenSample, UNKNOWN_DATE};

const ISO_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const ISO_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Record types that can be turned into a [`TokenSample`].
pub trait ExtractSample: TokenCounters {
    /// Returns `None` when a counter is present but is not a non-negative integer.
    fn extract_sample(entry: &Value) -> Option<TokenSample<Self>>;
}

impl ExtractSample for ClaudeCounters {
    fn extract_sample(entry: &Value) -> Option<TokenSample<Self>> {
        extract_claude_sample(entry)
    }
}

impl ExtractSample for QwenCounters {
    fn extract_sample(entry: &Value) -> Option<TokenSample<Self>> {
        extract_qwen_sample(entry)
    }
}

pub(crate) fn parse_json_line(line: &str) -> Option<Value> {
    serde_json::from_str(line).ok()
}

/// Maps a raw timestamp to its `YYYY-MM-DD` date, or `"unknown"`.
///
/// The date is taken in the zone the timestamp was written in.
pub fn normalize_date(raw: Option<&str>) -> String {
    raw.filter(|value| !value.is_empty())
        .and_then(parse_date)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.ends_with('Z') {
        if let Some((base, rest)) = raw.rsplit_once('.') {
            let fraction: String = rest.trim_end_matches('Z').chars().take(3).collect();
            let candidate = format!("{base}.{fraction:0<3}Z");
            return NaiveDateTime::parse_from_str(&candidate, "%Y-%m-%dT%H:%M:%S%.fZ")
                .ok()
                .map(|dt| dt.date());
        }
        return NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%SZ")
            .ok()
            .map(|dt| dt.date());
    }
    parse_iso_date(&raw.replace('Z', "+00:00"))
}

fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    for format in ISO_OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::<FixedOffset>::parse_from_str(raw, format) {
            return Some(parsed.date_naive());
        }
    }
    for format in ISO_NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Date key for a record, or `None` when the record has no usable timestamp field.
///
/// A present but non-string timestamp still yields a key (`"unknown"`).
pub fn extract_date_key(entry: &Value) -> Option<String> {
    let value = entry.get("timestamp")?;
    if !is_truthy(value) {
        return None;
    }
    Some(normalize_date(value.as_str()))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn is_assistant(entry: &Value) -> bool {
    entry.get("type").and_then(|value| value.as_str()) == Some("assistant")
}

fn model_name(value: Option<&Value>) -> Option<String> {
    value
        .and_then(|value| value.as_str())
        .filter(|model| !model.is_empty())
        .map(str::to_string)
}

fn counter(usage: &Map<String, Value>, key: &str) -> Option<u64> {
    match usage.get(key) {
        None => Some(0),
        Some(value) => value.as_u64(),
    }
}

pub fn extract_claude_sample(entry: &Value) -> Option<TokenSample<ClaudeCounters>> {
    let assistant = is_assistant(entry);
    let message = entry.get("message").and_then(|value| value.as_object());
    let model = if assistant {
        model_name(message.and_then(|message| message.get("model")))
    } else {
        None
    };

    let usage = match entry.get("usage") {
        Some(usage) => Some(usage),
        None if assistant => message.and_then(|message| message.get("usage")),
        None => None,
    };
    let counters = match usage.and_then(|usage| usage.as_object()) {
        Some(usage) => ClaudeCounters {
            input_tokens: counter(usage, "input_tokens")?,
            output_tokens: counter(usage, "output_tokens")?,
            cache_read_tokens: counter(usage, "cache_read_input_tokens")?,
            cache_creation_tokens: counter(usage, "cache_creation_input_tokens")?,
        },
        None => ClaudeCounters::default(),
    };
    Some(TokenSample { counters, model })
}

pub fn extract_qwen_sample(entry: &Value) -> Option<TokenSample<QwenCounters>> {
    let model = if is_assistant(entry) {
        model_name(entry.get("model"))
    } else {
        None
    };
    let counters = match entry.get("usageMetadata").and_then(|usage| usage.as_object()) {
        Some(usage) => QwenCounters {
            prompt_tokens: counter(usage, "promptTokenCount")?,
            candidates_tokens: counter(usage, "candidatesTokenCount")?,
            thoughts_tokens: counter(usage, "thoughtsTokenCount")?,
            cached_tokens: counter(usage, "cachedContentTokenCount")?,
            total_tokens: counter(usage, "totalTokenCount")?,
        },
        None => QwenCounters::default(),
    };
    Some(TokenSample { counters, model })
}
