use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

const DEFAULT_LEVEL: &str = "INFO";
const MAX_SUBSYSTEM_HEAD_CHARS: usize = 30;

static SUBSYSTEM_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#""subsystem"\s*:\s*"([^"]+)""#).ok());

/// One structured log line, reduced to what the viewer prints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLogEntry {
    pub time: String,
    pub level: String,
    pub module: String,
    pub message: String,
    pub meta: Map<String, Value>,
}

/// Parses one log line. Returns `None` for blank lines, invalid JSON and JSON
/// roots that are not objects.
///
/// The message may be split across positional fields `"0"` and `"1"`; field
/// `"0"` is searched for a subsystem path first and only becomes the message
/// when it does not look like one. A truthy `"1"` always wins as the message.
pub fn parse_log_line(line: &str) -> Option<ParsedLogEntry> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let data: Value = serde_json::from_str(line).ok()?;
    let data = data.as_object()?;

    let meta = data
        .get("_meta")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let level = meta
        .get("logLevelName")
        .map(text_of)
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let time = data.get("time").map(text_of).unwrap_or_default();

    let (subsystem, mut message) = data.get("0").map(recover_fields).unwrap_or_default();
    if let Some(second) = data.get("1").filter(|value| is_truthy(value)) {
        message = text_of(second);
    }

    Some(ParsedLogEntry {
        time,
        level,
        module: module_name(&subsystem).to_string(),
        message: clean_message(&message),
        meta,
    })
}

/// Splits positional field `"0"` into `(subsystem, message)`.
fn recover_fields(first: &Value) -> (String, String) {
    match first {
        Value::Object(map) => (subsystem_of(map), String::new()),
        Value::String(text) => recover_from_text(text),
        _ => (String::new(), String::new()),
    }
}

fn recover_from_text(text: &str) -> (String, String) {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(text) {
        return (subsystem_of(&map), String::new());
    }
    if text.starts_with('{') {
        return (scan_subsystem(text).unwrap_or_default(), String::new());
    }
    if text.starts_with('"') && text.ends_with('"') {
        let inner = text.get(1..text.len() - 1).unwrap_or("");
        return classify(inner);
    }
    classify(text)
}

fn classify(text: &str) -> (String, String) {
    if looks_like_subsystem(text) {
        (text.to_string(), String::new())
    } else {
        (String::new(), text.to_string())
    }
}

/// Short, space-free leading segment followed by `/`, and not a URL.
fn looks_like_subsystem(text: &str) -> bool {
    if text.starts_with("http") {
        return false;
    }
    match text.split_once('/') {
        Some((head, _)) => !head.contains(' ') && head.chars().count() < MAX_SUBSYSTEM_HEAD_CHARS,
        None => false,
    }
}

fn subsystem_of(map: &Map<String, Value>) -> String {
    map.get("subsystem")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn scan_subsystem(text: &str) -> Option<String> {
    let pattern = SUBSYSTEM_PATTERN.as_ref()?;
    let captures = pattern.captures(text)?;
    captures.get(1).map(|found| found.as_str().to_string())
}

fn module_name(subsystem: &str) -> &str {
    subsystem.split('/').next().unwrap_or_default()
}

fn clean_message(message: &str) -> String {
    message.replace("\\n", " ").replace('\n', " ")
}

/// Strings are used as-is, anything else as its JSON text.
pub(crate) fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
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
