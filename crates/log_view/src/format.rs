use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use owo_colors::{OwoColorize, Style};

use crate::entry::{ParsedLogEntry, parse_log_line, text_of};
use crate::error::{LogViewError, Result};

pub const RULE_WIDTH: usize = 60;
const MAX_MODULE_CHARS: usize = 50;
const FIELD_SEPARATOR: &str = " | ";
const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;
const MODULE_PALETTE_LEN: usize = 6;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Renders parsed log lines. Module colors are assigned on first sight and
/// reused for the lifetime of the formatter.
pub struct LogFormatter {
    color: bool,
    full_meta: bool,
    offset: FixedOffset,
    module_slots: HashMap<String, usize>,
}

impl LogFormatter {
    pub fn new(utc_offset_hours: i32) -> Result<Self> {
        let offset = utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .ok_or(LogViewError::InvalidOffset(utc_offset_hours))?;
        Ok(Self {
            color: true,
            full_meta: false,
            offset,
            module_slots: HashMap::new(),
        })
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn with_full_meta(mut self, full_meta: bool) -> Self {
        self.full_meta = full_meta;
        self
    }

    /// `None` for blank lines; unparseable lines get the unparsed marker.
    pub fn format_line(&mut self, line: &str) -> Option<String> {
        if line.trim().is_empty() {
            return None;
        }
        Some(match parse_log_line(line) {
            Some(entry) => self.format_entry(&entry),
            None => self.format_unparsed(line),
        })
    }

    pub fn format_entry(&mut self, entry: &ParsedLogEntry) -> String {
        let mut parts = Vec::with_capacity(5);
        parts.push(self.paint(
            &format!("[{}]", self.display_time(&entry.time)),
            Style::new().bright_cyan(),
        ));
        if !entry.module.is_empty() && entry.module.chars().count() < MAX_MODULE_CHARS {
            let style = self.module_style(&entry.module);
            parts.push(self.paint(&format!("[{}]", entry.module), style));
        }
        parts.push(self.paint(&entry.level, level_style(&entry.level)));
        parts.push(entry.message.clone());
        if self.full_meta && !entry.meta.is_empty() {
            let fields: Vec<String> = entry
                .meta
                .iter()
                .map(|(key, value)| format!("{}={}", key, text_of(value)))
                .collect();
            parts.push(self.paint(&format!("# {}", fields.join(", ")), Style::new().dimmed()));
        }
        parts.join(FIELD_SEPARATOR)
    }

    pub fn format_unparsed(&self, line: &str) -> String {
        self.paint(
            &format!("└─ {}", line.trim_end()),
            Style::new().bright_black(),
        )
    }

    /// ISO 8601 timestamp shifted to the display offset; the raw text when unparseable.
    pub fn display_time(&self, raw: &str) -> String {
        parse_instant(raw)
            .map(|instant| {
                instant
                    .with_timezone(&self.offset)
                    .format(DISPLAY_TIME_FORMAT)
                    .to_string()
            })
            .unwrap_or_else(|| raw.to_string())
    }

    pub fn banner(&self, file: &str) -> String {
        let rule = self.paint(&"=".repeat(RULE_WIDTH), Style::new().cyan());
        [
            String::new(),
            rule.clone(),
            self.paint("OpenClaw Log Monitor", Style::new().bold()),
            rule.clone(),
            format!(
                "{}{}",
                self.paint("File: ", Style::new().white()),
                self.paint(file, Style::new().bright_cyan())
            ),
            rule,
            String::new(),
        ]
        .join("\n")
    }

    /// Bold title over a dimmed rule.
    pub fn heading(&self, title: &str) -> String {
        format!(
            "{}\n{}",
            self.paint(title, Style::new().bold()),
            self.paint(&"-".repeat(RULE_WIDTH), Style::new().dimmed())
        )
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Style::new().red())
    }

    pub fn warning(&self, text: &str) -> String {
        self.paint(text, Style::new().yellow())
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn module_style(&mut self, module: &str) -> Style {
        let slot = *self
            .module_slots
            .entry(module.to_string())
            .or_insert_with(|| module_palette_index(module));
        module_palette(slot)
    }
}

/// Stable palette slot for a module name (FNV-1a, 64-bit).
pub fn module_palette_index(module: &str) -> usize {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in module.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    (hash % MODULE_PALETTE_LEN as u64) as usize
}

fn module_palette(index: usize) -> Style {
    match index {
        0 => Style::new().bright_cyan(),
        1 => Style::new().bright_magenta(),
        2 => Style::new().bright_blue(),
        3 => Style::new().bright_yellow(),
        4 => Style::new().bright_green(),
        _ => Style::new().bright_red(),
    }
}

fn level_style(level: &str) -> Style {
    match level {
        "TRACE" => Style::new().bright_black(),
        "DEBUG" => Style::new().bright_blue(),
        "INFO" => Style::new().bright_green(),
        "WARN" => Style::new().bright_yellow(),
        "ERROR" => Style::new().bright_red(),
        "FATAL" => Style::new().red().bold(),
        _ => Style::new().white(),
    }
}

/// `Z` means UTC; timestamps without an offset are taken as UTC.
fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    let normalized = raw.replace('Z', "+00:00");
    for format in OFFSET_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(&normalized, format) {
            return Some(parsed.with_timezone(&Utc));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|midnight| midnight.and_utc())
}
