use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, btree_map};
use std::fmt;

/// Date key used when a record carries a timestamp that cannot be parsed.
pub const UNKNOWN_DATE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Claude,
    Qwen,
}

impl Provider {
    /// Identifier used in structured output and as the persisted tool name.
    pub fn tool_name(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Qwen => "qwen",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Qwen => "Qwen",
        }
    }

    pub fn report_title(self) -> &'static str {
        match self {
            Self::Claude => "Claude Code Token Usage by Date",
            Self::Qwen => "Qwen Token Usage by Date",
        }
    }

    /// Human label for the log directory, used in discovery errors.
    pub fn directory_label(self) -> &'static str {
        match self {
            Self::Claude => "Claude project",
            Self::Qwen => "Qwen project/chats",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tool_name())
    }
}

/// Fixed-shape counter set for one provider.
pub trait TokenCounters: Copy + Default + PartialEq + fmt::Debug + Serialize {
    const PROVIDER: Provider;

    fn merge(&mut self, other: &Self);

    /// Grand total as the provider accounts it.
    fn total_tokens(&self) -> u64;

    /// Whether a single extracted sample carries any usable data.
    fn has_usage(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaudeCounters {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_read_tokens: u64,
    pub cache_creation_tokens: u64,
}

impl TokenCounters for ClaudeCounters {
    const PROVIDER: Provider = Provider::Claude;

    fn merge(&mut self, other: &Self) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
        self.cache_read_tokens = self.cache_read_tokens.saturating_add(other.cache_read_tokens);
        self.cache_creation_tokens = self
            .cache_creation_tokens
            .saturating_add(other.cache_creation_tokens);
    }

    fn total_tokens(&self) -> u64 {
        self.input_tokens
            .saturating_add(self.output_tokens)
            .saturating_add(self.cache_read_tokens)
            .saturating_add(self.cache_creation_tokens)
    }

    fn has_usage(&self) -> bool {
        self.total_tokens() != 0
    }
}

/// Qwen reports its own total; it is carried as-is rather than re-derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QwenCounters {
    pub prompt_tokens: u64,
    pub candidates_tokens: u64,
    pub thoughts_tokens: u64,
    pub cached_tokens: u64,
    #[serde(skip_serializing)]
    pub total_tokens: u64,
}

impl TokenCounters for QwenCounters {
    const PROVIDER: Provider = Provider::Qwen;

    fn merge(&mut self, other: &Self) {
        self.prompt_tokens = self.prompt_tokens.saturating_add(other.prompt_tokens);
        self.candidates_tokens = self
            .candidates_tokens
            .saturating_add(other.candidates_tokens);
        self.thoughts_tokens = self.thoughts_tokens.saturating_add(other.thoughts_tokens);
        self.cached_tokens = self.cached_tokens.saturating_add(other.cached_tokens);
        self.total_tokens = self.total_tokens.saturating_add(other.total_tokens);
    }

    fn total_tokens(&self) -> u64 {
        self.total_tokens
    }

    fn has_usage(&self) -> bool {
        self.total_tokens != 0
    }
}

/// Extraction result for a single log record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSample<C> {
    pub counters: C,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DailyBucket<C> {
    pub counters: C,
    pub models: BTreeSet<String>,
}

impl<C: TokenCounters> DailyBucket<C> {
    pub fn absorb(&mut self, sample: TokenSample<C>) {
        self.counters.merge(&sample.counters);
        if let Some(model) = sample.model {
            self.models.insert(model);
        }
    }

    pub fn merge(&mut self, other: DailyBucket<C>) {
        self.counters.merge(&other.counters);
        self.models.extend(other.models);
    }

    pub fn total_tokens(&self) -> u64 {
        self.counters.total_tokens()
    }
}

/// Per-date aggregate for one provider, ordered by date key.
///
/// Keys are `YYYY-MM-DD` strings or [`UNKNOWN_DATE`]; lexicographic order is
/// chronological and places `unknown` after every real date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyUsage<C> {
    days: BTreeMap<String, DailyBucket<C>>,
}

impl<C> Default for DailyUsage<C> {
    fn default() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }
}

impl<C: TokenCounters> DailyUsage<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: impl Into<String>, sample: TokenSample<C>) {
        self.days.entry(date.into()).or_default().absorb(sample);
    }

    pub fn merge(&mut self, other: DailyUsage<C>) {
        for (date, bucket) in other.days {
            match self.days.entry(date) {
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(bucket);
                }
                btree_map::Entry::Occupied(mut entry) => entry.get_mut().merge(bucket),
            }
        }
    }

    pub fn get(&self, date: &str) -> Option<&DailyBucket<C>> {
        self.days.get(date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DailyBucket<C>)> {
        self.days.iter().map(|(date, bucket)| (date.as_str(), bucket))
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.days.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn provider(&self) -> Provider {
        C::PROVIDER
    }
}

impl<C: TokenCounters> FromIterator<(String, TokenSample<C>)> for DailyUsage<C> {
    fn from_iter<I: IntoIterator<Item = (String, TokenSample<C>)>>(iter: I) -> Self {
        let mut usage = Self::new();
        for (date, sample) in iter {
            usage.record(date, sample);
        }
        usage
    }
}

/// Formats a token count with a `K`/`M` suffix for display only.
pub fn format_tokens(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.2}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.2}K", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}
