//! Transcript normalization pipeline.
//!
//! Five rewrite stages run in a fixed order over one owned string:
//! line flattening, colloquialism expansion, punctuation spacing,
//! leading-filler stripping and sentence capitalization. Later stages rely
//! on the spacing produced by stage three.

use log::{debug, trace, warn};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Built-in colloquialisms, expanded in this order.
pub const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[
    ("gonna", "going to"),
    ("wanna", "want to"),
    ("gotta", "got to"),
    ("kinda", "kind of"),
    ("sorta", "sort of"),
    ("lemme", "let me"),
    ("gimme", "give me"),
    ("cuz", "because"),
];

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([.,!?])\s*").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static LEADING_FILLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(^|[.!?]\s+)(and|but|so)\b[\s,]*").unwrap());
static SENTENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(^|[.!?]\s+)([a-z])").unwrap());

static DEFAULT_NORMALIZER: LazyLock<Normalizer> = LazyLock::new(Normalizer::default);

/// One `from` -> `to` rule. `from` is a literal word, `to` literal text.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Replacement {
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// How many times the leading-filler pass runs.
#[derive(Debug, Deserialize, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FillerMode {
    /// One replace-all pass; "And so we" keeps "so".
    #[default]
    Single,
    /// Repeat until nothing changes; "And so we" becomes "we".
    FixedPoint,
}

impl FillerMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "single" => Some(FillerMode::Single),
            "fixed-point" | "fixed_point" | "fixedpoint" => Some(FillerMode::FixedPoint),
            _ => None,
        }
    }
}

/// Ordered, compiled colloquialism table.
///
/// Matching is case-insensitive and whole-word; the replacement is inserted
/// verbatim, so "Gonna" becomes "going to".
#[derive(Debug, Clone)]
pub struct ReplacementTable {
    rules: Vec<(Regex, Replacement)>,
}

impl ReplacementTable {
    pub fn new<I>(entries: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = Replacement>,
    {
        let mut rules = Vec::new();
        for entry in entries {
            // An empty pattern would match at every word boundary
            let from = entry.from.trim();
            if from.is_empty() {
                warn!("skipping replacement with empty pattern (to={:?})", entry.to);
                continue;
            }
            rules.push((Regex::new(&word_pattern(from))?, entry));
        }
        Ok(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &Replacement> {
        self.rules.iter().map(|(_, entry)| entry)
    }

    pub fn expand(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (re, entry) in &self.rules {
            if re.is_match(&result) {
                result = re
                    .replace_all(&result, |caps: &regex::Captures| {
                        let lead = caps.name("lead").map_or("", |m| m.as_str());
                        format!("{lead}{}", entry.to)
                    })
                    .into_owned();
            }
        }
        result
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive pattern for `from`. A word-character edge gets `\b`; a
/// leading punctuation edge must follow whitespace or the start of text,
/// which is captured as `lead` and written back.
fn word_pattern(from: &str) -> String {
    let lead = match from.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?P<lead>^|\s)",
    };
    let tail = match from.chars().next_back() {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    };
    format!("(?i){lead}{}{tail}", regex::escape(from))
}

pub fn default_replacements() -> Vec<Replacement> {
    DEFAULT_REPLACEMENTS
        .iter()
        .map(|(from, to)| Replacement::new(*from, *to))
        .collect()
}

impl Default for ReplacementTable {
    fn default() -> Self {
        Self::new(default_replacements()).expect("built-in replacement patterns are escaped")
    }
}

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    table: ReplacementTable,
    filler_mode: FillerMode,
}

impl Normalizer {
    pub fn new(table: ReplacementTable, filler_mode: FillerMode) -> Self {
        Self { table, filler_mode }
    }

    pub fn filler_mode(&self) -> FillerMode {
        self.filler_mode
    }

    pub fn table(&self) -> &ReplacementTable {
        &self.table
    }

    /// Runs the full pipeline. Total: empty or whitespace-only input gives "".
    pub fn normalize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        debug!("normalize: {} bytes in", text.len());

        let text = flatten_line_breaks(text);
        trace!("flattened: {text}");
        let text = self.table.expand(&text);
        trace!("expanded: {text}");
        let text = normalize_punctuation_spacing(&text);
        trace!("spaced: {text}");
        let text = strip_leading_fillers(&text, self.filler_mode);
        trace!("stripped: {text}");
        let text = capitalize_sentence_starts(&text);

        debug!("normalize: {} bytes out", text.len());
        text
    }
}

/// Normalizes `text` with the built-in table and single-pass filler stripping.
pub fn normalize(text: &str) -> String {
    DEFAULT_NORMALIZER.normalize(text)
}

fn flatten_line_breaks(text: &str) -> String {
    text.replace('\n', " ")
}

fn normalize_punctuation_spacing(text: &str) -> String {
    let spaced = PUNCTUATION.replace_all(text, "${1} ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

fn strip_leading_fillers(text: &str, mode: FillerMode) -> String {
    let mut result = LEADING_FILLER.replace_all(text, "${1}").into_owned();
    if mode == FillerMode::FixedPoint {
        // Every successful pass removes at least one word, so this terminates
        loop {
            let next = LEADING_FILLER.replace_all(&result, "${1}");
            if next == result {
                break;
            }
            result = next.into_owned();
        }
    }
    result
}

fn capitalize_sentence_starts(text: &str) -> String {
    SENTENCE_START
        .replace_all(text.trim(), |caps: &regex::Captures| {
            format!("{}{}", &caps[1], caps[2].to_uppercase())
        })
        .into_owned()
}
