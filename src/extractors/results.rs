// src/extractors/results.rs

// --- Imports ---
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// --- Constants ---
pub const DEFAULT_COMPETITION_NAME: &str = "Wrestling Competition";
pub const DEFAULT_LOOKAHEAD_LINES: usize = 10;
pub const DEFAULT_DATE_SCAN_LINES: usize = 10;

// --- Regex Patterns for Line Matching (Lazy Static) ---
// Numeric dates like 3/14/2024 or 03-14-24
static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b").expect("Failed to compile DATE_RE")
});

// Weight marker: "152", "152 lbs", "152lb", "152 LBS"
static WEIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,3})\s*(?:lbs?)?\b").expect("Failed to compile WEIGHT_RE")
});

// Two capitalized words: "John Smith"
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][a-z]+)\s+([A-Z][a-z]+)\b").expect("Failed to compile NAME_RE")
});

// Ordinal placement: "1st", "2nd", "3rd", "4th"
static PLACEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+)(?:st|nd|rd|th)\b").expect("Failed to compile PLACEMENT_RE")
});

// Win-loss pair: "5-2"
static RECORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d+)-(\d+)\b").expect("Failed to compile RECORD_RE")
});

static PIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:pin|fall)").expect("Failed to compile PIN_RE")
});

// Bare 1-3 digit number, used by the unanchored fallback pass
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,3})\b").expect("Failed to compile NUMBER_RE")
});

/// Patterns used by the extractor, paired with a category label.
/// Exposed for the `--debug` annotated output.
pub fn debug_patterns() -> Vec<(&'static str, &'static str)> {
    vec![
        (DATE_RE.as_str(), "date"),
        (WEIGHT_RE.as_str(), "weight"),
        (NAME_RE.as_str(), "name"),
        (PLACEMENT_RE.as_str(), "placement"),
        (RECORD_RE.as_str(), "record"),
        (PIN_RE.as_str(), "pin"),
    ]
}

// --- Data Structures ---

/// One athlete's performance as recovered from the results text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteRecord {
    pub name: String,
    pub weight_class: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wins: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub losses: Option<u32>,
    #[serde(default)]
    pub pins: u32,
    /// Reserved. This extractor never populates it.
    #[serde(default)]
    pub takedowns: u32,
}

impl AthleteRecord {
    fn new(name: String, weight_class: String) -> Self {
        Self {
            name,
            weight_class,
            placement: None,
            wins: None,
            losses: None,
            pins: 0,
            takedowns: 0,
        }
    }
}

/// Structured output of one extraction run.
///
/// Only `athletes` is mandatory when read back from storage; every other field
/// falls back to its default so older or hand-edited blobs still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    #[serde(default)]
    competition_name: String,
    #[serde(default)]
    date: String,
    athletes: Vec<AthleteRecord>,
    #[serde(default)]
    raw_lines: Vec<String>,
}

impl ExtractionResult {
    pub fn competition_name(&self) -> &str {
        &self.competition_name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn athletes(&self) -> &[AthleteRecord] {
        &self.athletes
    }

    pub fn raw_lines(&self) -> &[String] {
        &self.raw_lines
    }
}

/// An extraction result plus the name of the strategy that produced its athletes.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    pub result: ExtractionResult,
    pub strategy: Option<&'static str>,
}

/// Tunables for the extractor. Constructed once and handed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Lines scanned after each weight marker
    pub lookahead_lines: usize,
    /// Leading lines searched for a competition date
    pub date_scan_lines: usize,
    pub default_competition_name: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            lookahead_lines: DEFAULT_LOOKAHEAD_LINES,
            date_scan_lines: DEFAULT_DATE_SCAN_LINES,
            default_competition_name: DEFAULT_COMPETITION_NAME.to_string(),
        }
    }
}

/// Athletes collected so far. Rejects a second record with the same
/// (name, weight class) pair.
#[derive(Debug, Default)]
pub struct AthleteRoster {
    records: Vec<AthleteRecord>,
    seen: HashSet<(String, String)>,
}

impl AthleteRoster {
    /// Returns false if the pair was already present; the first record wins.
    pub fn insert(&mut self, record: AthleteRecord) -> bool {
        let key = (record.name.clone(), record.weight_class.clone());
        if !self.seen.insert(key) {
            tracing::trace!("Dropping duplicate athlete '{}' ({})", record.name, record.weight_class);
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn into_records(self) -> Vec<AthleteRecord> {
        self.records
    }
}

// --- Strategies ---

/// One independent pass over the document lines.
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn collect_athletes(&self, lines: &[&str], roster: &mut AthleteRoster);
}

/// Primary pass: a weight marker opens a lookahead window, and every name in
/// that window is filed under the marker's weight class.
pub struct WeightAnchoredStrategy {
    pub lookahead_lines: usize,
}

impl ExtractionStrategy for WeightAnchoredStrategy {
    fn name(&self) -> &'static str {
        "weight-anchored"
    }

    fn collect_athletes(&self, lines: &[&str], roster: &mut AthleteRoster) {
        for (i, line) in lines.iter().enumerate() {
            let Some(weight) = weight_marker(line) else {
                continue;
            };
            let weight_class = format_weight_class(weight);
            let window_end = (i + 1 + self.lookahead_lines).min(lines.len());
            tracing::trace!("Weight marker '{}' at line {} (window to {})", weight_class, i, window_end);

            // Overlapping windows re-scan the same lines; accepted
            for candidate in &lines[i + 1..window_end] {
                if let Some(record) = parse_athlete_line(candidate, &weight_class) {
                    tracing::debug!("Found athlete '{}' at {}", record.name, weight_class);
                    roster.insert(record);
                }
            }
        }
    }
}

/// Fallback pass: any line with a name and a standalone number becomes a
/// minimal record, with the number read as the weight.
pub struct LooseLineStrategy;

impl ExtractionStrategy for LooseLineStrategy {
    fn name(&self) -> &'static str {
        "loose-line"
    }

    fn collect_athletes(&self, lines: &[&str], roster: &mut AthleteRoster) {
        for line in lines {
            let Some(name) = match_name(line) else {
                continue;
            };
            if let Some(weight) = standalone_number(line) {
                tracing::debug!("Fallback match '{}' at {} lbs", name, weight);
                roster.insert(AthleteRecord::new(name, format_weight_class(weight)));
            }
        }
    }
}

// --- Main Extractor Structure ---
pub struct ResultExtractor {
    config: ExtractorConfig,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl ResultExtractor {
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(WeightAnchoredStrategy { lookahead_lines: config.lookahead_lines }),
            Box::new(LooseLineStrategy),
        ];
        Self { config, strategies }
    }

    /// Extracts a best-effort result. Never fails; unrecognised input yields
    /// an empty athlete list.
    pub fn extract(&self, document_text: &str) -> ExtractionResult {
        self.run(document_text).result
    }

    /// Like [`extract`](Self::extract), also reporting which strategy found the athletes.
    pub fn run(&self, document_text: &str) -> ExtractionOutcome {
        let lines = split_lines(document_text);
        tracing::info!("Extracting results from {} non-empty lines", lines.len());

        let competition_name = lines
            .first()
            .map(|line| line.to_string())
            .unwrap_or_else(|| self.config.default_competition_name.clone());
        let date = find_date(&lines, self.config.date_scan_lines);

        // Strategies run in order; the first one that finds anybody wins
        let mut athletes = Vec::new();
        let mut strategy = None;
        for candidate in &self.strategies {
            let mut roster = AthleteRoster::default();
            candidate.collect_athletes(&lines, &mut roster);
            tracing::debug!("Strategy '{}' found {} athletes", candidate.name(), roster.len());
            if !roster.is_empty() {
                strategy = Some(candidate.name());
                athletes = roster.into_records();
                break;
            }
        }

        tracing::info!(
            "Extracted {} athletes for '{}' ({}) via {}",
            athletes.len(),
            competition_name,
            date,
            strategy.unwrap_or("no strategy")
        );

        ExtractionOutcome {
            result: ExtractionResult {
                competition_name,
                date,
                athletes,
                raw_lines: lines.iter().map(|line| line.to_string()).collect(),
            },
            strategy,
        }
    }
}

impl Default for ResultExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience wrapper using the default configuration.
pub fn extract(document_text: &str) -> ExtractionResult {
    ResultExtractor::new().extract(document_text)
}

// --- Helpers ---

fn split_lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty()).collect()
}

fn find_date(lines: &[&str], depth: usize) -> String {
    lines
        .iter()
        .take(depth)
        .find_map(|line| DATE_RE.find(line).map(|m| m.as_str().to_string()))
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string())
}

fn match_name(line: &str) -> Option<String> {
    NAME_RE
        .captures(line)
        .map(|caps| format!("{} {}", &caps[1], &caps[2]))
}

/// Number of the first weight marker on the line, if any
fn weight_marker(line: &str) -> Option<u32> {
    WEIGHT_RE
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

/// First bare number not joined to a date or record separator, so the
/// fallback does not read "3/14/2024" or "5-2" as weights.
fn standalone_number(line: &str) -> Option<u32> {
    NUMBER_RE.captures_iter(line).find_map(|caps| {
        let digits = caps.get(1)?;
        let before = line[..digits.start()].chars().next_back();
        let after = line[digits.end()..].chars().next();
        let glued = |c: Option<char>| matches!(c, Some('/' | '-'));
        if glued(before) || glued(after) {
            return None;
        }
        digits.as_str().parse().ok()
    })
}

fn format_weight_class(weight: u32) -> String {
    format!("{} lbs", weight)
}

/// Builds a record from a window line. Placement, record and pin are each
/// picked up independently when present.
fn parse_athlete_line(line: &str, weight_class: &str) -> Option<AthleteRecord> {
    let name = match_name(line)?;
    let mut record = AthleteRecord::new(name, weight_class.to_string());

    record.placement = PLACEMENT_RE
        .captures(line)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .filter(|place| *place >= 1);

    if let Some(caps) = RECORD_RE.captures(line) {
        if let (Ok(wins), Ok(losses)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
            record.wins = Some(wins);
            record.losses = Some(losses);
        }
    }

    if PIN_RE.is_match(line) {
        record.pins = 1;
    }

    Some(record)
}
