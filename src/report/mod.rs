// src/report/mod.rs
//! Markdown results summary for the team newsletter.
//!
//! Stored results are best-effort, so every optional field is checked here
//! rather than assumed present.

use crate::extractors::{AthleteRecord, ExtractionResult};
use crate::storage::StorageManager;
use crate::utils::error::StorageError;
use std::collections::BTreeMap;
use std::path::Path;

pub const NO_ATHLETES_NOTICE: &str = "No athlete data could be extracted. Please review the raw results.";

/// Loads a stored result through the lenient reader and renders it.
pub fn render_stored_summary<P: AsRef<Path>>(
    storage: &StorageManager,
    results_path: P,
) -> Result<(ExtractionResult, String), StorageError> {
    let result = storage.load_result(results_path)?;
    let markdown = render_summary(&result);
    Ok((result, markdown))
}

/// Renders the summary. Output is deterministic for a given result.
pub fn render_summary(result: &ExtractionResult) -> String {
    let mut output = String::new();

    let title = if result.competition_name().is_empty() {
        "Competition Results"
    } else {
        result.competition_name()
    };
    output.push_str(&format!("# {}\n\n", title));
    if !result.date().is_empty() {
        output.push_str(&format!("*{}*\n\n", result.date()));
    }

    if result.athletes().is_empty() {
        output.push_str(NO_ATHLETES_NOTICE);
        output.push('\n');
        return output;
    }

    // --- Highlights ---
    let mut placers: Vec<&AthleteRecord> = result
        .athletes()
        .iter()
        .filter(|a| matches!(a.placement, Some(1..=3)))
        .collect();
    placers.sort_by_key(|a| a.placement);
    if !placers.is_empty() {
        output.push_str("## Highlights\n\n");
        for athlete in placers {
            let place = athlete.placement.map(ordinal).unwrap_or_default();
            output.push_str(&format!("- {} place: **{}** ({})\n", place, athlete.name, athlete.weight_class));
        }
        output.push('\n');
    }

    // --- By weight class ---
    output.push_str("## Results by Weight Class\n\n");
    for ((_, weight_class), athletes) in group_by_weight(result.athletes()) {
        output.push_str(&format!("### {}\n\n", weight_class));
        for athlete in athletes {
            let details = describe(athlete);
            if details.is_empty() {
                output.push_str(&format!("- **{}**\n", athlete.name));
            } else {
                output.push_str(&format!("- **{}** — {}\n", athlete.name, details));
            }
        }
        output.push('\n');
    }

    output.push_str(&format!("*{} athletes recorded*\n", result.athletes().len()));
    output
}

/// Groups athletes by weight class, lightest class first.
/// Classes without a leading number sort after the numeric ones.
fn group_by_weight(athletes: &[AthleteRecord]) -> BTreeMap<(u32, &str), Vec<&AthleteRecord>> {
    let mut groups: BTreeMap<(u32, &str), Vec<&AthleteRecord>> = BTreeMap::new();
    for athlete in athletes {
        let weight = leading_number(&athlete.weight_class).unwrap_or(u32::MAX);
        groups
            .entry((weight, athlete.weight_class.as_str()))
            .or_default()
            .push(athlete);
    }
    groups
}

fn leading_number(text: &str) -> Option<u32> {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

fn describe(athlete: &AthleteRecord) -> String {
    let mut parts = Vec::new();
    if let Some(place) = athlete.placement {
        parts.push(format!("{} place", ordinal(place)));
    }
    if let (Some(wins), Some(losses)) = (athlete.wins, athlete.losses) {
        parts.push(format!("{}-{}", wins, losses));
    }
    match athlete.pins {
        0 => {}
        1 => parts.push("1 pin".to_string()),
        n => parts.push(format!("{} pins", n)),
    }
    parts.join(", ")
}

pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::extract;

    #[test]
    fn test_ordinals() {
        let rendered: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 101, 111].into_iter().map(ordinal).collect();
        assert_eq!(
            rendered,
            vec!["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "101st", "111th"]
        );
    }

    #[test]
    fn test_summary_lists_athletes_by_weight() {
        let result: ExtractionResult = serde_json::from_str(
            r#"{
                "competitionName": "Regional Duals 3/14/2024",
                "date": "3/14/2024",
                "athletes": [
                    {"name": "Kyle Reed", "weightClass": "160 lbs", "placement": 4},
                    {"name": "John Smith", "weightClass": "152 lbs", "placement": 1, "wins": 5, "losses": 2, "pins": 1},
                    {"name": "Owen Hart", "weightClass": "152 lbs"}
                ]
            }"#,
        )
        .unwrap();
        let summary = render_summary(&result);

        assert!(summary.starts_with("# Regional Duals 3/14/2024\n"));
        assert!(summary.contains("*3/14/2024*"));
        assert!(summary.contains("- 1st place: **John Smith** (152 lbs)"));
        assert!(!summary.contains("4th place: **Kyle Reed**"));
        assert!(summary.contains("- **John Smith** — 1st place, 5-2, 1 pin"));
        assert!(summary.contains("- **Owen Hart**\n"));

        let light = summary.find("### 152 lbs").unwrap();
        let heavy = summary.find("### 160 lbs").unwrap();
        assert!(light < heavy);
    }

    #[test]
    fn test_summary_without_athletes() {
        let result = extract("Just some unrelated header text");
        let summary = render_summary(&result);
        assert!(summary.contains(NO_ATHLETES_NOTICE));
        assert!(!summary.contains("## Results by Weight Class"));
    }

    #[test]
    fn test_stored_summary_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let path = storage
            .save_result(&extract("Regional Duals\n152 lbs\nJohn Smith 5-2 1st pin\n"))
            .unwrap();

        let (result, summary) = render_stored_summary(&storage, &path).unwrap();
        assert_eq!(result.competition_name(), "Regional Duals");
        assert!(summary.contains("### 152 lbs\n\n- **John Smith** — 1st place, 5-2, 1 pin\n"));
    }

    #[test]
    fn test_stored_summary_rejects_blob_without_athletes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path()).unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, r#"{"competitionName":"Duals","date":"3/14/2024"}"#).unwrap();

        let err = render_stored_summary(&storage, &path).unwrap_err();
        assert!(matches!(err, StorageError::SerializationError(_)));
    }

    #[test]
    fn test_summary_of_sparse_blob() {
        let result: ExtractionResult =
            serde_json::from_str(r#"{"athletes":[{"name":"Ana Diaz","weightClass":"Heavyweight"}]}"#).unwrap();
        let summary = render_summary(&result);

        assert!(summary.starts_with("# Competition Results\n"));
        assert!(summary.contains("### Heavyweight"));
        assert!(!summary.contains("## Highlights"));
    }
}
