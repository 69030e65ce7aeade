// src/utils/debug.rs
use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::utils::error::AppError;

/// Saves the document text as HTML with the given byte ranges highlighted.
/// Highlights overlapping an earlier one are skipped.
pub fn save_debug_html(text: &str, filename: &Path, highlights: &[(usize, usize, &str)]) -> Result<(), AppError> {
    let mut file = File::create(filename)?;

    let debug_html = render_debug_html(text, highlights);
    file.write_all(debug_html.as_bytes())?;

    tracing::info!("Saved debug HTML to {}", filename.display());
    Ok(())
}

fn render_debug_html(text: &str, highlights: &[(usize, usize, &str)]) -> String {
    let mut debug_html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");

    // CSS for highlight colors
    debug_html.push_str("pre { font-family: monospace; }\n");
    debug_html.push_str(".highlight-weight { background-color: #FFFF00; }\n");
    debug_html.push_str(".highlight-name { background-color: #90EE90; }\n");
    debug_html.push_str(".highlight-placement { background-color: #ADD8E6; }\n");
    debug_html.push_str(".highlight-record { background-color: #FFA500; }\n");
    debug_html.push_str(".highlight-pin { background-color: #FF6347; }\n");
    debug_html.push_str(".highlight-date { background-color: #DDA0DD; }\n");
    debug_html.push_str(".highlight-custom { background-color: #FFC0CB; }\n");
    debug_html.push_str("</style>\n</head>\n<body>\n<pre>\n");

    let mut last_pos = 0;
    let mut sorted_highlights = highlights.to_vec();
    sorted_highlights.sort_by_key(|h| (h.0, std::cmp::Reverse(h.1))); // Sort by position, longest first

    for (start, end, highlight_type) in sorted_highlights {
        if start < last_pos || end > text.len() || start >= end {
            continue;
        }

        debug_html.push_str(&escape_html(&text[last_pos..start]));

        let css_class = match highlight_type {
            "weight" | "name" | "placement" | "record" | "pin" | "date" => highlight_type,
            _ => "custom",
        };

        debug_html.push_str(&format!(
            "<span class=\"highlight-{}\" title=\"Position: {}-{}, Type: {}\">",
            css_class, start, end, highlight_type
        ));
        debug_html.push_str(&escape_html(&text[start..end]));
        debug_html.push_str("</span>");

        last_pos = end;
    }

    if last_pos < text.len() {
        debug_html.push_str(&escape_html(&text[last_pos..]));
    }

    debug_html.push_str("\n</pre>\n</body>\n</html>");
    debug_html
}

/// Creates a debug version of the document text with every match of the
/// given regex patterns highlighted by category
pub fn create_debug_html(text: &str, filename: &Path, patterns: &[(&str, &str)]) -> Result<(), AppError> {
    use regex::Regex;

    let mut highlights = Vec::new();

    for (pattern, highlight_type) in patterns {
        let re = Regex::new(pattern).map_err(|e| {
            AppError::Config(format!("Invalid regex pattern '{}': {}", pattern, e))
        })?;

        for mat in re.find_iter(text) {
            highlights.push((mat.start(), mat.end(), *highlight_type));
        }
    }

    tracing::debug!("Annotating {} pattern matches", highlights.len());
    save_debug_html(text, filename, &highlights)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_highlights_and_escapes() {
        let text = "<b>152 lbs</b>";
        let html = render_debug_html(text, &[(3, 10, "weight")]);
        assert!(html.contains("&lt;b&gt;<span class=\"highlight-weight\" title=\"Position: 3-10, Type: weight\">152 lbs</span>&lt;/b&gt;"));
    }

    #[test]
    fn test_overlapping_highlights_are_skipped() {
        let text = "John Smith 1st";
        let html = render_debug_html(text, &[(0, 10, "name"), (5, 14, "custom"), (11, 14, "placement")]);
        assert_eq!(html.matches("<span").count(), 2);
        assert!(html.contains(">1st</span>"));
    }

    #[test]
    fn test_create_debug_html_rejects_bad_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_debug_html("text", &dir.path().join("out.html"), &[("(unclosed", "name")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_create_debug_html_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotated.html");
        create_debug_html("152 lbs\nJohn Smith", &path, &[(r"\d+ lbs", "weight")]).unwrap();

        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.contains("class=\"highlight-weight\""));
        assert!(html.contains("John Smith"));
    }
}
