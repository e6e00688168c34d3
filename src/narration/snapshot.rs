use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

// Labels may be wrapped in markdown bold, e.g. `**EXECUTIVE_SUMMARY:**`.
macro_rules! label_pattern {
    ($name:ident, $label:literal) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| {
            Regex::new(concat!(
                r"(?m)^[ \t]*(?:\*\*)?",
                $label,
                r":(?:\*\*)?\s*([^\n]+)"
            ))
            .ok()
        });
    };
}

label_pattern!(SUMMARY, "EXECUTIVE_SUMMARY");
label_pattern!(DRIVER, "PRIMARY_RISK_DRIVER");
label_pattern!(ACTION, "IMMEDIATE_ACTION");

static ANALYSIS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?ms)^[ \t]*(?:\*\*)?FULL_ANALYSIS:(?:\*\*)?\s*(.*)\z").ok()
});

/// The three one-line fields pulled out of a narration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSnapshot {
    pub summary: String,
    pub driver: String,
    pub action: String,
}

impl ActionSnapshot {
    /// Best effort: a missing label leaves its field empty.
    pub fn parse(text: &str) -> Self {
        Self {
            summary: capture(&SUMMARY, text),
            driver: capture(&DRIVER, text),
            action: capture(&ACTION, text),
        }
    }
}

/// Everything after the `FULL_ANALYSIS:` label, or empty.
pub fn full_analysis(text: &str) -> String {
    capture(&ANALYSIS, text)
}

fn capture(pattern: &LazyLock<Option<Regex>>, text: &str) -> String {
    pattern
        .as_ref()
        .and_then(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
