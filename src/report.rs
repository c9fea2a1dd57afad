use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Outcome of a single test as reported by the harness.
///
/// Statuses other than the three known ones are kept as `Other` so they can be
/// echoed back, but they never land in a classification bucket.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
    #[default]
    Missing,
    Other(String),
}

impl From<String> for TestStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "passed" => TestStatus::Passed,
            "failed" => TestStatus::Failed,
            "skipped" => TestStatus::Skipped,
            "" => TestStatus::Missing,
            _ => TestStatus::Other(raw),
        }
    }
}

impl From<TestStatus> for String {
    fn from(status: TestStatus) -> Self {
        match status {
            TestStatus::Passed => "passed".to_string(),
            TestStatus::Failed => "failed".to_string(),
            TestStatus::Skipped => "skipped".to_string(),
            TestStatus::Missing => String::new(),
            TestStatus::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: TestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Keys the harness emits that the analysis does not look at.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestRecord {
    /// Category label used for display and grouping.
    pub fn category_label(&self) -> &str {
        if self.category.is_empty() {
            "unknown"
        } else {
            &self.category
        }
    }

    /// Name used for display.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unknown"
        } else {
            &self.name
        }
    }

    /// Error text, empty when the record carries none.
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Results {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub passed: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub failed: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skipped: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pass_rate: Metric,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: Metric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<Map<String, Value>>,
}

/// A display-only figure such as `passRate` or `duration`. The harness writes
/// these either as numbers or as pre-formatted strings (`"33.3"`, `"1.20"`);
/// both are kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Number(f64),
    Text(String),
}

impl Default for Metric {
    fn default() -> Self {
        Metric::Number(0.0)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Number(n) => write!(f, "{n}"),
            Metric::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One entry of the `coverage` mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverageEntry {
    Stats { tested: f64, total: f64 },
    Note(String),
}

impl CoverageEntry {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(note) => Some(CoverageEntry::Note(note.clone())),
            Value::Object(stats) => {
                let total = stats.get("total")?.as_f64()?;
                let tested = stats.get("tested").and_then(Value::as_f64).unwrap_or(0.0);
                Some(CoverageEntry::Stats { tested, total })
            }
            _ => None,
        }
    }

    /// Percentage tested; a zero total is treated as one.
    pub fn percent(&self) -> Option<f64> {
        match self {
            CoverageEntry::Stats { tested, total } => {
                let denominator = if *total == 0.0 { 1.0 } else { *total };
                Some(tested * 100.0 / denominator)
            }
            CoverageEntry::Note(_) => None,
        }
    }
}

impl Results {
    /// Coverage entries in document order, skipping shapes that carry no usable data.
    pub fn coverage_entries(&self) -> Vec<(&str, CoverageEntry)> {
        let Some(ref coverage) = self.coverage else {
            return Vec::new();
        };
        coverage
            .iter()
            .filter_map(|(category, value)| {
                CoverageEntry::from_value(value).map(|entry| (category.as_str(), entry))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Report {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Results,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: Vec<TestRecord>,
}

/// Decode a report from raw bytes. `origin` labels the source in error messages.
pub fn parse_report(bytes: &[u8], origin: &str) -> Result<Report> {
    let bytes = bytes.strip_prefix("\u{feff}".as_bytes()).unwrap_or(bytes);
    serde_json::from_slice(bytes).map_err(|error| Error::MalformedReport {
        origin: origin.to_string(),
        error,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
