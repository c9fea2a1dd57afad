use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::classify::Classification;
use crate::error::{Error, Result};
use crate::input::LoadedReport;
use crate::report::{Metric, TestRecord};
use crate::suggest::{Suggestion, suggestions_for};

/// Suggestions generated for one failed test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixEntry {
    pub test_name: String,
    pub category: String,
    pub error: Option<String>,
    pub suggestions: Vec<Suggestion>,
}

impl FixEntry {
    pub fn for_test(test: &TestRecord) -> Self {
        Self {
            test_name: test.name.clone(),
            category: test.category.clone(),
            error: test.error.clone(),
            suggestions: suggestions_for(test),
        }
    }
}

/// Per-run fix-suggestion artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixFile<'a> {
    pub report_source: String,
    pub failed_tests: Vec<&'a TestRecord>,
    pub fixes: Vec<FixEntry>,
}

impl<'a> FixFile<'a> {
    /// Build from the first `fix_limit` failures of a classification.
    pub fn build(loaded: &LoadedReport, c: &Classification<'a>, fix_limit: usize) -> Self {
        let targets = c.fix_targets(fix_limit);
        Self {
            report_source: loaded.source.to_string(),
            failed_tests: targets.to_vec(),
            fixes: targets.iter().map(|t| FixEntry::for_test(t)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
    pub pass_rate: Metric,
}

/// Per-run analysis artifact: counts plus the failed and skipped records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisFile<'a> {
    pub report_source: String,
    pub summary: AnalysisSummary,
    pub failed_tests: Vec<&'a TestRecord>,
    pub skipped_tests: Vec<&'a TestRecord>,
    pub coverage: Map<String, Value>,
}

impl<'a> AnalysisFile<'a> {
    pub fn build(loaded: &'a LoadedReport, c: &Classification<'a>) -> Self {
        let results = &loaded.report.results;
        Self {
            report_source: loaded.source.to_string(),
            summary: AnalysisSummary {
                total: results.total,
                passed: results.passed,
                failed: results.failed,
                skipped: results.skipped,
                pass_rate: results.pass_rate.clone(),
            },
            failed_tests: c.failed.clone(),
            skipped_tests: c.skipped.clone(),
            coverage: results.coverage.clone().unwrap_or_default(),
        }
    }
}

/// Writes run artifacts as pretty JSON into the results directory.
pub struct ArtifactWriter {
    results_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(results_dir: impl Into<PathBuf>) -> Self {
        Self {
            results_dir: results_dir.into(),
        }
    }

    pub fn fix_file_path(&self, stem: &str) -> PathBuf {
        self.results_dir.join(format!("fix-suggestions-{stem}.json"))
    }

    pub fn analysis_file_path(&self, stem: &str) -> PathBuf {
        self.results_dir.join(format!("analysis-{stem}.json"))
    }

    /// Write the fix-suggestion file, replacing any previous one for the same stem.
    pub fn write_fixes(&self, stem: &str, fixes: &FixFile<'_>) -> Result<PathBuf> {
        let path = self.fix_file_path(stem);
        self.write_json(&path, fixes)?;
        info!(path = %path.display(), fixes = fixes.fixes.len(), "wrote fix suggestions");
        Ok(path)
    }

    pub fn write_analysis(&self, stem: &str, analysis: &AnalysisFile<'_>) -> Result<PathBuf> {
        let path = self.analysis_file_path(stem);
        self.write_json(&path, analysis)?;
        info!(path = %path.display(), "wrote analysis");
        Ok(path)
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        std::fs::create_dir_all(&self.results_dir).map_err(|e| {
            Error::Artifact(format!(
                "failed to create results dir {}: {e}",
                self.results_dir.display()
            ))
        })?;

        let mut content = serde_json::to_string_pretty(value)
            .map_err(|e| Error::Artifact(format!("failed to serialize artifact: {e}")))?;
        content.push('\n');

        std::fs::write(path, content)
            .map_err(|e| Error::Artifact(format!("failed to write {}: {e}", path.display())))
    }
}
