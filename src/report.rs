use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;

use crate::error::ReportError;
use crate::fixtures::{CleanupReport, CleanupStatus};
use crate::suite::{ScenarioGroup, ScenarioOutcome};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub code: &'static str,
    pub title: &'static str,
    pub group: ScenarioGroup,
    #[serde(flatten)]
    pub outcome: ScenarioOutcome,
    pub duration_ms: u64,
}

/// Summary of a run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<ScenarioResult>,
    pub cleanup: CleanupReport,
}

impl RunReport {
    pub fn new(results: Vec<ScenarioResult>, cleanup: CleanupReport, elapsed: Duration) -> Self {
        let (mut passed, mut failed, mut skipped) = (0, 0, 0);
        for result in &results {
            match result.outcome {
                ScenarioOutcome::Passed => passed += 1,
                ScenarioOutcome::Failed(_) => failed += 1,
                ScenarioOutcome::Skipped(_) => skipped += 1,
            }
        }

        Self {
            total: results.len(),
            passed,
            failed,
            skipped,
            duration_ms: elapsed.as_millis() as u64,
            results,
            cleanup,
        }
    }

    /// Cleanup problems are reported but never count as failures.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn result(&self, code: &str) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.code == code)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();

        for result in &self.results {
            let _ = writeln!(
                out,
                "{} {} {} ({} ms)",
                result.code,
                result.outcome.label(),
                result.title,
                result.duration_ms
            );
            match &result.outcome {
                ScenarioOutcome::Passed => {}
                ScenarioOutcome::Failed(reason) | ScenarioOutcome::Skipped(reason) => {
                    let _ = writeln!(out, "       {reason}");
                }
            }
        }

        let _ = writeln!(
            out,
            "\nCleanup: {}/{} deleted",
            self.cleanup.deleted(),
            self.cleanup.attempted()
        );
        for failure in self.cleanup.failures() {
            let detail = match &failure.status {
                CleanupStatus::Rejected { status, .. } => format!("status {status}"),
                CleanupStatus::Failed { error } => error.clone(),
                CleanupStatus::Deleted { .. } => continue,
            };
            let _ = writeln!(out, "  {} {detail}", failure.id);
        }

        let _ = writeln!(
            out,
            "\n{} total, {} passed, {} failed, {} skipped in {} ms",
            self.total, self.passed, self.failed, self.skipped, self.duration_ms
        );
        out
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ReportError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        fs::write(path, self.to_json()?).map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::ResourceId;
    use crate::fixtures::CleanupOutcome;

    fn result(code: &'static str, outcome: ScenarioOutcome) -> ScenarioResult {
        ScenarioResult {
            code,
            title: "title",
            group: ScenarioGroup::CreateItem,
            outcome,
            duration_ms: 5,
        }
    }

    fn sample() -> RunReport {
        let cleanup = CleanupReport {
            outcomes: vec![
                CleanupOutcome {
                    id: ResourceId::from("a"),
                    status: CleanupStatus::Deleted { status: 200 },
                },
                CleanupOutcome {
                    id: ResourceId::from("b"),
                    status: CleanupStatus::Rejected {
                        status: 404,
                        body: String::new(),
                    },
                },
            ],
        };
        RunReport::new(
            vec![
                result("TC-001", ScenarioOutcome::Passed),
                result("TC-004", ScenarioOutcome::Failed("Expected 400, got 200: {}".into())),
                result("TC-201", ScenarioOutcome::Skipped("Item not created".into())),
            ],
            cleanup,
            Duration::from_millis(42),
        )
    }

    #[test]
    fn counts_outcomes() {
        let report = sample();
        assert_eq!(report.total, 3);
        assert_eq!((report.passed, report.failed, report.skipped), (1, 1, 1));
        assert!(report.has_failures());
        assert_eq!(report.duration_ms, 42);
    }

    #[test]
    fn text_lists_failures_and_cleanup() {
        let text = sample().render_text();
        assert!(text.contains("TC-004 FAIL title (5 ms)"));
        assert!(text.contains("Expected 400, got 200"));
        assert!(text.contains("Cleanup: 1/2 deleted"));
        assert!(text.contains("  b status 404"));
        assert!(text.contains("3 total, 1 passed, 1 failed, 1 skipped in 42 ms"));
    }

    #[test]
    fn json_flattens_outcome() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(value["results"][1]["outcome"], "failed");
        assert_eq!(value["results"][1]["group"], "create-item");
        assert_eq!(value["cleanup"]["outcomes"][1]["outcome"], "rejected");
    }

    #[test]
    fn writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("run.json");
        sample().write_to(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"total\": 3"));
    }
}
