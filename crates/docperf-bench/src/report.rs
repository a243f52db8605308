//! JSON export of a completed run.

use crate::config::RunConfig;
use anyhow::{Context, Result};
use docperf_core::TestReport;
use serde::Serialize;
use std::path::Path;

/// JSON-serializable benchmark report
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkReport {
    pub metadata: ReportMetadata,
    pub results: Vec<TestResultJson>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub timestamp: String,
    pub platform: String,
    pub docperf_version: String,
    pub iterations: usize,
    pub num_docs: usize,
    /// Requested test names (empty when every test ran)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<String>,
}

/// One executed test
#[derive(Debug, Clone, Serialize)]
pub struct TestResultJson {
    pub name: String,
    pub median_ms: f64,
    pub iterations: usize,
}

impl From<&TestReport> for TestResultJson {
    fn from(report: &TestReport) -> Self {
        Self {
            name: report.name.clone(),
            median_ms: report.median_ms,
            iterations: report.iterations,
        }
    }
}

/// Assemble the report for `reports`.
pub fn build_report(reports: &[TestReport], config: &RunConfig) -> BenchmarkReport {
    BenchmarkReport {
        metadata: ReportMetadata {
            timestamp: chrono::Utc::now().to_rfc3339(),
            platform: format!("{} {}", std::env::consts::OS, std::env::consts::ARCH),
            docperf_version: env!("CARGO_PKG_VERSION").to_string(),
            iterations: config.iterations,
            num_docs: config.workload.num_docs,
            filter: config.filter.names().to_vec(),
        },
        results: reports.iter().map(TestResultJson::from).collect(),
    }
}

/// Export results to JSON file
pub fn export_json(reports: &[TestReport], config: &RunConfig, path: &Path) -> Result<()> {
    let report = build_report(reports, config);
    let json = serde_json::to_string_pretty(&report)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON report to {}", path.display()))?;
    Ok(())
}
