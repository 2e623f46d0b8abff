//! Scenario outcome: pass/fail, counts, log and wall-clock timings

use anyhow::{Context, Result};
use grainfall_core::DebugCounters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::verification::VerificationResult;

/// Wall-clock milliseconds spent in each phase of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Timings {
    pub total_ms: f64,
    pub setup_ms: f64,
    pub actions_ms: f64,
    pub verify_ms: f64,
}

impl Timings {
    pub fn millis(duration: Duration) -> f64 {
        duration.as_secs_f64() * 1000.0
    }

    /// Setup and action time divided by `ticks`
    ///
    /// This is driving cost per tick, not pure physics time: frames that ran
    /// no tick and direct grid edits are included.
    pub fn driven_ms_per_tick(&self, ticks: u64) -> Option<f64> {
        (ticks > 0).then(|| (self.setup_ms + self.actions_ms) / ticks as f64)
    }

    pub fn summary(&self, ticks: u64) -> String {
        let per_tick = match self.driven_ms_per_tick(ticks) {
            Some(ms) => format!("{ms:.3}ms/tick driven"),
            None => "no ticks".to_string(),
        };
        format!(
            "{:.1}ms total (setup {:.1}, actions {:.1}, verify {:.1}), {}",
            self.total_ms, self.setup_ms, self.actions_ms, self.verify_ms, per_tick
        )
    }
}

/// Everything a scenario run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub scenario_name: String,

    /// RFC 3339 start time
    pub timestamp: String,

    pub passed: bool,
    pub frames_executed: usize,

    /// Physics ticks, whether driven by frames or run directly
    pub ticks_executed: u64,

    pub actions_executed: usize,
    pub verification_failures: Vec<VerificationResult>,
    pub log: Vec<String>,

    /// Paths of written PNG files
    pub snapshots: Vec<String>,

    /// Sandbox counters after the last action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counters: Option<DebugCounters>,

    pub timings: Timings,
}

impl ExecutionReport {
    pub fn new(scenario_name: impl Into<String>) -> Self {
        Self {
            scenario_name: scenario_name.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            passed: false,
            frames_executed: 0,
            ticks_executed: 0,
            actions_executed: 0,
            verification_failures: Vec::new(),
            log: Vec::new(),
            snapshots: Vec::new(),
            counters: None,
            timings: Timings::default(),
        }
    }

    /// True when no verification failed
    pub fn success(&self) -> bool {
        self.verification_failures.is_empty()
    }

    /// Write the report as pretty JSON, creating parent directories
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }

    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse report: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_roundtrip() {
        let mut report = ExecutionReport::new("Pile up");
        report.passed = true;
        report.frames_executed = 12;
        report.ticks_executed = 64;
        report.log.push("Drew sand".to_string());

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("\"frames_executed\": 12"));
        assert!(!json.contains("counters"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("pile.json");
        report.save_json(&path).unwrap();
        let loaded = ExecutionReport::from_json(&path).unwrap();
        assert_eq!(loaded.scenario_name, "Pile up");
        assert_eq!(loaded.ticks_executed, 64);
        assert_eq!(loaded.log, report.log);
    }

    #[test]
    fn test_success_tracks_failures() {
        let mut report = ExecutionReport::new("Empty");
        assert!(report.success());

        report.verification_failures.push(VerificationResult {
            passed: false,
            message: "expected sand at (3, 2)".to_string(),
            actual_value: None,
        });
        assert!(!report.success());
    }

    #[test]
    fn test_per_tick_cost_needs_ticks() {
        let timings = Timings {
            total_ms: 12.0,
            setup_ms: 2.0,
            actions_ms: 8.0,
            verify_ms: 1.0,
        };
        assert_eq!(timings.driven_ms_per_tick(0), None);
        assert_eq!(timings.driven_ms_per_tick(4), Some(2.5));
        assert!(timings.summary(0).ends_with("no ticks"));
        assert!(timings.summary(4).contains("2.500ms/tick driven"));
    }

    #[test]
    fn test_missing_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExecutionReport::from_json(dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("absent.json"));
    }
}
