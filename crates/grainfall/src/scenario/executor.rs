//! Scenario execution engine

use anyhow::{Result, bail};
use glam::IVec2;
use grainfall_core::{FrameInput, Sandbox};
use std::path::PathBuf;
use std::time::Instant;

use super::actions::ScenarioAction;
use super::definition::ScenarioDefinition;
use super::results::{ExecutionReport, Timings};
use crate::stroke::line_cells;

/// Configuration for scenario executor
#[derive(Debug, Clone)]
pub struct ScenarioExecutorConfig {
    /// Enable snapshot capture; `Snapshot` actions are skipped otherwise
    pub capture_snapshots: bool,

    /// Snapshot output directory
    pub snapshot_dir: PathBuf,

    /// Draw the brush cursor into snapshots
    pub show_cursor: bool,

    /// Log every action before running it
    pub verbose: bool,
}

impl Default for ScenarioExecutorConfig {
    fn default() -> Self {
        Self {
            capture_snapshots: true,
            snapshot_dir: PathBuf::from("snapshots"),
            show_cursor: false,
            verbose: false,
        }
    }
}

/// Executes scenario actions against a sandbox
pub struct ScenarioExecutor {
    /// Configuration
    config: ScenarioExecutorConfig,

    /// Frames run through `Sandbox::frame`
    frame_count: usize,

    /// Action execution log
    log: Vec<String>,

    /// Snapshots written
    snapshots: Vec<String>,
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    /// Create new executor with custom config
    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        Self {
            config,
            frame_count: 0,
            log: Vec::new(),
            snapshots: Vec::new(),
        }
    }

    /// Execute a complete scenario
    ///
    /// Failing actions abort with an error; failing verifications are
    /// collected into the report.
    pub fn execute_scenario(
        &mut self,
        scenario: &ScenarioDefinition,
        sandbox: &mut Sandbox,
    ) -> Result<ExecutionReport> {
        let start_time = Instant::now();
        let start_ticks = sandbox.tick_count();
        let mut report = ExecutionReport::new(scenario.name.clone());

        self.log.clear();
        self.snapshots.clear();
        self.frame_count = 0;

        self.log(&format!("Starting scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("Description: {}", scenario.description));
        }

        // Execute setup actions
        let setup_start = Instant::now();
        if !scenario.setup.is_empty() {
            self.log(&format!("Running {} setup actions", scenario.setup.len()));
            for (idx, action) in scenario.setup.iter().enumerate() {
                if let Err(e) = self.execute_action(action, sandbox) {
                    let msg = format!("Setup action {} ({}) failed: {}", idx, action.name(), e);
                    self.log(&msg);
                    bail!(msg);
                }
            }
        }
        report.timings.setup_ms = Timings::millis(setup_start.elapsed());

        // Execute main actions
        let action_start = Instant::now();
        self.log(&format!("Running {} main actions", scenario.actions.len()));
        for (idx, action) in scenario.actions.iter().enumerate() {
            if let Err(e) = self.execute_action(action, sandbox) {
                let msg = format!("Action {} ({}) failed: {}", idx, action.name(), e);
                self.log(&msg);
                bail!(msg);
            }
        }
        report.timings.actions_ms = Timings::millis(action_start.elapsed());
        report.actions_executed = scenario.setup.len() + scenario.actions.len();

        // Checks see the canvas as it is now, even if no tick ran since the last edit
        sandbox.refresh_prefab();

        // Run verifications
        let verify_start = Instant::now();
        if !scenario.verify.is_empty() {
            self.log(&format!("Running {} verifications", scenario.verify.len()));
            for condition in &scenario.verify {
                let result = condition.evaluate(sandbox);
                self.log(&format!(
                    "  {} {}",
                    if result.passed { "PASS" } else { "FAIL" },
                    result.message
                ));

                if !result.passed {
                    report.verification_failures.push(result);
                }
            }
        }
        report.timings.verify_ms = Timings::millis(verify_start.elapsed());

        // Finalize report
        report.frames_executed = self.frame_count;
        report.ticks_executed = sandbox.tick_count() - start_ticks;
        report.passed = report.success();
        report.counters = Some(sandbox.debug_counters());
        report.timings.total_ms = Timings::millis(start_time.elapsed());

        self.log(&format!(
            "Scenario complete: {} ({} frames, {} ticks, {:.1}ms)",
            if report.passed { "PASSED" } else { "FAILED" },
            report.frames_executed,
            report.ticks_executed,
            report.timings.total_ms
        ));
        self.log(&format!(
            "  Timings: {}",
            report.timings.summary(report.ticks_executed)
        ));

        report.log = self.log.clone();
        report.snapshots = self.snapshots.clone();
        Ok(report)
    }

    /// Execute a single action
    fn execute_action(&mut self, action: &ScenarioAction, sandbox: &mut Sandbox) -> Result<()> {
        if self.config.verbose {
            self.log(&format!("[Frame {}] {:?}", self.frame_count, action));
        }

        match action {
            ScenarioAction::SelectKind { kind } => {
                if !kind.is_paintable() {
                    bail!("{} cannot be painted", kind);
                }
                self.frame(
                    sandbox,
                    &FrameInput {
                        select: Some(*kind),
                        ..Default::default()
                    },
                    0.0,
                );
                self.log(&format!("  Selected {}", kind));
            }

            ScenarioAction::ResizeBrush { steps } => {
                let wheel = steps.signum() as f32;
                for _ in 0..steps.unsigned_abs() {
                    self.frame(
                        sandbox,
                        &FrameInput {
                            wheel,
                            ..Default::default()
                        },
                        0.0,
                    );
                }
                self.log(&format!("  Brush size now {}", sandbox.brush().size()));
            }

            ScenarioAction::MoveCursor { x, y } => {
                self.frame(
                    sandbox,
                    &FrameInput {
                        cursor: Some(IVec2::new(*x, *y)),
                        ..Default::default()
                    },
                    0.0,
                );
            }

            ScenarioAction::Draw { x, y } => {
                self.frame(sandbox, &FrameInput::draw_at(IVec2::new(*x, *y)), 0.0);
                self.log(&format!(
                    "  Drew {} (size {}) at ({}, {})",
                    sandbox.brush().kind(),
                    sandbox.brush().size(),
                    x,
                    y
                ));
            }

            ScenarioAction::Stroke { from, to } => {
                let cells = line_cells(IVec2::new(from.0, from.1), IVec2::new(to.0, to.1));
                for &cell in &cells {
                    self.frame(sandbox, &FrameInput::draw_at(cell), 0.0);
                }
                self.log(&format!(
                    "  Stroked {} cells from {:?} to {:?}",
                    cells.len(),
                    from,
                    to
                ));
            }

            ScenarioAction::Clear => {
                self.frame(
                    sandbox,
                    &FrameInput {
                        clear: true,
                        ..Default::default()
                    },
                    0.0,
                );
                self.log("  Cleared canvas");
            }

            ScenarioAction::FillRect {
                row,
                col,
                rows,
                cols,
                kind,
            } => {
                let written = sandbox
                    .canvas_mut()
                    .fill_rect(*row, *col, *rows, *cols, *kind);
                self.log(&format!(
                    "  Filled {} cells at ({}, {}) with {}",
                    written, row, col, kind
                ));
            }

            ScenarioAction::Tick { count } => {
                for _ in 0..*count {
                    sandbox.tick();
                }
            }

            ScenarioAction::Advance { seconds, dt } => {
                if !(seconds.is_finite() && *seconds >= 0.0) {
                    bail!("Invalid duration: {}", seconds);
                }
                if !(dt.is_finite() && *dt > 0.0) {
                    bail!("Invalid frame time: {}", dt);
                }
                let before = sandbox.tick_count();
                let (seconds_f64, dt_f64) = (f64::from(*seconds), f64::from(*dt));
                for frame in 0..advance_frames(*seconds, *dt) {
                    // The last frame only covers what is left
                    let step = dt_f64.min(seconds_f64 - frame as f64 * dt_f64);
                    self.frame(sandbox, &FrameInput::default(), step as f32);
                }
                self.log(&format!(
                    "  Advanced {}s: {} ticks",
                    seconds,
                    sandbox.tick_count() - before
                ));
            }

            ScenarioAction::Snapshot { name } => {
                if !self.config.capture_snapshots {
                    self.log(&format!("  Snapshot '{}' skipped", name));
                    return Ok(());
                }
                sandbox.refresh_prefab();
                let path = self.config.snapshot_dir.join(format!("{}.png", name));
                if self.config.show_cursor {
                    crate::snapshot::save_snapshot_with_cursor(sandbox, &path)?;
                } else {
                    crate::snapshot::save_snapshot(sandbox, &path)?;
                }
                let path = path.display().to_string();
                self.log(&format!("  Snapshot saved: {}", path));
                self.snapshots.push(path);
            }

            ScenarioAction::Log { message } => {
                self.log(&format!("  {}", message));
            }
        }

        Ok(())
    }

    fn frame(&mut self, sandbox: &mut Sandbox, input: &FrameInput, dt: f32) {
        sandbox.frame(input, dt);
        self.frame_count += 1;
    }

    /// Log a message
    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames needed to cover `seconds` in steps of at most `dt`
fn advance_frames(seconds: f32, dt: f32) -> u64 {
    (f64::from(seconds) / f64::from(dt)).ceil() as u64
}
