//! Runs the bundled scenario files end to end

use grainfall::SandboxConfig;
use grainfall::scenario::{
    ExecutionReport, ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig,
};
use std::path::{Path, PathBuf};

fn scenario_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}

fn run_file(name: &str, snapshot_dir: &Path) -> ExecutionReport {
    let scenario = ScenarioDefinition::from_file(scenario_dir().join(name)).unwrap();
    let mut sandbox = scenario.build_sandbox(&SandboxConfig::default()).unwrap();
    let mut executor = ScenarioExecutor::with_config(ScenarioExecutorConfig {
        snapshot_dir: snapshot_dir.to_path_buf(),
        ..Default::default()
    });
    executor.execute_scenario(&scenario, &mut sandbox).unwrap()
}

#[test]
fn test_all_bundled_scenarios_pass() {
    let dir = tempfile::tempdir().unwrap();
    let mut count = 0;
    for entry in std::fs::read_dir(scenario_dir()).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().and_then(|e| e.to_str()) != Some("ron") {
            continue;
        }
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        let report = run_file(&name, dir.path());
        assert!(
            report.passed,
            "{} failed: {:#?}",
            name, report.verification_failures
        );
        count += 1;
    }
    assert!(count >= 4);
}

#[test]
fn test_sand_drop_report() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_file("sand_drop.ron", dir.path());
    assert_eq!(report.ticks_executed, 3);
    assert_eq!(report.frames_executed, 1);
    assert!(report.log.iter().any(|l| l.contains("row 2")));

    let path = dir.path().join("report.json");
    report.save_json(&path).unwrap();
    let loaded = ExecutionReport::from_json(&path).unwrap();
    assert_eq!(loaded.scenario_name, "Sand drop");
    assert!(loaded.passed);
}

#[test]
fn test_snapshot_action_writes_png() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_file("brush_disc.ron", dir.path());
    assert_eq!(report.snapshots.len(), 1);

    let img = image::open(dir.path().join("brush_disc.png"))
        .unwrap()
        .to_rgba8();
    // 12x12 cells at the default 2 px per cell
    assert_eq!(img.dimensions(), (24, 24));
    assert_eq!(img.get_pixel(12, 12).0, [128, 128, 128, 255]);
    assert_eq!(img.get_pixel(8, 8).0, [0, 0, 0, 255]);
}

#[test]
fn test_clear_and_refill_runs_about_a_second() {
    let dir = tempfile::tempdir().unwrap();
    let report = run_file("clear_and_refill.ron", dir.path());
    // 1.0 s of 16 ms frames at 64 Hz; float rounding may shift the count by one
    assert!((63..=65).contains(&report.ticks_executed));
}
