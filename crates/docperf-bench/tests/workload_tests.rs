//! Runs the registered battery end to end at a reduced scale against the
//! checked-in fixtures.

use docperf_bench::workloads::{
    BulkInsertWorkload, DocumentSize, FindManyWorkload, InsertOneWorkload,
};
use docperf_bench::{FixtureError, WorkloadConfig, create_workloads, workload_names};
use docperf_core::{Context, ManualTimer, PerfTest, Runner, TestFilter};
use std::path::PathBuf;
use tempfile::TempDir;

const NUM_DOCS: usize = 20;
const ITERATIONS: usize = 3;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../performance-testdata")
}

fn small_config() -> WorkloadConfig {
    WorkloadConfig::new(data_dir(), NUM_DOCS)
}

fn run(config: &WorkloadConfig, filter: &TestFilter) -> anyhow::Result<(usize, String)> {
    let tests = create_workloads(config);
    let runner = Runner::new().with_iterations(ITERATIONS);
    let mut out = Vec::new();
    let reports = runner.run(&tests, filter, &mut out)?;
    Ok((reports.len(), String::from_utf8(out)?))
}

#[test]
fn test_full_battery_reports_every_workload_in_order() {
    let (count, output) = run(&small_config(), &TestFilter::all()).unwrap();

    assert_eq!(count, workload_names().len());
    let names: Vec<&str> = output
        .lines()
        .map(|line| line.split(',').next().unwrap().trim_start())
        .collect();
    assert_eq!(names, workload_names());

    for line in output.lines() {
        let (name, median) = line.rsplit_once(", ").unwrap();
        assert!(name.len() >= 25, "name column not padded: {line:?}");
        let median: f64 = median.parse().unwrap();
        assert!(median >= 0.0);
        let (_, decimals) = line.rsplit_once('.').unwrap();
        assert_eq!(decimals.len(), 6, "expected six decimals: {line:?}");
    }
}

#[test]
fn test_filtered_run_prints_single_line() {
    let filter = TestFilter::new(["find-one-by-id"]);
    let (count, output) = run(&small_config(), &filter).unwrap();

    assert_eq!(count, 1);
    assert_eq!(output.lines().count(), 1);
    assert!(output.starts_with("           find-one-by-id, "));
}

#[test]
fn test_missing_fixture_is_fatal_and_names_path() {
    let empty = TempDir::new().unwrap();
    let config = WorkloadConfig::new(empty.path(), NUM_DOCS);

    let err = run(&config, &TestFilter::all()).unwrap_err();

    let fixture = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<FixtureError>())
        .expect("fixture error in chain");
    assert!(matches!(fixture, FixtureError::Open { .. }));
    assert!(fixture.path().ends_with("flat_bson.json"));
    assert!(format!("{err:#}").contains("flat-encode"));
}

#[test]
fn test_driver_workloads_do_not_need_codec_fixtures() {
    let dir = TempDir::new().unwrap();
    std::fs::copy(data_dir().join("tweet.json"), dir.path().join("tweet.json")).unwrap();
    let config = WorkloadConfig::new(dir.path(), NUM_DOCS);

    let filter = TestFilter::new(["run-command", "find-many-and-empty-cursor"]);
    let (count, _) = run(&config, &filter).unwrap();
    assert_eq!(count, 2);
}

// =============================================================================
// Individual lifecycles
// =============================================================================

#[test]
fn test_insert_one_lifecycle_repeats() {
    let workload = InsertOneWorkload::new(DocumentSize::Small, small_config());
    let mut ctx = Context::zeroed(workload.context_size());

    workload.setup(&mut ctx).unwrap();
    for _ in 0..3 {
        workload.before(&mut ctx).unwrap();
        workload.task(&mut ctx).unwrap();
        workload.after(&mut ctx).unwrap();
    }
    workload.teardown(&mut ctx).unwrap();

    assert_eq!(workload.name(), "small-doc-insert-one");
    assert!(ctx.has_state());
}

#[test]
fn test_manual_clock_reports_zero_for_instant_tasks() {
    let tests = create_workloads(&small_config());
    let runner = Runner::with_timer(ManualTimer::new()).with_iterations(ITERATIONS);
    let mut out = Vec::new();
    runner
        .run(&tests, &TestFilter::new(["small-doc-insert-one"]), &mut out)
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "     small-doc-insert-one, 0.000000\n"
    );
}

#[test]
fn test_large_bulk_insert_uses_scaled_count() {
    let config = WorkloadConfig::new(data_dir(), 3000);
    let workload = BulkInsertWorkload::new(DocumentSize::Large, config.clone());
    let mut ctx = Context::zeroed(0);

    workload.setup(&mut ctx).unwrap();
    workload.before(&mut ctx).unwrap();
    workload.task(&mut ctx).unwrap();

    assert_eq!(DocumentSize::Large.count(&config), 3);
    assert_eq!(workload.name(), "large-doc-bulk-insert");
}

#[test]
fn test_find_many_fails_without_setup() {
    let workload = FindManyWorkload::new(small_config());
    let mut ctx = Context::zeroed(0);

    let err = workload.task(&mut ctx).unwrap_err();
    assert!(err.to_string().contains("DocumentStore"), "got: {err}");
}
