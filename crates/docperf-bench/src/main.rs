//! docperf - document driver latency benchmarks.

// Use mimalloc for reduced allocation latency (enabled by default).
// Disable with `--no-default-features` if debugging allocator issues.
#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use docperf_bench::{cli::Cli, report::export_json, workloads::create_workloads, workload_names};
use docperf_core::Runner;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<()> {
    // A panicking hook is as fatal as a failing one: report it and abort
    // without unwinding through the remaining tests.
    std::panic::set_hook(Box::new(|info| {
        use std::io::Write;
        let mut stderr = std::io::stderr().lock();

        let _ = writeln!(stderr, "docperf: panic at {:?}", info.location());
        if let Some(s) = info.payload().downcast_ref::<&str>() {
            let _ = writeln!(stderr, "  {s}");
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            let _ = writeln!(stderr, "  {s}");
        }
        let _ = stderr.flush();

        std::process::abort();
    }));

    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries only report lines.
    // Respect RUST_LOG if set, otherwise use default based on verbose flag
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();

    if cli.list {
        for name in workload_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let config = cli.into_config().context("Invalid configuration")?;
    tracing::info!(
        "Fixtures from {}, {} iterations, {} documents per task",
        config.workload.data_dir.display(),
        config.iterations,
        config.workload.num_docs
    );

    let tests = create_workloads(&config.workload);
    let runner = Runner::new().with_iterations(config.iterations);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let reports = runner
        .run(&tests, &config.filter, &mut out)
        .context("Benchmark run aborted")?;

    if let Some(ref path) = config.json_output {
        export_json(&reports, &config, path).context("Failed to export JSON")?;
        tracing::info!("Results exported to {}", path.display());
    }

    Ok(())
}
