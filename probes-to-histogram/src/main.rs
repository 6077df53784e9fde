mod report;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use probescope_common::{
    CommonOpts,
    metrics::{
        component_info_metric, describe_counters,
        failures::{self, FailureKind},
        names::FAILURES,
    },
    tracer::{TracerEngine, TracerOptions},
};
use probescope_engine::{Scene, SceneCache, SceneDescription};
use report::Report;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tokio::{signal, time};
use tracing::{debug, error, info, warn};

// cargo run --bin probes-to-histogram -- --scene-file scene.json single
// cargo run --bin probes-to-histogram -- --scene-file scene.json --output report.json continuous --poll-ms 250

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// JSON file describing the settings, emitters and collectors
    #[clap(long, env = "PROBESCOPE_SCENE_FILE")]
    scene_file: PathBuf,

    /// File the JSON report is written to, stdout if omitted
    #[clap(long, env = "PROBESCOPE_OUTPUT")]
    output: Option<PathBuf>,

    #[clap(flatten)]
    common: CommonOpts,

    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Recompute the scene once, write the report then exit
    Single,

    /// Re-read the scene file every `poll-ms` milliseconds, writing a new report whenever it changes
    Continuous(Continuous),
}

#[derive(Debug, Parser)]
struct Continuous {
    /// Time in milliseconds between reads of the scene file
    #[clap(long, default_value = "500")]
    poll_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let _tracer = TracerEngine::new(
        TracerOptions {
            ansi: !args.common.no_ansi,
            with_target: true,
        },
        env!("CARGO_BIN_NAME"),
    )?;

    if let Some(address) = args.common.observability_address {
        PrometheusBuilder::new()
            .with_http_listener(address)
            .install()
            .with_context(|| format!("Cannot serve metrics on {address}"))?;
        info!("Serving metrics on {address}");
    }
    component_info_metric(env!("CARGO_BIN_NAME"));
    describe_counters();

    match &args.mode {
        Mode::Single => {
            let description = load_scene(&args.scene_file)?;
            let mut scene = Scene::try_from(&description)?;
            scene.recompute();
            write_report(&scene, args.output.as_deref())
        }
        Mode::Continuous(continuous) => run_continuous(&args, continuous).await,
    }
}

fn load_scene(path: &Path) -> Result<SceneDescription> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read scene file {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Cannot parse scene file {}", path.display()))
}

#[tracing::instrument(skip_all)]
fn write_report(scene: &Scene, output: Option<&Path>) -> Result<()> {
    let report = Report::new(scene, Utc::now())?;
    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Cannot write report to {}", path.display()))?;
            debug!("Report written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

async fn run_continuous(args: &Cli, continuous: &Continuous) -> Result<()> {
    let mut interval = time::interval(Duration::from_millis(continuous.poll_ms));
    let mut current: Option<(SceneDescription, Scene)> = None;
    let mut cache = SceneCache::default();

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            _ = signal::ctrl_c() => {
                info!("Interrupted, exiting");
                return Ok(());
            }
        }

        let description = match load_scene(&args.scene_file) {
            Ok(description) => description,
            Err(e) => {
                warn!("{e:#}");
                counter!(
                    FAILURES,
                    &[failures::get_label(FailureKind::SceneFileUnreadable)]
                )
                .increment(1);
                continue;
            }
        };

        if current
            .as_ref()
            .is_none_or(|(previous, _)| *previous != description)
        {
            match Scene::try_from(&description) {
                Ok(scene) => {
                    info!("Scene file changed, rebuilding");
                    current = Some((description, scene));
                    cache = SceneCache::default();
                }
                Err(e) => {
                    warn!("Invalid scene: {e}");
                    counter!(FAILURES, &[failures::get_label(FailureKind::SceneInvalid)])
                        .increment(1);
                    continue;
                }
            }
        }

        let Some((_, scene)) = current.as_mut() else {
            continue;
        };
        if cache.refresh(scene) {
            if let Err(e) = write_report(scene, args.output.as_deref()) {
                error!("{e:#}");
                counter!(
                    FAILURES,
                    &[failures::get_label(FailureKind::ReportWriteFailed)]
                )
                .increment(1);
            }
        }
    }
}
