use anyhow::{Context, Result};
use claims_etl::{config::PipelineConfig, process};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    // stdout is reserved for the completion line
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) run the pipeline ─────────────────────────────────────────
    let config = PipelineConfig::default();
    let report = process::run(&config)
        .with_context(|| format!("claims ETL failed for {}", config.input.display()))?;
    info!(
        rows_loaded = report.rows_loaded,
        rows_paid = report.rows_paid,
        groups = report.groups_written,
        "all done"
    );

    println!("{}", report.completion_line());
    Ok(())
}
