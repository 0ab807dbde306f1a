//! Dashboard terminal entry point
//!
//! Polls the evaluation service and re-renders the dashboard as text
//! whenever the state changes. Ctrl+C tears the dashboard down.

use clap::Parser;
use shared::{Component, component_info, component_warn, logging};
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;

use dashboard::core::{SortDirection, SortField, SortState};
use dashboard::render::render_dashboard;
use dashboard::{Dashboard, DashboardConfig, DashboardError, DashboardResult, EvaluationApi, HttpEvaluationApi};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Terminal dashboard for vendor contract evaluations")]
struct Args {
    /// Evaluation service base URL (the client appends /api)
    #[arg(long)]
    api_url: Option<String>,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Auto-refresh interval in seconds
    #[arg(long)]
    refresh_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Vendor to sample mapping, VENDOR=SAMPLE (repeatable)
    #[arg(long = "sample", value_name = "VENDOR=SAMPLE")]
    samples: Vec<String>,

    /// Select this contract after the first refresh
    #[arg(long)]
    select: Option<String>,

    /// Sort column (vendor, contract, score, grade, risk, recommendation)
    #[arg(long, default_value = "score")]
    sort: SortField,

    /// Sort ascending instead of descending
    #[arg(long)]
    ascending: bool,

    /// Refresh once, render, and exit
    #[arg(long)]
    once: bool,

    /// Probe the service health endpoint and exit
    #[arg(long)]
    health: bool,

    /// Print the latest audit log entries and exit
    #[arg(long)]
    audit_log: bool,
}

fn build_config(args: &Args) -> DashboardResult<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::from_file(path)?,
        None => DashboardConfig::default(),
    };
    config.apply_env()?;

    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(secs) = args.refresh_secs {
        config.refresh_interval_secs = secs;
    }
    for sample in &args.samples {
        config.add_sample_arg(sample)?;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> DashboardResult<()> {
    let args = Args::parse();

    logging::init_tracing(Some(&args.log_level));

    let config = build_config(&args)?;
    let api = HttpEvaluationApi::from_config(&config)?;
    component_info!(Component::Cli, api = %api.base_url(), "🌐 Using evaluation service");

    if args.health {
        let health = api.health().await?;
        println!("{}", serde_json::to_string_pretty(&health)?);
        return Ok(());
    }

    if args.audit_log {
        for entry in api.fetch_audit_log(config.audit_log_limit).await? {
            println!("{}", serde_json::to_string(&entry)?);
        }
        return Ok(());
    }

    let sort = SortState::new(
        args.sort,
        if args.ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        },
    );

    let mut dashboard = Dashboard::new(api, &config);

    if args.once {
        dashboard.refresh_now().await;
        if let Some(contract_id) = &args.select {
            select_or_warn(&dashboard, contract_id).await;
        }
        println!("{}", render_dashboard(&dashboard.snapshot(), &sort));
        dashboard.teardown().await;
        return Ok(());
    }

    dashboard.init().await;
    if let Some(contract_id) = &args.select {
        let contract = dashboard.state().with(|s| s.store.get(contract_id).cloned());
        match contract {
            Some(contract) => {
                let selection = dashboard.selection().clone();
                tokio::spawn(async move {
                    selection.select(contract).await;
                });
            }
            None => warn_missing(contract_id),
        }
    }

    let mut redraw = tokio::time::interval(Duration::from_millis(500));
    let mut last_rendered = None;
    loop {
        tokio::select! {
            _ = redraw.tick() => {
                let snapshot = dashboard.snapshot();
                if last_rendered.as_ref() != Some(&snapshot) {
                    println!("{}", render_dashboard(&snapshot, &sort));
                    last_rendered = Some(snapshot);
                }
            }
            result = signal::ctrl_c() => {
                match result {
                    Ok(()) => logging::log_shutdown(Component::Cli, "Received Ctrl+C signal"),
                    Err(err) => logging::log_error(Component::Cli, "Signal handling", &err),
                }
                break;
            }
        }
    }

    dashboard.teardown().await;
    logging::log_success(Component::Cli, "Dashboard stopped gracefully");
    Ok(())
}

async fn select_or_warn<A: EvaluationApi + 'static>(dashboard: &Dashboard<A>, contract_id: &str) {
    match dashboard.select_by_id(contract_id).await {
        Ok(outcome) => component_info!(Component::Cli, "Selection outcome: {:?}", outcome),
        Err(DashboardError::NotFound { .. }) => warn_missing(contract_id),
        Err(e) => logging::log_error(Component::Cli, "Selection", &e),
    }
}

fn warn_missing(contract_id: &str) {
    component_warn!(Component::Cli, "Contract {} not found in evaluation results", contract_id);
}
