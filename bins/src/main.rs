use eyre::Context;
use ledger::Ledger;
use log::{info, warn};
use model::period::Period;
use reporter::Reporter;

const DEFAULT_LOG_FILTER: &str = "info";

/// Filter directives for the logger. Without `RUST_LOG` the rendered blocks
/// are still echoed, they are logged at info level.
fn log_filter(rust_log: Option<String>) -> String {
    rust_log
        .map(|filter| filter.trim().to_string())
        .filter(|filter| !filter.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn period_from_args() -> Period {
    match std::env::args().nth(1) {
        Some(arg) => arg.trim().parse().unwrap_or_else(|_| {
            warn!("Unknown mode {:?}, running daily report", arg);
            Period::Daily
        }),
        None => Period::Daily,
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let env = env::Env::load().context("Failed to load config")?;
    pretty_env_logger::formatted_builder()
        .parse_filters(&log_filter(std::env::var("RUST_LOG").ok()))
        .init();
    color_eyre::install()?;

    let period = period_from_args();
    // no pool to close if this fails
    let notifier = notifier::from_env(&env)?;
    info!("reports go to {}", notifier.name());
    info!("connecting to mysql");
    let storage = storage::Storage::new(&env)
        .await
        .context("Failed to create storage")?;
    let reporter = Reporter::new(Ledger::new(storage.clone()), notifier, env.tg_delay());

    let today = time::local_today(env.timezone());
    let result = reporter.run(period, today).await;
    storage.close().await;

    let delivery = result.context("Failed to build report")?;
    info!(
        "{} report done: {}/{} blocks delivered",
        period.as_ref(),
        delivery.delivered,
        delivery.blocks
    );
    Ok(())
}
