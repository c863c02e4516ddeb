//! Expiry sweeper entry point
//!
//! Runs daily at `SWEEPER_RUN_AT_HOUR` (UTC) against the same store the API
//! uses. With `SWEEPER_RUN_ONCE=true` it sweeps once and exits, for use from
//! an external scheduler.
//!
//! ```bash
//! cargo run -p scheduler-sweeper
//! ```

use scheduler_common::{shutdown_signal, try_init_tracing, AppConfig};
use scheduler_service::{build_context, ExpirySweeper, SweepSchedule};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Expiry sweeper failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    let schedule = SweepSchedule::from(&config.sweeper);
    info!(
        env = ?config.app.env,
        store = ?config.store.backend,
        run_at_hour = schedule.run_at_hour,
        run_once = schedule.run_once,
        "Configuration loaded"
    );

    let ctx = build_context(&config).await?;
    ExpirySweeper::new(ctx).run(schedule, shutdown_signal()).await?;

    Ok(())
}
