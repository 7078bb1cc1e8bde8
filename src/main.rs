use nginx_watcher::config::WatcherConfig;
use nginx_watcher::monitoring::AccessLogWatcher;
use nginx_watcher::shutdown::shutdown_signal;
use nginx_watcher::utils::init_logging;

#[tokio::main]
async fn main() {
    // 1. Load environment variables
    dotenvy::dotenv().ok();

    // 2. Initialize logging (guard must outlive the watcher)
    let _guard = init_logging();

    // 3. Load configuration
    let config = match WatcherConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!(
        log_file = %config.log_file.display(),
        window_size = config.window_size,
        error_rate_threshold = config.error_rate_threshold,
        alert_cooldown_secs = config.alert_cooldown_secs,
        maintenance_mode = config.maintenance_mode,
        webhook_configured = !config.slack_webhook_url.is_empty(),
        "Starting nginx log watcher"
    );

    // 4. Watch until a shutdown signal arrives
    let mut watcher = AccessLogWatcher::new(&config);

    tokio::select! {
        _ = watcher.run() => {},
        _ = shutdown_signal() => {
            tracing::info!("Shutting down");
        }
    }
}
