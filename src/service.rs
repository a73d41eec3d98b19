use color_eyre::eyre::{self, Result};
use std::sync::Arc;
use std::time::Duration;
use timebridge::{
    config::Config,
    convert::{Converter, ConverterOptions},
    limiter::{RateLimiterConfig, SlidingWindowLimiter},
    server::{AppState, HttpServer},
    timezone::{TimezoneProvider, TzdbProvider},
};
use tracing::info;

/// Run the conversion service until shutdown.
pub async fn run_service(config: &Config) -> Result<()> {
    config.validate().map_err(|e| eyre::eyre!("Invalid configuration: {}", e))?;

    let provider: Arc<dyn TimezoneProvider> = Arc::new(TzdbProvider::new());
    if !provider.is_valid(&config.convert.default_timezone) {
        return Err(eyre::eyre!(
            "Unknown default timezone: {}",
            config.convert.default_timezone
        ));
    }

    let limiter = Arc::new(SlidingWindowLimiter::new(RateLimiterConfig {
        limit: config.rate_limit.limit,
        window_seconds: config.rate_limit.window_seconds,
        max_clients: config.rate_limit.max_clients,
    }));

    // The sweep keeps the client map bounded independent of request traffic.
    let sweep_limiter = limiter.clone();
    let sweep_interval = Duration::from_secs(config.rate_limit.sweep_interval_seconds);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweep_interval);
        ticker.tick().await; // the first tick completes immediately
        loop {
            ticker.tick().await;
            sweep_limiter.sweep();
        }
    });

    let converter = Arc::new(Converter::new(
        provider.clone(),
        ConverterOptions {
            max_input_length: config.convert.max_input_length,
            numeric_uses_caller_tz: config.convert.numeric_uses_caller_tz,
        },
    ));

    let state = AppState {
        converter,
        limiter,
        provider,
        default_timezone: config.convert.default_timezone.clone(),
    };

    info!(
        "Starting Timebridge on {}:{} (rate limit {}/{}s)",
        config.server.host,
        config.server.port,
        config.rate_limit.limit,
        config.rate_limit.window_seconds
    );

    let server = HttpServer::new(config.clone());
    server.run(state).await.map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shutdown complete");
    Ok(())
}
