//! StatsD metrics emission.
//!
//! Metrics are best-effort: a missing or failing sink degrades to a no-op
//! and logs a warning, never an error surfaced to callers.

use crate::config::Config;
use cadence::{BufferedUdpMetricSink, Counted, CountedExt, QueuingMetricSink, StatsdClient};
use once_cell::sync::OnceCell;
use std::net::UdpSocket;
use std::sync::Arc;
use tracing::{info, warn};

static METRICS_CLIENT: OnceCell<StatsdClientWrapper> = OnceCell::new();

/// Wrapper for StatsdClient that degrades to a no-op when disabled.
#[derive(Clone)]
pub struct StatsdClientWrapper {
    client: Option<Arc<StatsdClient>>,
}

impl StatsdClientWrapper {
    fn disabled() -> Self {
        Self { client: None }
    }

    /// Increment a counter by one.
    pub fn incr(&self, key: &str) {
        if let Some(client) = &self.client {
            if let Err(e) = client.incr(key) {
                warn!("Failed to send metric {}: {}", key, e);
            }
        }
    }

    /// Increment a counter by `value`.
    pub fn count(&self, key: &str, value: u64) {
        if let Some(client) = &self.client {
            if let Err(e) = client.count(key, value as i64) {
                warn!("Failed to send metric {}: {}", key, e);
            }
        }
    }
}

/// Initialize the process-wide metrics client from configuration.
pub fn setup_metrics(config: &Config) {
    let wrapper = if config.statsd.enabled {
        match build_client(config) {
            Ok(client) => {
                info!("StatsD metrics enabled, sink {}", config.statsd.addr);
                StatsdClientWrapper { client: Some(Arc::new(client)) }
            },
            Err(e) => {
                warn!("Failed to set up StatsD metrics, continuing without: {}", e);
                StatsdClientWrapper::disabled()
            },
        }
    } else {
        StatsdClientWrapper::disabled()
    };

    let _ = METRICS_CLIENT.set(wrapper);
}

/// Process-wide metrics client; a no-op sink before setup.
pub fn client() -> StatsdClientWrapper {
    METRICS_CLIENT.get_or_init(StatsdClientWrapper::disabled).clone()
}

fn build_client(config: &Config) -> color_eyre::Result<StatsdClient> {
    let socket = UdpSocket::bind("0.0.0.0:0")?;
    socket.set_nonblocking(true)?;
    let sink = BufferedUdpMetricSink::from(config.statsd.addr.as_str(), socket)?;
    let sink = QueuingMetricSink::from(sink);
    Ok(StatsdClient::from_sink(&config.statsd.prefix, sink))
}
