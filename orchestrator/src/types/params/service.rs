use std::time::Duration;

use crate::cli::service::ServiceCliArgs;

#[derive(Debug, Clone)]
pub struct ServiceParams {
    /// Events each stage worker handles concurrently
    pub max_concurrent_events: usize,
    pub graceful_shutdown_timeout: Duration,
}

impl From<ServiceCliArgs> for ServiceParams {
    fn from(args: ServiceCliArgs) -> Self {
        Self {
            max_concurrent_events: args.max_concurrent_events,
            graceful_shutdown_timeout: Duration::from_secs(args.graceful_shutdown_timeout),
        }
    }
}

impl Default for ServiceParams {
    fn default() -> Self {
        Self { max_concurrent_events: 10, graceful_shutdown_timeout: Duration::from_secs(120) }
    }
}
