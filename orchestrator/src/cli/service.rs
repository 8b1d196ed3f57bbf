use clap::Args;

fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(value)
}

#[derive(Debug, Clone, Args)]
pub struct ServiceCliArgs {
    /// The maximum number of events each stage worker handles concurrently. Must be greater than 0.
    #[arg(env = "LOCALIZATION_MAX_CONCURRENT_EVENTS", long, default_value = "10", value_parser = parse_positive_usize)]
    pub max_concurrent_events: usize,

    /// Seconds to wait for in-flight events to finish after a shutdown signal.
    #[arg(env = "LOCALIZATION_GRACEFUL_SHUTDOWN_TIMEOUT", long, default_value = "120")]
    pub graceful_shutdown_timeout: u64,

    /// Long-poll wait of each queue receive, in seconds (0 to 20).
    #[arg(env = "LOCALIZATION_QUEUE_WAIT_TIME", long, default_value = "20", value_parser = clap::value_parser!(i32).range(0..=20))]
    pub queue_wait_time: i32,
}
