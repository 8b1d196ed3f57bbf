use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[cfg(unix)]
use signal::unix::{signal, SignalKind};

/// Signal types that can trigger shutdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM - container graceful shutdown
    Terminate,
    /// SIGINT - Ctrl+C interactive shutdown
    Interrupt,
    /// SIGQUIT - Quit signal
    Quit,
    /// Internal - a stage queue worker failed
    Internal,
}

impl std::fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Quit => write!(f, "SIGQUIT"),
            ShutdownSignal::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// Signal handler for graceful shutdown
pub struct SignalHandler {
    shutdown_signal: Option<ShutdownSignal>,
    internal_shutdown: CancellationToken,
}

impl SignalHandler {
    /// `internal_shutdown` is cancelled by the application itself when it can no longer run.
    pub fn new(internal_shutdown: CancellationToken) -> Self {
        Self { shutdown_signal: None, internal_shutdown }
    }

    /// Wait for any shutdown signal and return which one was received
    pub async fn wait_for_shutdown(&mut self) -> ShutdownSignal {
        let signal = self.wait_for_signal().await;
        self.shutdown_signal = Some(signal);
        info!("Received shutdown signal: {}", signal);
        signal
    }

    /// Get the signal that triggered shutdown (if any)
    pub fn shutdown_signal(&self) -> Option<ShutdownSignal> {
        self.shutdown_signal
    }

    #[cfg(unix)]
    async fn wait_for_signal(&self) -> ShutdownSignal {
        let (mut sigterm, mut sigint, mut sigquit) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt()), signal(SignalKind::quit())) {
                (Ok(sigterm), Ok(sigint), Ok(sigquit)) => (sigterm, sigint, sigquit),
                _ => {
                    error!("Failed to register unix signal handlers, listening for Ctrl+C only");
                    return self.wait_for_ctrl_c().await;
                }
            };

        info!("Signal handler initialized, listening for SIGTERM, SIGINT, SIGQUIT, and internal shutdown requests");

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Graceful shutdown initiated (SIGTERM)");
                ShutdownSignal::Terminate
            }
            _ = sigint.recv() => {
                info!("Interactive shutdown initiated (SIGINT/Ctrl+C)");
                ShutdownSignal::Interrupt
            }
            _ = sigquit.recv() => {
                warn!("Force quit signal received (SIGQUIT)");
                ShutdownSignal::Quit
            }
            _ = self.internal_shutdown.cancelled() => {
                warn!("Internal application shutdown requested (worker error)");
                ShutdownSignal::Internal
            }
        }
    }

    #[cfg(not(unix))]
    async fn wait_for_signal(&self) -> ShutdownSignal {
        info!("Signal handler initialized, listening for Ctrl+C and internal shutdown requests");
        self.wait_for_ctrl_c().await
    }

    async fn wait_for_ctrl_c(&self) -> ShutdownSignal {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Interactive shutdown initiated (Ctrl+C)");
                ShutdownSignal::Interrupt
            }
            _ = self.internal_shutdown.cancelled() => {
                warn!("Internal application shutdown requested (worker error)");
                ShutdownSignal::Internal
            }
        }
    }

    /// Run `shutdown_fn` within `timeout`. SIGQUIT exits the process when the timeout is exceeded.
    pub async fn handle_graceful_shutdown<F, Fut>(&self, shutdown_fn: F, timeout: Duration) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let signal = self.shutdown_signal.unwrap_or(ShutdownSignal::Interrupt);

        info!("Starting graceful shutdown (triggered by: {})", signal);
        info!("Shutdown timeout: {} seconds", timeout.as_secs());

        match tokio::time::timeout(timeout, shutdown_fn()).await {
            Ok(Ok(())) => {
                info!("Graceful shutdown completed successfully");
                Ok(())
            }
            Ok(Err(e)) => {
                error!("Graceful shutdown failed: {}", e);
                Err(e)
            }
            Err(_) => {
                error!("Graceful shutdown timed out after {} seconds", timeout.as_secs());

                match signal {
                    ShutdownSignal::Quit => {
                        warn!("SIGQUIT received - forcing immediate exit");
                        std::process::exit(1);
                    }
                    _ => {
                        warn!("Shutdown timeout reached - in-flight events are left for redelivery");
                        Err(anyhow!("Shutdown timeout exceeded"))
                    }
                }
            }
        }
    }
}
