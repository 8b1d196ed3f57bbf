use std::sync::Arc;

use clap::Parser as _;
use dotenvy::dotenv;
use localization_orchestrator::cli::{BootstrapCmd, Cli, Commands, ReplayCmd, RunCmd};
use localization_orchestrator::core::config::Config;
use localization_orchestrator::error::event::EventSystemError;
use localization_orchestrator::setup::bootstrap;
use localization_orchestrator::utils::logging::init_logging;
use localization_orchestrator::utils::signal_handler::SignalHandler;
use localization_orchestrator::worker::{initialize_worker, replay_event};
use localization_orchestrator::{OrchestratorError, OrchestratorResult};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    if let Err(e) = init_logging() {
        panic!("Failed to initialise logging: {e}");
    }
    info!("Starting localization orchestrator");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => {
            debug!("Executing run command with args: {:?}", run_command);
            match run_orchestrator(run_command).await {
                Ok(_) => {
                    info!("Orchestrator service stopped");
                }
                Err(e) => {
                    error!(error = %e, error_chain = ?e, "Orchestrator service failed");
                    panic!("Orchestrator service failed: {}", e);
                }
            }
        }
        Commands::Bootstrap { bootstrap_command } => {
            debug!("Executing bootstrap command with args: {:?}", bootstrap_command);
            match bootstrap_image(bootstrap_command).await {
                Ok(_) => {
                    info!("Bootstrap build started successfully");
                }
                Err(e) => {
                    error!(error = %e, error_chain = ?e, "Failed to start bootstrap build");
                    panic!("Failed to start bootstrap build: {}", e);
                }
            }
        }
        Commands::Replay { replay_command } => {
            debug!("Executing replay command with args: {:?}", replay_command);
            match replay(replay_command).await {
                Ok(_) => {
                    info!("Replay completed successfully");
                }
                Err(e) => {
                    error!(error = %e, error_chain = ?e, "Replay failed");
                    panic!("Replay failed: {}", e);
                }
            }
        }
    }
}

async fn run_orchestrator(run_cmd: &RunCmd) -> OrchestratorResult<()> {
    let config = Arc::new(Config::from_run_cmd(run_cmd).await?);
    debug!("Configuration initialized");

    let shutdown_token = CancellationToken::new();
    let mut signal_handler = SignalHandler::new(shutdown_token.clone());
    let (worker_controller, workers) = initialize_worker(config.clone(), shutdown_token.clone());

    signal_handler.wait_for_shutdown().await;

    let graceful_shutdown_timeout = config.service_params().graceful_shutdown_timeout;
    signal_handler
        .handle_graceful_shutdown(
            || async move {
                worker_controller.shutdown().await?;
                workers.await.map_err(EventSystemError::from)??;
                Ok(())
            },
            graceful_shutdown_timeout,
        )
        .await
        .map_err(OrchestratorError::from)?;

    info!("Orchestrator service shutting down");
    Ok(())
}

async fn bootstrap_image(bootstrap_cmd: &BootstrapCmd) -> OrchestratorResult<()> {
    let build_id = bootstrap(bootstrap_cmd).await?;
    info!(build_id = %build_id, "Container image build started, wait for it to finish before dispatching jobs");
    Ok(())
}

async fn replay(replay_cmd: &ReplayCmd) -> OrchestratorResult<()> {
    let config = Arc::new(Config::from_run_cmd(&replay_cmd.run_command).await?);
    let outcome = replay_event(config, replay_cmd.queue, &replay_cmd.event_file).await?;
    info!(outcome = ?outcome, "Event replayed");
    Ok(())
}
