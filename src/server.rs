//! HTTP server initialization and runtime setup.
//!
//! Wires the email client, rate limiter and background sweeper into the
//! Axum server and runs it until a shutdown signal arrives.

use crate::application::services::RegistrationService;
use crate::config::Config;
use crate::domain::rate_limiter::RateLimiter;
use crate::domain::sweeper::run_rate_limit_sweeper;
use crate::infrastructure::email::{EmailSender, ResendClient};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Resend email client
/// - In-memory rate limiter and its periodic sweeper
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The email provider URL is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let sender: Arc<dyn EmailSender> = Arc::new(
        ResendClient::new(&config.resend_api_url).context("Invalid RESEND_API_URL")?,
    );

    let missing = config.mail.missing();
    if !missing.is_empty() {
        tracing::warn!(
            "Mail settings missing ({}); registrations will be answered with 500",
            missing.join(", ")
        );
    }

    let registration_service = Arc::new(RegistrationService::new(sender, config.mail.clone()));

    let rate_limiter = Arc::new(RateLimiter::new());
    let sweeper = tokio::spawn(run_rate_limit_sweeper(
        rate_limiter.clone(),
        config.sweep_interval(),
    ));
    tracing::info!("Rate limit sweeper started");

    let state = AppState::new(registration_service, rate_limiter);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    sweeper.abort();
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
