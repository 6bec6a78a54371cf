use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lana_api::background;
use lana_api::config::ServerConfig;
use lana_api::router::build_app_router;
use lana_api::state::AppState;
use lana_core::clock::{Clock, SystemClock};
use lana_core::content::SiteContent;
use lana_core::dates::malformed_intervals;
use lana_core::rate_limit::RateLimiter;
use lana_core::sections::InMemorySectionStore;
use lana_delivery::{DisabledMailer, EmailConfig, InquiryMailer, SmtpMailer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "lana_api=debug,lana_delivery=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Static content ---
    let raw = std::fs::read_to_string(&config.content_path).unwrap_or_else(|e| {
        panic!("Failed to read content file '{}': {e}", config.content_path)
    });
    let content = SiteContent::from_json_str(&raw).expect("Failed to parse content file");
    for interval in malformed_intervals(&content.availability) {
        tracing::warn!(
            start = %interval.start_iso,
            end = %interval.end_iso,
            "Ignoring malformed booked interval"
        );
    }
    tracing::info!(
        path = %config.content_path,
        intervals = content.availability.len(),
        gallery = content.gallery.len(),
        "Site content loaded"
    );

    // --- Mailer ---
    let mailer: Arc<dyn InquiryMailer> = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(
                smtp_host = %email_config.smtp_host,
                smtp_port = email_config.smtp_port,
                "SMTP delivery configured"
            );
            Arc::new(SmtpMailer::new(email_config).expect("Invalid SMTP configuration"))
        }
        None => {
            tracing::warn!("SMTP_HOST or INQUIRY_TO not set, inquiries will fail to send");
            Arc::new(DisabledMailer)
        }
    };

    // --- Clock, rate limiter, sections ---
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let rate_limiter = RateLimiter::in_memory(config.rate_limit);
    let sections = Arc::new(InMemorySectionStore::seeded(
        content.sections.clone(),
        clock.now(),
    ));
    if config.dashboard_token.is_none() {
        tracing::info!("DASHBOARD_TOKEN not set, section editing disabled");
    }

    // --- Background jobs ---
    let cancel = tokio_util::sync::CancellationToken::new();
    let sweep_handle = tokio::spawn(background::rate_limit_sweep::run(
        rate_limiter.clone(),
        config.rate_limit_sweep_interval,
        cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        content: Arc::new(content),
        rate_limiter,
        mailer,
        sections,
        clock,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), sweep_handle).await;
    tracing::info!("Rate limit sweep stopped");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
