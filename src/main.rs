#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

use courier_server::api::MgmtState;
use courier_server::config::Config;
use courier_server::{AppBuilder, storage, telemetry};
use std::net::SocketAddr;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    courier_server::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app, shutdown_rx) = async {
        // Phase 1: Infrastructure Setup
        let pool = storage::init_pool(&config.database).await?;
        courier_server::run_migrations(&pool).await?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        courier_server::spawn_signal_handler(shutdown_tx);

        // Phase 2: Component Wiring
        let app = AppBuilder::new(config.clone()).with_database(pool).build()?;

        // Phase 3: Listeners and Routers
        let app_router = courier_server::api::app_router(app.services);
        let mgmt_app = courier_server::api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        Ok::<_, anyhow::Error>((api_listener, mgmt_listener, app_router, mgmt_app, shutdown_rx))
    }
    .instrument(boot_span)
    .await?;

    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router).with_graceful_shutdown(async move {
        let _ = api_rx.wait_for(|&s| s).await;
    });

    let mut mgmt_rx = shutdown_rx.clone();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app).with_graceful_shutdown(async move {
        let _ = mgmt_rx.wait_for(|&s| s).await;
    });

    let servers = async { tokio::try_join!(api_server, mgmt_server) };
    tokio::pin!(servers);

    let mut signal_rx = shutdown_rx;
    let shutdown_requested = async move {
        let _ = signal_rx.wait_for(|&s| s).await;
    };

    let result = tokio::select! {
        result = &mut servers => Some(result),
        () = shutdown_requested => {
            // Give in-flight requests a bounded window to drain.
            let timeout = std::time::Duration::from_secs(config.server.shutdown_timeout_secs);
            tokio::time::timeout(timeout, &mut servers).await.ok()
        }
    };

    match result {
        Some(Ok(_)) => tracing::info!("Servers stopped"),
        Some(Err(e)) => tracing::error!(error = %e, "Server error"),
        None => tracing::warn!("Timeout waiting for in-flight requests to finish."),
    }

    telemetry_guard.shutdown();
    Ok(())
}
