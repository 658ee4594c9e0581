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

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::api::ServiceContainer;
use crate::config::Config;
use crate::services::auth_service::AuthService;
use crate::services::health_service::HealthService;
use crate::services::message_service::MessageService;
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;
use crate::storage::{DbPool, MessageStore, UserStore};
use std::sync::Arc;
use tokio::sync::watch;

/// Wired application components, ready to be mounted on routers.
#[derive(Debug)]
pub struct App {
    pub services: ServiceContainer,
    pub health_service: HealthService,
}

#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    message_store: Option<Arc<dyn MessageStore>>,
    user_store: Option<Arc<dyn UserStore>>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, message_store: None, user_store: None }
    }

    /// Backs both stores with Postgres.
    #[must_use]
    pub fn with_database(self, pool: DbPool) -> Self {
        self.with_stores(Arc::new(MessageRepository::new(pool.clone())), Arc::new(UserRepository::new(pool)))
    }

    #[must_use]
    pub fn with_stores(mut self, message_store: Arc<dyn MessageStore>, user_store: Arc<dyn UserStore>) -> Self {
        self.message_store = Some(message_store);
        self.user_store = Some(user_store);
        self
    }

    /// # Errors
    /// Returns an error if no stores were provided.
    pub fn build(self) -> anyhow::Result<App> {
        let message_store = self.message_store.ok_or_else(|| anyhow::anyhow!("message store is required"))?;
        let user_store = self.user_store.ok_or_else(|| anyhow::anyhow!("user store is required"))?;

        let auth_service = AuthService::new(self.config.auth.clone(), user_store);
        let message_service = MessageService::new(Arc::clone(&message_store));
        let health_service = HealthService::new(message_store, self.config.health);

        Ok(App { services: ServiceContainer { auth_service, message_service }, health_service })
    }
}

/// Applies pending schema migrations.
///
/// # Errors
/// Returns an error if a migration fails.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Routes panics through `tracing` so they reach the configured log sink.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();

        tracing::error!(panic.payload = %payload, panic.location = %location, "Thread panicked");
    }));
}

/// Flips `shutdown_tx` to `true` on Ctrl-C or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
