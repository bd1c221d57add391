//! Approval relay composition root.

#![forbid(unsafe_code)]

mod bootstrap;
mod error;
mod handlers;
mod router;
mod state;

use std::sync::Arc;

use apprelay_application::{
    ContentRenderer, DirectoryLookup, RequestBuilder, SettingsProvider, StatusProcessor,
    SyncCycleService, SyncScheduler, WorkflowPlatformClient,
};
use apprelay_core::AppError;
use apprelay_infrastructure::{
    ConfigHandle, ConfigReloader, FileTemplateStore, HttpDirectoryLookup,
    HttpWorkflowPlatformClient, RelayConfig, SoapSubmissionTransport, build_http_client,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::bootstrap::RelayBootstrap;
use crate::router::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let bootstrap = RelayBootstrap::from_env()?;
    let config = ConfigHandle::new(RelayConfig::load(&bootstrap.config_path).await?);
    let snapshot = config.current();

    let http_client = build_http_client(snapshot.http.timeout())?;
    let directory: Arc<dyn DirectoryLookup> =
        Arc::new(HttpDirectoryLookup::new(http_client.clone(), config.clone()));
    let workflow_platform: Arc<dyn WorkflowPlatformClient> = Arc::new(
        HttpWorkflowPlatformClient::new(http_client.clone(), config.clone()),
    );
    let transport = Arc::new(SoapSubmissionTransport::new(http_client, config.clone()));
    let settings: Arc<dyn SettingsProvider> = Arc::new(config.clone());

    let renderer = ContentRenderer::new(Arc::new(FileTemplateStore::new(config.clone())));
    let sync_service = SyncCycleService::new(
        workflow_platform.clone(),
        directory.clone(),
        transport,
        RequestBuilder::new(renderer),
    );
    let scheduler = SyncScheduler::new(sync_service, settings.clone());
    let reloader = ConfigReloader::new(
        bootstrap.config_path.clone(),
        bootstrap.reload_interval,
        config.clone(),
    );

    let state = AppState {
        status_processor: StatusProcessor::new(directory, workflow_platform, settings),
        config: config.clone(),
    };

    let cancel = CancellationToken::new();
    let scheduler_task = tokio::spawn({
        let cancel = cancel.clone();
        async move { scheduler.run(cancel).await }
    });
    let reloader_task = tokio::spawn({
        let cancel = cancel.clone();
        async move { reloader.run(cancel).await }
    });

    let address = (snapshot.server.host.as_str(), snapshot.server.port);
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        host = %snapshot.server.host,
        port = snapshot.server.port,
        system_id = %snapshot.system.system_id,
        config_path = %bootstrap.config_path.display(),
        "approval relay listening"
    );

    let served = axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal(cancel.clone()))
        .await
        .map_err(|error| AppError::Internal(format!("approval relay server error: {error}")));

    cancel.cancel();
    for (name, task) in [("scheduler", scheduler_task), ("reloader", reloader_task)] {
        if let Err(error) = task.await {
            warn!(task = name, error = %error, "background task ended abnormally");
        }
    }

    info!("approval relay stopped");
    served
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(error = %error, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(error = %error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
        () = cancel.cancelled() => {}
    }

    info!("shutdown requested");
}
