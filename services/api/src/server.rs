use crate::cli::ServeArgs;
use crate::infra::{load_scorer, AppState, InMemoryContentStore};
use crate::routes::{with_service_routes, ContentState};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use content_signal::config::AppConfig;
use content_signal::error::AppError;
use content_signal::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let scorer = Arc::new(load_scorer(&config.scoring)?);
    let store = match args.seed.take() {
        Some(path) => InMemoryContentStore::from_path(&path)?,
        None => InMemoryContentStore::default(),
    };
    let content_state = ContentState::new(scorer.clone(), Arc::new(store));

    let app = with_service_routes(scorer, config.scoring.citation_limit)
        .layer(Extension(app_state))
        .layer(Extension(content_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "content signal service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
