use crate::cli::ServeArgs;
use crate::infra::{cors_layer, AppState};
use crate::routes::with_recommendation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use flatwise::catalog::{CatalogLoader, CatalogStore};
use flatwise::config::AppConfig;
use flatwise::error::AppError;
use flatwise::recommend::RecommendationService;
use flatwise::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(catalog) = args.catalog.take() {
        config.catalog.path = catalog;
    }

    telemetry::init(&config.telemetry)?;

    let store = Arc::new(CatalogStore::new());
    match CatalogLoader::from_path(&config.catalog.path) {
        Ok(snapshot) => {
            store.install(snapshot);
        }
        // keep serving so the catalog can be fixed and reloaded without a restart
        Err(err) => warn!(
            path = %config.catalog.path.display(),
            error = %err,
            "catalog not loaded; recommendations unavailable until reload"
        ),
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        store: store.clone(),
    };

    let service = Arc::new(
        RecommendationService::new(store, config.catalog.page_size)
            .with_catalog_path(config.catalog.path.clone()),
    );

    let app = with_recommendation_routes(service)
        .layer(Extension(app_state))
        .layer(cors_layer(&config.server))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        page_size = config.catalog.page_size,
        "flat recommendation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
