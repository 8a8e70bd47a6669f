use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::Arc;
use study_eligibility::catalog::{CatalogLoader, CatalogStore};
use study_eligibility::config::AppConfig;
use study_eligibility::error::AppError;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    let loader = CatalogLoader::new(&config.catalog)?;
    let store = Arc::new(CatalogStore::new());
    match loader.load(&config.catalog.url).await {
        Ok(catalog) => {
            store.replace(catalog);
        }
        Err(err) => {
            // Stay up without a catalog; /ready reports initializing until a reload succeeds.
            warn!(error = %err, url = %config.catalog.url, "initial catalog load failed");
        }
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState {
        metrics: Arc::new(prometheus_handle),
        catalog: store,
        loader: Arc::new(loader),
        catalog_url: Arc::from(config.catalog.url.as_str()),
    };

    let app = routes::router()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(?config.environment, %addr, "eligibility service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
