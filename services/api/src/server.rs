use crate::cli::ServeArgs;
use crate::infra::{AppState, AssetTemplateStore};
use crate::routes::{self, RenderState};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use docgen::config::AppConfig;
use docgen::error::AppError;
use docgen::telemetry;
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

    let render_state = RenderState {
        store: Arc::new(AssetTemplateStore::default()),
        default_source: config.documents.template_source,
    };

    let app = routes::router(render_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "document generation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
