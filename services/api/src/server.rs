use crate::cli::ServeArgs;
use crate::infra::{build_ad_service, load_creatives, AppState};
use crate::routes::with_service_routes;
use auxilios::benefits::EligibilityCalculator;
use auxilios::config::AppConfig;
use auxilios::error::AppError;
use auxilios::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let policy = config.policy.load_table()?;
    info!(
        policy_year = policy.year,
        source = ?config.policy.file,
        "benefit policy table loaded"
    );
    let calculator = Arc::new(EligibilityCalculator::new(policy));

    let creatives = load_creatives(args.ads_csv.as_deref())?;
    info!(creatives = creatives.len(), "ad creatives loaded");
    let ad_service = build_ad_service(&config.ads, creatives);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_service_routes(calculator, ad_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "auxilios service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
