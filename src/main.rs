use axum::http::{HeaderName, Request, Response};
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use std::{net::SocketAddr, sync::Arc, time::Duration};

use restaurant_order_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    routes::create_app,
    services::{
        catalog_service::{CatalogSource, DbCatalog, MemoryCatalog},
        dispatch::WhatsAppChannel,
        order_composer::OrderComposer,
    },
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,restaurant_order_api=debug,audit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    let catalog: Arc<dyn CatalogSource> = match &config.database_url {
        Some(database_url) => {
            let orm = create_orm_conn(database_url).await?;
            run_migrations(&orm, "migrations").await?;
            Arc::new(DbCatalog::new(orm))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, serving the sample menu");
            Arc::new(MemoryCatalog::sample_menu())
        }
    };

    let channel = Arc::new(WhatsAppChannel::new(
        config.dispatch_base_url.clone(),
        config.order_phone.clone(),
    ));
    let composer = OrderComposer::new(config.composer_settings(), channel);
    let mut state = AppState::new(catalog, composer);
    match config.admin_auth()? {
        Some(admin) => state = state.with_admin(admin),
        None => tracing::warn!("admin credentials not set, menu editing disabled"),
    }

    let concurrency_limit_layer = ConcurrencyLimitLayer::new(100);

    let request_id_header = HeaderName::from_static("x-request-id");
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<_>| {
            let request_id = request
                .headers()
                .get("x-request-id")
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %request_id
            )
        })
        .on_request(|_request: &Request<_>, _span: &tracing::Span| {
            tracing::debug!("request started");
        })
        .on_response(|response: &Response<_>, latency: Duration, _span: &tracing::Span| {
            tracing::info!(
                status = %response.status(),
                ms = %latency.as_millis(),
                "request finished"
            );
        });

    // The storefront is served from its own origin.
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_app(state)
        .layer(cors_layer)
        .layer(trace_layer)
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(RequestBodyLimitLayer::new(64 * 1024))
        .layer(concurrency_limit_layer);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!(restaurant = %config.restaurant_name, "listening on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
