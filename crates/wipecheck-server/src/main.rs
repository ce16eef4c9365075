use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};
use alloy::providers::RootProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wipecheck::{InMemoryLedger, InMemoryProfileStore, PaywallGate, RpcChainVerifier};
use wipecheck_server::config::ServerConfig;
use wipecheck_server::lookup::ProfileLookup;
use wipecheck_server::routes;
use wipecheck_server::state::AppState;

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        // Default: allow localhost on any port
        Cors::default()
            .allowed_origin_fn(|origin, _| {
                origin
                    .to_str()
                    .map(|o| o == "http://localhost" || o.starts_with("http://localhost:"))
                    .unwrap_or(false)
            })
            .allow_any_method()
            .allowed_headers(vec!["content-type", "authorization"])
            .max_age(3600)
    } else {
        let mut cors = Cors::default();
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        cors.allow_any_method()
            .allowed_headers(vec!["content-type", "authorization"])
            .max_age(3600)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let provider: RootProvider =
        RootProvider::new_http(config.chain.rpc_url.parse().expect("invalid RPC_URL"));

    let verifier =
        RpcChainVerifier::new(provider.clone()).with_timeout(config.verify_timeout);

    let gate = PaywallGate::new(
        Arc::new(InMemoryProfileStore::new()),
        Arc::new(InMemoryLedger::new()),
        verifier,
        config.chain.clone(),
    );

    let state = web::Data::new(AppState {
        gate,
        provider,
        lookup: ProfileLookup::new(config.tavily_api_key.clone()),
        metrics_token: config.metrics_token.clone(),
        public_metrics: config.public_metrics,
    });

    tracing::info!("wipecheck server listening on port {}", config.port);
    tracing::info!(
        network = %config.chain.network,
        recipient = %config.chain.recipient,
        amount_wei = %config.chain.amount_wei,
        "payment challenge configuration"
    );
    tracing::info!("Rate limit: {} req/min per IP", config.rate_limit_rpm);
    tracing::info!("  POST http://localhost:{}/api/check", config.port);
    tracing::info!("  GET  http://localhost:{}/api/check", config.port);
    tracing::info!("  POST http://localhost:{}/api/search", config.port);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(config.rate_limit_rpm)
        .finish()
        .expect("failed to build rate limiter config");

    let cors_origins = config.allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(Governor::new(&governor_conf))
            .app_data(state.clone())
            .app_data(web::JsonConfig::default().limit(65_536))
            .service(routes::submit_check)
            .service(routes::fetch_report)
            .service(routes::search_profile)
            .service(routes::health)
            .service(routes::metrics_endpoint)
    })
    .bind(("0.0.0.0", config.port))?
    .run()
    .await
}
