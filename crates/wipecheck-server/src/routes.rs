use actix_web::{get, post, web, HttpRequest, HttpResponse};
use alloy::providers::Provider;
use serde::Deserialize;
use wipecheck::{security, GateError, ProfileSubmission, ReportOutcome};

use crate::error::ApiError;
use crate::lookup::{LookupResult, SearchRequest};
use crate::metrics;
use crate::state::AppState;

/// Query parameters for report retrieval. `sig` is the optional on-chain
/// proof of payment (transaction hash).
#[derive(Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "checkId")]
    pub check_id: Option<String>,
    pub sig: Option<String>,
}

fn status_label(err: &GateError) -> &'static str {
    match err {
        GateError::InvalidRequest(_) => "400",
        GateError::NotFound(_) => "404",
        GateError::Internal(_) => "500",
    }
}

#[post("/api/check")]
pub async fn submit_check(
    state: web::Data<AppState>,
    body: web::Json<ProfileSubmission>,
) -> Result<HttpResponse, ApiError> {
    let (_, challenge) = state.gate.submit_profile(body.into_inner()).map_err(|e| {
        metrics::REQUESTS
            .with_label_values(&["POST /api/check", status_label(&e)])
            .inc();
        e
    })?;

    metrics::REQUESTS
        .with_label_values(&["POST /api/check", "402"])
        .inc();

    // 402 here is the success path for submission: it carries the challenge
    // the client must satisfy before fetching the report.
    Ok(HttpResponse::PaymentRequired()
        .insert_header(("X-402-Payment-Required", "true"))
        .json(challenge))
}

#[get("/api/check")]
pub async fn fetch_report(
    state: web::Data<AppState>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, ApiError> {
    let id = match query.check_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => {
            metrics::REQUESTS
                .with_label_values(&["GET /api/check", "400"])
                .inc();
            return Err(ApiError::InvalidRequest("checkId required".to_string()));
        }
    };

    let start = std::time::Instant::now();
    let outcome = state
        .gate
        .get_report(id, query.sig.as_deref())
        .await
        .map_err(|e| {
            metrics::REQUESTS
                .with_label_values(&["GET /api/check", status_label(&e)])
                .inc();
            e
        })?;
    let elapsed = start.elapsed().as_secs_f64();

    match outcome {
        ReportOutcome::Ready(report) => {
            metrics::REQUESTS
                .with_label_values(&["GET /api/check", "200"])
                .inc();
            metrics::REPORT_LATENCY
                .with_label_values(&["200"])
                .observe(elapsed);
            Ok(HttpResponse::Ok().json(report))
        }
        ReportOutcome::PaymentRequired(challenge) => {
            metrics::REQUESTS
                .with_label_values(&["GET /api/check", "402"])
                .inc();
            metrics::REPORT_LATENCY
                .with_label_values(&["402"])
                .observe(elapsed);
            Ok(HttpResponse::PaymentRequired()
                .insert_header(("X-402-Payment-Required", "true"))
                .json(challenge))
        }
    }
}

#[post("/api/search")]
pub async fn search_profile(
    state: web::Data<AppState>,
    body: web::Json<SearchRequest>,
) -> Result<HttpResponse, ApiError> {
    let req = body.into_inner();
    let blank = |f: &Option<String>| f.as_deref().map_or(true, |s| s.trim().is_empty());
    if blank(&req.handle) && blank(&req.name) {
        metrics::SEARCH_REQUESTS
            .with_label_values(&["invalid"])
            .inc();
        return Err(ApiError::InvalidRequest(
            "handle or name required".to_string(),
        ));
    }

    match state.lookup.search(&req).await {
        LookupResult::Found(profile) => {
            metrics::SEARCH_REQUESTS.with_label_values(&["found"]).inc();
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "found": true,
                "profile": profile,
            })))
        }
        LookupResult::NotFound => {
            metrics::SEARCH_REQUESTS.with_label_values(&["miss"]).inc();
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "found": false,
                "message": "No public profile found for that handle",
            })))
        }
    }
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.provider.get_block_number().await {
        Ok(block) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "wipecheck-server",
            "latestBlock": block.to_string(),
        })),
        Err(e) => {
            tracing::error!(error = %e, "health check: RPC unreachable");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "degraded",
                "service": "wipecheck-server",
                "error": "RPC unreachable",
            }))
        }
    }
}

#[get("/metrics")]
pub async fn metrics_endpoint(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    match &state.metrics_token {
        Some(token) => {
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| security::constant_time_eq(t.as_bytes(), token))
                .unwrap_or(false);

            if !authorized {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "error": "unauthorized",
                    "message": "Valid Bearer token required for /metrics"
                }));
            }
        }
        None => {
            // No token configured — metrics stay protected unless explicitly
            // opted into public access at startup.
            if !state.public_metrics {
                return HttpResponse::Forbidden().json(serde_json::json!({
                    "error": "forbidden",
                    "message": "Set METRICS_TOKEN or WIPECHECK_PUBLIC_METRICS=true to access /metrics"
                }));
            }
        }
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}
