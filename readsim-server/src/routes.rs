//! HTTP surface of the service.

use axum::Json;
use axum::Router;
use axum::body::Body;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use log::{error, info};

use readsim_core::SequenceQuery;
use readsim_stream::SimulationPipeline;

use crate::consts::{OUTBOUND_CAPACITY, REGION_HEADER, SEED_HEADER};
use crate::cors::{cors_headers, preflight};
use crate::errors::ApiError;
use crate::sink;
use crate::state::AppState;

const HOME_PAGE: &str = include_str!("home.html");

pub const REFERENCES_PATH: &str = "/api/v1/references";
pub const SEQUENCES_PATH: &str = "/api/v1/sequences";

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home).options(preflight))
        .route(REFERENCES_PATH, get(references).options(preflight))
        .route(SEQUENCES_PATH, get(sequences).options(preflight))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
}

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

async fn references(State(state): State<AppState>) -> Response {
    (cors_headers(), Json(vec![state.index.summary()])).into_response()
}

async fn not_found(method: Method, headers: HeaderMap) -> Response {
    if method == Method::OPTIONS {
        return preflight(headers).await;
    }
    (
        StatusCode::NOT_FOUND,
        [(CONTENT_TYPE, "text/plain")],
        "404\n",
    )
        .into_response()
}

///
/// Validate the query, open the reference range, then stream simulated
/// reads chunk by chunk. Errors found before the first byte is sent become
/// JSON error responses; later failures abort the body.
///
async fn sequences(
    State(state): State<AppState>,
    query: Result<Query<SequenceQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadQuery(e.body_text()))?;
    let request = query.resolve(&state.index)?;

    let region = request.region.label();
    let range = request.region.byte_range();
    info!(
        "{} seed={}{} bytes={}",
        region,
        request.params.seed,
        if request.seed_generated { " (generated)" } else { "" },
        range
    );

    let source = state.source.clone();
    let upstream = tokio::task::spawn_blocking(move || source.fetch(range))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(|e| {
            error!("{}: {}", region, e);
            ApiError::from(e)
        })?;

    let (mut out, body) = sink::channel(OUTBOUND_CAPACITY);
    let label = region.clone();
    let seed = request.params.seed;
    tokio::task::spawn_blocking(move || {
        let pipeline = SimulationPipeline::new(state.simulator.as_ref(), &request.params, &label)
            .with_chunk_size(state.chunk_size);
        match pipeline.run(upstream, &mut out) {
            Ok(summary) => info!(
                "{}: {} chunks simulated, {} skipped, {} bases, {} bytes{}",
                label,
                summary.chunks_simulated,
                summary.chunks_skipped,
                summary.bases,
                summary.bytes_emitted,
                if summary.cancelled { ", cancelled" } else { "" }
            ),
            Err(e) => {
                error!("{}: {}", label, e);
                out.fail(e.to_string());
            }
        }
    });

    let mut response = (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain")],
        cors_headers(),
        Body::from_stream(body),
    )
        .into_response();
    let headers = response.headers_mut();
    headers.insert(SEED_HEADER, HeaderValue::from(seed));
    if let Ok(value) = HeaderValue::from_str(&region) {
        headers.insert(REGION_HEADER, value);
    }
    Ok(response)
}
