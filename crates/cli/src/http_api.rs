use crate::engine::Generator;
use axum::{
    body::Bytes,
    extract::Query,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use codecracker_hints::{HintError, HintRequest, HintResult};
use codecracker_protocol::{
    serialize_json, ErrorEnvelope, GenerateHintsQuery, GenerateHintsRequest,
    GenerateHintsResponse, HealthResponse, ERROR_INTERNAL, ERROR_INVALID_REQUEST,
};
use codecracker_vector_store::SharedSimilarityCache;
use serde::Serialize;
use std::error::Error as _;
use std::sync::Arc;

pub(crate) struct HttpState {
    pub generator: Generator,
    pub shared_cache: Option<SharedSimilarityCache>,
}

impl HttpState {
    fn generate(&self, request: &HintRequest) -> Result<HintResult, HintError> {
        match &self.shared_cache {
            Some(cache) => self
                .generator
                .generate_with_cache(request, cache.clone())
                .map(|report| report.hints),
            None => self.generator.generate(request),
        }
    }
}

pub(crate) fn router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route(
            "/generate-hints",
            get({
                let state = state.clone();
                move |Query(query): Query<GenerateHintsQuery>| {
                    generate_hints(GenerateHintsRequest::from(query), state.clone())
                }
            })
            .post({
                let state = state.clone();
                move |body: Bytes| http_generate_hints(body, state.clone())
            }),
        )
        .route(
            "/health",
            get({
                let state = state.clone();
                move || http_health(state.clone())
            }),
        )
}

pub(crate) async fn http_generate_hints(
    body: Bytes,
    state: Arc<HttpState>,
) -> Result<Response, StatusCode> {
    match serde_json::from_slice::<GenerateHintsRequest>(&body) {
        Ok(request) => generate_hints(request, state).await,
        Err(err) => error_response(
            StatusCode::BAD_REQUEST,
            ERROR_INVALID_REQUEST,
            format!("Invalid request body: {err}"),
        ),
    }
}

pub(crate) async fn generate_hints(
    request: GenerateHintsRequest,
    state: Arc<HttpState>,
) -> Result<Response, StatusCode> {
    let request = HintRequest::from(request);
    let outcome = tokio::task::spawn_blocking(move || state.generate(&request)).await;

    match outcome {
        Ok(Ok(hints)) => build_response(StatusCode::OK, &GenerateHintsResponse::from(&hints)),
        Ok(Err(err)) if err.is_invalid_input() => {
            log::debug!("Rejected request: {err}");
            error_response(StatusCode::BAD_REQUEST, ERROR_INVALID_REQUEST, err.to_string())
        }
        Ok(Err(err)) => {
            match err.source() {
                Some(source) => log::error!("{err}: {source}"),
                None => log::error!("{err}"),
            }
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ERROR_INTERNAL,
                err.to_string(),
            )
        }
        Err(join_err) => {
            log::error!("Hint generation task failed: {join_err}");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ERROR_INTERNAL,
                "Internal error while generating hints".to_string(),
            )
        }
    }
}

pub(crate) async fn http_health(state: Arc<HttpState>) -> Result<Response, StatusCode> {
    let space = state.generator.space();
    let report = HealthResponse {
        status: "ok".to_string(),
        vocabulary: space.len(),
        dimension: space.dimension(),
        policy: state.generator.policy().name().to_string(),
    };
    build_response(StatusCode::OK, &report)
}

pub(crate) fn error_response(
    status: StatusCode,
    code: &str,
    message: String,
) -> Result<Response, StatusCode> {
    build_response(status, &ErrorEnvelope::new(code, message))
}

pub(crate) fn build_response<T: Serialize>(
    status: StatusCode,
    value: &T,
) -> Result<Response, StatusCode> {
    let body = serialize_json(value).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok((status, [(CONTENT_TYPE, "application/json")], body).into_response())
}
