//! Request handlers for `/parse` and `/health`

use std::panic::AssertUnwindSafe;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::error::{ApiError, ApiResult, MSG_MISSING_QUERY, MSG_NOT_JSON};
use super::state::AppState;
use crate::query_processor::ExtractionResult;
use crate::utils::{query_fingerprint, safe_truncate};

pub const HEALTH_MESSAGE: &str = "月子中心查询API服务运行正常";

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub timestamp: String,
    pub uptime_secs: u64,
}

pub fn health_report(state: &AppState) -> HealthResponse {
    HealthResponse {
        status: "healthy",
        message: HEALTH_MESSAGE,
        timestamp: chrono::Utc::now().to_rfc3339(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    }
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(health_report(&state))
}

/// Pulls a non-empty `query` string out of a request body.
pub fn query_from_body(body: &Value) -> ApiResult<&str> {
    let object = match body {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(ApiError::BadRequest(MSG_NOT_JSON)),
    };

    match object.get("query") {
        Some(Value::String(q)) if !q.is_empty() => Ok(q),
        _ => Err(ApiError::BadRequest(MSG_MISSING_QUERY)),
    }
}

pub async fn parse_query(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ExtractionResult>> {
    let Json(body) = payload.map_err(|rejection| {
        debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(MSG_NOT_JSON)
    })?;
    let query = query_from_body(&body)?;

    let request_id = Uuid::new_v4();
    debug!(%request_id, "Query preview: '{}'", safe_truncate(query, 50));

    let outcome = AssertUnwindSafe(state.parser.extract(query))
        .catch_unwind()
        .await;

    match outcome {
        Ok(result) => {
            info!(
                %request_id,
                fingerprint = %query_fingerprint(query),
                keywords = result.has_keywords(),
                price = result.price.is_some(),
                "Parsed query"
            );
            Ok(Json(result))
        }
        Err(panic) => {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(%request_id, "Extraction failed: {}", detail);
            Err(ApiError::Internal(detail))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_from_body() {
        assert_eq!(query_from_body(&json!({"query": "超过10万"})).unwrap(), "超过10万");
    }

    #[test]
    fn test_empty_body_is_not_json() {
        for body in [json!({}), json!(null), json!([1, 2])] {
            let err = query_from_body(&body).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(MSG_NOT_JSON)));
        }
    }

    #[test]
    fn test_missing_or_empty_query() {
        for body in [json!({"q": "x"}), json!({"query": ""}), json!({"query": 5}), json!({"query": null})] {
            let err = query_from_body(&body).unwrap_err();
            assert!(matches!(err, ApiError::BadRequest(MSG_MISSING_QUERY)));
        }
    }
}
