//! Route table

use axum::{
    Router,
    routing::{get, post},
};

use super::handlers;
use super::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/parse", post(handlers::parse_query))
        .route("/health", get(handlers::health_check))
}

pub fn app(state: AppState) -> Router {
    api_routes().with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_processor::QueryParser;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_app() -> Router {
        app(AppState::new(Arc::new(QueryParser::with_builtin_lexicon())))
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = test_app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/parse")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_parse_success() {
        let (status, body) = send(post_json(r#"{"query": "鼓楼区 爱帝宫 高档 专业 3万-5万"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["范围"], json!(["鼓楼区"]));
        assert_eq!(body["地址"], json!(["鼓楼区"]));
        assert_eq!(body["品牌"], json!(["爱帝宫"]));
        assert_eq!(body["分店"], json!([]));
        assert_eq!(body["价格"], json!({"min": 30000, "max": 50000}));
        assert_eq!(body["价格条件"], json!("range"));
        assert_eq!(body["语义扩展"]["品牌扩展"], json!([]));
        assert_eq!(body["句向量"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_missing_query_is_client_error() {
        let (status, body) = send(post_json(r#"{"text": "超过10万"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "未提供查询内容，请传入 'query'"}));
    }

    #[tokio::test]
    async fn test_empty_query_is_client_error() {
        let (status, _) = send(post_json(r#"{"query": ""}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_client_error() {
        let (status, body) = send(post_json("{query: ")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "请求体必须是JSON格式"}));
    }

    #[tokio::test]
    async fn test_wrong_content_type_is_client_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/parse")
            .body(Body::from(r#"{"query": "高档"}"#))
            .unwrap();
        let (status, _) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("healthy"));
        assert_eq!(body["message"], json!("月子中心查询API服务运行正常"));
        assert!(body["timestamp"].is_string());
    }
}
