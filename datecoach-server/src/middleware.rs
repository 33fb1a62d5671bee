use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use datecoach_ratelimit::{RateLimitConfig, RateLimitResult};

use crate::client_ip::client_ip;
use crate::state::AppState;

const RATE_LIMITED_MESSAGE: &str = "Te veel verzoeken. Probeer het over een moment opnieuw.";

fn is_limited(path: &str) -> bool {
    path.starts_with("/api/") && path != "/api/health"
}

pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !is_limited(&path) {
        return next.run(request).await;
    }

    let config = RateLimitConfig::for_path(&path);
    let identifier = config.identifier(&client_ip(request.headers()));
    let result = state.limiter.check(&identifier, &config).await;

    let mut response = if result.success {
        next.run(request).await
    } else {
        let retry_after = result.retry_after.unwrap_or(1);
        let mut rejected = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": RATE_LIMITED_MESSAGE, "retryAfter": retry_after })),
        )
            .into_response();
        rejected
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        rejected
    };

    apply_headers(&mut response, &result);
    response
}

fn apply_headers(response: &mut Response, result: &RateLimitResult) {
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(result.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(result.remaining));
    headers.insert("x-ratelimit-reset", HeaderValue::from(result.reset_secs()));
}

#[cfg(test)]
mod tests {
    use super::is_limited;

    #[test]
    fn health_and_non_api_paths_are_not_limited() {
        assert!(is_limited("/api/chatbot"));
        assert!(is_limited("/api/chatbot/knowledge-base"));
        assert!(!is_limited("/api/health"));
        assert!(!is_limited("/"));
    }
}
