//! In-process stand-in backend for gateway tests.

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Starts a backend on an ephemeral port and returns its API base URL.
///
/// - `GET  /api/careers/` → 200 JSON list
/// - `POST /api/auth/login/` → 401 JSON error
/// - `GET  /api/skills/` → 502 plain text
/// - `POST /api/profile/` → 200 echo of Authorization header and body
/// - `GET  /api/recommendations/` → 200 with a non-JSON body
pub async fn spawn_backend() -> String {
    let app = Router::new()
        .route(
            "/api/careers/",
            get(|| async { Json(json!([{ "id": "remote-1" }])) }),
        )
        .route(
            "/api/auth/login/",
            post(|| async {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "bad credentials" })),
                )
            }),
        )
        .route(
            "/api/skills/",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        )
        .route(
            "/api/profile/",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "authorization": auth, "body": body }))
            }),
        )
        .route("/api/recommendations/", get(|| async { "not json" }));
    serve(app).await
}

/// A backend that accepts every sign-in and answers with its own shapes:
/// a user without `name`, and recommendations carrying only an `overall`
/// reason.
///
/// - `POST /api/auth/login/` → 200 `{token: "jwt", user: {id, email, username}}`
/// - `GET  /api/recommendations/` → 200 list of one
pub async fn spawn_accepting_backend() -> String {
    let app = Router::new()
        .route(
            "/api/auth/login/",
            post(|| async {
                Json(json!({
                    "token": "jwt",
                    "user": { "id": 7, "email": "a@b.c", "username": "a" }
                }))
            }),
        )
        .route(
            "/api/recommendations/",
            get(|| async {
                Json(json!([{
                    "career_id": "r1",
                    "career_name": "Data Scientist",
                    "match_score": 88,
                    "rank": 1,
                    "reasoning": { "overall": "good fit" }
                }]))
            }),
        );
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// A base URL on a port nothing listens on.
pub fn unreachable_base() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}
