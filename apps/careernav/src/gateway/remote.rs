/// Remote backend client — the only module that talks to the network.
///
/// One attempt per request, no retry. Transport failures surface as
/// `CoreError::Transport` so the gateway can fall back; HTTP error statuses
/// are a normal `Envelope::Failure`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{ApiRequest, DataSource, Method};
use crate::envelope::Envelope;
use crate::errors::CoreError;

#[derive(Clone)]
pub struct RemoteSource {
    client: Client,
    api_base: String,
}

impl RemoteSource {
    /// `timeout: None` waits indefinitely for a response.
    pub fn new(api_base: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_base: api_base.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn to_reqwest(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Error bodies are JSON when the backend can manage it, plain text otherwise.
fn parse_error_body(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or(Value::String(body))
}

#[async_trait]
impl DataSource for RemoteSource {
    async fn request(&self, request: &ApiRequest) -> Result<Envelope, CoreError> {
        let url = self.url(&request.path);
        let mut builder = self.client.request(to_reqwest(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            debug!(%url, status = status.as_u16(), "backend returned an error status");
            return Ok(Envelope::Failure(parse_error_body(body)));
        }

        // A success status with an undecodable body counts as a broken
        // transport, not a backend answer.
        let data: Value = response.json().await?;
        debug!(%url, status = status.as_u16(), "backend call succeeded");
        Ok(Envelope::Success(data))
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::testing::{spawn_backend, unreachable_base};
    use serde_json::json;

    #[test]
    fn test_url_joins_without_double_slash() {
        let remote = RemoteSource::new("http://localhost:8000/api/", None).unwrap();
        assert_eq!(remote.url("/careers/"), "http://localhost:8000/api/careers/");
        assert_eq!(remote.url("careers/"), "http://localhost:8000/api/careers/");
    }

    #[test]
    fn test_parse_error_body_json_or_text() {
        assert_eq!(parse_error_body(r#"{"detail":"x"}"#.into()), json!({ "detail": "x" }));
        assert_eq!(parse_error_body("Bad Gateway".into()), json!("Bad Gateway"));
    }

    #[tokio::test]
    async fn test_success_payload_passes_through() {
        let base = spawn_backend().await;
        let remote = RemoteSource::new(base, None).unwrap();

        let env = remote.request(&ApiRequest::get("/careers/")).await.unwrap();
        assert_eq!(env, Envelope::Success(json!([{ "id": "remote-1" }])));
    }

    #[tokio::test]
    async fn test_json_error_status_is_parsed() {
        let base = spawn_backend().await;
        let remote = RemoteSource::new(base, None).unwrap();

        let env = remote
            .request(&ApiRequest::post("/auth/login/", "{}"))
            .await
            .unwrap();
        assert_eq!(env, Envelope::Failure(json!({ "message": "bad credentials" })));
    }

    #[tokio::test]
    async fn test_text_error_status_is_raw() {
        let base = spawn_backend().await;
        let remote = RemoteSource::new(base, None).unwrap();

        let env = remote.request(&ApiRequest::get("/skills/")).await.unwrap();
        assert_eq!(env, Envelope::Failure(json!("upstream down")));
    }

    #[tokio::test]
    async fn test_headers_and_body_are_forwarded() {
        let base = spawn_backend().await;
        let remote = RemoteSource::new(base, None).unwrap();

        let request = ApiRequest::post("/profile/", r#"{"name":"Sai"}"#)
            .with_header("Authorization", "Bearer t0k")
            .with_header("Content-Type", "application/json");
        let env = remote.request(&request).await.unwrap();
        assert_eq!(
            env,
            Envelope::Success(json!({ "authorization": "Bearer t0k", "body": { "name": "Sai" } }))
        );
    }

    #[tokio::test]
    async fn test_non_json_success_is_transport_error() {
        let base = spawn_backend().await;
        let remote = RemoteSource::new(base, None).unwrap();

        let err = remote
            .request(&ApiRequest::get("/recommendations/"))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let remote = RemoteSource::new(unreachable_base(), None).unwrap();
        let err = remote.request(&ApiRequest::get("/careers/")).await.unwrap_err();
        assert!(err.is_transport());
    }
}
