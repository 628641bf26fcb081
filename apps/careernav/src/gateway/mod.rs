//! Request dispatch: one decision point choosing between the remote backend
//! and the local emulation of its contract.
//!
//! `Gateway` is the only entry point for data requests. Callers always get an
//! `Envelope` back; a transport failure on the remote path is absorbed by
//! resolving the same request locally.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::envelope::Envelope;
use crate::errors::CoreError;
use crate::store::{keys, Store};

pub mod local;
pub mod remote;

#[cfg(test)]
pub(crate) mod testing;

pub use local::LocalSource;
pub use remote::RemoteSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend request: path relative to the API base, JSON body, extra headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    pub fn post_json<T: Serialize>(path: impl Into<String>, body: &T) -> Result<Self, CoreError> {
        Ok(Self::post(path, serde_json::to_string(body)?))
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .rev()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// JSON content type plus a bearer token when one is stored. Headers the
    /// caller already set take precedence.
    fn with_session_headers(mut self, store: &dyn Store) -> Self {
        let mut defaults = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = store.get(keys::TOKEN) {
            defaults.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        defaults.retain(|(name, _)| self.header(name).is_none());
        defaults.append(&mut self.headers);
        self.headers = defaults;
        self
    }
}

/// A place requests can be answered from.
///
/// `Err` is reserved for failures of the source itself (the remote being
/// unreachable); a backend refusing a request is an `Ok(Envelope::Failure)`.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn request(&self, request: &ApiRequest) -> Result<Envelope, CoreError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceMode {
    /// Remote first, local on transport failure.
    #[default]
    Auto,
    /// Never touch the network.
    LocalOnly,
}

pub struct Gateway {
    remote: Option<Arc<dyn DataSource>>,
    local: LocalSource,
    mode: SourceMode,
}

impl Gateway {
    pub fn new(remote: Arc<dyn DataSource>, local: LocalSource) -> Self {
        Self {
            remote: Some(remote),
            local,
            mode: SourceMode::Auto,
        }
    }

    pub fn local_only(local: LocalSource) -> Self {
        Self {
            remote: None,
            local,
            mode: SourceMode::LocalOnly,
        }
    }

    pub fn with_mode(mut self, mode: SourceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> SourceMode {
        self.mode
    }

    pub fn store(&self) -> &dyn Store {
        self.local.store()
    }

    pub async fn request(&self, request: ApiRequest) -> Envelope {
        let request = request.with_session_headers(self.store());
        debug!(
            method = %request.method,
            path = %request.path,
            mode = ?self.mode,
            "dispatching request"
        );

        let remote = match (self.mode, &self.remote) {
            (SourceMode::Auto, Some(remote)) => remote,
            _ => return self.local.resolve(&request),
        };

        match remote.request(&request).await {
            Ok(envelope) => envelope,
            Err(e) if e.is_transport() => {
                warn!(
                    source = remote.name(),
                    path = %request.path,
                    error = %e,
                    "API unreachable, using local fallback"
                );
                self.local.resolve(&request)
            }
            Err(e) => Envelope::from(e),
        }
    }
}
