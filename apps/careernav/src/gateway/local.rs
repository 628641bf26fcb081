//! Local emulation of the backend contract, used when the remote is absent.
//!
//! | path prefix               | behavior                                   |
//! |---------------------------|--------------------------------------------|
//! | auth/login                | check demo users, hand out `mock-token`    |
//! | profile (POST / other)    | persist and echo / return stored or null   |
//! | mbti/submit               | score responses, persist, return result    |
//! | skills (POST / other)     | persist and echo / return stored or null   |
//! | recommendations/generate  | synthesize, persist, return list           |
//! | recommendations           | stored list or `[]`                        |
//! | careers                   | the catalog                                |
//!
//! Any change to the backend's request or response shapes has to be mirrored
//! here, or the two paths drift apart silently.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use super::{ApiRequest, DataSource, Method};
use crate::envelope::Envelope;
use crate::errors::CoreError;
use crate::models::auth::MOCK_TOKEN;
use crate::models::career::{self, Career};
use crate::models::{Credentials, DemoUser, LoginResponse, Recommendation, SurveySubmission};
use crate::recommend::synthesizer;
use crate::scoring::personality;
use crate::store::{keys, records, Store};

/// Endpoint families the local source knows, most specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Login,
    Profile,
    SurveySubmit,
    Skills,
    GenerateRecommendations,
    Recommendations,
    Careers,
}

const ROUTES: &[(&str, Route)] = &[
    ("auth/login", Route::Login),
    ("profile", Route::Profile),
    ("mbti/submit", Route::SurveySubmit),
    ("skills", Route::Skills),
    ("recommendations/generate", Route::GenerateRecommendations),
    ("recommendations", Route::Recommendations),
    ("careers", Route::Careers),
];

impl Route {
    /// Prefix match on whole path segments; slashes and query strings are ignored.
    fn match_path(path: &str) -> Option<Self> {
        let path = path.split('?').next().unwrap_or_default().trim_matches('/');
        ROUTES.iter().find_map(|(prefix, route)| {
            let hit = path == *prefix
                || path
                    .strip_prefix(prefix)
                    .is_some_and(|rest| rest.starts_with('/'));
            hit.then_some(*route)
        })
    }
}

pub struct LocalSource {
    store: Arc<dyn Store>,
    catalog: Vec<Career>,
    rng: Mutex<StdRng>,
}

impl LocalSource {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            catalog: career::catalog(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_catalog(mut self, catalog: Vec<Career>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Fixes the score jitter, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Answers a request the way the backend would. Never fails outright:
    /// problems come back as a failure envelope.
    pub fn resolve(&self, request: &ApiRequest) -> Envelope {
        let Some(route) = Route::match_path(&request.path) else {
            return CoreError::Unsupported {
                path: request.path.clone(),
            }
            .into();
        };
        debug!(?route, method = %request.method, "resolving locally");

        match self.dispatch(route, request) {
            Ok(envelope) => envelope,
            Err(e) => e.into(),
        }
    }

    fn dispatch(&self, route: Route, request: &ApiRequest) -> Result<Envelope, CoreError> {
        let store = self.store();
        let is_post = request.method == Method::Post;

        Ok(match route {
            Route::Login => self.login(&decode_body::<Credentials>(request)?),
            Route::Profile if is_post => {
                let body: Value = decode_body(request)?;
                records::save(store, keys::PROFILE, &body);
                Envelope::Success(body)
            }
            Route::Profile => Envelope::Success(stored_or_null(store, keys::PROFILE)),
            Route::SurveySubmit => {
                let submission: SurveySubmission = decode_body(request)?;
                let result = personality::score_responses(&submission.responses);
                records::save(store, keys::SURVEY, &result);
                Envelope::success(&result)
            }
            Route::Skills if is_post => {
                let body: Value = decode_body(request)?;
                records::save(store, keys::SKILLS, &body);
                Envelope::Success(body)
            }
            Route::Skills => Envelope::Success(stored_or_null(store, keys::SKILLS)),
            Route::GenerateRecommendations => {
                let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
                let recs = synthesizer::generate_and_store(store, &self.catalog, &mut *rng);
                Envelope::success(&recs)
            }
            Route::Recommendations => {
                let recs: Vec<Recommendation> =
                    records::load_or_default(store, keys::RECOMMENDATIONS);
                Envelope::success(&recs)
            }
            Route::Careers => Envelope::success(&self.catalog),
        })
    }

    fn login(&self, credentials: &Credentials) -> Envelope {
        match DemoUser::authenticate(credentials) {
            Some(user) => {
                info!(email = user.email, "demo sign-in accepted");
                Envelope::success(&LoginResponse {
                    token: Some(MOCK_TOKEN.to_string()),
                    user: Some(user.echo()),
                })
            }
            None => Envelope::failure_message("Invalid credentials (mock)"),
        }
    }
}

#[async_trait]
impl DataSource for LocalSource {
    async fn request(&self, request: &ApiRequest) -> Result<Envelope, CoreError> {
        Ok(self.resolve(request))
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Missing or blank bodies decode as `{}`.
fn decode_body<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, CoreError> {
    let body = request
        .body
        .as_deref()
        .filter(|b| !b.trim().is_empty())
        .unwrap_or("{}");
    Ok(serde_json::from_str(body)?)
}

fn stored_or_null(store: &dyn Store, key: &str) -> Value {
    records::load(store, key).unwrap_or(Value::Null)
}
