//! Typed façade the View Layer calls into.
//!
//! Each operation goes through the `Gateway`, so it behaves the same whether
//! the backend answered or the local fallback did. Validation happens here,
//! before anything is sent. Successful profile, survey, and skills answers are
//! written through to the store so later local fallbacks see them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::config::Config;
use crate::envelope::Envelope;
use crate::errors::CoreError;
use crate::gateway::{ApiRequest, Gateway, LocalSource, RemoteSource};
use crate::models::auth::MOCK_TOKEN;
use crate::models::career::{self, Career};
use crate::models::{
    Credentials, LoginResponse, Profile, Recommendation, RegisteredUser, SkillSet,
    SurveyResponse, SurveyResult, SurveySubmission,
};
use crate::store::{keys, records, FileStore, MemoryStore, Store};

/// What the dashboard shows about the current user's progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStatus {
    pub profile: Option<Profile>,
    pub profile_saved: bool,
    pub survey_completed: bool,
    pub skills_saved: bool,
}

pub struct Session {
    gateway: Gateway,
}

impl Session {
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// Builds the store and data sources described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        let store: Arc<dyn Store> = match &config.store_path {
            Some(path) => Arc::new(FileStore::open(path)),
            None => Arc::new(MemoryStore::new()),
        };
        let local = LocalSource::new(store);

        let gateway = if config.offline {
            Gateway::local_only(local)
        } else {
            let remote = RemoteSource::new(config.api_base.clone(), config.request_timeout)?;
            Gateway::new(Arc::new(remote), local)
        };
        Ok(Self::new(gateway))
    }

    /// A session that never touches the network.
    pub fn offline(store: Arc<dyn Store>) -> Self {
        Self::new(Gateway::local_only(LocalSource::new(store)))
    }

    pub fn store(&self) -> &dyn Store {
        self.gateway.store()
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    // ── Session lifecycle ──────────────────────────────────────────────────

    pub fn token(&self) -> Option<String> {
        self.store().get(keys::TOKEN)
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    fn require_auth(&self) -> Result<(), CoreError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(CoreError::Unauthorized)
        }
    }

    /// Signs in. On rejection the stored session is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, CoreError> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.trim().to_string(),
        };
        let envelope = self
            .gateway
            .request(ApiRequest::post_json("/auth/login/", &credentials)?)
            .await;

        let mut response: LoginResponse = match envelope {
            Envelope::Success(data) => serde_json::from_value(data)?,
            failure => {
                let message = failure.error_message().unwrap_or_default();
                info!(email = %credentials.email, "sign-in rejected");
                return Err(CoreError::InvalidCredentials(message));
            }
        };

        let token = response
            .token
            .get_or_insert_with(|| MOCK_TOKEN.to_string())
            .clone();
        self.store().set(keys::TOKEN, &token);
        info!(email = %credentials.email, "signed in");
        Ok(response)
    }

    /// Creates a device-local account and signs it in. Nothing is sent remotely.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<RegisteredUser, CoreError> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(CoreError::Validation("Fill all fields".to_string()));
        }
        if password != confirm {
            return Err(CoreError::Validation("Passwords do not match".to_string()));
        }

        let user = RegisteredUser {
            name: name.to_string(),
            email: email.to_string(),
        };
        records::save(self.store(), keys::REGISTERED_USER, &user);
        self.store().set(keys::TOKEN, MOCK_TOKEN);
        info!(email = %user.email, "account created");
        Ok(user)
    }

    pub fn registered_user(&self) -> Option<RegisteredUser> {
        records::load(self.store(), keys::REGISTERED_USER)
    }

    /// Drops the token; cached profile, survey, skills, and recommendations stay.
    pub fn logout(&self) {
        self.store().remove(keys::TOKEN);
        info!("signed out");
    }

    /// Wipes everything this application stored.
    pub fn reset(&self) {
        self.store().clear();
        info!("session store cleared");
    }

    // ── Profile ────────────────────────────────────────────────────────────

    pub async fn load_profile(&self) -> Result<Option<Profile>, CoreError> {
        self.require_auth()?;
        let data: Value = self
            .gateway
            .request(ApiRequest::get("/profile/"))
            .await
            .into_result()?;
        if data.is_null() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(data)?))
    }

    pub async fn save_profile(&self, profile: &Profile) -> Result<Profile, CoreError> {
        self.require_auth()?;
        let saved: Profile = self
            .gateway
            .request(ApiRequest::post_json("/profile/", profile)?)
            .await
            .into_result()?;
        records::save(self.store(), keys::PROFILE, &saved);
        Ok(saved)
    }

    // ── Personality survey ─────────────────────────────────────────────────

    pub async fn submit_survey(
        &self,
        responses: Vec<SurveyResponse>,
    ) -> Result<SurveyResult, CoreError> {
        self.require_auth()?;
        let submission = SurveySubmission { responses };
        let result: SurveyResult = self
            .gateway
            .request(ApiRequest::post_json("/mbti/submit/", &submission)?)
            .await
            .into_result()?;
        records::save(self.store(), keys::SURVEY, &result);
        info!(personality_type = %result.personality_type, "survey submitted");
        Ok(result)
    }

    // ── Skills ─────────────────────────────────────────────────────────────

    /// Stored skills, or the starter set when none are saved yet.
    pub async fn load_skills(&self) -> Result<SkillSet, CoreError> {
        self.require_auth()?;
        let data: Value = self
            .gateway
            .request(ApiRequest::get("/skills/"))
            .await
            .into_result()?;
        if data.is_null() {
            return Ok(SkillSet::starter());
        }
        Ok(serde_json::from_value(data)?)
    }

    pub async fn save_skills(&self, skills: SkillSet) -> Result<SkillSet, CoreError> {
        self.require_auth()?;
        let skills = skills.normalized();
        let saved: SkillSet = self
            .gateway
            .request(ApiRequest::post_json("/skills/", &skills)?)
            .await
            .into_result()?;
        records::save(self.store(), keys::SKILLS, &saved);
        Ok(saved)
    }

    // ── Recommendations & careers ──────────────────────────────────────────

    pub async fn generate_recommendations(&self) -> Result<Vec<Recommendation>, CoreError> {
        self.require_auth()?;
        let recs: Vec<Recommendation> = self
            .gateway
            .request(ApiRequest::post("/recommendations/generate/", "{}"))
            .await
            .into_result()?;
        info!(count = recs.len(), "recommendations ready");
        Ok(recs)
    }

    pub async fn recommendations(&self) -> Result<Vec<Recommendation>, CoreError> {
        self.require_auth()?;
        self.gateway
            .request(ApiRequest::get("/recommendations/"))
            .await
            .into_result()
    }

    pub async fn careers(&self) -> Result<Vec<Career>, CoreError> {
        self.gateway
            .request(ApiRequest::get("/careers/"))
            .await
            .into_result()
    }

    /// Career by id or name; unknown keys resolve to the first career.
    pub async fn career(&self, key: &str) -> Result<Option<Career>, CoreError> {
        let careers = self.careers().await?;
        Ok(career::find(&careers, key).cloned())
    }

    pub async fn dashboard(&self) -> Result<DashboardStatus, CoreError> {
        self.require_auth()?;
        let profile = self.load_profile().await.ok().flatten();
        Ok(DashboardStatus {
            profile_saved: profile.is_some(),
            profile,
            survey_completed: records::exists(self.store(), keys::SURVEY),
            skills_saved: records::exists(self.store(), keys::SKILLS),
        })
    }
}
