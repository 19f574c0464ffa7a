//! Remote gateway for the PathFinder backend.
//!
//! A stateless request/response client: one method per endpoint, no retry,
//! caching or batching. Access and refresh tokens returned by setup/login
//! are kept in the durable store and sent as a bearer header on every
//! authenticated call.

pub mod models;

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::ApiError;
use crate::flow::TestType;
use crate::storage::{keys, ApiConfig, LocalStore};

use models::{
    AssessmentResponses, AuthResponse, ChatHistory, ChatMessageRequest, ChatReply, HistoryResponse,
    HomeSummary, LoginRequest, ProfileUpdate, ProfileUpdateResponse, SaveProgressRequest,
    SaveProgressResponse, SetupRequest, StartAssessmentRequest, StartAssessmentResponse,
    SubmitTestRequest, SubmitTestResponse, SuccessResponse, TestResponseDetail, User,
};

/// Client for the backend REST API.
pub struct ApiClient<S: LocalStore> {
    http: Client,
    base_url: Url,
    store: S,
}

impl<S: LocalStore> ApiClient<S> {
    /// Build a client from configuration. Tokens are read from and written
    /// to `store`.
    pub fn new(config: &ApiConfig, store: S) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            store,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether an access token is stored.
    pub fn is_authenticated(&self) -> Result<bool, ApiError> {
        Ok(self.store.get(keys::ACCESS_TOKEN)?.is_some())
    }

    // ── Auth ─────────────────────────────────────────────────────────

    /// Register a new account and store the returned tokens.
    pub async fn setup(&self, request: &SetupRequest) -> Result<User, ApiError> {
        let req = self.request(Method::POST, "auth/setup/")?.json(request);
        let auth: AuthResponse = self.send(req).await?;
        self.store_tokens(&auth)?;
        info!(user_id = auth.user.id, "account created");
        Ok(auth.user)
    }

    /// Log in and store the returned tokens.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        let req = self.request(Method::POST, "auth/login/")?.json(request);
        let auth: AuthResponse = self.send(req).await?;
        self.store_tokens(&auth)?;
        info!(user_id = auth.user.id, "logged in");
        Ok(auth.user)
    }

    /// Invalidate the refresh token on the backend, then forget both tokens.
    /// Tokens are kept if the backend call fails.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let refresh = self.store.get(keys::REFRESH_TOKEN)?;
        let body = serde_json::json!({ "refresh": refresh });
        let req = self.authed(Method::POST, "auth/logout/")?.json(&body);
        let _: serde_json::Value = self.send(req).await?;
        self.store.remove(keys::ACCESS_TOKEN)?;
        self.store.remove(keys::REFRESH_TOKEN)?;
        info!("remote session closed");
        Ok(())
    }

    // ── Home ─────────────────────────────────────────────────────────

    pub async fn home(&self) -> Result<HomeSummary, ApiError> {
        self.get_json("home/").await
    }

    // ── Assessments ──────────────────────────────────────────────────

    /// Start a new assessment, or resume the one already in progress.
    pub async fn start_assessment(
        &self,
        request: &StartAssessmentRequest,
    ) -> Result<StartAssessmentResponse, ApiError> {
        self.post_json("assessment/start/", request).await
    }

    pub async fn test_response(
        &self,
        assessment_id: i64,
        test_type: TestType,
    ) -> Result<TestResponseDetail, ApiError> {
        self.get_json(&format!("assessment/{assessment_id}/test/{test_type}/"))
            .await
    }

    pub async fn save_progress(
        &self,
        request: &SaveProgressRequest,
    ) -> Result<SaveProgressResponse, ApiError> {
        self.post_json("assessment/save-progress/", request).await
    }

    pub async fn submit_test(
        &self,
        request: &SubmitTestRequest,
    ) -> Result<SubmitTestResponse, ApiError> {
        self.post_json("assessment/submit-test/", request).await
    }

    pub async fn history(&self) -> Result<HistoryResponse, ApiError> {
        self.get_json("assessment/history/").await
    }

    pub async fn responses(&self, assessment_id: i64) -> Result<AssessmentResponses, ApiError> {
        self.get_json(&format!("assessment/{assessment_id}/responses/"))
            .await
    }

    // ── Chat ─────────────────────────────────────────────────────────

    pub async fn send_chat_message(
        &self,
        request: &ChatMessageRequest,
    ) -> Result<ChatReply, ApiError> {
        self.post_json("chatbot/message/", request).await
    }

    /// Chat history, limited to one assessment when `assessment_id` is set.
    pub async fn chat_history(&self, assessment_id: Option<i64>) -> Result<ChatHistory, ApiError> {
        let mut req = self.authed(Method::GET, "chatbot/history/")?;
        if let Some(id) = assessment_id {
            req = req.query(&[("assessment_id", id)]);
        }
        self.send(req).await
    }

    // ── Profile ──────────────────────────────────────────────────────

    pub async fn update_profile(
        &self,
        update: &ProfileUpdate,
    ) -> Result<ProfileUpdateResponse, ApiError> {
        let req = self.authed(Method::PATCH, "profile/update/")?.json(update);
        self.send(req).await
    }

    pub async fn delete_account(&self) -> Result<SuccessResponse, ApiError> {
        let req = self.authed(Method::DELETE, "profile/delete/")?;
        self.send(req).await
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn store_tokens(&self, auth: &AuthResponse) -> Result<(), ApiError> {
        self.store.set_many(&[
            (keys::ACCESS_TOKEN, auth.access.as_str()),
            (keys::REFRESH_TOKEN, auth.refresh.as_str()),
        ])?;
        Ok(())
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        debug!(%method, %url, "backend request");
        Ok(self.http.request(method, url))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self
            .store
            .get(keys::ACCESS_TOKEN)?
            .ok_or(ApiError::NotAuthenticated)?;
        Ok(self.request(method, path)?.bearer_auth(token))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.authed(Method::GET, path)?;
        self.send(req).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.authed(Method::POST, path)?.json(body);
        self.send(req).await
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = error_message(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            warn!(status = status.as_u16(), %message, "backend returned an error");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Pull the human-readable message out of an error body. The backend uses
/// `error`; authentication failures use `detail`.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "detail", "message"]
        .iter()
        .find_map(|k| value.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string)
}
