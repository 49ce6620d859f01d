use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::{ClientError, SubscriptionApi};
use crate::types::{
    envelope::{Envelope, FALLBACK_FAILURE},
    plan::Plan,
    requests::{
        CreateSubscriptionRequest, LoginData, LoginRequest, PlanPayload, RegisterRequest,
        UpdateSubscriptionRequest,
    },
    subscription::Subscription,
};

/// reqwest-backed client for the `/api` surface of the subscription backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Envelope<T>, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("accept", "application/json")
            .header("content-type", "application/json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("{} {} could not be sent: {}", method, path, err);
                return Err(ClientError::Transport(err));
            }
        };

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            // error bodies are decoded loosely so a data shape mismatch can't hide the message
            let message = match serde_json::from_str::<Envelope<Value>>(&text) {
                Ok(envelope) => envelope.failure_text(),
                Err(_) => FALLBACK_FAILURE.to_string(),
            };
            warn!("{} {} failed with {}: {}", method, path, status, message);

            if status == StatusCode::UNAUTHORIZED {
                return Err(ClientError::Unauthorized(message));
            }
            return Err(ClientError::api(status.as_u16(), message));
        }

        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        if !envelope.success {
            let message = envelope.failure_text();
            warn!("{} {} reported failure: {}", method, path, message);
            return Err(ClientError::api(status.as_u16(), message));
        }

        Ok(envelope)
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<(), ClientError> {
        self.request::<Value>(method, path, body).await?;
        Ok(())
    }
}

fn to_body<B: Serialize>(body: &B) -> Result<Option<Value>, ClientError> {
    Ok(Some(serde_json::to_value(body)?))
}

fn required<T>(envelope: Envelope<T>) -> Result<T, ClientError> {
    match envelope.data {
        Some(data) => Ok(data),
        None => Err(ClientError::api(200, "Response missing data")),
    }
}

#[async_trait]
impl SubscriptionApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginData, ClientError> {
        let body = to_body(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })?;
        let envelope = self.request::<LoginData>(Method::POST, "/auth/login", body).await?;
        required(envelope)
    }

    async fn register(&self, username: &str, name: &str, password: &str) -> Result<(), ClientError> {
        let body = to_body(&RegisterRequest {
            username: username.to_string(),
            name: name.to_string(),
            password: password.to_string(),
        })?;
        self.send(Method::POST, "/auth/register", body).await
    }

    async fn list_plans(&self) -> Result<Vec<Plan>, ClientError> {
        let envelope = self.request::<Vec<Plan>>(Method::GET, "/plans", None).await?;
        // an empty collection comes back as `data: null`
        Ok(envelope.data.unwrap_or_default())
    }

    async fn create_plan(&self, plan: &PlanPayload) -> Result<(), ClientError> {
        self.send(Method::POST, "/plans", to_body(plan)?).await
    }

    async fn update_plan(&self, plan_id: &str, plan: &PlanPayload) -> Result<(), ClientError> {
        let path = format!("/plans/{}", plan_id);
        self.send(Method::PUT, &path, to_body(plan)?).await
    }

    async fn delete_plan(&self, plan_id: &str) -> Result<(), ClientError> {
        let path = format!("/plans/{}", plan_id);
        self.send(Method::DELETE, &path, None).await
    }

    async fn create_subscription(&self, user_id: &str, plan_id: &str) -> Result<(), ClientError> {
        let body = to_body(&CreateSubscriptionRequest {
            user_id: user_id.to_string(),
            plan_id: plan_id.to_string(),
        })?;
        self.send(Method::POST, "/subscriptions", body).await
    }

    async fn get_subscription(&self, user_id: &str) -> Result<Subscription, ClientError> {
        let path = format!("/subscriptions/{}", user_id);
        let envelope = self.request::<Subscription>(Method::GET, &path, None).await?;
        required(envelope)
    }

    async fn update_subscription(&self, user_id: &str, plan_id: &str) -> Result<(), ClientError> {
        let path = format!("/subscriptions/{}", user_id);
        let body = to_body(&UpdateSubscriptionRequest {
            plan_id: plan_id.to_string(),
        })?;
        self.send(Method::PUT, &path, body).await
    }

    async fn renew_subscription(&self, user_id: &str) -> Result<(), ClientError> {
        let path = format!("/subscriptions/{}/renew", user_id);
        self.send(Method::POST, &path, None).await
    }

    async fn cancel_subscription(&self, user_id: &str) -> Result<(), ClientError> {
        let path = format!("/subscriptions/{}", user_id);
        self.send(Method::DELETE, &path, None).await
    }
}
