pub mod client;
pub mod error;

use async_trait::async_trait;

use crate::types::{
    plan::Plan,
    requests::{LoginData, PlanPayload},
    subscription::Subscription,
};

pub use client::ApiClient;
pub use error::ClientError;

/// One operation per REST action of the subscription backend. Each call is a
/// single attempt; no retries and no timeouts beyond the transport's own.
#[async_trait]
pub trait SubscriptionApi: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<LoginData, ClientError>;

    async fn register(&self, username: &str, name: &str, password: &str) -> Result<(), ClientError>;

    async fn list_plans(&self) -> Result<Vec<Plan>, ClientError>;

    async fn create_plan(&self, plan: &PlanPayload) -> Result<(), ClientError>;

    async fn update_plan(&self, plan_id: &str, plan: &PlanPayload) -> Result<(), ClientError>;

    async fn delete_plan(&self, plan_id: &str) -> Result<(), ClientError>;

    /// Create-or-upsert: the backend always leaves the subscription ACTIVE.
    async fn create_subscription(&self, user_id: &str, plan_id: &str) -> Result<(), ClientError>;

    async fn get_subscription(&self, user_id: &str) -> Result<Subscription, ClientError>;

    async fn update_subscription(&self, user_id: &str, plan_id: &str) -> Result<(), ClientError>;

    async fn renew_subscription(&self, user_id: &str) -> Result<(), ClientError>;

    async fn cancel_subscription(&self, user_id: &str) -> Result<(), ClientError>;
}
