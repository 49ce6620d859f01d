//! In-memory stand-ins for the backend and the user, shared by unit tests.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use crate::api::{ClientError, SubscriptionApi};
use crate::prompt::Prompter;
use crate::types::{
    plan::{Plan, PlanDuration},
    requests::{LoginData, PlanPayload},
    subscription::{Subscription, SubscriptionStatus},
    user::{Session, User},
};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

struct FakeState {
    now: DateTime<Utc>,
    admin_username: String,
    users: Vec<(User, String)>,
    tokens: HashMap<String, String>,
    plans: Vec<Plan>,
    subscriptions: HashMap<String, Subscription>,
    requests: Vec<RecordedRequest>,
    subscription_read_failure: Option<(u16, String)>,
    next_id: u32,
}

/// Mirrors the backend's rules: create upserts to ACTIVE, update needs
/// ACTIVE, cancel needs ACTIVE, renew needs CANCELLED, expiry is recomputed
/// from the current time on every create/update/renew.
#[derive(Clone)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        FakeBackend {
            state: Arc::new(Mutex::new(FakeState {
                now: Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap(),
                admin_username: "admin".to_string(),
                users: Vec::new(),
                tokens: HashMap::new(),
                plans: Vec::new(),
                subscriptions: HashMap::new(),
                requests: Vec::new(),
                subscription_read_failure: None,
                next_id: 1,
            })),
        }
    }

    pub fn with_plan(self, id: &str, name: &str, price: f64, duration: PlanDuration, features: &[&str]) -> Self {
        self.state.lock().unwrap().plans.push(Plan {
            id: id.to_string(),
            name: name.to_string(),
            price,
            duration,
            features: features.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    pub fn with_user(self, id: &str, username: &str, name: &str, password: &str) -> Self {
        let user = User {
            id: id.to_string(),
            username: username.to_string(),
            name: name.to_string(),
        };
        self.state.lock().unwrap().users.push((user, password.to_string()));
        self
    }

    pub fn with_subscription(self, user_id: &str, plan_id: &str, status: SubscriptionStatus) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let now = state.now;
            state.subscriptions.insert(
                user_id.to_string(),
                Subscription {
                    id: Some(format!("S-{}", user_id)),
                    user_id: user_id.to_string(),
                    plan_id: plan_id.to_string(),
                    status,
                    start_date: now - Duration::days(10),
                    expires_at: now + Duration::days(20),
                },
            );
        }
        self
    }

    /// Issues a token for an existing user, as a successful login would.
    pub fn session_for(&self, user_id: &str) -> Session {
        let mut state = self.state.lock().unwrap();
        let user = state
            .users
            .iter()
            .find(|(user, _)| user.id == user_id)
            .map(|(user, _)| user.clone())
            .expect("unknown test user");
        let token = format!("tok-{}", state.next_id);
        state.next_id += 1;
        state.tokens.insert(token.clone(), user.id.clone());
        Session { token, user }
    }

    pub fn client(&self, token: Option<&str>) -> FakeClient {
        FakeClient {
            state: Arc::clone(&self.state),
            token: token.map(String::from),
        }
    }

    /// Every later `GET /subscriptions/:id` fails with this status and message.
    pub fn fail_subscription_reads(&self, status: u16, message: &str) {
        self.state.lock().unwrap().subscription_read_failure = Some((status, message.to_string()));
    }

    pub fn revoke(&self, token: &str) {
        self.state.lock().unwrap().tokens.remove(token);
    }

    pub fn advance(&self, by: Duration) {
        self.state.lock().unwrap().now += by;
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.state.lock().unwrap().now
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn plans(&self) -> Vec<Plan> {
        self.state.lock().unwrap().plans.clone()
    }

    pub fn subscription(&self, user_id: &str) -> Option<Subscription> {
        self.state.lock().unwrap().subscriptions.get(user_id).cloned()
    }
}

pub struct FakeClient {
    state: Arc<Mutex<FakeState>>,
    token: Option<String>,
}

fn unauthorized() -> ClientError {
    ClientError::Unauthorized("Invalid or expired token".to_string())
}

fn expiry_from(now: DateTime<Utc>, duration: PlanDuration) -> DateTime<Utc> {
    let months = match duration {
        PlanDuration::Monthly => Months::new(1),
        PlanDuration::Yearly => Months::new(12),
    };
    now.checked_add_months(months).unwrap()
}

impl FakeState {
    fn record(&mut self, method: &'static str, path: String, body: Option<Value>) {
        self.requests.push(RecordedRequest { method, path, body });
    }

    fn caller(&self, token: &Option<String>) -> Result<User, ClientError> {
        let user_id = match token.as_ref().and_then(|token| self.tokens.get(token)) {
            Some(user_id) => user_id,
            None => return Err(unauthorized()),
        };
        match self.users.iter().find(|(user, _)| &user.id == user_id) {
            Some((user, _)) => Ok(user.clone()),
            None => Err(unauthorized()),
        }
    }

    fn require_admin(&self, token: &Option<String>) -> Result<(), ClientError> {
        let caller = self.caller(token)?;
        if caller.username != self.admin_username {
            return Err(ClientError::api(403, "Admin access required"));
        }
        Ok(())
    }

    fn plan(&self, plan_id: &str) -> Result<Plan, ClientError> {
        match self.plans.iter().find(|plan| plan.id == plan_id) {
            Some(plan) => Ok(plan.clone()),
            None => Err(ClientError::api(400, "plan not found")),
        }
    }

    // the backend flips ACTIVE to EXPIRED lazily when the subscription is read
    fn current(&mut self, user_id: &str) -> Result<Subscription, ClientError> {
        let now = self.now;
        match self.subscriptions.get_mut(user_id) {
            Some(subscription) => {
                if subscription.status == SubscriptionStatus::Active && now > subscription.expires_at {
                    subscription.status = SubscriptionStatus::Expired;
                }
                Ok(subscription.clone())
            }
            None => Err(ClientError::api(400, "subscription not found")),
        }
    }
}

#[async_trait]
impl SubscriptionApi for FakeClient {
    async fn login(&self, username: &str, password: &str) -> Result<LoginData, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record("POST", "/auth/login".to_string(), Some(json!({"username": username})));

        let user = match state
            .users
            .iter()
            .find(|(user, secret)| user.username == username && secret == password)
        {
            Some((user, _)) => user.clone(),
            None => return Err(ClientError::Unauthorized("invalid username or password".to_string())),
        };

        let token = format!("tok-{}", state.next_id);
        state.next_id += 1;
        state.tokens.insert(token.clone(), user.id.clone());
        Ok(LoginData { token, user })
    }

    async fn register(&self, username: &str, name: &str, password: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record(
            "POST",
            "/auth/register".to_string(),
            Some(json!({"username": username, "name": name})),
        );

        if state.users.iter().any(|(user, _)| user.username == username) {
            return Err(ClientError::api(400, "username already exists"));
        }

        let id = format!("U{}", state.next_id);
        state.next_id += 1;
        state.users.push((
            User {
                id,
                username: username.to_string(),
                name: name.to_string(),
            },
            password.to_string(),
        ));
        Ok(())
    }

    async fn list_plans(&self) -> Result<Vec<Plan>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record("GET", "/plans".to_string(), None);
        Ok(state.plans.clone())
    }

    async fn create_plan(&self, plan: &PlanPayload) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record("POST", "/plans".to_string(), Some(serde_json::to_value(plan).unwrap()));
        state.require_admin(&self.token)?;

        let id = format!("P{}", state.next_id);
        state.next_id += 1;
        state.plans.push(Plan {
            id,
            name: plan.name.clone(),
            price: plan.price,
            duration: plan.duration,
            features: plan.features.clone(),
        });
        Ok(())
    }

    async fn update_plan(&self, plan_id: &str, plan: &PlanPayload) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record(
            "PUT",
            format!("/plans/{}", plan_id),
            Some(serde_json::to_value(plan).unwrap()),
        );
        state.require_admin(&self.token)?;

        match state.plans.iter_mut().find(|existing| existing.id == plan_id) {
            Some(existing) => {
                existing.name = plan.name.clone();
                existing.price = plan.price;
                existing.duration = plan.duration;
                existing.features = plan.features.clone();
                Ok(())
            }
            None => Err(ClientError::api(404, "Plan not found")),
        }
    }

    async fn delete_plan(&self, plan_id: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record("DELETE", format!("/plans/{}", plan_id), None);
        state.require_admin(&self.token)?;

        let before = state.plans.len();
        state.plans.retain(|plan| plan.id != plan_id);
        if state.plans.len() == before {
            return Err(ClientError::api(404, "Plan not found"));
        }
        Ok(())
    }

    async fn create_subscription(&self, user_id: &str, plan_id: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record(
            "POST",
            "/subscriptions".to_string(),
            Some(json!({"user_id": user_id, "plan_id": plan_id})),
        );
        state.caller(&self.token)?;

        let plan = state.plan(plan_id)?;
        let now = state.now;
        state.subscriptions.insert(
            user_id.to_string(),
            Subscription {
                id: Some(format!("S-{}", user_id)),
                user_id: user_id.to_string(),
                plan_id: plan_id.to_string(),
                status: SubscriptionStatus::Active,
                start_date: now,
                expires_at: expiry_from(now, plan.duration),
            },
        );
        Ok(())
    }

    async fn get_subscription(&self, user_id: &str) -> Result<Subscription, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record("GET", format!("/subscriptions/{}", user_id), None);
        state.caller(&self.token)?;

        if let Some((status, message)) = &state.subscription_read_failure {
            return Err(ClientError::api(*status, message));
        }

        match state.current(user_id) {
            Ok(subscription) => Ok(subscription),
            Err(_) => Err(ClientError::api(404, "Subscription not found")),
        }
    }

    async fn update_subscription(&self, user_id: &str, plan_id: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record(
            "PUT",
            format!("/subscriptions/{}", user_id),
            Some(json!({"plan_id": plan_id})),
        );
        state.caller(&self.token)?;

        let current = state.current(user_id)?;
        if current.status != SubscriptionStatus::Active {
            return Err(ClientError::api(400, "can only update active subscriptions"));
        }
        let plan = state.plan(plan_id)?;
        let now = state.now;
        if let Some(subscription) = state.subscriptions.get_mut(user_id) {
            subscription.plan_id = plan.id.clone();
            subscription.start_date = now;
            subscription.expires_at = expiry_from(now, plan.duration);
        }
        Ok(())
    }

    async fn renew_subscription(&self, user_id: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record("POST", format!("/subscriptions/{}/renew", user_id), None);
        state.caller(&self.token)?;

        let current = state.current(user_id)?;
        if current.status != SubscriptionStatus::Cancelled {
            return Err(ClientError::api(400, "can only renew cancelled subscriptions"));
        }
        let plan = state.plan(&current.plan_id)?;
        let now = state.now;
        if let Some(subscription) = state.subscriptions.get_mut(user_id) {
            subscription.status = SubscriptionStatus::Active;
            subscription.start_date = now;
            subscription.expires_at = expiry_from(now, plan.duration);
        }
        Ok(())
    }

    async fn cancel_subscription(&self, user_id: &str) -> Result<(), ClientError> {
        let mut state = self.state.lock().unwrap();
        state.record("DELETE", format!("/subscriptions/{}", user_id), None);
        state.caller(&self.token)?;

        let current = state.current(user_id)?;
        if current.status != SubscriptionStatus::Active {
            return Err(ClientError::api(400, "can only cancel active subscriptions"));
        }
        if let Some(subscription) = state.subscriptions.get_mut(user_id) {
            subscription.status = SubscriptionStatus::Cancelled;
        }
        Ok(())
    }
}

/// Answers confirmations from a script (then "no") and records everything shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<bool>>,
    questions: Mutex<Vec<String>>,
    notices: Mutex<Vec<String>>,
    alerts: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        ScriptedPrompter {
            answers: Mutex::new(answers.iter().copied().collect()),
            ..ScriptedPrompter::default()
        }
    }

    pub fn questions(&self) -> Vec<String> {
        self.questions.lock().unwrap().clone()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str) -> bool {
        self.questions.lock().unwrap().push(question.to_string());
        self.answers.lock().unwrap().pop_front().unwrap_or(false)
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
