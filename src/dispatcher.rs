use async_trait::async_trait;
use log::{info, warn};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::{ClientError, SubscriptionApi};
use crate::prompt::Prompter;
use crate::resolver::ApiCall;
use crate::types::requests::PlanPayload;
use crate::utilities::messages::{SessionMessages, UiMessages};

/// Page state that can be rebuilt from the backend after an action.
/// Implementations must leave `self` untouched when the reload fails.
#[async_trait]
pub trait Reload: Send {
    async fn reload(&mut self, api: &dyn SubscriptionApi) -> Result<(), ClientError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    CreateSubscription { user_id: String, plan_id: String },
    UpdateSubscription { user_id: String, plan_id: String },
    RenewSubscription { user_id: String },
    CancelSubscription { user_id: String },
    CreatePlan(PlanPayload),
    UpdatePlan { plan_id: String, plan: PlanPayload },
    DeletePlan { plan_id: String },
}

impl Command {
    pub fn from_call(user_id: &str, call: &ApiCall) -> Command {
        let user_id = user_id.to_string();
        match call {
            ApiCall::Create { plan_id } => Command::CreateSubscription {
                user_id,
                plan_id: plan_id.clone(),
            },
            ApiCall::Update { plan_id } => Command::UpdateSubscription {
                user_id,
                plan_id: plan_id.clone(),
            },
            ApiCall::Renew => Command::RenewSubscription { user_id },
            ApiCall::Cancel => Command::CancelSubscription { user_id },
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::CreateSubscription { .. } => "create_subscription",
            Command::UpdateSubscription { .. } => "update_subscription",
            Command::RenewSubscription { .. } => "renew_subscription",
            Command::CancelSubscription { .. } => "cancel_subscription",
            Command::CreatePlan(_) => "create_plan",
            Command::UpdatePlan { .. } => "update_plan",
            Command::DeletePlan { .. } => "delete_plan",
        }
    }

    async fn send(&self, api: &dyn SubscriptionApi) -> Result<(), ClientError> {
        match self {
            Command::CreateSubscription { user_id, plan_id } => api.create_subscription(user_id, plan_id).await,
            Command::UpdateSubscription { user_id, plan_id } => api.update_subscription(user_id, plan_id).await,
            Command::RenewSubscription { user_id } => api.renew_subscription(user_id).await,
            Command::CancelSubscription { user_id } => api.cancel_subscription(user_id).await,
            Command::CreatePlan(plan) => api.create_plan(plan).await,
            Command::UpdatePlan { plan_id, plan } => api.update_plan(plan_id, plan).await,
            Command::DeletePlan { plan_id } => api.delete_plan(plan_id).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub command: Command,
    pub confirmation: Option<String>,
    pub success: String,
    pub failure_prefix: &'static str,
}

impl Request {
    pub fn new(command: Command, success: impl Into<String>) -> Self {
        Request {
            command,
            confirmation: None,
            success: success.into(),
            failure_prefix: crate::utilities::messages::failure::DASHBOARD,
        }
    }

    pub fn confirm_with(mut self, question: impl Into<String>) -> Self {
        self.confirmation = Some(question.into());
        self
    }

    pub fn on_failure(mut self, prefix: &'static str) -> Self {
        self.failure_prefix = prefix;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Call succeeded and the page was reloaded.
    Completed(String),
    /// User said no at the confirmation prompt; nothing was sent.
    Declined,
    /// Refused client-side; nothing was sent.
    Rejected(String),
    /// Backend or transport failure; page state left as it was.
    Failed(String),
    /// Backend answered 401; the caller should drop the session.
    SessionExpired,
}

/// Held while an action is in flight; a second action is refused until it drops.
pub struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Runs user actions: confirm, call, then reload the page from the backend.
pub struct Dispatcher<'a> {
    api: &'a dyn SubscriptionApi,
    prompter: &'a dyn Prompter,
    in_flight: AtomicBool,
}

impl<'a> Dispatcher<'a> {
    pub fn new(api: &'a dyn SubscriptionApi, prompter: &'a dyn Prompter) -> Self {
        Dispatcher {
            api,
            prompter,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn begin(&self) -> Option<InFlight<'_>> {
        match self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        {
            Ok(_) => Some(InFlight {
                flag: &self.in_flight,
            }),
            Err(_) => None,
        }
    }

    pub fn reject(&self, message: impl Into<String>) -> Outcome {
        let message = message.into();
        self.prompter.alert(&message);
        Outcome::Rejected(message)
    }

    pub async fn dispatch<C: Reload>(&self, page: &mut C, request: Request) -> Outcome {
        let _guard = match self.begin() {
            Some(guard) => guard,
            None => {
                return self.reject(UiMessages::Session(SessionMessages::ActionInProgress).to_string())
            }
        };

        if let Some(question) = &request.confirmation {
            if !self.prompter.confirm(question) {
                info!("{} declined at confirmation", request.command.name());
                return Outcome::Declined;
            }
        }

        match request.command.send(self.api).await {
            Ok(()) => info!("{} succeeded", request.command.name()),
            Err(err) => return self.fail(request.failure_prefix, err),
        }

        self.prompter.notify(&request.success);

        match page.reload(self.api).await {
            Ok(()) => Outcome::Completed(request.success),
            Err(err) => self.fail(crate::utilities::messages::failure::DASHBOARD, err),
        }
    }

    fn fail(&self, prefix: &str, err: ClientError) -> Outcome {
        if err.is_unauthorized() {
            warn!("session rejected by backend: {}", err);
            self.prompter
                .alert(&UiMessages::Session(SessionMessages::Expired).to_string());
            return Outcome::SessionExpired;
        }

        let message = format!("{}{}", prefix, err.message());
        self.prompter.alert(&message);
        Outcome::Failed(message)
    }
}
