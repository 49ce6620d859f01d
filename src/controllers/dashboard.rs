use async_trait::async_trait;
use log::debug;

use super::{identity, PageError};
use crate::api::{ClientError, SubscriptionApi};
use crate::catalog::PlanCatalog;
use crate::dispatcher::{Command, Dispatcher, Outcome, Reload, Request};
use crate::resolver::{self, ActionKind, ApiCall, FALLBACK_PLAN_LABEL};
use crate::storage::SessionStore;
use crate::types::{subscription::Subscription, user::Session};
use crate::utilities::messages::{SubscriptionMessages, UiMessages};
use crate::view::{dashboard::render_dashboard, Node};

/// Everything the dashboard shows, fetched fresh on every load.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub session: Session,
    pub catalog: PlanCatalog,
    pub subscription: Option<Subscription>,
}

impl DashboardContext {
    pub async fn load(api: &dyn SubscriptionApi, session: Session) -> Result<Self, ClientError> {
        let (catalog, subscription) = fetch(api, &session.user.id).await?;
        Ok(DashboardContext {
            session,
            catalog,
            subscription,
        })
    }

    fn current_plan_name(&self) -> String {
        self.subscription
            .as_ref()
            .and_then(|subscription| self.catalog.get(&subscription.plan_id))
            .map(|plan| plan.name.clone())
            .unwrap_or_else(|| FALLBACK_PLAN_LABEL.to_string())
    }
}

// plans first, then the subscription; only a 404 on the subscription read
// means the user has none
async fn fetch(
    api: &dyn SubscriptionApi,
    user_id: &str,
) -> Result<(PlanCatalog, Option<Subscription>), ClientError> {
    let catalog = PlanCatalog::load(api).await?;

    let subscription = match api.get_subscription(user_id).await {
        Ok(subscription) => Some(subscription),
        Err(ClientError::Api { status: 404, message }) => {
            debug!("no subscription for {}: {}", user_id, message);
            None
        }
        Err(err) => return Err(err),
    };

    Ok((catalog, subscription))
}

#[async_trait]
impl Reload for DashboardContext {
    async fn reload(&mut self, api: &dyn SubscriptionApi) -> Result<(), ClientError> {
        let (catalog, subscription) = fetch(api, &self.session.user.id).await?;
        self.catalog = catalog;
        self.subscription = subscription;
        Ok(())
    }
}

/// Loads the dashboard for a guarded session.
pub async fn open(
    api: &dyn SubscriptionApi,
    store: &SessionStore,
    session: Session,
) -> Result<DashboardContext, PageError> {
    match DashboardContext::load(api, session).await {
        Ok(context) => Ok(context),
        Err(err) => Err(identity::page_error(store, err)),
    }
}

pub fn view(context: &DashboardContext, admin_username: &str) -> Node {
    render_dashboard(
        &context.session.user,
        &context.catalog,
        context.subscription.as_ref(),
        context.session.is_admin(admin_username),
    )
}

/// Runs whatever the card of `plan_id` offers: subscribe, change, or renew.
pub async fn choose_plan(dispatcher: &Dispatcher<'_>, context: &mut DashboardContext, plan_id: &str) -> Outcome {
    let plan_name = match context.catalog.get(plan_id) {
        Some(plan) => plan.name.clone(),
        None => {
            return dispatcher.reject(
                UiMessages::Subscription(SubscriptionMessages::UnknownPlan(plan_id.to_string())).to_string(),
            )
        }
    };

    let action = resolver::action_for_plan(context.subscription.as_ref(), plan_id);
    let call = match (action.enabled, action.call) {
        (true, Some(call)) => call,
        _ => {
            return dispatcher
                .reject(UiMessages::Subscription(SubscriptionMessages::AlreadyOnPlan(plan_name)).to_string())
        }
    };

    let request = request_for(&context.session.user.id, &call, &plan_name);
    dispatcher.dispatch(context, request).await
}

pub async fn renew(dispatcher: &Dispatcher<'_>, context: &mut DashboardContext) -> Outcome {
    manage(dispatcher, context, ActionKind::Renew).await
}

pub async fn cancel(dispatcher: &Dispatcher<'_>, context: &mut DashboardContext) -> Outcome {
    manage(dispatcher, context, ActionKind::Cancel).await
}

async fn manage(dispatcher: &Dispatcher<'_>, context: &mut DashboardContext, kind: ActionKind) -> Outcome {
    let call = resolver::management_actions(context.subscription.as_ref(), &context.catalog)
        .into_iter()
        .find(|action| action.kind == kind)
        .and_then(|action| action.call);

    let call = match call {
        Some(call) => call,
        None => {
            let status = match &context.subscription {
                Some(subscription) => subscription.status.to_string(),
                None => "missing".to_string(),
            };
            return dispatcher.reject(
                UiMessages::Subscription(SubscriptionMessages::ActionUnavailable {
                    action: kind.label().to_string(),
                    status,
                })
                .to_string(),
            );
        }
    };

    let plan_name = context.current_plan_name();
    let request = request_for(&context.session.user.id, &call, &plan_name);
    dispatcher.dispatch(context, request).await
}

fn request_for(user_id: &str, call: &ApiCall, plan_name: &str) -> Request {
    let command = Command::from_call(user_id, call);
    let message = |message: SubscriptionMessages| UiMessages::Subscription(message).to_string();

    match call {
        ApiCall::Create { .. } => Request::new(command, message(SubscriptionMessages::Created)),
        ApiCall::Update { .. } => Request::new(command, message(SubscriptionMessages::Updated)),
        ApiCall::Renew => Request::new(command, message(SubscriptionMessages::Renewed(plan_name.to_string())))
            .confirm_with(message(SubscriptionMessages::ConfirmRenew(plan_name.to_string()))),
        ApiCall::Cancel => Request::new(command, message(SubscriptionMessages::Cancelled))
            .confirm_with(message(SubscriptionMessages::ConfirmCancel)),
    }
}
