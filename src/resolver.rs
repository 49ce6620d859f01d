//! Maps subscription state to the actions the dashboard offers.
//!
//! The mapping is a pure function of the subscription (or its absence), its
//! status, and whether a plan card is the subscribed plan:
//!
//! | status    | card = current plan           | card = other plan             | subscription panel      |
//! |-----------|-------------------------------|-------------------------------|-------------------------|
//! | none      | -                             | Subscribe (create)            | nothing                 |
//! | ACTIVE    | Current Plan (disabled)       | Change Plan (update)          | Cancel Subscription     |
//! | CANCELLED | Renew (renew)                 | Change Plan (create)          | Renew (plan name)       |
//! | EXPIRED   | Subscribe to New Plan (create)| Subscribe to New Plan (create)| hidden                  |
//! | INACTIVE  | Subscribe to New Plan (create)| Subscribe to New Plan (create)| hidden                  |
//!
//! A cancelled subscription switches plan through the create call because the
//! backend only updates ACTIVE subscriptions, while create re-activates on the
//! chosen plan.

use crate::catalog::PlanCatalog;
use crate::types::subscription::{Subscription, SubscriptionStatus};

pub const FALLBACK_PLAN_LABEL: &str = "Current Plan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Subscribe,
    CurrentPlan,
    ChangePlan,
    Renew,
    SubscribeToNewPlan,
    Cancel,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Subscribe => "Subscribe",
            ActionKind::CurrentPlan => "Current Plan",
            ActionKind::ChangePlan => "Change Plan",
            ActionKind::Renew => "Renew",
            ActionKind::SubscribeToNewPlan => "Subscribe to New Plan",
            ActionKind::Cancel => "Cancel Subscription",
        }
    }
}

/// The backend call an action triggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Create { plan_id: String },
    Update { plan_id: String },
    Renew,
    Cancel,
}

impl ApiCall {
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, ApiCall::Renew | ApiCall::Cancel)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAction {
    pub kind: ActionKind,
    pub label: String,
    pub enabled: bool,
    pub call: Option<ApiCall>,
}

impl ResolvedAction {
    fn enabled(kind: ActionKind, call: ApiCall) -> Self {
        ResolvedAction {
            kind,
            label: kind.label().to_string(),
            enabled: true,
            call: Some(call),
        }
    }

    fn disabled(kind: ActionKind) -> Self {
        ResolvedAction {
            kind,
            label: kind.label().to_string(),
            enabled: false,
            call: None,
        }
    }

    fn labelled(mut self, label: String) -> Self {
        self.label = label;
        self
    }
}

/// Everything the renderer needs to draw actions for one page load.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub status: Option<SubscriptionStatus>,
    /// One entry per catalog plan, in catalog order.
    pub plan_actions: Vec<(String, ResolvedAction)>,
    pub management: Vec<ResolvedAction>,
}

impl Resolution {
    pub fn action_for(&self, plan_id: &str) -> Option<&ResolvedAction> {
        self.plan_actions
            .iter()
            .find(|(id, _)| id == plan_id)
            .map(|(_, action)| action)
    }
}

/// Action shown on the card of `target_plan_id`.
pub fn action_for_plan(subscription: Option<&Subscription>, target_plan_id: &str) -> ResolvedAction {
    let target = target_plan_id.to_string();
    let subscription = match subscription {
        Some(subscription) => subscription,
        None => return ResolvedAction::enabled(ActionKind::Subscribe, ApiCall::Create { plan_id: target }),
    };

    let is_current = subscription.plan_id == target_plan_id;
    match (subscription.status, is_current) {
        (SubscriptionStatus::Active, true) => ResolvedAction::disabled(ActionKind::CurrentPlan),
        (SubscriptionStatus::Active, false) => {
            ResolvedAction::enabled(ActionKind::ChangePlan, ApiCall::Update { plan_id: target })
        }
        (SubscriptionStatus::Cancelled, true) => ResolvedAction::enabled(ActionKind::Renew, ApiCall::Renew),
        (SubscriptionStatus::Cancelled, false) => {
            ResolvedAction::enabled(ActionKind::ChangePlan, ApiCall::Create { plan_id: target })
        }
        (SubscriptionStatus::Expired, _) | (SubscriptionStatus::Inactive, _) => {
            ResolvedAction::enabled(ActionKind::SubscribeToNewPlan, ApiCall::Create { plan_id: target })
        }
    }
}

/// Actions on the subscription panel itself, independent of any plan card.
pub fn management_actions(subscription: Option<&Subscription>, catalog: &PlanCatalog) -> Vec<ResolvedAction> {
    let subscription = match subscription {
        Some(subscription) => subscription,
        None => return Vec::new(),
    };

    match subscription.status {
        SubscriptionStatus::Active => vec![ResolvedAction::enabled(ActionKind::Cancel, ApiCall::Cancel)],
        SubscriptionStatus::Cancelled => {
            let plan_name = catalog
                .get(&subscription.plan_id)
                .map(|plan| plan.name.as_str())
                .unwrap_or(FALLBACK_PLAN_LABEL);
            vec![ResolvedAction::enabled(ActionKind::Renew, ApiCall::Renew)
                .labelled(format!("Renew ({})", plan_name))]
        }
        SubscriptionStatus::Expired | SubscriptionStatus::Inactive => Vec::new(),
    }
}

pub fn resolve(subscription: Option<&Subscription>, catalog: &PlanCatalog) -> Resolution {
    let plan_actions = catalog
        .plans()
        .iter()
        .map(|plan| (plan.id.clone(), action_for_plan(subscription, &plan.id)))
        .collect();

    Resolution {
        status: subscription.map(|subscription| subscription.status),
        plan_actions,
        management: management_actions(subscription, catalog),
    }
}
