use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum UiMessages {
    Subscription(SubscriptionMessages),
    Plan(PlanMessages),
    Session(SessionMessages),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionMessages {
    Created,
    Updated,
    Renewed(String),
    Cancelled,

    ConfirmCancel,
    ConfirmRenew(String),

    AlreadyOnPlan(String),
    ActionUnavailable { action: String, status: String },
    UnknownPlan(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanMessages {
    Created,
    Updated,
    Deleted,
    ConfirmDelete(String),
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionMessages {
    LoginRequired,
    Expired,
    AccessDenied,
    RegistrationSuccessful,
    LoggedIn(String),
    LoggedOut,
    ActionInProgress,
}

/// Prefixes put in front of a server message when an action fails.
pub mod failure {
    pub const DASHBOARD: &str = "Error: ";
    pub const CREATE_PLAN: &str = "Error creating plan: ";
    pub const UPDATE_PLAN: &str = "Error updating plan: ";
    pub const DELETE_PLAN: &str = "Error deleting plan: ";
}

impl fmt::Display for UiMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UiMessages::Subscription(message) => fmt::Display::fmt(message, f),
            UiMessages::Plan(message) => fmt::Display::fmt(message, f),
            UiMessages::Session(message) => fmt::Display::fmt(message, f),
        }
    }
}

impl fmt::Display for SubscriptionMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionMessages::Created => write!(f, "Subscription created successfully!"),
            SubscriptionMessages::Updated => write!(f, "Subscription updated successfully!"),
            SubscriptionMessages::Renewed(plan_name) => write!(f, "{} renewed successfully!", plan_name),
            SubscriptionMessages::Cancelled => write!(f, "Subscription cancelled successfully!"),
            SubscriptionMessages::ConfirmCancel => {
                write!(f, "Are you sure you want to cancel your subscription?")
            }
            SubscriptionMessages::ConfirmRenew(plan_name) => {
                write!(f, "Are you sure you want to renew {}?", plan_name)
            }
            SubscriptionMessages::AlreadyOnPlan(plan_name) => {
                write!(f, "You are already subscribed to {}", plan_name)
            }
            SubscriptionMessages::ActionUnavailable { action, status } => {
                write!(f, "{} is not available while the subscription is {}", action, status)
            }
            SubscriptionMessages::UnknownPlan(plan_id) => write!(f, "Unknown plan: {}", plan_id),
        }
    }
}

impl fmt::Display for PlanMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanMessages::Created => write!(f, "Plan created successfully!"),
            PlanMessages::Updated => write!(f, "Plan updated successfully!"),
            PlanMessages::Deleted => write!(f, "Plan deleted successfully!"),
            PlanMessages::ConfirmDelete(plan_name) => write!(
                f,
                "Are you sure you want to delete the plan \"{}\"? This action cannot be undone.",
                plan_name
            ),
            PlanMessages::NotFound(plan_id) => write!(f, "Plan not found: {}", plan_id),
        }
    }
}

impl fmt::Display for SessionMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMessages::LoginRequired => write!(f, "Please log in to continue"),
            SessionMessages::Expired => write!(f, "Your session has expired. Please log in again."),
            SessionMessages::AccessDenied => write!(f, "Access denied. Admin privileges required."),
            SessionMessages::RegistrationSuccessful => {
                write!(f, "Registration successful! Please login.")
            }
            SessionMessages::LoggedIn(name) => write!(f, "Welcome, {}", name),
            SessionMessages::LoggedOut => write!(f, "Logged out"),
            SessionMessages::ActionInProgress => write!(f, "Another action is already in progress"),
        }
    }
}
