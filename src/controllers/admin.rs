use async_trait::async_trait;

use super::{identity, PageError};
use crate::api::{ClientError, SubscriptionApi};
use crate::catalog::PlanCatalog;
use crate::dispatcher::{Command, Dispatcher, Outcome, Reload, Request};
use crate::forms::PlanForm;
use crate::storage::SessionStore;
use crate::types::user::Session;
use crate::utilities::messages::{failure, PlanMessages, UiMessages};
use crate::view::{admin::render_admin, Node};

#[derive(Debug, Clone)]
pub struct AdminContext {
    pub session: Session,
    pub catalog: PlanCatalog,
}

#[async_trait]
impl Reload for AdminContext {
    async fn reload(&mut self, api: &dyn SubscriptionApi) -> Result<(), ClientError> {
        self.catalog = PlanCatalog::load(api).await?;
        Ok(())
    }
}

/// Loads the plan table for a session that already passed `guard_admin`.
pub async fn open(api: &dyn SubscriptionApi, store: &SessionStore, session: Session) -> Result<AdminContext, PageError> {
    match PlanCatalog::load(api).await {
        Ok(catalog) => Ok(AdminContext { session, catalog }),
        Err(err) => Err(identity::page_error(store, err)),
    }
}

pub fn view(context: &AdminContext) -> Node {
    render_admin(&context.session.user, &context.catalog)
}

/// Field overrides applied on top of a plan's current values.
#[derive(Debug, Clone, Default)]
pub struct PlanEdits {
    pub name: Option<String>,
    pub price: Option<String>,
    pub duration: Option<String>,
    pub features: Option<String>,
}

impl PlanEdits {
    pub fn apply(self, mut form: PlanForm) -> PlanForm {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(price) = self.price {
            form.price = price;
        }
        if let Some(duration) = self.duration {
            form.duration = duration;
        }
        if let Some(features) = self.features {
            form.features = features;
        }
        form
    }
}

fn plan_message(message: PlanMessages) -> String {
    UiMessages::Plan(message).to_string()
}

pub async fn create_plan(dispatcher: &Dispatcher<'_>, context: &mut AdminContext, form: &PlanForm) -> Outcome {
    let plan = match form.validate() {
        Ok(plan) => plan,
        Err(err) => return dispatcher.reject(err.to_string()),
    };

    let request = Request::new(Command::CreatePlan(plan), plan_message(PlanMessages::Created))
        .on_failure(failure::CREATE_PLAN);
    dispatcher.dispatch(context, request).await
}

/// Form an edit would submit: the plan's current values with `edits` on top.
pub fn edit_form(context: &AdminContext, plan_id: &str, edits: PlanEdits) -> Option<PlanForm> {
    context
        .catalog
        .get(plan_id)
        .map(|plan| edits.apply(PlanForm::from_plan(plan)))
}

pub async fn edit_plan(
    dispatcher: &Dispatcher<'_>,
    context: &mut AdminContext,
    plan_id: &str,
    edits: PlanEdits,
) -> Outcome {
    let form = match edit_form(context, plan_id, edits) {
        Some(form) => form,
        None => return dispatcher.reject(plan_message(PlanMessages::NotFound(plan_id.to_string()))),
    };

    let plan = match form.validate() {
        Ok(plan) => plan,
        Err(err) => return dispatcher.reject(err.to_string()),
    };

    let command = Command::UpdatePlan {
        plan_id: plan_id.to_string(),
        plan,
    };
    let request = Request::new(command, plan_message(PlanMessages::Updated)).on_failure(failure::UPDATE_PLAN);
    dispatcher.dispatch(context, request).await
}

pub async fn delete_plan(dispatcher: &Dispatcher<'_>, context: &mut AdminContext, plan_id: &str) -> Outcome {
    let plan_name = match context.catalog.get(plan_id) {
        Some(plan) => plan.name.clone(),
        None => return dispatcher.reject(plan_message(PlanMessages::NotFound(plan_id.to_string()))),
    };

    let command = Command::DeletePlan {
        plan_id: plan_id.to_string(),
    };
    let request = Request::new(command, plan_message(PlanMessages::Deleted))
        .confirm_with(plan_message(PlanMessages::ConfirmDelete(plan_name)))
        .on_failure(failure::DELETE_PLAN);
    dispatcher.dispatch(context, request).await
}
