use log::debug;

use crate::api::{ClientError, SubscriptionApi};
use crate::types::plan::Plan;

/// Plans fetched for the current page. Never cached across pages; every
/// dashboard or admin load fetches a fresh copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        PlanCatalog { plans }
    }

    pub async fn load(api: &dyn SubscriptionApi) -> Result<PlanCatalog, ClientError> {
        let plans = api.list_plans().await?;
        debug!("loaded {} plans", plans.len());
        Ok(PlanCatalog::new(plans))
    }

    pub fn get(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.iter().find(|plan| plan.id == plan_id)
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use crate::types::plan::PlanDuration;

    #[tokio::test]
    async fn loads_plans_and_looks_them_up() {
        let backend = FakeBackend::new()
            .with_plan("P1", "Basic", 199.0, PlanDuration::Monthly, &["One"])
            .with_plan("P2", "Pro", 1999.0, PlanDuration::Yearly, &["One", "Two"]);

        let catalog = PlanCatalog::load(&backend.client(None)).await.unwrap();

        assert_eq!(catalog.plans().len(), 2);
        assert_eq!(catalog.get("P2").map(|plan| plan.name.as_str()), Some("Pro"));
        assert!(catalog.get("missing").is_none());
    }
}
