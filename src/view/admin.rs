use super::{Intent, Node, Tone};
use crate::catalog::PlanCatalog;
use crate::forms::PlanForm;
use crate::types::{plan::Plan, user::User};
use crate::utilities::format::format_price;

pub const TABLE_HEADERS: [&str; 5] = ["Plan Name", "Price", "Duration", "Features", "Actions"];

pub fn render_admin(user: &User, catalog: &PlanCatalog) -> Node {
    let rows: Vec<Vec<Node>> = catalog.plans().iter().map(plan_row).collect();

    let mut plans = vec![Node::button("Create Plan", Tone::Primary, Intent::CreatePlan)];
    if rows.is_empty() {
        plans.push(Node::text("No plans yet"));
    } else {
        plans.push(Node::Table {
            headers: TABLE_HEADERS.iter().map(|header| header.to_string()).collect(),
            rows,
        });
    }

    Node::Page {
        title: "Admin Panel".to_string(),
        children: vec![
            Node::Group(vec![
                Node::text(format!("Welcome, {}", user.name)),
                Node::button("Logout", Tone::Secondary, Intent::Logout),
            ]),
            Node::Section {
                title: "Plans".to_string(),
                children: plans,
            },
        ],
    }
}

/// Shows what an edit will submit, after pre-filling and overrides.
pub fn render_plan_form(title: &str, form: &PlanForm) -> Node {
    Node::Card {
        title: title.to_string(),
        children: vec![
            Node::detail("Name", form.name.clone()),
            Node::detail("Price", form.price.clone()),
            Node::detail("Duration", form.duration.clone()),
            Node::List(form.features.lines().map(String::from).collect()),
        ],
    }
}

/// First two features, then a count of the rest.
pub fn summarize_features(features: &[String]) -> String {
    let shown = features.iter().take(2).cloned().collect::<Vec<_>>().join(", ");
    if features.len() > 2 {
        format!("{} (+{} more)", shown, features.len() - 2)
    } else {
        shown
    }
}

fn plan_row(plan: &Plan) -> Vec<Node> {
    vec![
        Node::text(plan.name.clone()),
        Node::text(format_price(plan.price)),
        Node::text(plan.duration.to_string()),
        Node::text(summarize_features(&plan.features)),
        Node::Group(vec![
            Node::button("Edit", Tone::Secondary, Intent::EditPlan(plan.id.clone())),
            Node::button("Delete", Tone::Danger, Intent::DeletePlan(plan.id.clone())),
        ]),
    ]
}
