use super::{Intent, Node, Tone};
use crate::catalog::PlanCatalog;
use crate::resolver::{self, ResolvedAction};
use crate::types::{plan::Plan, subscription::Subscription, user::User};
use crate::utilities::format::{format_date, format_price};

pub const UNKNOWN_PLAN: &str = "Unknown Plan";
pub const NOT_AVAILABLE: &str = "N/A";

pub fn render_dashboard(
    user: &User,
    catalog: &PlanCatalog,
    subscription: Option<&Subscription>,
    show_admin_link: bool,
) -> Node {
    let resolution = resolver::resolve(subscription, catalog);

    let mut header = vec![Node::text(format!("Welcome, {}", user.name))];
    if show_admin_link {
        header.push(Node::button("Admin Panel", Tone::Warning, Intent::OpenAdmin));
    }
    header.push(Node::button("Logout", Tone::Secondary, Intent::Logout));

    let plan_cards: Vec<Node> = if catalog.is_empty() {
        vec![Node::text("No plans available")]
    } else {
        resolution
            .plan_actions
            .iter()
            .filter_map(|(plan_id, action)| catalog.get(plan_id).map(|plan| plan_card(plan, action)))
            .collect()
    };

    Node::Page {
        title: "SubService Dashboard".to_string(),
        children: vec![
            Node::Group(header),
            Node::Section {
                title: "My Subscription".to_string(),
                children: subscription_panel(catalog, subscription, &resolution.management),
            },
            Node::Section {
                title: "Available Plans".to_string(),
                children: plan_cards,
            },
        ],
    }
}

fn subscription_panel(
    catalog: &PlanCatalog,
    subscription: Option<&Subscription>,
    management: &[ResolvedAction],
) -> Vec<Node> {
    let subscription = match subscription {
        Some(subscription) => subscription,
        None => {
            return vec![
                Node::Heading("No Active Subscription".to_string()),
                Node::text("Choose from our amazing plans to get started with SubService"),
                Node::button("Browse Plans", Tone::Secondary, Intent::BrowsePlans),
            ]
        }
    };

    // the plan may have been deleted since the user subscribed
    let plan = catalog.get(&subscription.plan_id);

    let mut children = vec![
        Node::Badge {
            label: subscription.status.to_string(),
            tone: Tone::for_status(subscription.status),
        },
        Node::detail("Plan Name", plan.map(|p| p.name.clone()).unwrap_or_else(|| UNKNOWN_PLAN.to_string())),
        Node::detail("Price", plan.map(|p| format_price(p.price)).unwrap_or_else(|| NOT_AVAILABLE.to_string())),
        Node::detail("Duration", plan.map(|p| p.duration.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string())),
        Node::detail("Started On", format_date(&subscription.start_date)),
        Node::detail("Expires On", format_date(&subscription.expires_at)),
        Node::detail(
            "Features",
            format!("{} features included", plan.map(|p| p.features.len()).unwrap_or(0)),
        ),
    ];

    if !management.is_empty() {
        children.push(Node::Group(management.iter().map(management_button).collect()));
    }

    children
}

fn plan_card(plan: &Plan, action: &ResolvedAction) -> Node {
    Node::Card {
        title: plan.name.clone(),
        children: vec![
            Node::text(format!("{} / {}", format_price(plan.price), plan.duration)),
            Node::List(plan.features.clone()),
            Node::Button {
                label: action.label.clone(),
                tone: Tone::for_action(action.kind),
                enabled: action.enabled,
                intent: if action.enabled {
                    Some(Intent::ChoosePlan(plan.id.clone()))
                } else {
                    None
                },
            },
        ],
    }
}

fn management_button(action: &ResolvedAction) -> Node {
    let intent = match action.kind {
        resolver::ActionKind::Cancel => Intent::Cancel,
        _ => Intent::Renew,
    };
    Node::Button {
        label: action.label.clone(),
        tone: Tone::for_action(action.kind),
        enabled: action.enabled,
        intent: Some(intent),
    }
}
