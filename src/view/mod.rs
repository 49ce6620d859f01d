//! Target-independent view tree. Page projections in `dashboard` and `admin`
//! only read state; `text` draws the tree for a terminal.

pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod text;

use crate::resolver::ActionKind;
use crate::types::subscription::SubscriptionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Secondary,
    Success,
    Warning,
    Danger,
    Muted,
}

impl Tone {
    pub fn for_status(status: SubscriptionStatus) -> Tone {
        match status {
            SubscriptionStatus::Active => Tone::Success,
            SubscriptionStatus::Cancelled => Tone::Warning,
            SubscriptionStatus::Expired => Tone::Danger,
            SubscriptionStatus::Inactive => Tone::Muted,
        }
    }

    pub fn for_action(kind: ActionKind) -> Tone {
        match kind {
            ActionKind::Subscribe | ActionKind::SubscribeToNewPlan => Tone::Primary,
            ActionKind::CurrentPlan => Tone::Secondary,
            ActionKind::ChangePlan => Tone::Warning,
            ActionKind::Renew => Tone::Success,
            ActionKind::Cancel => Tone::Danger,
        }
    }
}

/// What activating a control would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ChoosePlan(String),
    Renew,
    Cancel,
    BrowsePlans,
    OpenAdmin,
    CreatePlan,
    EditPlan(String),
    DeletePlan(String),
    Logout,
    Login,
    Register,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Page {
        title: String,
        children: Vec<Node>,
    },
    Section {
        title: String,
        children: Vec<Node>,
    },
    Card {
        title: String,
        children: Vec<Node>,
    },
    Heading(String),
    Text(String),
    Badge {
        label: String,
        tone: Tone,
    },
    Detail {
        label: String,
        value: String,
    },
    List(Vec<String>),
    Button {
        label: String,
        tone: Tone,
        enabled: bool,
        intent: Option<Intent>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Node>>,
    },
    Group(Vec<Node>),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Node {
        Node::Text(text.into())
    }

    pub fn detail(label: impl Into<String>, value: impl Into<String>) -> Node {
        Node::Detail {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn button(label: impl Into<String>, tone: Tone, intent: Intent) -> Node {
        Node::Button {
            label: label.into(),
            tone,
            enabled: true,
            intent: Some(intent),
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Page { children, .. } | Node::Section { children, .. } | Node::Card { children, .. } => {
                children.as_slice()
            }
            Node::Group(children) => children.as_slice(),
            _ => &[],
        }
    }

    /// Depth-first walk over this node and every descendant, table cells included.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
        if let Node::Table { rows, .. } = self {
            for cell in rows.iter().flatten() {
                cell.walk(visit);
            }
        }
    }

    pub fn find_all<'a>(&'a self, predicate: impl Fn(&Node) -> bool) -> Vec<&'a Node> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if predicate(node) {
                found.push(node);
            }
        });
        found
    }

    /// Every button in the tree, in document order.
    pub fn buttons(&self) -> Vec<&Node> {
        self.find_all(|node| matches!(node, Node::Button { .. }))
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        !self
            .find_all(|node| match node {
                Node::Text(text) | Node::Heading(text) => text.contains(needle),
                Node::Detail { label, value } => label.contains(needle) || value.contains(needle),
                Node::Badge { label, .. } | Node::Button { label, .. } => label.contains(needle),
                Node::Card { title, .. } | Node::Section { title, .. } | Node::Page { title, .. } => {
                    title.contains(needle)
                }
                Node::List(items) => items.iter().any(|item| item.contains(needle)),
                _ => false,
            })
            .is_empty()
    }
}
