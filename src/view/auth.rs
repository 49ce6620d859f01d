use super::{Intent, Node, Tone};

/// Landing page shown whenever a page redirects to login.
pub fn render_login(reason: Option<&str>) -> Node {
    let mut children = Vec::new();
    if let Some(reason) = reason {
        children.push(Node::text(reason));
    }
    children.push(Node::Group(vec![
        Node::button("Login", Tone::Primary, Intent::Login),
        Node::button("Register", Tone::Secondary, Intent::Register),
    ]));

    Node::Page {
        title: "SubService".to_string(),
        children,
    }
}
