use colored::Colorize;

use super::{Intent, Node, Tone};

/// Terminal command that performs an intent.
pub fn command_hint(intent: &Intent) -> String {
    match intent {
        Intent::ChoosePlan(plan_id) => format!("subdash subscribe {}", plan_id),
        Intent::Renew => "subdash renew".to_string(),
        Intent::Cancel => "subdash cancel".to_string(),
        Intent::BrowsePlans => "subdash dashboard".to_string(),
        Intent::OpenAdmin => "subdash admin plans".to_string(),
        Intent::CreatePlan => "subdash admin create".to_string(),
        Intent::EditPlan(plan_id) => format!("subdash admin edit {}", plan_id),
        Intent::DeletePlan(plan_id) => format!("subdash admin delete {}", plan_id),
        Intent::Logout => "subdash logout".to_string(),
        Intent::Login => "subdash login".to_string(),
        Intent::Register => "subdash register".to_string(),
    }
}

pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn plain() -> Self {
        TextRenderer { color: false }
    }

    pub fn colored() -> Self {
        TextRenderer { color: true }
    }

    pub fn render(&self, node: &Node) -> String {
        let mut out = String::new();
        self.write(node, 0, &mut out);
        out
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Primary => text.blue().bold().to_string(),
            Tone::Secondary => text.normal().to_string(),
            Tone::Success => text.green().bold().to_string(),
            Tone::Warning => text.yellow().bold().to_string(),
            Tone::Danger => text.red().bold().to_string(),
            Tone::Muted => text.dimmed().to_string(),
        }
    }

    fn strong(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn write(&self, node: &Node, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        match node {
            Node::Page { title, children } => {
                out.push_str(&format!("{}\n{}\n", self.strong(&title.to_uppercase()), "=".repeat(title.chars().count())));
                for child in children {
                    self.write(child, depth, out);
                }
            }
            Node::Section { title, children } => {
                out.push_str(&format!("\n{}{}\n{}{}\n", indent, self.strong(title), indent, "-".repeat(title.chars().count())));
                for child in children {
                    self.write(child, depth, out);
                }
            }
            Node::Card { title, children } => {
                out.push_str(&format!("{}┌ {}\n", indent, self.strong(title)));
                for child in children {
                    self.write(child, depth + 1, out);
                }
            }
            Node::Group(children) => {
                for child in children {
                    self.write(child, depth, out);
                }
            }
            Node::Heading(text) => out.push_str(&format!("{}{}\n", indent, self.strong(text))),
            Node::Text(text) => out.push_str(&format!("{}{}\n", indent, text)),
            Node::Badge { label, tone } => {
                out.push_str(&format!("{}{}\n", indent, self.paint(&format!("[{}]", label), *tone)))
            }
            Node::Detail { label, value } => out.push_str(&format!("{}{:<12} {}\n", indent, label, value)),
            Node::List(items) => {
                for item in items {
                    out.push_str(&format!("{}• {}\n", indent, item));
                }
            }
            Node::Button {
                label,
                tone,
                enabled,
                intent,
            } => {
                let button = format!("[ {} ]", label);
                match (enabled, intent) {
                    (true, Some(intent)) => out.push_str(&format!(
                        "{}{}  → {}\n",
                        indent,
                        self.paint(&button, *tone),
                        command_hint(intent)
                    )),
                    _ => out.push_str(&format!("{}{}\n", indent, self.paint(&button, Tone::Muted))),
                }
            }
            Node::Table { headers, rows } => self.write_table(headers, rows, &indent, out),
        }
    }

    fn write_table(&self, headers: &[String], rows: &[Vec<Node>], indent: &str, out: &mut String) {
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|header| header.chars().count()).collect();
        for row in &cells {
            for (index, cell) in row.iter().enumerate() {
                if let Some(width) = widths.get_mut(index) {
                    *width = (*width).max(cell.chars().count());
                }
            }
        }

        let line = |values: &[String]| -> String {
            values
                .iter()
                .zip(&widths)
                .map(|(value, width)| {
                    let padding = width.saturating_sub(value.chars().count());
                    format!("{}{}", value, " ".repeat(padding))
                })
                .collect::<Vec<_>>()
                .join(" | ")
        };

        out.push_str(&format!("{}{}\n", indent, self.strong(line(headers).trim_end())));
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        out.push_str(&format!("{}{}\n", indent, rule.join("-+-")));
        for row in &cells {
            out.push_str(&format!("{}{}\n", indent, line(row.as_slice()).trim_end()));
        }
    }
}

// table cells are flattened to one line
fn cell_text(node: &Node) -> String {
    match node {
        Node::Text(text) | Node::Heading(text) => text.clone(),
        Node::Badge { label, .. } => format!("[{}]", label),
        Node::Button { label, .. } => label.clone(),
        Node::Group(children) => {
            let labels: Vec<String> = children.iter().map(cell_text).collect();
            let target = children.iter().find_map(|child| match child {
                Node::Button {
                    intent: Some(Intent::EditPlan(id)),
                    ..
                }
                | Node::Button {
                    intent: Some(Intent::DeletePlan(id)),
                    ..
                } => Some(id.clone()),
                _ => None,
            });
            match target {
                Some(id) => format!("{} {}", labels.join("/"), id),
                None => labels.join("/"),
            }
        }
        Node::List(items) => items.join(", "),
        Node::Detail { label, value } => format!("{}: {}", label, value),
        _ => String::new(),
    }
}
