use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Blocking user interaction: confirmation dialogs and notifications.
pub trait Prompter: Send + Sync {
    fn confirm(&self, question: &str) -> bool;

    fn notify(&self, message: &str);

    fn alert(&self, message: &str);
}

pub struct TerminalPrompter {
    assume_yes: bool,
}

impl TerminalPrompter {
    pub fn new(assume_yes: bool) -> Self {
        TerminalPrompter { assume_yes }
    }

    /// Reads one line from stdin after printing `label`.
    pub fn ask(&self, label: &str) -> io::Result<String> {
        print!("{} ", label.bold());
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string())
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            println!("{} {} {}", "?".yellow().bold(), question, "yes".dimmed());
            return true;
        }

        let answer = match self.ask(&format!("{} {} [y/N]", "?".yellow(), question)) {
            Ok(answer) => answer,
            Err(_) => return false,
        };
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }

    fn notify(&self, message: &str) {
        println!("{} {}", "✓".green().bold(), message);
    }

    fn alert(&self, message: &str) {
        eprintln!("{} {}", "✗".red().bold(), message);
    }
}
