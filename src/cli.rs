//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};

use crate::controllers::admin::PlanEdits;
use crate::forms::PlanForm;

#[derive(Parser, Debug)]
#[command(name = "subdash")]
#[command(version)]
#[command(about = "Manage your SubService subscription from the terminal", long_about = None)]
pub struct Cli {
    /// Backend base URL, including the /api prefix (overrides SUBDASH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where the login session is kept (overrides SUBDASH_SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<String>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true, default_value = "false")]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and open the dashboard
    Login {
        username: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        username: String,

        name: String,

        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show your subscription and the available plans
    Dashboard,

    /// Run the action offered on a plan's card (subscribe, change plan or renew)
    Subscribe { plan_id: String },

    /// Renew a cancelled subscription
    Renew,

    /// Cancel the active subscription
    Cancel,

    /// Plan management (admin account only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List every plan
    Plans,

    /// Create a plan
    Create(PlanArgs),

    /// Edit a plan; omitted fields keep their current value
    Edit {
        plan_id: String,

        #[command(flatten)]
        plan: PlanArgs,
    },

    /// Delete a plan
    Delete { plan_id: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    /// monthly or yearly
    #[arg(long)]
    pub duration: Option<String>,

    /// Newline-separated feature list
    #[arg(long)]
    pub features: Option<String>,

    /// One feature; repeat for more
    #[arg(long = "feature")]
    pub feature: Vec<String>,
}

impl PlanArgs {
    fn feature_text(&self) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();
        if let Some(features) = &self.features {
            parts.push(features.clone());
        }
        parts.extend(self.feature.iter().cloned());

        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n"))
        }
    }

    pub fn into_form(self) -> PlanForm {
        PlanForm {
            features: self.feature_text().unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            duration: self.duration.unwrap_or_default(),
        }
    }

    pub fn into_edits(self) -> PlanEdits {
        PlanEdits {
            features: self.feature_text(),
            name: self.name,
            price: self.price,
            duration: self.duration,
        }
    }
}
