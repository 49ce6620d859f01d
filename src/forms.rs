use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::types::{
    plan::{Plan, PlanDuration},
    requests::PlanPayload,
};

#[derive(Debug, Error, PartialEq)]
pub enum FormError {
    #[error("Please add at least one feature")]
    NoFeatures,

    #[error("Plan name is required")]
    MissingPlanName,

    #[error("Price must be a number of zero or more, got \"{0}\"")]
    InvalidPrice(String),

    #[error("Duration is required")]
    MissingDuration,

    #[error("Duration must be monthly or yearly, got \"{0}\"")]
    InvalidDuration(String),

    #[error("Username must be at least 3 characters without spaces")]
    InvalidUsername,

    #[error("Name is required")]
    MissingName,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Splits newline-separated feature text: each line trimmed, blank lines
/// dropped, order kept. At least one feature is required.
pub fn parse_features(text: &str) -> Result<Vec<String>, FormError> {
    let features: Vec<String> = text
        .split('\n')
        .map(|feature| feature.trim())
        .filter(|feature| !feature.is_empty())
        .map(String::from)
        .collect();

    if features.is_empty() {
        return Err(FormError::NoFeatures);
    }

    Ok(features)
}

/// Raw admin plan form, every field as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanForm {
    pub name: String,
    pub price: String,
    pub duration: String,
    pub features: String,
}

impl PlanForm {
    /// Pre-fills the form for editing an existing plan.
    pub fn from_plan(plan: &Plan) -> PlanForm {
        PlanForm {
            name: plan.name.clone(),
            price: plan.price.to_string(),
            duration: plan.duration.to_string(),
            features: plan.features.join("\n"),
        }
    }

    pub fn validate(&self) -> Result<PlanPayload, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingPlanName);
        }

        let price = match self.price.trim().parse::<f64>() {
            Ok(price) if price.is_finite() && price >= 0.0 => price,
            _ => return Err(FormError::InvalidPrice(self.price.clone())),
        };

        if self.duration.trim().is_empty() {
            return Err(FormError::MissingDuration);
        }
        let duration = match self.duration.parse::<PlanDuration>() {
            Ok(duration) => duration,
            Err(_) => return Err(FormError::InvalidDuration(self.duration.clone())),
        };

        let features = parse_features(&self.features)?;

        Ok(PlanPayload {
            name: name.to_string(),
            price,
            duration,
            features,
        })
    }
}

fn username_pattern() -> &'static Regex {
    static USERNAME: OnceLock<Regex> = OnceLock::new();
    USERNAME.get_or_init(|| Regex::new(r"^\S{3,}$").unwrap())
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub name: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormError> {
        if !username_pattern().is_match(self.username.as_str()) {
            return Err(FormError::InvalidUsername);
        }

        if self.name.trim().is_empty() {
            return Err(FormError::MissingName);
        }

        if self.password.chars().count() < 6 {
            return Err(FormError::PasswordTooShort);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn features_are_trimmed_and_blank_lines_dropped() {
        assert_eq!(parse_features("a\n\nb \n ").unwrap(), vec!["a", "b"]);
        assert_eq!(
            parse_features("  Unlimited storage\r\nPriority support\n\n").unwrap(),
            vec!["Unlimited storage", "Priority support"]
        );
    }

    #[test]
    fn blank_feature_text_is_rejected() {
        assert_eq!(parse_features(""), Err(FormError::NoFeatures));
        assert_eq!(parse_features(" \n\t\n  "), Err(FormError::NoFeatures));
    }

    #[test]
    fn plan_form_builds_payload() {
        let form = PlanForm {
            name: " Pro ".to_string(),
            price: "999.5".to_string(),
            duration: "yearly".to_string(),
            features: "X\nY\nZ".to_string(),
        };

        let payload = form.validate().unwrap();

        assert_eq!(payload.name, "Pro");
        assert_eq!(payload.price, 999.5);
        assert_eq!(payload.duration, PlanDuration::Yearly);
        assert_eq!(payload.features, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn plan_form_rejects_bad_fields() {
        let valid = PlanForm {
            name: "Pro".to_string(),
            price: "10".to_string(),
            duration: "monthly".to_string(),
            features: "X".to_string(),
        };

        let mut form = valid.clone();
        form.name = "  ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingPlanName));

        let mut form = valid.clone();
        form.price = "-1".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidPrice("-1".to_string())));

        let mut form = valid.clone();
        form.duration = " ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingDuration));

        let mut form = valid.clone();
        form.duration = "weekly".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidDuration("weekly".to_string())));

        let mut form = valid;
        form.features = "\n\n".to_string();
        assert_eq!(form.validate(), Err(FormError::NoFeatures));
    }

    #[test]
    fn edit_form_is_prefilled_from_plan() {
        let plan = Plan {
            id: "P1".to_string(),
            name: "Basic".to_string(),
            price: 199.0,
            duration: PlanDuration::Monthly,
            features: vec!["One".to_string(), "Two".to_string()],
        };

        let form = PlanForm::from_plan(&plan);

        assert_eq!(form.features, "One\nTwo");
        assert_eq!(form.duration, "monthly");
        assert_eq!(form.validate().unwrap().price, 199.0);
    }

    #[test]
    fn register_form_checks_lengths() {
        let mut form = RegisterForm {
            username: "as".to_string(),
            name: "Asha".to_string(),
            password: "secret1".to_string(),
        };
        assert_eq!(form.validate(), Err(FormError::InvalidUsername));

        form.username = "asha k".to_string();
        assert_eq!(form.validate(), Err(FormError::InvalidUsername));

        form.username = "asha".to_string();
        form.password = "short".to_string();
        assert_eq!(form.validate(), Err(FormError::PasswordTooShort));

        form.password = "secret1".to_string();
        assert!(form.validate().is_ok());
    }
}
