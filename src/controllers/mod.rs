//! Page controllers: load state for a page, run its actions, project its view.

pub mod admin;
pub mod dashboard;
pub mod identity;

use thiserror::Error;

use crate::api::ClientError;
use crate::storage::SessionError;
use crate::utilities::messages::{SessionMessages, UiMessages};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// Navigation away from the requested page, with the message to show there.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub to: Route,
    pub reason: Option<String>,
}

impl Redirect {
    pub fn to_login(reason: SessionMessages) -> Self {
        Redirect {
            to: Route::Login,
            reason: Some(UiMessages::Session(reason).to_string()),
        }
    }

    pub fn to_dashboard(reason: SessionMessages) -> Self {
        Redirect {
            to: Route::Dashboard,
            reason: Some(UiMessages::Session(reason).to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum PageError {
    #[error("redirected to {:?}", .0.to)]
    Redirect(Redirect),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<Redirect> for PageError {
    fn from(redirect: Redirect) -> Self {
        PageError::Redirect(redirect)
    }
}
