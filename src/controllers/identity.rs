use chrono::{DateTime, Utc};
use log::{info, warn};
use thiserror::Error;

use super::{PageError, Redirect};
use crate::api::{ClientError, SubscriptionApi};
use crate::forms::{FormError, RegisterForm};
use crate::storage::{SessionError, SessionStore};
use crate::types::user::Session;
use crate::utilities::messages::SessionMessages;
use crate::utilities::token;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Form(#[from] FormError),
}

/// Exchanges credentials for a token and keeps the session until logout.
pub async fn login(
    api: &dyn SubscriptionApi,
    store: &SessionStore,
    username: &str,
    password: &str,
) -> Result<Session, IdentityError> {
    let data = api.login(username, password).await?;

    let session = Session {
        token: data.token,
        user: data.user,
    };
    store.save(&session)?;
    info!("logged in as {}", session.user.username);

    Ok(session)
}

pub async fn register(api: &dyn SubscriptionApi, form: &RegisterForm) -> Result<(), IdentityError> {
    form.validate()?;
    api.register(&form.username, &form.name, &form.password).await?;
    info!("registered {}", form.username);
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<(), SessionError> {
    store.clear()
}

/// Stored session that still passes [`guard`]; login goes straight to the dashboard with it.
pub fn existing_session(store: &SessionStore, now: DateTime<Utc>) -> Option<Session> {
    guard(store, now).ok()
}

/// Drops the stored session after the backend or the token itself says it is no longer valid.
pub fn expire(store: &SessionStore) -> Result<Redirect, SessionError> {
    store.clear()?;
    Ok(Redirect::to_login(SessionMessages::Expired))
}

/// Entry check for every authenticated page.
pub fn guard(store: &SessionStore, now: DateTime<Utc>) -> Result<Session, PageError> {
    let session = match store.load() {
        Ok(Some(session)) => session,
        Ok(None) => return Err(Redirect::to_login(SessionMessages::LoginRequired).into()),
        Err(SessionError::Corrupt(err)) => {
            warn!("discarding unreadable session at {}: {}", store.path().display(), err);
            store.clear()?;
            return Err(Redirect::to_login(SessionMessages::LoginRequired).into());
        }
        Err(err) => return Err(err.into()),
    };

    if token::is_expired(&session.token, now) {
        info!("stored token for {} has expired", session.user.username);
        return Err(expire(store)?.into());
    }

    Ok(session)
}

/// Like [`guard`], and the user must also be the admin account.
pub fn guard_admin(store: &SessionStore, now: DateTime<Utc>, admin_username: &str) -> Result<Session, PageError> {
    let session = guard(store, now)?;
    if !session.is_admin(admin_username) {
        warn!("{} tried to open the admin panel", session.user.username);
        return Err(Redirect::to_dashboard(SessionMessages::AccessDenied).into());
    }
    Ok(session)
}

/// Turns a page load failure into a redirect when the backend rejected the token.
pub fn page_error(store: &SessionStore, err: ClientError) -> PageError {
    if !err.is_unauthorized() {
        return PageError::Client(err);
    }
    match expire(store) {
        Ok(redirect) => PageError::Redirect(redirect),
        Err(err) => PageError::Session(err),
    }
}
