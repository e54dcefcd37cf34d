//! Session cookie extraction
//!
//! Handlers that require a login take a `CurrentFarmer` argument;
//! requests without a valid session cookie are redirected to the login
//! page instead of failing.

use axum::{extract::FromRequestParts, http::request::Parts, response::Redirect};
use axum_extra::extract::cookie::CookieJar;

use crate::services::session::{SessionService, SESSION_COOKIE};
use crate::AppState;

/// The logged-in farmer's display name, taken from the session cookie
#[derive(Clone, Debug)]
pub struct CurrentFarmer(pub String);

#[axum::async_trait]
impl FromRequestParts<AppState> for CurrentFarmer {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_request_parts(parts, state)
            .await
            .map_err(|_| Redirect::to("/login"))?;

        let sessions = SessionService::new(&state.config.session);
        jar.get(SESSION_COOKIE)
            .and_then(|cookie| sessions.current_user(cookie.value()))
            .map(CurrentFarmer)
            .ok_or_else(|| Redirect::to("/login"))
    }
}
