//! Account and session handlers

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentFarmer;
use crate::services::session::{SessionService, SESSION_COOKIE};
use crate::services::FarmerService;
use crate::views;
use crate::AppState;

#[derive(Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration page
pub async fn register_form() -> Html<String> {
    Html(views::register_page(None, None))
}

/// Handle a registration submission
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> AppResult<Html<String>> {
    let service = FarmerService::new(state.db.clone());

    match service
        .register(&form.name, &form.email, &form.password)
        .await
    {
        Ok(farmer) => {
            tracing::info!(email = %farmer.email, "Farmer registered");
            Ok(Html(views::register_page(
                None,
                Some("Successfully registered! Please log in."),
            )))
        }
        Err(AppError::DuplicateEmail) => {
            Ok(Html(views::register_page(Some("Email already exists!"), None)))
        }
        Err(AppError::Validation(message)) => {
            Ok(Html(views::register_page(Some(message), None)))
        }
        Err(e) => Err(e),
    }
}

/// Login page
pub async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

/// Handle a login submission: set the session cookie and redirect
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let service = FarmerService::new(state.db.clone());

    match service.authenticate(&form.email, &form.password).await {
        Ok(farmer) => {
            let sessions = SessionService::new(&state.config.session);
            let token = sessions.start_session(&farmer.name)?;

            let cookie = Cookie::build((SESSION_COOKIE, token))
                .path("/")
                .http_only(true)
                .build();

            Ok((jar.add(cookie), Redirect::to("/dashboard")).into_response())
        }
        Err(AppError::InvalidCredentials) => {
            Ok(Html(views::login_page(Some("Invalid email or password!"))).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Dashboard, gated on a valid session
pub async fn dashboard(CurrentFarmer(name): CurrentFarmer) -> Html<String> {
    Html(views::dashboard_page(&name))
}

/// Clear the session cookie and return to the login page
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let cookie = Cookie::build((SESSION_COOKIE, "")).path("/").build();
    (jar.remove(cookie), Redirect::to("/login"))
}
