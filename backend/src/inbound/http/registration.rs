//! Registration page handlers.
//!
//! ```text
//! GET  /register        render the form (drains flash messages)
//! POST /register        form-urlencoded submission, 302 to /login or /register
//! GET  /register/list   render registered users (drains flash messages)
//! ```

use std::fmt;

use actix_session::SessionExt;
use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::header::LOCATION;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::registration::{GENERIC_FAILURE_MESSAGE, RedirectTarget};
use crate::domain::{FlashMessage, FlashSeverity, RegistrationRequest, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::flash::FlashMessageQueue;
use crate::inbound::http::render::{
    REGISTRATION_FORM_TEMPLATE, REGISTRATION_LIST_TEMPLATE, view_data,
};
use crate::inbound::http::state::HttpState;

const FORM_TITLE: &str = "User Registration";
const LIST_TITLE: &str = "Registered Users";

/// Registration form body. Missing fields decode as empty strings so that
/// validation, not deserialization, reports them.
#[derive(Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub email_confirm: String,
    #[schema(format = Password)]
    pub password: String,
    #[schema(format = Password)]
    pub password_confirm: String,
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegistrationForm> for RegistrationRequest {
    fn from(form: RegistrationForm) -> Self {
        Self {
            name: form.name,
            email: form.email,
            email_confirm: form.email_confirm,
            password: Zeroizing::new(form.password),
            password_confirm: Zeroizing::new(form.password_confirm),
        }
    }
}

/// Public view of a registered user. Never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
            created_at: user.created_at(),
        }
    }
}

#[derive(Serialize)]
struct FormPage {
    title: &'static str,
    flash: Vec<FlashMessage>,
}

#[derive(Serialize)]
struct ListPage {
    title: &'static str,
    users: Vec<UserView>,
    flash: Vec<FlashMessage>,
}

/// Render the registration form.
#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Rendered registration form"),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["registration"],
    operation_id = "showRegistrationForm"
)]
#[get("/register")]
pub async fn show_registration_form(
    state: web::Data<HttpState>,
    flash: FlashMessageQueue,
) -> ApiResult<HttpResponse> {
    let page = FormPage {
        title: FORM_TITLE,
        flash: flash.drain_and_clear(),
    };
    state
        .renderer
        .render(REGISTRATION_FORM_TEMPLATE, view_data(&page)?)
}

/// Handle a registration submission.
///
/// Always redirects. Feedback travels in the session flash queue and is shown
/// by whichever page renders next.
#[utoipa::path(
    post,
    path = "/register",
    request_body(content = RegistrationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to /login on success, /register otherwise (including undecodable bodies)",
            headers(("Location" = String, description = "Redirect target"))),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["registration"],
    operation_id = "processRegistration"
)]
#[post("/register")]
pub async fn process_registration(
    state: web::Data<HttpState>,
    flash: FlashMessageQueue,
    form: web::Form<RegistrationForm>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .registration
        .register(RegistrationRequest::from(form.into_inner()))
        .await;
    if let Err(err) = flash.push_all(outcome.messages) {
        warn!(error = %err, "failed to queue registration feedback");
    }
    Ok(redirect_to(outcome.redirect))
}

/// Render every registered user. A store failure renders an empty list.
#[utoipa::path(
    get,
    path = "/register/list",
    responses(
        (status = 200, description = "Rendered list of registered users"),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["registration"],
    operation_id = "showAllUsers"
)]
#[get("/register/list")]
pub async fn show_all_users(
    state: web::Data<HttpState>,
    flash: FlashMessageQueue,
) -> ApiResult<HttpResponse> {
    let users = match state.users.list_users().await {
        Ok(users) => users.iter().map(UserView::from).collect(),
        Err(err) => {
            error!(error = %err, code = ?err.code(), "failed to load registered users");
            Vec::new()
        }
    };
    let page = ListPage {
        title: LIST_TITLE,
        users,
        flash: flash.drain_and_clear(),
    };
    state
        .renderer
        .render(REGISTRATION_LIST_TEMPLATE, view_data(&page)?)
}

fn redirect_to(target: RedirectTarget) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, target.path()))
        .finish()
}

/// Send an undecodable submission (wrong content type, oversized body) back to
/// the form with the generic error message instead of a bare 400.
fn reject_unreadable_form(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "registration form could not be decoded");
    let flash = FlashMessageQueue::new(req.get_session());
    if let Err(error) = flash.push(FlashSeverity::Error, GENERIC_FAILURE_MESSAGE) {
        warn!(%error, "failed to queue registration feedback");
    }
    InternalError::from_response(err, redirect_to(RedirectTarget::RegistrationForm)).into()
}

/// Mount the registration routes.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registration::inbound::http::registration::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(reject_unreadable_form))
        .service(show_registration_form)
        .service(process_registration)
        .service(show_all_users);
}

#[cfg(test)]
#[path = "registration_tests.rs"]
mod tests;
