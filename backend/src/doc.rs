//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the registration pages and the schemas they exchange.
//! Swagger UI serves it at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::registration::{ValidationCode, ValidationError};
use crate::domain::{Error, ErrorCode, FlashMessage, FlashSeverity};
use crate::inbound::http::registration::{RegistrationForm, UserView};

/// OpenAPI document for the registration service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Registration service",
        description = "Form-driven user registration with session flash feedback.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::registration::show_registration_form,
        crate::inbound::http::registration::process_registration,
        crate::inbound::http::registration::show_all_users,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FlashMessage,
        FlashSeverity,
        RegistrationForm,
        UserView,
        ValidationCode,
        ValidationError,
    )),
    tags(
        (name = "registration", description = "User registration pages")
    )
)]
pub struct ApiDoc;
