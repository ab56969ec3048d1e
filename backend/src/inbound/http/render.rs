//! Page rendering port and the JSON adapter used in place of HTML templates.

use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::Value;

use crate::domain::Error;

/// Registration form view.
pub const REGISTRATION_FORM_TEMPLATE: &str = "forms/registration/form";
/// Registered users view.
pub const REGISTRATION_LIST_TEMPLATE: &str = "forms/registration/list";

/// Renders a named view with a data object into a response.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer: Send + Sync {
    /// Produce the response for `template` given `data`.
    fn render(&self, template: &str, data: Value) -> Result<HttpResponse, Error>;
}

/// Body produced by [`JsonRenderer`].
#[derive(Debug, Serialize)]
struct RenderedView<'a> {
    template: &'a str,
    data: Value,
}

/// Renders `{ "template": ..., "data": ... }` as `application/json`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, template: &str, data: Value) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::Ok().json(RenderedView { template, data }))
    }
}

/// Serialize view data, mapping failures to an internal error.
pub(crate) fn view_data<T: Serialize>(data: &T) -> Result<Value, Error> {
    serde_json::to_value(data)
        .map_err(|error| Error::internal(format!("failed to serialise view data: {error}")))
}
