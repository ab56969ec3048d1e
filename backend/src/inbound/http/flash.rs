//! Session-backed flash message queue.
//!
//! Messages pushed while handling one request are shown by the next rendered
//! page, which drains the queue. Undrained messages accumulate across
//! redirects in submission order, up to [`MAX_QUEUED_MESSAGES`]; beyond that
//! the oldest are dropped so the session still fits in its cookie.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, warn};

use crate::domain::{Error, FlashMessage, FlashMessages, FlashSeverity};

pub(crate) const FLASH_KEY: &str = "flash";

/// Most messages a session holds before the oldest are discarded.
pub const MAX_QUEUED_MESSAGES: usize = 16;

/// Per-session queue of [`FlashMessage`]s.
#[derive(Clone)]
pub struct FlashMessageQueue(Session);

impl FlashMessageQueue {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    fn pending(&self) -> Vec<FlashMessage> {
        match self.0.get::<Vec<FlashMessage>>(FLASH_KEY) {
            Ok(messages) => messages.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "discarding unreadable flash messages");
                Vec::new()
            }
        }
    }

    fn store(&self, mut messages: Vec<FlashMessage>) -> Result<(), Error> {
        let overflow = messages.len().saturating_sub(MAX_QUEUED_MESSAGES);
        if overflow > 0 {
            debug!(dropped = overflow, "flash queue full; dropping oldest messages");
            messages = messages.split_off(overflow);
        }
        self.0
            .insert(FLASH_KEY, &messages)
            .map_err(|error| Error::internal(format!("failed to persist flash messages: {error}")))
    }

    /// Append one message.
    pub fn push(&self, severity: FlashSeverity, text: impl Into<String>) -> Result<(), Error> {
        let mut messages = self.pending();
        messages.push(FlashMessage::new(severity, text));
        self.store(messages)
    }

    /// Append a batch, keeping its order.
    pub fn push_all(&self, batch: FlashMessages) -> Result<(), Error> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut messages = self.pending();
        messages.extend(batch);
        self.store(messages)
    }

    /// Return every queued message and empty the queue.
    pub fn drain_and_clear(&self) -> Vec<FlashMessage> {
        match self.0.remove_as::<Vec<FlashMessage>>(FLASH_KEY) {
            Some(Ok(messages)) => messages,
            Some(Err(raw)) => {
                warn!(bytes = raw.len(), "discarding unreadable flash messages");
                Vec::new()
            }
            None => Vec::new(),
        }
    }
}

impl FromRequest for FlashMessageQueue {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(FlashMessageQueue::new) })
    }
}
