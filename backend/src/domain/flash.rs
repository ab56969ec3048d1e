//! Severity-tagged status messages shown on the next rendered page.
//!
//! The domain only produces [`FlashMessages`] values. Storing them between
//! requests is the job of the inbound adapter.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FlashSeverity {
    Error,
    Warning,
    Success,
}

/// A single status message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashMessage {
    pub severity: FlashSeverity,
    pub text: String,
}

impl FlashMessage {
    /// Build a message with the given severity.
    pub fn new(severity: FlashSeverity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(FlashSeverity::Error, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(FlashSeverity::Warning, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(FlashSeverity::Success, text)
    }
}

/// Ordered batch of flash messages.
///
/// # Examples
/// ```
/// use registration::domain::{FlashMessage, FlashMessages, FlashSeverity};
///
/// let mut messages = FlashMessages::default();
/// messages.push(FlashMessage::warning("Email already registered"));
/// assert_eq!(messages.len(), 1);
/// assert!(messages.iter().all(|m| m.severity == FlashSeverity::Warning));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlashMessages(Vec<FlashMessage>);

impl FlashMessages {
    /// Append a message, keeping insertion order.
    pub fn push(&mut self, message: FlashMessage) {
        self.0.push(message);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlashMessage> {
        self.0.iter()
    }
}

impl From<Vec<FlashMessage>> for FlashMessages {
    fn from(value: Vec<FlashMessage>) -> Self {
        Self(value)
    }
}

impl FromIterator<FlashMessage> for FlashMessages {
    fn from_iter<T: IntoIterator<Item = FlashMessage>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FlashMessages {
    type Item = FlashMessage;
    type IntoIter = std::vec::IntoIter<FlashMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a FlashMessages {
    type Item = &'a FlashMessage;
    type IntoIter = std::slice::Iter<'a, FlashMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
