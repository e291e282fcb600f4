//! Collaborators supplied by the hosting content framework
//!
//! The formatter never reaches into entity storage, logging or user messaging
//! directly; it is handed implementations of these traits at construction.

use async_trait::async_trait;
use mpx_client::{Account, Media, RemoteFetchError, User};
use parking_lot::Mutex;

// =============================================================================
// Account Context
// =============================================================================

/// Account and user under which remote requests are made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountContext {
    account: Account,
    user: User,
}

impl AccountContext {
    /// Create a new account context
    pub fn new(account: Account, user: User) -> Self {
        Self { account, user }
    }

    /// The account scoping queries and player URLs
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// The user whose token authenticates requests
    pub fn user(&self) -> &User {
        &self.user
    }
}

// =============================================================================
// Field Values & Media Source
// =============================================================================

/// One entry of a multi-value field
///
/// The entry's delta is its position in the slice handed to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    /// Stored value
    pub value: String,
}

impl FieldValue {
    /// Create a new field value
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Wrap the given values, keeping their order
    ///
    /// # Examples
    /// ```
    /// use player_formatter::FieldValue;
    ///
    /// let items = FieldValue::from_values(["a", "b"]);
    /// assert_eq!(items[1], FieldValue::new("b"));
    /// ```
    pub fn from_values<I, S>(values: I) -> Vec<FieldValue>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        values
            .into_iter()
            .map(FieldValue::new)
            .collect()
    }
}

/// Source plugin of the media entity that owns the field
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Account context configured for this source
    fn account_context(&self) -> &AccountContext;

    /// Resolve the mpx media object behind a field value
    async fn mpx_object(&self, item: &FieldValue) -> Result<Media, RemoteFetchError>;
}

// =============================================================================
// Exception Logging
// =============================================================================

/// Sink for remote fetch failures
#[cfg_attr(test, mockall::automock)]
pub trait ExceptionLogger: Send + Sync {
    /// Record a failure
    fn log_exception(&self, error: &RemoteFetchError);
}

/// Logs failures as structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingExceptionLogger;

impl ExceptionLogger for TracingExceptionLogger {
    fn log_exception(&self, error: &RemoteFetchError) {
        match error {
            RemoteFetchError::Http {
                status,
                title,
                description,
            } => tracing::error!(
                kind = error.kind(),
                status = *status,
                title = %title,
                "mpx service exception: {}",
                description
            ),
            _ => tracing::error!(
                kind = error.kind(),
                status = ?error.status(),
                "mpx request failed: {}",
                error
            ),
        }
    }
}

// =============================================================================
// User Messaging
// =============================================================================

/// Sink for messages displayed to the current user
#[cfg_attr(test, mockall::automock)]
pub trait Messenger: Send + Sync {
    /// Queue an error message
    fn add_error(&self, message: String);
}

/// In-memory queue of error messages, drained by the host after a request
#[derive(Debug, Default)]
pub struct MessageQueue {
    messages: Mutex<Vec<String>>,
}

impl MessageQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of queued messages
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Remove and return all queued messages
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.messages.lock())
    }
}

impl Messenger for MessageQueue {
    fn add_error(&self, message: String) {
        self.messages.lock().push(message);
    }
}
