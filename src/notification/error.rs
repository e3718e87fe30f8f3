//! Publish errors.

use crate::BoxError;
use thiserror::Error;

/// Errors returned by `NotificationBus::publish`.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A subscriber failed; subscribers after it were not called.
    #[error("subscriber #{position} failed: {source}")]
    SubscriberFailed {
        /// Zero-based position of the failing subscriber in the list.
        position: usize,
        #[source]
        source: BoxError,
    },
}
