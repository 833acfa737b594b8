//! iostat-sink: delivery side of iostat-relay.
//!
//! The [`Emitter`] turns each [`iostat_core::Sample`] into a line-protocol
//! payload and hands it to a [`Transport`]. [`HttpTransport`] is the
//! production transport; tests plug in their own.
//!
//! Delivery is at-most-once: a failed payload is logged and dropped, never
//! retried.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;

pub mod emitter;
pub mod http;

pub use emitter::{run_emitter, Delivery, DeliveryStats, Emitter};
pub use http::HttpTransport;

/// Something that can deliver one encoded payload to the collector.
pub trait Transport: Send + Sync {
    /// Deliver `payload`. Any error means the payload is lost.
    fn send(&self, payload: Bytes) -> impl Future<Output = Result<()>> + Send;
}

/// Reasons a payload was not delivered.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The collector URL is not a valid URI.
    #[error("invalid collector uri {url:?}: {reason}")]
    InvalidUri { url: String, reason: String },

    /// The collector URL uses a scheme this transport cannot speak.
    #[error("unsupported collector uri scheme `{0}` (only http is supported)")]
    UnsupportedScheme(String),

    /// Connecting or exchanging the request failed.
    #[error("request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    /// The request did not complete in time.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// The collector answered with a non-success status.
    #[error("collector responded with {0}")]
    Status(hyper::StatusCode),

    /// Reading the response body failed.
    #[error("failed to read response body: {0}")]
    Body(#[from] hyper::Error),

    /// Failure reported by a custom transport.
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SinkError>;
