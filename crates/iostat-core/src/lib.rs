//! iostat-core: shared pieces of iostat-relay.
//!
//! This crate holds everything that does not touch the network: the typed
//! [`Sample`], the streaming `iostat -x` [`parser`], line-protocol encoding,
//! and configuration.
//!
//! # Architecture
//!
//! ```text
//! stdin ──► parser ──► mpsc(1) ──► emitter ──► HTTP POST
//!            (here)                (iostat-sink)
//! ```

pub mod config;
pub mod error;
pub mod line_protocol;
pub mod parser;
pub mod types;

pub use types::{Field, FieldSet, MetricPoint, Sample};
