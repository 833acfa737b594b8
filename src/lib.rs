//! iostat-relay: forward `iostat -x` device statistics to InfluxDB.
//!
//! Reads extended iostat output from a stream, turns every 14-column device
//! row into a [`Sample`], and posts each sample as 13 line-protocol points.
//!
//! # Architecture
//!
//! ```text
//! stdin ──► parser ──► mpsc(1) ──► emitter ──► HTTP POST
//! ```
//!
//! The parser and the emitter run as two tokio tasks joined by a bounded
//! channel, so a slow collector throttles how fast input is consumed.
//! [`pipeline::run`] wires them together.

pub mod pipeline;

pub use iostat_core::config::Config;
pub use iostat_core::parser::{ParseSummary, StreamEnd};
pub use iostat_core::{Field, Sample};
pub use iostat_sink::{Delivery, DeliveryStats, Emitter, HttpTransport, SinkError, Transport};
pub use pipeline::PipelineSummary;
