//! Emitter: expands each sample into line protocol and sends it.

use bytes::Bytes;
use tokio::sync::mpsc;

use iostat_core::config::Config;
use iostat_core::line_protocol::{capture_timestamp_ns, LineEncoder};
use iostat_core::Sample;

use crate::http::HttpTransport;
use crate::{Result, SinkError, Transport};

/// Outcome of emitting one sample.
#[derive(Debug)]
pub enum Delivery {
    /// The collector accepted the payload.
    Delivered,
    /// The payload was lost.
    Dropped(SinkError),
}

impl Delivery {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Delivery::Delivered)
    }
}

/// Running totals over an emitter's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: u64,
    pub failed: u64,
}

/// Encodes samples for one host and pushes them through a [`Transport`].
pub struct Emitter<T> {
    transport: T,
    encoder: LineEncoder,
    stats: DeliveryStats,
}

impl Emitter<HttpTransport> {
    /// Emitter posting to `config.collector.url`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(&config.collector.url, config.timeout())?;
        Ok(Self::new(
            transport,
            &config.collector.measurement,
            &config.collector.hostname,
        ))
    }
}

impl<T: Transport> Emitter<T> {
    pub fn new(transport: T, measurement: &str, host: &str) -> Self {
        Self {
            transport,
            encoder: LineEncoder::new(measurement, host),
            stats: DeliveryStats::default(),
        }
    }

    /// Send one sample. Failures are logged and counted, never returned as
    /// errors. Columns that did not decode go out as zero.
    pub async fn emit(&mut self, sample: Sample) -> Delivery {
        if !sample.invalid.is_empty() {
            tracing::debug!(device = %sample.device, zeroed = %sample.invalid, "sending zero-filled columns");
        }

        let timestamp_ns = capture_timestamp_ns();
        let payload = Bytes::from(self.encoder.encode(&sample, timestamp_ns));

        match self.transport.send(payload).await {
            Ok(()) => {
                self.stats.delivered += 1;
                tracing::trace!(device = %sample.device, timestamp_ns, "sample delivered");
                Delivery::Delivered
            }
            Err(err) => {
                self.stats.failed += 1;
                tracing::warn!(device = %sample.device, error = %err, "sample dropped");
                Delivery::Dropped(err)
            }
        }
    }

    pub fn stats(&self) -> &DeliveryStats {
        &self.stats
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn into_stats(self) -> DeliveryStats {
        self.stats
    }
}

/// Drain `rx`, emitting every sample in arrival order, until all senders are
/// gone.
pub async fn run_emitter<T: Transport>(mut emitter: Emitter<T>, mut rx: mpsc::Receiver<Sample>) -> DeliveryStats {
    while let Some(sample) = rx.recv().await {
        emitter.emit(sample).await;
    }
    emitter.into_stats()
}
