//! Pipeline: parser and emitter as two tasks over a bounded channel.

use std::future::Future;

use anyhow::Context;
use tokio::io::{AsyncRead, BufReader};
use tokio::sync::mpsc;

use iostat_core::config::Config;
use iostat_core::parser::{run_parser_until, ParseSummary};
use iostat_sink::{run_emitter, DeliveryStats, Emitter, Transport};

/// Totals for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub parse: ParseSummary,
    pub delivery: DeliveryStats,
}

/// Run until `reader` ends or `shutdown` completes, then let the emitter
/// drain whatever is already queued.
///
/// Per-sample failures never end the run; an error here means one of the
/// tasks panicked.
pub async fn run<R, T, F>(
    reader: R,
    emitter: Emitter<T>,
    channel_capacity: usize,
    shutdown: F,
) -> anyhow::Result<PipelineSummary>
where
    R: AsyncRead + Unpin + Send + 'static,
    T: Transport + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = mpsc::channel(channel_capacity.max(1));

    let parser = tokio::spawn(run_parser_until(BufReader::new(reader), tx, shutdown));
    let emitter = tokio::spawn(run_emitter(emitter, rx));

    let (parse, delivery) = tokio::try_join!(parser, emitter).context("pipeline task failed")?;

    tracing::info!(
        lines = parse.lines,
        rows = parse.rows,
        delivered = delivery.delivered,
        failed = delivery.failed,
        end = ?parse.end,
        "pipeline finished"
    );
    Ok(PipelineSummary { parse, delivery })
}

/// Validate `config`, build the HTTP emitter from it, and [`run`].
pub async fn run_with_config<R, F>(config: &Config, reader: R, shutdown: F) -> anyhow::Result<PipelineSummary>
where
    R: AsyncRead + Unpin + Send + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    config.validate().context("invalid configuration")?;
    let emitter = Emitter::from_config(config).context("failed to set up collector transport")?;

    tracing::info!(
        url = %config.collector.url,
        host = %config.collector.hostname,
        measurement = %config.collector.measurement,
        timeout_ms = config.collector.timeout_ms,
        "forwarding iostat samples"
    );
    run(reader, emitter, config.parser.channel_capacity, shutdown).await
}
