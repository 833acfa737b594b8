//! Parser: turns raw `iostat -x` output into [`Sample`] values.
//!
//! A line is a data row if and only if it normalizes to exactly 14 tokens:
//! the device name followed by the 13 columns in [`Field::ALL`] order. Every
//! other line (`avg-cpu` blocks, banners, blanks, headers of any other width)
//! is skipped. There is no header detection and no state carried between
//! lines.
//!
//! [`SampleReader`] is the streaming form: a lazy, non-restartable sequence of
//! samples over any [`AsyncBufRead`]. [`run_parser`] drives it into a bounded
//! channel, awaiting capacity before reading the next line.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::types::{Field, Sample};

/// Token count of a data row: one device name plus one token per [`Field`].
pub const ROW_TOKENS: usize = Field::COUNT + 1;

// ---------------------------------------------------------------------------
// Line-level protocol
// ---------------------------------------------------------------------------

/// Trim the line and collapse every run of interior whitespace to a single
/// space. Tabs count as spaces.
pub fn normalize(line: &str) -> String {
    let mut current = line.trim().replace('\t', " ");
    loop {
        let next = current.replace("  ", " ");
        if next.len() == current.len() {
            return next;
        }
        current = next;
    }
}

/// Split a normalized line on single spaces. An empty line has no tokens.
pub fn tokenize(normalized: &str) -> Vec<&str> {
    if normalized.is_empty() {
        return Vec::new();
    }
    normalized.split(' ').collect()
}

/// Decode one numeric column. Accepts a decimal comma as printed by iostat in
/// some locales.
pub fn decode_number(token: &str) -> Option<f64> {
    if let Ok(value) = token.parse::<f64>() {
        return Some(value);
    }
    if token.matches(',').count() == 1 && !token.contains('.') {
        return token.replace(',', ".").parse::<f64>().ok();
    }
    None
}

/// Parse a single raw line. Returns `None` unless the line is a data row.
///
/// Columns that fail to decode are set to `0.0` and flagged in
/// [`Sample::invalid`]; they never cause the row to be rejected.
pub fn parse_line(line: &str) -> Option<Sample> {
    let normalized = normalize(line);
    let tokens = tokenize(&normalized);
    if tokens.len() != ROW_TOKENS {
        return None;
    }

    let mut sample = Sample::new(tokens[0]);
    for (field, token) in Field::ALL.into_iter().zip(&tokens[1..]) {
        match decode_number(token) {
            Some(value) => sample.set(field, value),
            None => sample.invalid.insert(field),
        }
    }

    if !sample.invalid.is_empty() {
        tracing::debug!(
            device = %sample.device,
            fields = %sample.invalid,
            "zero-filled undecodable columns"
        );
    }
    Some(sample)
}

// ---------------------------------------------------------------------------
// Streaming reader
// ---------------------------------------------------------------------------

/// Why a parse run stopped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StreamEnd {
    /// The input is still open.
    #[default]
    Open,
    /// Clean end of input.
    Eof,
    /// Reading failed; treated as end of input.
    ReadError(String),
    /// The consumer dropped its end of the channel.
    ReceiverClosed,
    /// A shutdown was requested.
    Interrupted,
}

/// Counters collected over one parse run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseSummary {
    /// Lines read, including skipped ones.
    pub lines: u64,
    /// Lines that produced a [`Sample`].
    pub rows: u64,
    /// Lines that were not data rows.
    pub skipped: u64,
    pub end: StreamEnd,
}

/// Lazy sequence of [`Sample`]s over a line-oriented reader.
///
/// Once [`next_sample`](Self::next_sample) has returned `None` the reader is
/// exhausted and keeps returning `None`.
pub struct SampleReader<R> {
    reader: R,
    buf: Vec<u8>,
    summary: ParseSummary,
}

impl<R: AsyncBufRead + Unpin> SampleReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::with_capacity(256),
            summary: ParseSummary::default(),
        }
    }

    /// Read until the next data row. Returns `None` at end of input or on a
    /// read error.
    pub async fn next_sample(&mut self) -> Option<Sample> {
        if self.summary.end != StreamEnd::Open {
            return None;
        }

        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf).await {
                Ok(0) => {
                    tracing::debug!(lines = self.summary.lines, "input reached end of stream");
                    self.summary.end = StreamEnd::Eof;
                    return None;
                }
                Ok(_) => {}
                Err(err) => {
                    tracing::warn!(error = %err, lines = self.summary.lines, "input read failed, stopping parser");
                    self.summary.end = StreamEnd::ReadError(err.to_string());
                    return None;
                }
            }

            self.summary.lines += 1;
            let line = String::from_utf8_lossy(&self.buf);
            match parse_line(&line) {
                Some(sample) => {
                    self.summary.rows += 1;
                    return Some(sample);
                }
                None => {
                    self.summary.skipped += 1;
                    tracing::trace!(line = %line.trim_end(), "skipping non-data line");
                }
            }
        }
    }

    pub fn summary(&self) -> &ParseSummary {
        &self.summary
    }

    pub fn into_summary(self) -> ParseSummary {
        self.summary
    }
}

/// Feed every sample from `reader` into `tx`, one at a time.
///
/// Each send waits for channel capacity before the next line is read, so a
/// slow consumer throttles input consumption. Returns when the input ends or
/// the receiver is dropped.
pub async fn run_parser<R>(reader: R, tx: mpsc::Sender<Sample>) -> ParseSummary
where
    R: AsyncBufRead + Unpin,
{
    run_parser_until(reader, tx, std::future::pending()).await
}

/// [`run_parser`] that also stops as soon as `shutdown` completes, whether it
/// is waiting on input or on channel capacity.
pub async fn run_parser_until<R, F>(reader: R, tx: mpsc::Sender<Sample>, shutdown: F) -> ParseSummary
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut samples = SampleReader::new(reader);
    tokio::pin!(shutdown);

    loop {
        let next = tokio::select! {
            next = samples.next_sample() => Some(next),
            () = &mut shutdown => None,
        };
        let sample = match next {
            Some(Some(sample)) => sample,
            Some(None) => break,
            None => {
                samples.summary.end = StreamEnd::Interrupted;
                break;
            }
        };

        let sent = tokio::select! {
            sent = tx.send(sample) => Some(sent.is_ok()),
            () = &mut shutdown => None,
        };
        match sent {
            Some(true) => {}
            Some(false) => {
                tracing::debug!("sample receiver dropped, stopping parser");
                samples.summary.end = StreamEnd::ReceiverClosed;
                break;
            }
            None => {
                samples.summary.end = StreamEnd::Interrupted;
                break;
            }
        }
    }

    if samples.summary.end == StreamEnd::Interrupted {
        tracing::debug!(rows = samples.summary.rows, "parser interrupted");
    }
    samples.into_summary()
}

/// Spawn [`run_parser`] on the current tokio runtime.
pub fn spawn_parser<R>(reader: R, tx: mpsc::Sender<Sample>) -> tokio::task::JoinHandle<ParseSummary>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(run_parser(reader, tx))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
