//! InfluxDB line-protocol encoding for [`Sample`]s.
//!
//! Each sample becomes 13 lines, one per [`Field`]:
//!
//! ```text
//! iostat,host=db-01,device=sda,type=rrqm value=0.000000 1705312800000000000
//! ```
//!
//! All 13 lines of one sample carry the same timestamp.

use std::fmt::Write as _;

use crate::types::{Field, MetricPoint, Sample};

/// Current wall-clock time in nanoseconds since the Unix epoch.
pub fn capture_timestamp_ns() -> i64 {
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
}

/// Expand a sample into one point per field, all stamped with `timestamp_ns`.
pub fn expand<'a>(sample: &'a Sample, host: &'a str, timestamp_ns: i64) -> [MetricPoint<'a>; Field::COUNT] {
    Field::ALL.map(|field| MetricPoint {
        host,
        device: &sample.device,
        field,
        value: sample.get(field),
        timestamp_ns,
    })
}

/// Escape a tag value: `,`, `=` and space are backslash-escaped.
pub fn escape_tag(value: &str) -> String {
    escape(value, &[',', '=', ' '])
}

/// Escape a measurement name: `,` and space are backslash-escaped.
pub fn escape_measurement(value: &str) -> String {
    escape(value, &[',', ' '])
}

fn escape(value: &str, special: &[char]) -> String {
    if !value.contains(special) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Encodes samples for one `(measurement, host)` pair.
///
/// Measurement and host are escaped once up front; only the device tag is
/// escaped per sample.
#[derive(Debug, Clone)]
pub struct LineEncoder {
    measurement: String,
    host: String,
    host_tag: String,
}

impl LineEncoder {
    pub fn new(measurement: &str, host: &str) -> Self {
        Self {
            measurement: escape_measurement(measurement),
            host: host.to_string(),
            host_tag: escape_tag(host),
        }
    }

    /// Host as configured, unescaped.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Encode all 13 points of `sample` at `timestamp_ns` into a fresh payload.
    pub fn encode(&self, sample: &Sample, timestamp_ns: i64) -> String {
        let device_tag = escape_tag(&sample.device);
        let mut buf = String::with_capacity(Field::COUNT * 96);
        for point in expand(sample, &self.host, timestamp_ns) {
            self.write_line(&mut buf, &device_tag, &point);
        }
        buf
    }

    /// `device_tag` is `point.device` already escaped.
    fn write_line(&self, buf: &mut String, device_tag: &str, point: &MetricPoint<'_>) {
        debug_assert_eq!(point.host, self.host);
        // Writing into a String cannot fail.
        let _ = writeln!(
            buf,
            "{},host={},device={},type={} value={:.6} {}",
            self.measurement,
            self.host_tag,
            device_tag,
            point.field.name(),
            point.value,
            point.timestamp_ns,
        );
    }
}
