//! Domain-specific assertions for iostat-relay harnesses.
//!
//! These parse line-protocol payloads back into their parts and add
//! context-rich failure messages that make it clear *which* line of *which*
//! payload broke the expected shape.

use iostat_core::Field;

/// One decoded line-protocol line.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLine {
    pub measurement: String,
    pub host: String,
    pub device: String,
    pub field: String,
    pub value: f64,
    pub timestamp_ns: i64,
}

/// Decode `measurement,host=H,device=D,type=T value=V TS`. Panics with the
/// offending line if it does not have that exact shape. Tag values must not
/// contain escaped characters.
pub fn parse_point_line(line: &str) -> PointLine {
    fn malformed(line: &str, why: &str) -> ! {
        panic!("malformed line-protocol line ({why}): {line:?}")
    }

    let mut parts = line.split(' ');
    let (series, value, ts) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(s), Some(v), Some(t), None) => (s, v, t),
        _ => malformed(line, "expected three space-separated parts"),
    };

    let mut tags = series.split(',');
    let measurement = tags.next().unwrap_or_else(|| malformed(line, "missing measurement"));
    let mut tag = |key: &str| -> String {
        tags.next()
            .and_then(|t| t.strip_prefix(key))
            .and_then(|t| t.strip_prefix('='))
            .unwrap_or_else(|| malformed(line, &format!("missing tag {key}")))
            .to_string()
    };
    let host = tag("host");
    let device = tag("device");
    let field = tag("type");
    if tags.next().is_some() {
        malformed(line, "unexpected extra tag");
    }

    let value = value
        .strip_prefix("value=")
        .unwrap_or_else(|| malformed(line, "missing value="));
    let (whole, frac) = value.split_once('.').unwrap_or_else(|| malformed(line, "value has no decimal point"));
    if frac.len() != 6 || whole.is_empty() {
        malformed(line, "value is not printed with six fractional digits");
    }

    PointLine {
        measurement: measurement.to_string(),
        host,
        device,
        field,
        value: value.parse().unwrap_or_else(|_| malformed(line, "value is not a float")),
        timestamp_ns: ts.parse().unwrap_or_else(|_| malformed(line, "timestamp is not an integer")),
    }
}

/// Assert a payload is exactly one sample: 13 newline-terminated lines, all
/// fields once in column order, one shared timestamp, one host and device.
/// Returns the decoded lines.
pub fn assert_sample_payload(payload: &str, host: &str, device: &str) -> Vec<PointLine> {
    assert!(
        payload.ends_with('\n'),
        "payload is not newline-terminated: {payload:?}"
    );
    let points: Vec<PointLine> = payload.lines().map(parse_point_line).collect();
    assert_eq!(
        points.len(),
        Field::COUNT,
        "expected {} lines, got {}:\n{payload}",
        Field::COUNT,
        points.len()
    );

    let fields: Vec<&str> = points.iter().map(|p| p.field.as_str()).collect();
    let expected: Vec<&str> = Field::ALL.iter().map(|f| f.name()).collect();
    assert_eq!(fields, expected, "field names out of order or missing");

    let ts = points[0].timestamp_ns;
    for point in &points {
        assert_eq!(point.timestamp_ns, ts, "timestamps differ within one sample:\n{payload}");
        assert_eq!(point.host, host, "wrong host tag:\n{payload}");
        assert_eq!(point.device, device, "wrong device tag:\n{payload}");
    }
    points
}

/// Assert a decoded payload carries `values` in field order.
#[macro_export]
macro_rules! assert_point_values {
    ($points:expr, $values:expr) => {{
        let points: &[$crate::common::PointLine] = &$points;
        let values: [f64; 13] = $values;
        for (point, expected) in points.iter().zip(values) {
            if (point.value - expected).abs() > 1e-6 {
                panic!(
                    "assert_point_values! failed for field {:?}:\n  expected: {}\n  actual:   {}",
                    point.field, expected, point.value
                );
            }
        }
    }};
}
