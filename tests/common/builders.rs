//! Test builders: ergonomic constructors for `Sample` values and iostat
//! rows.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use iostat_core::{Field, Sample};

// ---------------------------------------------------------------------------
// SampleBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`Sample`] test fixtures.
///
/// # Example
///
/// ```rust
/// let sample = SampleBuilder::new("sda")
///     .field(Field::Util, 97.5)
///     .invalid(Field::Svctm)
///     .build();
/// ```
pub struct SampleBuilder {
    sample: Sample,
}

impl SampleBuilder {
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            sample: Sample::new(device),
        }
    }

    pub fn field(mut self, field: Field, value: f64) -> Self {
        self.sample.set(field, value);
        self
    }

    /// Set every field from `values`, in [`Field::ALL`] order.
    pub fn values(mut self, values: [f64; 13]) -> Self {
        for (field, value) in Field::ALL.into_iter().zip(values) {
            self.sample.set(field, value);
        }
        self
    }

    /// Mark a field as zero-filled.
    pub fn invalid(mut self, field: Field) -> Self {
        self.sample.set(field, 0.0);
        self.sample.invalid.insert(field);
        self
    }

    pub fn build(self) -> Sample {
        self.sample
    }
}

// ---------------------------------------------------------------------------
// Row helpers
// ---------------------------------------------------------------------------

/// Render a single-spaced data row.
pub fn row(device: &str, values: [f64; 13]) -> String {
    let mut line = device.to_string();
    for value in values {
        line.push_str(&format!(" {value:.2}"));
    }
    line
}

/// Render a row the way iostat pads it: device left-aligned, columns
/// right-aligned in fixed widths.
pub fn padded_row(device: &str, values: [f64; 13]) -> String {
    let mut line = format!("{device:<14}");
    for value in values {
        line.push_str(&format!("{value:>9.2}"));
    }
    line
}

/// Join lines with `\n`, terminating the last one.
pub fn lines(rows: &[&str]) -> String {
    let mut out = rows.join("\n");
    out.push('\n');
    out
}
