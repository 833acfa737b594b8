//! Core types for iostat-core.
//!
//! This module defines the data structures shared by the parser and the
//! emitter: the parsed [`Sample`], the closed [`Field`] vocabulary with its
//! wire names, the [`FieldSet`] used to flag zero-filled values, and the
//! derived [`MetricPoint`].

/// One device's extended statistics for one sampling interval, decoded from a
/// single 14-token `iostat -x` row.
///
/// Numeric columns that could not be decoded hold `0.0`; the corresponding
/// [`Field`] is recorded in [`Sample::invalid`] so callers can tell a
/// zero-filled value from a genuine zero reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Device identifier, the first token of the row, kept verbatim.
    pub device: String,
    /// Read requests merged per second (`rrqm/s`).
    pub rrqm: f64,
    /// Write requests merged per second (`wrqm/s`).
    pub wrqm: f64,
    /// Reads completed per second (`r/s`).
    pub r: f64,
    /// Writes completed per second (`w/s`).
    pub w: f64,
    /// Sectors (or kB) read per second.
    pub rsec: f64,
    /// Sectors (or kB) written per second.
    pub wsec: f64,
    /// Average request size (`avgrq-sz`).
    pub avgrqsz: f64,
    /// Average queue length (`avgqu-sz`).
    pub avgqusz: f64,
    /// Average I/O wait in milliseconds (`await`).
    pub await_ms: f64,
    /// Average read wait in milliseconds (`r_await`).
    pub rawait: f64,
    /// Average write wait in milliseconds (`w_await`).
    pub wawait: f64,
    /// Average service time in milliseconds (`svctm`).
    pub svctm: f64,
    /// Device utilisation in percent (`%util`).
    pub util: f64,
    /// Fields whose token failed to decode and were zero-filled.
    pub invalid: FieldSet,
}

impl Sample {
    /// A sample for `device` with every field at `0.0` and nothing flagged.
    pub fn new(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            rrqm: 0.0,
            wrqm: 0.0,
            r: 0.0,
            w: 0.0,
            rsec: 0.0,
            wsec: 0.0,
            avgrqsz: 0.0,
            avgqusz: 0.0,
            await_ms: 0.0,
            rawait: 0.0,
            wawait: 0.0,
            svctm: 0.0,
            util: 0.0,
            invalid: FieldSet::EMPTY,
        }
    }

    /// Value of a single field.
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Rrqm => self.rrqm,
            Field::Wrqm => self.wrqm,
            Field::R => self.r,
            Field::W => self.w,
            Field::Rsec => self.rsec,
            Field::Wsec => self.wsec,
            Field::Avgrqsz => self.avgrqsz,
            Field::Avgqusz => self.avgqusz,
            Field::Await => self.await_ms,
            Field::Rawait => self.rawait,
            Field::Wawait => self.wawait,
            Field::Svctm => self.svctm,
            Field::Util => self.util,
        }
    }

    /// Overwrite a single field.
    pub fn set(&mut self, field: Field, value: f64) {
        let slot = match field {
            Field::Rrqm => &mut self.rrqm,
            Field::Wrqm => &mut self.wrqm,
            Field::R => &mut self.r,
            Field::W => &mut self.w,
            Field::Rsec => &mut self.rsec,
            Field::Wsec => &mut self.wsec,
            Field::Avgrqsz => &mut self.avgrqsz,
            Field::Avgqusz => &mut self.avgqusz,
            Field::Await => &mut self.await_ms,
            Field::Rawait => &mut self.rawait,
            Field::Wawait => &mut self.wawait,
            Field::Svctm => &mut self.svctm,
            Field::Util => &mut self.util,
        };
        *slot = value;
    }

    /// `(field, value)` pairs in column order.
    pub fn values(&self) -> impl Iterator<Item = (Field, f64)> + '_ {
        Field::ALL.iter().map(move |&f| (f, self.get(f)))
    }
}

/// The 13 numeric columns of an extended iostat row, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Rrqm,
    Wrqm,
    R,
    W,
    Rsec,
    Wsec,
    Avgrqsz,
    Avgqusz,
    Await,
    Rawait,
    Wawait,
    Svctm,
    Util,
}

impl Field {
    /// Number of numeric columns in a data row.
    pub const COUNT: usize = 13;

    /// Every field, in the order the columns appear after the device name.
    pub const ALL: [Field; Field::COUNT] = [
        Field::Rrqm,
        Field::Wrqm,
        Field::R,
        Field::W,
        Field::Rsec,
        Field::Wsec,
        Field::Avgrqsz,
        Field::Avgqusz,
        Field::Await,
        Field::Rawait,
        Field::Wawait,
        Field::Svctm,
        Field::Util,
    ];

    /// Name written as the `type` tag on the wire.
    pub fn name(self) -> &'static str {
        match self {
            Field::Rrqm => "rrqm",
            Field::Wrqm => "wrqm",
            Field::R => "r",
            Field::W => "w",
            Field::Rsec => "rsec",
            Field::Wsec => "wsec",
            Field::Avgrqsz => "avgrqsz",
            Field::Avgqusz => "avgqusz",
            Field::Await => "await",
            Field::Rawait => "rawait",
            Field::Wawait => "wawait",
            Field::Svctm => "svctm",
            Field::Util => "util",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A compact set of [`Field`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FieldSet(u16);

impl FieldSet {
    pub const EMPTY: FieldSet = FieldSet(0);

    pub fn insert(&mut self, field: Field) {
        self.0 |= field.bit();
    }

    pub fn contains(self, field: Field) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item = Field> {
        Field::ALL.into_iter().filter(move |f| self.contains(*f))
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = FieldSet::EMPTY;
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl std::fmt::Display for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for field in self.iter() {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(field.name())?;
            first = false;
        }
        Ok(())
    }
}

/// One observation derived from a [`Sample`]: a single field of a single
/// device at one capture instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricPoint<'a> {
    pub host: &'a str,
    pub device: &'a str,
    pub field: Field,
    pub value: f64,
    /// Nanoseconds since the Unix epoch.
    pub timestamp_ns: i64,
}
