//! Static iostat corpora used across harnesses.
//!
//! Each corpus is the verbatim stdout of an `iostat -x` invocation (or a
//! hand-built variant of one). Device rows use the classic 14-column layout
//! unless the name says otherwise.

/// A single well-formed data row.
pub const ROW_SDA: &str =
    "sda 0.00 1.50 2.00 3.00 10.00 20.00 5.00 0.10 1.20 0.50 0.70 0.80 2.50";

/// [`ROW_SDA`] for `sdb`, with `wrqm` unreadable.
pub const ROW_SDB_BAD_WRQM: &str =
    "sdb 0.00 N/A 2.00 3.00 10.00 20.00 5.00 0.10 1.20 0.50 0.70 0.80 2.50";

/// Column values of [`ROW_SDA`] in field order.
pub const ROW_SDA_VALUES: [f64; 13] =
    [0.0, 1.5, 2.0, 3.0, 10.0, 20.0, 5.0, 0.1, 1.2, 0.5, 0.7, 0.8, 2.5];

/// Two blocks separated by a blank line: header + 2 rows, header + 1 row.
/// Headers are short, so exactly three samples come out.
pub const TWO_BLOCKS: &str = "\
Device: r/s w/s
sda 0.00 1.50 2.00 3.00 10.00 20.00 5.00 0.10 1.20 0.50 0.70 0.80 2.50
sdb 0.10 0.20 0.30 0.40 0.50 0.60 0.70 0.80 0.90 1.00 1.10 1.20 1.30

Device: r/s w/s
sdc 9.00 8.00 7.00 6.00 5.00 4.00 3.00 2.00 1.00 0.90 0.80 0.70 0.60
";

/// `iostat -x 5 2` on a CentOS 7 host (sysstat 10.1). The `Device:` header
/// has the same 14-token shape as a data row.
pub const IOSTAT_SYSSTAT10: &str = "\
Linux 3.10.0-1160.el7.x86_64 (db-01) \t01/15/2024 \t_x86_64_\t(4 CPU)

avg-cpu:  %user   %nice %system %iowait  %steal   %idle
           2.31    0.00    0.87    0.12    0.00   96.70

Device:         rrqm/s   wrqm/s     r/s     w/s    rkB/s    wkB/s avgrq-sz avgqu-sz   await r_await w_await  svctm  %util
sda               0.01     0.42    0.35    1.83    12.40    35.12    43.57     0.01    2.95    1.10    3.31    0.48   0.10
dm-0              0.00     0.00    0.30    2.20    11.80    34.90    37.36     0.01    3.83    1.20    4.19    0.39   0.10

avg-cpu:  %user   %nice %system %iowait  %steal   %idle
           5.02    0.00    1.51    0.25    0.00   93.22

Device:         rrqm/s   wrqm/s     r/s     w/s    rkB/s    wkB/s avgrq-sz avgqu-sz   await r_await w_await  svctm  %util
sda               0.00     3.20    0.00    4.60     0.00    40.80    17.74     0.02    4.35    0.00    4.35    0.52   0.24
dm-0              0.00     0.00    0.00    7.80     0.00    40.80    10.46     0.03    3.64    0.00    3.64    0.31   0.24
";

/// First token of every 14-column row in [`IOSTAT_SYSSTAT10`], in output
/// order. The old `Device:` header has 14 columns too.
pub const IOSTAT_SYSSTAT10_ROWS: &[&str] = &["Device:", "sda", "dm-0", "Device:", "sda", "dm-0"];

/// `iostat -x` from sysstat 12: 16 columns per row, so nothing matches.
pub const IOSTAT_SYSSTAT12: &str = "\
Linux 5.15.0-91-generic (web-3) \t01/15/2024 \t_x86_64_\t(8 CPU)

avg-cpu:  %user   %nice %system %iowait  %steal   %idle
           3.12    0.00    1.05    0.40    0.00   95.43

Device            r/s     w/s     rkB/s     wkB/s   rrqm/s   wrqm/s  %rrqm  %wrqm r_await w_await aqu-sz rareq-sz wareq-sz  svctm  %util
nvme0n1          4.21   12.87    160.33    402.18     0.00     6.71   0.00  34.27    0.41    1.92   0.03    38.05    31.25   0.22   0.37
";

/// `n` consecutive intervals of two devices each, for throughput tests.
pub fn corpus_intervals(n: usize) -> String {
    let mut out = String::new();
    for i in 0..n {
        out.push_str("Device:         rrqm/s   wrqm/s     r/s     w/s\n");
        for device in ["sda", "sdb"] {
            out.push_str(&format!(
                "{device:<10} {:>8.2} 1.50 2.00 3.00 10.00 20.00 5.00 0.10 1.20 0.50 0.70 0.80 {:>6.2}\n",
                i as f64 / 10.0,
                (i % 100) as f64,
            ));
        }
        out.push('\n');
    }
    out
}
