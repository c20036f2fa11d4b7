//! Fractional day counts for elapsed durations.

use crate::codec::{Elapsed, parse_elapsed};

const MS_PER_DAY: u64 = 86_400_000;

impl Elapsed {
    /// The duration as a fraction of 24-hour days.
    #[expect(
        clippy::cast_precision_loss,
        reason = "day counts are for display; totals stay exact as milliseconds"
    )]
    pub fn as_days(self) -> f64 {
        self.as_millis() as f64 / MS_PER_DAY as f64
    }
}

/// Converts `"hh:mm:ss:fff"` to days; `None` if the text does not parse.
pub fn to_days(text: &str) -> Option<f64> {
    parse_elapsed(text).map(Elapsed::as_days)
}
