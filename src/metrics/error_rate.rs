use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use super::{Sample, bucket_label};

/// Percentage stored in hundredths (`2000` is `20.00%`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct ErrorRate {
    hundredths: u64,
}

impl ErrorRate {
    #[must_use]
    pub const fn from_hundredths(hundredths: u64) -> Self {
        Self { hundredths }
    }

    #[must_use]
    pub const fn hundredths(self) -> u64 {
        self.hundredths
    }

    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "Chart axes need the fractional percentage."
    )]
    pub fn percent(self) -> f64 {
        let whole = u32::try_from(self.hundredths).unwrap_or(u32::MAX);
        f64::from(whole) / 100.0
    }
}

impl fmt::Display for ErrorRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.hundredths.checked_div(100).unwrap_or(0),
            self.hundredths.checked_rem(100).unwrap_or(0)
        )
    }
}

impl Serialize for ErrorRate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.percent())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorRatePoint {
    pub bucket: i64,
    pub label_second: u32,
    pub error_rate: ErrorRate,
}

/// Run-wide error rate: `failures / max(success + failures, 1) * 100`,
/// rounded half-up to two decimals.
#[must_use]
pub fn error_rate(success: u64, failures: u64) -> ErrorRate {
    let total = u128::from(success.saturating_add(failures).max(1));
    let scaled = u128::from(failures).saturating_mul(20_000);
    let rounded = scaled
        .saturating_add(total)
        .checked_div(total.saturating_mul(2))
        .unwrap_or(0);
    ErrorRate::from_hundredths(u64::try_from(rounded).unwrap_or(u64::MAX))
}

/// One point per occupied bucket, each carrying the same run-wide rate.
///
/// The backend reports no per-bucket failure attribution, so every bucket of a
/// snapshot shows the error rate of the whole run at that moment.
#[must_use]
pub fn error_rate_series(samples: &[Sample], success: u64, failures: u64) -> Vec<ErrorRatePoint> {
    let rate = error_rate(success, failures);
    let buckets: BTreeSet<i64> = samples.iter().map(Sample::bucket).collect();
    buckets
        .into_iter()
        .map(|bucket| ErrorRatePoint {
            bucket,
            label_second: bucket_label(bucket),
            error_rate: rate,
        })
        .collect()
}
