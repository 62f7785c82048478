//! Summary statistics over integer samples
//!
//! Sums are accumulated in `i128`, so the mean is exact up to the final
//! division. Deviations are taken from the integer part of the mean before
//! converting to `f64`, which keeps the variance free of cancellation when
//! the samples sit far from zero (gaps around 1000, latencies above 2^24).

/// Mean and population standard deviation of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by n)
    pub std_dev: f64,
}

impl Moments {
    /// `None` for an empty sample
    pub fn from_u64(values: &[u64]) -> Option<Self> {
        Self::from_iter_i128(values.iter().map(|&v| v as i128), values.len())
    }

    /// `None` for an empty sample
    pub fn from_i64(values: &[i64]) -> Option<Self> {
        Self::from_iter_i128(values.iter().map(|&v| v as i128), values.len())
    }

    fn from_iter_i128<I>(values: I, count: usize) -> Option<Self>
    where
        I: Iterator<Item = i128> + Clone,
    {
        if count == 0 {
            return None;
        }
        let n = count as i128;
        let sum: i128 = values.clone().sum();

        // mean = quotient + remainder / n, both parts exact
        let quotient = sum.div_euclid(n);
        let fraction = sum.rem_euclid(n) as f64 / count as f64;
        let mean = quotient as f64 + fraction;

        let sum_sq: f64 = values
            .map(|v| {
                let deviation = (v - quotient) as f64 - fraction;
                deviation * deviation
            })
            .sum();
        let std_dev = (sum_sq / count as f64).sqrt();

        Some(Self {
            count,
            mean,
            std_dev,
        })
    }
}

/// Linearly interpolated percentile of sorted data (`percentile` in 0..=100)
pub fn percentile(sorted: &[u64], percentile: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0] as f64;
    }

    let index = (percentile / 100.0) * (sorted.len() - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted[lower] as f64
    } else {
        let weight = index - lower as f64;
        let span = (sorted[upper] - sorted[lower]) as f64;
        sorted[lower] as f64 + span * weight
    }
}

/// Median of sorted `i64` data, mean of the two middle values for even lengths
pub fn median_i64(sorted: &[i64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        return sorted[n / 2] as f64;
    }
    let (a, b) = (sorted[n / 2 - 1], sorted[n / 2]);
    // b >= a, so the i128 difference cannot overflow
    a as f64 + (b as i128 - a as i128) as f64 / 2.0
}
