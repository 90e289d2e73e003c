// Copyright 2025 the Lattice Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running statistics over `f32` samples.

use alloc::string::String;
use core::fmt;

/// Accumulates count, sum, sum of squares, minimum and maximum of a sample stream.
///
/// Used for bucket occupancy reports and graph edge-length summaries.
#[derive(Clone, Debug, PartialEq)]
pub struct Stat {
    name: String,
    use_rms: bool,
    n: u64,
    sum: f64,
    sum2: f64,
    min: f32,
    max: f32,
}

impl Default for Stat {
    fn default() -> Self {
        Self {
            name: String::new(),
            use_rms: false,
            n: 0,
            sum: 0.0,
            sum2: 0.0,
            min: f32::MAX,
            max: -f32::MAX,
        }
    }
}

impl Stat {
    /// Create an empty, unnamed accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty accumulator whose summary line starts with `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Report root-mean-square instead of standard deviation in the summary.
    pub fn with_rms(mut self) -> Self {
        self.use_rms = true;
        self
    }

    /// Name given at construction (possibly empty).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add one sample.
    pub fn enter(&mut self, v: f32) {
        let d = f64::from(v);
        self.n += 1;
        self.sum += d;
        self.sum2 += d * d;
        if v < self.min {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
    }

    /// Merge the samples of `other` into `self`.
    pub fn add(&mut self, other: &Self) {
        self.n += other.n;
        self.sum += other.sum;
        self.sum2 += other.sum2;
        if other.min < self.min {
            self.min = other.min;
        }
        if other.max > self.max {
            self.max = other.max;
        }
    }

    /// Forget all samples (the name is kept).
    pub fn zero(&mut self) {
        *self = Self {
            name: core::mem::take(&mut self.name),
            use_rms: self.use_rms,
            ..Self::default()
        };
    }

    /// Number of samples.
    pub fn num(&self) -> u64 {
        self.n
    }

    /// True if no sample was entered.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Sum of samples.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Smallest sample, or `f32::MAX` when empty.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Largest sample, or `-f32::MAX` when empty.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Mean, or zero when empty.
    #[allow(
        clippy::cast_precision_loss,
        reason = "sample counts stay far below 2^52."
    )]
    pub fn avg(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            self.sum / self.n as f64
        }
    }

    /// Unbiased sample variance, or zero with fewer than two samples.
    #[allow(
        clippy::cast_precision_loss,
        reason = "sample counts stay far below 2^52."
    )]
    pub fn var(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let n = self.n as f64;
        ((self.sum2 - self.sum * self.sum / n) / (n - 1.0)).max(0.0)
    }

    /// Sample standard deviation.
    pub fn sdv(&self) -> f64 {
        sqrt(self.var())
    }

    /// Root mean square, or zero when empty.
    #[allow(
        clippy::cast_precision_loss,
        reason = "sample counts stay far below 2^52."
    )]
    pub fn rms(&self) -> f64 {
        if self.n == 0 {
            0.0
        } else {
            sqrt(self.sum2 / self.n as f64)
        }
    }
}

impl Extend<f32> for Stat {
    fn extend<I: IntoIterator<Item = f32>>(&mut self, iter: I) {
        for v in iter {
            self.enter(v);
        }
    }
}

impl FromIterator<f32> for Stat {
    fn from_iter<I: IntoIterator<Item = f32>>(iter: I) -> Self {
        let mut stat = Self::new();
        stat.extend(iter);
        stat
    }
}

impl fmt::Display for Stat {
    /// One-line summary: `name: (n) min:max av=mean sd=deviation`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write!(f, "{}: ", self.name)?;
        }
        let (label, spread) = if self.use_rms {
            ("rms", self.rms())
        } else {
            ("sd", self.sdv())
        };
        write!(
            f,
            "({}) {}:{} av={} {}={}",
            self.n,
            self.min,
            self.max,
            self.avg(),
            label,
            spread
        )
    }
}

#[cfg(feature = "std")]
fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}
