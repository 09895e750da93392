use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Default reservoir size, large enough for a 99.9% quantile with 5%
/// margin of error at 95% confidence.
pub const DEFAULT_RESERVOIR_SIZE: usize = 1028;

/// Distribution of observed values over a sliding window of recent samples.
pub struct Histogram {
    count: AtomicU64,
    capacity: usize,
    window: Mutex<VecDeque<i64>>,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_RESERVOIR_SIZE)
    }
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            count: AtomicU64::new(0),
            capacity,
            window: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Record one observation, evicting the oldest once the window is full.
    pub fn update(&self, value: i64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        let mut window = self.window.lock().unwrap_or_else(|e| e.into_inner());
        if window.len() == self.capacity {
            window.pop_front();
        }
        window.push_back(value);
    }

    /// Total observations ever recorded, including evicted ones.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        let values: Vec<i64> = {
            let window = self.window.lock().unwrap_or_else(|e| e.into_inner());
            window.iter().copied().collect()
        };
        HistogramSnapshot::new(values)
    }
}

/// Sorted copy of a histogram's window at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSnapshot {
    values: Vec<i64>,
}

impl HistogramSnapshot {
    pub fn new(mut values: Vec<i64>) -> Self {
        values.sort_unstable();
        Self { values }
    }

    /// Value at `quantile` (clamped to `[0, 1]`), linearly interpolated
    /// between the two nearest samples. Empty snapshots yield 0.
    pub fn value(&self, quantile: f64) -> f64 {
        let n = self.values.len();
        if n == 0 {
            return 0.0;
        }
        let quantile = if quantile.is_nan() { 0.0 } else { quantile.clamp(0.0, 1.0) };

        let pos = quantile * (n + 1) as f64;
        let index = pos as usize;
        if index < 1 {
            return self.values[0] as f64;
        }
        if index >= n {
            return self.values[n - 1] as f64;
        }

        let lower = self.values[index - 1] as f64;
        let upper = self.values[index] as f64;
        lower + (pos - pos.floor()) * (upper - lower)
    }

    pub fn median(&self) -> f64 {
        self.value(0.5)
    }

    pub fn p75(&self) -> f64 {
        self.value(0.75)
    }

    pub fn p95(&self) -> f64 {
        self.value(0.95)
    }

    pub fn p98(&self) -> f64 {
        self.value(0.98)
    }

    pub fn p99(&self) -> f64 {
        self.value(0.99)
    }

    pub fn p999(&self) -> f64 {
        self.value(0.999)
    }

    pub fn min(&self) -> f64 {
        self.values.first().map_or(0.0, |v| *v as f64)
    }

    pub fn max(&self) -> f64 {
        self.values.last().map_or(0.0, |v| *v as f64)
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.values.iter().map(|v| *v as f64).sum();
        sum / self.values.len() as f64
    }

    /// Sample standard deviation; 0 with fewer than two samples.
    pub fn std_dev(&self) -> f64 {
        let n = self.values.len();
        if n <= 1 {
            return 0.0;
        }
        let mean = self.mean();
        let sum_sq: f64 = self
            .values
            .iter()
            .map(|v| {
                let d = *v as f64 - mean;
                d * d
            })
            .sum();
        (sum_sq / (n - 1) as f64).sqrt()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}
