//! Bounded FIFO history buffer backing one chart series.

use crate::config::HISTORY_CAPACITY;
use std::collections::VecDeque;

/// Fixed-capacity, insertion-ordered sample buffer.
///
/// Appending beyond capacity evicts from the front, so the buffer always
/// holds the most recent `min(N, capacity)` samples in arrival order. No
/// timestamps are kept; index position implies relative recency.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest entries while over capacity.
    /// No validation: NaN from a malformed payload is stored as-is.
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(value);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently appended sample.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    /// Chart dataset points: x positions 1..=N, y the sample values.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, &v)| ((i + 1) as f64, v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_never_exceeds_capacity() {
        let mut buffer = HistoryBuffer::new();
        for i in 0..200 {
            buffer.push(i as f64);
            assert!(buffer.len() <= HISTORY_CAPACITY);
        }
        assert_eq!(buffer.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn eviction_is_strict_fifo() {
        // Appending v61 to a full [v1..v60] yields [v2..v60, v61].
        let mut buffer = HistoryBuffer::new();
        for i in 1..=60 {
            buffer.push(i as f64);
        }
        buffer.push(61.0);

        let values = buffer.values();
        assert_eq!(values.len(), 60);
        assert_eq!(values[0], 2.0);
        assert_eq!(values[58], 60.0);
        assert_eq!(values[59], 61.0);
    }

    #[test]
    fn keeps_arrival_order_below_capacity() {
        let mut buffer = HistoryBuffer::new();
        buffer.push(3.0);
        buffer.push(1.0);
        buffer.push(2.0);
        assert_eq!(buffer.values(), vec![3.0, 1.0, 2.0]);
        assert_eq!(buffer.latest(), Some(2.0));
    }

    #[test]
    fn points_are_one_indexed() {
        let mut buffer = HistoryBuffer::new();
        buffer.push(10.0);
        buffer.push(20.0);
        assert_eq!(buffer.points(), vec![(1.0, 10.0), (2.0, 20.0)]);
    }

    #[test]
    fn accepts_nan_without_validation() {
        let mut buffer = HistoryBuffer::with_capacity(2);
        buffer.push(f64::NAN);
        buffer.push(1.0);
        assert_eq!(buffer.len(), 2);
        assert!(buffer.values()[0].is_nan());
    }

    #[test]
    fn small_capacity_evicts_early() {
        let mut buffer = HistoryBuffer::with_capacity(3);
        for v in [1.0, 2.0, 3.0, 4.0, 5.0] {
            buffer.push(v);
        }
        assert_eq!(buffer.values(), vec![3.0, 4.0, 5.0]);
    }
}
