// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/glowbarn-rs

//! Fixed-capacity rolling history of accepted samples

use std::collections::vec_deque::{self, VecDeque};
use serde::{Deserialize, Serialize};

/// Default number of samples kept in the rolling window
pub const DEFAULT_CAPACITY: usize = 100;

/// One accepted reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sample {
    /// Session-assigned counter, not wall-clock time
    pub sequence: u64,
    /// X-axis acceleration
    pub x: i32,
    /// Y-axis acceleration
    pub y: i32,
    /// Z-axis acceleration
    pub z: i32,
    /// Magnitude as computed by the device
    pub magnitude: i32,
}

/// FIFO window of samples, oldest first
#[derive(Debug, Clone)]
pub struct RollingSeries {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl RollingSeries {
    /// A zero capacity is raised to one so the last sample is always retained.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append to the tail, evicting the head first when full
    pub fn append(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Owned copy of the window, oldest first
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    /// Iterate oldest first
    pub fn iter(&self) -> vec_deque::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Most recently appended sample
    pub fn last(&self) -> Option<Sample> {
        self.samples.back().copied()
    }

    /// Samples currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True before the first append
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True once the next append evicts
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Maximum samples held
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a RollingSeries {
    type Item = &'a Sample;
    type IntoIter = vec_deque::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(sequence: u64) -> Sample {
        Sample { sequence, x: 1, y: 2, z: 3, magnitude: sequence as i32 }
    }

    #[test]
    fn test_empty_series() {
        let series = RollingSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.capacity(), DEFAULT_CAPACITY);
        assert!(series.last().is_none());
        assert!(series.snapshot().is_empty());
    }

    #[test]
    fn test_fifo_eviction() {
        let mut series = RollingSeries::new(100);
        for seq in 0..101 {
            series.append(sample(seq));
        }

        assert_eq!(series.len(), 100);
        let snapshot = series.snapshot();
        assert!(snapshot.iter().all(|s| s.sequence != 0));
        assert_eq!(snapshot.first().map(|s| s.sequence), Some(1));
        assert_eq!(snapshot.last().map(|s| s.sequence), Some(100));
    }

    #[test]
    fn test_order_is_preserved() {
        let mut series = RollingSeries::new(3);
        for seq in 0..7 {
            series.append(sample(seq));
        }
        let seqs: Vec<u64> = series.iter().map(|s| s.sequence).collect();
        assert_eq!(seqs, vec![4, 5, 6]);
        assert!(series.is_full());
    }

    #[test]
    fn test_last_tracks_latest_append() {
        let mut series = RollingSeries::new(2);
        series.append(sample(0));
        assert_eq!(series.last(), Some(sample(0)));
        series.append(sample(1));
        series.append(sample(2));
        assert_eq!(series.last(), Some(sample(2)));
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut series = RollingSeries::new(0);
        series.append(sample(0));
        series.append(sample(1));
        assert_eq!(series.len(), 1);
        assert_eq!(series.last(), Some(sample(1)));
    }
}
