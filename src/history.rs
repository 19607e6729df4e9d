// Bounded per-metric sample windows

use crate::models::{MetricKind, Sample};
use std::collections::VecDeque;

/// Default window size: the last 20 samples per metric.
pub const DEFAULT_CAPACITY: usize = 20;

/// Fixed-capacity FIFO window over one metric's samples. Appends go to the
/// tail; when the window is full the oldest sample is evicted. Values are
/// stored as supplied: validation is the producer's concern.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append at the tail, evicting the head when over capacity. At most one
    /// eviction per append since appends happen once per tick.
    pub fn append(&mut self, sample: Sample) {
        self.samples.push_back(sample);
        if self.samples.len() > self.capacity {
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

    /// Retained values, oldest first.
    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    /// Retained samples, oldest first.
    pub fn samples(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<Sample> {
        self.samples.back().copied()
    }
}

/// Explicit context object owning one window per metric kind. Owned by the
/// poller; only ever mutated from tick completion, so no shared state.
#[derive(Debug, Clone)]
pub struct MetricHistory {
    buffers: [SampleBuffer; MetricKind::ALL.len()],
}

impl MetricHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffers: std::array::from_fn(|_| SampleBuffer::new(capacity)),
        }
    }

    pub fn buffer(&self, kind: MetricKind) -> &SampleBuffer {
        &self.buffers[kind as usize]
    }

    pub fn append(&mut self, kind: MetricKind, sample: Sample) {
        self.buffers[kind as usize].append(sample);
    }

    /// All four series in canonical order, oldest first within each.
    pub fn series(&self) -> Vec<(MetricKind, Vec<Sample>)> {
        MetricKind::ALL
            .iter()
            .map(|&kind| (kind, self.buffer(kind).samples()))
            .collect()
    }
}

impl Default for MetricHistory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
