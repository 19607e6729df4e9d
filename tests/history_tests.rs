// Sliding-window buffer tests

use syswatch_view::history::{DEFAULT_CAPACITY, MetricHistory, SampleBuffer};
use syswatch_view::models::{MetricKind, Sample};

fn sample(value: f64) -> Sample {
    Sample {
        value,
        observed_at: 0,
    }
}

#[test]
fn test_buffer_starts_empty() {
    let buffer = SampleBuffer::new(DEFAULT_CAPACITY);
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
    assert!(buffer.latest().is_none());
    assert!(buffer.values().is_empty());
}

#[test]
fn test_buffer_append_below_capacity_keeps_everything() {
    let mut buffer = SampleBuffer::new(20);
    for i in 0..5 {
        buffer.append(sample(i as f64));
    }
    assert_eq!(buffer.len(), 5);
    assert_eq!(buffer.values(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_buffer_evicts_oldest_first_at_capacity() {
    let mut buffer = SampleBuffer::new(20);
    for i in 0..30 {
        buffer.append(sample(i as f64));
    }
    assert_eq!(buffer.len(), 20);
    // The retained values are exactly the last 20 appended, oldest first.
    let expected: Vec<f64> = (10..30).map(|i| i as f64).collect();
    assert_eq!(buffer.values(), expected);
    assert_eq!(buffer.latest().unwrap().value, 29.0);
}

#[test]
fn test_buffer_accepts_unvalidated_values() {
    let mut buffer = SampleBuffer::new(3);
    buffer.append(sample(-5.0));
    buffer.append(sample(250.0));
    assert_eq!(buffer.values(), vec![-5.0, 250.0]);
}

#[test]
fn test_buffer_capacity_one() {
    let mut buffer = SampleBuffer::new(1);
    buffer.append(sample(1.0));
    buffer.append(sample(2.0));
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.values(), vec![2.0]);
}

#[test]
fn test_history_buffers_are_independent() {
    let mut history = MetricHistory::new(20);
    history.append(MetricKind::Cpu, sample(42.0));
    assert_eq!(history.buffer(MetricKind::Cpu).len(), 1);
    assert_eq!(history.buffer(MetricKind::Ram).len(), 0);
    assert_eq!(history.buffer(MetricKind::Disk).len(), 0);
    assert_eq!(history.buffer(MetricKind::Ping).len(), 0);
}

#[test]
fn test_history_series_in_canonical_order() {
    let mut history = MetricHistory::new(20);
    for kind in MetricKind::ALL {
        history.append(kind, sample(1.0));
    }
    let series = history.series();
    let kinds: Vec<MetricKind> = series.iter().map(|(k, _)| *k).collect();
    assert_eq!(kinds, MetricKind::ALL.to_vec());
    assert!(series.iter().all(|(_, samples)| samples.len() == 1));
}

#[test]
fn test_samples_keep_observed_at() {
    let mut buffer = SampleBuffer::new(20);
    buffer.append(Sample {
        value: 1.0,
        observed_at: 1000,
    });
    buffer.append(Sample {
        value: 2.0,
        observed_at: 4000,
    });
    let samples = buffer.samples();
    assert_eq!(samples[0].observed_at, 1000);
    assert_eq!(samples[1].observed_at, 4000);
}
