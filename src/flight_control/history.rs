use super::telemetry::Telemetry;
use itertools::{Itertools, MinMaxResult};
use serde::Serialize;
use std::collections::VecDeque;

/// A bounded FIFO of samples, evicting the oldest sample once full.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HistoryBuffer {
    samples: VecDeque<f64>,
}

impl HistoryBuffer {
    /// Number of samples kept per buffer.
    pub const CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self { samples: VecDeque::with_capacity(Self::CAPACITY) }
    }

    /// Appends a sample, dropping the oldest one if the buffer is full.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() == Self::CAPACITY {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) { self.samples.clear() }

    pub fn len(&self) -> usize { self.samples.len() }

    pub fn is_empty(&self) -> bool { self.samples.is_empty() }

    pub fn latest(&self) -> Option<f64> { self.samples.back().copied() }

    /// Iterates from the oldest to the most recent sample.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ { self.samples.iter().copied() }

    /// Returns `(min, max)` of the buffered samples, `None` if empty.
    pub fn extent(&self) -> Option<(f64, f64)> {
        match self.samples.iter().copied().minmax_by(f64::total_cmp) {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(x) => Some((x, x)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        }
    }

    /// Largest buffered sample, `0.0` if empty or all samples are negative.
    pub fn max_or_zero(&self) -> f64 {
        self.extent().map_or(0.0, |(_, max)| max.max(0.0))
    }
}

impl Default for HistoryBuffer {
    fn default() -> Self { Self::new() }
}

/// Trend buffers for the telemetry channels shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TelemetryHistory {
    pub speed: HistoryBuffer,
    pub altitude: HistoryBuffer,
    pub fuel: HistoryBuffer,
    pub gforce: HistoryBuffer,
}

impl TelemetryHistory {
    pub fn new() -> Self { Self::default() }

    /// Records one telemetry frame into all four buffers.
    pub fn record(&mut self, telemetry: &Telemetry) {
        self.speed.push(telemetry.speed);
        self.altitude.push(telemetry.altitude);
        self.fuel.push(telemetry.fuel);
        self.gforce.push(telemetry.gforce);
    }

    pub fn clear(&mut self) {
        self.speed.clear();
        self.altitude.clear();
        self.fuel.clear();
        self.gforce.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.speed.is_empty()
            && self.altitude.is_empty()
            && self.fuel.is_empty()
            && self.gforce.is_empty()
    }
}
