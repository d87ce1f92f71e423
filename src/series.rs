use serde::{Deserialize, Serialize};

use crate::aqi::AqiSummary;
use crate::ringbuf::RingBuffer;

/// Number of samples every series keeps (one "day" of hourly readings for the
/// mock data, 24 seconds of live data).
pub const SERIES_CAPACITY: usize = 24;

// ─── UNITS & KINDS ──────────────────────────────────────────────

/// Unit used for the network throughput series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateUnit {
    /// Megabits per second.
    #[default]
    Mbps,
    /// Mebibytes per second.
    Megabytes,
}

impl RateUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            RateUnit::Mbps => " Mbps",
            RateUnit::Megabytes => " MB/s",
        }
    }

    /// Convert a byte count observed over `secs` seconds into this unit.
    pub fn from_bytes(&self, bytes: u64, secs: f64) -> f64 {
        if secs <= 0.0 {
            return 0.0;
        }
        let mib = bytes as f64 / (1024.0 * 1024.0);
        match self {
            RateUnit::Mbps => mib * 8.0 / secs,
            RateUnit::Megabytes => mib / secs,
        }
    }
}

/// How a series' values are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayKind {
    /// Unitless air-quality index.
    MockIndex,
    Percentage,
    Rate(RateUnit),
}

impl DisplayKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            DisplayKind::MockIndex => "",
            DisplayKind::Percentage => "%",
            DisplayKind::Rate(unit) => unit.suffix(),
        }
    }

    pub fn format(&self, value: u32) -> String {
        format!("{value}{}", self.suffix())
    }

    pub fn is_live(&self) -> bool {
        !matches!(self, DisplayKind::MockIndex)
    }
}

/// The three host metrics sampled every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Cpu,
    Memory,
    Network,
}

impl MetricKind {
    pub const ALL: [MetricKind; 3] = [MetricKind::Cpu, MetricKind::Memory, MetricKind::Network];

    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU Load",
            MetricKind::Memory => "Memory Usage",
            MetricKind::Network => "Network Traffic",
        }
    }

    pub fn display(&self, rate: RateUnit) -> DisplayKind {
        match self {
            MetricKind::Cpu | MetricKind::Memory => DisplayKind::Percentage,
            MetricKind::Network => DisplayKind::Rate(rate),
        }
    }
}

// ─── SERIES ─────────────────────────────────────────────────────

/// A named rolling sequence of samples, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    kind: DisplayKind,
    samples: RingBuffer<u32>,
    summary: Option<AqiSummary>,
}

impl Series {
    /// A series built from existing samples. Only the newest
    /// `SERIES_CAPACITY` samples are kept.
    pub fn from_samples(
        name: impl Into<String>,
        kind: DisplayKind,
        samples: impl IntoIterator<Item = u32>,
    ) -> Self {
        let mut buf = RingBuffer::new(SERIES_CAPACITY);
        buf.extend(samples);
        Self {
            name: name.into(),
            kind,
            samples: buf,
            summary: None,
        }
    }

    /// A live series primed with `SERIES_CAPACITY` zero samples.
    pub fn live(metric: MetricKind, rate: RateUnit) -> Self {
        Self {
            name: metric.title().to_string(),
            kind: metric.display(rate),
            samples: RingBuffer::filled(SERIES_CAPACITY, 0),
            summary: None,
        }
    }

    pub fn with_summary(mut self, summary: AqiSummary) -> Self {
        if self.kind == DisplayKind::MockIndex {
            self.summary = Some(summary);
        }
        self
    }

    pub fn push(&mut self, sample: u32) {
        self.samples.push(sample);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DisplayKind {
        self.kind
    }

    pub fn summary(&self) -> Option<&AqiSummary> {
        self.summary.as_ref()
    }

    pub fn samples(&self) -> impl DoubleEndedIterator<Item = u32> + ExactSizeIterator + '_ {
        self.samples.iter().copied()
    }

    pub fn get(&self, idx: usize) -> Option<u32> {
        self.samples.get(idx).copied()
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.samples.to_vec()
    }

    pub fn latest(&self) -> Option<u32> {
        self.samples.last().copied()
    }

    pub fn max(&self) -> Option<u32> {
        self.samples().max()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }
}

// ─── LIVE STORE ─────────────────────────────────────────────────

/// The three live series, one per metric.
#[derive(Debug, Clone)]
pub struct LiveStore {
    cpu: Series,
    memory: Series,
    network: Series,
}

impl LiveStore {
    pub fn new(rate: RateUnit) -> Self {
        Self {
            cpu: Series::live(MetricKind::Cpu, rate),
            memory: Series::live(MetricKind::Memory, rate),
            network: Series::live(MetricKind::Network, rate),
        }
    }

    pub fn get(&self, metric: MetricKind) -> &Series {
        match metric {
            MetricKind::Cpu => &self.cpu,
            MetricKind::Memory => &self.memory,
            MetricKind::Network => &self.network,
        }
    }

    pub fn push(&mut self, metric: MetricKind, sample: u32) {
        match metric {
            MetricKind::Cpu => self.cpu.push(sample),
            MetricKind::Memory => self.memory.push(sample),
            MetricKind::Network => self.network.push(sample),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_live_series_starts_zeroed() {
        let s = Series::live(MetricKind::Cpu, RateUnit::Mbps);
        assert_eq!(s.len(), SERIES_CAPACITY);
        assert!(s.samples().all(|v| v == 0));
        assert_eq!(s.name(), "CPU Load");
        assert_eq!(s.kind(), DisplayKind::Percentage);
    }

    #[test]
    fn test_series_never_exceeds_capacity() {
        let mut s = Series::from_samples("x", DisplayKind::MockIndex, []);
        for i in 0..100 {
            s.push(i);
            assert!(s.len() <= SERIES_CAPACITY);
        }
        assert_eq!(s.len(), SERIES_CAPACITY);
        assert_eq!(s.latest(), Some(99));
    }

    #[test]
    fn test_push_at_capacity_drops_oldest_only() {
        let mut s = Series::from_samples("x", DisplayKind::MockIndex, 0..24);
        let before = s.to_vec();
        s.push(500);
        let after = s.to_vec();
        assert_eq!(after.len(), SERIES_CAPACITY);
        assert_eq!(&after[..23], &before[1..]);
        assert_eq!(after[23], 500);
    }

    #[test]
    fn test_from_samples_keeps_newest() {
        let s = Series::from_samples("x", DisplayKind::MockIndex, 0..30);
        assert_eq!(s.get(0), Some(6));
        assert_eq!(s.latest(), Some(29));
    }

    #[test]
    fn test_unit_suffixes() {
        assert_eq!(DisplayKind::Percentage.format(42), "42%");
        assert_eq!(DisplayKind::Rate(RateUnit::Mbps).format(3), "3 Mbps");
        assert_eq!(DisplayKind::Rate(RateUnit::Megabytes).format(3), "3 MB/s");
        assert_eq!(DisplayKind::MockIndex.format(150), "150");
        assert!(!DisplayKind::MockIndex.is_live());
        assert!(MetricKind::Network.display(RateUnit::Mbps).is_live());
    }

    #[test]
    fn test_rate_conversion() {
        let one_mib = 1024 * 1024;
        assert!((RateUnit::Mbps.from_bytes(one_mib, 1.0) - 8.0).abs() < 1e-9);
        assert!((RateUnit::Megabytes.from_bytes(one_mib * 4, 2.0) - 2.0).abs() < 1e-9);
        assert_eq!(RateUnit::Mbps.from_bytes(one_mib, 0.0), 0.0);
    }

    #[test]
    fn test_live_store_push_targets_one_metric() {
        let mut store = LiveStore::new(RateUnit::Mbps);
        store.push(MetricKind::Memory, 61);
        assert_eq!(store.get(MetricKind::Memory).latest(), Some(61));
        assert_eq!(store.get(MetricKind::Cpu).latest(), Some(0));
        assert_eq!(store.get(MetricKind::Network).latest(), Some(0));
    }
}
