use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::time::Instant;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

use crate::series::{MetricKind, RateUnit};

/// A single host counter. `sample` must return quickly; it runs on the UI
/// thread once per tick.
pub trait Counter: Send {
    fn sample(&mut self) -> u32;
}

/// Which counters back the live charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplerMode {
    #[default]
    System,
    Simulated,
}

// ─── SYSTEM COUNTERS ────────────────────────────────────────────

/// Average CPU usage across cores since the previous refresh.
pub struct CpuCounter {
    sys: System,
}

impl CpuCounter {
    pub fn new() -> Self {
        let mut sys = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new().with_cpu_usage()),
        );
        // Usage is a delta; prime the baseline so the first tick is meaningful.
        sys.refresh_cpu_usage();
        Self { sys }
    }
}

impl Counter for CpuCounter {
    fn sample(&mut self) -> u32 {
        self.sys.refresh_cpu_usage();
        let cpus = self.sys.cpus();
        if cpus.is_empty() {
            return 0;
        }
        let avg = cpus.iter().map(|c| c.cpu_usage()).sum::<f32>() / cpus.len() as f32;
        avg.clamp(0.0, 100.0) as u32
    }
}

/// Used memory as a percentage of total.
pub struct MemoryCounter {
    sys: System,
}

impl MemoryCounter {
    pub fn new() -> Self {
        Self {
            sys: System::new_with_specifics(
                RefreshKind::new().with_memory(MemoryRefreshKind::new().with_ram()),
            ),
        }
    }
}

impl Counter for MemoryCounter {
    fn sample(&mut self) -> u32 {
        self.sys.refresh_memory();
        memory_percent(self.sys.used_memory(), self.sys.total_memory())
    }
}

fn memory_percent(used: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    (used as f64 / total as f64 * 100.0).clamp(0.0, 100.0) as u32
}

/// Combined rx + tx throughput over all non-loopback interfaces.
pub struct NetworkCounter {
    networks: Networks,
    unit: RateUnit,
    last: Option<Instant>,
}

impl NetworkCounter {
    pub fn new(unit: RateUnit) -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
            unit,
            last: None,
        }
    }
}

impl Counter for NetworkCounter {
    fn sample(&mut self) -> u32 {
        self.networks.refresh();
        let now = Instant::now();
        let Some(prev) = self.last.replace(now) else {
            // No baseline yet: the deltas cover an unknown interval.
            return 0;
        };
        let bytes: u64 = self
            .networks
            .iter()
            .filter(|(name, _)| !is_loopback(name))
            .map(|(_, data)| data.received() + data.transmitted())
            .sum();
        let secs = now.duration_since(prev).as_secs_f64();
        self.unit.from_bytes(bytes, secs).max(0.0) as u32
    }
}

fn is_loopback(name: &str) -> bool {
    name == "lo" || name.starts_with("lo0") || name.to_ascii_lowercase().contains("loopback")
}

// ─── SIMULATED COUNTER ──────────────────────────────────────────

/// Bounded pseudo-random stand-in for hosts without counters.
pub struct SimulatedCounter {
    rng: StdRng,
    range: RangeInclusive<u32>,
}

impl SimulatedCounter {
    pub fn new(range: RangeInclusive<u32>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng, range }
    }

    pub fn for_metric(metric: MetricKind, seed: Option<u64>) -> Self {
        let range = match metric {
            MetricKind::Cpu => 0..=99,
            MetricKind::Memory => 45..=55,
            MetricKind::Network => 0..=99,
        };
        Self::new(range, seed)
    }
}

impl Counter for SimulatedCounter {
    fn sample(&mut self) -> u32 {
        self.rng.random_range(self.range.clone())
    }
}

// ─── LIVE SAMPLER ───────────────────────────────────────────────

/// One counter per live metric.
pub struct LiveSampler {
    cpu: Box<dyn Counter>,
    memory: Box<dyn Counter>,
    network: Box<dyn Counter>,
}

impl LiveSampler {
    pub fn new(mode: SamplerMode, unit: RateUnit) -> Self {
        match mode {
            SamplerMode::System => Self::from_counters(
                Box::new(CpuCounter::new()),
                Box::new(MemoryCounter::new()),
                Box::new(NetworkCounter::new(unit)),
            ),
            SamplerMode::Simulated => Self::simulated(None),
        }
    }

    /// Simulated counters; a fixed seed gives a reproducible sequence.
    pub fn simulated(seed: Option<u64>) -> Self {
        let seeded = |offset: u64| seed.map(|s| s.wrapping_add(offset));
        Self {
            cpu: Box::new(SimulatedCounter::for_metric(MetricKind::Cpu, seeded(0))),
            memory: Box::new(SimulatedCounter::for_metric(MetricKind::Memory, seeded(1))),
            network: Box::new(SimulatedCounter::for_metric(MetricKind::Network, seeded(2))),
        }
    }

    pub fn from_counters(
        cpu: Box<dyn Counter>,
        memory: Box<dyn Counter>,
        network: Box<dyn Counter>,
    ) -> Self {
        Self { cpu, memory, network }
    }

    pub fn sample(&mut self, metric: MetricKind) -> u32 {
        match metric {
            MetricKind::Cpu => self.cpu.sample(),
            MetricKind::Memory => self.memory.sample(),
            MetricKind::Network => self.network.sample(),
        }
    }
}
