//! Deterministic mock air-quality data.
//!
//! Every city name maps to the same numbers on every platform: the name is
//! hashed, the hash seeds a small linear-congruential generator, and the
//! generator drives a random walk backwards from the current reading.

use crate::series::{DisplayKind, Series, SERIES_CAPACITY};

// ─── TIERS ──────────────────────────────────────────────────────

/// Style classes the theme colours status labels by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleClass {
    Good,
    Ok,
    Bad,
}

impl StyleClass {
    pub fn css_name(&self) -> &'static str {
        match self {
            StyleClass::Good => "aqi-good",
            StyleClass::Ok => "aqi-ok",
            StyleClass::Bad => "aqi-bad",
        }
    }
}

/// Air-quality classification, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StatusTier {
    Good,
    Satisfactory,
    Moderate,
    Poor,
    VeryBad,
}

impl StatusTier {
    /// Upper bounds are inclusive: 50 is still Good, 51 is Satisfactory.
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => StatusTier::Good,
            51..=100 => StatusTier::Satisfactory,
            101..=200 => StatusTier::Moderate,
            201..=300 => StatusTier::Poor,
            _ => StatusTier::VeryBad,
        }
    }

    /// 1-based rank.
    pub fn rank(&self) -> u8 {
        *self as u8 + 1
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusTier::Good => "Good",
            StatusTier::Satisfactory => "Satisfactory",
            StatusTier::Moderate => "Moderate",
            StatusTier::Poor => "Poor",
            StatusTier::VeryBad => "Very Bad",
        }
    }

    pub fn indicator(&self) -> &'static str {
        match self {
            StatusTier::Good => "🟢",
            StatusTier::Satisfactory => "🟡",
            StatusTier::Moderate => "🟠",
            StatusTier::Poor => "🔴",
            StatusTier::VeryBad => "🔴🔴🔴",
        }
    }

    pub fn style_class(&self) -> StyleClass {
        match self {
            StatusTier::Good => StyleClass::Good,
            StatusTier::Satisfactory => StyleClass::Ok,
            StatusTier::Moderate | StatusTier::Poor | StatusTier::VeryBad => StyleClass::Bad,
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            StatusTier::Good => "Air quality is good. Enjoy outdoor activities!",
            StatusTier::Satisfactory => {
                "Air quality is acceptable. Sensitive groups should limit prolonged outdoor exertion."
            }
            StatusTier::Moderate => {
                "Members of sensitive groups may experience health effects. The general public is not likely to be affected."
            }
            StatusTier::Poor => {
                "Everyone may begin to experience health effects; members of sensitive groups may experience more serious health effects."
            }
            StatusTier::VeryBad => {
                "Health warnings of emergency conditions. The entire population is more likely to be affected."
            }
        }
    }
}

// ─── SUMMARY ────────────────────────────────────────────────────

/// Headline readings for one city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiSummary {
    pub aqi: u32,
    pub tier: StatusTier,
    pub pm25: f64,
    pub pm10: f64,
}

impl AqiSummary {
    pub fn from_aqi(aqi: u32) -> Self {
        Self {
            aqi,
            tier: StatusTier::from_aqi(aqi),
            pm25: aqi as f64 * 0.6,
            pm10: aqi as f64 * 1.2,
        }
    }

    /// Status text with its indicator, e.g. "Moderate 🟠".
    pub fn status_text(&self) -> String {
        format!("{} {}", self.tier.label(), self.tier.indicator())
    }

    pub fn pm25_text(&self) -> String {
        format!("PM2.5: {:.1}", self.pm25)
    }

    pub fn pm10_text(&self) -> String {
        format!("PM10: {:.1}", self.pm10)
    }
}

// ─── GENERATOR ──────────────────────────────────────────────────

/// `hash = hash * 31 + byte` over the UTF-8 bytes, wrapping at 32 bits.
pub fn name_hash(name: &str) -> u32 {
    name.bytes()
        .fold(0u32, |h, b| h.wrapping_mul(31).wrapping_add(u32::from(b)))
}

/// The classic `rand()` LCG; outputs are in `0..32768`.
#[derive(Debug, Clone)]
pub struct Lcg {
    seed: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn next_u15(&mut self) -> u32 {
        self.seed = self.seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (self.seed >> 16) % 32_768
    }
}

/// Generate the mock series for `name`.
///
/// The base value is the current AQI and lives in the summary. The samples are
/// the 24 readings that led up to it, oldest first: the walk starts at the base
/// and steps backwards in time, each step prepended.
pub fn mock_series(name: &str) -> Series {
    let hash = name_hash(name);
    let mut rng = Lcg::new(hash);
    let base = hash % 300 + 50;

    let mut history = vec![0u32; SERIES_CAPACITY];
    let mut current = base as i64;
    for slot in history.iter_mut().rev() {
        let fluctuation = (rng.next_u15() % 41) as i64 - 20;
        current = (current + fluctuation).max(0);
        *slot = current as u32;
    }

    Series::from_samples(name, DisplayKind::MockIndex, history)
        .with_summary(AqiSummary::from_aqi(base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries_inclusive() {
        let cases = [
            (0, 1),
            (50, 1),
            (51, 2),
            (100, 2),
            (101, 3),
            (200, 3),
            (201, 4),
            (300, 4),
            (301, 5),
            (999, 5),
        ];
        for (aqi, rank) in cases {
            assert_eq!(StatusTier::from_aqi(aqi).rank(), rank, "aqi {aqi}");
        }
    }

    #[test]
    fn test_tier_style_classes() {
        assert_eq!(StatusTier::Good.style_class().css_name(), "aqi-good");
        assert_eq!(StatusTier::Satisfactory.style_class().css_name(), "aqi-ok");
        assert_eq!(StatusTier::Moderate.style_class().css_name(), "aqi-bad");
        assert_eq!(StatusTier::VeryBad.style_class().css_name(), "aqi-bad");
        assert!(StatusTier::Good < StatusTier::VeryBad);
    }

    #[test]
    fn test_delhi_regression_vector() {
        assert_eq!(name_hash("Delhi"), 65_915_436);
        let s = mock_series("Delhi");
        let summary = s.summary().copied().unwrap();
        assert_eq!(summary.aqi, 86);
        assert_eq!(summary.tier, StatusTier::Satisfactory);
        assert_eq!(
            s.to_vec(),
            vec![
                150, 132, 113, 126, 106, 88, 77, 59, 63, 64, 82, 87, 84, 94, 77, 73, 93, 90, 81,
                84, 84, 99, 92, 85
            ]
        );
    }

    #[test]
    fn test_mumbai_summary() {
        let s = mock_series("Mumbai");
        let summary = s.summary().copied().unwrap();
        assert_eq!(summary.aqi, 143);
        assert_eq!(summary.tier, StatusTier::Moderate);
        assert_eq!(summary.pm25_text(), "PM2.5: 85.8");
        assert_eq!(summary.pm10_text(), "PM10: 171.6");
        assert_eq!(summary.status_text(), "Moderate 🟠");
        assert_eq!(s.latest(), Some(136));
    }

    #[test]
    fn test_mock_series_is_reproducible() {
        for name in ["Delhi", "Mumbai", "New Delhi", "Kolkata", ""] {
            assert_eq!(mock_series(name), mock_series(name));
        }
        assert_ne!(mock_series("Delhi").to_vec(), mock_series("Mumbai").to_vec());
    }

    #[test]
    fn test_walk_clamps_at_zero() {
        // The empty name hashes to 0 and walks down to the floor.
        let s = mock_series("");
        assert_eq!(s.summary().map(|x| x.aqi), Some(50));
        assert!(s.samples().any(|v| v == 0));
        assert_eq!(s.len(), SERIES_CAPACITY);
    }

    #[test]
    fn test_lcg_sequence() {
        let mut rng = Lcg::new(1);
        // glibc-style TYPE_0 rand() with seed 1.
        assert_eq!(rng.next_u15(), 16_838);
        assert_eq!(rng.next_u15(), 5_758);
    }
}
