use serde::{Serialize, Deserialize};
use std::str::FromStr;

/// Scoring rule used to choose among the free regions that can hold a
/// rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    /// Lowest `y`, then lowest `x`.
    BottomLeft,
    /// Smallest leftover along the shorter side.
    ShortSideFit,
    /// Smallest leftover along the longer side.
    LongSideFit,
    /// Smallest region area, then smallest region width.
    AreaFit,
}

impl Default for Heuristic {
    fn default() -> Self {
        Heuristic::BottomLeft
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom-left" => Ok(Heuristic::BottomLeft),
            "short-side" | "short-side-fit" => Ok(Heuristic::ShortSideFit),
            "long-side" | "long-side-fit" => Ok(Heuristic::LongSideFit),
            "area" | "area-fit" => Ok(Heuristic::AreaFit),
            _ => Err(format!("unknown heuristic: {}", s)),
        }
    }
}

/// Order in which a batch is fed to the packer. Every order is a stable
/// sort, so rectangles with equal keys keep their input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    None,
    HeightAscending,
    HeightDescending,
    AreaAscending,
    AreaDescending,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::HeightDescending
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SortOrder::None),
            "height-asc" => Ok(SortOrder::HeightAscending),
            "height-desc" => Ok(SortOrder::HeightDescending),
            "area-asc" => Ok(SortOrder::AreaAscending),
            "area-desc" => Ok(SortOrder::AreaDescending),
            _ => Err(format!("unknown sort order: {}", s)),
        }
    }
}

/// How the bin grows while searching for a size that holds every rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Growth {
    /// Double one dimension per step, keeping texture-friendly sizes.
    PowerOfTwo,
    /// Grow one dimension by 1 while approaching the required area, then by
    /// the given step on every retry.
    Step(u32),
}

impl Default for Growth {
    fn default() -> Self {
        Growth::PowerOfTwo
    }
}

impl Growth {
    /// Fine-grained growth with the default retry step.
    pub fn step() -> Growth {
        Growth::Step(DEFAULT_GROWTH_STEP)
    }

    pub(crate) fn grow(&self, value: u32, retrying: bool) -> u32 {
        match *self {
            Growth::PowerOfTwo => value.saturating_mul(2),
            Growth::Step(step) if retrying => value.saturating_add(step.max(1)),
            Growth::Step(_) => value.saturating_add(1),
        }
    }
}

pub const DEFAULT_GROWTH_STEP: u32 = 5;
pub const DEFAULT_MAX_SIZE: u32 = 2048;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackerConfig {
    pub size: [u32; 2],
    pub max_size: [u32; 2],
    pub auto_grow: bool,
    pub heuristic: Heuristic,
    /// Order applied to the whole working set before each growth re-pack.
    pub grow_sort: SortOrder,
    pub growth: Growth,
}

impl Default for PackerConfig {
    fn default() -> Self {
        PackerConfig {
            size: [1, 1],
            max_size: [DEFAULT_MAX_SIZE, DEFAULT_MAX_SIZE],
            auto_grow: false,
            heuristic: Heuristic::default(),
            grow_sort: SortOrder::default(),
            growth: Growth::default(),
        }
    }
}

impl PackerConfig {
    pub fn new(size: [u32; 2], max_size: [u32; 2]) -> Self {
        PackerConfig { size, max_size, ..Default::default() }
    }

    pub fn with_size(self, size: [u32; 2]) -> Self {
        PackerConfig { size, ..self }
    }

    pub fn with_max_size(self, max_size: [u32; 2]) -> Self {
        PackerConfig { max_size, ..self }
    }

    pub fn with_auto_grow(self, auto_grow: bool) -> Self {
        PackerConfig { auto_grow, ..self }
    }

    pub fn with_heuristic(self, heuristic: Heuristic) -> Self {
        PackerConfig { heuristic, ..self }
    }

    pub fn with_grow_sort(self, grow_sort: SortOrder) -> Self {
        PackerConfig { grow_sort, ..self }
    }

    pub fn with_growth(self, growth: Growth) -> Self {
        PackerConfig { growth, ..self }
    }
}
