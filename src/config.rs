use std::sync::OnceLock;

use crate::models::{ECLevel, MaskPattern, Version};
use crate::modes::{Mode, SegmentMode};

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static DEFAULT_EC_LEVEL: OnceLock<ECLevel> = OnceLock::new();

/// Level used when `EncodeOptions::level` is `None`
pub fn default_ec_level() -> ECLevel {
    *DEFAULT_EC_LEVEL.get_or_init(|| {
        std::env::var("QR_DEFAULT_EC_LEVEL")
            .ok()
            .and_then(|v| v.parse::<ECLevel>().ok())
            .unwrap_or(ECLevel::M)
    })
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

pub fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", true))
}

static QUIET_ZONE: OnceLock<usize> = OnceLock::new();

/// Quiet zone in modules used by the rendering helpers
pub fn quiet_zone() -> usize {
    *QUIET_ZONE.get_or_init(|| parse_env_usize("QR_QUIET_ZONE", crate::QUIET_ZONE).min(64))
}

static MODULE_PIXELS: OnceLock<usize> = OnceLock::new();

pub fn module_pixels() -> usize {
    *MODULE_PIXELS.get_or_init(|| parse_env_usize("QR_MODULE_PIXELS", 8).clamp(1, 64))
}

/// Knobs for one encode call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// `None` falls back to [`default_ec_level`]
    pub level: Option<ECLevel>,
    pub mode: SegmentMode,
    /// Force a mask instead of running the penalty search
    pub mask: Option<MaskPattern>,
    /// Smallest version the encoder may pick
    pub min_version: u8,
    /// Score mask candidates on the rayon pool
    pub parallel_masks: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            level: None,
            mode: SegmentMode::Auto,
            mask: None,
            min_version: Version::MIN.number(),
            parallel_masks: parallel_masks(),
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: ECLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_mode(mut self, mode: SegmentMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `SegmentMode::Single(mode)`
    pub fn single_mode(self, mode: Mode) -> Self {
        self.with_mode(SegmentMode::Single(mode))
    }

    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_min_version(mut self, version: u8) -> Self {
        self.min_version = version;
        self
    }

    pub fn with_parallel_masks(mut self, parallel: bool) -> Self {
        self.parallel_masks = parallel;
        self
    }

    pub fn effective_level(&self) -> ECLevel {
        self.level.unwrap_or_else(default_ec_level)
    }
}
