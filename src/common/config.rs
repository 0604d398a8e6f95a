use std::time::Duration;

use serde::{de::Error as _, Deserialize, Serialize};

use super::{error::QRResult, matrix::ECLevel};

/// Largest canvas side, in pixels, a render may allocate.
pub const MAX_CANVAS: u32 = 8192;
/// Width of a version 40 symbol.
const MAX_MODULES: usize = 177;

// Canvas profile
//------------------------------------------------------------------------------

/// How the canvas is sized for a matrix of `w` modules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "profile", rename_all = "kebab-case")]
pub enum CanvasProfile {
    /// Fixed canvas side in pixels; modules are scaled to fit inside the margin.
    Fixed { size: u32, margin: u32 },
    /// Fixed module side in pixels; the margin is `quiet_zone` modules wide.
    PerModule { module_size: u32, quiet_zone: u32 },
}

impl CanvasProfile {
    /// Stored/shareable images.
    pub const STORED: Self = Self::Fixed { size: 512, margin: 40 };
    /// Live preview images.
    pub const PREVIEW: Self = Self::PerModule { module_size: 20, quiet_zone: 4 };

    /// Canvas side for a `w` module matrix, `None` when it overflows `u32`.
    pub fn canvas_size(&self, w: usize) -> Option<u32> {
        match *self {
            Self::Fixed { size, .. } => Some(size),
            Self::PerModule { module_size, quiet_zone } => {
                let w = u32::try_from(w.max(1)).ok()?;
                w.checked_add(quiet_zone.checked_mul(2)?)?.checked_mul(module_size)
            }
        }
    }

    /// Checks that every symbol version fits a canvas of at most [`MAX_CANVAS`].
    pub fn validate(&self) -> Result<(), String> {
        match self.canvas_size(MAX_MODULES) {
            Some(size) if (1..=MAX_CANVAS).contains(&size) => Ok(()),
            Some(size) => Err(format!("canvas of {size}px is outside 1..={MAX_CANVAS}px")),
            None => Err(format!("canvas size overflows, must stay within {MAX_CANVAS}px")),
        }
    }

    /// Layout for a `w` module matrix. The canvas side is capped at [`MAX_CANVAS`].
    pub fn geometry(&self, w: usize) -> Geometry {
        let n = w.max(1) as f32;
        let canvas = self.canvas_size(w).unwrap_or(u32::MAX);
        if canvas > MAX_CANVAS {
            log::warn!("Canvas of {canvas}px for {w} modules exceeds {MAX_CANVAS}px, clipping");
        }
        let canvas = canvas.min(MAX_CANVAS);
        match *self {
            Self::Fixed { margin, .. } => {
                let drawing = canvas.saturating_sub(margin.saturating_mul(2)) as f32;
                Geometry { canvas, margin: margin as f32, cell: drawing / n }
            }
            Self::PerModule { module_size, quiet_zone } => {
                let margin = quiet_zone as f32 * module_size as f32;
                Geometry { canvas, margin, cell: module_size as f32 }
            }
        }
    }
}

impl Default for CanvasProfile {
    fn default() -> Self {
        Self::STORED
    }
}

/// Pixel layout shared by every drawing stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Canvas side in pixels.
    pub canvas: u32,
    pub margin: f32,
    /// Module side in pixels.
    pub cell: f32,
}

impl Geometry {
    /// Pixel origin of module (r, c).
    pub fn module_origin(&self, r: usize, c: usize) -> (f32, f32) {
        (self.margin + c as f32 * self.cell, self.margin + r as f32 * self.cell)
    }
}

// Render config
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub profile: CanvasProfile,
    pub ec_level: ECLevel,
    pub logo_timeout_ms: u64,
    /// Largest encoded logo, in bytes, that is read.
    pub logo_max_bytes: usize,
    /// Whether logos may be read from `file://` URLs and filesystem paths.
    pub local_logos: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            profile: CanvasProfile::STORED,
            ec_level: ECLevel::H,
            logo_timeout_ms: 5000,
            logo_max_bytes: 8 << 20,
            local_logos: false,
        }
    }
}

impl RenderConfig {
    pub fn preview() -> Self {
        Self { profile: CanvasProfile::PREVIEW, ..Self::default() }
    }

    /// Parses and validates an operator supplied config.
    pub fn from_json(json: &str) -> QRResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.profile.validate().map_err(serde_json::Error::custom)?;
        Ok(config)
    }

    pub fn profile(mut self, profile: CanvasProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn ec_level(mut self, ec_level: ECLevel) -> Self {
        self.ec_level = ec_level;
        self
    }

    pub fn logo_timeout(mut self, timeout: Duration) -> Self {
        self.logo_timeout_ms = timeout.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    pub fn logo_max_bytes(mut self, max_bytes: usize) -> Self {
        self.logo_max_bytes = max_bytes;
        self
    }

    pub fn local_logos(mut self, enabled: bool) -> Self {
        self.local_logos = enabled;
        self
    }

    pub fn logo_timeout_duration(&self) -> Duration {
        Duration::from_millis(self.logo_timeout_ms)
    }
}
