// Configuration for a particle field. Every option has a default matching the
// portfolio page background, so a partial JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

// What happens to existing particle positions when the surface is resized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
    // Leave positions alone; out-of-bounds particles wrap back in on their next step.
    Keep,
    // Clamp positions into the new bounds immediately.
    Clamp,
    // Scale positions proportionally to the new dimensions.
    Rescale,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        ResizePolicy::Keep
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub count: usize,
    pub width: f64,
    pub height: f64,
    pub connection_distance: f64,
    pub speed_range: [f64; 2],
    pub size_range: [f64; 2],
    pub opacity_range: [f64; 2],
    pub link_opacity: f64,
    pub line_width: f64,
    pub color: u32,
    pub resize_policy: ResizePolicy,
    pub seed: Option<u64>,
    pub profile_frames: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            count: FieldConfig::DEFAULT_COUNT,
            width: 0.0,
            height: 0.0,
            connection_distance: 100.0,
            speed_range: [-0.25, 0.25],
            size_range: [1.0, 3.0],
            opacity_range: [0.2, 0.7],
            link_opacity: 0.1,
            line_width: 1.0,
            color: 0x4facfeff,
            resize_policy: ResizePolicy::Keep,
            seed: None,
            profile_frames: false,
        }
    }
}

impl FieldConfig {
    pub const DEFAULT_COUNT: usize = 80;
    // Links are found by a pairwise scan, so counts far past this stall every frame
    pub const MAX_COUNT: usize = 10_000;

    pub fn from_json(json: &str) -> Result<FieldConfig, FieldError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.count > FieldConfig::MAX_COUNT {
            return Err(invalid(format!(
                "count must be at most {}, got {}",
                FieldConfig::MAX_COUNT,
                self.count
            )));
        }
        check_extent("width", self.width)?;
        check_extent("height", self.height)?;
        if !self.connection_distance.is_finite() || self.connection_distance <= 0.0 {
            return Err(invalid(format!(
                "connection_distance must be positive, got {}",
                self.connection_distance
            )));
        }
        check_range("speed_range", self.speed_range)?;
        check_range("size_range", self.size_range)?;
        check_range("opacity_range", self.opacity_range)?;
        if self.size_range[0] < 0.0 {
            return Err(invalid(format!(
                "size_range must not be negative, got {:?}",
                self.size_range
            )));
        }
        if self.opacity_range[0] < 0.0 || self.opacity_range[1] > 1.0 {
            return Err(invalid(format!(
                "opacity_range must lie within [0, 1], got {:?}",
                self.opacity_range
            )));
        }
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(invalid(format!(
                "link_opacity must lie within [0, 1], got {}",
                self.link_opacity
            )));
        }
        if !self.line_width.is_finite() || self.line_width < 0.0 {
            return Err(invalid(format!(
                "line_width must not be negative, got {}",
                self.line_width
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> FieldError {
    FieldError::InvalidConfig(msg)
}

fn check_extent(name: &str, value: f64) -> Result<(), FieldError> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!("{} must be a non-negative number, got {}", name, value)));
    }
    Ok(())
}

fn check_range(name: &str, range: [f64; 2]) -> Result<(), FieldError> {
    let [lo, hi] = range;
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(invalid(format!("{} must be an ordered [min, max] pair, got {:?}", name, range)));
    }
    Ok(())
}
