use crate::{
    error::SceneError,
    geometry::{Bounds, ProbeReach},
    intensity::IntensityConfig,
};
use probescope_common::Real;
use serde::{Deserialize, Serialize};

/// The single configuration record read by every recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default = "Settings::default_num_slices")]
    pub num_slices: usize,
    #[serde(default = "Settings::default_collector_height")]
    pub collector_height: Real,
    #[serde(default = "Settings::default_probe_count")]
    pub probe_count: usize,
    #[serde(default)]
    pub bounds: Bounds,
    #[serde(default = "Settings::default_amplification")]
    pub amplification: Real,
    #[serde(default = "Settings::default_max_bar_width")]
    pub max_bar_width: Real,
    #[serde(default = "Settings::default_color_band_range")]
    pub color_band_range: Real,
    #[serde(default)]
    pub reach: ProbeReach,
}

impl Settings {
    fn default_num_slices() -> usize {
        20
    }
    fn default_collector_height() -> Real {
        200.0
    }
    fn default_probe_count() -> usize {
        360
    }
    fn default_amplification() -> Real {
        10.0
    }
    fn default_max_bar_width() -> Real {
        100.0
    }
    fn default_color_band_range() -> Real {
        1.0
    }

    pub(crate) fn check_num_slices(num_slices: usize) -> Result<(), SceneError> {
        if num_slices == 0 {
            Err(SceneError::InvalidSliceCount)
        } else {
            Ok(())
        }
    }

    pub(crate) fn check_collector_height(height: Real) -> Result<(), SceneError> {
        if height.is_finite() && height > 0.0 {
            Ok(())
        } else {
            Err(SceneError::InvalidCollectorHeight(height))
        }
    }

    pub(crate) fn check_bounds(bounds: Bounds) -> Result<(), SceneError> {
        if bounds.has_area() {
            Ok(())
        } else {
            Err(SceneError::InvalidBounds {
                width: bounds.width,
                height: bounds.height,
            })
        }
    }

    pub(crate) fn check_presentation(config: &IntensityConfig) -> Result<(), SceneError> {
        for (name, value) in [
            ("amplification", config.amplification),
            ("max-bar-width", config.max_bar_width),
            ("color-band-range", config.color_band_range),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SceneError::InvalidPresentation { name, value });
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        Self::check_num_slices(self.num_slices)?;
        Self::check_collector_height(self.collector_height)?;
        Self::check_bounds(self.bounds)?;
        Self::check_presentation(&self.intensity_config())
    }

    pub fn intensity_config(&self) -> IntensityConfig {
        IntensityConfig {
            amplification: self.amplification,
            max_bar_width: self.max_bar_width,
            color_band_range: self.color_band_range,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            num_slices: Self::default_num_slices(),
            collector_height: Self::default_collector_height(),
            probe_count: Self::default_probe_count(),
            bounds: Bounds::default(),
            amplification: Self::default_amplification(),
            max_bar_width: Self::default_max_bar_width(),
            color_band_range: Self::default_color_band_range(),
            reach: ProbeReach::default(),
        }
    }
}
