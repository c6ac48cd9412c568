use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, Result};

/// Largest accepted image side, in pixels.
const MAX_SIDE_PX: f64 = 20_000.0;

/// Physical figure size and resolution, fixed once per render.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_in: 20.0,
            height_in: 14.0,
            dpi: 300,
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(RenderError::InvalidConfig("dpi must be positive".into()));
        }
        for (name, inches) in [("width_in", self.width_in), ("height_in", self.height_in)] {
            if !(inches > 0.0) || !inches.is_finite() {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} must be positive, got {inches}"
                )));
            }
            let px = inches * f64::from(self.dpi);
            if px > MAX_SIDE_PX {
                return Err(RenderError::InvalidConfig(format!(
                    "{name} × dpi = {px:.0} px exceeds {MAX_SIDE_PX} px"
                )));
            }
        }
        Ok(())
    }

    /// (width, height) in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round().max(1.0) as u32,
            (self.height_in * dpi).round().max(1.0) as u32,
        )
    }

    /// Convert a size in typographic points to pixels at this resolution.
    pub fn points_to_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }
}

/// Only PNG output is supported.
pub fn check_output_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(()),
        _ => Err(RenderError::UnsupportedFormat(path.to_path_buf())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pixel_size() {
        let c = ChartConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.pixel_size(), (6000, 4200));
    }

    #[test]
    fn test_points_scale_with_dpi() {
        let c = ChartConfig {
            dpi: 144,
            ..ChartConfig::default()
        };
        assert_eq!(c.points_to_px(12.0), 24.0);
    }

    #[test]
    fn test_invalid_configs() {
        let zero_dpi = ChartConfig {
            dpi: 0,
            ..ChartConfig::default()
        };
        assert!(zero_dpi.validate().is_err());

        let negative = ChartConfig {
            width_in: -1.0,
            ..ChartConfig::default()
        };
        assert!(negative.validate().is_err());

        let huge = ChartConfig {
            width_in: 200.0,
            ..ChartConfig::default()
        };
        assert!(matches!(huge.validate(), Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn test_output_extension() {
        assert!(check_output_path(Path::new("out.png")).is_ok());
        assert!(check_output_path(Path::new("dir/OUT.PNG")).is_ok());
        assert!(matches!(
            check_output_path(Path::new("out.svg")),
            Err(RenderError::UnsupportedFormat(_))
        ));
        assert!(check_output_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_partial_toml() {
        let c: ChartConfig = toml::from_str("dpi = 100").unwrap();
        assert_eq!(c.dpi, 100);
        assert_eq!(c.width_in, 20.0);
        assert!(toml::from_str::<ChartConfig>("colour = 1").is_err());
    }
}
