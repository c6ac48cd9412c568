use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nmax_chart::ChartConfig;
use nmax_core::AnalysisParams;
use serde::Deserialize;

pub const DEFAULT_OUTPUT: &str = "pi_limit_42_proof.png";

/// Settings file layout. Every key is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub output: PathBuf,
    pub analysis: AnalysisParams,
    pub chart: ChartConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            analysis: AnalysisParams::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl Settings {
    /// Built-in defaults, or the TOML file at `path` layered over them.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let settings: Settings = toml::from_str(&text)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nmax_core::ScanRange;

    #[test]
    fn test_defaults_without_file() {
        let s = Settings::load(None).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.output, PathBuf::from("pi_limit_42_proof.png"));
        assert_eq!(s.chart.dpi, 300);
    }

    #[test]
    fn test_nested_tables() {
        let s: Settings = toml::from_str(
            r#"
            output = "out/chart.png"

            [analysis]
            epsilon = 1e-6

            [analysis.scan]
            end = 40

            [analysis.spiral]
            lambda = 0.5

            [chart]
            dpi = 100
            "#,
        )
        .unwrap();
        assert_eq!(s.output, PathBuf::from("out/chart.png"));
        assert_eq!(s.analysis.epsilon, 1e-6);
        assert_eq!(s.analysis.scan, ScanRange { start: 1, end: 40 });
        assert_eq!(s.analysis.spiral.lambda, 0.5);
        assert_eq!(s.analysis.spiral.r0, 1.0);
        assert_eq!(s.analysis.target_segments, 42.0);
        assert_eq!(s.chart.dpi, 100);
        assert_eq!(s.chart.width_in, 20.0);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(toml::from_str::<Settings>("outptu = \"x.png\"").is_err());
        assert!(toml::from_str::<Settings>("[analysis]\neps = 1.0").is_err());
        assert!(toml::from_str::<Settings>("[analysis.scan]\nstop = 3").is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = Settings::load(Some(Path::new("/nonexistent/nmax.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read config"));
    }
}
