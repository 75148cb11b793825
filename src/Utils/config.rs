//! Engine configuration loaded from TOML.
//!
//! Every table and key is optional, a missing file section falls back to the defaults:
//!
//! ```toml
//! [calculus]
//! variable = "x"
//! integration_intervals = 1000
//! limit_precision = 1e-10
//!
//! [graphing]
//! x_min = -10.0
//! x_max = 10.0
//! sample_points = 500
//!
//! [input]
//! angle_mode = "deg"
//!
//! [logging]
//! level = "info"
//! console = true
//! to_file = false
//! # file = "calc.log"
//! ```

use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;
use strum_macros::{Display, EnumString};

use crate::errors::{MathError, MathResult};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub calculus: CalculusConfig,
    pub graphing: GraphingConfig,
    pub input: InputConfig,
    pub logging: LoggingConfig,
}

/// Calculus engine parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalculusConfig {
    /// differentiation and integration variable
    pub variable: String,
    /// Simpson interval count, odd values are bumped to the next even number
    pub integration_intervals: usize,
    /// one-sided limit estimates closer than `limit_precision * 1000` are averaged
    pub limit_precision: f64,
}

/// Sampling window of the grapher.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphingConfig {
    pub x_min: f64,
    pub x_max: f64,
    pub sample_points: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub angle_mode: AngleMode,
}

/// Unit of trigonometric arguments typed by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Rad,
    Deg,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// off, error, warn, info, debug or trace
    pub level: String,
    pub console: bool,
    pub to_file: bool,
    /// log file name, a time-stamped name is generated when absent
    pub file: Option<String>,
}

// --- Defaults ---

impl Default for CalculusConfig {
    fn default() -> Self {
        Self {
            variable: "x".into(),
            integration_intervals: 1000,
            limit_precision: 1e-10,
        }
    }
}

impl Default for GraphingConfig {
    fn default() -> Self {
        Self {
            x_min: -10.0,
            x_max: 10.0,
            sample_points: 500,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            console: true,
            to_file: false,
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> MathResult<LevelFilter> {
        LevelFilter::from_str(&self.level)
            .map_err(|_| MathError::Config(format!("unknown log level {}", self.level)))
    }
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> MathResult<EngineConfig> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| MathError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config from disk. A missing file yields the defaults.
    pub fn load(path: &Path) -> MathResult<EngineConfig> {
        if !path.exists() {
            return Ok(EngineConfig::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| MathError::Config(format!("reading {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> MathResult<()> {
        self.logging.level_filter()?;
        if self.calculus.variable.is_empty() {
            return Err(MathError::Config("calculus.variable must not be empty".into()));
        }
        if self.calculus.integration_intervals == 0 {
            return Err(MathError::Config(
                "calculus.integration_intervals must be positive".into(),
            ));
        }
        if self.calculus.limit_precision.is_nan() || self.calculus.limit_precision <= 0.0 {
            return Err(MathError::Config("calculus.limit_precision must be positive".into()));
        }
        if !self.graphing.x_min.is_finite() || !self.graphing.x_max.is_finite() {
            return Err(MathError::Config("graphing bounds must be finite".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_from_empty_document() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.calculus.variable, "x");
        assert_eq!(config.calculus.integration_intervals, 1000);
        assert_eq!(config.graphing.sample_points, 500);
        assert_eq!(config.input.angle_mode, AngleMode::Rad);
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_partial_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            [calculus]
            integration_intervals = 2000

            [input]
            angle_mode = "deg"

            [logging]
            level = "debug"
            console = false
            "#,
        )
        .unwrap();
        assert_eq!(config.calculus.integration_intervals, 2000);
        assert_eq!(config.calculus.limit_precision, 1e-10);
        assert_eq!(config.input.angle_mode, AngleMode::Deg);
        assert_eq!(config.logging.level_filter().unwrap(), LevelFilter::Debug);
        assert!(!config.logging.console);
        assert_eq!(config.graphing, GraphingConfig::default());
    }

    #[test]
    fn test_invalid_documents() {
        let err = EngineConfig::from_toml_str("[logging]\nlevel = \"loud\"").unwrap_err();
        assert_eq!(err, MathError::Config("unknown log level loud".to_string()));
        assert!(EngineConfig::from_toml_str("[input]\nangle_mode = \"grad\"").is_err());
        assert!(EngineConfig::from_toml_str("[calculus]\nintegration_intervals = 0").is_err());
        assert!(EngineConfig::from_toml_str("not toml at all = = =").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[graphing]\nx_min = -1.0\nx_max = 1.0").unwrap();
        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.graphing.x_min, -1.0);
        assert_eq!(config.graphing.x_max, 1.0);

        let missing = EngineConfig::load(Path::new("/definitely/not/here.toml")).unwrap();
        assert_eq!(missing, EngineConfig::default());
    }
}
