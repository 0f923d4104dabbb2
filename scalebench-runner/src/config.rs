//! Configuration loading from scale.toml
//!
//! ScaleBench configuration can be specified in a `scale.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.
//! Every value can still be overridden per invocation through [`ExecutionConfig`].
//!
//! [`ExecutionConfig`]: crate::ExecutionConfig

use scalebench_core::{DEFAULT_SAMPLES, DEFAULT_TRIALS, TierTable};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name searched for by [`ScaleConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "scale.toml";

/// ScaleBench configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScaleConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Size tier ranges
    #[serde(default)]
    pub tiers: TierTable,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Trials averaged per sampled size
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Maximum sizes sampled per task
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Untimed trials run before the measured ones at each size
    #[serde(default)]
    pub warmup_trials: usize,
    /// Core to pin the measuring thread to
    #[serde(default)]
    pub pin_cpu: Option<usize>,
    /// Show a progress bar while running
    #[serde(default = "default_progress")]
    pub progress: bool,
    /// Only run tasks whose name matches this regex
    #[serde(default)]
    pub filter: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            samples: default_samples(),
            warmup_trials: 0,
            pin_cpu: None,
            progress: default_progress(),
            filter: None,
        }
    }
}

fn default_trials() -> usize {
    DEFAULT_TRIALS
}
fn default_samples() -> usize {
    DEFAULT_SAMPLES
}
fn default_progress() -> bool {
    true
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output directory for reports
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Report file name inside `directory`
    #[serde(default = "default_report_file")]
    pub report_file: String,
    /// Write the JSON report after each run
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            report_file: default_report_file(),
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "target/scalebench".to_string()
}
fn default_report_file() -> String {
    "report.json".to_string()
}

impl OutputConfig {
    /// Full path of the JSON report
    pub fn report_path(&self) -> PathBuf {
        Path::new(&self.directory).join(&self.report_file)
    }
}

impl ScaleConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "ignoring unreadable config"
                        );
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# ScaleBench Configuration

[runner]
# Trials averaged at every sampled size
trials = 20
# Maximum number of sizes sampled per task
samples = 1000
# Untimed trials before measuring each size
warmup_trials = 0
# Pin the measuring thread to a core (uncomment to enable)
# pin_cpu = 0
# Show a progress bar
progress = true
# Only run tasks matching this regex (uncomment to enable)
# filter = "^Sequence::"

[tiers]
# Size ranges as [lower, upper]
small = [512, 16384]
medium = [32768, 1048576]
large = [524288, 16777216]

[output]
# Output directory for reports
directory = "target/scalebench"
# Report file name
report_file = "report.json"
# Write a JSON report after each run
save_json = false
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scalebench_core::{SizeRange, SizeTier};

    #[test]
    fn test_default_config() {
        let config = ScaleConfig::default();
        assert_eq!(config.runner.trials, 20);
        assert_eq!(config.runner.samples, 1000);
        assert_eq!(config.runner.warmup_trials, 0);
        assert!(config.runner.progress);
        assert!(!config.output.save_json);
        assert_eq!(config.tiers, TierTable::default());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            trials = 5
            filter = "^Map::"

            [tiers]
            small = [1, 64]
        "#;

        let config: ScaleConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.trials, 5);
        assert_eq!(config.runner.filter.as_deref(), Some("^Map::"));
        assert_eq!(config.tiers.range(SizeTier::Small), SizeRange::new(1, 64).unwrap());
        // Defaults should still apply
        assert_eq!(config.runner.samples, 1000);
        assert_eq!(config.tiers.range(SizeTier::Large).upper(), 1 << 24);
        assert_eq!(config.output.directory, "target/scalebench");
    }

    #[test]
    fn test_inverted_tier_rejected() {
        let toml_str = r#"
            [tiers]
            medium = [4096, 16]
        "#;
        assert!(toml::from_str::<ScaleConfig>(toml_str).is_err());
    }

    #[test]
    fn test_default_toml_parses() {
        let config: ScaleConfig = toml::from_str(&ScaleConfig::default_toml()).unwrap();
        assert_eq!(config, ScaleConfig::default());
    }

    #[test]
    fn test_report_path() {
        let output = OutputConfig {
            directory: "out".to_string(),
            report_file: "run.json".to_string(),
            save_json: true,
        };
        assert_eq!(output.report_path(), Path::new("out").join("run.json"));
    }
}
