use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::BinaryDetector;
use crate::DEFAULT_MAX_DEPTH;
use crate::HydrateError;
use crate::HydrateOptions;
use crate::HydrateResult;
use crate::binary::DEFAULT_MAX_CONTROL_RATIO;
use crate::binary::DEFAULT_SAMPLE_SIZE;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["hydrate.toml", ".hydrate.toml", ".config/hydrate.toml"];

/// Configuration loaded from a `hydrate.toml` file.
///
/// ```toml
/// max_depth = 10
///
/// [binary]
/// sample_size = 8192
/// max_control_ratio = 0.3
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HydrateConfig {
	/// Deepest allowed embed. Defaults to 10.
	#[serde(default = "default_max_depth")]
	pub max_depth: usize,
	/// Binary detection thresholds.
	#[serde(default)]
	pub binary: BinaryConfig,
}

/// The `[binary]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BinaryConfig {
	/// Number of leading bytes inspected.
	#[serde(default = "default_sample_size")]
	pub sample_size: usize,
	/// Share of control bytes above which a file counts as binary.
	#[serde(default = "default_max_control_ratio")]
	pub max_control_ratio: f64,
}

impl Default for HydrateConfig {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			binary: BinaryConfig::default(),
		}
	}
}

impl Default for BinaryConfig {
	fn default() -> Self {
		Self {
			sample_size: DEFAULT_SAMPLE_SIZE,
			max_control_ratio: DEFAULT_MAX_CONTROL_RATIO,
		}
	}
}

fn default_max_depth() -> usize {
	DEFAULT_MAX_DEPTH
}

fn default_sample_size() -> usize {
	DEFAULT_SAMPLE_SIZE
}

fn default_max_control_ratio() -> f64 {
	DEFAULT_MAX_CONTROL_RATIO
}

impl HydrateConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> HydrateResult<Option<HydrateConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit file.
	pub fn load_file(path: &Path) -> HydrateResult<HydrateConfig> {
		let content = std::fs::read_to_string(path)?;
		Self::parse(&content)
	}

	pub fn parse(content: &str) -> HydrateResult<HydrateConfig> {
		let config: HydrateConfig =
			toml::from_str(content).map_err(|e| HydrateError::ConfigParse(e.to_string()))?;

		if config.binary.sample_size == 0 {
			return Err(HydrateError::ConfigParse(
				"`binary.sample_size` must be at least 1".to_string(),
			));
		}

		if !(0.0..=1.0).contains(&config.binary.max_control_ratio) {
			return Err(HydrateError::ConfigParse(format!(
				"`binary.max_control_ratio` must be between 0 and 1, got {}",
				config.binary.max_control_ratio
			)));
		}

		Ok(config)
	}

	/// The engine options described by this config.
	pub fn options(&self) -> HydrateOptions {
		HydrateOptions {
			max_depth: self.max_depth,
			detector: BinaryDetector::new(self.binary.sample_size, self.binary.max_control_ratio),
		}
	}
}
