use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::FocusError;
use crate::FocusResult;
use crate::focus_trap::DEFAULT_MARKER_ATTRIBUTE;
use crate::focus_trap::FocusTrapOptions;
use crate::registry::ComponentRegistry;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"focuskit.toml",
	".focuskit.toml",
	".config/focuskit.toml",
];

/// Configuration loaded from a `focuskit.toml` file.
///
/// ```toml
/// [components]
/// focusable = ["my-toggle"]
/// exclude = ["auro-accordion"]
///
/// [trap]
/// control_tab_order = false
/// marker_attribute = "data-focus-trap-container"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct FocuskitConfig {
	/// Adjustments to the built-in component registry.
	#[serde(default)]
	pub components: ComponentsConfig,
	/// Defaults for newly attached focus traps.
	#[serde(default)]
	pub trap: TrapConfig,
}

/// The `[components]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentsConfig {
	/// Extra tags to register as focusable components.
	#[serde(default)]
	pub focusable: Vec<String>,
	/// Built-in tags to drop from the registry.
	#[serde(default)]
	pub exclude: Vec<String>,
}

/// The `[trap]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TrapConfig {
	/// Intercept every Tab press instead of only the ones at a boundary.
	#[serde(default)]
	pub control_tab_order: bool,
	/// Attribute written on trap containers while the trap is attached.
	#[serde(default = "default_marker_attribute")]
	pub marker_attribute: String,
}

impl Default for TrapConfig {
	fn default() -> Self {
		Self {
			control_tab_order: false,
			marker_attribute: default_marker_attribute(),
		}
	}
}

fn default_marker_attribute() -> String {
	DEFAULT_MARKER_ATTRIBUTE.to_string()
}

impl FocuskitConfig {
	/// Find the config file for `root`, if any.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the first config file found under `root`. Returns `Ok(None)` when
	/// no candidate exists.
	pub fn load(root: &Path) -> FocusResult<Option<Self>> {
		let Some(path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %path.display(), "loading focuskit config");
		let content = std::fs::read_to_string(&path)?;
		Self::parse(&content).map(Some)
	}

	pub fn parse(content: &str) -> FocusResult<Self> {
		toml::from_str(content).map_err(|e| FocusError::ConfigParse(e.to_string()))
	}

	pub fn registry(&self) -> ComponentRegistry {
		ComponentRegistry::from_config(&self.components)
	}

	pub fn trap_options(&self) -> FocusTrapOptions {
		FocusTrapOptions {
			control_tab_order: self.trap.control_tab_order,
			marker_attribute: self.trap.marker_attribute.clone(),
			registry: self.registry(),
		}
	}
}
