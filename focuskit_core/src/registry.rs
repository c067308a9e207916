use std::collections::HashSet;
use std::sync::LazyLock;

use crate::FocusTree;
use crate::config::ComponentsConfig;

/// Custom components that own their internal focus target.
///
/// `auro-menu` is intentionally absent: it uses a different interaction
/// model and is not focusable by default.
pub const DEFAULT_FOCUSABLE_COMPONENTS: [&str; 11] = [
	"auro-checkbox",
	"auro-radio",
	"auro-dropdown",
	"auro-button",
	"auro-combobox",
	"auro-input",
	"auro-counter",
	"auro-select",
	"auro-datepicker",
	"auro-hyperlink",
	"auro-accordion",
];

/// Tag names containing this marker are link components and are only
/// focusable when they carry an `href`.
const HYPERLINK_MARKER: &str = "hyperlink";

static GLOBAL_REGISTRY: LazyLock<ComponentRegistry> = LazyLock::new(ComponentRegistry::default);

/// The set of interactive custom-component tags whose internals are not
/// traversed during focusable discovery.
///
/// A registry is immutable once built. Elements match either by tag name
/// or by carrying an attribute named after a registered tag, so a wrapper
/// element can declare itself as a registered component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRegistry {
	tags: HashSet<String>,
}

impl Default for ComponentRegistry {
	fn default() -> Self {
		Self::new(DEFAULT_FOCUSABLE_COMPONENTS)
	}
}

impl ComponentRegistry {
	pub fn new<I, S>(tags: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self {
			tags: tags
				.into_iter()
				.map(|tag| tag.as_ref().trim().to_ascii_lowercase())
				.filter(|tag| !tag.is_empty())
				.collect(),
		}
	}

	/// The process-wide built-in registry.
	pub fn global() -> &'static Self {
		&GLOBAL_REGISTRY
	}

	/// Build the built-in registry extended with `config.focusable` and
	/// without `config.exclude`.
	pub fn from_config(config: &ComponentsConfig) -> Self {
		let excluded: HashSet<String> = config
			.exclude
			.iter()
			.map(|tag| tag.trim().to_ascii_lowercase())
			.collect();
		let tags = DEFAULT_FOCUSABLE_COMPONENTS
			.iter()
			.map(|tag| (*tag).to_string())
			.chain(config.focusable.iter().cloned())
			.filter(|tag| !excluded.contains(&tag.trim().to_ascii_lowercase()));

		Self::new(tags)
	}

	pub fn contains(&self, tag: &str) -> bool {
		self.tags.contains(&tag.to_ascii_lowercase())
	}

	pub fn len(&self) -> usize {
		self.tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tags.is_empty()
	}

	/// Registered tags in alphabetical order.
	pub fn tags(&self) -> Vec<&str> {
		let mut tags: Vec<&str> = self.tags.iter().map(String::as_str).collect();
		tags.sort_unstable();
		tags
	}

	/// Whether `tag` or any of `attributes` names a registered component.
	pub fn is_registered_interactive_component<'a>(
		&self,
		tag: &str,
		attributes: impl IntoIterator<Item = &'a str>,
	) -> bool {
		self.contains(tag) || attributes.into_iter().any(|name| self.contains(name))
	}

	/// Whether `node` is a registered component that can take focus right
	/// now: not `disabled`, and for link components, carrying an `href`.
	pub fn is_focusable_component<T: FocusTree>(&self, tree: &T, node: T::Node) -> bool {
		let Some(tag) = tree.tag_name(node) else {
			return false;
		};

		let matched = self.contains(tag) || self.tags.iter().any(|name| tree.has_attribute(node, name));
		if !matched {
			return false;
		}

		if tree.has_attribute(node, "disabled") {
			return false;
		}

		if tag.contains(HYPERLINK_MARKER) && !tree.has_attribute(node, "href") {
			return false;
		}

		true
	}
}
