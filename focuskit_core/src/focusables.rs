use std::fmt::Display;

use derive_more::Deref;
use indexmap::IndexSet;

use crate::FocusTree;
use crate::registry::ComponentRegistry;

/// The standard focusability checks, tried in order against every element
/// that is not a registered component. The first match wins.
pub const FOCUSABLE_SELECTORS: [FocusableSelector; 10] = [
	FocusableSelector::AnchorWithHref,
	FocusableSelector::Enabled("button"),
	FocusableSelector::Enabled("textarea"),
	FocusableSelector::Enabled("input"),
	FocusableSelector::Enabled("select"),
	FocusableSelector::Role("tab"),
	FocusableSelector::Role("link"),
	FocusableSelector::Role("button"),
	FocusableSelector::TabIndex,
	FocusableSelector::ContentEditable,
];

/// A single focusability rule, the typed equivalent of a CSS selector such
/// as `button:not([disabled])`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusableSelector {
	/// `a[href]`
	AnchorWithHref,
	/// `<tag>:not([disabled])`
	Enabled(&'static str),
	/// `[role="<role>"]:not([disabled])`
	Role(&'static str),
	/// An explicit tab index of zero or more.
	TabIndex,
	/// `[contenteditable]:not([contenteditable="false"])`
	ContentEditable,
}

impl FocusableSelector {
	pub fn matches<T: FocusTree>(self, tree: &T, node: T::Node) -> bool {
		let Some(tag) = tree.tag_name(node) else {
			return false;
		};

		match self {
			Self::AnchorWithHref => tag == "a" && tree.has_attribute(node, "href"),
			Self::Enabled(name) => tag == name && !tree.has_attribute(node, "disabled"),
			Self::Role(role) => {
				tree.attribute(node, "role") == Some(role) && !tree.has_attribute(node, "disabled")
			}
			Self::TabIndex => tab_index(tree, node).is_some_and(|value| value >= 0),
			Self::ContentEditable => {
				tree.attribute(node, "contenteditable")
					.is_some_and(|value| !value.eq_ignore_ascii_case("false"))
			}
		}
	}
}

impl Display for FocusableSelector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::AnchorWithHref => write!(f, "a[href]"),
			Self::Enabled(tag) => write!(f, "{tag}:not([disabled])"),
			Self::Role(role) => write!(f, "[role=\"{role}\"]:not([disabled])"),
			Self::TabIndex => write!(f, "[tabindex]:not([tabindex^=\"-\"])"),
			Self::ContentEditable => write!(f, "[contenteditable]:not([contenteditable=\"false\"])"),
		}
	}
}

/// The numeric `tabindex` of an element, or `None` when the attribute is
/// missing or does not start with an integer.
///
/// Leading whitespace is skipped and the longest signed digit run is read,
/// so `"3abc"` is `3` and `"abc"` is `None`.
pub fn tab_index<T: FocusTree>(tree: &T, node: T::Node) -> Option<i32> {
	parse_leading_integer(tree.attribute(node, "tabindex")?)
}

fn parse_leading_integer(raw: &str) -> Option<i32> {
	let trimmed = raw.trim_start();
	let digits_start = usize::from(trimmed.starts_with(['-', '+']));
	let digits_len = trimmed[digits_start..]
		.bytes()
		.take_while(u8::is_ascii_digit)
		.count();

	if digits_len == 0 {
		return None;
	}

	trimmed[..digits_start + digits_len].parse().ok()
}

/// An ordered, duplicate-free list of focusable elements.
///
/// Elements with a positive tab index come first, ascending by that index;
/// elements with no tab index or a tab index of zero follow in traversal
/// order. Negative tab indexes are left out.
#[derive(Debug, Clone, PartialEq, Eq, Deref)]
pub struct FocusOrder<N>(Vec<N>);

impl<N: Copy + PartialEq> FocusOrder<N> {
	/// Index of the first element that appears in `candidates`.
	pub fn position_of_any(&self, candidates: &[N]) -> Option<usize> {
		self.0.iter().position(|node| candidates.contains(node))
	}

	pub fn last_index(&self) -> Option<usize> {
		self.0.len().checked_sub(1)
	}

	pub fn into_vec(self) -> Vec<N> {
		self.0
	}
}

impl<N> IntoIterator for FocusOrder<N> {
	type IntoIter = std::vec::IntoIter<N>;
	type Item = N;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

/// Whether `node` is a registered, enabled custom component, using the
/// built-in registry.
pub fn is_focusable_component<T: FocusTree>(tree: &T, node: T::Node) -> bool {
	ComponentRegistry::global().is_focusable_component(tree, node)
}

/// Collect every focusable element beneath (and including) `container`,
/// using the built-in component registry.
pub fn get_focusable_elements<T: FocusTree>(tree: &T, container: T::Node) -> FocusOrder<T::Node> {
	get_focusable_elements_with(tree, container, ComponentRegistry::global())
}

/// Collect every focusable element beneath (and including) `container`.
///
/// The walk is a pre-order depth-first traversal that visits, for each
/// element, its shadow children and then either its slot assignment (for a
/// `<slot>`) or its light children. Registered components are recorded
/// without descending into them. A node reached through several paths is
/// only kept at its first position.
pub fn get_focusable_elements_with<T: FocusTree>(
	tree: &T,
	container: T::Node,
	registry: &ComponentRegistry,
) -> FocusOrder<T::Node> {
	let mut found: Vec<T::Node> = Vec::new();
	let mut stack = vec![container];

	while let Some(node) = stack.pop() {
		if !tree.is_element(node) {
			continue;
		}

		if registry.is_focusable_component(tree, node) {
			found.push(node);
			continue;
		}

		if FOCUSABLE_SELECTORS
			.iter()
			.any(|selector| selector.matches(tree, node))
		{
			found.push(node);
		}

		let mut next = tree.shadow_children(node).unwrap_or_default();
		if tree.tag_name(node) == Some("slot") {
			next.extend(tree.assigned_nodes(node));
		} else {
			next.extend(tree.children(node));
		}

		stack.extend(next.into_iter().rev());
	}

	let unique: IndexSet<T::Node> = found.into_iter().collect();
	let (mut indexed, rest): (Vec<T::Node>, Vec<T::Node>) = unique
		.into_iter()
		.partition(|node| tab_index(tree, *node).is_some_and(|value| value > 0));

	indexed.sort_by_key(|node| tab_index(tree, *node).unwrap_or_default());
	// Negative tab indexes are unreachable with Tab and never part of the order.
	indexed.extend(
		rest.into_iter()
			.filter(|node| tab_index(tree, *node).is_none_or(|value| value == 0)),
	);

	tracing::trace!(count = indexed.len(), "collected focusable elements");
	FocusOrder(indexed)
}
