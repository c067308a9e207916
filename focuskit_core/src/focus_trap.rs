use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

use crate::FocusError;
use crate::FocusResult;
use crate::FocusTree;
use crate::KeyboardEvent;
use crate::focusables::FocusOrder;
use crate::focusables::get_focusable_elements_with;
use crate::registry::ComponentRegistry;

/// Attribute written on a container while a trap is attached to it.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-focus-trap-container";

/// Which way the last Tab press moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TabDirection {
	#[default]
	Forward,
	Backward,
}

impl Display for TabDirection {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Forward => write!(f, "forward"),
			Self::Backward => write!(f, "backward"),
		}
	}
}

/// Settings fixed when a trap is created.
#[derive(Debug, Clone)]
pub struct FocusTrapOptions {
	/// Take over every Tab press, not only the ones at the first or last
	/// element.
	pub control_tab_order: bool,
	pub marker_attribute: String,
	pub registry: ComponentRegistry,
}

impl Default for FocusTrapOptions {
	fn default() -> Self {
		Self {
			control_tab_order: false,
			marker_attribute: DEFAULT_MARKER_ATTRIBUTE.to_string(),
			registry: ComponentRegistry::global().clone(),
		}
	}
}

impl FocusTrapOptions {
	#[must_use]
	pub fn with_control_tab_order(mut self, control_tab_order: bool) -> Self {
		self.control_tab_order = control_tab_order;
		self
	}

	#[must_use]
	pub fn with_registry(mut self, registry: ComponentRegistry) -> Self {
		self.registry = registry;
		self
	}
}

/// What a trap did with a keydown event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome<N> {
	/// Not a Tab press, or the trap is disconnected.
	Ignored,
	/// The container has nothing focusable; the key was left alone.
	NoFocusables,
	/// The trap let the browser move focus natively.
	Native,
	/// The trap prevented the default action and focused `target`.
	Moved { index: usize, target: N },
}

impl<N> TabOutcome<N> {
	pub fn is_moved(&self) -> bool {
		matches!(self, Self::Moved { .. })
	}
}

/// Confines Tab and Shift+Tab navigation to a container.
///
/// By default the trap only steps in at the edges: Tab on the last
/// focusable element wraps to the first, Shift+Tab on the first (or on the
/// container itself) wraps to the last. With
/// [`FocusTrapOptions::control_tab_order`] every Tab press is intercepted
/// and focus advances through the computed order.
///
/// Focusable elements are recomputed on every press since the container may
/// have changed since the last one.
#[derive(Debug, Clone)]
pub struct FocusTrap<N> {
	container: N,
	options: FocusTrapOptions,
	tab_direction: TabDirection,
	connected: bool,
}

impl<N> FocusTrap<N>
where
	N: Copy + Eq + Hash + Debug,
{
	/// Attach a trap to `container`. Fails when `container` is not an
	/// element of `tree`.
	pub fn new<T>(tree: &mut T, container: N, options: FocusTrapOptions) -> FocusResult<Self>
	where
		T: FocusTree<Node = N>,
	{
		if !tree.is_element(container) {
			return Err(FocusError::InvalidContainer(format!("{container:?}")));
		}

		if tree.supports_inert() {
			tree.set_inert(container, false);
		}
		tree.set_attribute(container, &options.marker_attribute, "true");
		tracing::debug!(?container, control_tab_order = options.control_tab_order, "focus trap attached");

		Ok(Self {
			container,
			options,
			tab_direction: TabDirection::Forward,
			connected: true,
		})
	}

	pub fn container(&self) -> N {
		self.container
	}

	pub fn tab_direction(&self) -> TabDirection {
		self.tab_direction
	}

	pub fn control_tab_order(&self) -> bool {
		self.options.control_tab_order
	}

	pub fn is_connected(&self) -> bool {
		self.connected
	}

	pub fn focusable_elements<T>(&self, tree: &T) -> FocusOrder<N>
	where
		T: FocusTree<Node = N>,
	{
		get_focusable_elements_with(tree, self.container, &self.options.registry)
	}

	/// Handle a keydown event aimed at the container.
	pub fn handle_keydown<T>(&mut self, tree: &mut T, event: &mut KeyboardEvent) -> TabOutcome<N>
	where
		T: FocusTree<Node = N>,
	{
		if !self.connected || !event.is_tab() {
			return TabOutcome::Ignored;
		}

		let focusables = self.focusable_elements(&*tree);
		if focusables.is_empty() {
			tracing::warn!(
				container = ?self.container,
				"focus trap: no focusable elements found in the container"
			);
			return TabOutcome::NoFocusables;
		}

		self.tab_direction = if event.shift_key {
			TabDirection::Backward
		} else {
			TabDirection::Forward
		};

		let actives = active_elements(&*tree);
		let current = focusables.position_of_any(&actives).unwrap_or(0);

		let Some(index) = self.next_focus_index(current, &focusables, &actives) else {
			return TabOutcome::Native;
		};

		event.prevent_default();
		let target = focusables[index];
		tracing::trace!(
			from = current,
			to = index,
			direction = %self.tab_direction,
			"focus trap moving focus"
		);
		tree.focus(target);

		TabOutcome::Moved { index, target }
	}

	fn next_focus_index(
		&self,
		current: usize,
		focusables: &FocusOrder<N>,
		actives: &[N],
	) -> Option<usize> {
		let last = focusables.last_index()?;

		if self.options.control_tab_order {
			return Some(match self.tab_direction {
				TabDirection::Forward if current >= last => 0,
				TabDirection::Forward => current + 1,
				TabDirection::Backward if current == 0 => last,
				TabDirection::Backward => current - 1,
			});
		}

		let at_first = actives.contains(&focusables[0]) || actives.contains(&self.container);
		let at_last = actives.contains(&focusables[last]);

		match self.tab_direction {
			TabDirection::Backward if at_first => Some(last),
			TabDirection::Forward if at_last => Some(0),
			_ => None,
		}
	}

	/// Focus the first focusable element in the container, if there is one.
	pub fn focus_first_element<T>(&self, tree: &mut T)
	where
		T: FocusTree<Node = N>,
	{
		if let Some(first) = self.focusable_elements(&*tree).first().copied() {
			tree.focus(first);
		}
	}

	/// Focus the last focusable element in the container, if there is one.
	pub fn focus_last_element<T>(&self, tree: &mut T)
	where
		T: FocusTree<Node = N>,
	{
		if let Some(last) = self.focusable_elements(&*tree).last().copied() {
			tree.focus(last);
		}
	}

	/// Stop handling keys and remove the marker attribute. Safe to call any
	/// number of times.
	pub fn disconnect<T>(&mut self, tree: &mut T)
	where
		T: FocusTree<Node = N>,
	{
		if tree.has_attribute(self.container, &self.options.marker_attribute) {
			tree.remove_attribute(self.container, &self.options.marker_attribute);
		}

		if self.connected {
			tracing::debug!(container = ?self.container, "focus trap disconnected");
		}
		self.connected = false;
	}
}

/// The focused element and every element focus was delegated to inside
/// nested shadow roots, outermost first.
pub fn active_elements<T: FocusTree>(tree: &T) -> Vec<T::Node> {
	let Some(mut active) = tree.active_element() else {
		return Vec::new();
	};
	let mut actives = vec![active];

	while let Some(inner) = tree.shadow_active_element(active) {
		if actives.contains(&inner) {
			break;
		}
		actives.push(inner);
		active = inner;
	}

	actives
}
