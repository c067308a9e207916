use std::fmt::Debug;
use std::hash::Hash;

/// The slice of a live DOM that focus management needs.
///
/// Implementors expose element traversal (light children, shadow trees and
/// slot assignment), attribute access, and focus state. Nodes are opaque
/// handles owned by the implementor; this crate never creates or destroys
/// them.
pub trait FocusTree {
	/// A cheap, copyable handle to a node in the tree.
	type Node: Copy + Eq + Hash + Debug;

	/// Whether the handle refers to an element (as opposed to text or a
	/// handle the tree does not know about).
	fn is_element(&self, node: Self::Node) -> bool;

	/// The lower-cased tag name of an element.
	fn tag_name(&self, node: Self::Node) -> Option<&str>;

	fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

	fn has_attribute(&self, node: Self::Node, name: &str) -> bool {
		self.attribute(node, name).is_some()
	}

	fn set_attribute(&mut self, node: Self::Node, name: &str, value: &str);

	fn remove_attribute(&mut self, node: Self::Node, name: &str);

	/// Element children of `node` in document order.
	fn children(&self, node: Self::Node) -> Vec<Self::Node>;

	/// Element children of the shadow tree hosted by `node`, or `None` when
	/// `node` is not a shadow host.
	fn shadow_children(&self, node: Self::Node) -> Option<Vec<Self::Node>>;

	/// The flattened list of nodes assigned to a `<slot>`, falling back to
	/// the slot's own children when nothing is assigned.
	fn assigned_nodes(&self, slot: Self::Node) -> Vec<Self::Node>;

	/// The composed parent: the shadow host for top-level shadow children.
	fn parent(&self, node: Self::Node) -> Option<Self::Node>;

	/// The document-level active element.
	fn active_element(&self) -> Option<Self::Node>;

	/// The active element inside the shadow tree hosted by `host`.
	fn shadow_active_element(&self, host: Self::Node) -> Option<Self::Node>;

	fn focus(&mut self, node: Self::Node);

	fn supports_inert(&self) -> bool {
		true
	}

	fn set_inert(&mut self, node: Self::Node, inert: bool);

	/// Walk the composed path from `node` up to the root, `node` first.
	fn composed_path(&self, node: Self::Node) -> Vec<Self::Node> {
		let mut path = vec![node];
		let mut current = node;

		while let Some(parent) = self.parent(current) {
			path.push(parent);
			current = parent;
		}

		path
	}
}
