use std::fmt::Display;

use indexmap::IndexMap;

use crate::FocusTree;

/// Handle to a node stored in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	pub fn index(self) -> usize {
		self.0
	}
}

impl Display for NodeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// Where a node hangs in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParentLink {
	/// An ordinary light-DOM child of an element.
	Element(NodeId),
	/// A top-level child of the shadow root hosted by this element.
	Shadow(NodeId),
}

#[derive(Debug, Clone, Default)]
struct ShadowRoot {
	children: Vec<NodeId>,
	active: Option<NodeId>,
}

#[derive(Debug, Clone)]
struct ElementData {
	tag: String,
	attributes: IndexMap<String, String>,
	shadow: Option<ShadowRoot>,
	inert: bool,
}

#[derive(Debug, Clone)]
enum NodeKind {
	Element(ElementData),
	Text(String),
}

#[derive(Debug, Clone)]
struct NodeEntry {
	kind: NodeKind,
	parent: Option<ParentLink>,
	children: Vec<NodeId>,
}

/// An arena-backed document with light children, open shadow roots and
/// slot assignment.
///
/// The document starts with a single `body` element; everything created
/// afterwards is detached until appended somewhere beneath it.
#[derive(Debug, Clone)]
pub struct Document {
	nodes: Vec<NodeEntry>,
	body: NodeId,
	active: Option<NodeId>,
	focus_log: Vec<NodeId>,
	inert_supported: bool,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	pub fn new() -> Self {
		let mut document = Self {
			nodes: Vec::new(),
			body: NodeId(0),
			active: None,
			focus_log: Vec::new(),
			inert_supported: true,
		};
		document.body = document.create_element("body");
		document
	}

	/// Toggle whether this document pretends to support the `inert`
	/// property.
	#[must_use]
	pub fn with_inert_support(mut self, supported: bool) -> Self {
		self.inert_supported = supported;
		self
	}

	pub fn body(&self) -> NodeId {
		self.body
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Create a detached element. Tag names are stored lower-cased.
	pub fn create_element(&mut self, tag: &str) -> NodeId {
		self.push(NodeKind::Element(ElementData {
			tag: tag.to_ascii_lowercase(),
			attributes: IndexMap::new(),
			shadow: None,
			inert: false,
		}))
	}

	pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
		self.push(NodeKind::Text(text.into()))
	}

	fn push(&mut self, kind: NodeKind) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(NodeEntry {
			kind,
			parent: None,
			children: Vec::new(),
		});
		id
	}

	/// Append `child` to the light children of `parent`, detaching it from
	/// wherever it lived before. Appending a node under itself or one of its
	/// descendants is ignored.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
		if self.is_inclusive_ancestor(child, parent) {
			tracing::debug!(%parent, %child, "refusing to append a node inside itself");
			return;
		}

		self.detach(child);
		self.nodes[parent.0].children.push(child);
		self.nodes[child.0].parent = Some(ParentLink::Element(parent));
	}

	/// Attach an empty open shadow root to `host`. Attaching twice keeps the
	/// existing root.
	pub fn attach_shadow(&mut self, host: NodeId) {
		if let Some(data) = self.element_mut(host) {
			data.shadow.get_or_insert_with(ShadowRoot::default);
		}
	}

	/// Append `child` to the shadow root of `host`, attaching one if needed.
	/// Appending a node under itself or one of its descendants is ignored.
	pub fn append_shadow_child(&mut self, host: NodeId, child: NodeId) {
		if self.is_inclusive_ancestor(child, host) {
			tracing::debug!(%host, %child, "refusing to append a node inside itself");
			return;
		}

		self.detach(child);
		self.attach_shadow(host);

		if let Some(shadow) = self.element_mut(host).and_then(|data| data.shadow.as_mut()) {
			shadow.children.push(child);
			self.nodes[child.0].parent = Some(ParentLink::Shadow(host));
		}
	}

	/// Remove `node` from its parent. The node and its subtree stay in the
	/// arena and can be re-appended.
	pub fn detach(&mut self, node: NodeId) {
		match self.nodes[node.0].parent.take() {
			Some(ParentLink::Element(parent)) => {
				self.nodes[parent.0].children.retain(|child| *child != node);
			}
			Some(ParentLink::Shadow(host)) => {
				if let Some(shadow) = self.element_mut(host).and_then(|data| data.shadow.as_mut()) {
					shadow.children.retain(|child| *child != node);
				}
			}
			None => {}
		}
	}

	pub fn text(&self, node: NodeId) -> Option<&str> {
		match &self.nodes.get(node.0)?.kind {
			NodeKind::Text(text) => Some(text),
			NodeKind::Element(_) => None,
		}
	}

	pub fn is_inert(&self, node: NodeId) -> bool {
		self.element(node).is_some_and(|data| data.inert)
	}

	pub fn has_shadow_root(&self, node: NodeId) -> bool {
		self.element(node).is_some_and(|data| data.shadow.is_some())
	}

	/// Find the first element, in creation order, whose `id` attribute
	/// equals `id`. Shadow trees are searched too.
	pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		self.nodes
			.iter()
			.enumerate()
			.find(|(_, entry)| {
				matches!(&entry.kind, NodeKind::Element(data)
					if data.attributes.get("id").is_some_and(|value| value == id))
			})
			.map(|(index, _)| NodeId(index))
	}

	/// A short human readable label such as `button#first` or `div`.
	pub fn describe(&self, node: NodeId) -> String {
		match self.nodes.get(node.0).map(|entry| &entry.kind) {
			Some(NodeKind::Element(data)) => {
				match data.attributes.get("id") {
					Some(id) => format!("{}#{id}", data.tag),
					None => data.tag.clone(),
				}
			}
			Some(NodeKind::Text(_)) => "#text".to_string(),
			None => format!("<unknown {node}>"),
		}
	}

	/// Every node `focus` was called on, oldest first.
	pub fn focus_log(&self) -> &[NodeId] {
		&self.focus_log
	}

	/// How many times `focus` was called on `node`.
	pub fn focus_count(&self, node: NodeId) -> usize {
		self.focus_log.iter().filter(|id| **id == node).count()
	}

	pub fn clear_focus_log(&mut self) {
		self.focus_log.clear();
	}

	/// Drop focus entirely, leaving no active element anywhere.
	pub fn blur(&mut self) {
		self.active = None;
		self.clear_shadow_actives();
	}

	fn element(&self, node: NodeId) -> Option<&ElementData> {
		match &self.nodes.get(node.0)?.kind {
			NodeKind::Element(data) => Some(data),
			NodeKind::Text(_) => None,
		}
	}

	fn element_mut(&mut self, node: NodeId) -> Option<&mut ElementData> {
		match &mut self.nodes.get_mut(node.0)?.kind {
			NodeKind::Element(data) => Some(data),
			NodeKind::Text(_) => None,
		}
	}

	fn clear_shadow_actives(&mut self) {
		for entry in &mut self.nodes {
			if let NodeKind::Element(ElementData {
				shadow: Some(shadow),
				..
			}) = &mut entry.kind
			{
				shadow.active = None;
			}
		}
	}

	/// The host of the shadow tree that contains `node`, if any.
	/// Whether `ancestor` is `node` or lies on its composed parent chain.
	fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
		let mut current = Some(node);

		while let Some(id) = current {
			if id == ancestor {
				return true;
			}
			current = self
				.nodes
				.get(id.0)
				.and_then(|entry| entry.parent)
				.map(|link| match link {
					ParentLink::Element(parent) | ParentLink::Shadow(parent) => parent,
				});
		}

		false
	}

	fn containing_host(&self, node: NodeId) -> Option<NodeId> {
		let mut current = node;

		loop {
			match self.nodes[current.0].parent? {
				ParentLink::Element(parent) => current = parent,
				ParentLink::Shadow(host) => return Some(host),
			}
		}
	}

	/// The first `<slot>` in `host`'s shadow tree, in tree order, whose
	/// name is `name`. Nested shadow trees are not searched.
	fn find_slot(&self, host: NodeId, name: &str) -> Option<NodeId> {
		let shadow = self.element(host)?.shadow.as_ref()?;
		let mut stack: Vec<NodeId> = shadow.children.iter().rev().copied().collect();

		while let Some(node) = stack.pop() {
			if let Some(data) = self.element(node) {
				let slot_name = data.attributes.get("name").map_or("", String::as_str);
				if data.tag == "slot" && slot_name == name {
					return Some(node);
				}
			}

			stack.extend(self.nodes[node.0].children.iter().rev().copied());
		}

		None
	}

	fn slot_name_of(&self, node: NodeId) -> &str {
		self.element(node)
			.and_then(|data| data.attributes.get("slot"))
			.map_or("", String::as_str)
	}

	fn is_slot(&self, node: NodeId) -> bool {
		self.element(node).is_some_and(|data| data.tag == "slot")
	}

	/// Nodes assigned to `slot` without flattening.
	fn assigned_slotables(&self, slot: NodeId) -> Vec<NodeId> {
		let Some(host) = self.containing_host(slot) else {
			return Vec::new();
		};
		let name = self
			.element(slot)
			.and_then(|data| data.attributes.get("name"))
			.map_or("", String::as_str);

		if self.find_slot(host, name) != Some(slot) {
			return Vec::new();
		}

		self.nodes[host.0]
			.children
			.iter()
			.copied()
			.filter(|child| self.slot_name_of(*child) == name)
			.collect()
	}

	fn flatten_into(&self, slot: NodeId, output: &mut Vec<NodeId>) {
		let assigned = self.assigned_slotables(slot);
		let nodes = if assigned.is_empty() {
			self.nodes[slot.0].children.clone()
		} else {
			assigned
		};

		for node in nodes {
			if self.is_slot(node) {
				self.flatten_into(node, output);
			} else {
				output.push(node);
			}
		}
	}
}

impl FocusTree for Document {
	type Node = NodeId;

	fn is_element(&self, node: NodeId) -> bool {
		self.element(node).is_some()
	}

	fn tag_name(&self, node: NodeId) -> Option<&str> {
		self.element(node).map(|data| data.tag.as_str())
	}

	fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
		self.element(node)?
			.attributes
			.get(&name.to_ascii_lowercase())
			.map(String::as_str)
	}

	fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
		if let Some(data) = self.element_mut(node) {
			data.attributes
				.insert(name.to_ascii_lowercase(), value.to_string());
		}
	}

	fn remove_attribute(&mut self, node: NodeId, name: &str) {
		if let Some(data) = self.element_mut(node) {
			data.attributes.shift_remove(&name.to_ascii_lowercase());
		}
	}

	fn children(&self, node: NodeId) -> Vec<NodeId> {
		self.nodes.get(node.0).map_or_else(Vec::new, |entry| {
			entry
				.children
				.iter()
				.copied()
				.filter(|child| self.is_element(*child))
				.collect()
		})
	}

	fn shadow_children(&self, node: NodeId) -> Option<Vec<NodeId>> {
		let shadow = self.element(node)?.shadow.as_ref()?;
		Some(
			shadow
				.children
				.iter()
				.copied()
				.filter(|child| self.is_element(*child))
				.collect(),
		)
	}

	fn assigned_nodes(&self, slot: NodeId) -> Vec<NodeId> {
		if !self.is_slot(slot) {
			return Vec::new();
		}

		let mut output = Vec::new();
		self.flatten_into(slot, &mut output);
		output.retain(|node| self.is_element(*node));
		output
	}

	fn parent(&self, node: NodeId) -> Option<NodeId> {
		match self.nodes.get(node.0)?.parent? {
			ParentLink::Element(parent) | ParentLink::Shadow(parent) => Some(parent),
		}
	}

	fn active_element(&self) -> Option<NodeId> {
		self.active
	}

	fn shadow_active_element(&self, host: NodeId) -> Option<NodeId> {
		self.element(host)?.shadow.as_ref()?.active
	}

	/// Focus `node`, retargeting the active element of every enclosing tree
	/// scope the way a browser does: the document sees the outermost shadow
	/// host, each shadow root sees its own descendant on the path.
	fn focus(&mut self, node: NodeId) {
		if !self.is_element(node) {
			return;
		}

		self.clear_shadow_actives();
		let mut current = node;

		while let Some(host) = self.containing_host(current) {
			if let Some(shadow) = self.element_mut(host).and_then(|data| data.shadow.as_mut()) {
				shadow.active = Some(current);
			}
			current = host;
		}

		self.active = Some(current);
		self.focus_log.push(node);
	}

	fn supports_inert(&self) -> bool {
		self.inert_supported
	}

	fn set_inert(&mut self, node: NodeId, inert: bool) {
		if let Some(data) = self.element_mut(node) {
			data.inert = inert;
		}
	}
}
