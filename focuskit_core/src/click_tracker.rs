use std::fmt::Debug;
use std::fmt::Display;

use indexmap::IndexMap;

use crate::ClickEvent;
use crate::FocusError;
use crate::FocusResult;
use crate::FocusTree;

/// Where a click landed relative to a tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickLocation {
	Inside,
	Outside,
}

impl Display for ClickLocation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Inside => write!(f, "inside"),
			Self::Outside => write!(f, "outside"),
		}
	}
}

type LocationCallback = Box<dyn FnMut(ClickLocation)>;
type EventCallback<N> = Box<dyn FnMut(&ClickEvent<N>)>;

/// Callbacks for clicks inside and outside a target element.
///
/// ```
/// use focuskit_core::ClickTracker;
/// use focuskit_core::Document;
///
/// let mut document = Document::new();
/// let target = document.body();
/// let tracker = ClickTracker::new(target).on_outer_click(|_| println!("clicked outside"));
/// ```
pub struct ClickTracker<N> {
	target: N,
	on_click: Option<LocationCallback>,
	on_inner_click: Option<EventCallback<N>>,
	on_outer_click: Option<EventCallback<N>>,
}

impl<N: Debug> Debug for ClickTracker<N> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ClickTracker")
			.field("target", &self.target)
			.field("on_click", &self.on_click.is_some())
			.field("on_inner_click", &self.on_inner_click.is_some())
			.field("on_outer_click", &self.on_outer_click.is_some())
			.finish()
	}
}

impl<N> ClickTracker<N> {
	pub fn new(target: N) -> Self {
		Self {
			target,
			on_click: None,
			on_inner_click: None,
			on_outer_click: None,
		}
	}

	/// Called for every click with its location.
	#[must_use]
	pub fn on_click(mut self, callback: impl FnMut(ClickLocation) + 'static) -> Self {
		self.on_click = Some(Box::new(callback));
		self
	}

	#[must_use]
	pub fn on_inner_click(mut self, callback: impl FnMut(&ClickEvent<N>) + 'static) -> Self {
		self.on_inner_click = Some(Box::new(callback));
		self
	}

	#[must_use]
	pub fn on_outer_click(mut self, callback: impl FnMut(&ClickEvent<N>) + 'static) -> Self {
		self.on_outer_click = Some(Box::new(callback));
		self
	}

	pub fn target(&self) -> &N {
		&self.target
	}

	fn notify(&mut self, location: ClickLocation, event: &ClickEvent<N>) {
		if let Some(callback) = self.on_click.as_mut() {
			callback(location);
		}

		let callback = match location {
			ClickLocation::Inside => self.on_inner_click.as_mut(),
			ClickLocation::Outside => self.on_outer_click.as_mut(),
		};
		if let Some(callback) = callback {
			callback(event);
		}
	}
}

/// Identifies a tracker owned by a [`ClickTrackerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackerId(u64);

/// Every click tracker for one document, sharing a single document-level
/// click listener.
///
/// The listener is installed when the first tracker is added and removed
/// with the last one; while it is not installed, dispatched clicks reach
/// nobody.
#[derive(Debug)]
pub struct ClickTrackerRegistry<N> {
	trackers: IndexMap<TrackerId, ClickTracker<N>>,
	listener_installed: bool,
	next_id: u64,
}

impl<N> Default for ClickTrackerRegistry<N> {
	fn default() -> Self {
		Self {
			trackers: IndexMap::new(),
			listener_installed: false,
			next_id: 0,
		}
	}
}

impl<N> ClickTrackerRegistry<N>
where
	N: Copy + Eq + std::hash::Hash + Debug,
{
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add<T>(&mut self, tree: &T, tracker: ClickTracker<N>) -> FocusResult<TrackerId>
	where
		T: FocusTree<Node = N>,
	{
		if !tree.is_element(tracker.target) {
			return Err(FocusError::InvalidTarget(format!("{:?}", tracker.target)));
		}

		let id = TrackerId(self.next_id);
		self.next_id += 1;
		self.trackers.insert(id, tracker);

		if !self.listener_installed {
			tracing::debug!("installing document click listener");
			self.listener_installed = true;
		}

		Ok(id)
	}

	/// Forget a tracker. Removing an unknown or already removed tracker is a
	/// no-op that returns `false`.
	pub fn remove(&mut self, id: TrackerId) -> bool {
		let removed = self.trackers.shift_remove(&id).is_some();

		if self.trackers.is_empty() && self.listener_installed {
			tracing::debug!("removing document click listener");
			self.listener_installed = false;
		}

		removed
	}

	pub fn is_listening(&self) -> bool {
		self.listener_installed
	}

	pub fn len(&self) -> usize {
		self.trackers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.trackers.is_empty()
	}

	/// Report a click to every tracker. Returns how many trackers were
	/// notified.
	pub fn dispatch_click<T>(&mut self, tree: &T, event: &ClickEvent<N>) -> usize
	where
		T: FocusTree<Node = N>,
	{
		if !self.listener_installed {
			return 0;
		}

		let path = tree.composed_path(event.target);
		for tracker in self.trackers.values_mut() {
			let location = if path.contains(&tracker.target) {
				ClickLocation::Inside
			} else {
				ClickLocation::Outside
			};
			tracker.notify(location, event);
		}

		self.trackers.len()
	}
}
