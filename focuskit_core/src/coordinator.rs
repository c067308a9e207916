use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::FocusResult;
use crate::FocusTree;
use crate::KeyboardEvent;
use crate::focus_trap::FocusTrap;
use crate::focus_trap::FocusTrapOptions;
use crate::focus_trap::TabOutcome;

/// Identifies a trap owned by a [`TrapCoordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrapId(u64);

impl Display for TrapId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "trap-{}", self.0)
	}
}

/// Owns every focus trap attached to one tree and routes keydown events to
/// them.
///
/// Several overlays can be open at once; each gets its own trap. The most
/// recently attached trap is the active one.
#[derive(Debug)]
pub struct TrapCoordinator<N> {
	traps: IndexMap<TrapId, FocusTrap<N>>,
	next_id: u64,
}

impl<N> Default for TrapCoordinator<N> {
	fn default() -> Self {
		Self {
			traps: IndexMap::new(),
			next_id: 0,
		}
	}
}

impl<N> TrapCoordinator<N>
where
	N: Copy + Eq + Hash + Debug,
{
	pub fn new() -> Self {
		Self::default()
	}

	pub fn attach<T>(
		&mut self,
		tree: &mut T,
		container: N,
		options: FocusTrapOptions,
	) -> FocusResult<TrapId>
	where
		T: FocusTree<Node = N>,
	{
		let trap = FocusTrap::new(tree, container, options)?;
		let id = TrapId(self.next_id);
		self.next_id += 1;
		self.traps.insert(id, trap);

		Ok(id)
	}

	/// Disconnect and forget a trap. Returns `false` when `id` was already
	/// detached.
	pub fn detach<T>(&mut self, tree: &mut T, id: TrapId) -> bool
	where
		T: FocusTree<Node = N>,
	{
		let Some(mut trap) = self.traps.shift_remove(&id) else {
			return false;
		};

		trap.disconnect(tree);
		true
	}

	/// Detach every trap.
	pub fn clear<T>(&mut self, tree: &mut T)
	where
		T: FocusTree<Node = N>,
	{
		for (_, mut trap) in self.traps.drain(..) {
			trap.disconnect(tree);
		}
	}

	pub fn get(&self, id: TrapId) -> Option<&FocusTrap<N>> {
		self.traps.get(&id)
	}

	/// The most recently attached trap.
	pub fn active(&self) -> Option<TrapId> {
		self.traps.last().map(|(id, _)| *id)
	}

	pub fn len(&self) -> usize {
		self.traps.len()
	}

	pub fn is_empty(&self) -> bool {
		self.traps.is_empty()
	}

	/// Deliver a keydown aimed at `target` to every trap whose container lies
	/// on the composed path, innermost container first. Delivery stops at
	/// the first trap that prevents the default action.
	pub fn dispatch_keydown<T>(
		&mut self,
		tree: &mut T,
		target: N,
		event: &mut KeyboardEvent,
	) -> TabOutcome<N>
	where
		T: FocusTree<Node = N>,
	{
		let path = tree.composed_path(target);
		let mut outcome = TabOutcome::Ignored;

		for node in path {
			for trap in self.traps.values_mut().rev() {
				if trap.container() != node {
					continue;
				}

				match trap.handle_keydown(tree, event) {
					TabOutcome::Ignored => {}
					result => outcome = result,
				}

				if event.default_prevented() {
					return outcome;
				}
			}
		}

		outcome
	}
}
