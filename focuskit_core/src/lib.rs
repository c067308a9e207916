//! `focuskit_core` is the core library for [focuskit](https://github.com/focuskit/focuskit). It discovers the keyboard-focusable elements of a DOM-like tree, including elements inside shadow roots and slotted content, and keeps Tab navigation confined to a container while an overlay is open.
//!
//! ## Pipeline
//!
//! ```text
//! Tree (any `FocusTree` implementation, or a `Document` parsed from markup)
//!   → Discovery (pre-order walk through shadow roots and slots, component registry short-circuit)
//!   → Ordering (deduplicate, positive tabindex first, then traversal order)
//!   → Focus trap (on every Tab press: recompute, locate the active element, wrap or advance)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Loads `focuskit.toml` with extra or excluded components and trap defaults.
//! - [`dom`]: An arena-backed [`Document`] with shadow roots, slot assignment, and focus retargeting.
//! - [`focusables`]: Focusable element discovery and ordering.
//! - [`focus_trap`]: The per-container [`FocusTrap`] controller.
//!
//! ## Key Types
//!
//! - [`FocusTree`]: The tree abstraction everything else is generic over.
//! - [`ComponentRegistry`]: Custom component tags that manage their own focus.
//! - [`FocusTrap`]: Confines Tab/Shift+Tab to a container.
//! - [`TrapCoordinator`]: Owns the traps of several overlays and routes keydown events.
//! - [`ClickTrackerRegistry`]: Reports clicks inside and outside tracked elements.
//!
//! ## Quick Start
//!
//! ```rust
//! use focuskit_core::FocusTrap;
//! use focuskit_core::FocusTrapOptions;
//! use focuskit_core::FocusTree;
//! use focuskit_core::KeyboardEvent;
//! use focuskit_core::parse_markup;
//!
//! let mut document = parse_markup(
//! 	r##"<div id="dialog"><button id="first">First</button><a id="last" href="#">Last</a></div>"##,
//! )
//! .unwrap();
//! let dialog = document.get_element_by_id("dialog").unwrap();
//! let mut trap = FocusTrap::new(&mut document, dialog, FocusTrapOptions::default()).unwrap();
//!
//! trap.focus_last_element(&mut document);
//! let mut event = KeyboardEvent::tab();
//! trap.handle_keydown(&mut document, &mut event);
//!
//! assert!(event.default_prevented());
//! assert_eq!(document.active_element(), document.get_element_by_id("first"));
//! ```

pub use click_tracker::*;
pub use config::*;
pub use coordinator::*;
pub use dom::*;
pub use error::*;
pub use event::*;
pub use focus_trap::*;
pub use focusables::*;
pub use markup::*;
pub use registry::*;
pub use tree::*;

mod click_tracker;
pub mod config;
mod coordinator;
pub mod dom;
#[allow(unused_assignments)]
mod error;
mod event;
pub mod focus_trap;
pub mod focusables;
mod markup;
mod registry;
mod tree;

#[cfg(test)]
mod __fixtures;
