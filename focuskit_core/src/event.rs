/// The `key` value of the Tab key.
pub const TAB_KEY: &str = "Tab";

/// A keydown event as delivered to focus traps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
	pub key: String,
	pub shift_key: bool,
	default_prevented: bool,
}

impl KeyboardEvent {
	pub fn new(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			shift_key: false,
			default_prevented: false,
		}
	}

	/// A plain Tab press.
	pub fn tab() -> Self {
		Self::new(TAB_KEY)
	}

	/// A Shift+Tab press.
	pub fn shift_tab() -> Self {
		Self::tab().with_shift(true)
	}

	#[must_use]
	pub fn with_shift(mut self, shift_key: bool) -> Self {
		self.shift_key = shift_key;
		self
	}

	pub fn is_tab(&self) -> bool {
		self.key == TAB_KEY
	}

	pub fn prevent_default(&mut self) {
		self.default_prevented = true;
	}

	pub fn default_prevented(&self) -> bool {
		self.default_prevented
	}
}

/// A click, identified by the node that was clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent<N> {
	pub target: N,
}

impl<N> ClickEvent<N> {
	pub fn new(target: N) -> Self {
		Self { target }
	}
}
