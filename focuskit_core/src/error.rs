use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum FocusError {
	#[error(transparent)]
	#[diagnostic(code(focuskit::io_error))]
	Io(#[from] std::io::Error),

	#[error("focus trap requires a valid element, got {0}")]
	#[diagnostic(
		code(focuskit::invalid_container),
		help("pass an element node as the trap container, not a text node or a detached handle")
	)]
	InvalidContainer(String),

	#[error("click tracker requires a valid target element, got {0}")]
	#[diagnostic(code(focuskit::invalid_target))]
	InvalidTarget(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(focuskit::config_parse),
		help("check that focuskit.toml is valid TOML with [components] and/or [trap] sections")
	)]
	ConfigParse(String),

	#[error("invalid markup at byte {offset}: {reason}")]
	#[diagnostic(code(focuskit::markup))]
	Markup { offset: usize, reason: String },

	#[error("no element with id `{0}`")]
	#[diagnostic(
		code(focuskit::unknown_element),
		help("ids are matched exactly against the `id` attribute, including inside shadow trees")
	)]
	UnknownElement(String),
}

pub type FocusResult<T> = Result<T, FocusError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
