use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Inspect keyboard focus order and simulate focus traps in HTML markup.",
	long_about = "focuskit discovers the keyboard-focusable elements of an HTML document, \
	              including elements inside declarative shadow roots and slotted content, and \
	              simulates a focus trap confining Tab navigation to a container.\n\nQuick \
	              start:\n  focuskit order page.html              Print the focus order\n  \
	              focuskit tab page.html -c dialog      Press Tab inside a trapped dialog\n  \
	              focuskit components                   List registered focusable components"
)]
pub struct FocuskitCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Project root used to find `focuskit.toml`.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output and debug logging.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Print the keyboard focus order of a markup file.
	///
	/// Elements with a positive `tabindex` come first in ascending order,
	/// followed by every other focusable element in traversal order.
	/// Registered components are listed as a single stop.
	Order {
		/// The HTML file to inspect.
		file: PathBuf,

		/// The `id` of the element whose focusable descendants are listed.
		/// Defaults to the whole document.
		#[arg(long, short)]
		container: Option<String>,

		/// Output format. Use `text` for human-readable output or `json` for
		/// programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Simulate Tab presses inside a focus trap.
	///
	/// Attaches a focus trap to the container, focuses the starting element,
	/// and reports where focus lands after every press. Presses the trap
	/// leaves to the browser move to the adjacent element in focus order.
	Tab {
		/// The HTML file to load.
		file: PathBuf,

		/// The `id` of the trap container.
		#[arg(long, short)]
		container: String,

		/// The `id` of the element focused before the first press. Defaults
		/// to the first focusable element in the container.
		#[arg(long)]
		from: Option<String>,

		/// How many times to press the key.
		#[arg(long, short = 'n', default_value_t = 1)]
		presses: usize,

		/// Press Shift+Tab instead of Tab.
		#[arg(long, default_value_t = false)]
		shift: bool,

		/// Move focus explicitly on every press instead of only at the
		/// boundaries. Overrides `trap.control_tab_order` from the config.
		#[arg(long, default_value_t = false)]
		control_tab_order: bool,

		/// Output format for the simulated presses.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List the custom component tags treated as single focus stops.
	Components {
		/// Output format for the component list.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
