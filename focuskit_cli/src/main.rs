use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use focuskit_cli::Commands;
use focuskit_cli::FocuskitCli;
use focuskit_cli::OutputFormat;
use focuskit_core::Document;
use focuskit_core::FocusError;
use focuskit_core::FocusTrap;
use focuskit_core::FocusTree;
use focuskit_core::FocuskitConfig;
use focuskit_core::KeyboardEvent;
use focuskit_core::NodeId;
use focuskit_core::TabOutcome;
use focuskit_core::active_elements;
use focuskit_core::get_focusable_elements_with;
use focuskit_core::parse_markup;
use focuskit_core::tab_index;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Arguments of the `tab` subcommand.
struct TabRequest<'a> {
	file: &'a Path,
	container: &'a str,
	from: Option<&'a str>,
	presses: usize,
	shift: bool,
	control_tab_order: bool,
	format: OutputFormat,
}

/// One simulated key press and where focus went.
struct Press {
	number: usize,
	from: Option<NodeId>,
	to: Option<NodeId>,
	outcome: TabOutcome<NodeId>,
}

fn main() {
	let args = FocuskitCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_logging(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Order {
			file,
			container,
			format,
		}) => run_order(&args, file, container.as_deref(), *format),
		Some(Commands::Tab {
			file,
			container,
			from,
			presses,
			shift,
			control_tab_order,
			format,
		}) => {
			run_tab(&args, &TabRequest {
				file,
				container,
				from: from.as_deref(),
				presses: *presses,
				shift: *shift,
				control_tab_order: *control_tab_order,
				format: *format,
			})
		}
		Some(Commands::Components { format }) => run_components(&args, *format),
		None => {
			eprintln!("No subcommand specified. Run `focuskit --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		match e.downcast::<FocusError>() {
			Ok(focus_err) => {
				let report: miette::Report = (*focus_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Send library logs to stderr. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool, use_color: bool) {
	let default_directive = if verbose {
		"focuskit_core=debug"
	} else {
		"focuskit_core=warn"
	};
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &FocuskitCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(args: &FocuskitCli) -> Result<FocuskitConfig, FocusError> {
	let root = resolve_root(args);

	if args.verbose {
		match FocuskitConfig::resolve_path(&root) {
			Some(path) => eprintln!("Using config: {}", path.display()),
			None => eprintln!("No config file found in {}, using defaults", root.display()),
		}
	}

	Ok(FocuskitConfig::load(&root)?.unwrap_or_default())
}

fn load_document(file: &Path) -> Result<Document, FocusError> {
	let source = std::fs::read_to_string(file)?;
	parse_markup(&source)
}

fn find_element(document: &Document, id: &str) -> Result<NodeId, FocusError> {
	document
		.get_element_by_id(id)
		.ok_or_else(|| FocusError::UnknownElement(id.to_string()))
}

fn describe(document: &Document, node: Option<NodeId>) -> String {
	node.map_or_else(|| "(nothing)".to_string(), |node| document.describe(node))
}

/// The innermost focused element, looking through shadow roots.
fn focused(document: &Document) -> Option<NodeId> {
	active_elements(document).last().copied()
}

fn run_order(
	args: &FocuskitCli,
	file: &Path,
	container: Option<&str>,
	format: OutputFormat,
) -> CliResult {
	let config = load_config(args)?;
	let registry = config.registry();
	let document = load_document(file)?;
	let root = match container {
		Some(id) => find_element(&document, id)?,
		None => document.body(),
	};
	let order = get_focusable_elements_with(&document, root, &registry);

	match format {
		OutputFormat::Json => {
			let elements: Vec<serde_json::Value> = order
				.iter()
				.enumerate()
				.map(|(index, node)| {
					serde_json::json!({
						"index": index,
						"element": document.describe(*node),
						"tag": document.tag_name(*node),
						"id": document.attribute(*node, "id"),
						"tabindex": tab_index(&document, *node),
					})
				})
				.collect();
			let output = serde_json::json!({
				"container": document.describe(root),
				"count": order.len(),
				"elements": elements,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			if order.is_empty() {
				println!(
					"{} no focusable elements in {}",
					colored!("warning:", yellow),
					document.describe(root)
				);
				return Ok(());
			}

			println!(
				"{}",
				colored!(format!("Focus order for {}", document.describe(root)), bold)
			);
			for (index, node) in order.iter().enumerate() {
				let label = document.describe(*node);
				match tab_index(&document, *node).filter(|value| *value > 0) {
					Some(value) => println!("{:>3}. {label} (tabindex {value})", index + 1),
					None => println!("{:>3}. {label}", index + 1),
				}
			}
		}
	}

	Ok(())
}

fn run_tab(args: &FocuskitCli, request: &TabRequest<'_>) -> CliResult {
	let config = load_config(args)?;
	let mut options = config.trap_options();
	if request.control_tab_order {
		options.control_tab_order = true;
	}

	let mut document = load_document(request.file)?;
	let container = find_element(&document, request.container)?;
	let mut trap = FocusTrap::new(&mut document, container, options)?;

	let start = match request.from {
		Some(id) => Some(find_element(&document, id)?),
		None => trap.focusable_elements(&document).first().copied(),
	};
	if let Some(start) = start {
		document.focus(start);
	}

	let mut presses = Vec::with_capacity(request.presses);
	for number in 1..=request.presses {
		let from = focused(&document);
		let mut event = KeyboardEvent::tab().with_shift(request.shift);
		let outcome = trap.handle_keydown(&mut document, &mut event);

		if outcome == TabOutcome::Native {
			move_natively(&mut document, &trap, request.shift);
		}

		presses.push(Press {
			number,
			from,
			to: focused(&document),
			outcome,
		});
	}

	trap.disconnect(&mut document);
	print_presses(&document, container, request, &trap, &presses)
}

/// Move focus the way the browser would when the trap leaves a key press
/// alone: to the adjacent element in focus order.
fn move_natively(document: &mut Document, trap: &FocusTrap<NodeId>, backward: bool) {
	let order = trap.focusable_elements(&*document);
	let Some(index) = order.position_of_any(&active_elements(&*document)) else {
		return;
	};
	let next = if backward {
		index.checked_sub(1)
	} else {
		Some(index + 1)
	};

	if let Some(node) = next.and_then(|next| order.get(next).copied()) {
		document.focus(node);
	}
}

fn outcome_label(outcome: TabOutcome<NodeId>) -> &'static str {
	match outcome {
		TabOutcome::Moved { .. } => "trapped",
		TabOutcome::Native => "native",
		TabOutcome::NoFocusables => "no focusable elements",
		TabOutcome::Ignored => "ignored",
	}
}

fn print_presses(
	document: &Document,
	container: NodeId,
	request: &TabRequest<'_>,
	trap: &FocusTrap<NodeId>,
	presses: &[Press],
) -> CliResult {
	let key = if request.shift { "Shift+Tab" } else { "Tab" };
	let mode = if trap.control_tab_order() {
		"manual"
	} else {
		"boundary"
	};

	match request.format {
		OutputFormat::Json => {
			let entries: Vec<serde_json::Value> = presses
				.iter()
				.map(|press| {
					serde_json::json!({
						"press": press.number,
						"from": press.from.map(|node| document.describe(node)),
						"to": press.to.map(|node| document.describe(node)),
						"outcome": outcome_label(press.outcome),
					})
				})
				.collect();
			let output = serde_json::json!({
				"container": document.describe(container),
				"key": key,
				"mode": mode,
				"presses": entries,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			println!(
				"{}",
				colored!(
					format!(
						"Focus trap on {} ({mode} mode)",
						document.describe(container)
					),
					bold
				)
			);
			for press in presses {
				let label = outcome_label(press.outcome);
				let label = if press.outcome.is_moved() {
					colored!(label, green)
				} else if press.outcome == TabOutcome::NoFocusables {
					colored!(label, yellow)
				} else {
					label.to_string()
				};
				println!(
					"{:>3}. {key:<9} {} -> {} ({label})",
					press.number,
					describe(document, press.from),
					describe(document, press.to)
				);
			}
		}
	}

	Ok(())
}

fn run_components(args: &FocuskitCli, format: OutputFormat) -> CliResult {
	let registry = load_config(args)?.registry();
	let tags = registry.tags();

	match format {
		OutputFormat::Json => {
			let output = serde_json::json!({
				"count": tags.len(),
				"components": tags,
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
		OutputFormat::Text => {
			println!(
				"{}",
				colored!(format!("Focusable components ({})", tags.len()), bold)
			);
			for tag in tags {
				println!("  {tag}");
			}
		}
	}

	Ok(())
}
