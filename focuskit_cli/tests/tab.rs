mod common;

use clap::Parser;
use focuskit_cli::Commands;
use focuskit_cli::FocuskitCli;
use focuskit_core::AnyEmptyResult;
use rstest::rstest;
use serde_json::Value;

fn press_field(output: &Value, field: &str) -> Vec<String> {
	output["presses"]
		.as_array()
		.map(|presses| {
			presses
				.iter()
				.filter_map(|press| press[field].as_str().map(ToString::to_string))
				.collect()
		})
		.unwrap_or_default()
}

#[rstest]
#[case::wrap_forward(&["--from", "last"], "a#last -> button#first (trapped)")]
#[case::wrap_backward(&["--from", "first", "--shift"], "button#first -> a#last (trapped)")]
#[case::native_forward(&["--from", "first"], "button#first -> input#middle (native)")]
#[case::native_backward(&["--from", "last", "--shift"], "a#last -> input#middle (native)")]
#[case::from_container(&["--from", "container", "--shift"], "div#container -> a#last (trapped)")]
fn tab_reports_where_focus_lands(
	#[case] extra: &[&str],
	#[case] expected: &str,
) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	common::focuskit_cmd()
		.arg("tab")
		.arg(&page)
		.args(["--container", "container"])
		.args(extra)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Focus trap on div#container (boundary mode)"))
		.stdout(predicates::str::contains(expected));

	Ok(())
}

#[test]
fn repeated_presses_cycle_through_the_container() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	let output = common::focuskit_cmd()
		.arg("tab")
		.arg(&page)
		.args(["-c", "container", "-n", "3", "--format", "json", "--path"])
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["mode"], "boundary");
	assert_eq!(json["key"], "Tab");
	assert_eq!(press_field(&json, "to"), vec![
		"input#middle",
		"a#last",
		"button#first"
	]);
	assert_eq!(press_field(&json, "outcome"), vec![
		"native", "native", "trapped"
	]);

	Ok(())
}

#[test]
fn control_tab_order_flag_moves_on_every_press() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	let output = common::focuskit_cmd()
		.arg("tab")
		.arg(&page)
		.args(["-c", "container", "-n", "3", "--control-tab-order"])
		.args(["--format", "json", "--path"])
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["mode"], "manual");
	assert_eq!(press_field(&json, "outcome"), vec![
		"trapped", "trapped", "trapped"
	]);

	Ok(())
}

#[test]
fn control_tab_order_can_come_from_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"focuskit.toml",
		"[trap]\ncontrol_tab_order = true\n",
	);
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	common::focuskit_cmd()
		.arg("tab")
		.arg(&page)
		.args(["-c", "container", "--from", "middle", "--shift", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("(manual mode)"))
		.stdout(predicates::str::contains(
			"Shift+Tab input#middle -> button#first (trapped)",
		));

	Ok(())
}

#[test]
fn empty_container_logs_a_warning() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(
		tmp.path(),
		"page.html",
		r#"<div id="empty"><p>Nothing to focus</p></div>"#,
	);

	common::focuskit_cmd()
		.arg("tab")
		.arg(&page)
		.args(["-c", "empty", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("(no focusable elements)"))
		.stderr(predicates::str::contains(
			"no focusable elements found in the container",
		));

	Ok(())
}

#[test]
fn tab_fails_for_unknown_start_element() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	common::focuskit_cmd()
		.arg("tab")
		.arg(&page)
		.args(["-c", "container", "--from", "nowhere", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no element with id `nowhere`"));

	Ok(())
}

#[test]
fn tab_requires_a_container() {
	let result = FocuskitCli::try_parse_from(["focuskit", "tab", "page.html"]);

	assert!(result.is_err());
}

#[test]
fn tab_defaults_parse() {
	let cli = FocuskitCli::parse_from(["focuskit", "tab", "page.html", "-c", "dialog"]);

	match cli.command {
		Some(Commands::Tab {
			container,
			from,
			presses,
			shift,
			control_tab_order,
			..
		}) => {
			assert_eq!(container, "dialog");
			assert_eq!(from, None);
			assert_eq!(presses, 1);
			assert!(!shift);
			assert!(!control_tab_order);
		}
		_ => panic!("expected the tab command"),
	}
}
