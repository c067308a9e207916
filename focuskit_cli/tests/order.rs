mod common;

use clap::Parser;
use focuskit_cli::Commands;
use focuskit_cli::FocuskitCli;
use focuskit_cli::OutputFormat;
use focuskit_core::AnyEmptyResult;
use serde_json::Value;

fn element_labels(output: &Value) -> Vec<String> {
	output["elements"]
		.as_array()
		.map(|elements| {
			elements
				.iter()
				.filter_map(|element| element["element"].as_str().map(ToString::to_string))
				.collect()
		})
		.unwrap_or_default()
}

#[test]
fn order_prints_the_document_focus_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	common::focuskit_cmd()
		.arg("order")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Focus order for body"))
		.stdout(predicates::str::contains("1. button#first"))
		.stdout(predicates::str::contains("4. button#outside"));

	Ok(())
}

#[test]
fn order_json_lists_container_elements() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	let output = common::focuskit_cmd()
		.arg("order")
		.arg(&page)
		.args(["--container", "container", "--format", "json", "--path"])
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["container"], "div#container");
	assert_eq!(json["count"], 3);
	assert_eq!(element_labels(&json), vec![
		"button#first",
		"input#middle",
		"a#last"
	]);

	Ok(())
}

#[test]
fn order_puts_positive_tabindex_first() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(
		tmp.path(),
		"page.html",
		r#"<button id="plain">Plain</button><span id="jump" tabindex="2">Jump</span>"#,
	);

	common::focuskit_cmd()
		.arg("order")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("1. span#jump (tabindex 2)"))
		.stdout(predicates::str::contains("2. button#plain"));

	Ok(())
}

#[test]
fn order_uses_components_from_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		"focuskit.toml",
		"[components]\nfocusable = [\"my-toggle\"]\n",
	);
	let page = common::write_file(
		tmp.path(),
		"page.html",
		r#"<my-toggle id="toggle"><button id="inner">Inner</button></my-toggle>"#,
	);

	let output = common::focuskit_cmd()
		.arg("order")
		.arg(&page)
		.args(["--format", "json", "--path"])
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(element_labels(&json), vec!["my-toggle#toggle"]);

	Ok(())
}

#[test]
fn order_warns_when_nothing_is_focusable() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", "<p>Just text</p>");

	common::focuskit_cmd()
		.arg("order")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("no focusable elements in body"));

	Ok(())
}

#[test]
fn order_fails_for_unknown_container() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	common::focuskit_cmd()
		.arg("order")
		.arg(&page)
		.args(["--container", "missing", "--path"])
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no element with id `missing`"));

	Ok(())
}

#[test]
fn order_fails_for_invalid_markup() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", "<div><button>Open");

	common::focuskit_cmd()
		.arg("order")
		.arg(&page)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("unclosed element `<button>`"));

	Ok(())
}

#[test]
fn order_fails_for_missing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::focuskit_cmd()
		.arg("order")
		.arg(tmp.path().join("missing.html"))
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2);

	Ok(())
}

#[test]
fn verbose_reports_missing_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page = common::write_file(tmp.path(), "page.html", common::TRAP_PAGE);

	common::focuskit_cmd()
		.arg("order")
		.arg(&page)
		.args(["--verbose", "--path"])
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("No config file found"));

	Ok(())
}

#[test]
fn order_defaults_parse() {
	let cli = FocuskitCli::parse_from(["focuskit", "order", "page.html"]);

	match cli.command {
		Some(Commands::Order {
			file,
			container,
			format,
		}) => {
			assert_eq!(file.to_str(), Some("page.html"));
			assert_eq!(container, None);
			assert_eq!(format, OutputFormat::Text);
		}
		_ => panic!("expected the order command"),
	}
}
