mod common;

use focuskit_core::AnyEmptyResult;
use serde_json::Value;

#[test]
fn components_lists_the_built_in_registry() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::focuskit_cmd()
		.arg("components")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Focusable components (11)"))
		.stdout(predicates::str::contains("  auro-button"))
		.stdout(predicates::str::contains("  auro-hyperlink"));

	Ok(())
}

#[test]
fn components_applies_config_changes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(
		tmp.path(),
		".focuskit.toml",
		"[components]\nfocusable = [\"my-toggle\"]\nexclude = [\"auro-accordion\"]\n",
	);

	let output = common::focuskit_cmd()
		.args(["components", "--format", "json", "--path"])
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let json: Value = serde_json::from_slice(&output.stdout)?;
	let components: Vec<&str> = json["components"]
		.as_array()
		.map(|tags| tags.iter().filter_map(Value::as_str).collect())
		.unwrap_or_default();

	assert_eq!(json["count"], 11);
	assert!(components.contains(&"my-toggle"));
	assert!(!components.contains(&"auro-accordion"));

	Ok(())
}

#[test]
fn invalid_config_exits_with_an_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_file(tmp.path(), "focuskit.toml", "[trap\ncontrol_tab_order = true\n");

	common::focuskit_cmd()
		.arg("components")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}

#[test]
fn missing_subcommand_exits_with_usage_hint() {
	common::focuskit_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("No subcommand specified"));
}
