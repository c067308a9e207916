use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

#[allow(dead_code)]
pub const TRAP_PAGE: &str = r##"<main>
	<div id="container">
		<button id="first">First</button>
		<input id="middle" type="text">
		<a href="#" id="last">Last</a>
	</div>
	<button id="outside">Outside</button>
</main>
"##;

pub fn focuskit_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("focuskit"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

/// Write `content` to `name` inside `dir`, returning the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
	let path = dir.join(name);
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("failed to write {name}: {e}"));
	path
}
