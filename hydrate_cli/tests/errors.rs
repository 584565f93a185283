use hydrate_core::AnyEmptyResult;
use predicates::str::contains;
use similar_asserts::assert_eq;

mod common;

use common::hydrate_cmd;
use common::write_file;

#[test]
fn missing_input_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	hydrate_cmd()
		.current_dir(tmp.path())
		.args(["nope.md", "-o", "out.md"])
		.assert()
		.failure()
		.code(1)
		.stderr(contains("file not found"))
		.stderr(contains("nope.md"));

	assert!(!tmp.path().join("out.md").exists());

	Ok(())
}

#[test]
fn input_is_required() {
	hydrate_cmd()
		.args(["-o", "out.md"])
		.assert()
		.failure()
		.stderr(contains("required"));
}

#[test]
fn output_is_required() {
	hydrate_cmd()
		.arg("main.md")
		.assert()
		.failure()
		.stderr(contains("--output"));
}

#[test]
fn positional_and_flag_input_conflict() {
	hydrate_cmd()
		.args(["a.md", "-i", "b.md", "-o", "out.md"])
		.assert()
		.failure()
		.stderr(contains("cannot be used with"));
}

#[test]
fn existing_output_is_not_overwritten() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "main.md", "fresh");
	write_file(tmp.path(), "out.md", "keep me");

	hydrate_cmd()
		.current_dir(tmp.path())
		.args(["main.md", "-o", "out.md"])
		.assert()
		.failure()
		.code(1)
		.stderr(contains("output file already exists"));

	assert_eq!(std::fs::read_to_string(tmp.path().join("out.md"))?, "keep me");

	Ok(())
}

#[test]
fn missing_embed_reports_referencing_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "main.md", "{{ gone.md }}");

	hydrate_cmd()
		.current_dir(tmp.path())
		.args(["main.md", "-o", "out.md"])
		.assert()
		.failure()
		.code(1)
		.stderr(contains("gone.md"))
		.stderr(contains("main.md"));

	assert!(!tmp.path().join("out.md").exists());

	Ok(())
}

#[test]
fn circular_reference_fails_without_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "a.txt", "{{b.txt}}");
	write_file(tmp.path(), "b.txt", "{{a.txt}}");

	hydrate_cmd()
		.current_dir(tmp.path())
		.args(["a.txt", "-o", "out.txt"])
		.assert()
		.failure()
		.code(1)
		.stderr(contains("circular reference detected"))
		.stderr(contains("a.txt"))
		.stderr(contains("b.txt"));

	assert!(!tmp.path().join("out.txt").exists());

	Ok(())
}

#[test]
fn binary_embed_is_refused() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "main.md", "{{logo.png}}");
	std::fs::write(tmp.path().join("logo.png"), b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR")?;

	hydrate_cmd()
		.current_dir(tmp.path())
		.args(["main.md", "-o", "out.md"])
		.assert()
		.failure()
		.code(1)
		.stderr(contains("cannot embed binary file"));

	Ok(())
}

#[test]
fn invalid_config_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "hydrate.toml", "max_depth = \"deep\"\n");
	write_file(tmp.path(), "main.md", "plain");

	hydrate_cmd()
		.current_dir(tmp.path())
		.args(["main.md", "-o", "out.md"])
		.assert()
		.failure()
		.code(1)
		.stderr(contains("failed to parse config file"));

	Ok(())
}

#[test]
fn check_requires_output_file() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_file(tmp.path(), "main.md", "plain");
	write_file(tmp.path(), "-", "plain");

	hydrate_cmd()
		.current_dir(tmp.path())
		.args(["main.md", "-o", "-", "--check"])
		.assert()
		.failure()
		.code(1)
		.stdout("")
		.stderr(contains("cannot be used with `--output -`"));

	Ok(())
}
