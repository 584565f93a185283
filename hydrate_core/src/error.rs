use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::PathChain;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum HydrateError {
	#[error(transparent)]
	#[diagnostic(code(hydrate::io_error))]
	Io(#[from] std::io::Error),

	#[error(
		"file not found: `{reference}` (resolved to `{}`){}",
		.path.display(),
		referenced_in_suffix(.referenced_in.as_ref())
	)]
	#[diagnostic(
		code(hydrate::missing_file),
		help("embed paths resolve relative to the file that contains the directive")
	)]
	MissingFile {
		path: PathBuf,
		reference: String,
		referenced_in: Option<PathBuf>,
	},

	#[error("circular reference detected: {chain}")]
	#[diagnostic(
		code(hydrate::circular_reference),
		help("remove one of the `{{{{...}}}}` directives that closes the cycle")
	)]
	CircularReference { chain: PathChain },

	#[error("maximum embedding depth ({max_depth}) exceeded: {chain}")]
	#[diagnostic(
		code(hydrate::max_depth_exceeded),
		help("raise the limit with `--max-depth` or `max_depth` in hydrate.toml")
	)]
	MaxDepthExceeded { max_depth: usize, chain: PathChain },

	#[error("cannot embed binary file: `{}`", .path.display())]
	#[diagnostic(
		code(hydrate::binary_file),
		help("only text files can be embedded")
	)]
	BinaryFile { path: PathBuf },

	#[error("output file already exists: `{}`", .path.display())]
	#[diagnostic(
		code(hydrate::output_exists),
		help("use the same path for input and output to update in place")
	)]
	OutputExists { path: PathBuf },

	#[error("cannot resolve embed path `{reference}`: {reason}")]
	#[diagnostic(code(hydrate::path_resolution))]
	PathResolution { reference: String, reason: String },

	#[error("failed to read `{}`: {reason}", .path.display())]
	#[diagnostic(code(hydrate::read_failed))]
	ReadFailed { path: PathBuf, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(hydrate::config_parse),
		help("check that hydrate.toml is valid TOML with `max_depth` and/or a [binary] section")
	)]
	ConfigParse(String),
}

fn referenced_in_suffix(referenced_in: Option<&PathBuf>) -> String {
	referenced_in
		.map(|source| format!(" referenced in `{}`", source.display()))
		.unwrap_or_default()
}

pub type HydrateResult<T> = Result<T, HydrateError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
