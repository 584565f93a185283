use std::path::Path;
use std::path::PathBuf;

use clap::ArgGroup;
use clap::Parser;

/// Output path that sends the hydrated document to standard output.
pub const STDOUT_PATH: &str = "-";

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Embed documents within other documents using `{{path}}` directives.",
	long_about = "hydrate expands `{{path}}` directives in a text document. Each directive is \
	              replaced with the contents of the file it names, resolved relative to the file \
	              that contains the directive. Embedded text files are expanded recursively; \
	              `.csv`, `.tsv` and `.jsonl` files are rendered as markdown tables.\n\nExamples:\n  \
	              hydrate template.md -o readme.md\n  hydrate -i readme.md -o readme.md\n  \
	              hydrate template.md -o readme.md --check",
	group(ArgGroup::new("source").required(true).args(["input_positional", "input"]))
)]
pub struct HydrateCli {
	/// Document to hydrate.
	#[arg(value_name = "INPUT")]
	pub input_positional: Option<PathBuf>,

	/// Document to hydrate, as a flag. Cannot be combined with the positional
	/// input.
	#[arg(long, short, value_name = "INPUT")]
	pub input: Option<PathBuf>,

	/// Where to write the hydrated document. Use `-` for standard output.
	///
	/// An existing file is only overwritten when it is the input itself.
	#[arg(long, short)]
	pub output: PathBuf,

	/// Deepest allowed embed. Overrides `max_depth` from the config file.
	#[arg(long, short = 'd', value_name = "DEPTH")]
	pub max_depth: Option<usize>,

	/// Path to a config file. Defaults to `hydrate.toml`, `.hydrate.toml` or
	/// `.config/hydrate.toml` in the working directory.
	#[arg(long, short)]
	pub config: Option<PathBuf>,

	/// Do not write anything. Exit with a non-zero status when the output
	/// differs from the hydrated document.
	#[arg(long, default_value_t = false)]
	pub check: bool,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

impl HydrateCli {
	/// The input document, whichever way it was given.
	pub fn input_path(&self) -> Option<&Path> {
		self.input_positional
			.as_deref()
			.or(self.input.as_deref())
	}

	/// Whether the hydrated document goes to standard output.
	pub fn writes_to_stdout(&self) -> bool {
		self.output.as_os_str() == STDOUT_PATH
	}
}
