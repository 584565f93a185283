use std::path::Path;
use std::path::PathBuf;

/// A loaded text file. Never mutated after loading; embedding the same path
/// from a second place loads it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
	/// Canonical absolute path of the file.
	pub source_path: PathBuf,
	/// The decoded UTF-8 content.
	pub raw_content: String,
}

impl Document {
	pub fn new(source_path: impl Into<PathBuf>, raw_content: impl Into<String>) -> Self {
		Self {
			source_path: source_path.into(),
			raw_content: raw_content.into(),
		}
	}

	/// The directory that the document's own directives resolve against.
	pub fn base_directory(&self) -> &Path {
		self.source_path.parent().unwrap_or(Path::new("/"))
	}
}
