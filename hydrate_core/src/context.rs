use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;

use crate::Document;

/// An ordered list of absolute paths, root first. Displays as
/// `a -> b -> c`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct PathChain(Vec<PathBuf>);

impl PathChain {
	pub fn new(paths: Vec<PathBuf>) -> Self {
		Self(paths)
	}

	pub fn into_inner(self) -> Vec<PathBuf> {
		self.0
	}

	/// The file names of each entry, for compact reporting.
	pub fn file_names(&self) -> Vec<String> {
		self.0
			.iter()
			.map(|path| {
				path.file_name()
					.map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
			})
			.collect()
	}
}

impl fmt::Display for PathChain {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (index, path) in self.0.iter().enumerate() {
			if index > 0 {
				f.write_str(" -> ")?;
			}
			write!(f, "{}", path.display())?;
		}
		Ok(())
	}
}

/// Per-frame resolution state: the documents currently being expanded, the
/// directory the next directive resolves against, and how deep the frame is.
///
/// Contexts are derived, never mutated. Each recursive call gets its own
/// child, so a failed branch cannot leave stale entries on the stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
	path_stack: PathChain,
	base_directory: PathBuf,
	depth: usize,
}

impl ResolutionContext {
	/// Context for the root document: depth 0, the root itself open.
	pub fn root(document: &Document) -> Self {
		Self {
			path_stack: PathChain(vec![document.source_path.clone()]),
			base_directory: document.base_directory().to_path_buf(),
			depth: 0,
		}
	}

	/// Context for text that was not loaded from a file.
	pub fn detached(base_directory: impl Into<PathBuf>) -> Self {
		Self {
			path_stack: PathChain::default(),
			base_directory: base_directory.into(),
			depth: 0,
		}
	}

	/// Derive the context used to expand `document`, which was just loaded
	/// from a directive in this frame.
	pub fn child(&self, document: &Document) -> Self {
		debug_assert!(
			!self.path_stack.contains(&document.source_path),
			"path stack already contains {}",
			document.source_path.display()
		);

		let mut path_stack = self.path_stack.0.clone();
		path_stack.push(document.source_path.clone());

		Self {
			path_stack: PathChain(path_stack),
			base_directory: document.base_directory().to_path_buf(),
			depth: self.depth + 1,
		}
	}

	/// If `path` is already open, the chain from its first occurrence back
	/// to itself.
	pub fn cycle_through(&self, path: &Path) -> Option<PathChain> {
		let first = self.path_stack.iter().position(|open| open == path)?;
		let mut chain = self.path_stack.0[first..].to_vec();
		chain.push(path.to_path_buf());
		Some(PathChain(chain))
	}

	/// The open stack extended with `path`.
	pub fn chain_to(&self, path: &Path) -> PathChain {
		let mut chain = self.path_stack.0.clone();
		chain.push(path.to_path_buf());
		PathChain(chain)
	}

	/// The document whose directives are being resolved, if any.
	pub fn current_file(&self) -> Option<&Path> {
		self.path_stack.last().map(PathBuf::as_path)
	}

	pub fn path_stack(&self) -> &PathChain {
		&self.path_stack
	}

	pub fn base_directory(&self) -> &Path {
		&self.base_directory
	}

	pub fn depth(&self) -> usize {
		self.depth
	}
}
