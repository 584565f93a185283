use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::FileLoader;
use crate::HydrateError;
use crate::HydrateResult;

/// Why a write to the output path is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPermit {
	/// Nothing exists at the output path yet.
	NewFile,
	/// The output is the input file itself.
	InPlace,
}

/// Write policy for the hydrated document: never clobber an existing file
/// unless it is the input being updated in place.
///
/// Consulted once, after hydration succeeded and before anything is written.
#[derive(Debug, Clone)]
pub struct OutputGuard {
	input: PathBuf,
}

impl OutputGuard {
	pub fn new(input: impl Into<PathBuf>) -> Self {
		Self {
			input: input.into(),
		}
	}

	pub fn input(&self) -> &Path {
		&self.input
	}

	/// Decide whether `output` may be written.
	pub fn permit<L: FileLoader>(&self, output: &Path, loader: &L) -> HydrateResult<OutputPermit> {
		let existing = match loader.canonicalize(output) {
			Ok(canonical) => canonical,
			Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(OutputPermit::NewFile),
			Err(e) => {
				return Err(HydrateError::ReadFailed {
					path: output.to_path_buf(),
					reason: e.to_string(),
				});
			}
		};

		let input = loader
			.canonicalize(&self.input)
			.unwrap_or_else(|_| self.input.clone());

		if existing == input {
			tracing::debug!(path = %existing.display(), "updating input in place");
			Ok(OutputPermit::InPlace)
		} else {
			Err(HydrateError::OutputExists {
				path: output.to_path_buf(),
			})
		}
	}
}
