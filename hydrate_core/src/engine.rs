use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::BinaryDetector;
use crate::Conversion;
use crate::DirectiveScanner;
use crate::Document;
use crate::EmbedDirective;
use crate::FileFormat;
use crate::FileLoader;
use crate::HydrateError;
use crate::HydrateResult;
use crate::OsFileSystem;
use crate::ResolutionContext;
use crate::convert_content;
use crate::resolve_path;

/// Default ceiling on nested embeds.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Knobs for a hydration run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrateOptions {
	/// Deepest allowed embed. The root document is depth 0 and every embed
	/// adds one.
	pub max_depth: usize,
	/// Classifier applied to every loaded file.
	pub detector: BinaryDetector,
}

impl Default for HydrateOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
			detector: BinaryDetector::default(),
		}
	}
}

impl HydrateOptions {
	#[must_use]
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	#[must_use]
	pub fn with_detector(mut self, detector: BinaryDetector) -> Self {
		self.detector = detector;
		self
	}
}

/// The recursive expansion driver.
///
/// Directives are processed left to right, depth first. Every structural
/// failure aborts the whole run, so a caller either gets the fully expanded
/// text or an error and never a partial document.
#[derive(Debug, Clone)]
pub struct Hydrator<L = OsFileSystem> {
	loader: L,
	options: HydrateOptions,
}

impl Hydrator<OsFileSystem> {
	/// A hydrator reading from the real file system.
	pub fn new(options: HydrateOptions) -> Self {
		Self::with_loader(OsFileSystem, options)
	}
}

impl Default for Hydrator<OsFileSystem> {
	fn default() -> Self {
		Self::new(HydrateOptions::default())
	}
}

impl<L: FileLoader> Hydrator<L> {
	pub fn with_loader(loader: L, options: HydrateOptions) -> Self {
		Self { loader, options }
	}

	pub fn options(&self) -> &HydrateOptions {
		&self.options
	}

	pub fn loader(&self) -> &L {
		&self.loader
	}

	/// Load the document at `path` and expand every directive in it.
	pub fn hydrate_file(&self, path: &Path) -> HydrateResult<String> {
		let reference = path.display().to_string();
		let source_path = match self.loader.canonicalize(path) {
			Ok(canonical) => canonical,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				return Err(HydrateError::MissingFile {
					path: std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
					reference,
					referenced_in: None,
				});
			}
			Err(e) => {
				return Err(HydrateError::ReadFailed {
					path: path.to_path_buf(),
					reason: e.to_string(),
				});
			}
		};

		let document = self.load_document(source_path, &reference, None)?;
		self.hydrate_document(&document)
	}

	/// Expand an already loaded document.
	pub fn hydrate_document(&self, document: &Document) -> HydrateResult<String> {
		let context = ResolutionContext::root(document);
		self.expand(&document.raw_content, &context)
	}

	/// Expand `content` that did not come from a file. Its directives resolve
	/// against `base_directory` and nothing is open on the path stack.
	pub fn hydrate_content(&self, content: &str, base_directory: &Path) -> HydrateResult<String> {
		let base_directory = std::path::absolute(base_directory)?;
		let context = ResolutionContext::detached(base_directory);
		self.expand(content, &context)
	}

	/// Expand every directive of one document under `context`.
	fn expand(&self, content: &str, context: &ResolutionContext) -> HydrateResult<String> {
		let mut output = String::with_capacity(content.len());
		let mut cursor = 0;

		for directive in DirectiveScanner::new(content) {
			tracing::trace!(
				path = directive.raw_path_text,
				offset = directive.start_offset,
				"found directive"
			);

			output.push_str(&content[cursor..directive.start_offset]);
			output.push_str(&self.embed(&directive, context)?);
			cursor = directive.end_offset;
		}

		output.push_str(&content[cursor..]);
		Ok(output)
	}

	/// Produce the replacement text for a single directive.
	fn embed(
		&self,
		directive: &EmbedDirective<'_>,
		context: &ResolutionContext,
	) -> HydrateResult<String> {
		let path = resolve_path(
			directive.raw_path_text,
			context.base_directory(),
			&self.loader,
		)?;

		if let Some(chain) = context.cycle_through(&path) {
			return Err(HydrateError::CircularReference { chain });
		}

		if context.depth() + 1 > self.options.max_depth {
			return Err(HydrateError::MaxDepthExceeded {
				max_depth: self.options.max_depth,
				chain: context.chain_to(&path),
			});
		}

		let document = self.load_document(
			path,
			directive.raw_path_text.trim(),
			context.current_file(),
		)?;
		let format = FileFormat::from_path(&document.source_path);

		tracing::debug!(
			path = %document.source_path.display(),
			depth = context.depth() + 1,
			?format,
			"embedding file"
		);

		if format.is_tabular() {
			let conversion = convert_content(format, &document.raw_content);
			if let Conversion::Verbatim(_) = conversion {
				tracing::debug!(
					path = %document.source_path.display(),
					"could not parse structured file, embedding verbatim"
				);
			}
			return Ok(conversion.into_text());
		}

		self.expand(&document.raw_content, &context.child(&document))
	}

	/// Read and decode a file, refusing binary content.
	fn load_document(
		&self,
		path: PathBuf,
		reference: &str,
		referenced_in: Option<&Path>,
	) -> HydrateResult<Document> {
		let bytes = match self.loader.load(&path) {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				return Err(HydrateError::MissingFile {
					path,
					reference: reference.to_string(),
					referenced_in: referenced_in.map(Path::to_path_buf),
				});
			}
			Err(e) => {
				return Err(HydrateError::ReadFailed {
					path,
					reason: e.to_string(),
				});
			}
		};

		if self.options.detector.is_binary(&bytes) {
			return Err(HydrateError::BinaryFile { path });
		}

		let Ok(raw_content) = String::from_utf8(bytes) else {
			return Err(HydrateError::BinaryFile { path });
		};

		tracing::debug!(path = %path.display(), bytes = raw_content.len(), "loaded document");
		Ok(Document::new(path, raw_content))
	}
}
