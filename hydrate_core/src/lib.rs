//! `hydrate_core` expands `{{path}}` embed directives in text documents. Every
//! directive is replaced with the contents of the file it names, and text
//! files are expanded recursively before they are spliced in.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Root document
//!   → Directive scanner (finds `{{path}}` tokens, left to right)
//!   → Path resolver (joins onto the containing file's directory, canonicalizes)
//!   → Cycle and depth checks (against the resolution context)
//!   → Loader + binary detector (reads the file, refuses binary content)
//!   → Format converter (CSV / TSV / JSONL → markdown table, else recurse)
//!   → Splice (replacement text written into the output buffer)
//! ```
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading from `hydrate.toml`.
//!
//! ## Key Types
//!
//! - [`Hydrator`]: The recursive engine, generic over a [`FileLoader`].
//! - [`ResolutionContext`]: Open-path stack, base directory and depth of one
//!   recursion frame.
//! - [`FileFormat`]: Extension-based choice between table conversion and
//!   recursive expansion.
//! - [`BinaryDetector`]: Heuristic that keeps binary files out of the
//!   output.
//! - [`OutputGuard`]: Refuses to overwrite an existing file other than the
//!   input.
//! - [`HydrateError`]: Every way a run can fail.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hydrate_core::HydrateOptions;
//! use hydrate_core::Hydrator;
//! use hydrate_core::OsFileSystem;
//! use hydrate_core::OutputGuard;
//! use std::path::Path;
//!
//! let input = Path::new("template.md");
//! let output = Path::new("readme.md");
//!
//! let hydrated = Hydrator::new(HydrateOptions::default()).hydrate_file(input).unwrap();
//! OutputGuard::new(input).permit(output, &OsFileSystem).unwrap();
//! std::fs::write(output, hydrated).unwrap();
//! ```

pub use binary::*;
pub use context::*;
pub use convert::*;
pub use directive::*;
pub use document::*;
pub use engine::*;
pub use error::*;
pub use guard::*;
pub use loader::*;
pub use resolver::*;

mod binary;
pub mod config;
mod context;
mod convert;
mod directive;
mod document;
mod engine;
#[allow(unused_assignments)]
mod error;
mod guard;
pub(crate) mod lexer;
mod loader;
mod resolver;

#[cfg(test)]
mod __fixtures;
