use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use crate::FileLoader;
use crate::HydrateOptions;
use crate::Hydrator;
use crate::normalize_path;

/// In-memory [`FileLoader`]. Paths are normalized lexically; there are no
/// symlinks.
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
	files: HashMap<PathBuf, Vec<u8>>,
}

impl MemoryLoader {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_file(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
		self.files.insert(PathBuf::from(path), content.into());
		self
	}
}

impl FileLoader for MemoryLoader {
	fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
		let normalized = normalize_path(path)
			.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "escapes root"))?;

		if self.files.contains_key(&normalized) {
			Ok(normalized)
		} else {
			Err(io::Error::new(io::ErrorKind::NotFound, "no such file"))
		}
	}

	fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
		self.files
			.get(path)
			.cloned()
			.ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
	}
}

pub fn memory_hydrator(loader: MemoryLoader) -> Hydrator<MemoryLoader> {
	Hydrator::with_loader(loader, HydrateOptions::default())
}

/// A loader holding `main.md` plus a chain of `levelN.md` files, where the
/// root embeds `level1.md` and each level embeds the next. The last level is
/// `level{embeds}.md` and contains plain text.
pub fn chain_loader(embeds: usize) -> MemoryLoader {
	let mut loader = MemoryLoader::new().with_file("/chain/main.md", "{{level1.md}}");
	for level in 1..=embeds {
		let content = if level == embeds {
			"bottom".to_string()
		} else {
			format!("{{{{level{}.md}}}}", level + 1)
		};
		loader = loader.with_file(&format!("/chain/level{level}.md"), content);
	}
	loader
}

/// Write `content` to `relative` under `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
	let path = root.join(relative);
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)
			.unwrap_or_else(|e| panic!("create_dir_all {}: {e}", parent.display()));
	}
	std::fs::write(&path, content).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
	path
}
