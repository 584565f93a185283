use std::io;
use std::path::Path;
use std::path::PathBuf;

/// Read access to the files a hydration run embeds.
///
/// The engine and the [`OutputGuard`](crate::OutputGuard) never touch
/// `std::fs` directly. Everything goes through this trait so the recursion can
/// be driven from memory in tests.
pub trait FileLoader {
	/// Resolve symlinks and `.`/`..` segments into an absolute path. Must fail
	/// with [`io::ErrorKind::NotFound`] when the path does not exist.
	fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

	/// Read the raw bytes of the file at `path`.
	fn load(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// [`FileLoader`] backed by the real file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileLoader for OsFileSystem {
	fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
		std::fs::canonicalize(path)
	}

	fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
		std::fs::read(path)
	}
}

impl<L: FileLoader + ?Sized> FileLoader for &L {
	fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
		(**self).canonicalize(path)
	}

	fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
		(**self).load(path)
	}
}
