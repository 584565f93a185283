use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use crate::FileLoader;
use crate::HydrateError;
use crate::HydrateResult;

/// Turn the text of a directive into a canonical absolute path.
///
/// Relative paths are joined onto `base_directory`, never onto the working
/// directory of the process. Existing files are canonicalized through the
/// loader so that different spellings of the same file compare equal, and
/// symlinks are followed before any `..` is applied. A path that does not
/// exist resolves to its lexically normalized form and is reported as
/// missing when it is loaded.
pub fn resolve_path<L: FileLoader>(
	raw_path_text: &str,
	base_directory: &Path,
	loader: &L,
) -> HydrateResult<PathBuf> {
	let reference = raw_path_text.trim();
	if reference.is_empty() {
		return Err(HydrateError::PathResolution {
			reference: raw_path_text.to_string(),
			reason: "the path is empty".to_string(),
		});
	}

	let joined = base_directory.join(reference);
	match loader.canonicalize(&joined) {
		Ok(canonical) => Ok(canonical),
		Err(e) if e.kind() == io::ErrorKind::NotFound => {
			normalize_path(&joined).ok_or_else(|| {
				HydrateError::PathResolution {
					reference: reference.to_string(),
					reason: format!(
						"`..` climbs above the root of `{}`",
						base_directory.display()
					),
				}
			})
		}
		Err(e) => {
			Err(HydrateError::PathResolution {
				reference: reference.to_string(),
				reason: e.to_string(),
			})
		}
	}
}

/// Lexically remove `.` and `..` segments. Returns `None` when a `..` would
/// step above the root.
pub fn normalize_path(path: &Path) -> Option<PathBuf> {
	let mut normalized = PathBuf::new();
	let mut depth = 0usize;

	for component in path.components() {
		match component {
			Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
			Component::CurDir => {}
			Component::ParentDir => {
				if depth == 0 {
					return None;
				}
				normalized.pop();
				depth -= 1;
			}
			Component::Normal(segment) => {
				normalized.push(segment);
				depth += 1;
			}
		}
	}

	Some(normalized)
}
