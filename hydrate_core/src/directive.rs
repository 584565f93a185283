/// A `{{path}}` directive located inside a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedDirective<'a> {
	/// Byte offset of the opening `{{`.
	pub start_offset: usize,
	/// Byte offset just past the closing `}}`.
	pub end_offset: usize,
	/// The text between the braces, exactly as written.
	pub raw_path_text: &'a str,
}

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Iterator over the non-overlapping directives in `source`, left to right.
///
/// A directive is `{{`, one or more characters other than `}`, then `}}`.
/// Anything that does not fit the pattern is plain text.
#[derive(Debug, Clone)]
pub struct DirectiveScanner<'a> {
	source: &'a str,
	cursor: usize,
}

impl<'a> DirectiveScanner<'a> {
	pub fn new(source: &'a str) -> Self {
		Self { source, cursor: 0 }
	}
}

impl<'a> Iterator for DirectiveScanner<'a> {
	type Item = EmbedDirective<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		while self.cursor < self.source.len() {
			let start = self.cursor + self.source[self.cursor..].find(OPEN)?;
			let body_start = start + OPEN.len();

			// The body ends at the first `}`; it has to be non-empty and
			// followed by a second `}`.
			let matched = self.source[body_start..]
				.find('}')
				.map(|len| body_start + len)
				.filter(|&body_end| {
					body_end > body_start && self.source[body_end..].starts_with(CLOSE)
				});

			let Some(body_end) = matched else {
				// `{` is one byte, so this stays on a char boundary.
				self.cursor = start + 1;
				continue;
			};

			let end = body_end + CLOSE.len();
			self.cursor = end;

			return Some(EmbedDirective {
				start_offset: start,
				end_offset: end,
				raw_path_text: &self.source[body_start..body_end],
			});
		}

		None
	}
}

/// Collect every directive in `source`.
pub fn scan_directives(source: &str) -> Vec<EmbedDirective<'_>> {
	DirectiveScanner::new(source).collect()
}
