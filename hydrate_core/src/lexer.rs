use logos::Logos;

/// Raw tokens for delimiter-separated text. Both delimiters are always
/// tokenized; the walker decides which one splits fields.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
enum RawToken {
	#[token(",")]
	Comma,
	#[token("\t")]
	Tab,
	#[regex(r"\r\n|\n|\r")]
	Newline,
	#[regex(r#""([^"]|"")*""#)]
	Quoted,
	/// A `"` that does not start a complete quoted field.
	#[token("\"")]
	StrayQuote,
	/// Unquoted text. A `"` after the first character is part of the text.
	#[regex(r#"[^,\t\r\n"][^,\t\r\n]*"#)]
	Bare,
}

/// The field separator of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delimiter {
	Comma,
	Tab,
}

impl Delimiter {
	fn splits(self, token: RawToken) -> bool {
		matches!(
			(self, token),
			(Self::Comma, RawToken::Comma) | (Self::Tab, RawToken::Tab)
		)
	}
}

/// A quoted field was opened but never closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnterminatedQuote {
	pub offset: usize,
}

/// Walks the logos token stream and assembles records.
struct RecordWalker<'a> {
	source: &'a str,
	delimiter: Delimiter,
	records: Vec<Vec<String>>,
	record: Vec<String>,
	field: String,
	/// Whether anything has been seen for the current field, so an empty
	/// trailing field (`a,`) is still counted.
	field_started: bool,
}

impl<'a> RecordWalker<'a> {
	fn new(source: &'a str, delimiter: Delimiter) -> Self {
		Self {
			source,
			delimiter,
			records: vec![],
			record: vec![],
			field: String::new(),
			field_started: false,
		}
	}

	fn end_field(&mut self) {
		self.record.push(std::mem::take(&mut self.field));
		self.field_started = false;
	}

	/// Close the current record. Lines with no content at all are dropped.
	fn end_record(&mut self) {
		if self.record.is_empty() && !self.field_started {
			return;
		}

		self.end_field();
		self.records.push(std::mem::take(&mut self.record));
	}

	fn push_text(&mut self, text: &str) {
		self.field.push_str(text);
		self.field_started = true;
	}

	fn process(mut self) -> Result<Vec<Vec<String>>, UnterminatedQuote> {
		let source = self.source;

		for (result, span) in RawToken::lexer(source).spanned() {
			let slice = &source[span.clone()];

			// Every byte starts some token. Anything logos still rejects is text.
			let Ok(token) = result else {
				self.push_text(slice);
				continue;
			};

			match token {
				RawToken::StrayQuote if !self.field_started => {
					return Err(UnterminatedQuote { offset: span.start });
				}
				RawToken::Comma | RawToken::Tab if self.delimiter.splits(token) => {
					self.end_field();
				}
				RawToken::Newline => self.end_record(),
				RawToken::Quoted if !self.field_started => {
					let inner = &slice[1..slice.len() - 1];
					let value = inner.replace("\"\"", "\"");
					self.push_text(&value);
				}
				RawToken::Comma
				| RawToken::Tab
				| RawToken::Quoted
				| RawToken::StrayQuote
				| RawToken::Bare => {
					self.push_text(slice);
				}
			}
		}

		self.end_record();
		Ok(self.records)
	}
}

/// Split delimiter-separated `source` into records of fields.
pub(crate) fn tokenize_records(
	source: &str,
	delimiter: Delimiter,
) -> Result<Vec<Vec<String>>, UnterminatedQuote> {
	RecordWalker::new(source, delimiter).process()
}
