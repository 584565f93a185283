use std::path::Path;

use serde_json::Map;
use serde_json::Value;

use crate::lexer::Delimiter;
use crate::lexer::tokenize_records;

/// How a loaded file is embedded, chosen once from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
	/// `.csv`: comma separated, rendered as a table.
	Csv,
	/// `.tsv`: tab separated, rendered as a table.
	Tsv,
	/// `.jsonl`: one JSON object per line, rendered as a table.
	Jsonl,
	/// Anything else. Embedded as text and expanded recursively.
	Passthrough,
}

impl FileFormat {
	/// Classify by extension, ignoring case.
	pub fn from_path(path: &Path) -> Self {
		let extension = path
			.extension()
			.and_then(|e| e.to_str())
			.unwrap_or("")
			.to_ascii_lowercase();

		match extension.as_str() {
			"csv" => Self::Csv,
			"tsv" => Self::Tsv,
			"jsonl" => Self::Jsonl,
			_ => Self::Passthrough,
		}
	}

	/// Structured formats are leaves of the embed graph: their content is
	/// never scanned for directives.
	pub fn is_tabular(self) -> bool {
		!matches!(self, Self::Passthrough)
	}
}

/// The text produced for a loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
	/// A rendered markdown table.
	Table(String),
	/// The original content, unchanged.
	Verbatim(String),
}

impl Conversion {
	pub fn into_text(self) -> String {
		match self {
			Self::Table(text) | Self::Verbatim(text) => text,
		}
	}

	pub fn is_table(&self) -> bool {
		matches!(self, Self::Table(_))
	}
}

/// Convert `content` according to `format`. Content that cannot be parsed
/// as the declared format degrades to [`Conversion::Verbatim`].
pub fn convert_content(format: FileFormat, content: &str) -> Conversion {
	let table = match format {
		FileFormat::Csv => convert_csv(content),
		FileFormat::Tsv => convert_tsv(content),
		FileFormat::Jsonl => convert_jsonl(content),
		FileFormat::Passthrough => None,
	};

	match table {
		Some(table) => Conversion::Table(table),
		None => Conversion::Verbatim(content.to_string()),
	}
}

/// Render comma separated content as a markdown table. The first record is
/// the header. Returns `None` when the content cannot be tokenized.
pub fn convert_csv(content: &str) -> Option<String> {
	convert_delimited(content, Delimiter::Comma)
}

/// Render tab separated content as a markdown table.
pub fn convert_tsv(content: &str) -> Option<String> {
	convert_delimited(content, Delimiter::Tab)
}

fn convert_delimited(content: &str, delimiter: Delimiter) -> Option<String> {
	let mut records = tokenize_records(content, delimiter).ok()?.into_iter();
	let Some(headers) = records.next() else {
		return Some(String::new());
	};
	let rows: Vec<Vec<String>> = records.collect();

	Some(render_markdown_table(&headers, &rows))
}

/// Render JSON lines as a markdown table. The keys of the first object, in
/// order, are the header; later objects fill matching columns, missing keys
/// are empty and extra keys are dropped.
///
/// Returns `None` when any non-blank line is not a JSON object.
pub fn convert_jsonl(content: &str) -> Option<String> {
	let mut objects = Vec::new();
	for line in content.lines().map(str::trim).filter(|line| !line.is_empty()) {
		let Ok(Value::Object(object)) = serde_json::from_str::<Value>(line) else {
			return None;
		};
		objects.push(object);
	}

	let Some(first) = objects.first() else {
		return Some(String::new());
	};

	let headers: Vec<String> = first.keys().cloned().collect();
	let rows: Vec<Vec<String>> = objects
		.iter()
		.map(|object| row_for_headers(object, &headers))
		.collect();

	Some(render_markdown_table(&headers, &rows))
}

fn row_for_headers(object: &Map<String, Value>, headers: &[String]) -> Vec<String> {
	headers
		.iter()
		.map(|key| object.get(key).map(cell_text).unwrap_or_default())
		.collect()
}

fn cell_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

/// Render a markdown table. Every row is padded or truncated to the header's
/// column count. An empty header yields an empty string.
pub fn render_markdown_table(headers: &[String], rows: &[Vec<String>]) -> String {
	if headers.is_empty() {
		return String::new();
	}

	let columns = headers.len();
	let mut lines = Vec::with_capacity(rows.len() + 2);
	lines.push(render_row(headers.iter().map(String::as_str)));
	lines.push(render_row(std::iter::repeat_n("---", columns)));

	for row in rows {
		let cells = row
			.iter()
			.map(String::as_str)
			.chain(std::iter::repeat(""))
			.take(columns);
		lines.push(render_row(cells));
	}

	lines.join("\n")
}

fn render_row<'a>(cells: impl Iterator<Item = &'a str>) -> String {
	let cells: Vec<String> = cells.map(escape_cell).collect();
	format!("| {} |", cells.join(" | "))
}

/// Escape pipes and fold line breaks so a cell cannot break the table.
fn escape_cell(cell: &str) -> String {
	cell.replace('|', "\\|")
		.replace("\r\n", "<br>")
		.replace(['\n', '\r'], "<br>")
}
