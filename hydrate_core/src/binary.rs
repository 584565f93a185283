/// Number of leading bytes inspected by default.
pub const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Default share of control bytes in the sample above which a file is treated
/// as binary.
pub const DEFAULT_MAX_CONTROL_RATIO: f64 = 0.30;

/// Heuristic text/binary classifier.
///
/// A file is binary when its sample contains a NUL byte, or when more than
/// `max_control_ratio` of the sampled bytes are control characters that do not
/// occur in ordinary text. Bytes `>= 0x80` count as text so that UTF-8 passes.
///
/// This only looks at a prefix, so a file with a clean header and binary
/// payload further in can be misclassified as text. Such a file still fails
/// UTF-8 decoding in the engine unless the payload happens to be valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryDetector {
	/// How many leading bytes to inspect.
	pub sample_size: usize,
	/// Maximum tolerated share of control bytes, between `0.0` and `1.0`.
	pub max_control_ratio: f64,
}

impl Default for BinaryDetector {
	fn default() -> Self {
		Self {
			sample_size: DEFAULT_SAMPLE_SIZE,
			max_control_ratio: DEFAULT_MAX_CONTROL_RATIO,
		}
	}
}

impl BinaryDetector {
	pub fn new(sample_size: usize, max_control_ratio: f64) -> Self {
		Self {
			sample_size,
			max_control_ratio,
		}
	}

	/// Returns true when `bytes` look safe to embed as text.
	pub fn is_text(&self, bytes: &[u8]) -> bool {
		let sample = &bytes[..bytes.len().min(self.sample_size)];
		if sample.is_empty() {
			return true;
		}

		if sample.contains(&0) {
			return false;
		}

		let control = sample.iter().filter(|byte| is_control_byte(**byte)).count();
		(control as f64 / sample.len() as f64) <= self.max_control_ratio
	}

	/// Returns true when `bytes` should be refused.
	pub fn is_binary(&self, bytes: &[u8]) -> bool {
		!self.is_text(bytes)
	}
}

/// Control bytes that have no business in a text file. Tab, line feed,
/// vertical tab, form feed, carriage return, backspace, bell and escape are
/// all tolerated.
fn is_control_byte(byte: u8) -> bool {
	matches!(byte, 0x00..=0x06 | 0x0e..=0x1a | 0x1c..=0x1f | 0x7f)
}
