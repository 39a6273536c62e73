//! The list of files to play and their per-file options.

use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;


const DVD_SCHEME: &str = "dvd://";
const MAX_DVD_TITLE: i64 = 255;

/// A file and the options that apply only while it plays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistEntry {
	file: String,
	params: Vec<(String, Option<String>)>,
}

impl PlaylistEntry {
	/// Creates an entry with no per-file options.
	pub fn new(file: impl Into<String>) -> Self {
		Self {
			file: file.into(),
			params: Vec::new(),
		}
	}

	/// The file name or URL.
	pub fn file(&self) -> &str {
		&self.file
	}

	/// Per-file options, in command-line order.
	pub fn params(&self) -> &[(String, Option<String>)] {
		&self.params
	}
}

/// Ordered playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
	entries: Vec<PlaylistEntry>,
}

impl Playlist {
	/// Creates an empty playlist.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a playlist file: one entry per line, `#` comments.
	pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
		let content = std::fs::read_to_string(path)?;
		Ok(Self::parse(&content))
	}

	/// Parses playlist text.
	pub fn parse(text: &str) -> Self {
		let entries = text
			.lines()
			.map(str::trim)
			.filter(|line| !line.is_empty() && !line.starts_with('#'))
			.map(PlaylistEntry::new)
			.collect();
		Self { entries }
	}

	/// Appends a file.
	pub fn add_file(&mut self, file: impl Into<String>) {
		self.entries.push(PlaylistEntry::new(file));
	}

	/// Moves every entry of `other` to the end of this playlist.
	pub fn append(&mut self, other: Playlist) {
		self.entries.extend(other.entries);
	}

	/// Attaches `params` to every entry from index `start` on and returns how
	/// many entries received them.
	pub fn add_params_from(&mut self, start: usize, params: &[(String, Option<String>)]) -> usize {
		let tail = self.entries.get_mut(start..).unwrap_or_default();
		for entry in tail.iter_mut() {
			entry.params.extend_from_slice(params);
		}
		tail.len()
	}

	/// Shuffles the entries with the thread-local generator.
	pub fn shuffle(&mut self) {
		self.shuffle_with(&mut rand::thread_rng());
	}

	/// Shuffles the entries with `rng`.
	pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
		self.entries.shuffle(rng);
	}

	/// Entries, in play order.
	pub fn entries(&self) -> &[PlaylistEntry] {
		&self.entries
	}

	/// File names, in play order.
	pub fn files(&self) -> Vec<&str> {
		self.entries.iter().map(PlaylistEntry::file).collect()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True if the playlist has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Leading integer of `text` with C `strtol` leniency: an optional sign and
/// as many digits as follow, 0 if there are none.
fn leading_int(text: &str) -> i64 {
	let (sign, digits) = match text.as_bytes().first() {
		Some(b'-') => (-1, &text[1..]),
		Some(b'+') => (1, &text[1..]),
		_ => (1, text),
	};
	let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
	digits[..end].parse::<i64>().map_or(0, |v| sign * v)
}

/// Expands `dvd://a-b` into one entry per title from `a` to `b`.
///
/// `dvd://-n` means titles 1 through `n`. Titles must lie in 1..=255 and the
/// range must be increasing; `None` is returned for an invalid range. Any
/// other argument expands to itself.
pub fn expand_dvd_range(file: &str) -> Option<Vec<String>> {
	let Some(range) = file.strip_prefix(DVD_SCHEME) else {
		return Some(vec![file.to_string()]);
	};
	let Some(dash) = range.find('-') else {
		return Some(vec![file.to_string()]);
	};

	let mut start = leading_int(range);
	let end = if start < 0 {
		let end = -start;
		start = 1;
		end
	} else {
		leading_int(&range[dash + 1..])
	};

	let in_range = |title: i64| (1..=MAX_DVD_TITLE).contains(&title);
	if !(in_range(start) && in_range(end) && start < end) {
		return None;
	}
	Some((start..=end).map(|title| format!("{DVD_SCHEME}{title}")).collect())
}
