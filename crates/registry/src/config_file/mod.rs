//! Line-oriented config file reader.
//!
//! ```text
//! # comment
//! volume = 80
//! fullscreen
//! title="a # b"
//!
//! [night]
//! profile-desc = "quiet playback"
//! volume = 20
//! ```
//!
//! Entries outside a section are applied as config-file options. Entries under
//! `[name]` are recorded into that profile; `[default]` returns to top level.

use std::path::{Path, PathBuf};

use mpconf_primitives::OptionError;
use thiserror::Error;

use crate::config::{Config, Source};
use crate::profile::ProfileId;

#[cfg(test)]
mod tests;

/// Section name that returns to top-level entries.
pub const DEFAULT_SECTION: &str = "default";

/// Key that sets the description of the enclosing profile.
pub const PROFILE_DESC_KEY: &str = "profile-desc";

/// Errors raised while reading a config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
	/// The file could not be read.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// A line is not valid config syntax.
	#[error("{origin}:{line}: {message}")]
	Syntax {
		origin: String,
		line: usize,
		message: String,
	},

	/// An entry was rejected by the option it names.
	#[error("{origin}:{line}: {source}")]
	Option {
		origin: String,
		line: usize,
		#[source]
		source: OptionError,
	},
}

impl ConfigFileError {
	/// True if an option asked the program to exit.
	pub fn is_exit(&self) -> bool {
		matches!(self, Self::Option { source, .. } if source.is_exit())
	}

	/// Converts into an [`OptionError`] attributed to the `include` option,
	/// preserving exit requests and option errors as-is.
	pub fn into_option_error(self) -> OptionError {
		match self {
			Self::Option { source, .. } => source,
			other => OptionError::invalid("include", other.to_string()),
		}
	}
}

enum Line<'a> {
	Blank,
	Section(&'a str),
	Entry { key: &'a str, value: Option<String> },
}

fn parse_line(line: &str) -> Result<Line<'_>, String> {
	let line = strip_comment(line).trim();
	if line.is_empty() {
		return Ok(Line::Blank);
	}
	if let Some(rest) = line.strip_prefix('[') {
		let name = rest.strip_suffix(']').ok_or("unterminated section header")?.trim();
		if name.is_empty() {
			return Err("empty section name".to_string());
		}
		return Ok(Line::Section(name));
	}

	let (key, value) = match line.split_once('=') {
		Some((key, value)) => (key.trim_end(), Some(unquote(value.trim_start())?)),
		None => (line, None),
	};
	if key.is_empty() {
		return Err("missing option name".to_string());
	}
	if key.contains(char::is_whitespace) {
		return Err(format!("invalid option name '{key}'"));
	}
	Ok(Line::Entry { key, value })
}

/// Cuts a line at the first `#` outside double quotes.
fn strip_comment(line: &str) -> &str {
	let mut quoted = false;
	for (i, c) in line.char_indices() {
		match c {
			'"' => quoted = !quoted,
			'#' if !quoted => return &line[..i],
			_ => {}
		}
	}
	line
}

fn unquote(value: &str) -> Result<String, String> {
	let Some(rest) = value.strip_prefix('"') else {
		return Ok(value.to_string());
	};
	match rest.find('"') {
		Some(end) if rest[end + 1..].trim().is_empty() => Ok(rest[..end].to_string()),
		Some(_) => Err("trailing characters after quoted value".to_string()),
		None => Err("unterminated quoted value".to_string()),
	}
}

impl Config {
	/// Reads and applies a config file.
	pub fn load_config_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigFileError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		tracing::debug!(domain = "options", path = %path.display(), "reading config file");
		self.parse_config_str(&path.display().to_string(), &content)
	}

	/// Applies config text; `origin` names it in errors.
	///
	/// Stops at the first rejected line. The active source is restored
	/// afterwards on every path.
	pub fn parse_config_str(&mut self, origin: &str, text: &str) -> Result<(), ConfigFileError> {
		let previous = std::mem::replace(&mut self.source, Source::ConfigFile);
		let result = self.apply_config_lines(origin, text);
		self.source = previous;
		result
	}

	fn apply_config_lines(&mut self, origin: &str, text: &str) -> Result<(), ConfigFileError> {
		let mut section: Option<ProfileId> = None;
		for (index, raw) in text.lines().enumerate() {
			let line = index + 1;
			let parsed = parse_line(raw).map_err(|message| ConfigFileError::Syntax {
				origin: origin.to_string(),
				line,
				message,
			})?;
			let option_error = |source| ConfigFileError::Option {
				origin: origin.to_string(),
				line,
				source,
			};
			match parsed {
				Line::Blank => {}
				Line::Section(name) if name.eq_ignore_ascii_case(DEFAULT_SECTION) => section = None,
				Line::Section(name) => section = Some(self.add_profile(name)),
				Line::Entry { key, value } => match section {
					Some(id) if key.eq_ignore_ascii_case(PROFILE_DESC_KEY) => {
						self.set_profile_desc(id, value.as_deref().unwrap_or_default());
					}
					Some(id) => {
						// Parameter-less kinds replay "" the same as no parameter.
						if value.is_none() {
							self.check(key, None).map_err(option_error)?;
						}
						self.record(id, key, value.as_deref().unwrap_or_default()).map_err(option_error)?;
					}
					None => self.set(key, value.as_deref()).map_err(option_error)?,
				},
			}
		}
		Ok(())
	}

	/// Makes the `include` option read config files through this reader.
	pub fn install_file_include(&mut self) {
		self.set_include_handler(|config, file| config.load_config_file(file).map_err(ConfigFileError::into_option_error));
	}
}
