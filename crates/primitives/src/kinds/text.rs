use crate::error::OptionError;
use crate::kind::{Bounds, KindFlags, OptionKind};
use crate::value::OptionValue;

/// Owned string option kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringKind;

impl OptionKind for StringKind {
	fn name(&self) -> &'static str {
		"String"
	}

	fn flags(&self) -> KindFlags {
		KindFlags::DYNAMIC
	}

	fn parse(&self, name: &str, param: Option<&str>, bounds: &Bounds, _current: &OptionValue) -> Result<OptionValue, OptionError> {
		let param = param.ok_or_else(|| OptionError::missing(name))?;
		let len = param.chars().count() as f64;
		if bounds.min.is_some_and(|min| len < min) || bounds.max.is_some_and(|max| len > max) {
			return Err(OptionError::OutOfRange {
				name: name.to_string(),
				reason: format!("length {len} is outside the allowed range"),
			});
		}
		Ok(OptionValue::String(param.to_string()))
	}

	fn print(&self, value: &OptionValue) -> Option<String> {
		value.as_str().map(str::to_string)
	}
}

/// Comma-separated string list kind.
///
/// When the option name carries one of the editing suffixes the current list
/// is edited instead of replaced:
///
/// * `-add` appends the given items
/// * `-pre` prepends the given items
/// * `-del` removes the given zero-based indices (negative counts from the end)
/// * `-clr` clears the list and takes no parameter
///
/// Schema nodes that want the suffixes must be declared with a `*` wildcard
/// name (e.g. `"audio-files*"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct StringList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListEdit {
	Replace,
	Append,
	Prepend,
	Delete,
	Clear,
}

fn list_edit(name: &str) -> ListEdit {
	let lower = name.to_ascii_lowercase();
	if lower.ends_with("-add") {
		ListEdit::Append
	} else if lower.ends_with("-pre") {
		ListEdit::Prepend
	} else if lower.ends_with("-del") {
		ListEdit::Delete
	} else if lower.ends_with("-clr") {
		ListEdit::Clear
	} else {
		ListEdit::Replace
	}
}

fn split_items(param: &str) -> Vec<String> {
	if param.is_empty() {
		return Vec::new();
	}
	param.split(',').map(str::to_string).collect()
}

impl OptionKind for StringList {
	fn name(&self) -> &'static str {
		"String list"
	}

	fn flags(&self) -> KindFlags {
		KindFlags::DYNAMIC | KindFlags::ALLOW_WILDCARD
	}

	fn parse(&self, name: &str, param: Option<&str>, _bounds: &Bounds, current: &OptionValue) -> Result<OptionValue, OptionError> {
		let edit = list_edit(name);
		if edit == ListEdit::Clear {
			if param.is_some_and(|p| !p.is_empty()) {
				return Err(OptionError::invalid(name, "a -clr option takes no parameter"));
			}
			return Ok(OptionValue::StringList(Vec::new()));
		}

		let param = param.ok_or_else(|| OptionError::missing(name))?;
		let existing = current.as_list().unwrap_or_default();
		let list = match edit {
			ListEdit::Replace => split_items(param),
			ListEdit::Append => existing.iter().cloned().chain(split_items(param)).collect(),
			ListEdit::Prepend => split_items(param).into_iter().chain(existing.iter().cloned()).collect(),
			ListEdit::Delete => {
				let mut remove = Vec::new();
				for item in split_items(param) {
					let index: i64 = item
						.trim()
						.parse()
						.map_err(|_| OptionError::invalid(name, format!("'{item}' is not a list index")))?;
					let resolved = if index < 0 { index + existing.len() as i64 } else { index };
					if resolved < 0 || resolved >= existing.len() as i64 {
						return Err(OptionError::invalid(name, format!("index {index} is out of range")));
					}
					remove.push(resolved as usize);
				}
				existing
					.iter()
					.enumerate()
					.filter(|(i, _)| !remove.contains(i))
					.map(|(_, s)| s.clone())
					.collect()
			}
			ListEdit::Clear => unreachable!("handled above"),
		};
		Ok(OptionValue::StringList(list))
	}

	fn print(&self, value: &OptionValue) -> Option<String> {
		value.as_list().map(|items| items.join(","))
	}
}

/// String option restricted to a fixed set of alternatives.
///
/// Matching is case-insensitive; the stored value is the canonical spelling.
#[derive(Debug, Clone, Copy)]
pub struct Choice {
	choices: &'static [&'static str],
}

impl Choice {
	/// Creates a choice kind over `choices`.
	pub const fn new(choices: &'static [&'static str]) -> Self {
		Self { choices }
	}

	/// The accepted alternatives.
	pub fn choices(&self) -> &'static [&'static str] {
		self.choices
	}
}

impl OptionKind for Choice {
	fn name(&self) -> &'static str {
		"Choice"
	}

	fn flags(&self) -> KindFlags {
		KindFlags::DYNAMIC
	}

	fn parse(&self, name: &str, param: Option<&str>, _bounds: &Bounds, _current: &OptionValue) -> Result<OptionValue, OptionError> {
		let param = param.filter(|p| !p.is_empty()).ok_or_else(|| OptionError::missing(name))?;
		self.choices
			.iter()
			.find(|c| c.eq_ignore_ascii_case(param))
			.map(|c| OptionValue::String(c.to_string()))
			.ok_or_else(|| OptionError::invalid(name, format!("'{param}' is not one of: {}", self.choices.join(", "))))
	}

	fn print(&self, value: &OptionValue) -> Option<String> {
		value.as_str().map(str::to_string)
	}
}
