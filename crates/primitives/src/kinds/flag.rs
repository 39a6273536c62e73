use crate::error::OptionError;
use crate::kind::{Bounds, KindFlags, OptionKind};
use crate::value::OptionValue;

/// Boolean option kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flag;

/// Parses the textual forms accepted for flags.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
	match value.to_ascii_lowercase().as_str() {
		"" | "yes" | "on" | "true" | "1" => Some(true),
		"no" | "off" | "false" | "0" => Some(false),
		_ => None,
	}
}

impl OptionKind for Flag {
	fn name(&self) -> &'static str {
		"Flag"
	}

	fn flags(&self) -> KindFlags {
		KindFlags::FLAG | KindFlags::NO_PARAM
	}

	fn parse(&self, name: &str, param: Option<&str>, _bounds: &Bounds, _current: &OptionValue) -> Result<OptionValue, OptionError> {
		let Some(param) = param else {
			return Ok(OptionValue::Flag(true));
		};
		parse_bool(param)
			.map(OptionValue::Flag)
			.ok_or_else(|| OptionError::invalid(name, format!("'{param}' is not a flag (expected yes/no, on/off, true/false, 1/0)")))
	}

	fn print(&self, value: &OptionValue) -> Option<String> {
		value.as_flag().map(|v| String::from(if v { "yes" } else { "no" }))
	}
}
