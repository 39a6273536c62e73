use crate::error::OptionError;
use crate::kind::{Bounds, KindFlags, OptionKind};
use crate::subopt::split_suboptions;
use crate::value::OptionValue;

/// Parameter-less option that stores `true` when given.
#[derive(Debug, Clone, Copy, Default)]
pub struct Store;

impl OptionKind for Store {
	fn name(&self) -> &'static str {
		"Store"
	}

	fn flags(&self) -> KindFlags {
		KindFlags::NO_PARAM
	}

	fn parse(&self, name: &str, param: Option<&str>, _bounds: &Bounds, _current: &OptionValue) -> Result<OptionValue, OptionError> {
		match param {
			Some(p) if !p.is_empty() => Err(OptionError::invalid(name, "option does not take a parameter")),
			_ => Ok(OptionValue::Flag(true)),
		}
	}

	fn print(&self, _value: &OptionValue) -> Option<String> {
		None
	}
}

/// Marker kind for composite options.
///
/// Composite values are decomposed by the registry; parsing here only checks
/// that the text is well-formed sub-option syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct Subconfig;

impl OptionKind for Subconfig {
	fn name(&self) -> &'static str {
		"Subconfig"
	}

	fn parse(&self, name: &str, param: Option<&str>, _bounds: &Bounds, _current: &OptionValue) -> Result<OptionValue, OptionError> {
		let param = param.ok_or_else(|| OptionError::missing(name))?;
		split_suboptions(name, param)?;
		Ok(OptionValue::None)
	}

	fn print(&self, _value: &OptionValue) -> Option<String> {
		None
	}
}
