use std::fmt;

use crate::error::OptionError;
use crate::value::OptionValue;

bitflags::bitflags! {
	/// Capabilities of a value kind.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct KindFlags: u8 {
		/// Values own heap memory and are released through [`OptionKind::free`] at teardown.
		const DYNAMIC = 1 << 0;
		/// A schema name ending in `*` matches any name sharing its prefix.
		const ALLOW_WILDCARD = 1 << 1;
		/// Never consumes a separate command-line token as its parameter.
		const NO_PARAM = 1 << 2;
		/// The boolean kind; the only kind accepted by `no-` negation.
		const FLAG = 1 << 3;
	}
}

/// Numeric bounds attached to a schema node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
	/// Inclusive lower bound.
	pub min: Option<f64>,
	/// Inclusive upper bound.
	pub max: Option<f64>,
}

impl Bounds {
	/// No bounds.
	pub const NONE: Bounds = Bounds { min: None, max: None };

	/// Both bounds set.
	pub const fn range(min: f64, max: f64) -> Self {
		Self {
			min: Some(min),
			max: Some(max),
		}
	}

	/// Checks `value` against the bounds, naming `option` on failure.
	pub fn check(&self, option: &str, value: f64) -> Result<(), OptionError> {
		if let Some(min) = self.min
			&& value < min
		{
			return Err(OptionError::OutOfRange {
				name: option.to_string(),
				reason: format!("{value} is below the minimum {min}"),
			});
		}
		if let Some(max) = self.max
			&& value > max
		{
			return Err(OptionError::OutOfRange {
				name: option.to_string(),
				reason: format!("{value} is above the maximum {max}"),
			});
		}
		Ok(())
	}
}

/// Type descriptor for one kind of option value.
///
/// The registry is generic over this trait: it never interprets values itself,
/// it only moves them between storage, backups and defaults through these hooks.
/// Kinds are declared as `static` items so schema tables can reference them.
pub trait OptionKind: Send + Sync + 'static {
	/// Short type name used in listings (e.g. `"Flag"`).
	fn name(&self) -> &'static str;

	/// Capability flags of this kind.
	fn flags(&self) -> KindFlags {
		KindFlags::empty()
	}

	/// Parses `param` for the option `name`.
	///
	/// `param` is `None` when the option was given without any parameter.
	/// `current` is the value presently in storage, for kinds that edit rather
	/// than replace it. The returned value is written to storage by the caller
	/// only when committing.
	fn parse(&self, name: &str, param: Option<&str>, bounds: &Bounds, current: &OptionValue) -> Result<OptionValue, OptionError>;

	/// Produces an independent copy of `src`.
	fn copy(&self, src: &OptionValue) -> OptionValue {
		src.clone()
	}

	/// Releases whatever `value` owns and leaves it zeroed.
	fn free(&self, value: &mut OptionValue) {
		*value = OptionValue::None;
	}

	/// Renders `value` as text, if the kind has a textual form.
	fn print(&self, value: &OptionValue) -> Option<String>;
}

impl fmt::Debug for dyn OptionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OptionKind")
			.field("name", &self.name())
			.field("flags", &self.flags())
			.finish()
	}
}
