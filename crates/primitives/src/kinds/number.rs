use crate::error::OptionError;
use crate::kind::{Bounds, OptionKind};
use crate::value::OptionValue;

/// Signed integer option kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Int;

/// Floating point option kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl OptionKind for Int {
	fn name(&self) -> &'static str {
		"Integer"
	}

	fn parse(&self, name: &str, param: Option<&str>, bounds: &Bounds, _current: &OptionValue) -> Result<OptionValue, OptionError> {
		let param = param.filter(|p| !p.is_empty()).ok_or_else(|| OptionError::missing(name))?;
		let value = parse_int(param).ok_or_else(|| OptionError::invalid(name, format!("'{param}' is not an integer")))?;
		bounds.check(name, value as f64)?;
		Ok(OptionValue::Int(value))
	}

	fn print(&self, value: &OptionValue) -> Option<String> {
		value.as_int().map(|v| v.to_string())
	}
}

fn parse_int(text: &str) -> Option<i64> {
	let text = text.trim();
	let (negative, digits) = match text.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, text.strip_prefix('+').unwrap_or(text)),
	};
	let magnitude = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
		Some(hex) => i64::from_str_radix(hex, 16).ok()?,
		None => digits.parse::<i64>().ok()?,
	};
	Some(if negative { -magnitude } else { magnitude })
}

impl OptionKind for Float {
	fn name(&self) -> &'static str {
		"Float"
	}

	fn parse(&self, name: &str, param: Option<&str>, bounds: &Bounds, _current: &OptionValue) -> Result<OptionValue, OptionError> {
		let param = param.filter(|p| !p.is_empty()).ok_or_else(|| OptionError::missing(name))?;
		let value = parse_float(param).ok_or_else(|| OptionError::invalid(name, format!("'{param}' is not a number")))?;
		bounds.check(name, value)?;
		Ok(OptionValue::Float(value))
	}

	fn print(&self, value: &OptionValue) -> Option<String> {
		value.as_float().map(|v| v.to_string())
	}
}

/// Parses a plain number or an `a:b` / `a/b` ratio.
fn parse_float(text: &str) -> Option<f64> {
	let text = text.trim();
	if let Some((num, den)) = text.split_once([':', '/']) {
		let num: f64 = num.trim().parse().ok()?;
		let den: f64 = den.trim().parse().ok()?;
		if den == 0.0 {
			return None;
		}
		return Some(num / den);
	}
	let value: f64 = text.parse().ok()?;
	value.is_finite().then_some(value)
}
