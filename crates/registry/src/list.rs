//! Option table listing.

use std::fmt::Write as _;

use crate::def::OptionFlags;
use crate::registry::Registry;

/// One row of the option table.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionInfo {
	pub name: String,
	pub kind: &'static str,
	pub min: Option<f64>,
	pub max: Option<f64>,
	pub global: bool,
	pub command_line: bool,
	pub config_file: bool,
}

impl Registry {
	/// Describes every resolvable leaf option, in lookup order.
	pub fn list_all(&self) -> Vec<OptionInfo> {
		self.bindings()
			.filter(|b| !b.is_composite())
			.map(|b| {
				let def = b.def();
				OptionInfo {
					name: b.name().to_string(),
					kind: def.kind.name(),
					min: def.bounds.min,
					max: def.bounds.max,
					global: def.flags.contains(OptionFlags::GLOBAL),
					command_line: !def.flags.contains(OptionFlags::NO_COMMAND_LINE),
					config_file: !def.flags.contains(OptionFlags::NO_CONFIG_FILE),
				}
			})
			.collect()
	}
}

/// Renders option rows as a fixed-width table followed by a total.
pub fn format_option_list(options: &[OptionInfo]) -> String {
	fn yes_no(value: bool) -> &'static str {
		if value { "Yes" } else { "No" }
	}
	fn bound(value: Option<f64>) -> String {
		value.map_or_else(|| "No".to_string(), |v| format!("{v:.0}"))
	}
	fn clip(text: &str, width: usize) -> &str {
		text.char_indices().nth(width).map_or(text, |(end, _)| &text[..end])
	}

	let mut out = String::new();
	let _ = writeln!(out, " {:<20} {:<15} {:<10} {:<10} {:<6} {:<5} {}", "Name", "Type", "Min", "Max", "Global", "CL", "Cfg");
	out.push('\n');
	for info in options {
		let _ = writeln!(
			out,
			" {:<20} {:<15} {:<10} {:<10} {:<6} {:<5} {}",
			clip(&info.name, 20),
			clip(info.kind, 15),
			bound(info.min),
			bound(info.max),
			yes_no(info.global),
			yes_no(info.command_line),
			yes_no(info.config_file),
		);
	}
	let _ = write!(out, "\nTotal: {} options", options.len());
	out
}
