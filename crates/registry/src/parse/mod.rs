//! The parsing protocol shared by every option source.

use mpconf_primitives::{KindFlags, OptionError, OptionValue, split_suboptions};

use crate::config::{Config, Source};
use crate::def::OptionFlags;
use crate::diag::Level;
use crate::registry::{BindingId, child_separator};
use crate::self_opts;


/// Prefix that turns a flag name into its negation (`no-mute`).
pub const NEGATION_PREFIX: &str = "no-";

impl Config {
	/// Parses `param` for `name` and writes the result to storage.
	pub fn set(&mut self, name: &str, param: Option<&str>) -> Result<(), OptionError> {
		tracing::trace!(domain = "options", name, param, "setting option");
		self.set_or_check(name, param, true)
	}

	/// Parses `param` for `name` without touching storage.
	pub fn check(&mut self, name: &str, param: Option<&str>) -> Result<(), OptionError> {
		tracing::trace!(domain = "options", name, param, "checking option");
		self.set_or_check(name, param, false)
	}

	/// Resolves `name`, enforces the legality rules of the active source and
	/// parses `param`, committing the value only when `commit` is set.
	///
	/// Composite options are decomposed into their sub-options in both modes,
	/// so a check validates the whole sub-option string.
	pub fn set_or_check(&mut self, name: &str, param: Option<&str>, commit: bool) -> Result<(), OptionError> {
		let Some(id) = self.registry.resolve(name) else {
			return Err(OptionError::Unknown {
				name: name.to_string(),
				suggestion: self.registry.suggest(name),
			});
		};
		let def = self.registry.binding(id).def();

		if self.source == Source::ConfigFile && def.flags.contains(OptionFlags::NO_CONFIG_FILE) {
			self.diag(Level::ERROR, format!("The {name} option can't be used in a config file."));
			return Err(OptionError::invalid(name, "can't be used in a config file"));
		}
		if self.source == Source::CommandLine && def.flags.contains(OptionFlags::NO_COMMAND_LINE) {
			self.diag(Level::ERROR, format!("The {name} option can't be used on the command line."));
			return Err(OptionError::invalid(name, "can't be used on the command line"));
		}
		if self.local && def.flags.contains(OptionFlags::GLOBAL) {
			self.diag(Level::ERROR, format!("The {name} option is global and can't be set per-file."));
			return Err(OptionError::invalid(name, "global option can't be set per-file"));
		}

		if let Some(special) = self_opts::SelfOption::of(def) {
			return self.parse_self_option(special, name, param, commit);
		}

		if def.is_composite() {
			let binding = self.registry.binding(id);
			let parent = binding.name().to_string();
			let prefix = format!("{parent}{}", child_separator(def));
			return self.parse_suboptions(&parent, &prefix, param, commit);
		}

		if commit {
			self.ensure_backup(id);
		}
		let value = def.kind.parse(name, param, &def.bounds, self.registry.binding_value(id))?;
		if commit {
			self.store(id, value);
		}
		Ok(())
	}

	/// Applies a sub-option string to the children of a composite option.
	///
	/// Keys are resolved as `<prefix><key>`. An unresolved `no-<key>` negates a
	/// flag child and can't carry a value.
	pub(crate) fn parse_suboptions(&mut self, parent: &str, prefix: &str, param: Option<&str>, commit: bool) -> Result<(), OptionError> {
		let param = param.filter(|p| !p.is_empty()).ok_or_else(|| OptionError::missing(parent))?;
		let pairs = split_suboptions(parent, param)?;

		for (key, value) in pairs {
			let mut full = format!("{prefix}{key}");
			let mut value = value;

			if self.registry.resolve(&full).is_none() {
				let negated = key
					.strip_prefix(NEGATION_PREFIX)
					.map(|stripped| format!("{prefix}{stripped}"))
					.filter(|candidate| self.resolves_to_flag(candidate));
				let Some(negated) = negated else {
					self.diag(Level::ERROR, format!("Error: option '{parent}' has no suboption '{key}'."));
					return Err(OptionError::invalid(parent, format!("no suboption '{key}'")));
				};
				if let Some(value) = value {
					self.diag(Level::ERROR, format!("A --no-* option can't take parameters: {key}={value}"));
					return Err(OptionError::invalid(parent, format!("'{key}' can't take a parameter")));
				}
				full = negated;
				value = Some("no".to_string());
			}

			match self.set_or_check(&full, value.as_deref(), commit) {
				Ok(()) => {}
				Err(OptionError::MissingParameter { .. }) => {
					self.diag(Level::ERROR, format!("Error: suboption '{key}' of '{parent}' must have a parameter!"));
					return Err(OptionError::invalid(parent, format!("suboption '{key}' must have a parameter")));
				}
				Err(err) => return Err(err),
			}
		}
		Ok(())
	}

	/// Applies a sub-option string whose keys are top-level option names.
	///
	/// Used by embedders that accept `key=value:...` blobs for a group of
	/// otherwise independent options. An empty string is a no-op.
	pub fn set_suboptions(&mut self, name: &str, param: &str) -> Result<(), OptionError> {
		if param.is_empty() {
			return Ok(());
		}
		self.parse_suboptions(name, "", Some(param), true)
	}

	/// Maps a negated flag name (`no-mute`) to the flag it negates.
	///
	/// Returns `Ok(None)` when `name` resolves as-is or is not a negation of a
	/// flag, and `Ok(Some(flag))` when the caller should set `flag` to `no`. A
	/// negation carrying a parameter is invalid.
	pub fn map_negation(&self, name: &str, param: Option<&str>) -> Result<Option<String>, OptionError> {
		if self.registry.resolve(name).is_some() {
			return Ok(None);
		}
		let Some(stripped) = name.strip_prefix(NEGATION_PREFIX) else {
			return Ok(None);
		};
		if !self.resolves_to_flag(stripped) {
			return Ok(None);
		}
		if let Some(param) = param {
			return Err(OptionError::invalid(name, format!("a no-* option can't take parameters: --{name}={param}")));
		}
		Ok(Some(stripped.to_string()))
	}

	fn resolves_to_flag(&self, name: &str) -> bool {
		self.registry
			.option(name)
			.is_some_and(|def| def.kind.flags().contains(KindFlags::FLAG))
	}

	/// Replaces a binding's stored value, releasing the old one.
	pub(crate) fn store(&mut self, id: BindingId, value: OptionValue) {
		let binding = self.registry.binding(id);
		let (Some(key), kind) = (binding.storage(), binding.def().kind) else {
			return;
		};
		let slot = self.registry.storage.get_mut(&key);
		kind.free(slot);
		*slot = value;
	}
}
