//! Options every configuration carries for itself.

use mpconf_primitives::{Bounds, OptionError, OptionValue, STORE, STRING, STRING_LIST};

use crate::config::Config;
use crate::def::{Location, OptionDef, OptionFlags};
use crate::diag::Level;

/// Exit code carried by options that only print information.
pub const INFO_EXIT_CODE: i32 = 0;

pub(crate) static SELF_OPTIONS: [OptionDef; 3] = [
	OptionDef::new("profile", STRING_LIST, Location::Nowhere).with_help("apply the named profiles"),
	OptionDef::new("show-profile", STRING, Location::Nowhere)
		.with_flags(OptionFlags::NO_CONFIG_FILE)
		.with_help("print a profile and exit"),
	OptionDef::new("list-options", STORE, Location::Nowhere)
		.with_flags(OptionFlags::NO_CONFIG_FILE)
		.with_help("print every option and exit"),
];

pub(crate) static INCLUDE_OPTIONS: [OptionDef; 1] =
	[OptionDef::new("include", STRING, Location::Nowhere).with_help("read another config file")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelfOption {
	Profile,
	ShowProfile,
	ListOptions,
	Include,
}

impl SelfOption {
	/// Identifies the built-in options by schema node, so a user option named
	/// `profile` shadowing the built-in parses like any other option.
	pub(crate) fn of(def: &'static OptionDef) -> Option<Self> {
		let found = [Self::Profile, Self::ShowProfile, Self::ListOptions]
			.into_iter()
			.zip(SELF_OPTIONS.iter())
			.chain(std::iter::once((Self::Include, &INCLUDE_OPTIONS[0])))
			.find(|(_, builtin)| std::ptr::eq(def, *builtin));
		found.map(|(option, _)| option)
	}
}

impl Config {
	pub(crate) fn parse_self_option(
		&mut self,
		option: SelfOption,
		name: &str,
		param: Option<&str>,
		commit: bool,
	) -> Result<(), OptionError> {
		match option {
			SelfOption::Profile => self.parse_profile_option(name, param, commit),
			SelfOption::ShowProfile => {
				let param = param.filter(|p| !p.is_empty()).ok_or_else(|| OptionError::missing(name))?;
				match self.profile_id(param) {
					Some(id) => self.describe_profile(id),
					None => self.diag(Level::ERROR, format!("Unknown profile '{param}'.")),
				}
				Err(OptionError::RequestedExit { code: INFO_EXIT_CODE })
			}
			SelfOption::ListOptions => {
				STORE.parse(name, param, &Bounds::NONE, &OptionValue::None)?;
				let table = crate::list::format_option_list(&self.registry.list_all());
				for line in table.lines() {
					self.diag(Level::INFO, line.to_string());
				}
				Err(OptionError::RequestedExit { code: INFO_EXIT_CODE })
			}
			SelfOption::Include => {
				let file = param.filter(|p| !p.is_empty()).ok_or_else(|| OptionError::missing(name))?;
				if !commit {
					return Ok(());
				}
				let Some(handler) = self.include.clone() else {
					return Err(OptionError::unknown(name));
				};
				handler(self, file)
			}
		}
	}

	fn parse_profile_option(&mut self, name: &str, param: Option<&str>, commit: bool) -> Result<(), OptionError> {
		if param.is_some_and(|p| p.eq_ignore_ascii_case("help")) {
			self.list_profiles();
			return Err(OptionError::RequestedExit { code: INFO_EXIT_CODE });
		}

		let list = STRING_LIST.parse(name, param, &Bounds::NONE, &OptionValue::None)?;
		let names = match list {
			OptionValue::StringList(names) if !names.is_empty() => names,
			_ => return Err(OptionError::invalid(name, "no profile given")),
		};

		let mut missing = None;
		for profile in &names {
			match self.profile_id(profile) {
				Some(id) if commit => self.apply_profile(id)?,
				Some(_) => {}
				None => {
					self.diag(Level::WARN, format!("Unknown profile '{profile}'."));
					missing.get_or_insert_with(|| profile.clone());
				}
			}
		}
		match missing {
			Some(profile) => Err(OptionError::invalid(name, format!("unknown profile '{profile}'"))),
			None => Ok(()),
		}
	}

	fn list_profiles(&mut self) {
		if self.profiles.is_empty() {
			self.diag(Level::INFO, "No profiles have been defined.");
			return;
		}
		self.diag(Level::INFO, "Available profiles:");
		let lines: Vec<String> = self
			.profiles
			.iter()
			.map(|(_, p)| format!("\t{}\t{}", p.name(), p.desc().unwrap_or_default()))
			.collect();
		for line in lines {
			self.diag(Level::INFO, line);
		}
	}
}
