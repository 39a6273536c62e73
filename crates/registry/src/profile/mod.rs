//! Named, replayable bundles of option settings.

use mpconf_primitives::OptionError;

use crate::config::{Config, Source};
use crate::diag::Level;


/// Recursion ceiling for applying and describing nested profiles.
pub const MAX_PROFILE_DEPTH: usize = 20;

/// Index of a profile in its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileId(u32);

impl ProfileId {
	fn index(self) -> usize {
		self.0 as usize
	}
}

/// A named list of `(option, value)` entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
	name: String,
	desc: Option<String>,
	entries: Vec<(String, String)>,
}

impl Profile {
	/// Profile name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Optional human-readable description.
	pub fn desc(&self) -> Option<&str> {
		self.desc.as_deref()
	}

	/// Recorded entries, in recording order.
	pub fn entries(&self) -> &[(String, String)] {
		&self.entries
	}
}

/// Profiles of one configuration, in creation order.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
	profiles: Vec<Profile>,
}

impl ProfileStore {
	/// Finds a profile by exact name; the most recently created one wins.
	pub fn find(&self, name: &str) -> Option<ProfileId> {
		self.profiles.iter().rposition(|p| p.name == name).map(|i| ProfileId(i as u32))
	}

	/// Returns the profile named `name`, creating it if needed.
	pub fn add(&mut self, name: &str) -> ProfileId {
		if let Some(id) = self.find(name) {
			return id;
		}
		self.profiles.push(Profile {
			name: name.to_string(),
			..Profile::default()
		});
		ProfileId((self.profiles.len() - 1) as u32)
	}

	/// Returns a profile.
	///
	/// # Panics
	///
	/// Panics if `id` was not produced by this store.
	pub fn get(&self, id: ProfileId) -> &Profile {
		&self.profiles[id.index()]
	}

	fn get_mut(&mut self, id: ProfileId) -> &mut Profile {
		&mut self.profiles[id.index()]
	}

	/// Number of profiles.
	pub fn len(&self) -> usize {
		self.profiles.len()
	}

	/// True if no profile exists.
	pub fn is_empty(&self) -> bool {
		self.profiles.is_empty()
	}

	/// Profiles, most recently created first.
	pub fn iter(&self) -> impl Iterator<Item = (ProfileId, &Profile)> + '_ {
		self.profiles.iter().enumerate().rev().map(|(i, p)| (ProfileId(i as u32), p))
	}
}

impl Config {
	/// Returns the profile named `name`, creating an empty one if needed.
	pub fn add_profile(&mut self, name: &str) -> ProfileId {
		self.profiles.add(name)
	}

	/// Looks up a profile by name.
	pub fn profile_id(&self, name: &str) -> Option<ProfileId> {
		self.profiles.find(name)
	}

	/// Returns a profile.
	pub fn profile(&self, id: ProfileId) -> &Profile {
		self.profiles.get(id)
	}

	/// The profile store.
	pub fn profiles(&self) -> &ProfileStore {
		&self.profiles
	}

	/// Sets or replaces a profile's description.
	pub fn set_profile_desc(&mut self, id: ProfileId, desc: &str) {
		self.profiles.get_mut(id).desc = Some(desc.to_string());
	}

	/// Validates `(key, value)` and appends it to a profile.
	///
	/// Validation runs as a config-file check, so options that can't appear in
	/// a config file are rejected here rather than when the profile is applied.
	pub fn record(&mut self, id: ProfileId, key: &str, value: &str) -> Result<(), OptionError> {
		let previous = std::mem::replace(&mut self.source, Source::ConfigFile);
		let checked = self.check(key, Some(value));
		self.source = previous;
		checked?;
		self.profiles.get_mut(id).entries.push((key.to_string(), value.to_string()));
		Ok(())
	}

	/// Replays a profile's entries as if they came from a config file.
	///
	/// Rejected entries are reported and skipped; only a requested exit stops
	/// the replay. Nested `profile` entries apply the named profiles
	/// recursively; past [`MAX_PROFILE_DEPTH`] the inclusion is reported and
	/// skipped.
	pub fn apply_profile(&mut self, id: ProfileId) -> Result<(), OptionError> {
		if self.profile_depth > MAX_PROFILE_DEPTH {
			let name = self.profiles.get(id).name.clone();
			self.diag(Level::WARN, format!("WARNING: Profile inclusion too deep, skipping '{name}'."));
			return Ok(());
		}

		let previous = std::mem::replace(&mut self.source, Source::ConfigFile);
		self.profile_depth += 1;
		let entries = self.profiles.get(id).entries.clone();
		let mut result = Ok(());
		for (key, value) in &entries {
			match self.set(key, Some(value)) {
				Ok(()) => {}
				Err(err @ OptionError::RequestedExit { .. }) => {
					result = Err(err);
					break;
				}
				Err(err) => {
					let name = &self.profiles.get(id).name;
					let message = format!("Profile '{name}': {err}");
					self.diag(Level::WARN, message);
				}
			}
		}
		self.profile_depth -= 1;
		self.source = previous;
		result
	}

	/// Pretty-prints a profile, following nested `profile` entries.
	///
	/// Nested profiles past [`MAX_PROFILE_DEPTH`] are listed but not expanded,
	/// with a warning for each one skipped.
	pub fn describe_profile(&mut self, id: ProfileId) {
		let mut lines = Vec::new();
		let mut skipped = Vec::new();
		self.render_profile(id, &mut lines, &mut skipped);
		for line in lines {
			self.diag(Level::INFO, line);
		}
		for name in skipped {
			self.diag(Level::WARN, format!("WARNING: Profile inclusion too deep, skipping '{name}'."));
		}
	}

	/// Renders [`Config::describe_profile`]'s output without emitting it.
	pub fn describe_lines(&self, id: ProfileId) -> Vec<String> {
		let mut lines = Vec::new();
		self.render_profile(id, &mut lines, &mut Vec::new());
		lines
	}

	fn render_profile(&self, id: ProfileId, lines: &mut Vec<String>, skipped: &mut Vec<String>) {
		let profile = self.profiles.get(id);
		lines.push(format!("Profile {}: {}", profile.name, profile.desc().unwrap_or_default()));
		self.describe_into(id, 1, lines, skipped);
	}

	fn describe_into(&self, id: ProfileId, depth: usize, lines: &mut Vec<String>, skipped: &mut Vec<String>) {
		let indent = " ".repeat(depth);
		for (key, value) in &self.profiles.get(id).entries {
			lines.push(format!("{indent}{key}={value}"));
			if key != "profile" {
				continue;
			}
			for nested in value.split(',').filter_map(|n| self.profiles.find(n)) {
				if depth >= MAX_PROFILE_DEPTH {
					skipped.push(self.profiles.get(nested).name.clone());
				} else {
					self.describe_into(nested, depth + 1, lines, skipped);
				}
			}
		}
	}
}
