//! Scoped per-entry overrides.
//!
//! While a local scope is active, every committed write first saves the
//! binding's previous value; leaving the scope writes the saved values back.
//! Options flagged [`OptionFlags::GLOBAL`] can't be set inside a scope at all.

use mpconf_primitives::OptionValue;

use crate::config::Config;
use crate::def::OptionFlags;
use crate::registry::BindingId;


impl Config {
	/// Enters a local scope, snapshotting every `LOCAL` option.
	///
	/// # Panics
	///
	/// Panics if a local scope is already active.
	pub fn enter_local(&mut self) {
		assert!(!self.local, "local scopes can't be nested");
		self.local = true;
		let eligible: Vec<BindingId> = (0..self.registry.bindings.len())
			.map(BindingId::from_index)
			.filter(|&id| {
				let binding = self.registry.binding(id);
				let flags = binding.def().flags;
				flags.contains(OptionFlags::LOCAL) && !flags.contains(OptionFlags::GLOBAL)
			})
			.collect();
		for id in eligible {
			self.ensure_backup(id);
		}
		tracing::debug!(domain = "options", "entered local scope");
	}

	/// Leaves the local scope, restoring every saved value.
	///
	/// # Panics
	///
	/// Panics if no local scope is active.
	pub fn leave_local(&mut self) {
		assert!(self.local, "no local scope to leave");
		let mut restored = 0usize;
		let registry = &mut self.registry;
		for binding in registry.bindings.iter_mut() {
			let Some(backup) = binding.backup.take() else {
				continue;
			};
			if let Some(key) = binding.storage() {
				let kind = binding.def().kind;
				let slot = registry.storage.get_mut(&key);
				kind.free(slot);
				*slot = backup;
				restored += 1;
			}
		}
		self.local = false;
		tracing::debug!(domain = "options", restored, "left local scope");
	}

	/// Saves a binding's current value if a local scope is active and no
	/// backup exists yet. Composites, aliases and storage-less options are
	/// never backed up.
	pub(crate) fn ensure_backup(&mut self, id: BindingId) {
		if !self.local {
			return;
		}
		let binding = self.registry.binding(id);
		if binding.has_backup() || binding.is_composite() || binding.is_alias() {
			return;
		}
		let Some(key) = binding.storage() else {
			return;
		};
		let current: &OptionValue = self.registry.storage.get(&key);
		let backup = binding.def().kind.copy(current);
		self.registry.bindings[id.index()].backup = Some(backup);
	}
}
