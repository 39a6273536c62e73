//! Static option schema.
//!
//! Schema nodes are declared by the embedding program as `static` tables and
//! are never mutated; the registry binds them to storage.

use mpconf_primitives::{Bounds, DefaultValue, OptionKind, SUBCONFIG};

bitflags::bitflags! {
	/// Per-option behavior flags.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct OptionFlags: u16 {
		/// Can't be set inside a local scope; its value leaks across scope boundaries.
		const GLOBAL = 1 << 0;
		/// Snapshotted eagerly when a local scope is entered.
		const LOCAL = 1 << 1;
		/// Rejected when the active source is a config file.
		const NO_CONFIG_FILE = 1 << 2;
		/// Rejected when the active source is the command line.
		const NO_COMMAND_LINE = 1 << 3;
		/// Composite whose children are named as if they were its siblings.
		const MERGE = 1 << 4;
		/// Applied by the command-line pre-parse pass.
		const PRE_PARSE = 1 << 5;
		/// Children are named `parent-child` instead of `parent:child`.
		const PREFIXED = 1 << 6;
	}
}

/// Where a schema node's value lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
	/// Field of the enclosing structure: the configuration root, or the
	/// sub-structure of the nearest ancestor declared with [`Children::Substruct`].
	Field(u16),
	/// Slot addressed by name, independent of any structure.
	Shared(&'static str),
	/// No storage (pseudo-options and inline groups).
	Nowhere,
}

/// Child options of a composite node.
#[derive(Debug, Clone, Copy)]
pub enum Children {
	/// Leaf option.
	None,
	/// Children stored in the same structure as the parent.
	Inline(&'static [OptionDef]),
	/// Children stored in an independently allocated sub-structure whose
	/// address is kept at the parent's location.
	Substruct(&'static SubSchema),
}

/// Description of an independently allocated sub-structure.
#[derive(Debug)]
pub struct SubSchema {
	/// Name used in diagnostics.
	pub name: &'static str,
	/// Options stored in the sub-structure.
	pub options: &'static [OptionDef],
	/// Compile-time field values the sub-structure starts with.
	pub defaults: &'static [(u16, DefaultValue)],
}

/// One configurable field.
#[derive(Clone, Copy)]
pub struct OptionDef {
	/// Name relative to the parent (e.g. `"volume"` in `radio:volume`).
	pub name: &'static str,
	/// Type descriptor.
	pub kind: &'static dyn OptionKind,
	/// Storage location.
	pub location: Location,
	/// Behavior flags.
	pub flags: OptionFlags,
	/// Numeric bounds checked by the kind.
	pub bounds: Bounds,
	/// Value written to storage at registration.
	pub default: Option<DefaultValue>,
	/// Child options, for composites.
	pub children: Children,
	/// One-line description for listings.
	pub help: &'static str,
}

impl core::fmt::Debug for OptionDef {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("OptionDef")
			.field("name", &self.name)
			.field("kind", &self.kind.name())
			.field("location", &self.location)
			.field("flags", &self.flags)
			.finish()
	}
}

impl OptionDef {
	/// Creates a leaf option with no flags, bounds or default.
	pub const fn new(name: &'static str, kind: &'static dyn OptionKind, location: Location) -> Self {
		Self {
			name,
			kind,
			location,
			flags: OptionFlags::empty(),
			bounds: Bounds::NONE,
			default: None,
			children: Children::None,
			help: "",
		}
	}

	/// Creates a composite whose children share the parent's structure.
	pub const fn group(name: &'static str, children: &'static [OptionDef]) -> Self {
		Self {
			children: Children::Inline(children),
			..Self::new(name, SUBCONFIG, Location::Nowhere)
		}
	}

	/// Creates a composite backed by a sub-structure whose address is stored at `location`.
	pub const fn substruct(name: &'static str, location: Location, schema: &'static SubSchema) -> Self {
		Self {
			children: Children::Substruct(schema),
			..Self::new(name, SUBCONFIG, location)
		}
	}

	/// Sets the behavior flags.
	pub const fn with_flags(mut self, flags: OptionFlags) -> Self {
		self.flags = flags;
		self
	}

	/// Sets both numeric bounds.
	pub const fn with_range(mut self, min: f64, max: f64) -> Self {
		self.bounds = Bounds::range(min, max);
		self
	}

	/// Sets the lower bound only.
	pub const fn with_min(mut self, min: f64) -> Self {
		self.bounds.min = Some(min);
		self
	}

	/// Sets the default value.
	pub const fn with_default(mut self, default: DefaultValue) -> Self {
		self.default = Some(default);
		self
	}

	/// Sets the help text.
	pub const fn with_help(mut self, help: &'static str) -> Self {
		self.help = help;
		self
	}

	/// Returns true for composites (options with children).
	pub fn is_composite(&self) -> bool {
		!matches!(self.children, Children::None)
	}
}
