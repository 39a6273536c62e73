//! Options handled by the command-line parser itself.

use mpconf_primitives::{FLAG, STORE, STRING};
use mpconf_registry::{Location, OptionDef, OptionFlags};

/// Brackets, `shuffle`, `playlist` and `v`.
///
/// The embedder registers this table alongside its own; the parser acts on
/// these names after the registry has validated them.
pub static CMDLINE_OPTIONS: [OptionDef; 5] = [
	OptionDef::new("{", STORE, Location::Nowhere)
		.with_flags(OptionFlags::NO_CONFIG_FILE)
		.with_help("start a per-file option group"),
	OptionDef::new("}", STORE, Location::Nowhere)
		.with_flags(OptionFlags::NO_CONFIG_FILE)
		.with_help("end a per-file option group"),
	OptionDef::new("shuffle", FLAG, Location::Nowhere)
		.with_flags(OptionFlags::NO_CONFIG_FILE)
		.with_help("play files in random order"),
	OptionDef::new("playlist", STRING, Location::Nowhere)
		.with_flags(OptionFlags::NO_CONFIG_FILE)
		.with_help("read files from a playlist"),
	OptionDef::new("v", STORE, Location::Nowhere)
		.with_flags(OptionFlags::GLOBAL.union(OptionFlags::NO_CONFIG_FILE))
		.with_help("increase verbosity"),
];
