//! Option registry, profiles and scoped overrides.
//!
//! A [`Config`] binds static schema tables ([`OptionDef`]) to [`Storage`] and
//! parses textual values into it from the command line, config files and
//! profiles:
//!
//! ```
//! use mpconf_registry::{Config, Location, OptionDef, Storage};
//! use mpconf_primitives::INT;
//!
//! static OPTIONS: [OptionDef; 1] = [OptionDef::new("volume", INT, Location::Field(0)).with_range(0.0, 100.0)];
//!
//! let mut config = Config::new(Storage::new());
//! config.register(&OPTIONS);
//! config.set("volume", Some("80")).unwrap();
//! assert_eq!(config.registry().int("volume"), Some(80));
//! ```

mod config;
mod config_file;
mod def;
mod diag;
mod list;
mod local;
mod parse;
mod profile;
mod registry;
mod self_opts;
mod storage;

pub use config::{Config, IncludeHandler, Source};
pub use config_file::{ConfigFileError, DEFAULT_SECTION, PROFILE_DESC_KEY};
pub use def::{Children, Location, OptionDef, OptionFlags, SubSchema};
pub use diag::{CollectSink, Diagnostic, DiagnosticSink, Level, SilentSink, TracingSink};
pub use list::{OptionInfo, format_option_list};
pub use parse::NEGATION_PREFIX;
pub use profile::{MAX_PROFILE_DEPTH, Profile, ProfileId, ProfileStore};
pub use registry::{Binding, BindingId, Registry};
pub use self_opts::INFO_EXIT_CODE;
pub use storage::{Block, Storage, StorageKey};

pub use mpconf_primitives as primitives;

#[cfg(test)]
mod testing;
