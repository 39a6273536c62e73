//! The configuration context.

use std::rc::Rc;

use mpconf_primitives::OptionError;

use crate::def::OptionDef;
use crate::diag::{Diagnostic, DiagnosticSink, Level, TracingSink};
use crate::profile::ProfileStore;
use crate::registry::Registry;
use crate::self_opts::{INCLUDE_OPTIONS, SELF_OPTIONS};
use crate::storage::Storage;

/// Where the options currently being parsed come from.
///
/// Some options are only legal from one source; profiles are always replayed
/// as [`Source::ConfigFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Source {
	/// A configuration file (or a replayed profile).
	#[default]
	ConfigFile,
	/// The program's command line.
	CommandLine,
}

/// Callback invoked by the `include` option with the file to read.
pub type IncludeHandler = Rc<dyn Fn(&mut Config, &str) -> Result<(), OptionError>>;

/// A configuration: bound options, profiles, scope state and diagnostics.
///
/// All configuration activity is single-threaded and must be serialized by
/// the embedder; typically everything is parsed once at startup.
pub struct Config {
	pub(crate) registry: Registry,
	pub(crate) profiles: ProfileStore,
	pub(crate) source: Source,
	pub(crate) local: bool,
	pub(crate) profile_depth: usize,
	pub(crate) sink: Box<dyn DiagnosticSink>,
	pub(crate) include: Option<IncludeHandler>,
}

impl std::fmt::Debug for Config {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Config")
			.field("options", &self.registry.len())
			.field("profiles", &self.profiles.len())
			.field("source", &self.source)
			.field("local", &self.local)
			.finish()
	}
}

impl Config {
	/// Creates a configuration over `storage` with the built-in `profile`,
	/// `show-profile` and `list-options` options registered.
	pub fn new(storage: Storage) -> Self {
		let mut config = Self::bare(storage);
		config.registry.register(&SELF_OPTIONS);
		config
	}

	/// Creates a configuration with no built-in options.
	pub fn bare(storage: Storage) -> Self {
		Self {
			registry: Registry::new(storage),
			profiles: ProfileStore::default(),
			source: Source::default(),
			local: false,
			profile_depth: 0,
			sink: Box::new(TracingSink),
			include: None,
		}
	}

	/// Replaces the diagnostic sink.
	pub fn with_sink(mut self, sink: impl DiagnosticSink + 'static) -> Self {
		self.sink = Box::new(sink);
		self
	}

	/// Swaps the diagnostic sink, returning the previous one.
	pub fn replace_sink(&mut self, sink: Box<dyn DiagnosticSink>) -> Box<dyn DiagnosticSink> {
		std::mem::replace(&mut self.sink, sink)
	}

	/// Installs the handler behind the `include` option, registering the
	/// option on first use.
	pub fn set_include_handler(&mut self, handler: impl Fn(&mut Config, &str) -> Result<(), OptionError> + 'static) {
		if self.include.is_none() {
			self.registry.register(&INCLUDE_OPTIONS);
		}
		self.include = Some(Rc::new(handler));
	}

	/// Binds a table of schema nodes. Later tables shadow earlier ones.
	pub fn register(&mut self, defs: &'static [OptionDef]) {
		self.registry.register(defs);
	}

	/// The bound options.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// The active option source.
	pub fn source(&self) -> Source {
		self.source
	}

	/// Sets the active option source for the next parsing session.
	pub fn set_source(&mut self, source: Source) {
		self.source = source;
	}

	/// True while a local scope is active.
	pub fn is_local(&self) -> bool {
		self.local
	}

	/// Reports a diagnostic through the configuration's sink.
	pub fn report(&mut self, level: Level, message: impl Into<String>) {
		self.diag(level, message);
	}

	pub(crate) fn diag(&mut self, level: Level, message: impl Into<String>) {
		self.sink.emit(Diagnostic {
			level,
			message: message.into(),
		});
	}
}
