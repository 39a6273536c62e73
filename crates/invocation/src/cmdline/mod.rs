//! Applying a command line to a configuration.

use std::path::PathBuf;

use mpconf_primitives::{Bounds, FLAG, OptionError, OptionValue};
use mpconf_registry::{Config, Level, OptionDef, OptionFlags, SilentSink, Source};
use thiserror::Error;

use crate::options::CMDLINE_OPTIONS;
use crate::playlist::{Playlist, expand_dvd_range};
use crate::token::{Token, Tokenizer};

#[cfg(test)]
mod tests;

/// File argument that reads from standard input.
const STDIN_FILE: &str = "-";

/// Option that stops the player from reading keys when stdin is the input.
const CONSOLE_CONTROLS: &str = "consolecontrols";

/// What the command line asked for besides option values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandLine {
	/// Number of `-v` flags given.
	pub verbosity: u32,
	/// Whether the playlist was shuffled.
	pub shuffle: bool,
}

/// Errors that stop command-line parsing.
#[derive(Debug, Error)]
pub enum CommandLineError {
	/// An argument could not be read as an option.
	#[error(transparent)]
	Token(OptionError),

	/// An option rejected its parameter, or asked to exit.
	#[error("error parsing command line option {option}: {source}")]
	Option {
		/// Option name as given.
		option: String,
		/// Why it was rejected.
		#[source]
		source: OptionError,
	},

	/// `--{` inside an open `--{`.
	#[error("'--{{' can not be nested")]
	NestedLocal,

	/// `--}` without a matching `--{`.
	#[error("too many closing '--}}'")]
	UnbalancedClose,

	/// The arguments ended inside `--{`.
	#[error("missing closing '--}}' on command line")]
	UnclosedLocal,

	/// A `--playlist` file could not be read.
	#[error("I/O error reading playlist {path}: {error}")]
	Playlist {
		/// Path given to `--playlist`.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

impl CommandLineError {
	/// Exit code requested by an informational option, if that is what
	/// stopped parsing.
	pub fn exit_code(&self) -> Option<i32> {
		match self {
			Self::Option {
				source: OptionError::RequestedExit { code },
				..
			} => Some(*code),
			_ => None,
		}
	}

	/// True if parsing stopped because an option asked to exit.
	pub fn is_exit(&self) -> bool {
		self.exit_code().is_some()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
	Open,
	Close,
	Shuffle,
	Playlist,
	Verbose,
}

impl Builtin {
	fn of(def: &'static OptionDef) -> Option<Self> {
		const ALL: [Builtin; 5] = [Builtin::Open, Builtin::Close, Builtin::Shuffle, Builtin::Playlist, Builtin::Verbose];
		ALL.into_iter()
			.zip(CMDLINE_OPTIONS.iter())
			.find(|(_, builtin)| std::ptr::eq(def, *builtin))
			.map(|(builtin, _)| builtin)
	}
}

/// Per-file option group being collected between `--{` and `--}`.
#[derive(Debug, Default)]
struct LocalGroup {
	/// Playlist length when the group opened.
	start: usize,
	params: Vec<(String, Option<String>)>,
}

/// Parses `args` (without the program name) into `config` and `playlist`.
///
/// Options outside brackets are set, except `PRE_PARSE` ones which were set
/// by [`preparse_command_line`] and are only checked here. Options inside
/// `--{ ... --}` are checked in a local scope and attached to each file added
/// inside the brackets. Parsing stops at the first error, and a requested
/// exit is returned as [`CommandLineError::Option`] carrying
/// [`OptionError::RequestedExit`].
///
/// # Panics
///
/// Panics if `config` is already in a local scope.
pub fn parse_command_line<S: AsRef<str>>(
	config: &mut Config,
	playlist: &mut Playlist,
	args: &[S],
) -> Result<CommandLine, CommandLineError> {
	assert!(!config.is_local(), "command line parsed inside a local scope");
	let previous = config.source();
	config.set_source(Source::CommandLine);

	let result = apply_args(config, playlist, args);
	if config.is_local() {
		config.leave_local();
	}
	config.set_source(previous);

	if let Err(err) = &result
		&& !err.is_exit()
	{
		config.report(Level::ERROR, err.to_string());
	}
	result
}

fn apply_args<S: AsRef<str>>(config: &mut Config, playlist: &mut Playlist, args: &[S]) -> Result<CommandLine, CommandLineError> {
	let mut outcome = CommandLine::default();
	let mut group: Option<LocalGroup> = None;
	let mut tokens = Tokenizer::new(args);

	while let Some(token) = tokens.next_token(config) {
		let (name, param, def) = match token.map_err(CommandLineError::Token)? {
			Token::File(file) => {
				add_file(config, playlist, &file);
				continue;
			}
			Token::Option { name, param, def } => (name, param, def),
		};

		let result = if group.is_none() && !def.flags.contains(OptionFlags::PRE_PARSE) {
			config.set(&name, param.as_deref())
		} else {
			config.check(&name, param.as_deref())
		};
		result.map_err(|source| CommandLineError::Option {
			option: name.clone(),
			source,
		})?;

		match Builtin::of(def) {
			Some(Builtin::Open) => {
				if group.is_some() {
					return Err(CommandLineError::NestedLocal);
				}
				config.enter_local();
				group = Some(LocalGroup {
					start: playlist.len(),
					params: Vec::new(),
				});
			}
			Some(Builtin::Close) => {
				let Some(closed) = group.take() else {
					return Err(CommandLineError::UnbalancedClose);
				};
				if !closed.params.is_empty() && playlist.add_params_from(closed.start, &closed.params) == 0 {
					config.report(Level::WARN, "Ignored options!");
				}
				config.leave_local();
				outcome.shuffle = false;
			}
			Some(Builtin::Shuffle) => {
				outcome.shuffle = FLAG
					.parse(&name, param.as_deref(), &Bounds::NONE, &OptionValue::None)
					.ok()
					.and_then(|v| v.as_flag())
					.unwrap_or(true);
			}
			Some(Builtin::Playlist) => {
				let path = PathBuf::from(param.unwrap_or_default());
				let list = Playlist::from_file(&path).map_err(|error| CommandLineError::Playlist { path, error })?;
				playlist.append(list);
			}
			Some(Builtin::Verbose) => outcome.verbosity += 1,
			None => {
				if let Some(group) = group.as_mut() {
					group.params.push((name, param));
				}
			}
		}
	}

	if group.is_some() {
		return Err(CommandLineError::UnclosedLocal);
	}
	if outcome.shuffle {
		playlist.shuffle();
	}
	tracing::debug!(domain = "options", files = playlist.len(), verbosity = outcome.verbosity, "command line parsed");
	Ok(outcome)
}

fn add_file(config: &mut Config, playlist: &mut Playlist, file: &str) {
	match expand_dvd_range(file) {
		Some(files) => files.into_iter().for_each(|f| playlist.add_file(f)),
		None => config.report(Level::ERROR, format!("Invalid play entry {file}")),
	}

	if file == STDIN_FILE
		&& config.registry().resolve(CONSOLE_CONTROLS).is_some()
		&& let Err(err) = config.set(CONSOLE_CONTROLS, Some("no"))
	{
		config.report(Level::WARN, err.to_string());
	}
}

/// Applies only the `PRE_PARSE` options of `args`, silently.
///
/// Runs before config files are read, so options like `--noconfig` can
/// affect that. Errors are ignored here and reported by the full parse, and
/// reading stops at the first argument that can't be tokenized.
pub fn preparse_command_line<S: AsRef<str>>(config: &mut Config, args: &[S]) {
	let sink = config.replace_sink(Box::new(SilentSink));
	let previous = config.source();
	config.set_source(Source::CommandLine);

	let mut tokens = Tokenizer::new(args);
	while let Some(Ok(token)) = tokens.next_token(config) {
		if let Token::Option { name, param, def } = token
			&& def.flags.contains(OptionFlags::PRE_PARSE)
		{
			let _ = config.set(&name, param.as_deref());
		}
	}

	config.set_source(previous);
	config.replace_sink(sink);
}
