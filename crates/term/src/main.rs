//! mpconf: parses a player's config file and command line and prints the
//! resulting option values and playlist.

mod schema;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use mpconf_invocation::{CMDLINE_OPTIONS, CommandLine, Playlist, parse_command_line, preparse_command_line};
use mpconf_registry::{Config, Storage};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::reload;

use crate::schema::PLAYER_OPTIONS;

/// Parsed state ready for playback.
#[derive(Debug)]
struct Session {
	config: Config,
	playlist: Playlist,
	cmdline: CommandLine,
}

/// What startup decided.
#[derive(Debug)]
enum Startup {
	Run(Session),
	Exit(i32),
}

fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("mpconf").join("config"))
}

/// Builds the configuration from `config_file` (unless `--noconfig`) and `args`.
fn startup(args: &[String], config_file: Option<&Path>) -> anyhow::Result<Startup> {
	let mut config = Config::new(Storage::new());
	config.register(&CMDLINE_OPTIONS);
	config.register(&PLAYER_OPTIONS);
	config.install_file_include();

	preparse_command_line(&mut config, args);

	if config.registry().flag("noconfig") != Some(true)
		&& let Some(path) = config_file.filter(|p| p.exists())
	{
		if let Err(err) = config.load_config_file(path) {
			if let mpconf_registry::ConfigFileError::Option { source, .. } = &err
				&& let Some(code) = exit_code(source)
			{
				return Ok(Startup::Exit(code));
			}
			return Err(err).with_context(|| format!("failed to load {}", path.display()));
		}
	}

	let mut playlist = Playlist::new();
	match parse_command_line(&mut config, &mut playlist, args) {
		Ok(cmdline) => Ok(Startup::Run(Session {
			config,
			playlist,
			cmdline,
		})),
		Err(err) => match err.exit_code() {
			Some(code) => Ok(Startup::Exit(code)),
			None => Err(err).context("invalid command line"),
		},
	}
}

fn exit_code(err: &mpconf_primitives::OptionError) -> Option<i32> {
	match err {
		mpconf_primitives::OptionError::RequestedExit { code } => Some(*code),
		_ => None,
	}
}

/// Renders option values and the playlist, one item per line.
fn summary(session: &Session) -> Vec<String> {
	let registry = session.config.registry();
	let mut options: Vec<(String, String)> = registry
		.bindings()
		.filter(|b| !b.is_composite() && !b.is_alias())
		.filter_map(|b| {
			let value = registry.storage().get(&b.storage()?);
			let printed = b.def().kind.print(value)?;
			Some((b.name().to_string(), printed))
		})
		.collect();
	options.sort();

	let mut lines: Vec<String> = options.into_iter().map(|(name, value)| format!("{name}={value}")).collect();
	for entry in session.playlist.entries() {
		lines.push(format!("file {}", entry.file()));
		for (name, param) in entry.params() {
			match param {
				Some(param) => lines.push(format!("  {name}={param}")),
				None => lines.push(format!("  {name}")),
			}
		}
	}
	lines
}

fn setup_tracing() -> reload::Handle<EnvFilter, tracing_subscriber::Registry> {
	let filter = EnvFilter::try_from_env("MPCONF_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
	let (filter, handle) = reload::Layer::new(filter);
	tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
		.init();
	handle
}

fn main() -> anyhow::Result<()> {
	let filter = setup_tracing();
	let args: Vec<String> = std::env::args().skip(1).collect();
	let config_file = default_config_path();

	let session = match startup(&args, config_file.as_deref())? {
		Startup::Run(session) => session,
		Startup::Exit(code) => std::process::exit(code),
	};

	if session.cmdline.verbosity > 0 && std::env::var_os("MPCONF_LOG").is_none() {
		let level = if session.cmdline.verbosity > 1 { "trace" } else { "debug" };
		filter.reload(EnvFilter::new(level)).context("failed to raise log level")?;
	}
	tracing::debug!(verbosity = session.cmdline.verbosity, files = session.playlist.len(), "configuration parsed");

	for line in summary(&session) {
		println!("{line}");
	}
	Ok(())
}
