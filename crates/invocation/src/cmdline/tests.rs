use mpconf_primitives::{DefaultValue, ErrorKind, FLAG, INT, OptionError, STRING, STRING_LIST};
use mpconf_registry::{CollectSink, Config, Level, Location, OptionDef, OptionFlags, Source, Storage};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;

static TV: [OptionDef; 1] = [OptionDef::new("channel", INT, Location::Field(6))];

static PLAYER: [OptionDef; 8] = [
	OptionDef::new("volume", INT, Location::Field(0))
		.with_range(0.0, 100.0)
		.with_default(DefaultValue::Int(50))
		.with_flags(OptionFlags::LOCAL),
	OptionDef::new("mute", FLAG, Location::Field(1)).with_flags(OptionFlags::LOCAL),
	OptionDef::new("title", STRING, Location::Field(2)),
	OptionDef::new("ao", STRING, Location::Field(3)).with_flags(OptionFlags::GLOBAL),
	OptionDef::new("noconfig", FLAG, Location::Field(4)).with_flags(OptionFlags::PRE_PARSE),
	OptionDef::new("consolecontrols", FLAG, Location::Field(5)).with_default(DefaultValue::Flag(true)),
	OptionDef::group("tv", &TV),
	OptionDef::new("af*", STRING_LIST, Location::Field(7)),
];

fn setup() -> (Config, CollectSink) {
	let sink = CollectSink::new();
	let mut config = Config::new(Storage::new()).with_sink(sink.clone());
	config.register(&CMDLINE_OPTIONS);
	config.register(&PLAYER);
	(config, sink)
}

fn run(config: &mut Config, args: &[&str]) -> (Result<CommandLine, CommandLineError>, Playlist) {
	let mut playlist = Playlist::new();
	let result = parse_command_line(config, &mut playlist, args);
	(result, playlist)
}

fn token_error_kind(result: Result<CommandLine, CommandLineError>) -> ErrorKind {
	match result {
		Err(CommandLineError::Token(err)) => err.kind(),
		other => panic!("expected a token error, got {other:?}"),
	}
}

#[test]
fn test_options_and_files() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["-volume", "80", "--mute", "a.mkv", "--title=x y", "--tv", "channel=4", "b.mkv"]);
	assert_eq!(result.unwrap(), CommandLine::default());
	assert_eq!(playlist.files(), vec!["a.mkv", "b.mkv"]);
	let registry = config.registry();
	assert_eq!(registry.int("volume"), Some(80));
	assert_eq!(registry.flag("mute"), Some(true));
	assert_eq!(registry.string("title"), Some("x y"));
	assert_eq!(registry.int("tv:channel"), Some(4));
}

#[test]
fn test_double_dash_ends_options() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["--", "-volume", "--"]);
	result.unwrap();
	assert_eq!(playlist.files(), vec!["-volume", "--"]);
}

#[test]
fn test_stdin_file_disables_console_controls() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["-"]);
	result.unwrap();
	assert_eq!(playlist.files(), vec!["-"]);
	assert_eq!(config.registry().flag("consolecontrols"), Some(false));
}

#[test]
fn test_missing_parameter() {
	let (mut config, sink) = setup();
	let (result, _) = run(&mut config, &["a.mkv", "-volume"]);
	assert_eq!(token_error_kind(result), ErrorKind::MissingParameter);
	assert_eq!(sink.messages(Level::ERROR), vec!["option 'volume' must have a parameter".to_string()]);
}

#[test]
fn test_unknown_option() {
	let (mut config, _) = setup();
	let (result, _) = run(&mut config, &["--bogus"]);
	assert_eq!(token_error_kind(result), ErrorKind::Unknown);
}

#[test]
fn test_negated_flag() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["--mute", "--no-mute", "a.mkv"]);
	result.unwrap();
	assert_eq!(config.registry().flag("mute"), Some(false));
	assert_eq!(playlist.len(), 1);

	let (result, _) = run(&mut config, &["--no-mute=yes"]);
	assert_eq!(token_error_kind(result), ErrorKind::Invalid);
}

#[test]
fn test_clear_suffix_takes_no_parameter() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["--af=a,b", "--af-clr", "file.mkv"]);
	result.unwrap();
	assert!(config.registry().list("af").unwrap().is_empty());
	assert_eq!(playlist.files(), vec!["file.mkv"]);
}

#[test]
fn test_local_group_attaches_params() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["-volume", "60", "--{", "-volume", "10", "--mute", "a", "b", "--}", "c"]);
	result.unwrap();
	assert_eq!(config.registry().int("volume"), Some(60));
	assert_eq!(config.registry().value("mute").unwrap().as_flag(), None);
	assert!(!config.is_local());

	let expected = vec![("volume".to_string(), Some("10".to_string())), ("mute".to_string(), None)];
	assert_eq!(playlist.entries()[0].params(), expected.as_slice());
	assert_eq!(playlist.entries()[1].params(), expected.as_slice());
	assert!(playlist.entries()[2].params().is_empty());
}

#[test]
fn test_group_without_files_warns() {
	let (mut config, sink) = setup();
	let (result, _) = run(&mut config, &["a", "--{", "-volume", "5", "--}"]);
	result.unwrap();
	assert_eq!(sink.messages(Level::WARN), vec!["Ignored options!".to_string()]);
}

#[rstest]
#[case(&["--{", "a", "--{"])]
#[case(&["--}"])]
#[case(&["--{", "a"])]
#[case(&["--{", "--ao", "alsa", "a", "--}"])]
#[case(&["--{", "-volume", "500", "a", "--}"])]
fn test_group_errors_leave_local_scope(#[case] args: &[&str]) {
	let (mut config, _) = setup();
	let (result, _) = run(&mut config, args);
	assert!(result.is_err());
	assert!(!config.is_local());
	assert_eq!(config.registry().int("volume"), Some(50));
}

#[test]
fn test_group_error_variants() {
	let (mut config, _) = setup();
	assert!(matches!(run(&mut config, &["--{", "--{"]).0, Err(CommandLineError::NestedLocal)));
	assert!(matches!(run(&mut config, &["--}"]).0, Err(CommandLineError::UnbalancedClose)));
	assert!(matches!(run(&mut config, &["--{"]).0, Err(CommandLineError::UnclosedLocal)));
}

#[test]
fn test_verbosity_counter() {
	let (mut config, _) = setup();
	let (result, _) = run(&mut config, &["-v", "a", "--v"]);
	assert_eq!(result.unwrap().verbosity, 2);
}

#[test]
fn test_shuffle_keeps_every_file() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["--shuffle", "a", "b", "c"]);
	assert!(result.unwrap().shuffle);
	let mut files = playlist.files();
	files.sort_unstable();
	assert_eq!(files, vec!["a", "b", "c"]);

	let (result, _) = run(&mut config, &["--shuffle", "--no-shuffle"]);
	assert!(!result.unwrap().shuffle);
}

#[test]
fn test_closing_bracket_clears_shuffle() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["--{", "--shuffle", "a", "--}", "b"]);
	assert!(!result.unwrap().shuffle);
	assert_eq!(playlist.files(), vec!["a", "b"]);

	let (result, _) = run(&mut config, &["--{", "a", "--}", "--shuffle", "b"]);
	assert!(result.unwrap().shuffle);
}

#[test]
fn test_playlist_file() {
	let dir = tempfile::tempdir().unwrap();
	let list = dir.path().join("list.txt");
	std::fs::write(&list, "x.mkv\ny.mkv\n").unwrap();
	let (mut config, _) = setup();
	let list = list.display().to_string();
	let (result, playlist) = run(&mut config, &["a.mkv", "--playlist", &list]);
	result.unwrap();
	assert_eq!(playlist.files(), vec!["a.mkv", "x.mkv", "y.mkv"]);

	let missing = dir.path().join("missing").display().to_string();
	let (result, _) = run(&mut config, &["--playlist", &missing]);
	assert!(matches!(result, Err(CommandLineError::Playlist { .. })));
}

#[test]
fn test_dvd_ranges() {
	let (mut config, sink) = setup();
	let (result, playlist) = run(&mut config, &["dvd://2-3", "dvd://9-1", "dvd://-1", "end"]);
	result.unwrap();
	assert_eq!(playlist.files(), vec!["dvd://2", "dvd://3", "end"]);
	assert_eq!(
		sink.messages(Level::ERROR),
		vec!["Invalid play entry dvd://9-1".to_string(), "Invalid play entry dvd://-1".to_string()]
	);
}

#[test]
fn test_requested_exit_stops_parsing() {
	let (mut config, _) = setup();
	let (result, playlist) = run(&mut config, &["--list-options", "a.mkv"]);
	let err = result.unwrap_err();
	assert_eq!(err.exit_code(), Some(0));
	assert!(playlist.is_empty());
}

#[test]
fn test_pre_parse_options_only_checked() {
	let (mut config, _) = setup();
	let (result, _) = run(&mut config, &["--noconfig"]);
	result.unwrap();
	assert_eq!(config.registry().value("noconfig").unwrap().as_flag(), None);
}

#[test]
fn test_preparse_applies_pre_parse_options_silently() {
	let (mut config, sink) = setup();
	preparse_command_line(&mut config, &["--volume", "80", "--noconfig", "--bogus", "a.mkv"]);
	assert_eq!(config.registry().flag("noconfig"), Some(true));
	assert_eq!(config.registry().int("volume"), Some(50));
	assert!(sink.records().is_empty());
	assert_eq!(config.source(), Source::ConfigFile);
}

#[test]
fn test_source_restored() {
	let (mut config, _) = setup();
	run(&mut config, &["a"]).0.unwrap();
	assert_eq!(config.source(), Source::ConfigFile);
	assert!(matches!(config.set("list-options", None), Err(OptionError::Invalid { .. })));
}
