use std::io::Write as _;

use mpconf_primitives::{ErrorKind, OptionError};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::testing::player;

#[test]
fn test_applies_top_level_entries() {
	let (mut config, _) = player();
	let text = "# comment\n\nvolume = 70\nmute\ntitle=\"a # b\"  # trailing\ntv=channel=9:norm=pal\n";
	config.parse_config_str("test", text).unwrap();
	let registry = config.registry();
	assert_eq!(registry.int("volume"), Some(70));
	assert_eq!(registry.flag("mute"), Some(true));
	assert_eq!(registry.string("title"), Some("a # b"));
	assert_eq!(registry.int("tv:channel"), Some(9));
}

#[test]
fn test_sections_record_profiles() {
	let (mut config, _) = player();
	let text = "volume=60\n[night]\nprofile-desc=\"quiet playback\"\nvolume=20\nmute\n[default]\ntitle=main\n";
	config.parse_config_str("test", text).unwrap();

	assert_eq!(config.registry().int("volume"), Some(60));
	assert_eq!(config.registry().string("title"), Some("main"));
	let id = config.profile_id("night").unwrap();
	let profile = config.profile(id);
	assert_eq!(profile.desc(), Some("quiet playback"));
	assert_eq!(
		profile.entries(),
		&[("volume".to_string(), "20".to_string()), ("mute".to_string(), String::new())]
	);

	config.apply_profile(id).unwrap();
	assert_eq!(config.registry().int("volume"), Some(20));
	assert_eq!(config.registry().flag("mute"), Some(true));
}

#[rstest]
#[case("bogus=1", 1, ErrorKind::Unknown)]
#[case("volume=1\nvolume=500", 2, ErrorKind::OutOfRange)]
#[case("quit-after", 1, ErrorKind::Invalid)]
#[case("\n\ntitle", 3, ErrorKind::MissingParameter)]
fn test_first_rejected_entry_aborts(#[case] text: &str, #[case] line: usize, #[case] kind: ErrorKind) {
	let (mut config, _) = player();
	let err = config.parse_config_str("conf", text).unwrap_err();
	match err {
		ConfigFileError::Option { origin, line: at, source } => {
			assert_eq!(origin, "conf");
			assert_eq!(at, line);
			assert_eq!(source.kind(), kind);
		}
		other => panic!("unexpected error {other:?}"),
	}
}

#[rstest]
#[case("[night")]
#[case("[]")]
#[case("= 3")]
#[case("title=\"open")]
#[case("two words=1")]
fn test_syntax_errors(#[case] text: &str) {
	let (mut config, _) = player();
	assert!(matches!(config.parse_config_str("conf", text), Err(ConfigFileError::Syntax { line: 1, .. })));
}

#[test]
fn test_bare_key_in_section_needs_no_parameter() {
	let (mut config, _) = player();
	for (text, expected_line) in [("title\n", 1), ("[night]\nmute\ntitle\n", 3)] {
		let ConfigFileError::Option { line, source, .. } = config.parse_config_str("test", text).unwrap_err() else {
			panic!("expected an option error");
		};
		assert_eq!(line, expected_line);
		assert_eq!(source.kind(), ErrorKind::MissingParameter);
	}

	let id = config.profile_id("night").unwrap();
	assert_eq!(config.profile(id).entries(), &[("mute".to_string(), String::new())]);
}

#[test]
fn test_error_display_names_origin_and_line() {
	let (mut config, _) = player();
	let err = config.parse_config_str("player.conf", "volume=1\nbogus").unwrap_err();
	assert!(err.to_string().starts_with("player.conf:2: unknown option: bogus"));
}

#[test]
fn test_source_restored_after_parse() {
	let (mut config, _) = player();
	config.set_source(Source::CommandLine);
	config.parse_config_str("conf", "cfg-only").unwrap();
	assert_eq!(config.source(), Source::CommandLine);
	assert!(config.parse_config_str("conf", "bogus").is_err());
	assert_eq!(config.source(), Source::CommandLine);
}

#[test]
fn test_load_file_and_include() {
	let dir = tempfile::tempdir().unwrap();
	let included = dir.path().join("included.conf");
	std::fs::write(&included, "volume=33\n").unwrap();
	let main = dir.path().join("main.conf");
	let mut file = std::fs::File::create(&main).unwrap();
	writeln!(file, "title=main").unwrap();
	writeln!(file, "include={}", included.display()).unwrap();
	drop(file);

	let (mut config, _) = player();
	config.install_file_include();
	config.load_config_file(&main).unwrap();
	assert_eq!(config.registry().string("title"), Some("main"));
	assert_eq!(config.registry().int("volume"), Some(33));
}

#[test]
fn test_include_of_missing_file_fails() {
	let dir = tempfile::tempdir().unwrap();
	let (mut config, _) = player();
	config.install_file_include();
	let missing = dir.path().join("missing.conf");
	let err = config.parse_config_str("conf", &format!("include={}", missing.display())).unwrap_err();
	match err {
		ConfigFileError::Option { source: OptionError::Invalid { name, .. }, .. } => assert_eq!(name, "include"),
		other => panic!("unexpected error {other:?}"),
	}
}

#[test]
fn test_missing_file_is_io_error() {
	let dir = tempfile::tempdir().unwrap();
	let (mut config, _) = player();
	let err = config.load_config_file(dir.path().join("nope")).unwrap_err();
	assert!(matches!(err, ConfigFileError::Io { .. }));
}

#[test]
fn test_requested_exit_propagates() {
	let (mut config, _) = player();
	config.set_include_handler(|_, _| Err(OptionError::RequestedExit { code: 0 }));
	let err = config.parse_config_str("conf", "include=x\nvolume=1").unwrap_err();
	assert!(err.is_exit());
	assert_eq!(config.registry().int("volume"), Some(50));
}
