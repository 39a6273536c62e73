//! Options of the demonstration player.

use mpconf_primitives::{Choice, DefaultValue, FLAG, FLOAT, INT, STRING, STRING_LIST};
use mpconf_registry::{Location, OptionDef, OptionFlags, SubSchema};

pub const VOLUME: u16 = 0;
pub const MUTE: u16 = 1;
pub const SPEED: u16 = 2;
pub const AO: u16 = 3;
pub const VO: u16 = 4;
pub const FULLSCREEN: u16 = 5;
pub const TITLE: u16 = 6;
pub const CONSOLE_CONTROLS: u16 = 7;
pub const NO_CONFIG: u16 = 8;
pub const AUDIO_FILTERS: u16 = 9;
pub const SCALE: u16 = 10;
pub const CROP: u16 = 11;
pub const CACHE_SIZE: u16 = 12;
pub const CACHE_MIN: u16 = 13;
pub const RADIO: u16 = 14;

static RADIO_DRIVERS: Choice = Choice::new(&["default", "v4l", "v4l2", "bsdbt848"]);

static RADIO_OPTIONS: [OptionDef; 9] = [
	OptionDef::new("device", STRING, Location::Field(0)).with_help("radio device"),
	OptionDef::new("driver", &RADIO_DRIVERS, Location::Field(1)).with_help("radio driver"),
	OptionDef::new("channels", STRING_LIST, Location::Field(2)).with_help("frequency-name channel list"),
	OptionDef::new("volume", INT, Location::Field(3)).with_range(0.0, 100.0),
	OptionDef::new("adevice", STRING, Location::Field(4)).with_help("capture device"),
	OptionDef::new("arate", INT, Location::Field(5)).with_min(0.0),
	OptionDef::new("achannels", INT, Location::Field(6)).with_min(0.0),
	OptionDef::new("freq-channel", FLOAT, Location::Field(7)),
	OptionDef::new("capture", FLAG, Location::Field(8)),
];

pub static RADIO_SCHEMA: SubSchema = SubSchema {
	name: "radio",
	options: &RADIO_OPTIONS,
	defaults: &[
		(0, DefaultValue::Str("/dev/radio0")),
		(1, DefaultValue::Str("default")),
		(3, DefaultValue::Int(100)),
		(5, DefaultValue::Int(44100)),
		(6, DefaultValue::Int(2)),
		(7, DefaultValue::Float(0.0)),
	],
};

static VIDEO_FILTERS: [OptionDef; 2] = [
	OptionDef::new("scale", INT, Location::Field(SCALE)).with_min(1.0),
	OptionDef::new("crop", STRING, Location::Field(CROP)),
];

static CACHE: [OptionDef; 2] = [
	OptionDef::new("cache", INT, Location::Field(CACHE_SIZE))
		.with_min(32.0)
		.with_help("cache size in kilobytes"),
	OptionDef::new("cache-min", FLOAT, Location::Field(CACHE_MIN)).with_range(0.0, 99.0),
];

pub static PLAYER_OPTIONS: [OptionDef; 14] = [
	OptionDef::new("volume", INT, Location::Field(VOLUME))
		.with_range(0.0, 100.0)
		.with_default(DefaultValue::Int(100))
		.with_flags(OptionFlags::LOCAL),
	OptionDef::new("mute", FLAG, Location::Field(MUTE))
		.with_default(DefaultValue::Flag(false))
		.with_flags(OptionFlags::LOCAL),
	OptionDef::new("speed", FLOAT, Location::Field(SPEED))
		.with_range(0.01, 100.0)
		.with_default(DefaultValue::Float(1.0))
		.with_flags(OptionFlags::LOCAL),
	OptionDef::new("ao", STRING_LIST, Location::Field(AO)).with_flags(OptionFlags::GLOBAL),
	OptionDef::new("vo", STRING_LIST, Location::Field(VO)).with_flags(OptionFlags::GLOBAL),
	OptionDef::new("fs", FLAG, Location::Field(FULLSCREEN)).with_default(DefaultValue::Flag(false)),
	OptionDef::new("fullscreen", FLAG, Location::Field(FULLSCREEN)),
	OptionDef::new("title", STRING, Location::Field(TITLE)),
	OptionDef::new("consolecontrols", FLAG, Location::Field(CONSOLE_CONTROLS))
		.with_default(DefaultValue::Flag(true))
		.with_flags(OptionFlags::GLOBAL),
	OptionDef::new("noconfig", FLAG, Location::Field(NO_CONFIG))
		.with_flags(OptionFlags::PRE_PARSE.union(OptionFlags::NO_CONFIG_FILE))
		.with_help("don't read the user config file"),
	OptionDef::new("af*", STRING_LIST, Location::Field(AUDIO_FILTERS)).with_help("audio filter chain"),
	OptionDef::group("vf", &VIDEO_FILTERS).with_flags(OptionFlags::PREFIXED),
	OptionDef::group("cache", &CACHE).with_flags(OptionFlags::MERGE),
	OptionDef::substruct("radio", Location::Field(RADIO), &RADIO_SCHEMA),
];
