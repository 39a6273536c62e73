//! Schema shared by the crate's unit tests.

use mpconf_primitives::{Choice, DefaultValue, FLAG, FLOAT, INT, STORE, STRING, STRING_LIST};

use crate::config::Config;
use crate::def::{Location, OptionDef, OptionFlags, SubSchema};
use crate::diag::CollectSink;
use crate::storage::Storage;

pub(crate) const VOLUME: u16 = 0;
pub(crate) const MUTE: u16 = 1;
pub(crate) const TITLE: u16 = 2;
pub(crate) const SPEED: u16 = 3;
pub(crate) const AO: u16 = 4;
pub(crate) const CHANNEL: u16 = 6;
pub(crate) const NORM: u16 = 7;
pub(crate) const RADIO: u16 = 9;
pub(crate) const CACHE_SIZE: u16 = 10;
pub(crate) const VF_SCALE: u16 = 11;
pub(crate) const AF: u16 = 12;

static NORMS: Choice = Choice::new(&["pal", "ntsc", "secam"]);

static TV: [OptionDef; 3] = [
	OptionDef::new("channel", INT, Location::Field(CHANNEL)).with_min(0.0),
	OptionDef::new("norm", &NORMS, Location::Field(NORM)),
	OptionDef::new("on", FLAG, Location::Field(8)),
];

static RADIO_OPTIONS: [OptionDef; 3] = [
	OptionDef::new("device", STRING, Location::Field(0)),
	OptionDef::new("volume", INT, Location::Field(1)).with_range(0.0, 100.0),
	OptionDef::new("capture", FLAG, Location::Field(2)),
];

pub(crate) static RADIO_SCHEMA: SubSchema = SubSchema {
	name: "radio",
	options: &RADIO_OPTIONS,
	defaults: &[(0, DefaultValue::Str("/dev/radio0")), (1, DefaultValue::Int(100))],
};

static CACHE: [OptionDef; 1] = [OptionDef::new("cache-size", INT, Location::Field(CACHE_SIZE)).with_min(32.0)];

static VF: [OptionDef; 1] = [OptionDef::new("scale", INT, Location::Field(VF_SCALE))];

pub(crate) static PLAYER: [OptionDef; 14] = [
	OptionDef::new("volume", INT, Location::Field(VOLUME))
		.with_range(0.0, 100.0)
		.with_default(DefaultValue::Int(50))
		.with_flags(OptionFlags::LOCAL),
	OptionDef::new("mute", FLAG, Location::Field(MUTE)).with_flags(OptionFlags::LOCAL),
	OptionDef::new("title", STRING, Location::Field(TITLE)),
	OptionDef::new("speed", FLOAT, Location::Field(SPEED)).with_default(DefaultValue::Float(1.0)),
	OptionDef::new("ao", STRING, Location::Field(AO)).with_flags(OptionFlags::GLOBAL),
	OptionDef::group("tv", &TV),
	OptionDef::substruct("radio", Location::Field(RADIO), &RADIO_SCHEMA),
	OptionDef::group("cache", &CACHE).with_flags(OptionFlags::MERGE),
	OptionDef::group("vf", &VF).with_flags(OptionFlags::PREFIXED),
	OptionDef::new("af*", STRING_LIST, Location::Field(AF)),
	OptionDef::new("vol", INT, Location::Field(VOLUME)).with_default(DefaultValue::Int(7)),
	OptionDef::new("quit-after", STORE, Location::Field(13)).with_flags(OptionFlags::NO_CONFIG_FILE),
	OptionDef::new("cfg-only", FLAG, Location::Field(14)).with_flags(OptionFlags::NO_COMMAND_LINE),
	OptionDef::new("dump", STRING, Location::Shared("dump")),
];

/// A configuration with [`PLAYER`] registered and diagnostics captured.
pub(crate) fn player() -> (Config, CollectSink) {
	let sink = CollectSink::new();
	let mut config = Config::new(Storage::new()).with_sink(sink.clone());
	config.register(&PLAYER);
	(config, sink)
}
