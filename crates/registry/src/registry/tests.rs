use std::sync::atomic::{AtomicUsize, Ordering};

use mpconf_primitives::{Bounds, DefaultValue, KindFlags, OptionError, OptionKind, OptionValue, STRING};
use pretty_assertions::assert_eq;
use rstest::rstest;

use super::*;
use crate::storage::Block;
use crate::testing::{PLAYER, RADIO, RADIO_SCHEMA, VOLUME};

fn player_registry() -> Registry {
	let mut registry = Registry::default();
	registry.register(&PLAYER);
	registry
}

#[rstest]
#[case("volume")]
#[case("tv:channel")]
#[case("tv:norm")]
#[case("radio:device")]
#[case("radio:volume")]
#[case("cache-size")]
#[case("vf-scale")]
#[case("dump")]
fn test_bound_names_resolve_to_themselves(#[case] name: &str) {
	let registry = player_registry();
	let id = registry.resolve(name).expect("name should resolve");
	assert_eq!(registry.binding(id).name(), name);
}

#[test]
fn test_resolve_is_case_insensitive() {
	let registry = player_registry();
	assert_eq!(registry.resolve("VOLUME"), registry.resolve("volume"));
	assert_eq!(registry.resolve("Radio:Device"), registry.resolve("radio:device"));
}

#[test]
fn test_merge_children_are_named_at_parent_level() {
	let registry = player_registry();
	assert!(registry.resolve("cache").is_none());
	assert!(registry.resolve("cache:cache-size").is_none());
	let id = registry.resolve("cache-size").unwrap();
	assert_eq!(registry.binding(id).parent(), None);
}

#[test]
fn test_composites_resolve() {
	let registry = player_registry();
	let tv = registry.resolve("tv").unwrap();
	assert!(registry.binding(tv).is_composite());
	let channel = registry.resolve("tv:channel").unwrap();
	assert_eq!(registry.binding(channel).parent(), Some(tv));
}

#[test]
fn test_prefixed_children_use_dash() {
	let registry = player_registry();
	assert!(registry.resolve("vf-scale").is_some());
	assert!(registry.resolve("vf:scale").is_none());
}

#[test]
fn test_defaults_written_at_registration() {
	let registry = player_registry();
	assert_eq!(registry.int("volume"), Some(50));
	assert_eq!(registry.float("speed"), Some(1.0));
	assert_eq!(registry.string("radio:device"), Some("/dev/radio0"));
	assert_eq!(registry.int("radio:volume"), Some(100));
	assert_eq!(registry.value("title"), Some(&OptionValue::None));
}

#[test]
fn test_alias_shares_storage_and_keeps_owner_default() {
	let registry = player_registry();
	let vol = registry.resolve("vol").unwrap();
	let volume = registry.resolve("volume").unwrap();
	assert!(registry.binding(vol).is_alias());
	assert!(!registry.binding(volume).is_alias());
	assert_eq!(registry.binding(vol).storage(), registry.binding(volume).storage());
	assert_eq!(registry.int("vol"), Some(50));
}

#[test]
fn test_substruct_allocated_once_from_defaults() {
	let registry = player_registry();
	assert_eq!(registry.allocated_blocks().len(), 1);
	let block = registry.storage().root().get(RADIO).as_block().unwrap();
	assert_eq!(registry.allocated_blocks(), &[block]);
	let radio = registry.resolve("radio").unwrap();
	assert_eq!(registry.binding(radio).child_block(), Some(block));
}

#[test]
fn test_substruct_reuses_prepopulated_block() {
	let mut storage = Storage::new();
	let block = storage.alloc(Block::new().with(0, "/dev/radio9"));
	storage.root_mut().set(RADIO, OptionValue::Block(block));

	let mut registry = Registry::new(storage);
	registry.register(&PLAYER);

	assert!(registry.allocated_blocks().is_empty());
	assert_eq!(registry.storage().block_count(), 2);
	assert_eq!(registry.string("radio:device"), Some("/dev/radio9"));
}

#[test]
fn test_later_registration_shadows_earlier() {
	static OVERRIDE: [OptionDef; 1] = [OptionDef::new("title", STRING, Location::Shared("other-title"))];
	let mut registry = player_registry();
	let before = registry.resolve("title").unwrap();
	registry.register(&OVERRIDE);
	let after = registry.resolve("title").unwrap();
	assert_ne!(before, after);
	assert_eq!(registry.binding(after).storage(), Some(StorageKey::Shared("other-title")));
}

#[test]
fn test_wildcard_matches_prefix() {
	let registry = player_registry();
	let af = registry.resolve("af").unwrap();
	assert_eq!(registry.resolve("af-add"), Some(af));
	assert_eq!(registry.resolve("AF-CLR"), Some(af));
	assert!(registry.resolve("a").is_none());
}

#[test]
fn test_later_wildcard_wins_over_exact_name() {
	static EXACT: [OptionDef; 1] = [OptionDef::new("vop", STRING, Location::Shared("vop"))];
	static WILD: [OptionDef; 1] = [OptionDef::new("vo*", mpconf_primitives::STRING_LIST, Location::Shared("vo-list"))];
	let mut registry = Registry::default();
	registry.register(&EXACT);
	registry.register(&WILD);
	let id = registry.resolve("vop").unwrap();
	assert_eq!(registry.binding(id).name(), "vo*");
}

#[test]
fn test_seeded_dynamic_slot_is_normalized() {
	let mut storage = Storage::new();
	storage.set_shared("dump", "seeded");
	let mut registry = Registry::new(storage);
	registry.register(&PLAYER);
	assert_eq!(registry.string("dump"), Some("seeded"));
}

#[test]
fn test_suggestion_for_typo() {
	let registry = player_registry();
	assert_eq!(registry.suggest("volme").as_deref(), Some("volume"));
	assert_eq!(registry.suggest("zzzzzzzzzz"), None);
}

#[test]
fn test_root_field_layout() {
	let registry = player_registry();
	assert_eq!(registry.storage().root().get(VOLUME), &OptionValue::Int(50));
	let radio = registry.storage().root().get(RADIO).as_block().unwrap();
	let block = registry.storage().block(radio).unwrap();
	for &(field, default) in RADIO_SCHEMA.defaults {
		assert_eq!(block.get(field), &default.to_value());
	}
	assert_eq!(block.get(2), &OptionValue::None);
}

static FREED: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
struct Counted;

impl OptionKind for Counted {
	fn name(&self) -> &'static str {
		"Counted"
	}

	fn flags(&self) -> KindFlags {
		KindFlags::DYNAMIC
	}

	fn parse(&self, name: &str, param: Option<&str>, _bounds: &Bounds, _current: &OptionValue) -> Result<OptionValue, OptionError> {
		param.map(OptionValue::from).ok_or_else(|| OptionError::missing(name))
	}

	fn free(&self, value: &mut OptionValue) {
		if !value.is_none() {
			FREED.fetch_add(1, Ordering::SeqCst);
		}
		*value = OptionValue::None;
	}

	fn print(&self, value: &OptionValue) -> Option<String> {
		value.as_str().map(str::to_string)
	}
}

static COUNTED: [OptionDef; 2] = [
	OptionDef::new("owner", &Counted, Location::Shared("counted")).with_default(DefaultValue::Str("x")),
	OptionDef::new("view", &Counted, Location::Shared("counted")),
];

#[test]
fn test_teardown_frees_owned_storage_once() {
	FREED.store(0, Ordering::SeqCst);
	{
		let mut registry = Registry::default();
		registry.register(&COUNTED);
		assert!(registry.binding(registry.resolve("view").unwrap()).is_alias());
	}
	assert_eq!(FREED.load(Ordering::SeqCst), 1);
}
