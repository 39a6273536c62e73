//! Configuration storage arena.
//!
//! A configuration is a set of [`Block`]s (the root plus every allocated
//! sub-structure) and a table of shared slots. Every storage location has a
//! stable [`StorageKey`], which is what the registry uses to detect options
//! that share storage.

use mpconf_primitives::{BlockId, DefaultValue, OptionValue};
use rustc_hash::FxHashMap as HashMap;

static EMPTY: OptionValue = OptionValue::None;

/// One structure: an indexed set of value fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
	fields: Vec<OptionValue>,
}

impl Block {
	/// Creates an empty block; every field reads as [`OptionValue::None`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a block from compile-time field defaults.
	pub fn from_defaults(defaults: &[(u16, DefaultValue)]) -> Self {
		let mut block = Self::new();
		for &(field, value) in defaults {
			block.set(field, value.to_value());
		}
		block
	}

	/// Builder-style [`Block::set`].
	pub fn with(mut self, field: u16, value: impl Into<OptionValue>) -> Self {
		self.set(field, value.into());
		self
	}

	/// Returns a field's value.
	pub fn get(&self, field: u16) -> &OptionValue {
		self.fields.get(field as usize).unwrap_or(&EMPTY)
	}

	/// Returns a mutable reference to a field, growing the block if needed.
	pub fn get_mut(&mut self, field: u16) -> &mut OptionValue {
		let index = field as usize;
		if index >= self.fields.len() {
			self.fields.resize(index + 1, OptionValue::None);
		}
		&mut self.fields[index]
	}

	/// Replaces a field's value, returning the previous one.
	pub fn set(&mut self, field: u16, value: OptionValue) -> OptionValue {
		std::mem::replace(self.get_mut(field), value)
	}
}

/// Stable address of one storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
	/// Field of a block.
	Field {
		/// The block holding the field.
		block: BlockId,
		/// Field index within the block.
		field: u16,
	},
	/// Named shared slot.
	Shared(&'static str),
}

/// All storage behind one configuration.
#[derive(Debug, Clone)]
pub struct Storage {
	blocks: Vec<Block>,
	shared: HashMap<&'static str, OptionValue>,
}

impl Default for Storage {
	fn default() -> Self {
		Self::new()
	}
}

impl Storage {
	/// Creates storage with an empty root.
	pub fn new() -> Self {
		Self::with_root(Block::new())
	}

	/// Creates storage around a pre-populated root.
	pub fn with_root(root: Block) -> Self {
		Self {
			blocks: vec![root],
			shared: HashMap::default(),
		}
	}

	/// Adds a block and returns its address.
	pub fn alloc(&mut self, block: Block) -> BlockId {
		let id = BlockId(self.blocks.len() as u32);
		self.blocks.push(block);
		id
	}

	/// Number of blocks, root included.
	pub fn block_count(&self) -> usize {
		self.blocks.len()
	}

	/// Returns the root block.
	pub fn root(&self) -> &Block {
		&self.blocks[BlockId::ROOT.index()]
	}

	/// Returns the root block mutably.
	pub fn root_mut(&mut self) -> &mut Block {
		&mut self.blocks[BlockId::ROOT.index()]
	}

	/// Returns a block by address.
	pub fn block(&self, id: BlockId) -> Option<&Block> {
		self.blocks.get(id.index())
	}

	/// Returns a block mutably by address.
	pub fn block_mut(&mut self, id: BlockId) -> Option<&mut Block> {
		self.blocks.get_mut(id.index())
	}

	/// Seeds a shared slot before options are registered.
	pub fn set_shared(&mut self, name: &'static str, value: impl Into<OptionValue>) {
		self.shared.insert(name, value.into());
	}

	/// Reads a slot.
	pub fn get(&self, key: &StorageKey) -> &OptionValue {
		match key {
			StorageKey::Field { block, field } => self.block(*block).map_or(&EMPTY, |b| b.get(*field)),
			StorageKey::Shared(name) => self.shared.get(name).unwrap_or(&EMPTY),
		}
	}

	/// Returns a slot mutably, creating it if needed.
	///
	/// # Panics
	///
	/// Panics if `key` names a block that was never allocated.
	pub fn get_mut(&mut self, key: &StorageKey) -> &mut OptionValue {
		match key {
			StorageKey::Field { block, field } => self.blocks[block.index()].get_mut(*field),
			StorageKey::Shared(name) => self.shared.entry(*name).or_default(),
		}
	}
}
