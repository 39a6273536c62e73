//! Option bindings.
//!
//! The [`Registry`] walks static schema tables and binds every node to a
//! storage location. It owns the storage and every sub-structure it allocated,
//! and releases dynamically managed values when dropped.
//!
//! # Lookup order
//!
//! Bindings are resolved front to back and the most recently registered
//! binding sits at the front, so later registrations shadow earlier ones. A
//! wildcard binding (`name*`) that was registered later than an exact binding
//! for an overlapping name wins over it; nothing prioritizes exact names.

use mpconf_primitives::{BlockId, KindFlags, OptionValue};
use rustc_hash::FxHashMap as HashMap;

use crate::def::{Children, Location, OptionDef, OptionFlags, SubSchema};
use crate::storage::{Block, Storage, StorageKey};

#[cfg(test)]
mod tests;

static EMPTY: OptionValue = OptionValue::None;

/// Index of a binding in its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

impl BindingId {
	pub(crate) fn from_index(index: usize) -> Self {
		Self(index as u32)
	}

	pub(crate) fn index(self) -> usize {
		self.0 as usize
	}
}

/// A schema node joined to a storage location.
#[derive(Debug)]
pub struct Binding {
	name: String,
	def: &'static OptionDef,
	storage: Option<StorageKey>,
	parent: Option<BindingId>,
	block: Option<BlockId>,
	alias: bool,
	pub(crate) backup: Option<OptionValue>,
}

impl Binding {
	/// Full name, including ancestor prefixes.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The schema node.
	pub fn def(&self) -> &'static OptionDef {
		self.def
	}

	/// Storage location, if the node has one.
	pub fn storage(&self) -> Option<StorageKey> {
		self.storage
	}

	/// The nearest non-merge ancestor.
	pub fn parent(&self) -> Option<BindingId> {
		self.parent
	}

	/// For composites, the structure their children are stored in.
	pub fn child_block(&self) -> Option<BlockId> {
		self.block
	}

	/// True if another binding owns this binding's storage.
	pub fn is_alias(&self) -> bool {
		self.alias
	}

	/// True if this binding has children.
	pub fn is_composite(&self) -> bool {
		self.def.is_composite()
	}

	/// True if a local-scope backup is pending for this binding.
	pub fn has_backup(&self) -> bool {
		self.backup.is_some()
	}

	fn matches(&self, query: &str) -> bool {
		if self.def.kind.flags().contains(KindFlags::ALLOW_WILDCARD)
			&& let Some(prefix) = self.name.strip_suffix('*')
		{
			return query.get(..prefix.len()).is_some_and(|head| head.eq_ignore_ascii_case(prefix));
		}
		self.name.eq_ignore_ascii_case(query)
	}
}

/// Bound options over one configuration's storage.
#[derive(Debug)]
pub struct Registry {
	pub(crate) bindings: Vec<Binding>,
	/// Resolvable bindings; the last element is the front of the lookup order.
	lookup: Vec<BindingId>,
	owners: HashMap<StorageKey, BindingId>,
	pub(crate) storage: Storage,
	allocated: Vec<BlockId>,
}

impl Default for Registry {
	fn default() -> Self {
		Self::new(Storage::new())
	}
}

impl Registry {
	/// Creates an empty registry over `storage`.
	pub fn new(storage: Storage) -> Self {
		Self {
			bindings: Vec::new(),
			lookup: Vec::new(),
			owners: HashMap::default(),
			storage,
			allocated: Vec::new(),
		}
	}

	/// Binds every node of `defs` (recursively) at the root level.
	pub fn register(&mut self, defs: &'static [OptionDef]) {
		for def in defs {
			self.add(def, None, BlockId::ROOT);
		}
	}

	fn add(&mut self, def: &'static OptionDef, parent: Option<BindingId>, block: BlockId) -> BindingId {
		let storage = match def.location {
			Location::Field(field) => Some(StorageKey::Field { block, field }),
			Location::Shared(name) => Some(StorageKey::Shared(name)),
			Location::Nowhere => None,
		};

		// Children of a merge node are named as if they were its siblings; the
		// real parent is still followed for storage.
		let parent = parent.and_then(|p| {
			let binding = &self.bindings[p.index()];
			if binding.def.flags.contains(OptionFlags::MERGE) { binding.parent } else { Some(p) }
		});

		let name = match parent {
			Some(p) => {
				let parent = &self.bindings[p.index()];
				format!("{}{}{}", parent.name, child_separator(parent.def), def.name)
			}
			None => def.name.to_string(),
		};

		let id = BindingId(self.bindings.len() as u32);
		self.bindings.push(Binding {
			name,
			def,
			storage,
			parent,
			block: None,
			alias: false,
			backup: None,
		});

		match def.children {
			Children::Substruct(schema) => {
				let child_block = self.substruct_block(storage, schema);
				self.bindings[id.index()].block = Some(child_block);
				for child in schema.options {
					self.add(child, Some(id), child_block);
				}
			}
			Children::Inline(children) => {
				self.bindings[id.index()].block = Some(block);
				for child in children {
					self.add(child, Some(id), block);
				}
			}
			Children::None => self.bind_leaf(id),
		}

		if !def.flags.contains(OptionFlags::MERGE) {
			self.lookup.push(id);
		}
		id
	}

	/// Returns the sub-structure stored at `storage`, allocating it if the
	/// stored address is still empty.
	fn substruct_block(&mut self, storage: Option<StorageKey>, schema: &'static SubSchema) -> BlockId {
		if let Some(key) = storage
			&& let Some(existing) = self.storage.get(&key).as_block()
		{
			return existing;
		}

		let id = self.storage.alloc(Block::from_defaults(schema.defaults));
		self.allocated.push(id);
		tracing::trace!(domain = "options", schema = schema.name, block = id.0, "allocated sub-structure");
		if let Some(key) = storage {
			*self.storage.get_mut(&key) = OptionValue::Block(id);
		}
		id
	}

	fn bind_leaf(&mut self, id: BindingId) {
		let (storage, def) = {
			let binding = &self.bindings[id.index()];
			(binding.storage, binding.def)
		};
		let Some(key) = storage else {
			return;
		};
		if self.owners.contains_key(&key) {
			self.bindings[id.index()].alias = true;
			return;
		}
		self.owners.insert(key, id);

		let kind = def.kind;
		let slot = self.storage.get_mut(&key);
		if let Some(default) = def.default {
			kind.free(slot);
			*slot = kind.copy(&default.to_value());
		} else if kind.flags().contains(KindFlags::DYNAMIC) {
			// Take ownership of whatever the embedder seeded the slot with.
			let mut temp = kind.copy(slot);
			*slot = OptionValue::None;
			*slot = kind.copy(&temp);
			kind.free(&mut temp);
		}
	}

	/// Resolves a name, case-insensitively, front to back.
	pub fn resolve(&self, name: &str) -> Option<BindingId> {
		self.lookup.iter().rev().copied().find(|&id| self.bindings[id.index()].matches(name))
	}

	/// Returns the schema node a name resolves to.
	pub fn option(&self, name: &str) -> Option<&'static OptionDef> {
		self.resolve(name).map(|id| self.binding(id).def)
	}

	/// Returns a binding.
	///
	/// # Panics
	///
	/// Panics if `id` was not produced by this registry.
	pub fn binding(&self, id: BindingId) -> &Binding {
		&self.bindings[id.index()]
	}

	/// Resolvable bindings in lookup order (front first).
	pub fn bindings(&self) -> impl Iterator<Item = &Binding> + '_ {
		self.lookup.iter().rev().map(|id| &self.bindings[id.index()])
	}

	/// Number of resolvable bindings.
	pub fn len(&self) -> usize {
		self.lookup.len()
	}

	/// True if nothing resolvable has been registered.
	pub fn is_empty(&self) -> bool {
		self.lookup.is_empty()
	}

	/// The storage behind this registry.
	pub fn storage(&self) -> &Storage {
		&self.storage
	}

	/// Sub-structures allocated by this registry.
	pub fn allocated_blocks(&self) -> &[BlockId] {
		&self.allocated
	}

	/// Current value of a binding's storage ([`OptionValue::None`] if it has none).
	pub fn binding_value(&self, id: BindingId) -> &OptionValue {
		self.binding(id).storage.as_ref().map_or(&EMPTY, |key| self.storage.get(key))
	}

	/// Current value of the option a name resolves to.
	pub fn value(&self, name: &str) -> Option<&OptionValue> {
		self.resolve(name).map(|id| self.binding_value(id))
	}

	/// Flag value of an option.
	pub fn flag(&self, name: &str) -> Option<bool> {
		self.value(name).and_then(OptionValue::as_flag)
	}

	/// Integer value of an option.
	pub fn int(&self, name: &str) -> Option<i64> {
		self.value(name).and_then(OptionValue::as_int)
	}

	/// Float value of an option.
	pub fn float(&self, name: &str) -> Option<f64> {
		self.value(name).and_then(OptionValue::as_float)
	}

	/// String value of an option.
	pub fn string(&self, name: &str) -> Option<&str> {
		self.value(name).and_then(OptionValue::as_str)
	}

	/// String list value of an option.
	pub fn list(&self, name: &str) -> Option<&[String]> {
		self.value(name).and_then(OptionValue::as_list)
	}

	/// Suggests a registered name close to `name`.
	pub fn suggest(&self, name: &str) -> Option<String> {
		self.bindings()
			.map(|b| b.name.as_str())
			.map(|candidate| (strsim::levenshtein(&name.to_ascii_lowercase(), &candidate.to_ascii_lowercase()), candidate))
			.filter(|&(distance, _)| distance <= 3)
			.min_by_key(|&(distance, _)| distance)
			.map(|(_, candidate)| candidate.to_string())
	}
}

impl Drop for Registry {
	fn drop(&mut self) {
		let Self { bindings, storage, .. } = self;
		for binding in bindings.iter_mut() {
			let kind = binding.def.kind;
			if binding.alias {
				continue;
			}
			// Teardown, not rollback: pending backups are released unrestored.
			if let Some(mut backup) = binding.backup.take() {
				kind.free(&mut backup);
			}
			if let Some(key) = binding.storage
				&& !binding.def.is_composite()
				&& kind.flags().contains(KindFlags::DYNAMIC)
			{
				kind.free(storage.get_mut(&key));
			}
		}
	}
}

/// Separator placed between a parent's name and its children's names.
pub(crate) fn child_separator(def: &OptionDef) -> char {
	if def.flags.contains(OptionFlags::PREFIXED) { '-' } else { ':' }
}
