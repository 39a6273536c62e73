/// Handle to a structure block in a configuration storage arena.
///
/// Block `0` is always the configuration root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl BlockId {
	/// The configuration root.
	pub const ROOT: BlockId = BlockId(0);

	/// Returns the arena index of this block.
	pub fn index(self) -> usize {
		self.0 as usize
	}
}

/// The value held by one storage slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum OptionValue {
	/// Zeroed storage (no value set).
	#[default]
	None,
	/// Boolean flag.
	Flag(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
	/// Ordered list of strings.
	StringList(Vec<String>),
	/// Address of an allocated sub-structure.
	Block(BlockId),
}

impl OptionValue {
	/// Returns true for zeroed storage.
	pub fn is_none(&self) -> bool {
		matches!(self, OptionValue::None)
	}

	/// Returns the flag value if this is a `Flag` variant.
	pub fn as_flag(&self) -> Option<bool> {
		match self {
			OptionValue::Flag(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the integer value if this is an `Int` variant.
	pub fn as_int(&self) -> Option<i64> {
		match self {
			OptionValue::Int(v) => Some(*v),
			_ => None,
		}
	}

	/// Returns the float value, widening integers.
	pub fn as_float(&self) -> Option<f64> {
		match self {
			OptionValue::Float(v) => Some(*v),
			OptionValue::Int(v) => Some(*v as f64),
			_ => None,
		}
	}

	/// Returns the string value if this is a `String` variant.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::String(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the list if this is a `StringList` variant.
	pub fn as_list(&self) -> Option<&[String]> {
		match self {
			OptionValue::StringList(v) => Some(v),
			_ => None,
		}
	}

	/// Returns the sub-structure address if this is a `Block` variant.
	pub fn as_block(&self) -> Option<BlockId> {
		match self {
			OptionValue::Block(id) => Some(*id),
			_ => None,
		}
	}
}

impl From<bool> for OptionValue {
	fn from(v: bool) -> Self {
		OptionValue::Flag(v)
	}
}

impl From<i64> for OptionValue {
	fn from(v: i64) -> Self {
		OptionValue::Int(v)
	}
}

impl From<f64> for OptionValue {
	fn from(v: f64) -> Self {
		OptionValue::Float(v)
	}
}

impl From<String> for OptionValue {
	fn from(v: String) -> Self {
		OptionValue::String(v)
	}
}

impl From<&str> for OptionValue {
	fn from(v: &str) -> Self {
		OptionValue::String(v.to_string())
	}
}

impl From<Vec<String>> for OptionValue {
	fn from(v: Vec<String>) -> Self {
		OptionValue::StringList(v)
	}
}

/// Compile-time default carried by a static schema node.
///
/// Unlike [`OptionValue`] this only borrows `'static` data, so option tables can
/// be declared as `static` items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultValue {
	/// Boolean default.
	Flag(bool),
	/// Integer default.
	Int(i64),
	/// Float default.
	Float(f64),
	/// String default.
	Str(&'static str),
	/// String list default.
	List(&'static [&'static str]),
}

impl DefaultValue {
	/// Materializes the default as an owned [`OptionValue`].
	pub fn to_value(self) -> OptionValue {
		match self {
			DefaultValue::Flag(v) => OptionValue::Flag(v),
			DefaultValue::Int(v) => OptionValue::Int(v),
			DefaultValue::Float(v) => OptionValue::Float(v),
			DefaultValue::Str(v) => OptionValue::String(v.to_string()),
			DefaultValue::List(v) => OptionValue::StringList(v.iter().map(|s| s.to_string()).collect()),
		}
	}
}
