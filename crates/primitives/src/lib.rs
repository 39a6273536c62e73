//! Core option types: values, value kinds, parse errors and sub-option splitting.

/// Parse error taxonomy shared by every option source.
pub mod error;
/// The value-kind trait implemented by every option type.
pub mod kind;
/// Built-in value kinds.
pub mod kinds;
/// Splitting of `key=value:key=value` sub-option strings.
pub mod subopt;
/// Option storage values.
pub mod value;

pub use error::{ErrorKind, OptionError};
pub use kind::{Bounds, KindFlags, OptionKind};
pub use kinds::{Choice, FLAG, FLOAT, INT, STORE, STRING, STRING_LIST, SUBCONFIG};
pub use subopt::split_suboptions;
pub use value::{BlockId, DefaultValue, OptionValue};
