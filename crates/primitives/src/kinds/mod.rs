//! Built-in value kinds.
//!
//! Each kind is a unit (or parameterized) struct implementing [`OptionKind`];
//! the `const` handles below are what schema tables reference.

use crate::kind::OptionKind;

mod flag;
mod marker;
mod number;
mod text;


pub use flag::Flag;
pub use marker::{Store, Subconfig};
pub use number::{Float, Int};
pub use text::{Choice, StringKind, StringList};

/// Boolean flag (`yes`/`no`); a bare flag means `yes`.
pub const FLAG: &dyn OptionKind = &Flag;
/// Signed integer.
pub const INT: &dyn OptionKind = &Int;
/// Floating point number, also accepting `a:b` and `a/b` ratios.
pub const FLOAT: &dyn OptionKind = &Float;
/// Owned string.
pub const STRING: &dyn OptionKind = &StringKind;
/// Comma-separated string list with `-add`/`-pre`/`-del`/`-clr` editing suffixes.
pub const STRING_LIST: &dyn OptionKind = &StringList;
/// Parameter-less marker option.
pub const STORE: &dyn OptionKind = &Store;
/// Composite option whose value is a sub-option string.
pub const SUBCONFIG: &dyn OptionKind = &Subconfig;
