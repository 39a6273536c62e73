//! Command-line parsing for mpconf.
//!
//! Arguments are split into [`Token`]s, options are applied to a
//! [`Config`](mpconf_registry::Config) and file arguments become
//! [`Playlist`] entries. Options between `--{` and `--}` apply only to the
//! files listed between the brackets.

mod cmdline;
mod options;
mod playlist;
mod token;

pub use cmdline::{CommandLine, CommandLineError, parse_command_line, preparse_command_line};
pub use options::CMDLINE_OPTIONS;
pub use playlist::{Playlist, PlaylistEntry, expand_dvd_range};
pub use token::{Token, Tokenizer};
