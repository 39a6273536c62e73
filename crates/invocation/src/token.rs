//! Splitting raw arguments into option and file tokens.

use mpconf_primitives::{KindFlags, OptionError};
use mpconf_registry::{Config, OptionDef};

/// One parsed command-line item.
#[derive(Debug, Clone)]
pub enum Token {
	/// An option with its parameter, if it took one.
	Option {
		/// Option name as given, without dashes (after `no-` mapping).
		name: String,
		/// Inline (`--name=value`) or following-argument parameter.
		param: Option<String>,
		/// The schema node the name resolved to.
		def: &'static OptionDef,
	},
	/// A file argument.
	File(String),
}

/// Iterates over the tokens of an argument list.
///
/// Resolution happens against the configuration as it is when each token is
/// read, so options registered mid-parse are seen by later tokens.
#[derive(Debug)]
pub struct Tokenizer<'a, S> {
	args: &'a [S],
	pos: usize,
	no_more_opts: bool,
}

impl<'a, S: AsRef<str>> Tokenizer<'a, S> {
	/// Creates a tokenizer over `args` (without the program name).
	pub fn new(args: &'a [S]) -> Self {
		Self {
			args,
			pos: 0,
			no_more_opts: false,
		}
	}

	fn take(&mut self) -> Option<&'a str> {
		let arg = self.args.get(self.pos)?.as_ref();
		self.pos += 1;
		Some(arg)
	}

	/// Reads the next token, or `None` once the arguments are exhausted.
	///
	/// `--` ends option parsing; every later argument is a file, as is a lone
	/// `-`. `-name` and `--name` are equivalent. A parameter is taken from
	/// `--name=value` or else from the following argument, except for kinds
	/// that never take one and for list `-clr` edits.
	pub fn next_token(&mut self, config: &Config) -> Option<Result<Token, OptionError>> {
		let arg = self.take()?;
		if self.no_more_opts || !arg.starts_with('-') || arg.len() == 1 {
			return Some(Ok(Token::File(arg.to_string())));
		}
		if arg == "--" {
			self.no_more_opts = true;
			return self.next_token(config);
		}

		let body = arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')).unwrap_or(arg);
		let (mut name, mut param) = match body.split_once('=') {
			Some((name, param)) if !name.is_empty() => (name.to_string(), Some(param.to_string())),
			_ => (body.to_string(), None),
		};
		let mut has_param = param.is_some();

		match config.map_negation(&name, param.as_deref()) {
			Ok(Some(flag)) => {
				name = flag;
				param = Some("no".to_string());
				has_param = true;
			}
			Ok(None) => {}
			Err(err) => return Some(Err(err)),
		}

		let Some(def) = config.registry().option(&name) else {
			let suggestion = config.registry().suggest(&name);
			return Some(Err(OptionError::Unknown { name, suggestion }));
		};

		if def.kind.flags().contains(KindFlags::NO_PARAM) || name.to_ascii_lowercase().ends_with("-clr") {
			has_param = true;
		}
		if !has_param {
			match self.take() {
				Some(next) => param = Some(next.to_string()),
				None => return Some(Err(OptionError::MissingParameter { name })),
			}
		}
		Some(Ok(Token::Option { name, param, def }))
	}
}
