use thiserror::Error;

/// Errors produced while parsing or applying an option.
///
/// Every option source (command line, config file, profile replay) reports
/// failures through this type. Only [`OptionError::RequestedExit`] is not a
/// failure: it asks the caller to stop processing and exit with `code`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionError {
	/// The option name does not resolve to any binding.
	#[error("unknown option: {name}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{s}'?)")).unwrap_or_default())]
	Unknown {
		/// The unresolved name.
		name: String,
		/// A registered name that is close enough to suggest.
		suggestion: Option<String>,
	},
	/// The value was rejected by its kind, the sub-option syntax or the active source.
	#[error("invalid value for option '{name}': {reason}")]
	Invalid {
		/// The offending option.
		name: String,
		/// Why the value was rejected.
		reason: String,
	},
	/// A parameter-taking option was given none.
	#[error("option '{name}' must have a parameter")]
	MissingParameter {
		/// The offending option.
		name: String,
	},
	/// A numeric value lies outside the option's bounds.
	#[error("value out of range for option '{name}': {reason}")]
	OutOfRange {
		/// The offending option.
		name: String,
		/// The violated bound.
		reason: String,
	},
	/// The option printed information and asks the caller to exit.
	#[error("exit requested (code {code})")]
	RequestedExit {
		/// Process exit code.
		code: i32,
	},
}

/// Classification of an [`OptionError`], for matching without payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// See [`OptionError::Unknown`].
	Unknown,
	/// See [`OptionError::Invalid`].
	Invalid,
	/// See [`OptionError::MissingParameter`].
	MissingParameter,
	/// See [`OptionError::OutOfRange`].
	OutOfRange,
	/// See [`OptionError::RequestedExit`].
	RequestedExit,
}

impl OptionError {
	/// Builds an [`OptionError::Invalid`].
	pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::Invalid {
			name: name.into(),
			reason: reason.into(),
		}
	}

	/// Builds an [`OptionError::MissingParameter`].
	pub fn missing(name: impl Into<String>) -> Self {
		Self::MissingParameter { name: name.into() }
	}

	/// Builds an [`OptionError::Unknown`] without a suggestion.
	pub fn unknown(name: impl Into<String>) -> Self {
		Self::Unknown {
			name: name.into(),
			suggestion: None,
		}
	}

	/// Returns the classification of this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			OptionError::Unknown { .. } => ErrorKind::Unknown,
			OptionError::Invalid { .. } => ErrorKind::Invalid,
			OptionError::MissingParameter { .. } => ErrorKind::MissingParameter,
			OptionError::OutOfRange { .. } => ErrorKind::OutOfRange,
			OptionError::RequestedExit { .. } => ErrorKind::RequestedExit,
		}
	}

	/// Returns true if this is an exit request rather than a failure.
	pub fn is_exit(&self) -> bool {
		matches!(self, OptionError::RequestedExit { .. })
	}
}
