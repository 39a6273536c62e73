//! Diagnostic sinks.
//!
//! Recoverable anomalies (unknown profiles, recursion guards, rejected options)
//! are reported through a [`DiagnosticSink`] owned by the configuration rather
//! than through a process-wide logger, so callers can silence or capture them.

use std::cell::RefCell;
use std::rc::Rc;

pub use tracing::Level;

/// A leveled diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	/// Severity.
	pub level: Level,
	/// Human-readable text.
	pub message: String,
}

/// Receiver for configuration diagnostics.
pub trait DiagnosticSink {
	/// Handles one diagnostic.
	fn emit(&mut self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
	fn emit(&mut self, diagnostic: Diagnostic) {
		let message = diagnostic.message;
		match diagnostic.level {
			Level::ERROR => tracing::error!(domain = "options", "{message}"),
			Level::WARN => tracing::warn!(domain = "options", "{message}"),
			Level::INFO => tracing::info!(domain = "options", "{message}"),
			Level::DEBUG => tracing::debug!(domain = "options", "{message}"),
			_ => tracing::trace!(domain = "options", "{message}"),
		}
	}
}

/// Drops every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
	fn emit(&mut self, _diagnostic: Diagnostic) {}
}

/// Records diagnostics in memory.
///
/// Clones share the same buffer, so a handle kept by the caller sees what the
/// configuration emitted after the sink was boxed.
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
	records: Rc<RefCell<Vec<Diagnostic>>>,
}

impl CollectSink {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of everything recorded so far.
	pub fn records(&self) -> Vec<Diagnostic> {
		self.records.borrow().clone()
	}

	/// Returns the messages recorded at `level`.
	pub fn messages(&self, level: Level) -> Vec<String> {
		self.records
			.borrow()
			.iter()
			.filter(|d| d.level == level)
			.map(|d| d.message.clone())
			.collect()
	}

	/// Removes and returns everything recorded so far.
	pub fn take(&self) -> Vec<Diagnostic> {
		std::mem::take(&mut *self.records.borrow_mut())
	}
}

impl DiagnosticSink for CollectSink {
	fn emit(&mut self, diagnostic: Diagnostic) {
		self.records.borrow_mut().push(diagnostic);
	}
}
