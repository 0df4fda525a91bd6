//! Error types for route compilation, configuration, and handler dispatch.
//!
//! A failed lookup is not an error in this crate: `resolve` returns `None`
//! for a path no route matches, and `find_by_name` returns `None` for a name
//! never registered. The types here cover the cases that genuinely fail.

use thiserror::Error;

/// Compile-time failure for a single route template.
///
/// Carries the offending template and the reason, so a caller can log the
/// record and keep going; a bad template never corrupts the rest of the
/// table.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum TemplateError {
	/// A segment started with `:` but did not form a valid variable name.
	#[error("malformed variable segment '{segment}' in template '{template}'")]
	MalformedVariable {
		/// The template being compiled.
		template: String,
		/// The offending segment, as written.
		segment: String,
	},

	/// The same variable name appeared twice in one template.
	#[error("duplicate variable name '{name}' in template '{template}'")]
	DuplicateVariable {
		/// The template being compiled.
		template: String,
		/// The repeated variable name.
		name: String,
	},

	/// A greedy variable appeared somewhere other than the final segment.
	#[error("greedy variable '{name}' must be the final segment of template '{template}'")]
	MisplacedGreedy {
		/// The template being compiled.
		template: String,
		/// The greedy variable name.
		name: String,
	},

	/// A requirement pattern for a variable was not a valid regex.
	#[error("invalid requirement for variable '{name}' in template '{template}': {source}")]
	InvalidRequirement {
		/// The template being compiled.
		template: String,
		/// The variable the requirement applies to.
		name: String,
		/// The underlying regex error.
		#[source]
		source: regex::Error,
	},
}

impl TemplateError {
	/// The template the error was raised for.
	pub fn template(&self) -> &str {
		match self {
			Self::MalformedVariable { template, .. }
			| Self::DuplicateVariable { template, .. }
			| Self::MisplacedGreedy { template, .. }
			| Self::InvalidRequirement { template, .. } => template,
		}
	}
}

/// Aggregate result of [`RouteSet::compile_all`](crate::RouteSet::compile_all).
///
/// Compilation never stops at the first bad record; every failure is
/// collected here and the offending records are simply left uncompiled.
#[derive(Debug, Error)]
#[error("{} route template(s) failed to compile", .0.len())]
pub struct CompileErrors(pub Vec<TemplateError>);

impl CompileErrors {
	/// Iterate over the per-record failures.
	pub fn iter(&self) -> impl Iterator<Item = &TemplateError> {
		self.0.iter()
	}
}

/// Failure while loading a declarative route configuration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// The document was not valid TOML for the expected schema.
	#[error("invalid routes document: {0}")]
	Parse(#[from] toml::de::Error),

	/// A route entry declared a method that is not a valid HTTP token.
	#[error("invalid method '{method}' for route '{path}'")]
	InvalidMethod {
		/// The route path the entry declared.
		path: String,
		/// The rejected method string.
		method: String,
	},
}

/// Failure while resolving or invoking a registered handler.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HandlerError {
	/// No handler is registered under the referenced name.
	#[error("handler not registered: {0}")]
	NotRegistered(String),

	/// The handler itself reported a failure.
	#[error("{0}")]
	Invocation(String),
}

impl HandlerError {
	/// Build an invocation failure from any displayable message.
	pub fn invocation(message: impl Into<String>) -> Self {
		Self::Invocation(message.into())
	}
}
