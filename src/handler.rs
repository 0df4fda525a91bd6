//! Handler references and the handler registry.
//!
//! A route never owns its handler: it carries a [`HandlerRef`], a stable
//! serializable identity, and the caller resolves that identity through a
//! [`HandlerRegistry`] it constructs and owns. Dispatch itself never invokes
//! anything; it only returns the reference and the bindings.

use crate::error::HandlerError;
use crate::pattern::Params;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Result of a handler invocation.
pub type HandlerResult = Result<Value, HandlerError>;

/// Serializable identity of a route's target handler: a registry key plus
/// opaque invocation arguments the core never interprets.
///
/// # Examples
///
/// ```
/// use routeset::HandlerRef;
///
/// let plain = HandlerRef::new("blog.show");
/// assert_eq!(plain.name, "blog.show");
///
/// let with_args = HandlerRef::new("blog.show")
///     .with_args(serde_json::json!({ "format": "html" }));
/// assert!(with_args.args.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerRef {
	/// Registry key identifying the handler.
	pub name: String,
	/// Opaque invocation arguments, passed through untouched.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub args: Option<Value>,
}

impl HandlerRef {
	/// Create a reference to the handler registered under `name`.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			args: None,
		}
	}

	/// Attach opaque invocation arguments.
	pub fn with_args(mut self, args: Value) -> Self {
		self.args = Some(args);
		self
	}
}

impl From<&str> for HandlerRef {
	fn from(name: &str) -> Self {
		Self::new(name)
	}
}

/// A route target: invoked with the bindings of a successful match.
///
/// Closures with the right shape implement this directly, so simple handlers
/// need no wrapper type:
///
/// ```
/// use routeset::{Handler, HandlerResult, Params};
///
/// fn show(params: &Params) -> HandlerResult {
///     Ok(serde_json::json!({ "id": params.get("id") }))
/// }
///
/// let handler: &dyn Handler = &show;
/// let mut params = Params::new();
/// params.insert("id".to_string(), "3".to_string());
/// assert!(handler.invoke(&params).is_ok());
/// ```
pub trait Handler: Send + Sync {
	/// Invoke the handler with the bindings of a matched route.
	fn invoke(&self, params: &Params) -> HandlerResult;
}

impl<F> Handler for F
where
	F: Fn(&Params) -> HandlerResult + Send + Sync,
{
	fn invoke(&self, params: &Params) -> HandlerResult {
		self(params)
	}
}

/// Registry mapping stable identifiers to handlers.
///
/// Constructed and owned by the caller; there is no process-wide registry.
/// Registering a key a second time replaces the previous handler.
#[derive(Default, Clone)]
pub struct HandlerRegistry {
	handlers: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a handler under a stable identifier.
	pub fn register(&mut self, name: impl Into<String>, handler: Arc<dyn Handler>) {
		self.handlers.insert(name.into(), handler);
	}

	/// Register a closure under a stable identifier.
	pub fn register_fn<F>(&mut self, name: impl Into<String>, handler: F)
	where
		F: Fn(&Params) -> HandlerResult + Send + Sync + 'static,
	{
		self.register(name, Arc::new(handler));
	}

	/// Look up a handler by identifier.
	pub fn get(&self, name: &str) -> Option<&Arc<dyn Handler>> {
		self.handlers.get(name)
	}

	/// Resolve a [`HandlerRef`] and invoke its handler with the bindings.
	pub fn invoke(&self, handler: &HandlerRef, params: &Params) -> HandlerResult {
		match self.handlers.get(&handler.name) {
			Some(target) => target.invoke(params),
			None => Err(HandlerError::NotRegistered(handler.name.clone())),
		}
	}

	/// Number of registered handlers.
	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	/// Whether the registry is empty.
	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}
}

impl std::fmt::Debug for HandlerRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HandlerRegistry")
			.field("handlers", &self.handlers.keys().collect::<Vec<_>>())
			.finish()
	}
}
