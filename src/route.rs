//! Route records and registration options.

use crate::error::TemplateError;
use crate::handler::HandlerRef;
use crate::pattern::PathPattern;
use http::Method;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid literal regex"));

/// Derive a route name from its path by collapsing non-word runs into `_`.
///
/// `/blog/:id` becomes `_blog_id`.
pub(crate) fn derive_name(path: &str) -> String {
	NON_WORD.replace_all(path, "_").into_owned()
}

/// Parse an HTTP method string case-insensitively.
pub(crate) fn parse_method(method: &str) -> Result<Method, http::method::InvalidMethod> {
	Method::from_bytes(method.to_ascii_uppercase().as_bytes())
}

/// One registered route: template, filters, metadata, and the handler
/// reference dispatch hands back on a match.
///
/// The compiled matcher is attached once by compilation and is the only
/// mutation a record sees after registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
	/// Name key within the owning table; derived from the path unless set
	/// explicitly.
	pub name: String,
	/// Raw path template, as registered (plus any mount prefix).
	pub path: String,
	/// HTTP method filter; `None` matches any method.
	#[serde(with = "method_serde", default, skip_serializing_if = "Option::is_none")]
	pub method: Option<Method>,
	/// Per-variable validation patterns, merged into the template at compile
	/// time.
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub requirements: HashMap<String, String>,
	/// Fallback values for variables absent from the matched path.
	#[serde(default, skip_serializing_if = "HashMap::is_empty")]
	pub defaults: HashMap<String, String>,
	/// Route is eligible only over an encrypted transport. The dispatcher
	/// exposes the flag; enforcing it is the caller's transport policy.
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub secure: bool,
	/// Marks a pre-dispatch hook rather than a terminal route. Preserved and
	/// exposed during iteration, never treated specially by matching.
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub before: bool,
	/// Target handler identity.
	pub handler: HandlerRef,
	/// Compiled matcher; absent until [`Route::compile`] runs.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub compiled: Option<PathPattern>,
}

impl Route {
	/// Create a route for `path` targeting `handler`, with a name derived
	/// from the path.
	///
	/// # Examples
	///
	/// ```
	/// use routeset::{HandlerRef, Route};
	///
	/// let route = Route::new("/blog/:id", HandlerRef::new("blog.show"));
	/// assert_eq!(route.name, "_blog_id");
	/// assert!(route.compiled.is_none());
	/// ```
	pub fn new(path: impl Into<String>, handler: impl Into<HandlerRef>) -> Self {
		let path = path.into();
		Self {
			name: derive_name(&path),
			path,
			method: None,
			requirements: HashMap::new(),
			defaults: HashMap::new(),
			secure: false,
			before: false,
			handler: handler.into(),
			compiled: None,
		}
	}

	/// Override the derived name.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Restrict the route to one HTTP method.
	pub fn with_method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	/// Add a validation pattern for one template variable.
	pub fn with_requirement(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.requirements.insert(name.into(), pattern.into());
		self
	}

	/// Add a fallback value for a variable absent from the matched path.
	pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.defaults.insert(name.into(), value.into());
		self
	}

	/// Mark the route as secure-transport-only.
	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	/// Mark the route as a pre-dispatch hook.
	pub fn with_before(mut self, before: bool) -> Self {
		self.before = before;
		self
	}

	/// Attach the compiled matcher. Idempotent: an already-compiled route is
	/// left untouched.
	pub fn compile(&mut self) -> Result<(), TemplateError> {
		if self.compiled.is_some() {
			return Ok(());
		}
		self.compiled = Some(PathPattern::compile(&self.path, &self.requirements)?);
		Ok(())
	}

	/// Whether a compiled matcher is attached.
	pub fn is_compiled(&self) -> bool {
		self.compiled.is_some()
	}
}

/// Options recognized by [`RouteSet::add`](crate::RouteSet::add) and the
/// per-verb registration shorthands.
///
/// # Examples
///
/// ```
/// use routeset::RouteOptions;
///
/// let options = RouteOptions::new()
///     .with_name("blog_detail")
///     .with_requirement("id", r"\d+")
///     .with_default("format", "html")
///     .with_secure(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
	method: Option<Method>,
	name: Option<String>,
	requirements: HashMap<String, String>,
	defaults: HashMap<String, String>,
	secure: bool,
	before: bool,
	args: Option<Value>,
}

impl RouteOptions {
	/// Empty option set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Restrict the route to one HTTP method.
	pub fn with_method(mut self, method: Method) -> Self {
		self.method = Some(method);
		self
	}

	/// Override the name derived from the path.
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Add a validation pattern for one template variable.
	pub fn with_requirement(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.requirements.insert(name.into(), pattern.into());
		self
	}

	/// Add a fallback value for a variable absent from the matched path.
	pub fn with_default(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.defaults.insert(name.into(), value.into());
		self
	}

	/// Mark the route as secure-transport-only.
	pub fn with_secure(mut self, secure: bool) -> Self {
		self.secure = secure;
		self
	}

	/// Mark the route as a pre-dispatch hook.
	pub fn with_before(mut self, before: bool) -> Self {
		self.before = before;
		self
	}

	/// Attach opaque invocation arguments to the handler reference.
	pub fn with_args(mut self, args: Value) -> Self {
		self.args = Some(args);
		self
	}

	pub(crate) fn into_route(self, path: String, mut handler: HandlerRef) -> Route {
		if let Some(args) = self.args {
			handler.args = Some(args);
		}
		let mut route = Route::new(path, handler);
		route.method = self.method;
		if let Some(name) = self.name {
			route.name = name;
		}
		route.requirements = self.requirements;
		route.defaults = self.defaults;
		route.secure = self.secure;
		route.before = self.before;
		route
	}
}

mod method_serde {
	use http::Method;
	use serde::de::Error as _;
	use serde::{Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(method: &Option<Method>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match method {
			Some(method) => serializer.serialize_some(method.as_str()),
			None => serializer.serialize_none(),
		}
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Method>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Option::<String>::deserialize(deserializer)?
			.map(|raw| super::parse_method(&raw).map_err(D::Error::custom))
			.transpose()
	}
}
