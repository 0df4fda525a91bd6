//! Dispatch: resolving a (method, path) pair against a compiled table.

use crate::error::CompileErrors;
use crate::pattern::Params;
use crate::route::{Route, parse_method};
use crate::table::RouteSet;
use http::Method;

/// A successful resolution: the matched record plus its parameter bindings.
///
/// The record's `secure` and `before` flags are exposed here for the
/// caller's policy; the dispatcher itself never acts on them.
#[derive(Debug)]
pub struct Match<'a> {
	/// The first record, in registration order, that satisfied the request.
	pub route: &'a Route,
	/// Variable name to captured value, with the record's defaults filled in
	/// for variables the path did not capture.
	pub params: Params,
}

/// Read-only dispatcher over a compiled [`RouteSet`].
///
/// Resolution is a pure function of the table's compiled state and the
/// (method, path) input: no interior mutability, no I/O, safe for unbounded
/// concurrent use. A caller that needs to hot-swap tables builds a new
/// `Router` off to the side and publishes it behind its own `Arc`.
///
/// # Examples
///
/// ```
/// use routeset::{HandlerRef, Method, RouteOptions, RouteSet, Router};
///
/// let mut routes = RouteSet::new();
/// routes.get("/blog", HandlerRef::new("blog.list"), RouteOptions::new());
/// routes.get(
///     "/blog/:id",
///     HandlerRef::new("blog.show"),
///     RouteOptions::new().with_requirement("id", r"\d+"),
/// );
///
/// let router = Router::new(routes).unwrap();
///
/// let hit = router.resolve(&Method::GET, "/blog/3").unwrap();
/// assert_eq!(hit.route.handler.name, "blog.show");
/// assert_eq!(hit.params.get("id"), Some(&"3".to_string()));
///
/// assert!(router.resolve(&Method::GET, "/blog/abc").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Router {
	routes: RouteSet,
}

impl Router {
	/// Compile the table and build a dispatcher over it. Fails if any record
	/// has a template that does not compile.
	pub fn new(mut routes: RouteSet) -> Result<Self, CompileErrors> {
		routes.compile_all()?;
		Ok(Self { routes })
	}

	/// Compile what compiles and build a dispatcher anyway. Records whose
	/// templates fail are logged and skipped at dispatch time.
	pub fn lenient(mut routes: RouteSet) -> Self {
		if let Err(errors) = routes.compile_all() {
			for error in errors.iter() {
				tracing::warn!(error = %error, "skipping route that failed to compile");
			}
		}
		Self { routes }
	}

	/// The underlying table.
	pub fn routes(&self) -> &RouteSet {
		&self.routes
	}

	/// Consume the dispatcher and return the table.
	pub fn into_routes(self) -> RouteSet {
		self.routes
	}

	/// Resolve a request to the first satisfying route, in registration
	/// order.
	///
	/// For each compiled record: structural match first (segment counts,
	/// literal equality, full-match variable validation); a structural miss
	/// moves on. A structural hit whose method filter disagrees with
	/// `method` also moves on, so the same path can be served under another
	/// verb by a later record. On success the captured bindings are overlaid
	/// with the record's defaults for any variable the path did not capture,
	/// and the scan stops. `None` is the normal no-match outcome, not an
	/// error.
	pub fn resolve(&self, method: &Method, path: &str) -> Option<Match<'_>> {
		for route in self.routes.iter() {
			let Some(pattern) = route.compiled.as_ref() else {
				continue;
			};
			let Some(mut params) = pattern.match_path(path) else {
				continue;
			};
			if let Some(filter) = &route.method {
				if filter != method {
					continue;
				}
			}
			for (name, value) in &route.defaults {
				if !params.contains_key(name) {
					params.insert(name.clone(), value.clone());
				}
			}
			return Some(Match { route, params });
		}
		tracing::trace!(%method, path, "no route matched");
		None
	}

	/// [`resolve`](Self::resolve) with a case-insensitive method string.
	/// A string that is not a valid HTTP method token resolves nothing.
	pub fn resolve_str(&self, method: &str, path: &str) -> Option<Match<'_>> {
		match parse_method(method) {
			Ok(method) => self.resolve(&method, path),
			Err(_) => {
				tracing::trace!(method, "unparseable method string");
				None
			}
		}
	}
}
