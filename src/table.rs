//! The route table: an ordered, named collection of route records.

use crate::error::CompileErrors;
use crate::handler::HandlerRef;
use crate::route::{Route, RouteOptions};
use http::Method;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ordered collection of [`Route`] records with a name index.
///
/// Registration order is match-priority order: the first route registered is
/// the first one tried at dispatch time, regardless of specificity.
/// Registering a second route under an existing name keeps both records in
/// the sequence but repoints the name index at the newest one; the overwrite
/// is logged, never an error.
///
/// # Examples
///
/// ```
/// use routeset::{HandlerRef, RouteOptions, RouteSet};
///
/// let mut routes = RouteSet::new();
/// routes.get("/blog", HandlerRef::new("blog.list"), RouteOptions::new());
/// routes.get(
///     "/blog/:id",
///     HandlerRef::new("blog.show"),
///     RouteOptions::new().with_requirement("id", r"\d+"),
/// );
///
/// assert_eq!(routes.len(), 2);
/// assert!(routes.find_by_path("/blog/:id").is_some());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteSet {
	routes: Vec<Route>,
	names: HashMap<String, usize>,
}

impl RouteSet {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a fully-built record, updating the name index. Returns the
	/// record's index in the sequence. Never fails; duplicate paths are
	/// permitted and resolved at dispatch time by registration order.
	pub fn add_route(&mut self, route: Route) -> usize {
		let index = self.routes.len();
		if self.names.insert(route.name.clone(), index).is_some() {
			tracing::warn!(
				name = %route.name,
				path = %route.path,
				"duplicate route name; the name index now resolves to the newest record"
			);
		}
		self.routes.push(route);
		index
	}

	/// Register a route for `path` targeting `handler`, with `options`.
	pub fn add(
		&mut self,
		path: impl Into<String>,
		handler: impl Into<HandlerRef>,
		options: RouteOptions,
	) -> usize {
		self.add_route(options.into_route(path.into(), handler.into()))
	}

	/// Register a GET-only route.
	pub fn get(
		&mut self,
		path: impl Into<String>,
		handler: impl Into<HandlerRef>,
		options: RouteOptions,
	) -> usize {
		self.add(path, handler, options.with_method(Method::GET))
	}

	/// Register a POST-only route.
	pub fn post(
		&mut self,
		path: impl Into<String>,
		handler: impl Into<HandlerRef>,
		options: RouteOptions,
	) -> usize {
		self.add(path, handler, options.with_method(Method::POST))
	}

	/// Register a PUT-only route.
	pub fn put(
		&mut self,
		path: impl Into<String>,
		handler: impl Into<HandlerRef>,
		options: RouteOptions,
	) -> usize {
		self.add(path, handler, options.with_method(Method::PUT))
	}

	/// Register a DELETE-only route.
	pub fn delete(
		&mut self,
		path: impl Into<String>,
		handler: impl Into<HandlerRef>,
		options: RouteOptions,
	) -> usize {
		self.add(path, handler, options.with_method(Method::DELETE))
	}

	/// Register a HEAD-only route.
	pub fn head(
		&mut self,
		path: impl Into<String>,
		handler: impl Into<HandlerRef>,
		options: RouteOptions,
	) -> usize {
		self.add(path, handler, options.with_method(Method::HEAD))
	}

	/// O(1) lookup by route name. `None` for a name never registered. With
	/// duplicate names, resolves to the most recently registered record.
	pub fn find_by_name(&self, name: &str) -> Option<&Route> {
		self.names.get(name).map(|&index| &self.routes[index])
	}

	/// Linear scan comparing each record's uncompiled template string to
	/// `path` verbatim. This is exact string equality for cache and debug
	/// lookups, not pattern matching.
	pub fn find_by_path(&self, path: &str) -> Option<&Route> {
		self.routes.iter().find(|route| route.path == path)
	}

	/// Append every record of `sub` under `prefix`, in order.
	///
	/// Each record is cloned (the sub-table is never mutated), its template
	/// rewritten to `prefix` plus the original template with any trailing
	/// slash stripped, and any stale compiled matcher dropped so the
	/// rewritten template recompiles.
	///
	/// # Examples
	///
	/// ```
	/// use routeset::{HandlerRef, RouteOptions, RouteSet};
	///
	/// let mut blog = RouteSet::new();
	/// blog.get("/", HandlerRef::new("blog.list"), RouteOptions::new());
	/// blog.get("/:id", HandlerRef::new("blog.show"), RouteOptions::new());
	///
	/// let mut root = RouteSet::new();
	/// root.mount("/blog", &blog);
	///
	/// assert_eq!(root.len(), 2);
	/// assert!(root.find_by_path("/blog").is_some());
	/// assert!(root.find_by_path("/blog/:id").is_some());
	/// assert_eq!(blog.len(), 2);
	/// ```
	pub fn mount(&mut self, prefix: &str, sub: &RouteSet) {
		for original in sub.iter() {
			let mut route = original.clone();
			route.path = format!("{}{}", prefix, original.path.trim_end_matches('/'));
			route.compiled = None;
			self.add_route(route);
		}
	}

	/// Compile every record lacking a matcher. Idempotent and safe to call
	/// repeatedly: already-compiled records are skipped, and a record whose
	/// template fails to compile is reported and left uncompiled without
	/// aborting the rest.
	pub fn compile_all(&mut self) -> Result<(), CompileErrors> {
		let mut errors = Vec::new();
		for route in &mut self.routes {
			if route.is_compiled() {
				continue;
			}
			match route.compile() {
				Ok(()) => tracing::debug!(path = %route.path, "compiled route template"),
				Err(error) => errors.push(error),
			}
		}
		if errors.is_empty() {
			Ok(())
		} else {
			Err(CompileErrors(errors))
		}
	}

	/// Restartable iteration over records in registration order.
	pub fn iter(&self) -> std::slice::Iter<'_, Route> {
		self.routes.iter()
	}

	/// All records, in registration order.
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// Number of registered records (duplicates included).
	pub fn len(&self) -> usize {
		self.routes.len()
	}

	/// Whether the table has no records.
	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

impl<'a> IntoIterator for &'a RouteSet {
	type Item = &'a Route;
	type IntoIter = std::slice::Iter<'a, Route>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::TemplateError;

	#[test]
	fn test_registration_returns_sequence_index() {
		let mut routes = RouteSet::new();
		assert_eq!(routes.add("/a", HandlerRef::new("a"), RouteOptions::new()), 0);
		assert_eq!(routes.add("/b", HandlerRef::new("b"), RouteOptions::new()), 1);
	}

	#[test]
	fn test_duplicate_name_keeps_both_records_index_points_at_newest() {
		let mut routes = RouteSet::new();
		routes.add(
			"/old",
			HandlerRef::new("old"),
			RouteOptions::new().with_name("page"),
		);
		routes.add(
			"/new",
			HandlerRef::new("new"),
			RouteOptions::new().with_name("page"),
		);

		assert_eq!(routes.len(), 2);
		assert_eq!(routes.find_by_name("page").unwrap().path, "/new");
		assert_eq!(routes.routes()[0].path, "/old");
	}

	#[test]
	fn test_find_by_name_absent_is_none() {
		let routes = RouteSet::new();
		assert!(routes.find_by_name("never").is_none());
	}

	#[test]
	fn test_find_by_path_is_verbatim_not_pattern() {
		let mut routes = RouteSet::new();
		routes.add("/blog/:id", HandlerRef::new("blog.show"), RouteOptions::new());

		assert!(routes.find_by_path("/blog/:id").is_some());
		assert!(routes.find_by_path("/blog/42").is_none());
	}

	#[test]
	fn test_mount_strips_trailing_slash_and_preserves_sub_table() {
		let mut sub = RouteSet::new();
		sub.add("/list/", HandlerRef::new("list"), RouteOptions::new());

		let mut root = RouteSet::new();
		root.mount("/api", &sub);

		assert_eq!(root.routes()[0].path, "/api/list");
		assert_eq!(sub.routes()[0].path, "/list/");
	}

	#[test]
	fn test_mount_drops_stale_compiled_matcher() {
		let mut sub = RouteSet::new();
		sub.add("/:id", HandlerRef::new("show"), RouteOptions::new());
		sub.compile_all().unwrap();

		let mut root = RouteSet::new();
		root.mount("/blog", &sub);

		assert!(!root.routes()[0].is_compiled());
		root.compile_all().unwrap();
		assert_eq!(root.routes()[0].compiled.as_ref().unwrap().template(), "/blog/:id");
	}

	#[test]
	fn test_compile_all_reports_failures_without_aborting() {
		let mut routes = RouteSet::new();
		routes.add("/ok/:id", HandlerRef::new("ok"), RouteOptions::new());
		routes.add("/bad/:9x", HandlerRef::new("bad"), RouteOptions::new());
		routes.add("/also-ok", HandlerRef::new("also"), RouteOptions::new());

		let errors = routes.compile_all().unwrap_err();
		assert_eq!(errors.0.len(), 1);
		assert!(matches!(errors.0[0], TemplateError::MalformedVariable { .. }));

		assert!(routes.routes()[0].is_compiled());
		assert!(!routes.routes()[1].is_compiled());
		assert!(routes.routes()[2].is_compiled());

		// A second pass retries only the failed record.
		let errors = routes.compile_all().unwrap_err();
		assert_eq!(errors.0.len(), 1);
	}

	#[test]
	fn test_iteration_is_restartable() {
		let mut routes = RouteSet::new();
		routes.add("/a", HandlerRef::new("a"), RouteOptions::new());
		routes.add("/b", HandlerRef::new("b"), RouteOptions::new());

		let first: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
		let second: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
		assert_eq!(first, vec!["/a", "/b"]);
		assert_eq!(first, second);
	}
}
