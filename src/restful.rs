//! Resource-oriented route expansion.
//!
//! A front end over the core registration API: each resource id expands into
//! the fixed CRUD route set, collected in a private table and mounted into a
//! parent under a prefix. Handler references follow the `{resource}.{action}`
//! convention (`create`, `load`, `update`, `delete`, `find`), so callers
//! bind implementations in their [`HandlerRegistry`](crate::HandlerRegistry)
//! under the same keys.

use crate::handler::HandlerRef;
use crate::route::RouteOptions;
use crate::table::RouteSet;

/// Default requirement for a resource's id variable.
pub const DEFAULT_ID_PATTERN: &str = r"\d+";

/// Collects resources and expands each into CRUD routes.
///
/// Per resource `{res}`, in registration order:
///
/// | Verb   | Path         | Handler        | Name           |
/// |--------|--------------|----------------|----------------|
/// | GET    | `/{res}`     | `{res}.find`   | `{res}-list`   |
/// | GET    | `/{res}/:id` | `{res}.load`   | `{res}-detail` |
/// | POST   | `/{res}`     | `{res}.create` | `{res}-create` |
/// | PUT    | `/{res}/:id` | `{res}.update` | `{res}-update` |
/// | DELETE | `/{res}/:id` | `{res}.delete` | `{res}-delete` |
///
/// # Examples
///
/// ```
/// use routeset::{ResourceRoutes, RouteSet};
///
/// let restful = ResourceRoutes::new("/restful").resource("blog");
///
/// let mut root = RouteSet::new();
/// restful.mount_into(&mut root);
///
/// assert_eq!(root.len(), 5);
/// assert_eq!(root.find_by_name("blog-detail").unwrap().path, "/restful/blog/:id");
/// ```
#[derive(Debug, Clone)]
pub struct ResourceRoutes {
	prefix: String,
	routes: RouteSet,
}

impl ResourceRoutes {
	/// Start a resource group mounted under `prefix`.
	pub fn new(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			routes: RouteSet::new(),
		}
	}

	/// Add a resource with the default numeric id requirement.
	pub fn resource(self, id: &str) -> Self {
		self.resource_with_pattern(id, DEFAULT_ID_PATTERN)
	}

	/// Add a resource whose id variable must satisfy `id_pattern`.
	pub fn resource_with_pattern(mut self, id: &str, id_pattern: &str) -> Self {
		let resource = id.trim_matches('/');
		let base = format!("/{resource}");
		let detail = format!("{base}/:id");

		self.routes.get(
			&base,
			HandlerRef::new(format!("{resource}.find")),
			RouteOptions::new().with_name(format!("{resource}-list")),
		);
		self.routes.get(
			&detail,
			HandlerRef::new(format!("{resource}.load")),
			RouteOptions::new()
				.with_name(format!("{resource}-detail"))
				.with_requirement("id", id_pattern),
		);
		self.routes.post(
			&base,
			HandlerRef::new(format!("{resource}.create")),
			RouteOptions::new().with_name(format!("{resource}-create")),
		);
		self.routes.put(
			&detail,
			HandlerRef::new(format!("{resource}.update")),
			RouteOptions::new()
				.with_name(format!("{resource}-update"))
				.with_requirement("id", id_pattern),
		);
		self.routes.delete(
			&detail,
			HandlerRef::new(format!("{resource}.delete")),
			RouteOptions::new()
				.with_name(format!("{resource}-delete"))
				.with_requirement("id", id_pattern),
		);
		self
	}

	/// The mount prefix.
	pub fn prefix(&self) -> &str {
		&self.prefix
	}

	/// The expanded routes, before mounting.
	pub fn routes(&self) -> &RouteSet {
		&self.routes
	}

	/// Mount the expanded routes into a parent table under the prefix.
	pub fn mount_into(&self, table: &mut RouteSet) {
		table.mount(&self.prefix, &self.routes);
	}
}
