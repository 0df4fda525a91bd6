//! # Routeset
//!
//! An ordered route table with compiled path templates and method-aware
//! dispatch:
//!
//! - **Registration-order priority**: the first route registered is the
//!   first one tried, regardless of specificity.
//! - **Compiled templates**: `:name` variables with per-variable regex
//!   requirements, plus a trailing `:name*` greedy variable capturing the
//!   remainder of the path.
//! - **Named routes and mounting**: O(1) lookup by name, sub-tables mounted
//!   under a literal prefix.
//! - **Pure dispatch**: `resolve` is a read-only function of the compiled
//!   table, safe for unbounded concurrent use; `None` is the normal
//!   no-match outcome.
//! - **Persisted compiled form**: a compiled table serializes and reloads
//!   with identical resolution behavior.
//!
//! Transport, content negotiation, middleware, and handler result
//! serialization are caller responsibilities; this crate turns a method and
//! a path into a handler reference and bindings, nothing more.
//!
//! # Examples
//!
//! ## Registration and dispatch
//!
//! ```
//! use routeset::{HandlerRef, Method, RouteOptions, RouteSet, Router};
//!
//! let mut routes = RouteSet::new();
//! routes.get("/blog", HandlerRef::new("blog.list"), RouteOptions::new());
//! routes.get(
//!     "/blog/:id",
//!     HandlerRef::new("blog.show"),
//!     RouteOptions::new().with_requirement("id", r"\d+"),
//! );
//!
//! let router = Router::new(routes).unwrap();
//!
//! let hit = router.resolve(&Method::GET, "/blog/3").unwrap();
//! assert_eq!(hit.route.handler.name, "blog.show");
//! assert_eq!(hit.params.get("id"), Some(&"3".to_string()));
//!
//! // `abc` fails the `\d+` requirement; no other route matches.
//! assert!(router.resolve(&Method::GET, "/blog/abc").is_none());
//! ```
//!
//! ## Mounting a feature's routes under a prefix
//!
//! ```
//! use routeset::{HandlerRef, Method, RouteOptions, RouteSet, Router};
//!
//! let mut blog = RouteSet::new();
//! blog.get("/", HandlerRef::new("blog.list"), RouteOptions::new());
//! blog.get("/:id", HandlerRef::new("blog.show"), RouteOptions::new());
//!
//! let mut root = RouteSet::new();
//! root.mount("/restful", &blog);
//!
//! let router = Router::new(root).unwrap();
//! assert!(router.resolve(&Method::GET, "/restful/7").is_some());
//! ```
//!
//! ## Invoking the matched handler
//!
//! ```
//! use routeset::{HandlerRef, HandlerRegistry, Method, Params, RouteOptions, RouteSet, Router};
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register_fn("blog.show", |params: &Params| {
//!     Ok(serde_json::json!({ "id": params.get("id") }))
//! });
//!
//! let mut routes = RouteSet::new();
//! routes.get("/blog/:id", HandlerRef::new("blog.show"), RouteOptions::new());
//! let router = Router::new(routes).unwrap();
//!
//! let hit = router.resolve(&Method::GET, "/blog/3").unwrap();
//! let value = registry.invoke(&hit.route.handler, &hit.params).unwrap();
//! assert_eq!(value, serde_json::json!({ "id": "3" }));
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod pattern;
pub mod restful;
pub mod route;
pub mod router;
pub mod table;

pub use config::{RouteConfig, RouteEntry};
pub use error::{CompileErrors, ConfigError, HandlerError, TemplateError};
pub use handler::{Handler, HandlerRef, HandlerRegistry, HandlerResult};
pub use pattern::{DEFAULT_GREEDY_PATTERN, DEFAULT_PATTERN, Params, PathPattern};
pub use restful::ResourceRoutes;
pub use route::{Route, RouteOptions};
pub use router::{Match, Router};
pub use table::RouteSet;

// Re-exported so callers and doctests need no direct `http` dependency.
pub use http::Method;
