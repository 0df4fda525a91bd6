//! Declarative route configuration.
//!
//! A TOML document of route entries, applied to a [`RouteSet`] through the
//! normal registration API. This is the explicit, statically-checked
//! replacement for discovering routes from source-code metadata:
//!
//! ```toml
//! [[routes]]
//! path = "/blog"
//! handler = "blog.list"
//! method = "get"
//!
//! [[routes]]
//! path = "/blog/:id"
//! handler = "blog.show"
//! method = "get"
//! name = "blog_detail"
//!
//! [routes.requirements]
//! id = '\d+'
//! ```

use crate::error::ConfigError;
use crate::handler::HandlerRef;
use crate::route::{RouteOptions, parse_method};
use crate::table::RouteSet;
use serde::Deserialize;
use std::collections::HashMap;

/// A parsed route configuration document.
///
/// # Examples
///
/// ```
/// use routeset::{RouteConfig, RouteSet};
///
/// let document = r#"
///     [[routes]]
///     path = "/blog"
///     handler = "blog.list"
///     method = "get"
/// "#;
///
/// let config = RouteConfig::from_toml(document).unwrap();
/// let mut routes = RouteSet::new();
/// config.apply(&mut routes).unwrap();
///
/// assert_eq!(routes.len(), 1);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
	#[serde(default)]
	routes: Vec<RouteEntry>,
}

/// One declarative route entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteEntry {
	/// Path template.
	pub path: String,
	/// Handler registry key.
	pub handler: String,
	/// Optional HTTP method filter, case-insensitive.
	#[serde(default)]
	pub method: Option<String>,
	/// Explicit name overriding the derived one.
	#[serde(default)]
	pub name: Option<String>,
	/// Per-variable validation patterns.
	#[serde(default)]
	pub requirements: HashMap<String, String>,
	/// Fallback values for uncaptured variables.
	#[serde(default)]
	pub defaults: HashMap<String, String>,
	/// Secure-transport-only flag.
	#[serde(default)]
	pub secure: bool,
	/// Pre-dispatch hook marker.
	#[serde(default)]
	pub before: bool,
	/// Opaque invocation arguments.
	#[serde(default)]
	pub args: Option<serde_json::Value>,
}

impl RouteConfig {
	/// Parse a TOML document.
	pub fn from_toml(document: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(document)?)
	}

	/// The parsed entries, in document order.
	pub fn entries(&self) -> &[RouteEntry] {
		&self.routes
	}

	/// Register every entry into `table`, in document order.
	///
	/// Fails on the first entry with an invalid method string; entries
	/// before it are already registered.
	pub fn apply(&self, table: &mut RouteSet) -> Result<(), ConfigError> {
		for entry in &self.routes {
			let mut options = RouteOptions::new();
			if let Some(raw) = &entry.method {
				let method = parse_method(raw).map_err(|_| ConfigError::InvalidMethod {
					path: entry.path.clone(),
					method: raw.clone(),
				})?;
				options = options.with_method(method);
			}
			if let Some(name) = &entry.name {
				options = options.with_name(name.clone());
			}
			for (variable, pattern) in &entry.requirements {
				options = options.with_requirement(variable.clone(), pattern.clone());
			}
			for (variable, value) in &entry.defaults {
				options = options.with_default(variable.clone(), value.clone());
			}
			options = options.with_secure(entry.secure).with_before(entry.before);
			if let Some(args) = &entry.args {
				options = options.with_args(args.clone());
			}
			table.add(entry.path.clone(), HandlerRef::new(&entry.handler), options);
		}
		Ok(())
	}
}
