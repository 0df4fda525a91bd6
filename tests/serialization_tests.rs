// Persisted-form tests: a compiled table survives serialization and resolves
// identically after reload.

use routeset::{HandlerRef, Method, RouteOptions, RouteSet, Router};

fn sample_table() -> RouteSet {
	let mut routes = RouteSet::new();
	routes.get("/blog", HandlerRef::new("blog.list"), RouteOptions::new());
	routes.get(
		"/blog/:id",
		HandlerRef::new("blog.show"),
		RouteOptions::new()
			.with_name("blog_detail")
			.with_requirement("id", r"\d+")
			.with_default("format", "html"),
	);
	routes.add(
		"/files/:path*",
		HandlerRef::new("files"),
		RouteOptions::new().with_default("path", "index.html"),
	);
	routes.post(
		"/blog",
		HandlerRef::new("blog.create").with_args(serde_json::json!({ "draft": false })),
		RouteOptions::new().with_secure(true),
	);
	routes
}

const PROBES: &[(&str, &str)] = &[
	("GET", "/blog"),
	("GET", "/blog/42"),
	("GET", "/blog/abc"),
	("GET", "/files"),
	("GET", "/files/css/site.css"),
	("POST", "/blog"),
	("DELETE", "/blog/42"),
];

// Test: a compiled table reloaded from JSON resolves every probe identically
#[test]
fn test_reloaded_table_resolves_identically() {
	let original = Router::new(sample_table()).unwrap();

	let encoded = serde_json::to_string(original.routes()).unwrap();
	let decoded: RouteSet = serde_json::from_str(&encoded).unwrap();
	let reloaded = Router::new(decoded).unwrap();

	for (method, path) in PROBES {
		let before = original.resolve_str(method, path);
		let after = reloaded.resolve_str(method, path);
		match (before, after) {
			(Some(b), Some(a)) => {
				assert_eq!(b.route.handler, a.route.handler, "{method} {path}");
				assert_eq!(b.route.path, a.route.path, "{method} {path}");
				assert_eq!(b.params, a.params, "{method} {path}");
			}
			(None, None) => {}
			_ => panic!("resolution diverged after reload for {method} {path}"),
		}
	}
}

// Test: record metadata survives the round trip
#[test]
fn test_record_metadata_survives_round_trip() {
	let mut routes = sample_table();
	routes.compile_all().unwrap();

	let encoded = serde_json::to_string(&routes).unwrap();
	let decoded: RouteSet = serde_json::from_str(&encoded).unwrap();

	let detail = decoded.find_by_name("blog_detail").unwrap();
	assert_eq!(detail.method, Some(Method::GET));
	assert_eq!(detail.requirements.get("id").map(String::as_str), Some(r"\d+"));
	assert_eq!(detail.defaults.get("format").map(String::as_str), Some("html"));

	let create = decoded
		.iter()
		.find(|r| r.handler.name == "blog.create")
		.unwrap();
	assert!(create.secure);
	assert_eq!(
		create.handler.args,
		Some(serde_json::json!({ "draft": false }))
	);
}

// Test: a matcher deserialized from the persisted form validates again
#[test]
fn test_deserialized_matchers_revalidate_requirements() {
	let mut routes = sample_table();
	routes.compile_all().unwrap();

	let encoded = serde_json::to_string(&routes).unwrap();
	let decoded: RouteSet = serde_json::from_str(&encoded).unwrap();
	let router = Router::new(decoded).unwrap();

	assert!(router.resolve(&Method::GET, "/blog/7").is_some());
	assert!(router.resolve(&Method::GET, "/blog/seven").is_none());
}

// Test: a table serialized before compilation reloads and compiles cleanly
#[test]
fn test_uncompiled_table_round_trips_then_compiles() {
	let encoded = serde_json::to_string(&sample_table()).unwrap();
	let decoded: RouteSet = serde_json::from_str(&encoded).unwrap();

	let router = Router::new(decoded).unwrap();
	assert!(router.resolve(&Method::GET, "/blog/7").is_some());
}
