//! Path template compilation and matching.
//!
//! A template is a `/`-separated sequence of segments. `:name` marks a
//! variable consuming exactly one path segment; `:name*` (permitted only as
//! the final segment) marks a greedy variable capturing the joined remainder
//! of the path. Each variable validates its captured text against an
//! anchored regex: an explicit per-variable requirement when one is given,
//! otherwise `[^/]+` (or `.+` for greedy variables).
//!
//! Compilation is pure and deterministic: compiling the same template and
//! requirements twice yields matchers that behave identically, which is what
//! makes the serialized form of a compiled table round-trippable.

use crate::error::TemplateError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameter bindings produced by a successful match: variable name to
/// captured (or defaulted) value.
pub type Params = HashMap<String, String>;

/// Default validation pattern for a non-greedy variable.
pub const DEFAULT_PATTERN: &str = "[^/]+";

/// Default validation pattern for a greedy variable.
pub const DEFAULT_GREEDY_PATTERN: &str = ".+";

static VAR_NAME: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid literal regex"));

/// Strips trailing slashes so `/blog/` and `/blog` compare equal, keeping
/// `/` itself intact. Applied to templates at compile time and to request
/// paths at dispatch time, symmetric with the mount-time strip.
pub(crate) fn normalize(path: &str) -> &str {
	let trimmed = path.trim_end_matches('/');
	if trimmed.is_empty() && !path.is_empty() { "/" } else { trimmed }
}

/// Splits a normalized path into segments. The root path has no segments;
/// interior empty segments (from `//`) are preserved so matching stays
/// strict.
fn split_segments(normalized: &str) -> Vec<&str> {
	let rest = normalized.strip_prefix('/').unwrap_or(normalized);
	if rest.is_empty() {
		Vec::new()
	} else {
		rest.split('/').collect()
	}
}

fn anchored(template: &str, name: &str, pattern: &str) -> Result<Regex, TemplateError> {
	Regex::new(&format!("^(?:{pattern})$")).map_err(|source| TemplateError::InvalidRequirement {
		template: template.to_string(),
		name: name.to_string(),
		source,
	})
}

/// One compiled segment matcher.
#[derive(Debug, Clone)]
enum Segment {
	/// Matches exactly this text.
	Literal(String),
	/// Matches one segment (or the joined remainder when greedy) against an
	/// anchored regex and captures it under `name`.
	Var {
		name: String,
		pattern: String,
		regex: Regex,
		greedy: bool,
	},
}

/// A compiled path template: ordered segment matchers plus the variable
/// names in template order.
///
/// # Examples
///
/// ```
/// use routeset::PathPattern;
///
/// let pattern = PathPattern::new("/blog/:id").unwrap();
/// let params = pattern.match_path("/blog/42").unwrap();
/// assert_eq!(params.get("id"), Some(&"42".to_string()));
/// assert!(pattern.match_path("/blog/42/comments").is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PatternRepr", into = "PatternRepr")]
pub struct PathPattern {
	template: String,
	segments: Vec<Segment>,
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a template with no per-variable requirements.
	pub fn new(template: &str) -> Result<Self, TemplateError> {
		Self::compile(template, &HashMap::new())
	}

	/// Compiles a template, resolving each variable's validation pattern.
	///
	/// An explicit entry in `requirements` takes precedence; otherwise the
	/// compiler-wide default applies ([`DEFAULT_PATTERN`], or
	/// [`DEFAULT_GREEDY_PATTERN`] for a greedy variable). Requirement keys
	/// that name no variable in the template are ignored.
	///
	/// # Examples
	///
	/// ```
	/// use std::collections::HashMap;
	/// use routeset::PathPattern;
	///
	/// let mut requirements = HashMap::new();
	/// requirements.insert("id".to_string(), r"\d+".to_string());
	///
	/// let pattern = PathPattern::compile("/blog/:id", &requirements).unwrap();
	/// assert!(pattern.match_path("/blog/42").is_some());
	/// assert!(pattern.match_path("/blog/abc").is_none());
	/// ```
	pub fn compile(
		template: &str,
		requirements: &HashMap<String, String>,
	) -> Result<Self, TemplateError> {
		let normalized = normalize(template).to_string();
		let raw_segments = split_segments(&normalized);
		let last = raw_segments.len().saturating_sub(1);

		let mut segments = Vec::with_capacity(raw_segments.len());
		let mut param_names: Vec<String> = Vec::new();

		for (i, raw) in raw_segments.iter().enumerate() {
			let Some(var) = raw.strip_prefix(':') else {
				segments.push(Segment::Literal(raw.to_string()));
				continue;
			};

			let (name, greedy) = match var.strip_suffix('*') {
				Some(name) => (name, true),
				None => (var, false),
			};

			if !VAR_NAME.is_match(name) {
				return Err(TemplateError::MalformedVariable {
					template: normalized.clone(),
					segment: raw.to_string(),
				});
			}
			if param_names.iter().any(|existing| existing == name) {
				return Err(TemplateError::DuplicateVariable {
					template: normalized.clone(),
					name: name.to_string(),
				});
			}
			if greedy && i != last {
				return Err(TemplateError::MisplacedGreedy {
					template: normalized.clone(),
					name: name.to_string(),
				});
			}

			let default = if greedy { DEFAULT_GREEDY_PATTERN } else { DEFAULT_PATTERN };
			let pattern = requirements
				.get(name)
				.map(String::as_str)
				.unwrap_or(default)
				.to_string();
			let regex = anchored(&normalized, name, &pattern)?;

			param_names.push(name.to_string());
			segments.push(Segment::Var {
				name: name.to_string(),
				pattern,
				regex,
				greedy,
			});
		}

		Ok(Self {
			template: normalized,
			segments,
			param_names,
		})
	}

	/// The normalized template this pattern was compiled from.
	pub fn template(&self) -> &str {
		&self.template
	}

	/// Variable names in template order (capture order).
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Whether the pattern contains no variables.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Whether the final segment is a greedy variable.
	pub fn has_greedy_tail(&self) -> bool {
		matches!(self.segments.last(), Some(Segment::Var { greedy: true, .. }))
	}

	/// Structural match: returns the captured bindings, or `None` when the
	/// path does not satisfy the pattern.
	///
	/// Segment counts must agree exactly unless the pattern ends in a greedy
	/// variable, in which case the path only needs the preceding segments;
	/// an empty greedy remainder matches with no capture (the route's
	/// defaults can fill the binding in).
	pub fn match_path(&self, path: &str) -> Option<Params> {
		let segs = split_segments(normalize(path));
		let greedy_tail = self.has_greedy_tail();
		let fixed = self.segments.len() - usize::from(greedy_tail);

		if greedy_tail {
			if segs.len() < fixed {
				return None;
			}
		} else if segs.len() != self.segments.len() {
			return None;
		}

		let mut params = Params::new();
		for (i, segment) in self.segments.iter().enumerate() {
			match segment {
				Segment::Literal(text) => {
					if segs[i] != text.as_str() {
						return None;
					}
				}
				Segment::Var {
					name,
					regex,
					greedy: false,
					..
				} => {
					if !regex.is_match(segs[i]) {
						return None;
					}
					params.insert(name.clone(), segs[i].to_string());
				}
				Segment::Var {
					name,
					regex,
					greedy: true,
					..
				} => {
					let remainder = segs[i..].join("/");
					if remainder.is_empty() {
						continue;
					}
					if !regex.is_match(&remainder) {
						return None;
					}
					params.insert(name.clone(), remainder);
				}
			}
		}
		Some(params)
	}

	/// Whether the path would match, without building bindings.
	pub fn is_match(&self, path: &str) -> bool {
		self.match_path(path).is_some()
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.template == other.template
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.template)
	}
}

// Serialized form: the deterministic inputs of compilation. Regexes are
// rebuilt on load, so a reloaded pattern behaves identically.

#[derive(Clone, Serialize, Deserialize)]
struct PatternRepr {
	template: String,
	segments: Vec<SegmentRepr>,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SegmentRepr {
	Literal(String),
	Var {
		name: String,
		pattern: String,
		greedy: bool,
	},
}

impl From<PathPattern> for PatternRepr {
	fn from(pattern: PathPattern) -> Self {
		Self {
			template: pattern.template,
			segments: pattern
				.segments
				.into_iter()
				.map(|segment| match segment {
					Segment::Literal(text) => SegmentRepr::Literal(text),
					Segment::Var {
						name,
						pattern,
						greedy,
						..
					} => SegmentRepr::Var {
						name,
						pattern,
						greedy,
					},
				})
				.collect(),
		}
	}
}

impl TryFrom<PatternRepr> for PathPattern {
	type Error = TemplateError;

	fn try_from(repr: PatternRepr) -> Result<Self, Self::Error> {
		let mut segments = Vec::with_capacity(repr.segments.len());
		let mut param_names = Vec::new();

		for segment in repr.segments {
			match segment {
				SegmentRepr::Literal(text) => segments.push(Segment::Literal(text)),
				SegmentRepr::Var {
					name,
					pattern,
					greedy,
				} => {
					let regex = anchored(&repr.template, &name, &pattern)?;
					param_names.push(name.clone());
					segments.push(Segment::Var {
						name,
						pattern,
						regex,
						greedy,
					});
				}
			}
		}

		Ok(Self {
			template: repr.template,
			segments,
			param_names,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_exact_template() {
		let pattern = PathPattern::new("/blog").unwrap();
		assert!(pattern.is_exact());
		assert!(pattern.is_match("/blog"));
		assert!(pattern.is_match("/blog/"));
		assert!(!pattern.is_match("/blog/42"));
		assert!(!pattern.is_match("/other"));
	}

	#[test]
	fn test_root_template() {
		let pattern = PathPattern::new("/").unwrap();
		assert!(pattern.is_match("/"));
		assert!(!pattern.is_match("/blog"));
	}

	#[test]
	fn test_single_variable() {
		let pattern = PathPattern::new("/blog/:id").unwrap();
		let params = pattern.match_path("/blog/42").unwrap();
		assert_eq!(params.get("id"), Some(&"42".to_string()));
		assert!(pattern.match_path("/blog").is_none());
		assert!(pattern.match_path("/blog/42/comments").is_none());
	}

	#[test]
	fn test_multiple_variables_capture_order() {
		let pattern = PathPattern::new("/users/:user_id/posts/:post_id").unwrap();
		assert_eq!(pattern.param_names(), &["user_id", "post_id"]);

		let params = pattern.match_path("/users/7/posts/9").unwrap();
		assert_eq!(params.get("user_id"), Some(&"7".to_string()));
		assert_eq!(params.get("post_id"), Some(&"9".to_string()));
	}

	#[test]
	fn test_requirement_takes_precedence_over_default() {
		let mut requirements = HashMap::new();
		requirements.insert("id".to_string(), r"\d+".to_string());

		let pattern = PathPattern::compile("/blog/:id", &requirements).unwrap();
		assert!(pattern.is_match("/blog/3"));
		assert!(!pattern.is_match("/blog/abc"));
	}

	#[test]
	fn test_requirement_is_full_match_not_partial() {
		let mut requirements = HashMap::new();
		requirements.insert("id".to_string(), r"\d+".to_string());

		let pattern = PathPattern::compile("/blog/:id", &requirements).unwrap();
		assert!(!pattern.is_match("/blog/3abc"));
		assert!(!pattern.is_match("/blog/abc3"));
	}

	#[test]
	fn test_greedy_tail_captures_remainder() {
		let pattern = PathPattern::new("/files/:path*").unwrap();
		let params = pattern.match_path("/files/css/site/main.css").unwrap();
		assert_eq!(params.get("path"), Some(&"css/site/main.css".to_string()));
	}

	#[test]
	fn test_greedy_tail_may_be_absent() {
		let pattern = PathPattern::new("/files/:path*").unwrap();
		let params = pattern.match_path("/files").unwrap();
		assert!(params.is_empty());
	}

	#[test]
	fn test_greedy_must_be_final_segment() {
		let err = PathPattern::new("/files/:path*/meta").unwrap_err();
		assert!(matches!(err, TemplateError::MisplacedGreedy { .. }));
	}

	#[test]
	fn test_malformed_variable_segment() {
		let err = PathPattern::new("/blog/:").unwrap_err();
		assert!(matches!(err, TemplateError::MalformedVariable { .. }));

		let err = PathPattern::new("/blog/:9id").unwrap_err();
		assert!(matches!(err, TemplateError::MalformedVariable { .. }));
	}

	#[test]
	fn test_duplicate_variable_name() {
		let err = PathPattern::new("/blog/:id/rev/:id").unwrap_err();
		assert!(matches!(err, TemplateError::DuplicateVariable { .. }));
	}

	#[test]
	fn test_invalid_requirement_regex() {
		let mut requirements = HashMap::new();
		requirements.insert("id".to_string(), "[".to_string());

		let err = PathPattern::compile("/blog/:id", &requirements).unwrap_err();
		assert!(matches!(err, TemplateError::InvalidRequirement { .. }));
	}

	#[test]
	fn test_trailing_slash_normalization_is_symmetric() {
		let pattern = PathPattern::new("/blog/").unwrap();
		assert_eq!(pattern.template(), "/blog");
		assert!(pattern.is_match("/blog"));
		assert!(pattern.is_match("/blog/"));
	}

	#[test]
	fn test_serde_round_trip_behaves_identically() {
		let mut requirements = HashMap::new();
		requirements.insert("id".to_string(), r"\d+".to_string());

		let pattern = PathPattern::compile("/blog/:id", &requirements).unwrap();
		let json = serde_json::to_string(&pattern).unwrap();
		let restored: PathPattern = serde_json::from_str(&json).unwrap();

		assert_eq!(pattern, restored);
		assert_eq!(
			restored.match_path("/blog/42"),
			pattern.match_path("/blog/42")
		);
		assert!(restored.match_path("/blog/abc").is_none());
	}
}
