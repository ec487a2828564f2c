//! HTTP route bindings derived from rpc option literals.
//!
//! An rpc annotated with
//!
//! ```text
//! option (google.api.http) = { get: "/users/{id}/posts/{post_id}" };
//! ```
//!
//! binds to method `get`, path `/users/:id/posts/:post_id` and path params
//! `["id", "post_id"]`.

use once_cell::sync::Lazy;
use regex::Regex;
use schemagen_schema::LiteralMap;

/// Method keys in priority order. The first one present wins.
pub const HTTP_METHODS: [&str; 5] = ["post", "get", "put", "delete", "patch"];

/// Key holding the request body selector.
pub const BODY_KEY: &str = "body";

#[allow(clippy::expect_used)] // Safe: pattern is a compile-time constant
static PATH_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_A-Z]*)\}").expect("valid path param pattern"));

/// Method, normalized path and path parameters of one binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteBinding {
    pub method: String,
    pub path: String,
    pub path_params: Vec<String>,
}

impl RouteBinding {
    /// Build a binding from a method and a raw `{name}` path template.
    pub fn new(method: impl Into<String>, raw_path: &str) -> Self {
        let path_params = PATH_PARAM
            .captures_iter(raw_path)
            .map(|caps| caps[1].to_string())
            .collect();
        let path = PATH_PARAM.replace_all(raw_path, ":${1}").into_owned();

        Self {
            method: method.into(),
            path,
            path_params,
        }
    }

    /// `true` when no method key was found.
    pub fn is_unbound(&self) -> bool {
        self.method.is_empty()
    }
}

/// Extract the route binding from an option's aggregate literal.
///
/// Returns an empty binding when no method key is present.
pub fn extract_route(annotations: &LiteralMap) -> RouteBinding {
    HTTP_METHODS
        .iter()
        .find_map(|&method| {
            annotations
                .get(method)
                .map(|literal| RouteBinding::new(method, &literal.source))
        })
        .unwrap_or_default()
}

/// The `body` selector, or an empty string.
pub fn extract_body(annotations: &LiteralMap) -> String {
    annotations
        .get(BODY_KEY)
        .map(|literal| literal.source.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use schemagen_schema::Literal;

    fn annotations(entries: &[(&str, &str)]) -> LiteralMap {
        entries
            .iter()
            .map(|(k, v)| (*k, Literal::string(*v)))
            .collect()
    }

    #[test]
    fn extract_route___get_with_params___normalizes_path() {
        let map = annotations(&[("get", "/users/{id}/posts/{post_id}")]);

        let route = extract_route(&map);

        assert_eq!(route.method, "get");
        assert_eq!(route.path, "/users/:id/posts/:post_id");
        assert_eq!(route.path_params, vec!["id", "post_id"]);
    }

    #[test]
    fn extract_route___post_and_get___post_wins() {
        let map = annotations(&[("get", "/a"), ("post", "/b")]);

        let route = extract_route(&map);

        assert_eq!(route.method, "post");
        assert_eq!(route.path, "/b");
    }

    #[test]
    fn extract_route___delete_and_patch___delete_wins() {
        let map = annotations(&[("patch", "/p"), ("delete", "/d")]);

        assert_eq!(extract_route(&map).method, "delete");
    }

    #[test]
    fn extract_route___no_method___is_unbound() {
        let map = annotations(&[("body", "*")]);

        let route = extract_route(&map);

        assert!(route.is_unbound());
        assert_eq!(route, RouteBinding::default());
    }

    #[test]
    fn extract_route___uppercase_key___is_ignored() {
        let map = annotations(&[("GET", "/x")]);

        assert!(extract_route(&map).is_unbound());
    }

    #[test]
    fn RouteBinding___new___leaves_other_characters_untouched() {
        let route = RouteBinding::new("get", "/v1/{name=projects/*}/items:{batch}");

        assert_eq!(route.path, "/v1/{name=projects/*}/items::batch");
        assert_eq!(route.path_params, vec!["batch"]);
    }

    #[test]
    fn RouteBinding___new___repeated_param___listed_per_occurrence() {
        let route = RouteBinding::new("get", "/{id}/{id}");

        assert_eq!(route.path, "/:id/:id");
        assert_eq!(route.path_params, vec!["id", "id"]);
    }

    #[test]
    fn extract_body___present___returns_source() {
        let map = annotations(&[("post", "/users"), ("body", "user")]);

        assert_eq!(extract_body(&map), "user");
    }

    #[test]
    fn extract_body___absent___is_empty() {
        assert_eq!(extract_body(&LiteralMap::new()), "");
    }
}
