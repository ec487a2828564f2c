//! Property-based tests for type mapping, route extraction and naming

use proptest::prelude::*;
use schemagen_core::naming::{to_target_camel, to_target_lower_camel};
use schemagen_core::route::{RouteBinding, extract_route};
use schemagen_core::types::{WireType, map_column_type};
use schemagen_schema::{Literal, LiteralMap};

// Strategy: path segments that are either literal text or `{param}` tokens
fn arb_segments() -> impl Strategy<Value = Vec<(bool, String)>> {
    prop::collection::vec((any::<bool>(), "[a-z_A-Z]{1,8}"), 0..8)
}

fn arb_method_subset() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(vec!["post", "get", "put", "delete", "patch"], 0..=5)
        .prop_shuffle()
}

proptest! {
    /// Property: every input maps to exactly one known wire type
    #[test]
    fn proptest_map_column_type_is_total(sql_type in ".*") {
        let wire = map_column_type(&sql_type);

        prop_assert!(WireType::ALL.contains(&wire));
    }

    /// Property: case of the type name never changes the mapping
    #[test]
    fn proptest_map_column_type_ignores_case(sql_type in "[a-zA-Z]{1,12}") {
        prop_assert_eq!(
            map_column_type(&sql_type.to_lowercase()),
            map_column_type(&sql_type.to_uppercase())
        );
    }

    /// Property: path params are listed in left-to-right order and each is
    /// rewritten to `:name`
    #[test]
    fn proptest_path_params_keep_order(segments in arb_segments()) {
        let mut raw = String::new();
        let mut expected_path = String::new();
        let mut expected_params = Vec::new();
        for (is_param, name) in &segments {
            raw.push('/');
            expected_path.push('/');
            if *is_param {
                raw.push_str(&format!("{{{name}}}"));
                expected_path.push_str(&format!(":{name}"));
                expected_params.push(name.clone());
            } else {
                raw.push_str(name);
                expected_path.push_str(name);
            }
        }

        let route = RouteBinding::new("get", &raw);

        prop_assert_eq!(route.path, expected_path);
        prop_assert_eq!(route.path_params, expected_params);
    }

    /// Property: the highest-priority method present always wins
    #[test]
    fn proptest_method_priority_first_match(methods in arb_method_subset()) {
        let map: LiteralMap = methods
            .iter()
            .map(|m| (*m, Literal::string(format!("/{m}"))))
            .collect();

        let route = extract_route(&map);

        let expected = ["post", "get", "put", "delete", "patch"]
            .into_iter()
            .find(|m| methods.contains(m))
            .unwrap_or("");
        prop_assert_eq!(route.method, expected);
    }

    /// Property: identifiers ending in `_id` always end in `ID`
    #[test]
    fn proptest_target_helpers_capitalize_id_suffix(stem in "[a-z]{1,10}") {
        let identifier = format!("{stem}_id");

        prop_assert!(to_target_camel(&identifier).ends_with("ID"));
        prop_assert!(to_target_lower_camel(&identifier).ends_with("ID"));
    }
}
