//! Identifier casing helpers used by templates.
//!
//! Case conversion is delegated to [`heck`], which segments identifiers on
//! delimiters, case changes and acronym runs (`HTTPServer` -> `Http`,
//! `Server`). The target helpers additionally upper-case a trailing acronym
//! so generated code reads `UserID` rather than `UserId`.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `user_id` | [`to_target_camel`] | `UserID` |
//! | `site_url` | [`to_target_lower_camel`] | `siteURL` |
//! | `id` | [`to_target_camel`] | `ID` |
//! | `id` | [`to_target_lower_camel`] | `id` |
//! | `CreateUser` | [`strip_crud_prefix`] | `User` |
//! | `user_accounts` | [`table_to_object`] | `UserAccounts` |

use std::fmt;
use std::str::FromStr;

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Suffixes rewritten to their all-caps form, checked in order.
const ACRONYM_SUFFIXES: [(&str, &str); 5] = [
    ("Uuid", "UUID"),
    ("Json", "JSON"),
    ("Url", "URL"),
    ("Id", "ID"),
    ("Ip", "IP"),
];

#[allow(clippy::expect_used)] // Safe: pattern is a compile-time constant
static CRUD_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(Create|Read|List|Update|Delete)(.*)").expect("valid CRUD prefix pattern")
});

/// Target casing for [`normalize_case`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseStyle {
    /// `UpperCamel`
    Camel,
    /// `lowerCamel`
    LowerCamel,
    /// `snake_case`
    Snake,
    /// `SCREAMING_SNAKE`
    ScreamingSnake,
    /// `kebab-case`
    Kebab,
    /// `SCREAMING-KEBAB`
    ScreamingKebab,
}

impl CaseStyle {
    pub const ALL: [CaseStyle; 6] = [
        CaseStyle::Camel,
        CaseStyle::LowerCamel,
        CaseStyle::Snake,
        CaseStyle::ScreamingSnake,
        CaseStyle::Kebab,
        CaseStyle::ScreamingKebab,
    ];

    /// Name of the template filter that applies this style.
    pub fn filter_name(self) -> &'static str {
        match self {
            CaseStyle::Camel => "to_camel",
            CaseStyle::LowerCamel => "to_lower_camel",
            CaseStyle::Snake => "to_snake",
            CaseStyle::ScreamingSnake => "to_screaming_snake",
            CaseStyle::Kebab => "to_kebab",
            CaseStyle::ScreamingKebab => "to_screaming_kebab",
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CaseStyle::Camel => "camel",
            CaseStyle::LowerCamel => "lower-camel",
            CaseStyle::Snake => "snake",
            CaseStyle::ScreamingSnake => "screaming-snake",
            CaseStyle::Kebab => "kebab",
            CaseStyle::ScreamingKebab => "screaming-kebab",
        };
        f.write_str(name)
    }
}

impl FromStr for CaseStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "camel" | "upper-camel" | "pascal" => Ok(CaseStyle::Camel),
            "lower-camel" => Ok(CaseStyle::LowerCamel),
            "snake" => Ok(CaseStyle::Snake),
            "screaming-snake" => Ok(CaseStyle::ScreamingSnake),
            "kebab" => Ok(CaseStyle::Kebab),
            "screaming-kebab" => Ok(CaseStyle::ScreamingKebab),
            other => Err(format!("unknown case style: {other}")),
        }
    }
}

/// Convert `identifier` to the given case style.
///
/// # Examples
///
/// ```
/// use schemagen_core::naming::{CaseStyle, normalize_case};
///
/// assert_eq!(normalize_case("HTTPServer", CaseStyle::Snake), "http_server");
/// assert_eq!(normalize_case("user-name", CaseStyle::Camel), "UserName");
/// ```
pub fn normalize_case(identifier: &str, style: CaseStyle) -> String {
    match style {
        CaseStyle::Camel => identifier.to_upper_camel_case(),
        CaseStyle::LowerCamel => identifier.to_lower_camel_case(),
        CaseStyle::Snake => identifier.to_snake_case(),
        CaseStyle::ScreamingSnake => identifier.to_shouty_snake_case(),
        CaseStyle::Kebab => identifier.to_kebab_case(),
        CaseStyle::ScreamingKebab => identifier.to_shouty_kebab_case(),
    }
}

/// Upper camel case with a trailing acronym capitalised.
///
/// ```
/// use schemagen_core::naming::to_target_camel;
///
/// assert_eq!(to_target_camel("user_id"), "UserID");
/// assert_eq!(to_target_camel("avatar_url"), "AvatarURL");
/// assert_eq!(to_target_camel("id"), "ID");
/// ```
pub fn to_target_camel(identifier: &str) -> String {
    let cased = identifier.to_upper_camel_case();
    if cased.eq_ignore_ascii_case("id") {
        return "ID".to_string();
    }
    rewrite_acronym_suffix(cased)
}

/// Lower camel case with a trailing acronym capitalised.
///
/// Unlike [`to_target_camel`], a bare `id` stays `id`.
///
/// ```
/// use schemagen_core::naming::to_target_lower_camel;
///
/// assert_eq!(to_target_lower_camel("id"), "id");
/// assert_eq!(to_target_lower_camel("remote_ip"), "remoteIP");
/// ```
pub fn to_target_lower_camel(identifier: &str) -> String {
    rewrite_acronym_suffix(identifier.to_lower_camel_case())
}

fn rewrite_acronym_suffix(mut cased: String) -> String {
    for (suffix, replacement) in ACRONYM_SUFFIXES {
        if cased.ends_with(suffix) {
            cased.truncate(cased.len() - suffix.len());
            cased.push_str(replacement);
            break;
        }
    }
    cased
}

/// Drop the CRUD verb from an rpc or message name.
///
/// The verb may appear anywhere; text before it is kept.
///
/// ```
/// use schemagen_core::naming::strip_crud_prefix;
///
/// assert_eq!(strip_crud_prefix("CreateUser"), "User");
/// assert_eq!(strip_crud_prefix("Ping"), "Ping");
/// ```
pub fn strip_crud_prefix(name: &str) -> String {
    CRUD_PREFIX.replace(name, "${2}").into_owned()
}

/// Table name to the object (message/struct) name used in generated code.
pub fn table_to_object(table: &str) -> String {
    table.to_upper_camel_case()
}
