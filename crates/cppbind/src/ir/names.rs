//! Name and identifier helpers
//!
//! Qualified-name slicing, type normalization and the identifier fragment
//! formatting shared by every emitter.

use crate::error::{BindError, BindResult};

/// Qualifier tokens removed by [`normalize_cpp_type`]
const TYPE_QUALIFIERS: [&str; 4] = ["const", "volatile", "&", "*"];

/// Reduce a type expression to its base identifier.
///
/// Whitespace-separated `const`, `volatile`, `&` and `*` tokens are removed,
/// then the last `::` segment of the remaining token is returned. Only
/// whitespace tokenization is performed: `Foo*` is a single token and is
/// handled by trimming trailing pointer/reference markers.
pub fn normalize_cpp_type(cpp_type: &str) -> BindResult<String> {
    let tokens: Vec<&str> = cpp_type
        .split_whitespace()
        .map(|token| token.trim_end_matches(['&', '*']))
        .filter(|token| !token.is_empty() && !TYPE_QUALIFIERS.contains(token))
        .collect();

    match tokens.as_slice() {
        [single] => Ok(single.rsplit("::").next().unwrap_or(single).to_string()),
        [] => Err(BindError::unsupported(cpp_type, "type has no base identifier")),
        _ => Err(BindError::unsupported(
            cpp_type,
            "type normalizes to more than one token",
        )),
    }
}

/// Turn an arbitrary name into an identifier fragment.
///
/// Characters that cannot appear in a C++ identifier are dropped and the
/// first remaining character is upper-cased. The rest keeps its case.
pub fn clean_capitalize(name: &str) -> String {
    let mut chars = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_');
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_ascii_uppercase().to_string() + &chars.collect::<String>(),
    }
}

/// Capitalize every underscore-separated word and join them
/// (`left_shift` -> `LeftShift`)
pub fn capitalize_words(snake: &str) -> String {
    snake.split('_').map(clean_capitalize).collect()
}

/// Drop a trailing template argument list (`Vector<int>::x` -> `Vector`)
pub fn strip_template(qualified_name: &str) -> &str {
    qualified_name
        .split_once('<')
        .map_or(qualified_name, |(head, _)| head)
}

/// Last `::` segment of a qualified name
pub fn short_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit("::")
        .next()
        .unwrap_or(qualified_name)
}

/// Namespace of a qualified name, i.e. everything before its last segment.
///
/// The template suffix is stripped first so that `ns::Box<a::B>` belongs to
/// `ns`. Returns an empty string for names in the global namespace.
pub fn parent_namespace(qualified_name: &str) -> &str {
    strip_template(qualified_name)
        .rsplit_once("::")
        .map_or("", |(parent, _)| parent)
}

/// Split a namespace path into its segments (`a::b` -> `["a", "b"]`)
pub fn namespace_segments(namespace: &str) -> Vec<String> {
    namespace
        .split("::")
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

/// Convert a declaration location into the path used in `#include <...>`.
///
/// Separators become `/` and everything up to and including the last
/// `include` directory is removed.
pub fn include_path(location: &str) -> String {
    let normalized = location.replace('\\', "/");
    let segments: Vec<&str> = normalized
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();

    let start = segments
        .iter()
        .rposition(|segment| *segment == "include")
        .map_or(0, |index| index + 1);

    segments[start..].join("/")
}

/// Whether an include path refers to a source file rather than a header
pub fn is_local_source(path: &str) -> bool {
    const SOURCE_EXTENSIONS: [&str; 4] = [".cpp", ".cc", ".cxx", ".c"];
    SOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_qualifiers() {
        assert_eq!(normalize_cpp_type("const Foo &").unwrap(), "Foo");
        assert_eq!(normalize_cpp_type("Foo").unwrap(), "Foo");
        assert_eq!(normalize_cpp_type("Foo*").unwrap(), "Foo");
        assert_eq!(normalize_cpp_type("Foo *").unwrap(), "Foo");
        assert_eq!(normalize_cpp_type("const volatile Bar::Baz").unwrap(), "Baz");
    }

    #[test]
    fn test_normalize_only_tokenizes_on_whitespace() {
        assert_eq!(
            normalize_cpp_type("std::pair<int,int>").unwrap(),
            "pair<int,int>"
        );
        // "constant" is a type name, not the const qualifier
        assert_eq!(normalize_cpp_type("constant").unwrap(), "constant");
    }

    #[test]
    fn test_normalize_rejects_compound_types() {
        let err = normalize_cpp_type("std::pair<int, int>").unwrap_err();
        assert!(matches!(err, BindError::UnsupportedConstruct { .. }));
        assert!(normalize_cpp_type("unsigned int").is_err());
        assert!(normalize_cpp_type("const &").is_err());
    }

    #[test]
    fn test_clean_capitalize() {
        assert_eq!(clean_capitalize("vector2"), "Vector2");
        assert_eq!(clean_capitalize("getPosition"), "GetPosition");
        assert_eq!(clean_capitalize("pair<int,int>"), "Pairintint");
        assert_eq!(clean_capitalize(""), "");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("left_shift"), "LeftShift");
        assert_eq!(capitalize_words("add"), "Add");
    }

    #[test]
    fn test_qualified_name_helpers() {
        assert_eq!(short_name("obe::Graphics::Sprite"), "Sprite");
        assert_eq!(parent_namespace("obe::Graphics::Sprite"), "obe::Graphics");
        assert_eq!(parent_namespace("obe::Box<obe::Graphics::Sprite>"), "obe");
        assert_eq!(parent_namespace("main"), "");
        assert_eq!(namespace_segments("a::b::c"), vec!["a", "b", "c"]);
        assert!(namespace_segments("").is_empty());
    }

    #[test]
    fn test_include_path() {
        assert_eq!(
            include_path("include/Core/Graphics/Sprite.hpp"),
            "Core/Graphics/Sprite.hpp"
        );
        assert_eq!(
            include_path("C:\\engine\\include\\Core\\Math.hpp"),
            "Core/Math.hpp"
        );
        assert_eq!(include_path("./Core/Math.hpp"), "Core/Math.hpp");
    }

    #[test]
    fn test_is_local_source() {
        assert!(is_local_source("Core/Math.cpp"));
        assert!(!is_local_source("Core/Math.hpp"));
    }
}
