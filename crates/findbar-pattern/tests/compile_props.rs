//! Property tests for the pattern compiler.

use findbar_pattern::{compile, CommandDefinition, CompiledPattern};
use proptest::prelude::*;

/// Literal text free of placeholder syntax and trailing whitespace
fn literal() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .*+?^$|\\[\\]{}-]{1,16}[a-zA-Z0-9.]".prop_filter("no placeholder", |s| !s.contains("(:"))
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z_$][a-zA-Z0-9_$]{0,10}"
}

proptest! {
    #[test]
    fn prop_literal_patterns_have_no_param(pattern in literal()) {
        let compiled = CompiledPattern::parse(&pattern);
        prop_assert!(compiled.param.is_none());
        prop_assert_eq!(&compiled.prefix, &pattern);
    }

    #[test]
    fn prop_literal_matches_exactly_its_prefix(pattern in literal(), tail in "[a-z ]{0,8}") {
        let command = compile(&CommandDefinition::new("cmd", pattern.clone())).unwrap();

        let extended = format!("{pattern}{tail}");
        prop_assert!(command.is_match(&extended));
        prop_assert!(command.is_match(&extended.to_uppercase()));

        // Dropping the last literal char must break the match
        let truncated = &pattern[..pattern.len() - 1];
        prop_assert!(!command.is_match(truncated));
    }

    #[test]
    fn prop_placeholder_value_is_captured_trimmed(
        prefix in "[a-z]{1,8}",
        name in identifier(),
        value in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,10}[a-zA-Z0-9]",
    ) {
        let pattern = format!("{prefix} (:{name})");
        let command = compile(&CommandDefinition::new("cmd", pattern)).unwrap();

        prop_assert_eq!(command.param().map(|p| p.name.clone()), Some(name));
        let input = format!("{prefix}   {value}  ");
        let capture = command.captures(&input).unwrap();
        prop_assert_eq!(capture.value(), Some(value.as_str()));
    }

    #[test]
    fn prop_compile_never_fails_on_pattern_syntax(pattern in "\\PC{0,32}") {
        prop_assert!(compile(&CommandDefinition::new("cmd", pattern)).is_ok());
    }
}
