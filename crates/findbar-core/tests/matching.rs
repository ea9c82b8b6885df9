//! End-to-end matching and suggestion behaviour over realistic command lists.

use findbar_core::{match_input, suggest, Action, MatchOutcome, Scope, SuggestionLimits};
use findbar_test_utils::{command_set, definitions, editor_commands, example_commands};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn open_with_value_dispatches_open_file() {
    let set = command_set(&example_commands());
    assert_eq!(
        match_input("open rep", None, &set),
        MatchOutcome::Dispatch {
            action: Action::with_param("openFile", "fileName", "rep"),
        }
    );
}

#[test]
fn bare_open_prompts_for_file_name() {
    let set = command_set(&example_commands());
    let outcome = match_input("open", None, &set);
    let MatchOutcome::Prompt { scope, prompt } = outcome else {
        panic!("expected prompt, got {outcome:?}");
    };
    assert_eq!(prompt, "File Name");
    assert_eq!(scope.label(), "open");
    assert_eq!(
        scope,
        Scope::Command {
            token: "openFile".to_string(),
            prefix: "open ".to_string(),
        }
    );
}

#[test]
fn explicit_label_is_the_prompt() {
    let set = command_set(&editor_commands());
    let outcome = match_input("go to line", None, &set);
    assert!(matches!(
        outcome,
        MatchOutcome::Prompt { ref prompt, .. } if prompt == "Line Number"
    ));
}

#[test]
fn prompt_then_value_completes_through_scope() {
    let set = command_set(&editor_commands());
    let MatchOutcome::Prompt { scope, .. } = match_input("find in files", None, &set) else {
        panic!("expected prompt");
    };

    let outcome = match_input("  TODO(findbar) ", Some(&scope), &set);
    assert_eq!(
        outcome.action(),
        Some(&Action::with_param("findInFiles", "query", "TODO(findbar)"))
    );
}

#[test]
fn overlapping_prefixes_resolve_by_declaration_order() {
    let earlier_general = command_set(&definitions(&[("go", "go"), ("goTo", "go to (:page)")]));
    assert_eq!(
        match_input("go to page", None, &earlier_general).action(),
        Some(&Action::new("go"))
    );

    let earlier_specific = command_set(&definitions(&[("goTo", "go to (:page)"), ("go", "go")]));
    assert_eq!(
        match_input("go to page", None, &earlier_specific).action(),
        Some(&Action::with_param("goTo", "page", "page"))
    );
}

#[test]
fn metadata_survives_compilation() {
    let set = command_set(&editor_commands());
    let open = set.get("openFile").unwrap();
    assert_eq!(open.metadata().get("icon").and_then(|v| v.as_str()), Some("folder"));
}

#[test]
fn suggestion_caps_hold_for_editor_commands() {
    let set = command_set(&editor_commands());
    let limits = SuggestionLimits::default();

    let empty = suggest("", None, &set, limits);
    assert_eq!(empty.len(), 5);
    assert!(empty.iter().all(|s| !s.is_search()));

    let typed = suggest("e", None, &set, limits);
    assert!(typed.len() <= 5);
    assert!(typed.last().unwrap().is_search());
    assert!(typed[..typed.len() - 1].iter().all(|s| !s.is_search()));
}

fn input_text() -> impl Strategy<Value = String> {
    "[a-z ]{0,12}"
}

proptest! {
    #[test]
    fn prop_unmatched_input_searches_trimmed(input in "[xyz][a-z ]{0,12}") {
        let set = command_set(&editor_commands());
        let outcome = match_input(&input, None, &set);
        let trimmed = input.trim();
        prop_assert_eq!(outcome.search_term(), Some(trimmed));
    }

    #[test]
    fn prop_suggestions_never_exceed_caps(input in input_text()) {
        let set = command_set(&editor_commands());
        let list = suggest(&input, None, &set, SuggestionLimits::default());
        if input.is_empty() {
            prop_assert!(list.len() <= 5);
            prop_assert!(list.iter().all(|s| !s.is_search()));
        } else {
            prop_assert!(list.len() <= 5);
            prop_assert!(list.last().is_some_and(|s| s.is_search()));
        }
    }

    #[test]
    fn prop_prefix_value_dispatches(
        prefix in "[a-z]{1,6}",
        value in "[a-zA-Z0-9]{1,10}",
    ) {
        let pattern = format!("{prefix}(:name)");
        let set = command_set(&definitions(&[("cmd", pattern.as_str())]));
        let outcome = match_input(&format!("{prefix} {value}"), None, &set);
        prop_assert_eq!(outcome.action(), Some(&Action::with_param("cmd", "name", value.as_str())));

        let bare = match_input(&prefix, None, &set);
        let is_prompt = matches!(bare, MatchOutcome::Prompt { ref prompt, .. } if prompt == "Name");
        prop_assert!(is_prompt);
    }
}
