use serde::Serialize;

use crate::report::TestRecord;

/// Kinds of canned fix suggestions, in rule-table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionKind {
    DomExistenceCheck,
    FunctionExistenceCheck,
    WaitWithTimeout,
    StorageFallback,
    StateInitialization,
    ModuleLoadOrder,
    OutputEscaping,
    NullSafeAccess,
    GenericErrorHandling,
}

impl SuggestionKind {
    pub fn title(self) -> &'static str {
        match self {
            SuggestionKind::DomExistenceCheck => "DOM element check",
            SuggestionKind::FunctionExistenceCheck => "Function existence check",
            SuggestionKind::WaitWithTimeout => "Timeout handling",
            SuggestionKind::StorageFallback => "Storage access fallback",
            SuggestionKind::StateInitialization => "State initialization",
            SuggestionKind::ModuleLoadOrder => "Module load order",
            SuggestionKind::OutputEscaping => "Output escaping",
            SuggestionKind::NullSafeAccess => "Null-safe access",
            SuggestionKind::GenericErrorHandling => "Generic error handling",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SuggestionKind::DomExistenceCheck => {
                "Check that the DOM element exists (wait with checkElement) before using it"
            }
            SuggestionKind::FunctionExistenceCheck => {
                "Check that the function is exposed; skip instead of failing when it is missing"
            }
            SuggestionKind::WaitWithTimeout => {
                "Increase the wait time or poll for the element with checkElement"
            }
            SuggestionKind::StorageFallback => {
                "Wrap localStorage access in try/catch and fall back to a default"
            }
            SuggestionKind::StateInitialization => {
                "Make sure AppState is initialized before the event handler runs"
            }
            SuggestionKind::ModuleLoadOrder => {
                "Check script load order so dependencies are loaded first"
            }
            SuggestionKind::OutputEscaping => {
                "Check that escapeHtml is applied to untrusted text"
            }
            SuggestionKind::NullSafeAccess => {
                "Use optional chaining (?.) and null checks on nested lookups"
            }
            SuggestionKind::GenericErrorHandling => {
                "Add try/catch and decide between skip and fail based on the error"
            }
        }
    }

    /// Literal snippet text. Placeholders such as `testName` are left for a human.
    pub fn code(self) -> &'static str {
        match self {
            SuggestionKind::DomExistenceCheck => include_str!("snippets/dom-existence-check.js"),
            SuggestionKind::FunctionExistenceCheck => {
                include_str!("snippets/function-existence-check.js")
            }
            SuggestionKind::WaitWithTimeout => include_str!("snippets/wait-with-timeout.js"),
            SuggestionKind::StorageFallback => include_str!("snippets/storage-fallback.js"),
            SuggestionKind::StateInitialization => {
                include_str!("snippets/state-initialization.js")
            }
            SuggestionKind::ModuleLoadOrder => include_str!("snippets/module-load-order.js"),
            SuggestionKind::OutputEscaping => include_str!("snippets/output-escaping.js"),
            SuggestionKind::NullSafeAccess => include_str!("snippets/null-safe-access.js"),
            SuggestionKind::GenericErrorHandling => {
                include_str!("snippets/generic-error-handling.js")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub code: String,
}

impl From<SuggestionKind> for Suggestion {
    fn from(kind: SuggestionKind) -> Self {
        Suggestion {
            kind,
            title: kind.title().to_string(),
            description: kind.description().to_string(),
            code: kind.code().to_string(),
        }
    }
}

/// Lower-cased views of the fields the rules look at.
struct Signals {
    name: String,
    category: String,
    error: String,
}

impl Signals {
    fn of(test: &TestRecord) -> Self {
        Self {
            name: test.name.to_lowercase(),
            category: test.category.to_lowercase(),
            error: test.error_text().to_lowercase(),
        }
    }

    fn error_has(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.error.contains(n))
    }

    fn name_has(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.name.contains(n))
    }
}

struct Rule {
    kind: SuggestionKind,
    matches: fn(&Signals) -> bool,
}

/// Evaluated top to bottom; every matching rule contributes.
const RULES: &[Rule] = &[
    Rule {
        kind: SuggestionKind::DomExistenceCheck,
        matches: |s| {
            s.error_has(&["null", "undefined", "cannot read"])
                && (s.category == "ui" || s.name_has(&["render", "ui"]))
        },
    },
    Rule {
        kind: SuggestionKind::FunctionExistenceCheck,
        matches: |s| s.error_has(&["function"]),
    },
    Rule {
        kind: SuggestionKind::WaitWithTimeout,
        matches: |s| s.error_has(&["timeout", "time"]),
    },
    Rule {
        kind: SuggestionKind::StorageFallback,
        matches: |s| s.error_has(&["localstorage", "storage"]),
    },
    Rule {
        kind: SuggestionKind::StateInitialization,
        matches: |s| s.category == "events" && s.error_has(&["null", "undefined"]),
    },
    Rule {
        kind: SuggestionKind::ModuleLoadOrder,
        matches: |s| s.name_has(&["module", "load"]),
    },
    Rule {
        kind: SuggestionKind::OutputEscaping,
        matches: |s| s.name_has(&["xss", "security"]),
    },
    Rule {
        kind: SuggestionKind::NullSafeAccess,
        matches: |s| s.error_has(&["cannot read"]),
    },
];

/// Suggestions for one failed test. Never empty: a generic error-handling
/// snippet is returned when no rule matches.
pub fn suggestions_for(test: &TestRecord) -> Vec<Suggestion> {
    let signals = Signals::of(test);
    let mut out: Vec<Suggestion> = RULES
        .iter()
        .filter(|rule| (rule.matches)(&signals))
        .map(|rule| Suggestion::from(rule.kind))
        .collect();

    if out.is_empty() {
        out.push(SuggestionKind::GenericErrorHandling.into());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_test;

    fn failed(name: &str, category: &str, error: Option<&str>) -> TestRecord {
        make_test(name, category, "failed", error)
    }

    fn kinds(test: &TestRecord) -> Vec<SuggestionKind> {
        suggestions_for(test).into_iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_cannot_read_null_in_ui() {
        let test = failed("header", "ui", Some("Cannot read properties of null (reading 'x')"));
        let got = kinds(&test);
        assert!(got.contains(&SuggestionKind::DomExistenceCheck));
        assert!(got.contains(&SuggestionKind::NullSafeAccess));
    }

    #[test]
    fn test_dom_check_gated_by_name_hint() {
        let test = failed("renderMessages", "app", Some("undefined is not iterable"));
        assert!(kinds(&test).contains(&SuggestionKind::DomExistenceCheck));

        let test = failed("persist", "app", Some("undefined is not iterable"));
        assert!(!kinds(&test).contains(&SuggestionKind::DomExistenceCheck));
    }

    #[test]
    fn test_timeout_regardless_of_category() {
        for category in ["ui", "events", "app", "llm", ""] {
            let test = failed("anything", category, Some("timeout after 5000ms"));
            assert!(kinds(&test).contains(&SuggestionKind::WaitWithTimeout));
        }
    }

    #[test]
    fn test_function_and_storage() {
        assert_eq!(
            kinds(&failed("a", "ui", Some("x is not a function"))),
            vec![SuggestionKind::FunctionExistenceCheck]
        );
        assert_eq!(
            kinds(&failed("b", "app", Some("localStorage is not defined"))),
            vec![SuggestionKind::StorageFallback]
        );
    }

    #[test]
    fn test_state_initialization_only_for_events() {
        let test = failed("click", "events", Some("AppState is undefined"));
        assert!(kinds(&test).contains(&SuggestionKind::StateInitialization));

        let test = failed("click", "app", Some("AppState is undefined"));
        assert!(!kinds(&test).contains(&SuggestionKind::StateInitialization));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let test = failed("Render", "UI", Some("TIMEOUT while reading NULL"));
        let got = kinds(&test);
        assert!(got.contains(&SuggestionKind::DomExistenceCheck));
        assert!(got.contains(&SuggestionKind::WaitWithTimeout));
    }

    #[test]
    fn test_multiple_rules_in_table_order() {
        let test = failed(
            "load module",
            "events",
            Some("Cannot read properties of undefined: storage timeout, not a function"),
        );
        assert_eq!(
            kinds(&test),
            vec![
                SuggestionKind::FunctionExistenceCheck,
                SuggestionKind::WaitWithTimeout,
                SuggestionKind::StorageFallback,
                SuggestionKind::StateInitialization,
                SuggestionKind::ModuleLoadOrder,
                SuggestionKind::NullSafeAccess,
            ]
        );
    }

    #[test]
    fn test_name_hints() {
        assert_eq!(
            kinds(&failed("xss escaping", "security", None)),
            vec![SuggestionKind::OutputEscaping]
        );
    }

    #[test]
    fn test_generic_fallback_when_nothing_matches() {
        let got = suggestions_for(&failed("sum", "math", Some("expected 4 got 5")));
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].kind, SuggestionKind::GenericErrorHandling);

        let got = suggestions_for(&failed("sum", "math", None));
        assert_eq!(got[0].kind, SuggestionKind::GenericErrorHandling);
    }

    #[test]
    fn test_suggestion_serializes_type_slug() {
        let s: Suggestion = SuggestionKind::DomExistenceCheck.into();
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["type"], "dom-existence-check");
        assert_eq!(value["title"], "DOM element check");
        assert!(value["code"].as_str().unwrap().contains("testName"));
    }

    #[test]
    fn test_every_snippet_has_placeholder_or_content() {
        for kind in [
            SuggestionKind::DomExistenceCheck,
            SuggestionKind::FunctionExistenceCheck,
            SuggestionKind::WaitWithTimeout,
            SuggestionKind::StorageFallback,
            SuggestionKind::StateInitialization,
            SuggestionKind::ModuleLoadOrder,
            SuggestionKind::OutputEscaping,
            SuggestionKind::NullSafeAccess,
            SuggestionKind::GenericErrorHandling,
        ] {
            assert!(kind.code().starts_with("//"), "{kind:?} snippet missing header comment");
        }
    }
}
