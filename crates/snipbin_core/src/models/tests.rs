//! Model-level unit tests.

use super::snippet::*;

fn sample() -> Snippet {
    Snippet {
        id: "0123456789abcdef0123456789abcdef".to_string(),
        name: "hello".to_string(),
        body: "print('hi')".to_string(),
        mode: Mode::Python,
        time_created: 1_700_000_000,
        time_expired: 1_700_086_400,
        user_id: String::new(),
    }
}

#[test]
fn mode_parses_only_the_allow_list() {
    for mode in Mode::ALL {
        assert_eq!(mode.as_str().parse::<Mode>(), Ok(mode));
    }
    assert_eq!(
        "unsupported-lang".parse::<Mode>(),
        Err(UnknownMode("unsupported-lang".to_string()))
    );
    assert!("Rust".parse::<Mode>().is_err());
}

#[test]
fn snippet_view_copies_persisted_fields() {
    let snippet = sample();
    let view = SnippetView::from(&snippet);
    assert_eq!(view.snippet_name, snippet.name);
    assert_eq!(view.snippet_text, snippet.body);
    assert_eq!(view.mode, Mode::Python);
    assert_eq!(view.time_created, snippet.time_created);
    assert_eq!(view.time_expired, snippet.time_expired);
}

#[test]
fn snippet_id_shape_check() {
    assert!(is_valid_snippet_id("0123456789abcdef0123456789abcdef"));
    assert!(!is_valid_snippet_id("0123456789ABCDEF0123456789abcdef"));
    assert!(!is_valid_snippet_id("0123456789abcdef"));
    assert!(!is_valid_snippet_id("0123456789abcdef0123456789abcdeg"));
    assert!(!is_valid_snippet_id("nonexistent-but-well-formed-id"));
}
