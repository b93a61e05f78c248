//! Nickname completion on Tab.
//!
//! Both strategies look at the trailing token (the chars after the last
//! whitespace) and match names whose lowercase form starts with it.
//!
//! - **Normal**: replace the token with the first hit; each further Tab
//!   rotates through the hits.
//! - **Shell**: one hit completes at once. Several hits complete to their
//!   longest common prefix and wait; a further Tab on a token that equals
//!   a hit confirms it.
//!
//! Any other edit sends the state back to `Idle`.

use crate::core::config::{CompletionMode, CompletionSettings};

use super::editor::LineEditor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Completion {
    #[default]
    Idle,
    /// Normal completion in progress.
    Cycling {
        hits: Vec<String>,
        /// Hit currently in the text, followed by `suffix`.
        current: String,
        suffix: String,
    },
    /// Shell completion stopped at a common prefix.
    Pending,
}

impl Completion {
    pub fn reset(&mut self) {
        *self = Completion::Idle;
    }
}

struct Token {
    text: String,
    /// Only whitespace comes before the token.
    starts_line: bool,
}

fn trailing_token(text: &str) -> Token {
    let start = text
        .char_indices()
        .filter(|(_, c)| c.is_whitespace())
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    Token {
        text: text[start..].to_string(),
        starts_line: text[..start].trim().is_empty(),
    }
}

fn matching<'a>(names: &'a [String], prefix: &str) -> Vec<&'a String> {
    let prefix = prefix.to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().starts_with(&prefix))
        .collect()
}

/// Text put after a completed name.
fn after_text(starts_line: bool, separator: &str) -> String {
    if starts_line {
        format!("{separator} ")
    } else {
        " ".to_string()
    }
}

/// Longest prefix of the first hit that every hit starts with, ignoring case.
fn common_prefix(hits: &[&String]) -> String {
    let Some(first) = hits.first() else {
        return String::new();
    };
    let mut prefix = String::new();
    for c in first.chars() {
        let candidate = format!("{prefix}{c}").to_lowercase();
        if !hits.iter().all(|h| h.to_lowercase().starts_with(&candidate)) {
            break;
        }
        prefix.push(c);
    }
    prefix
}

/// Run one Tab press. No-op unless the cursor is at the end of the text.
pub fn complete(
    editor: &mut LineEditor,
    state: &mut Completion,
    names: &[String],
    settings: &CompletionSettings,
) {
    if !editor.at_end() {
        return;
    }
    match settings.mode {
        CompletionMode::Shell if !editor.is_empty() => {
            complete_shell(editor, state, names, &settings.after_completion)
        }
        _ => complete_normal(editor, state, names, &settings.after_completion),
    }
}

pub fn complete_normal(
    editor: &mut LineEditor,
    state: &mut Completion,
    names: &[String],
    separator: &str,
) {
    if let Completion::Cycling {
        hits,
        current,
        suffix,
    } = state
    {
        let replaced = current.chars().count() + suffix.chars().count();
        hits.rotate_left(1);
        *current = hits[0].clone();
        editor.replace_tail(replaced, &format!("{current}{suffix}"));
        return;
    }

    let text = editor.text();
    let token = trailing_token(&text);
    let hits: Vec<String> = matching(names, &token.text).into_iter().cloned().collect();
    let Some(first) = hits.first().cloned() else {
        return;
    };
    let suffix = after_text(token.starts_line, separator);
    editor.replace_tail(token.text.chars().count(), &format!("{first}{suffix}"));
    *state = Completion::Cycling {
        hits,
        current: first,
        suffix,
    };
}

pub fn complete_shell(
    editor: &mut LineEditor,
    state: &mut Completion,
    names: &[String],
    separator: &str,
) {
    let text = editor.text();
    let token = trailing_token(&text);
    let hits = matching(names, &token.text);
    if hits.is_empty() {
        return;
    }
    let after = after_text(token.starts_line, separator);

    let confirmed = if hits.len() == 1 {
        Some(hits[0])
    } else if *state == Completion::Pending {
        let lower = token.text.to_lowercase();
        hits.iter().copied().find(|h| h.to_lowercase() == lower)
    } else {
        None
    };

    let replacement = match confirmed {
        Some(hit) => {
            *state = Completion::Idle;
            format!("{hit}{after}")
        }
        None => {
            *state = Completion::Pending;
            common_prefix(&hits)
        }
    };
    editor.replace_tail(token.text.chars().count(), &replacement);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        vec!["alice".into(), "alicia".into(), "bob".into()]
    }

    fn editor(text: &str) -> LineEditor {
        let mut editor = LineEditor::new(80);
        editor.set_text(text);
        editor
    }

    fn shell() -> CompletionSettings {
        CompletionSettings {
            mode: CompletionMode::Shell,
            ..CompletionSettings::default()
        }
    }

    #[test]
    fn test_trailing_token() {
        let token = trailing_token("  al");
        assert_eq!(token.text, "al");
        assert!(token.starts_line);
        let token = trailing_token("hi al");
        assert_eq!(token.text, "al");
        assert!(!token.starts_line);
        assert_eq!(trailing_token("hi ").text, "");
    }

    #[test]
    fn test_normal_completes_at_line_start_with_separator() {
        let mut editor = editor("AL");
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names(), &CompletionSettings::default());
        assert_eq!(editor.text(), "alice, ");
    }

    #[test]
    fn test_normal_mid_line_gets_single_space() {
        let mut editor = editor("hi b");
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names(), &CompletionSettings::default());
        assert_eq!(editor.text(), "hi bob ");
    }

    #[test]
    fn test_normal_rotation_cycles_back() {
        let names = names();
        let mut editor = editor("");
        let mut state = Completion::Idle;
        let settings = CompletionSettings::default();

        complete(&mut editor, &mut state, &names, &settings);
        assert_eq!(editor.text(), "alice, ");
        complete(&mut editor, &mut state, &names, &settings);
        assert_eq!(editor.text(), "alicia, ");
        complete(&mut editor, &mut state, &names, &settings);
        assert_eq!(editor.text(), "bob, ");
        complete(&mut editor, &mut state, &names, &settings);
        assert_eq!(editor.text(), "alice, ", "back to the first hit after N more presses");
    }

    #[test]
    fn test_normal_without_hits_changes_nothing() {
        let mut editor = editor("zed");
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names(), &CompletionSettings::default());
        assert_eq!(editor.text(), "zed");
        assert_eq!(state, Completion::Idle);
    }

    #[test]
    fn test_completion_requires_cursor_at_end() {
        let mut editor = editor("al");
        editor.left();
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names(), &CompletionSettings::default());
        assert_eq!(editor.text(), "al");
    }

    #[test]
    fn test_shell_common_prefix_then_pending() {
        let mut editor = editor("al");
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names(), &shell());
        assert_eq!(editor.text(), "alic");
        assert_eq!(state, Completion::Pending);

        complete(&mut editor, &mut state, &names(), &shell());
        assert_eq!(editor.text(), "alic", "still ambiguous");
        assert_eq!(state, Completion::Pending);
    }

    #[test]
    fn test_shell_confirms_exact_match_when_pending() {
        let names = vec!["bob".to_string(), "bobby".to_string()];
        let mut editor = editor("hey bo");
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names, &shell());
        assert_eq!(editor.text(), "hey bob");
        complete(&mut editor, &mut state, &names, &shell());
        assert_eq!(editor.text(), "hey bob ");
        assert_eq!(state, Completion::Idle);
    }

    #[test]
    fn test_shell_single_hit_completes_at_once() {
        let mut editor = editor("b");
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names(), &shell());
        assert_eq!(editor.text(), "bob, ");
        assert_eq!(state, Completion::Idle);
    }

    #[test]
    fn test_shell_on_empty_input_uses_normal() {
        let mut editor = editor("");
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names(), &shell());
        assert_eq!(editor.text(), "alice, ");
        assert!(matches!(state, Completion::Cycling { .. }));
    }

    #[test]
    fn test_shell_keeps_first_hit_casing() {
        let names = vec!["Alice".to_string(), "alicia".to_string()];
        let mut editor = editor("a");
        let mut state = Completion::Idle;
        complete(&mut editor, &mut state, &names, &shell());
        assert_eq!(editor.text(), "Alic");
    }
}
