//! Terminal Rendering
//!
//! Lays out transcript messages as bubbles: the user's on the right,
//! the assistant's on the left, each at most three quarters of the width.

use crate::session::{Message, Role};

/// Shown while a chat request is in flight
pub const THINKING_INDICATOR: &str = "Companion is thinking...";

/// Default terminal width when none is given
pub const DEFAULT_WIDTH: usize = 80;

/// Which side of the view a bubble sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

impl From<Role> for Alignment {
    fn from(role: Role) -> Self {
        match role {
            Role::User => Alignment::Right,
            Role::Assistant => Alignment::Left,
        }
    }
}

/// Render one message as aligned lines, without a trailing newline
pub fn render_bubble(message: &Message, width: usize) -> String {
    let width = width.max(8);
    let max_line = (width * 3 / 4).max(4);
    let alignment = Alignment::from(message.role());

    wrap(message.content(), max_line)
        .into_iter()
        .map(|line| match alignment {
            Alignment::Left => line,
            Alignment::Right => {
                let pad = width.saturating_sub(line.chars().count());
                format!("{}{}", " ".repeat(pad), line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap `text` to `max` characters per line at word boundaries.
///
/// Explicit newlines and whitespace runs are kept as written; only the
/// whitespace at a soft break is dropped.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;

        for run in runs(paragraph) {
            let run_len = run.chars().count();

            if current_len + run_len <= max {
                current.push_str(run);
                current_len += run_len;
                continue;
            }

            if !current.trim().is_empty() {
                lines.push(current.trim_end().to_string());
            }
            current.clear();
            current_len = 0;

            if run.starts_with(char::is_whitespace) {
                continue;
            }

            if run_len <= max {
                current.push_str(run);
                current_len = run_len;
                continue;
            }

            // Break words that cannot fit on any line
            let chars: Vec<char> = run.chars().collect();
            let mut chunks = chars.chunks(max).peekable();
            while let Some(chunk) = chunks.next() {
                if chunks.peek().is_some() {
                    lines.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                    current_len = chunk.len();
                }
            }
        }

        lines.push(current);
    }

    lines
}

/// Split `text` into alternating runs of whitespace and non-whitespace
fn runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            runs.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }

    if start < text.len() {
        runs.push(&text[start..]);
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_bubble_is_right_aligned() {
        let rendered = render_bubble(&Message::user("hello"), 20);
        assert_eq!(rendered, format!("{}hello", " ".repeat(15)));
    }

    #[test]
    fn test_assistant_bubble_is_left_aligned() {
        let rendered = render_bubble(&Message::assistant("hi there"), 20);
        assert_eq!(rendered, "hi there");
    }

    #[test]
    fn test_long_messages_wrap_at_three_quarters() {
        let rendered = render_bubble(
            &Message::assistant("one two three four five six seven"),
            20,
        );
        for line in rendered.lines() {
            assert!(line.chars().count() <= 15, "line too long: {line:?}");
        }
        assert_eq!(rendered.lines().count(), 3);
    }

    #[test]
    fn test_explicit_newlines_are_kept() {
        let rendered = render_bubble(&Message::assistant("first\n\nsecond"), 40);
        assert_eq!(rendered, "first\n\nsecond");
    }

    #[test]
    fn test_oversized_word_is_split() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("ab abcdefgh cd", 4), vec!["ab", "abcd", "efgh", "cd"]);
    }

    #[test]
    fn test_whitespace_is_kept() {
        let text = "* item\n    indented   code\ttab";
        assert_eq!(render_bubble(&Message::assistant(text), 80), text);
    }

    #[test]
    fn test_soft_break_drops_only_the_break() {
        assert_eq!(wrap("  a  b   cdef", 6), vec!["  a  b", "cdef"]);
        assert_eq!(runs("  a  b"), vec!["  ", "a", "  ", "b"]);
    }
}
