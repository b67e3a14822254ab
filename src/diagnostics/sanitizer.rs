// SPDX-License-Identifier: MPL-2.0
//! Scrubbing of free-form text before it enters the diagnostics buffer.
//!
//! Renderer errors and configuration warnings often quote file paths, which
//! can contain user names. Those are replaced by a placeholder and overly long
//! messages are cut, so exported reports stay small and anonymous.

use std::sync::LazyLock;

use regex::Regex;

/// Longest message kept, in characters.
pub const MAX_MESSAGE_CHARS: usize = 240;

static PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // A path runs until whitespace, a quote, a paren or a bracket.
    Regex::new(concat!(
        r#"("#,
        r#"/home/[^\s"'()\[\]]+"#,
        r#"|/Users/[^\s"'()\[\]]+"#,
        r#"|/tmp/[^\s"'()\[\]]+"#,
        r#"|/var/[^\s"'()\[\]]+"#,
        r#"|/etc/[^\s"'()\[\]]+"#,
        r#"|/opt/[^\s"'()\[\]]+"#,
        r#"|~/[^\s"'()\[\]]+"#,
        r#"|[A-Za-z]:\\[^\s"'()\[\]]+"#,
        r#"|\\\\[^\s"'()\[\]]+"#,
        r#")"#,
    ))
    .expect("path regex should compile")
});

/// Replaces file paths with `<path>` and truncates to
/// [`MAX_MESSAGE_CHARS`].
///
/// ```
/// use toastline::diagnostics::sanitize_message;
///
/// let msg = "settings at /home/ada/.config/toastline/settings.toml are invalid";
/// assert_eq!(sanitize_message(msg), "settings at <path> are invalid");
/// ```
#[must_use]
pub fn sanitize_message(message: &str) -> String {
    let scrubbed = PATH_PATTERN.replace_all(message, "<path>");
    match scrubbed.char_indices().nth(MAX_MESSAGE_CHARS) {
        Some((cut, _)) => format!("{}…", &scrubbed[..cut]),
        None => scrubbed.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_paths_are_replaced() {
        assert_eq!(
            sanitize_message("Failed to open /home/user/settings.toml"),
            "Failed to open <path>"
        );
        assert_eq!(
            sanitize_message("Copy from /tmp/a to /var/b failed"),
            "Copy from <path> to <path> failed"
        );
    }

    #[test]
    fn windows_paths_are_replaced() {
        assert_eq!(
            sanitize_message(r"Cannot read C:\Users\name\settings.toml"),
            "Cannot read <path>"
        );
        assert_eq!(
            sanitize_message(r"Cannot access \\server\share\file"),
            "Cannot access <path>"
        );
    }

    #[test]
    fn home_shortcut_and_quotes() {
        assert_eq!(
            sanitize_message("File \"~/notes/todo.txt\" not found"),
            "File \"<path>\" not found"
        );
    }

    #[test]
    fn plain_messages_are_untouched() {
        assert_eq!(sanitize_message("renderer rejected"), "renderer rejected");
        assert_eq!(sanitize_message(""), "");
    }

    #[test]
    fn long_messages_are_truncated_on_char_boundary() {
        let long = "é".repeat(MAX_MESSAGE_CHARS + 10);
        let sanitized = sanitize_message(&long);

        assert_eq!(sanitized.chars().count(), MAX_MESSAGE_CHARS + 1);
        assert!(sanitized.ends_with('…'));
    }

    #[test]
    fn message_at_limit_is_kept_whole() {
        let exact = "a".repeat(MAX_MESSAGE_CHARS);
        assert_eq!(sanitize_message(&exact), exact);
    }
}
