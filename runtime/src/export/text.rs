//! Flat-text transcript.

use crate::types::Message;

const SEPARATOR: &str = "---";

/// Render a plain-text transcript.
///
/// Layout: a `Title:`/`URL:` header followed by a `---` line, then one
/// `Role:` record per message, each closed by its own `---` line. Blank
/// lines separate every block.
pub fn to_text(title: &str, source: &str, messages: &[Message]) -> String {
    let mut out = format!("Title: {title}\nURL: {source}\n\n{SEPARATOR}\n\n");
    for message in messages {
        out.push_str(&format!(
            "Role: {}\n\n{}\n\n{SEPARATOR}\n\n",
            message.role, message.content
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_layout() {
        let messages = vec![Message::user("Hi"), Message::assistant("Hello")];
        let text = to_text("T", "http://x", &messages);
        assert_eq!(
            text,
            "Title: T\nURL: http://x\n\n---\n\n\
             Role: user\n\nHi\n\n---\n\n\
             Role: assistant\n\nHello\n\n---\n\n"
        );
    }

    #[test]
    fn test_substrings_in_order() {
        let messages = vec![Message::user("Hi"), Message::assistant("Hello")];
        let text = to_text("T", "http://x", &messages);

        let mut cursor = 0;
        for needle in ["Title: T", "URL: http://x", "---", "Role: user", "Hi", "---", "Role: assistant", "Hello", "---"] {
            let found = text[cursor..]
                .find(needle)
                .unwrap_or_else(|| panic!("{needle:?} missing after byte {cursor}"));
            cursor += found + needle.len();
        }
    }

    #[test]
    fn test_header_only_when_no_messages() {
        assert_eq!(to_text("T", "u", &[]), "Title: T\nURL: u\n\n---\n\n");
    }

    #[test]
    fn test_multiline_content_kept_verbatim() {
        let text = to_text("T", "u", &[Message::assistant("a\n\nb")]);
        assert!(text.contains("Role: assistant\n\na\n\nb\n\n---\n\n"));
    }
}
