use std::borrow::Cow;

use nicogamma_types::ChatMessage;
use serde::Deserialize;

use crate::replay::Emission;

/// How `&` is escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeMode {
    /// Every `&` is escaped; `"` only inside attribute values.
    #[default]
    Standard,

    /// Byte-compatible with the legacy server: only the first `&` of each
    /// string is escaped, and `"` is escaped in element text as well.
    LegacyFirstAmpersand,
}

/// Render emissions as a bare `<packet>` fragment (no declaration, no namespace).
pub fn serialize_packet(thread_id: u64, emissions: &[Emission], mode: EscapeMode) -> String {
    let mut out = String::with_capacity(64 + emissions.len() * 96);
    out.push_str("<packet>");

    for emission in emissions {
        match emission {
            Emission::ThreadMarker { server_time, last_res } => {
                write_thread_marker(&mut out, thread_id, *server_time, last_res);
            }
            Emission::Chat(chat) => write_chat(&mut out, chat, mode),
        }
    }

    out.push_str("</packet>");
    out
}

fn write_thread_marker(out: &mut String, thread_id: u64, server_time: i64, last_res: &str) {
    out.push_str(&format!(
        r#"<thread resultcode="0" thread="{}" server_time="{}" last_res="{}" ticket="0x00000000" revision="1" />"#,
        thread_id, server_time, last_res
    ));
}

fn write_chat(out: &mut String, chat: &ChatMessage, mode: EscapeMode) {
    out.push_str("<chat");
    for (key, value) in &chat.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attribute(&value.to_string(), mode));
        out.push('"');
    }
    out.push('>');
    out.push_str(&escape_text(&chat.content, mode));
    out.push_str("</chat>");
}

/// Escape an attribute value.
pub fn escape_attribute(input: &str, mode: EscapeMode) -> Cow<'_, str> {
    escape(input, true, mode)
}

/// Escape element text.
pub fn escape_text(input: &str, mode: EscapeMode) -> Cow<'_, str> {
    let quote = mode == EscapeMode::LegacyFirstAmpersand;
    escape(input, quote, mode)
}

fn escape(input: &str, quote: bool, mode: EscapeMode) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quote && c == '"');
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 16);
    let mut ampersand_escaped = false;

    // single pass, so an inserted entity is never escaped again
    for ch in input.chars() {
        match ch {
            '&' if mode == EscapeMode::Standard || !ampersand_escaped => {
                ampersand_escaped = true;
                out.push_str("&amp;");
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quote => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }

    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_every_ampersand() {
        assert_eq!(escape_text("a&b&c", EscapeMode::Standard), "a&amp;b&amp;c");
        assert_eq!(escape_attribute("&&", EscapeMode::Standard), "&amp;&amp;");
    }

    #[test]
    fn test_does_not_double_escape() {
        assert_eq!(escape_text("&lt;", EscapeMode::Standard), "&amp;lt;");
        assert_eq!(escape_text("<&>", EscapeMode::Standard), "&lt;&amp;&gt;");
    }

    #[test]
    fn test_quotes_only_escaped_in_attributes() {
        assert_eq!(escape_attribute(r#"say "hi""#, EscapeMode::Standard), "say &quot;hi&quot;");
        assert_eq!(escape_text(r#"say "hi""#, EscapeMode::Standard), r#"say "hi""#);
    }

    #[test]
    fn test_legacy_mode_escapes_first_ampersand_only() {
        assert_eq!(escape_text("a&b&c", EscapeMode::LegacyFirstAmpersand), "a&amp;b&c");
        assert_eq!(escape_text(r#"<"&">"#, EscapeMode::LegacyFirstAmpersand), "&lt;&quot;&amp;&quot;&gt;");
    }

    #[test]
    fn test_clean_input_is_borrowed() {
        assert!(matches!(escape_text("plain", EscapeMode::Standard), Cow::Borrowed(_)));
        assert!(matches!(escape_text("\"", EscapeMode::Standard), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_packet() {
        assert_eq!(serialize_packet(1, &[], EscapeMode::Standard), "<packet></packet>");
    }

    #[test]
    fn test_chat_with_empty_content_keeps_close_tag() {
        let emissions = vec![Emission::Chat(ChatMessage::default().with_attribute("no", 1i64))];
        assert_eq!(
            serialize_packet(1, &emissions, EscapeMode::Standard),
            r#"<packet><chat no="1"></chat></packet>"#
        );
    }

    #[test]
    fn test_chat_attribute_order_and_escaping() {
        let chat = ChatMessage::new("1 < 2 & 3 > 2")
            .with_attribute("thread", "12345")
            .with_attribute("no", 7i64)
            .with_attribute("mail", r#"184 "big""#)
            .with_attribute("user_id", "a&b");
        let xml = serialize_packet(12345, &[Emission::Chat(chat)], EscapeMode::Standard);
        assert_eq!(
            xml,
            r#"<packet><chat thread="12345" no="7" mail="184 &quot;big&quot;" user_id="a&amp;b">1 &lt; 2 &amp; 3 &gt; 2</chat></packet>"#
        );
    }

    #[test]
    fn test_thread_marker_layout() {
        let emissions = vec![Emission::ThreadMarker {
            server_time: 1700000000,
            last_res: "42".to_string(),
        }];
        assert_eq!(
            serialize_packet(9, &emissions, EscapeMode::Standard),
            r#"<packet><thread resultcode="0" thread="9" server_time="1700000000" last_res="42" ticket="0x00000000" revision="1" /></packet>"#
        );
    }
}
